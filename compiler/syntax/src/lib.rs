//! The syntax tree shared by every lowering pass.
//!
//! A [`Program`] is produced by the front end and consumed by the assembler;
//! in between, each pass builds a fresh tree from the previous one. Every node
//! is wrapped in a [`WithInfo`] carrying the driver's [`Info`](Driver::Info),
//! which the passes copy around but never inspect.

mod format;
pub mod traverse;

use derivative::Derivative;
use lync_util::WithInfo;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt::Debug;

/// Provides the syntax tree with information about the program.
pub trait Driver: Sized + 'static {
    /// Additional information attached to every node, usually its offset in
    /// the source code.
    type Info: Debug + Clone + PartialEq + Eq + Serialize + DeserializeOwned + 'static;
}

/// A whole program.
#[derive(Serialize, Deserialize, Derivative)]
#[derivative(
    Debug(bound = ""),
    Clone(bound = ""),
    Default(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
#[serde(rename_all = "camelCase", bound(serialize = "", deserialize = ""))]
pub struct Program<D: Driver> {
    /// The top-level statements in the program.
    pub statements: Vec<WithInfo<D::Info, Statement<D>>>,
}

/// A statement.
#[derive(Serialize, Deserialize, Derivative)]
#[derivative(
    Debug(bound = ""),
    Clone(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
#[serde(rename_all = "camelCase", bound(serialize = "", deserialize = ""))]
pub enum Statement<D: Driver> {
    /// Import a package.
    #[serde(rename_all = "camelCase")]
    Import {
        /// The name to bind the package to. If omitted, the last segment of
        /// the path is used.
        name: Option<String>,

        /// The path of the package.
        path: String,
    },

    /// Declare a variable in the current block.
    #[serde(rename_all = "camelCase")]
    Variable {
        /// The name of the variable.
        name: String,

        /// The variable's initial value.
        value: WithInfo<D::Info, Expression<D>>,
    },

    /// Assign to a variable, or to a property of an object if `object` is
    /// present.
    #[serde(rename_all = "camelCase")]
    Assign {
        /// The object whose property is assigned.
        object: Option<WithInfo<D::Info, Expression<D>>>,

        /// The name of the variable or property.
        name: String,

        /// The new value.
        value: WithInfo<D::Info, Expression<D>>,
    },

    /// Return from the enclosing function.
    Return(WithInfo<D::Info, Expression<D>>),

    /// A conditional.
    #[serde(rename_all = "camelCase")]
    If {
        /// The condition.
        condition: WithInfo<D::Info, Expression<D>>,

        /// The statements run if the condition holds.
        then: Vec<WithInfo<D::Info, Statement<D>>>,

        /// The statements run otherwise.
        r#else: Vec<WithInfo<D::Info, Statement<D>>>,
    },

    /// An expression evaluated for its effect. The statement's info is the
    /// expression's info.
    Expression(Expression<D>),
}

/// An expression.
#[derive(Serialize, Deserialize, Derivative)]
#[derivative(
    Debug(bound = ""),
    Clone(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
#[serde(rename_all = "camelCase", bound(serialize = "", deserialize = ""))]
pub enum Expression<D: Driver> {
    /// The receiver of runtime operations.
    Unit,

    /// A name passed as data (eg. to a runtime operation), as opposed to a
    /// reference to the variable with that name.
    Name(String),

    /// A text literal.
    Text(String),

    /// A number literal, kept as written.
    Number(String),

    /// A reference to a variable.
    Variable(String),

    /// Access a member of an object.
    #[serde(rename_all = "camelCase")]
    Member {
        /// The object.
        object: WithInfo<D::Info, Box<Expression<D>>>,

        /// The name of the member.
        member: String,
    },

    /// A call. If `function` is a [`Expression::Member`], this is a method
    /// call on the member's object.
    #[serde(rename_all = "camelCase")]
    Call {
        /// The function or method to call.
        function: WithInfo<D::Info, Box<Expression<D>>>,

        /// The inputs to the call.
        inputs: Vec<WithInfo<D::Info, Expression<D>>>,
    },

    /// A function literal.
    #[serde(rename_all = "camelCase")]
    Function {
        /// The name of the function, if it was declared with one.
        name: Option<String>,

        /// The function's parameters.
        parameters: Vec<WithInfo<D::Info, String>>,

        /// The function's body.
        body: Vec<WithInfo<D::Info, Statement<D>>>,
    },

    /// A class literal.
    #[serde(rename_all = "camelCase")]
    Class {
        /// The name of the class, if it was declared with one.
        name: Option<String>,

        /// The class's members.
        members: Vec<WithInfo<D::Info, Member<D>>>,
    },
}

/// A member of a class.
#[derive(Serialize, Deserialize, Derivative)]
#[derivative(
    Debug(bound = ""),
    Clone(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
#[serde(rename_all = "camelCase", bound(serialize = "", deserialize = ""))]
pub enum Member<D: Driver> {
    /// A method.
    #[serde(rename_all = "camelCase")]
    Method {
        /// The name of the method.
        name: String,

        /// The method's parameters, not including the receiver.
        parameters: Vec<WithInfo<D::Info, String>>,

        /// The method's body.
        body: Vec<WithInfo<D::Info, Statement<D>>>,
    },
}

/// The names declared directly in `statements` by [`Statement::Variable`],
/// in order of first declaration. Declarations in nested blocks and
/// functions are not included.
pub fn declared_variables<D: Driver>(
    statements: &[WithInfo<D::Info, Statement<D>>],
) -> impl Iterator<Item = &str> {
    statements
        .iter()
        .filter_map(|statement| match &statement.item {
            Statement::Variable { name, .. } => Some(name.as_str()),
            _ => None,
        })
}
