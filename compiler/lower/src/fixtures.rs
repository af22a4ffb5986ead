//! Shorthand for building trees in tests.

use lync_syntax::{Driver, Program};
use lync_util::WithInfo;

pub struct TestDriver;

impl Driver for TestDriver {
    type Info = ();
}

pub type Statement = WithInfo<(), lync_syntax::Statement<TestDriver>>;
pub type Expression = WithInfo<(), lync_syntax::Expression<TestDriver>>;
pub type Member = WithInfo<(), lync_syntax::Member<TestDriver>>;

fn node<T>(item: T) -> WithInfo<(), T> {
    WithInfo::new((), item)
}

fn parameters(names: &[&str]) -> Vec<WithInfo<(), String>> {
    names.iter().map(|name| node(name.to_string())).collect()
}

pub fn program(statements: Vec<Statement>) -> Program<TestDriver> {
    Program { statements }
}

pub fn import(name: Option<&str>, path: &str) -> Statement {
    node(lync_syntax::Statement::Import {
        name: name.map(str::to_string),
        path: path.to_string(),
    })
}

pub fn declare(name: &str, value: Expression) -> Statement {
    node(lync_syntax::Statement::Variable {
        name: name.to_string(),
        value,
    })
}

pub fn assign(name: &str, value: Expression) -> Statement {
    node(lync_syntax::Statement::Assign {
        object: None,
        name: name.to_string(),
        value,
    })
}

pub fn assign_property(object: Expression, name: &str, value: Expression) -> Statement {
    node(lync_syntax::Statement::Assign {
        object: Some(object),
        name: name.to_string(),
        value,
    })
}

pub fn ret(value: Expression) -> Statement {
    node(lync_syntax::Statement::Return(value))
}

pub fn when(condition: Expression, then: Vec<Statement>, r#else: Vec<Statement>) -> Statement {
    node(lync_syntax::Statement::If {
        condition,
        then,
        r#else,
    })
}

pub fn run(expression: Expression) -> Statement {
    expression.map(lync_syntax::Statement::Expression)
}

pub fn unit() -> Expression {
    node(lync_syntax::Expression::Unit)
}

pub fn name(name: &str) -> Expression {
    node(lync_syntax::Expression::Name(name.to_string()))
}

pub fn text(text: &str) -> Expression {
    node(lync_syntax::Expression::Text(text.to_string()))
}

pub fn number(number: &str) -> Expression {
    node(lync_syntax::Expression::Number(number.to_string()))
}

pub fn var(name: &str) -> Expression {
    node(lync_syntax::Expression::Variable(name.to_string()))
}

pub fn member(object: Expression, member: &str) -> Expression {
    node(lync_syntax::Expression::Member {
        object: object.boxed(),
        member: member.to_string(),
    })
}

pub fn call(function: Expression, inputs: Vec<Expression>) -> Expression {
    node(lync_syntax::Expression::Call {
        function: function.boxed(),
        inputs,
    })
}

/// `object.method(inputs...)`
pub fn send(object: Expression, method: &str, inputs: Vec<Expression>) -> Expression {
    call(member(object, method), inputs)
}

/// `unit.hook(inputs...)`
pub fn hook(hook: &str, inputs: Vec<Expression>) -> Expression {
    send(unit(), hook, inputs)
}

pub fn function(parameter_names: &[&str], body: Vec<Statement>) -> Expression {
    node(lync_syntax::Expression::Function {
        name: None,
        parameters: parameters(parameter_names),
        body,
    })
}

pub fn named_function(name: &str, parameter_names: &[&str], body: Vec<Statement>) -> Expression {
    node(lync_syntax::Expression::Function {
        name: Some(name.to_string()),
        parameters: parameters(parameter_names),
        body,
    })
}

pub fn class(name: Option<&str>, members: Vec<Member>) -> Expression {
    node(lync_syntax::Expression::Class {
        name: name.map(str::to_string),
        members,
    })
}

pub fn method(name: &str, parameter_names: &[&str], body: Vec<Statement>) -> Member {
    node(lync_syntax::Member::Method {
        name: name.to_string(),
        parameters: parameters(parameter_names),
        body,
    })
}
