//! Turn class literals into constructor functions.

use crate::hooks::{hook_call, Hook};
use lync_syntax::{
    traverse::{walk_expression, Transformer},
    Driver, Expression, Member, Program, Statement,
};
use lync_util::WithInfo;

/// The variable holding the class under construction. Not a valid name in
/// source code.
pub const CLASS_VARIABLE: &str = "@";

/// The parameter every method receives its receiver in.
pub const RECEIVER_PARAMETER: &str = "this";

/// Replace each class literal with an immediately-called function that
/// creates the class and assigns its methods to it.
///
/// Class declarations must already have been turned into variables by
/// [`resolve_declarators`](crate::resolve_declarators).
pub fn desugar_classes<D: Driver>(program: Program<D>) -> Program<D> {
    Program {
        statements: Classes.transform_block(program.statements),
    }
}

struct Classes;

impl<D: Driver> Transformer<D> for Classes {
    fn transform_expression(
        &mut self,
        expression: WithInfo<D::Info, Expression<D>>,
    ) -> WithInfo<D::Info, Expression<D>> {
        let WithInfo { info, item } = expression;

        let members = match item {
            Expression::Class { members, .. } => members,
            item => return walk_expression(self, WithInfo::new(info, item)),
        };

        let class_variable = || {
            WithInfo::new(
                info.clone(),
                Expression::Variable(CLASS_VARIABLE.to_string()),
            )
        };

        let mut body = Vec::with_capacity(members.len() + 2);

        body.push(WithInfo::new(
            info.clone(),
            Statement::Variable {
                name: CLASS_VARIABLE.to_string(),
                value: hook_call(info.clone(), Hook::CreateClass, Vec::new()),
            },
        ));

        for member in members {
            body.push(self.implement_member(member, class_variable()));
        }

        body.push(WithInfo::new(info.clone(), Statement::Return(class_variable())));

        let constructor = WithInfo::new(
            info.clone(),
            Expression::Function {
                name: None,
                parameters: Vec::new(),
                body,
            },
        );

        WithInfo::new(
            info,
            Expression::Call {
                function: constructor.boxed(),
                inputs: Vec::new(),
            },
        )
    }
}

impl Classes {
    /// `@.name = create_method(function (this, ...parameters) { ... })`
    fn implement_member<D: Driver>(
        &mut self,
        member: WithInfo<D::Info, Member<D>>,
        class: WithInfo<D::Info, Expression<D>>,
    ) -> WithInfo<D::Info, Statement<D>> {
        let WithInfo { info, item } = member;

        match item {
            Member::Method {
                name,
                parameters,
                body,
            } => {
                let receiver = WithInfo::new(info.clone(), RECEIVER_PARAMETER.to_string());

                let function = WithInfo::new(
                    info.clone(),
                    Expression::Function {
                        name: None,
                        parameters: std::iter::once(receiver).chain(parameters).collect(),
                        body: self.transform_block(body),
                    },
                );

                WithInfo::new(
                    info.clone(),
                    Statement::Assign {
                        object: Some(class),
                        name,
                        value: hook_call(info, Hook::CreateMethod, vec![function]),
                    },
                )
            }
        }
    }
}
