//! Turn declaring statements into variable declarations.

use crate::hooks::{hook_call, Hook};
use lync_syntax::{
    traverse::{walk_statement, Transformer},
    Driver, Expression, Program, Statement,
};
use lync_util::WithInfo;

/// Turn named function and class statements and imports into
/// [`Statement::Variable`]s, at any depth.
pub fn resolve_declarators<D: Driver>(program: Program<D>) -> Program<D> {
    Program {
        statements: Declarators.transform_block(program.statements),
    }
}

struct Declarators;

impl<D: Driver> Transformer<D> for Declarators {
    fn transform_statement(
        &mut self,
        statement: WithInfo<D::Info, Statement<D>>,
    ) -> WithInfo<D::Info, Statement<D>> {
        let WithInfo { info, item } = statement;

        let (name, value) = match item {
            Statement::Import { name, path } => {
                let name = name.unwrap_or_else(|| package_name(&path).to_string());
                let path = WithInfo::new(info.clone(), Expression::Text(path));

                (name, hook_call(info.clone(), Hook::ImportPackage, vec![path]))
            }
            Statement::Expression(Expression::Function {
                name: Some(name),
                parameters,
                body,
            }) => {
                let function = Expression::Function {
                    name: None,
                    parameters,
                    body: self.transform_block(body),
                };

                (name, WithInfo::new(info.clone(), function))
            }
            Statement::Expression(Expression::Class {
                name: Some(name),
                members,
            }) => {
                let class = Expression::Class {
                    name: None,
                    members: members
                        .into_iter()
                        .map(|member| self.transform_member(member))
                        .collect(),
                };

                (name, WithInfo::new(info.clone(), class))
            }
            item => return walk_statement(self, WithInfo::new(info, item)),
        };

        WithInfo::new(info, Statement::Variable { name, value })
    }
}

/// The last non-empty segment of an import path.
fn package_name(path: &str) -> &str {
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(path)
}
