//! Resolve names that are not bound anywhere in scope to global lookups.

use crate::{
    hooks::{hook_call, Hook},
    scope::Scopes,
};
use lync_syntax::{
    declared_variables,
    traverse::{walk_block, walk_expression, walk_statement, Transformer},
    Driver, Expression, Program, Statement,
};
use lync_util::WithInfo;

/// Replace reads, writes and declarations of global names with
/// `global_get`, `global_set` and `global_define`.
///
/// Names declared at the top level are globals. Names declared in any nested
/// block, and function parameters, are visible to everything lexically inside
/// them.
pub fn resolve_globals<D: Driver>(program: Program<D>) -> Program<D> {
    let mut globals = Globals::default();

    Program {
        statements: walk_block(&mut globals, program.statements),
    }
}

#[derive(Default)]
struct Globals {
    known: Scopes<()>,
}

impl<D: Driver> Transformer<D> for Globals {
    fn transform_block(
        &mut self,
        block: Vec<WithInfo<D::Info, Statement<D>>>,
    ) -> Vec<WithInfo<D::Info, Statement<D>>> {
        self.known.push_names(declared_variables(&block));
        let block = walk_block(self, block);
        self.known.pop_scope();

        block
    }

    fn transform_statement(
        &mut self,
        statement: WithInfo<D::Info, Statement<D>>,
    ) -> WithInfo<D::Info, Statement<D>> {
        let WithInfo { info, item } = statement;

        let (hook, name, value) = match item {
            Statement::Variable { name, value } if !self.known.contains(&name) => {
                (Hook::GlobalDefine, name, value)
            }
            Statement::Assign {
                object: None,
                name,
                value,
            } if !self.known.contains(&name) => (Hook::GlobalSet, name, value),
            item => return walk_statement(self, WithInfo::new(info, item)),
        };

        let inputs = vec![
            WithInfo::new(info.clone(), Expression::Name(name)),
            self.transform_expression(value),
        ];

        hook_call(info, hook, inputs).map(Statement::Expression)
    }

    fn transform_expression(
        &mut self,
        expression: WithInfo<D::Info, Expression<D>>,
    ) -> WithInfo<D::Info, Expression<D>> {
        let WithInfo { info, item } = expression;

        match item {
            Expression::Variable(name) if !self.known.contains(&name) => {
                let inputs = vec![WithInfo::new(info.clone(), Expression::Name(name))];
                hook_call(info, Hook::GlobalGet, inputs)
            }
            Expression::Function {
                name,
                parameters,
                body,
            } => {
                self.known
                    .push_names(parameters.iter().map(|parameter| parameter.item.as_str()));
                let body = self.transform_block(body);
                self.known.pop_scope();

                WithInfo::new(
                    info,
                    Expression::Function {
                        name,
                        parameters,
                        body,
                    },
                )
            }
            item => walk_expression(self, WithInfo::new(info, item)),
        }
    }
}
