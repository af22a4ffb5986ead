//! Pass captured variables to functions explicitly.

use crate::{
    hooks::{hook_call, Hook},
    scope::Scopes,
};
use lync_syntax::{
    declared_variables,
    traverse::{
        visit_block, visit_expression, visit_statement, walk_block, walk_expression, Analyzer,
        Transformer,
    },
    Driver, Expression, Program, Statement,
};
use lync_util::WithInfo;
use std::collections::BTreeSet;

/// Lift every function literal so the variables it captures become leading
/// parameters, and pair the lifted function with the captured values using
/// `create_closure`. Functions that capture nothing are left as they are.
///
/// Captured variables are passed by value, so variables that are assigned
/// after being captured must already have been boxed by
/// [`introduce_boxes`](crate::introduce_boxes).
pub fn convert_closures<D: Driver>(program: Program<D>) -> Program<D> {
    Program {
        statements: Closures::default().transform_block(program.statements),
    }
}

#[derive(Default)]
struct Closures {
    available: Scopes<()>,
}

impl<D: Driver> Transformer<D> for Closures {
    fn transform_block(
        &mut self,
        block: Vec<WithInfo<D::Info, Statement<D>>>,
    ) -> Vec<WithInfo<D::Info, Statement<D>>> {
        self.available.push_names(declared_variables(&block));
        let block = walk_block(self, block);
        self.available.pop_scope();

        block
    }

    fn transform_expression(
        &mut self,
        expression: WithInfo<D::Info, Expression<D>>,
    ) -> WithInfo<D::Info, Expression<D>> {
        let WithInfo { info, item } = expression;

        match item {
            Expression::Function {
                name,
                parameters,
                body,
            } => {
                let mut free_variables = FreeVariables {
                    available: &self.available,
                    bound: Scopes::default(),
                    captures: BTreeSet::new(),
                };

                free_variables
                    .bound
                    .push_names(parameters.iter().map(|parameter| parameter.item.as_str()));
                free_variables.analyze_block(&body);

                let captures = free_variables.captures;

                if !captures.is_empty() {
                    log::trace!("capturing {captures:?}");
                }

                let mut lifted = Closures::default();
                lifted.available.push_names(
                    captures
                        .iter()
                        .map(String::as_str)
                        .chain(parameters.iter().map(|parameter| parameter.item.as_str())),
                );

                let body = lifted.transform_block(body);

                let parameters = captures
                    .iter()
                    .map(|capture| WithInfo::new(info.clone(), capture.clone()))
                    .chain(parameters)
                    .collect();

                let function = WithInfo::new(
                    info.clone(),
                    Expression::Function {
                        name,
                        parameters,
                        body,
                    },
                );

                if captures.is_empty() {
                    return function;
                }

                let captured_values = captures
                    .into_iter()
                    .map(|capture| WithInfo::new(info.clone(), Expression::Variable(capture)));

                let inputs = std::iter::once(function).chain(captured_values).collect();

                hook_call(info, Hook::CreateClosure, inputs)
            }
            item => walk_expression(self, WithInfo::new(info, item)),
        }
    }
}

/// Collects the names a function uses that are bound outside it.
struct FreeVariables<'a> {
    available: &'a Scopes<()>,
    bound: Scopes<()>,
    captures: BTreeSet<String>,
}

impl FreeVariables<'_> {
    fn use_name(&mut self, name: &str) {
        if !self.bound.contains(name) && self.available.contains(name) {
            self.captures.insert(name.to_string());
        }
    }
}

impl<D: Driver> Analyzer<D> for FreeVariables<'_> {
    fn analyze_block(&mut self, block: &[WithInfo<D::Info, Statement<D>>]) {
        self.bound.push_names(declared_variables(block));
        visit_block(self, block);
        self.bound.pop_scope();
    }

    fn analyze_statement(&mut self, statement: WithInfo<D::Info, &Statement<D>>) {
        if let Statement::Assign {
            object: None, name, ..
        } = statement.item
        {
            self.use_name(name);
        }

        visit_statement(self, statement);
    }

    fn analyze_expression(&mut self, expression: WithInfo<D::Info, &Expression<D>>) {
        match expression.item {
            Expression::Variable(name) => self.use_name(name),
            Expression::Function {
                parameters, body, ..
            } => {
                self.bound
                    .push_names(parameters.iter().map(|parameter| parameter.item.as_str()));
                self.analyze_block(body);
                self.bound.pop_scope();
            }
            _ => visit_expression(self, expression),
        }
    }
}
