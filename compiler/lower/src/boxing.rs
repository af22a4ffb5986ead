//! Store variables that are observed across closures in boxes.
//!
//! Each block is analyzed on its own. A name the block binds (by declaration,
//! or as a parameter of the function the block is the body of) is boxed when
//! one of these holds:
//!
//! - it is declared after it is referred to, or after a nested function
//!   captured it
//! - a nested function assigns to it
//! - it is assigned to after a nested function captured it
//!
//! Boxed names are bound to their box at the start of the block, so code that
//! runs before the declaration already sees the box. Every read and write of a
//! boxed name then goes through the box, including in nested blocks that don't
//! bind the name again.

use crate::{
    hooks::{box_call, hook_call, BoxMethod, Hook},
    scope::Scopes,
};
use lync_syntax::{
    declared_variables,
    traverse::{
        visit_block, visit_expression, visit_statement, walk_block, walk_expression,
        walk_statement, Analyzer, Transformer,
    },
    Driver, Expression, Program, Statement,
};
use lync_util::WithInfo;
use std::collections::{BTreeMap, BTreeSet};

/// Box every variable that closures could otherwise observe with a stale
/// value.
///
/// Global names must already have been resolved by
/// [`resolve_globals`](crate::resolve_globals).
pub fn introduce_boxes<D: Driver>(program: Program<D>) -> Program<D> {
    Program {
        statements: Boxing::default().transform_block(program.statements),
    }
}

#[derive(Default)]
struct Boxing {
    boxes: Scopes<bool>,
}

enum Binding {
    /// The box is created holding the argument. A declaration of the same name
    /// in the body still compiles to `define`, which replaces the argument's
    /// value in that box.
    Parameter,
    Declaration,
}

impl Boxing {
    fn is_boxed(&self, name: &str) -> bool {
        self.boxes.resolve(name).copied().unwrap_or(false)
    }

    fn box_block<D: Driver>(
        &mut self,
        block: Vec<WithInfo<D::Info, Statement<D>>>,
        parameters: &[WithInfo<D::Info, String>],
    ) -> Vec<WithInfo<D::Info, Statement<D>>> {
        let mut analysis = BoxAnalysis::default();
        visit_block(&mut analysis, &block);

        let mut bindings = BTreeMap::new();

        for parameter in parameters {
            bindings
                .entry(parameter.item.clone())
                .or_insert((parameter.info.clone(), Binding::Parameter));
        }

        for statement in &block {
            if let Statement::Variable { name, .. } = &statement.item {
                bindings
                    .entry(name.clone())
                    .or_insert((statement.info.clone(), Binding::Declaration));
            }
        }

        let mut result = Vec::with_capacity(block.len());
        let mut scope = BTreeMap::new();

        for (name, (info, binding)) in bindings {
            let boxed = analysis.boxed.contains(&name);

            if boxed {
                log::trace!("boxing {name}");

                result.push(match binding {
                    Binding::Parameter => {
                        let value = WithInfo::new(info.clone(), Expression::Variable(name.clone()));

                        WithInfo::new(
                            info.clone(),
                            Statement::Assign {
                                object: None,
                                name: name.clone(),
                                value: hook_call(info, Hook::CreateBox, vec![value]),
                            },
                        )
                    }
                    Binding::Declaration => {
                        let value = WithInfo::new(info.clone(), Expression::Name(name.clone()));

                        WithInfo::new(
                            info.clone(),
                            Statement::Variable {
                                name: name.clone(),
                                value: hook_call(info, Hook::CreateUndefinedBox, vec![value]),
                            },
                        )
                    }
                });
            }

            scope.insert(name, boxed);
        }

        self.boxes.push_scope(scope);
        result.extend(walk_block(self, block));
        self.boxes.pop_scope();

        result
    }
}

impl<D: Driver> Transformer<D> for Boxing {
    fn transform_block(
        &mut self,
        block: Vec<WithInfo<D::Info, Statement<D>>>,
    ) -> Vec<WithInfo<D::Info, Statement<D>>> {
        self.box_block(block, &[])
    }

    fn transform_statement(
        &mut self,
        statement: WithInfo<D::Info, Statement<D>>,
    ) -> WithInfo<D::Info, Statement<D>> {
        let WithInfo { info, item } = statement;

        let (name, method, value) = match item {
            Statement::Variable { name, value } if self.is_boxed(&name) => {
                (name, BoxMethod::Define, value)
            }
            Statement::Assign {
                object: None,
                name,
                value,
            } if self.is_boxed(&name) => (name, BoxMethod::Set, value),
            item => return walk_statement(self, WithInfo::new(info, item)),
        };

        let value = self.transform_expression(value);

        box_call(info, &name, method, vec![value]).map(Statement::Expression)
    }

    fn transform_expression(
        &mut self,
        expression: WithInfo<D::Info, Expression<D>>,
    ) -> WithInfo<D::Info, Expression<D>> {
        let WithInfo { info, item } = expression;

        match item {
            Expression::Variable(name) if self.is_boxed(&name) => {
                box_call(info, &name, BoxMethod::Get, Vec::new())
            }
            Expression::Function {
                name,
                parameters,
                body,
            } => {
                let body = self.box_block(body, &parameters);

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

/// Decides which names bound by a single block need boxes. Names bound by
/// blocks nested inside it (including parameters of nested functions) shadow
/// the block's own names and are ignored.
#[derive(Default)]
struct BoxAnalysis {
    shadowed: Scopes<()>,
    in_function: bool,
    referred: BTreeSet<String>,
    captured: BTreeSet<String>,
    boxed: BTreeSet<String>,
}

impl<D: Driver> Analyzer<D> for BoxAnalysis {
    fn analyze_block(&mut self, block: &[WithInfo<D::Info, Statement<D>>]) {
        self.shadowed.push_names(declared_variables(block));
        visit_block(self, block);
        self.shadowed.pop_scope();
    }

    fn analyze_statement(&mut self, statement: WithInfo<D::Info, &Statement<D>>) {
        match statement.item {
            Statement::Variable { name, value } => {
                self.analyze_expression(value.as_ref());

                if !self.shadowed.contains(name)
                    && (self.referred.contains(name) || self.captured.contains(name))
                {
                    self.boxed.insert(name.clone());
                }
            }
            Statement::Assign {
                object: None,
                name,
                value,
            } => {
                self.analyze_expression(value.as_ref());

                if !self.shadowed.contains(name)
                    && (self.in_function || self.captured.contains(name))
                {
                    self.boxed.insert(name.clone());
                }
            }
            _ => visit_statement(self, statement),
        }
    }

    fn analyze_expression(&mut self, expression: WithInfo<D::Info, &Expression<D>>) {
        match expression.item {
            Expression::Variable(name) => {
                if self.shadowed.contains(name) {
                    return;
                }

                self.referred.insert(name.clone());

                if self.in_function {
                    self.captured.insert(name.clone());
                }
            }
            Expression::Function {
                parameters, body, ..
            } => {
                self.shadowed
                    .push_names(parameters.iter().map(|parameter| parameter.item.as_str()));

                let in_function = std::mem::replace(&mut self.in_function, true);
                self.analyze_block(body);
                self.in_function = in_function;

                self.shadowed.pop_scope();
            }
            _ => visit_expression(self, expression),
        }
    }
}
