//! Default recursion over the syntax tree.
//!
//! A pass implements [`Transformer`] (to build a new tree) or [`Analyzer`] (to
//! collect information) and overrides only the methods for the nodes it cares
//! about. The default methods recurse into every child through `self`, so an
//! override is honored at every depth. An override that wants the default
//! behavior for a node calls the matching `walk_*` or `visit_*` function.

use crate::{Driver, Expression, Member, Statement};
use lync_util::WithInfo;

/// Builds a new tree from an existing one.
pub trait Transformer<D: Driver> {
    /// Transform a list of statements.
    fn transform_block(
        &mut self,
        block: Vec<WithInfo<D::Info, Statement<D>>>,
    ) -> Vec<WithInfo<D::Info, Statement<D>>> {
        walk_block(self, block)
    }

    /// Transform a statement.
    fn transform_statement(
        &mut self,
        statement: WithInfo<D::Info, Statement<D>>,
    ) -> WithInfo<D::Info, Statement<D>> {
        walk_statement(self, statement)
    }

    /// Transform an expression.
    fn transform_expression(
        &mut self,
        expression: WithInfo<D::Info, Expression<D>>,
    ) -> WithInfo<D::Info, Expression<D>> {
        walk_expression(self, expression)
    }

    /// Transform a class member.
    fn transform_member(
        &mut self,
        member: WithInfo<D::Info, Member<D>>,
    ) -> WithInfo<D::Info, Member<D>> {
        walk_member(self, member)
    }
}

/// Transform each statement in `block`.
pub fn walk_block<D: Driver, T: Transformer<D> + ?Sized>(
    transformer: &mut T,
    block: Vec<WithInfo<D::Info, Statement<D>>>,
) -> Vec<WithInfo<D::Info, Statement<D>>> {
    block
        .into_iter()
        .map(|statement| transformer.transform_statement(statement))
        .collect()
}

/// Rebuild `statement` from its transformed children.
pub fn walk_statement<D: Driver, T: Transformer<D> + ?Sized>(
    transformer: &mut T,
    statement: WithInfo<D::Info, Statement<D>>,
) -> WithInfo<D::Info, Statement<D>> {
    let WithInfo { info, item } = statement;

    let statement = match item {
        Statement::Import { name, path } => Statement::Import { name, path },
        Statement::Variable { name, value } => Statement::Variable {
            name,
            value: transformer.transform_expression(value),
        },
        Statement::Assign {
            object,
            name,
            value,
        } => Statement::Assign {
            object: object.map(|object| transformer.transform_expression(object)),
            name,
            value: transformer.transform_expression(value),
        },
        Statement::Return(value) => Statement::Return(transformer.transform_expression(value)),
        Statement::If {
            condition,
            then,
            r#else,
        } => Statement::If {
            condition: transformer.transform_expression(condition),
            then: transformer.transform_block(then),
            r#else: transformer.transform_block(r#else),
        },
        Statement::Expression(expression) => {
            return transformer
                .transform_expression(WithInfo::new(info, expression))
                .map(Statement::Expression);
        }
    };

    WithInfo::new(info, statement)
}

/// Rebuild `expression` from its transformed children.
pub fn walk_expression<D: Driver, T: Transformer<D> + ?Sized>(
    transformer: &mut T,
    expression: WithInfo<D::Info, Expression<D>>,
) -> WithInfo<D::Info, Expression<D>> {
    expression.map(|expression| match expression {
        Expression::Member { object, member } => Expression::Member {
            object: transformer.transform_expression(object.unboxed()).boxed(),
            member,
        },
        Expression::Call { function, inputs } => Expression::Call {
            function: transformer.transform_expression(function.unboxed()).boxed(),
            inputs: inputs
                .into_iter()
                .map(|input| transformer.transform_expression(input))
                .collect(),
        },
        Expression::Function {
            name,
            parameters,
            body,
        } => Expression::Function {
            name,
            parameters,
            body: transformer.transform_block(body),
        },
        Expression::Class { name, members } => Expression::Class {
            name,
            members: members
                .into_iter()
                .map(|member| transformer.transform_member(member))
                .collect(),
        },
        Expression::Unit
        | Expression::Name(_)
        | Expression::Text(_)
        | Expression::Number(_)
        | Expression::Variable(_) => expression,
    })
}

/// Rebuild `member` from its transformed children.
pub fn walk_member<D: Driver, T: Transformer<D> + ?Sized>(
    transformer: &mut T,
    member: WithInfo<D::Info, Member<D>>,
) -> WithInfo<D::Info, Member<D>> {
    member.map(|member| match member {
        Member::Method {
            name,
            parameters,
            body,
        } => Member::Method {
            name,
            parameters,
            body: transformer.transform_block(body),
        },
    })
}

/// Collects information from a tree without changing it.
pub trait Analyzer<D: Driver> {
    /// Analyze a list of statements.
    fn analyze_block(&mut self, block: &[WithInfo<D::Info, Statement<D>>]) {
        visit_block(self, block);
    }

    /// Analyze a statement.
    fn analyze_statement(&mut self, statement: WithInfo<D::Info, &Statement<D>>) {
        visit_statement(self, statement);
    }

    /// Analyze an expression.
    fn analyze_expression(&mut self, expression: WithInfo<D::Info, &Expression<D>>) {
        visit_expression(self, expression);
    }

    /// Analyze a class member.
    fn analyze_member(&mut self, member: WithInfo<D::Info, &Member<D>>) {
        visit_member(self, member);
    }
}

/// Analyze each statement in `block`.
pub fn visit_block<D: Driver, A: Analyzer<D> + ?Sized>(
    analyzer: &mut A,
    block: &[WithInfo<D::Info, Statement<D>>],
) {
    for statement in block {
        analyzer.analyze_statement(statement.as_ref());
    }
}

/// Analyze the children of `statement`.
pub fn visit_statement<D: Driver, A: Analyzer<D> + ?Sized>(
    analyzer: &mut A,
    statement: WithInfo<D::Info, &Statement<D>>,
) {
    match statement.item {
        Statement::Import { .. } => {}
        Statement::Variable { value, .. } => analyzer.analyze_expression(value.as_ref()),
        Statement::Assign { object, value, .. } => {
            if let Some(object) = object {
                analyzer.analyze_expression(object.as_ref());
            }

            analyzer.analyze_expression(value.as_ref());
        }
        Statement::Return(value) => analyzer.analyze_expression(value.as_ref()),
        Statement::If {
            condition,
            then,
            r#else,
        } => {
            analyzer.analyze_expression(condition.as_ref());
            analyzer.analyze_block(then);
            analyzer.analyze_block(r#else);
        }
        Statement::Expression(expression) => {
            analyzer.analyze_expression(statement.replace(expression));
        }
    }
}

/// Analyze the children of `expression`.
pub fn visit_expression<D: Driver, A: Analyzer<D> + ?Sized>(
    analyzer: &mut A,
    expression: WithInfo<D::Info, &Expression<D>>,
) {
    match expression.item {
        Expression::Member { object, .. } => analyzer.analyze_expression(object.as_deref()),
        Expression::Call { function, inputs } => {
            analyzer.analyze_expression(function.as_deref());

            for input in inputs {
                analyzer.analyze_expression(input.as_ref());
            }
        }
        Expression::Function { body, .. } => analyzer.analyze_block(body),
        Expression::Class { members, .. } => {
            for member in members {
                analyzer.analyze_member(member.as_ref());
            }
        }
        Expression::Unit
        | Expression::Name(_)
        | Expression::Text(_)
        | Expression::Number(_)
        | Expression::Variable(_) => {}
    }
}

/// Analyze the children of `member`.
pub fn visit_member<D: Driver, A: Analyzer<D> + ?Sized>(
    analyzer: &mut A,
    member: WithInfo<D::Info, &Member<D>>,
) {
    match member.item {
        Member::Method { body, .. } => analyzer.analyze_block(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Program;

    struct TestDriver;

    impl Driver for TestDriver {
        type Info = u32;
    }

    fn program() -> Program<TestDriver> {
        // var a = function (b) { if b { return a } else { c.d(b) } }
        serde_json::from_str(
            r#"{
                "statements": [
                    { "info": 0, "item": { "variable": { "name": "a", "value": { "info": 8, "item": { "function": {
                        "name": null,
                        "parameters": [{ "info": 18, "item": "b" }],
                        "body": [{ "info": 23, "item": { "if": {
                            "condition": { "info": 26, "item": { "variable": "b" } },
                            "then": [{ "info": 30, "item": { "return": { "info": 37, "item": { "variable": "a" } } } }],
                            "else": [{ "info": 48, "item": { "expression": { "call": {
                                "function": { "info": 48, "item": { "member": {
                                    "object": { "info": 48, "item": { "variable": "c" } },
                                    "member": "d"
                                } } },
                                "inputs": [{ "info": 52, "item": { "variable": "b" } }]
                            } } } }]
                        } } }]
                    } } } } } }
                ]
            }"#,
        )
        .unwrap()
    }

    struct Rename;

    impl Transformer<TestDriver> for Rename {
        fn transform_expression(
            &mut self,
            expression: WithInfo<u32, Expression<TestDriver>>,
        ) -> WithInfo<u32, Expression<TestDriver>> {
            match expression.item {
                Expression::Variable(name) => {
                    WithInfo::new(expression.info, Expression::Variable(name.to_uppercase()))
                }
                item => walk_expression(self, WithInfo::new(expression.info, item)),
            }
        }
    }

    #[derive(Default)]
    struct References(Vec<(u32, String)>);

    impl Analyzer<TestDriver> for References {
        fn analyze_expression(&mut self, expression: WithInfo<u32, &Expression<TestDriver>>) {
            if let Expression::Variable(name) = expression.item {
                self.0.push((expression.info, name.clone()));
            }

            visit_expression(self, expression);
        }
    }

    #[test]
    fn transformer_overrides_apply_at_every_depth() {
        let program = program();
        let statements = Rename.transform_block(program.statements);

        assert_eq!(
            Program::<TestDriver> { statements }.to_string(),
            "var a = function (b) {\n    if B {\n        return A\n    } else {\n        C.d(B)\n    }\n}\n"
        );
    }

    #[test]
    fn analyzer_overrides_apply_at_every_depth() {
        let program = program();

        let mut references = References::default();
        references.analyze_block(&program.statements);

        assert_eq!(
            references.0,
            [
                (26, String::from("b")),
                (37, String::from("a")),
                (48, String::from("c")),
                (52, String::from("b")),
            ]
        );
    }
}
