use crate::{Driver, Expression, Member, Program, Statement};
use itertools::Itertools;
use lync_util::WithInfo;
use std::fmt;

const INDENT: &str = "    ";

struct Indented<'a, T>(&'a T, usize);

impl<D: Driver> fmt::Display for Program<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{}", Indented(&statement.item, 0))?;
        }

        Ok(())
    }
}

impl<D: Driver> fmt::Display for Statement<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Indented(self, 0))
    }
}

impl<D: Driver> fmt::Display for Expression<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Indented(self, 0))
    }
}

impl<D: Driver> fmt::Display for Member<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Indented(self, 0))
    }
}

fn write_block<D: Driver>(
    f: &mut fmt::Formatter<'_>,
    block: &[WithInfo<D::Info, Statement<D>>],
    indent: usize,
) -> fmt::Result {
    if block.is_empty() {
        return write!(f, "{{}}");
    }

    writeln!(f, "{{")?;

    for statement in block {
        writeln!(
            f,
            "{}{}",
            INDENT.repeat(indent + 1),
            Indented(&statement.item, indent + 1)
        )?;
    }

    write!(f, "{}}}", INDENT.repeat(indent))
}

fn write_parameters<I>(
    f: &mut fmt::Formatter<'_>,
    parameters: &[WithInfo<I, String>],
) -> fmt::Result {
    write!(
        f,
        "({})",
        parameters.iter().map(|parameter| &parameter.item).format(", ")
    )
}

impl<D: Driver> fmt::Display for Indented<'_, Statement<D>> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Indented(statement, indent) = *self;

        match statement {
            Statement::Import { name, path } => {
                write!(f, "import {:?}", path)?;

                if let Some(name) = name {
                    write!(f, " as {}", name)?;
                }

                Ok(())
            }
            Statement::Variable { name, value } => {
                write!(f, "var {} = {}", name, Indented(&value.item, indent))
            }
            Statement::Assign {
                object,
                name,
                value,
            } => {
                if let Some(object) = object {
                    write!(f, "{}.", Indented(&object.item, indent))?;
                }

                write!(f, "{} = {}", name, Indented(&value.item, indent))
            }
            Statement::Return(value) => write!(f, "return {}", Indented(&value.item, indent)),
            Statement::If {
                condition,
                then,
                r#else,
            } => {
                write!(f, "if {} ", Indented(&condition.item, indent))?;
                write_block(f, then, indent)?;

                if !r#else.is_empty() {
                    write!(f, " else ")?;
                    write_block(f, r#else, indent)?;
                }

                Ok(())
            }
            Statement::Expression(expression) => write!(f, "{}", Indented(expression, indent)),
        }
    }
}

impl<D: Driver> fmt::Display for Indented<'_, Expression<D>> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Indented(expression, indent) = *self;

        match expression {
            Expression::Unit => write!(f, "unit"),
            Expression::Name(name) => write!(f, ":{}", name),
            Expression::Text(text) => write!(f, "{:?}", text),
            Expression::Number(number) => write!(f, "{}", number),
            Expression::Variable(name) => write!(f, "{}", name),
            Expression::Member { object, member } => {
                write!(f, "{}.{}", Indented(&*object.item, indent), member)
            }
            Expression::Call { function, inputs } => write!(
                f,
                "{}({})",
                Indented(&*function.item, indent),
                inputs
                    .iter()
                    .map(|input| Indented(&input.item, indent))
                    .format(", ")
            ),
            Expression::Function {
                name,
                parameters,
                body,
            } => {
                write!(f, "function ")?;

                if let Some(name) = name {
                    write!(f, "{}", name)?;
                }

                write_parameters(f, parameters)?;
                write!(f, " ")?;
                write_block(f, body, indent)
            }
            Expression::Class { name, members } => {
                write!(f, "class ")?;

                if let Some(name) = name {
                    write!(f, "{} ", name)?;
                }

                if members.is_empty() {
                    return write!(f, "{{}}");
                }

                writeln!(f, "{{")?;

                for member in members {
                    writeln!(
                        f,
                        "{}{}",
                        INDENT.repeat(indent + 1),
                        Indented(&member.item, indent + 1)
                    )?;
                }

                write!(f, "{}}}", INDENT.repeat(indent))
            }
        }
    }
}

impl<D: Driver> fmt::Display for Indented<'_, Member<D>> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Indented(member, indent) = *self;

        match member {
            Member::Method {
                name,
                parameters,
                body,
            } => {
                write!(f, "{}", name)?;
                write_parameters(f, parameters)?;
                write!(f, " ")?;
                write_block(f, body, indent)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestDriver;

    impl Driver for TestDriver {
        type Info = ();
    }

    fn node<T>(item: T) -> WithInfo<(), T> {
        WithInfo::new((), item)
    }

    #[test]
    fn renders_nested_blocks() {
        let program = Program::<TestDriver> {
            statements: vec![
                node(Statement::Variable {
                    name: String::from("f"),
                    value: node(Expression::Function {
                        name: None,
                        parameters: vec![node(String::from("x"))],
                        body: vec![node(Statement::If {
                            condition: node(Expression::Variable(String::from("x"))),
                            then: vec![node(Statement::Return(node(Expression::Call {
                                function: node(Expression::Member {
                                    object: node(Expression::Unit).boxed(),
                                    member: String::from("global_get"),
                                })
                                .boxed(),
                                inputs: vec![node(Expression::Name(String::from("y")))],
                            })))],
                            r#else: Vec::new(),
                        })],
                    }),
                }),
                node(Statement::Import {
                    name: None,
                    path: String::from("coll"),
                }),
            ],
        };

        assert_eq!(
            program.to_string(),
            "var f = function (x) {\n    if x {\n        return unit.global_get(:y)\n    }\n}\nimport \"coll\"\n"
        );
    }
}
