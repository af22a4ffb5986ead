//! Lower a program into the form the assembler expects.
//!
//! Lowering is split into passes that each remove one kind of construct, run
//! in the order given by [`Pass`]. Afterwards the program contains only
//! variables, method calls on values and on [`Unit`](lync_syntax::Expression::Unit)
//! (the [runtime hooks](hooks::Hook)), and closed function literals.

mod boxing;
mod calls;
mod classes;
mod closures;
mod declarators;
mod globals;
pub mod hooks;
mod members;
mod scope;

#[cfg(test)]
mod fixtures;

pub use boxing::introduce_boxes;
pub use calls::lower_function_calls;
pub use classes::{desugar_classes, CLASS_VARIABLE, RECEIVER_PARAMETER};
pub use closures::convert_closures;
pub use declarators::resolve_declarators;
pub use globals::resolve_globals;
pub use members::lower_member_access;

use lync_syntax::{Driver, Program};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// A lowering pass. Passes are ordered by when they run.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Pass {
    /// [`resolve_declarators`]
    Declarators,

    /// [`desugar_classes`]
    Classes,

    /// [`lower_member_access`]
    MemberAccess,

    /// [`resolve_globals`]
    Globals,

    /// [`introduce_boxes`]
    Boxing,

    /// [`convert_closures`]
    Closures,

    /// [`lower_function_calls`]
    FunctionCalls,
}

impl Pass {
    /// Run this pass on its own.
    pub fn run<D: Driver>(self, program: Program<D>) -> Program<D> {
        match self {
            Pass::Declarators => resolve_declarators(program),
            Pass::Classes => desugar_classes(program),
            Pass::MemberAccess => lower_member_access(program),
            Pass::Globals => resolve_globals(program),
            Pass::Boxing => introduce_boxes(program),
            Pass::Closures => convert_closures(program),
            Pass::FunctionCalls => lower_function_calls(program),
        }
    }
}

/// Run every pass.
pub fn lower<D: Driver>(program: Program<D>) -> Program<D> {
    lower_through(program, Pass::FunctionCalls)
}

/// Run every pass up to and including `last`.
pub fn lower_through<D: Driver>(program: Program<D>, last: Pass) -> Program<D> {
    Pass::iter()
        .take_while(|&pass| pass <= last)
        .fold(program, |program, pass| {
            log::debug!("running {pass} pass");
            pass.run(program)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use rstest::rstest;

    fn lowered(statements: Vec<Statement>) -> String {
        lower(program(statements)).to_string()
    }

    fn counter_program() -> Program<TestDriver> {
        program(vec![
            import(None, "lib/io"),
            run(named_function(
                "counter",
                &["start"],
                vec![
                    declare("count", var("start")),
                    ret(function(
                        &[],
                        vec![
                            assign("count", send(var("count"), "add", vec![number("1")])),
                            ret(var("count")),
                        ],
                    )),
                ],
            )),
            run(class(
                Some("Greeter"),
                vec![method(
                    "greet",
                    &["who"],
                    vec![run(send(var("io"), "print", vec![var("who")]))],
                )],
            )),
        ])
    }

    #[rstest]
    #[case("declarators", Pass::Declarators)]
    #[case("member-access", Pass::MemberAccess)]
    #[case("function-calls", Pass::FunctionCalls)]
    fn pass_names(#[case] name: &str, #[case] pass: Pass) {
        assert_eq!(name.parse::<Pass>(), Ok(pass));
        assert_eq!(pass.to_string(), name);
    }

    #[test]
    fn passes_run_in_order() {
        let passes = Pass::iter().collect::<Vec<_>>();

        let mut sorted = passes.clone();
        sorted.sort();

        assert_eq!(passes, sorted);
        assert_eq!(passes.first(), Some(&Pass::Declarators));
        assert_eq!(passes.last(), Some(&Pass::FunctionCalls));
    }

    #[test]
    fn whole_program() {
        insta::assert_snapshot!(lower(counter_program()).to_string(), @r###"
        unit.global_define(:io, unit.import_package("lib/io"))
        unit.global_define(:counter, function (start) {
            var count = unit.create_undefined_box(:count)
            count.define(start)
            return unit.create_closure(function (count) {
                count.set(count.get().add(1))
                return count.get()
            }, count)
        })
        unit.global_define(:Greeter, unit.call_function(function () {
            var @ = unit.create_class()
            unit.property_set(@, :greet, unit.create_method(function (this, who) {
                unit.global_get(:io).print(who)
            }))
            return @
        }))
        "###);
    }

    #[test]
    fn deterministic() {
        assert_eq!(lower(counter_program()), lower(counter_program()));
    }

    #[test]
    fn stop_after_classes() {
        let output = lower_through(
            program(vec![run(class(Some("Empty"), vec![]))]),
            Pass::Classes,
        );

        insta::assert_snapshot!(output.to_string(), @r###"
        var Empty = function () {
            var @ = unit.create_class()
            return @
        }()
        "###);
    }

    #[test]
    fn dead_declaration_is_not_boxed() {
        let output = lowered(vec![run(function(&[], vec![declare("x", number("1"))]))]);

        insta::assert_snapshot!(output, @r###"
        function () {
            var x = 1
        }
        "###);
    }

    #[test]
    fn use_before_declaration() {
        let output = lowered(vec![run(function(
            &[],
            vec![run(var("x")), declare("x", number("1"))],
        ))]);

        insta::assert_snapshot!(output, @r###"
        function () {
            var x = unit.create_undefined_box(:x)
            x.get()
            x.define(1)
        }
        "###);
    }

    #[test]
    fn assignment_without_capture_is_not_boxed() {
        let output = lowered(vec![run(function(
            &[],
            vec![declare("x", number("1")), assign("x", number("2"))],
        ))]);

        insta::assert_snapshot!(output, @r###"
        function () {
            var x = 1
            x = 2
        }
        "###);
    }

    #[test]
    fn boxed_argument() {
        let output = lowered(vec![run(function(
            &["x"],
            vec![
                run(function(&[], vec![run(var("x"))])),
                assign("x", number("1")),
            ],
        ))]);

        insta::assert_snapshot!(output, @r###"
        function (x) {
            x = unit.create_box(x)
            unit.create_closure(function (x) {
                x.get()
            }, x)
            x.set(1)
        }
        "###);
    }

    #[test]
    fn shadowing_argument() {
        let output = lowered(vec![run(function(
            &[],
            vec![
                declare("x", number("2")),
                run(function(&["x"], vec![assign("x", number("3"))])),
            ],
        ))]);

        insta::assert_snapshot!(output, @r###"
        function () {
            var x = 2
            function (x) {
                x = 3
            }
        }
        "###);
    }

    #[test]
    fn capture_and_lift() {
        let output = lowered(vec![run(function(
            &["x", "y"],
            vec![run(function(&["x"], vec![run(var("x")), run(var("y"))]))],
        ))]);

        insta::assert_snapshot!(output, @r###"
        function (x, y) {
            unit.create_closure(function (y, x) {
                x
                y
            }, y)
        }
        "###);
    }

    #[test]
    fn function_without_captures_is_unchanged() {
        let input = program(vec![run(function(
            &[],
            vec![
                declare("a", number("1")),
                ret(function(&["b"], vec![ret(var("b"))])),
            ],
        ))]);

        assert_eq!(lower(input.clone()), input);
    }

    #[test]
    fn globals_are_never_boxed_or_captured() {
        let output = lowered(vec![run(function(
            &[],
            vec![
                run(function(&[], vec![assign("g", var("counter"))])),
                assign("g", number("1")),
            ],
        ))]);

        insta::assert_snapshot!(output, @r###"
        function () {
            function () {
                unit.global_set(:g, unit.global_get(:counter))
            }
            unit.global_set(:g, 1)
        }
        "###);
    }
}
