//! Turn property access into runtime calls.

use crate::hooks::{hook_call, Hook};
use lync_syntax::{
    traverse::{walk_expression, walk_statement, Transformer},
    Driver, Expression, Program, Statement,
};
use lync_util::WithInfo;

/// Replace property reads and writes with `property_get` and `property_set`.
/// Method calls (calls whose function is a member access) are kept as they
/// are, since the runtime dispatches them directly.
///
/// Class literals must already have been removed by
/// [`desugar_classes`](crate::desugar_classes).
pub fn lower_member_access<D: Driver>(program: Program<D>) -> Program<D> {
    Program {
        statements: MemberAccess.transform_block(program.statements),
    }
}

struct MemberAccess;

impl<D: Driver> Transformer<D> for MemberAccess {
    fn transform_statement(
        &mut self,
        statement: WithInfo<D::Info, Statement<D>>,
    ) -> WithInfo<D::Info, Statement<D>> {
        let WithInfo { info, item } = statement;

        match item {
            Statement::Assign {
                object: Some(object),
                name,
                value,
            } => {
                let inputs = vec![
                    self.transform_expression(object),
                    WithInfo::new(info.clone(), Expression::Name(name)),
                    self.transform_expression(value),
                ];

                hook_call(info, Hook::PropertySet, inputs).map(Statement::Expression)
            }
            item => walk_statement(self, WithInfo::new(info, item)),
        }
    }

    fn transform_expression(
        &mut self,
        expression: WithInfo<D::Info, Expression<D>>,
    ) -> WithInfo<D::Info, Expression<D>> {
        let WithInfo { info, item } = expression;

        match item {
            Expression::Member { object, member } => {
                let inputs = vec![
                    self.transform_expression(object.unboxed()),
                    WithInfo::new(info.clone(), Expression::Name(member)),
                ];

                hook_call(info, Hook::PropertyGet, inputs)
            }
            Expression::Call { function, inputs } => {
                let WithInfo {
                    info: function_info,
                    item: function,
                } = function.unboxed();

                let function = match function {
                    Expression::Member { object, member } => WithInfo::new(
                        function_info,
                        Expression::Member {
                            object: self.transform_expression(object.unboxed()).boxed(),
                            member,
                        },
                    ),
                    function => self.transform_expression(WithInfo::new(function_info, function)),
                };

                WithInfo::new(
                    info,
                    Expression::Call {
                        function: function.boxed(),
                        inputs: inputs
                            .into_iter()
                            .map(|input| self.transform_expression(input))
                            .collect(),
                    },
                )
            }
            item => walk_expression(self, WithInfo::new(info, item)),
        }
    }
}
