//! Turn calls to function values into `call_function`.

use crate::hooks::{hook_call, Hook};
use lync_syntax::{
    traverse::{walk_expression, Transformer},
    Driver, Expression, Program,
};
use lync_util::WithInfo;

/// Rewrite every call whose function is not a member access (and so is a
/// function value) into `call_function(function, inputs...)`. Method calls,
/// including every runtime hook, are left as they are.
pub fn lower_function_calls<D: Driver>(program: Program<D>) -> Program<D> {
    Program {
        statements: FunctionCalls.transform_block(program.statements),
    }
}

struct FunctionCalls;

impl<D: Driver> Transformer<D> for FunctionCalls {
    fn transform_expression(
        &mut self,
        expression: WithInfo<D::Info, Expression<D>>,
    ) -> WithInfo<D::Info, Expression<D>> {
        let WithInfo { info, item } = expression;

        match item {
            Expression::Call { function, inputs }
                if !matches!(*function.item, Expression::Member { .. }) =>
            {
                let inputs = std::iter::once(function.unboxed())
                    .chain(inputs)
                    .map(|input| self.transform_expression(input))
                    .collect();

                hook_call(info, Hook::CallFunction, inputs)
            }
            item => walk_expression(self, WithInfo::new(info, item)),
        }
    }
}
