//! The operations lowered code asks the runtime to perform.
//!
//! Every hook is called as a method on [`Expression::Unit`], so the assembler
//! encodes it like any other method call.

use lync_syntax::{Driver, Expression};
use lync_util::WithInfo;
use strum::{AsRefStr, Display, EnumIter};

/// A runtime operation, called as a method on [`Expression::Unit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Hook {
    /// `create_box(value)`: a box already holding `value`.
    CreateBox,

    /// `create_undefined_box(name)`: a box for a variable that has not been
    /// defined yet.
    CreateUndefinedBox,

    /// `create_closure(function, ...captures)`: bundle a lifted function with
    /// the values of its captured variables.
    CreateClosure,

    /// `create_class()`: an empty class.
    CreateClass,

    /// `create_method(function)`: a method whose first parameter is the
    /// receiver.
    CreateMethod,

    /// `import_package(path)`.
    ImportPackage,

    /// `global_get(name)`.
    GlobalGet,

    /// `global_set(name, value)`.
    GlobalSet,

    /// `global_define(name, value)`.
    GlobalDefine,

    /// `property_get(object, name)`.
    PropertyGet,

    /// `property_set(object, name, value)`.
    PropertySet,

    /// `call_function(function, ...inputs)`.
    CallFunction,
}

/// A method called on a boxed variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum BoxMethod {
    /// Read the box's value.
    Get,

    /// Replace the box's value.
    Set,

    /// Give an undefined box its first value.
    Define,
}

/// `unit.hook(inputs...)`.
pub fn hook_call<D: Driver>(
    info: D::Info,
    hook: Hook,
    inputs: Vec<WithInfo<D::Info, Expression<D>>>,
) -> WithInfo<D::Info, Expression<D>> {
    method_call(WithInfo::new(info, Expression::Unit), hook.as_ref(), inputs)
}

/// `name.method(inputs...)`, where `name` is a boxed variable.
pub fn box_call<D: Driver>(
    info: D::Info,
    name: &str,
    method: BoxMethod,
    inputs: Vec<WithInfo<D::Info, Expression<D>>>,
) -> WithInfo<D::Info, Expression<D>> {
    method_call(
        WithInfo::new(info, Expression::Variable(name.to_string())),
        method.as_ref(),
        inputs,
    )
}

/// `object.method(inputs...)`. The call takes the info of `object`.
pub fn method_call<D: Driver>(
    object: WithInfo<D::Info, Expression<D>>,
    method: &str,
    inputs: Vec<WithInfo<D::Info, Expression<D>>>,
) -> WithInfo<D::Info, Expression<D>> {
    let info = object.info.clone();

    let function = WithInfo::new(
        info.clone(),
        Expression::Member {
            object: object.boxed(),
            member: method.to_string(),
        },
    );

    WithInfo::new(
        info,
        Expression::Call {
            function: function.boxed(),
            inputs,
        },
    )
}
