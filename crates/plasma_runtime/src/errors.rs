//! Error values raised inside the VM and the host-level error type.

use plasma_ir::BytecodeError;
use thiserror::Error;

use crate::Context;
use crate::core::{TypeTag, ValueRef, names};

pub mod messages {
    pub const STACK_UNDERFLOW: &str = "Stack underflow";
    pub const MAX_CALL_DEPTH: &str = "Maximum call depth exceeded";
    pub const DIVISION_BY_ZERO: &str = "Division by zero";
    pub const INTEGER_PARSING: &str = "Could not parse integer";
    pub const FLOAT_PARSING: &str = "Could not parse float";
    pub const MALFORMED_OPERAND: &str = "Malformed instruction operand";
    pub const INTERFACE_BODY: &str = "Interface bodies may only define methods";
    pub const REPEAT_TOO_LARGE: &str = "Repeated sequence is too large";
}

/// Errors surfaced to the host by [`VirtualMachine`](crate::VirtualMachine).
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("uncaught {type_name}: {message}")]
    Uncaught { type_name: String, message: String },

    #[error("invalid bytecode: {0}")]
    InvalidBytecode(#[from] BytecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Create an instance of the built-in error type `type_name`.
///
/// Error values are assembled directly instead of going through the type's
/// constructor, so raising never raises.
pub fn new_error(ctx: &mut Context, type_name: &str, message: String) -> ValueRef {
    let error_type = ctx.lookup(ctx.master(), type_name);
    let error = ctx.allocate_value(TypeTag::Object, type_name);
    let value = ctx.value_mut(error);
    value.type_ = error_type;
    value.string = message;
    value.on_demand.push(crate::methods::object::TABLE);
    value.on_demand.push(crate::methods::error::TABLE);
    error
}

pub(crate) fn type_name_of(ctx: &Context, value: ValueRef) -> String {
    let value = ctx.value(value);
    match value.tag {
        TypeTag::Type => names::TYPE.to_string(),
        _ => value.type_name.clone(),
    }
}

pub fn runtime_error(ctx: &mut Context, message: &str) -> ValueRef {
    new_error(ctx, names::RUNTIME_ERROR, message.to_string())
}

pub fn invalid_type(ctx: &mut Context, received: ValueRef, expected: &str) -> ValueRef {
    let received = type_name_of(ctx, received);
    new_error(
        ctx,
        names::INVALID_TYPE_ERROR,
        format!("Expecting type(s) {expected} but received {received}"),
    )
}

pub fn name_not_found(ctx: &mut Context, source: ValueRef, symbol: &str) -> ValueRef {
    let source = type_name_of(ctx, source);
    new_error(
        ctx,
        names::OBJECT_WITH_NAME_NOT_FOUND_ERROR,
        format!("Could not find name \"{symbol}\" in object of type {source}"),
    )
}

/// Raised by identifier lookups that miss every scope.
pub fn identifier_not_found(ctx: &mut Context, symbol: &str) -> ValueRef {
    new_error(
        ctx,
        names::OBJECT_WITH_NAME_NOT_FOUND_ERROR,
        format!("Could not find name \"{symbol}\""),
    )
}

pub fn index_out_of_range(ctx: &mut Context, length: usize, index: i64) -> ValueRef {
    new_error(
        ctx,
        names::INDEX_OUT_OF_RANGE_ERROR,
        format!("Index {index} out of range for length {length}"),
    )
}

pub fn key_not_found(ctx: &mut Context, key: ValueRef) -> ValueRef {
    let rendered = crate::protocol::to_string(ctx, key)
        .unwrap_or_else(|_| format!("{}{{{}}}", ctx.value(key).type_name, ctx.value(key).id));
    new_error(
        ctx,
        names::KEY_NOT_FOUND_ERROR,
        format!("Key {rendered} not found"),
    )
}

pub fn unhashable(ctx: &mut Context, value: ValueRef) -> ValueRef {
    let name = type_name_of(ctx, value);
    new_error(
        ctx,
        names::UNHASHABLE_TYPE_ERROR,
        format!("Objects of type {name} are unhashable"),
    )
}

pub fn invalid_arguments(ctx: &mut Context, expected: usize, received: usize) -> ValueRef {
    new_error(
        ctx,
        names::INVALID_NUMBER_OF_ARGUMENTS_ERROR,
        format!("Expecting {expected} but received {received}"),
    )
}

pub fn not_implemented_callable(ctx: &mut Context, symbol: &str) -> ValueRef {
    new_error(
        ctx,
        names::NOT_IMPLEMENTED_CALLABLE_ERROR,
        format!("Callable {symbol} is not implemented"),
    )
}

pub fn construction_error(ctx: &mut Context, type_name: &str, message: &str) -> ValueRef {
    new_error(
        ctx,
        names::OBJECT_CONSTRUCTION_ERROR,
        format!("Could not construct object of type {type_name}: {message}"),
    )
}

pub fn not_callable(ctx: &mut Context, value: ValueRef) -> ValueRef {
    let name = type_name_of(ctx, value);
    new_error(
        ctx,
        names::OBJECT_NOT_CALLABLE_ERROR,
        format!("Objects of type {name} are not callable"),
    )
}

pub fn built_in_protection(ctx: &mut Context, source: ValueRef, symbol: &str) -> ValueRef {
    let name = type_name_of(ctx, source);
    new_error(
        ctx,
        names::BUILT_IN_SYMBOL_PROTECTION_ERROR,
        format!("Cannot assign symbol {symbol} of built-in type {name}"),
    )
}

pub fn integer_parsing(ctx: &mut Context) -> ValueRef {
    new_error(ctx, names::INTEGER_PARSING_ERROR, messages::INTEGER_PARSING.to_string())
}

pub fn float_parsing(ctx: &mut Context) -> ValueRef {
    new_error(ctx, names::FLOAT_PARSING_ERROR, messages::FLOAT_PARSING.to_string())
}

pub fn division_by_zero(ctx: &mut Context) -> ValueRef {
    new_error(ctx, names::DIVISION_BY_ZERO_ERROR, messages::DIVISION_BY_ZERO.to_string())
}
