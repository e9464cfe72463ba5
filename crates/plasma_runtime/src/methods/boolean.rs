use crate::core::{MethodTable, NativeMethod, TypeTag, ValueRef, names};
use crate::Context;

pub(crate) const TABLE: MethodTable = MethodTable {
    names: NAMES,
    lookup,
};

const NAMES: &[&str] = &[
    names::EQUALS,
    names::RIGHT_EQUALS,
    names::NOT_EQUALS,
    names::RIGHT_NOT_EQUALS,
    names::HASH,
    names::COPY,
    names::TO_INTEGER,
    names::TO_FLOAT,
    names::TO_STRING,
    names::TO_BOOL,
];

fn lookup(name: &str) -> Option<NativeMethod> {
    Some(match name {
        names::EQUALS | names::RIGHT_EQUALS => NativeMethod::new(1, equals),
        names::NOT_EQUALS | names::RIGHT_NOT_EQUALS => NativeMethod::new(1, not_equals),
        names::HASH | names::TO_INTEGER => NativeMethod::new(0, to_integer),
        names::COPY | names::TO_BOOL => NativeMethod::new(0, identity),
        names::TO_FLOAT => NativeMethod::new(0, to_float),
        names::TO_STRING => NativeMethod::new(0, to_string),
        _ => return None,
    })
}

/// Only another Boolean with the same value is equal.
fn same(ctx: &Context, this: ValueRef, other: ValueRef) -> bool {
    let other = ctx.value(other);
    other.tag == TypeTag::Boolean && other.boolean == ctx.value(this).boolean
}

fn equals(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let equal = same(ctx, this, arguments[0]);
    Ok(ctx.get_boolean(equal))
}

fn not_equals(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let equal = same(ctx, this, arguments[0]);
    Ok(ctx.get_boolean(!equal))
}

fn to_integer(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let boolean = ctx.value(this).boolean;
    Ok(ctx.new_integer(i64::from(boolean)))
}

fn identity(_ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    Ok(this)
}

fn to_float(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let boolean = ctx.value(this).boolean;
    Ok(ctx.new_float(if boolean { 1.0 } else { 0.0 }))
}

fn to_string(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let text = if ctx.value(this).boolean { names::TRUE } else { names::FALSE };
    Ok(ctx.new_string(text))
}
