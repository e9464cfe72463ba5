use crate::core::{MethodTable, NativeMethod, ValueRef, names};
use crate::Context;

use super::number::*;

pub(crate) const TABLE: MethodTable = MethodTable {
    names: NAMES,
    lookup,
};

const NAMES: &[&str] = &[
    names::NEGATIVE,
    names::ADD,
    names::RIGHT_ADD,
    names::SUB,
    names::RIGHT_SUB,
    names::MUL,
    names::RIGHT_MUL,
    names::DIV,
    names::RIGHT_DIV,
    names::FLOOR_DIV,
    names::RIGHT_FLOOR_DIV,
    names::POW,
    names::RIGHT_POW,
    names::EQUALS,
    names::RIGHT_EQUALS,
    names::NOT_EQUALS,
    names::RIGHT_NOT_EQUALS,
    names::GREATER_THAN,
    names::RIGHT_GREATER_THAN,
    names::LESS_THAN,
    names::RIGHT_LESS_THAN,
    names::GREATER_THAN_OR_EQUAL,
    names::RIGHT_GREATER_THAN_OR_EQUAL,
    names::LESS_THAN_OR_EQUAL,
    names::RIGHT_LESS_THAN_OR_EQUAL,
    names::HASH,
    names::COPY,
    names::TO_INTEGER,
    names::TO_FLOAT,
    names::TO_STRING,
    names::TO_BOOL,
];

fn lookup(name: &str) -> Option<NativeMethod> {
    Some(match name {
        names::NEGATIVE => NativeMethod::new(0, negative),
        names::ADD => NativeMethod::new(1, add),
        names::RIGHT_ADD => NativeMethod::new(1, right_add),
        names::SUB => NativeMethod::new(1, sub),
        names::RIGHT_SUB => NativeMethod::new(1, right_sub),
        names::MUL => NativeMethod::new(1, mul),
        names::RIGHT_MUL => NativeMethod::new(1, right_mul),
        names::DIV => NativeMethod::new(1, div),
        names::RIGHT_DIV => NativeMethod::new(1, right_div),
        names::FLOOR_DIV => NativeMethod::new(1, floor_divide),
        names::RIGHT_FLOOR_DIV => NativeMethod::new(1, right_floor_divide),
        names::POW => NativeMethod::new(1, pow),
        names::RIGHT_POW => NativeMethod::new(1, right_pow),
        names::EQUALS => NativeMethod::new(1, equals),
        names::RIGHT_EQUALS => NativeMethod::new(1, right_equals),
        names::NOT_EQUALS => NativeMethod::new(1, not_equals),
        names::RIGHT_NOT_EQUALS => NativeMethod::new(1, right_not_equals),
        names::GREATER_THAN => NativeMethod::new(1, greater_than),
        names::RIGHT_GREATER_THAN => NativeMethod::new(1, right_greater_than),
        names::LESS_THAN => NativeMethod::new(1, less_than),
        names::RIGHT_LESS_THAN => NativeMethod::new(1, right_less_than),
        names::GREATER_THAN_OR_EQUAL => NativeMethod::new(1, greater_than_or_equal),
        names::RIGHT_GREATER_THAN_OR_EQUAL => NativeMethod::new(1, right_greater_than_or_equal),
        names::LESS_THAN_OR_EQUAL => NativeMethod::new(1, less_than_or_equal),
        names::RIGHT_LESS_THAN_OR_EQUAL => NativeMethod::new(1, right_less_than_or_equal),
        names::HASH => NativeMethod::new(0, hash),
        names::COPY => NativeMethod::new(0, copy),
        names::TO_INTEGER => NativeMethod::new(0, to_integer),
        names::TO_FLOAT => NativeMethod::new(0, copy),
        names::TO_STRING => NativeMethod::new(0, to_string),
        names::TO_BOOL => NativeMethod::new(0, to_bool),
        _ => return None,
    })
}

pub(crate) fn format_float(floating: f64) -> String {
    ryu::Buffer::new().format(floating).to_string()
}

fn negative(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let floating = ctx.value(this).floating;
    Ok(ctx.new_float(-floating))
}

/// Hash of the printed form, cached on the value.
fn hash(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let cached = ctx.value(this).hash;
    let hash = match cached {
        Some(hash) => hash,
        None => {
            let key = format!("Float-{}", format_float(ctx.value(this).floating));
            let hash = ctx.hashing.hash_string(&key);
            ctx.value_mut(this).hash = Some(hash);
            hash
        }
    };
    Ok(ctx.new_integer(hash))
}

fn copy(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let floating = ctx.value(this).floating;
    Ok(ctx.new_float(floating))
}

/// Truncates toward zero, saturating at the Integer bounds.
fn to_integer(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let floating = ctx.value(this).floating;
    Ok(ctx.new_integer(floating as i64))
}

fn to_string(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let text = format_float(ctx.value(this).floating);
    Ok(ctx.new_string(text))
}

fn to_bool(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let floating = ctx.value(this).floating;
    Ok(ctx.get_boolean(floating != 0.0))
}
