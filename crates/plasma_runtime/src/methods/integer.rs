use crate::core::{MethodTable, NativeMethod, ValueRef, names};
use crate::Context;

use super::number::*;

pub(crate) const TABLE: MethodTable = MethodTable {
    names: NAMES,
    lookup,
};

const NAMES: &[&str] = &[
    names::NEG_BITS,
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
    names::MOD,
    names::RIGHT_MOD,
    names::POW,
    names::RIGHT_POW,
    names::BIT_XOR,
    names::RIGHT_BIT_XOR,
    names::BIT_AND,
    names::RIGHT_BIT_AND,
    names::BIT_OR,
    names::RIGHT_BIT_OR,
    names::BIT_LEFT,
    names::RIGHT_BIT_LEFT,
    names::BIT_RIGHT,
    names::RIGHT_BIT_RIGHT,
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
        names::NEG_BITS => NativeMethod::new(0, negate_bits),
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
        names::MOD => NativeMethod::new(1, modulo),
        names::RIGHT_MOD => NativeMethod::new(1, right_modulo),
        names::POW => NativeMethod::new(1, pow),
        names::RIGHT_POW => NativeMethod::new(1, right_pow),
        names::BIT_XOR => NativeMethod::new(1, bit_xor),
        names::RIGHT_BIT_XOR => NativeMethod::new(1, right_bit_xor),
        names::BIT_AND => NativeMethod::new(1, bit_and),
        names::RIGHT_BIT_AND => NativeMethod::new(1, right_bit_and),
        names::BIT_OR => NativeMethod::new(1, bit_or),
        names::RIGHT_BIT_OR => NativeMethod::new(1, right_bit_or),
        names::BIT_LEFT => NativeMethod::new(1, bit_left),
        names::RIGHT_BIT_LEFT => NativeMethod::new(1, right_bit_left),
        names::BIT_RIGHT => NativeMethod::new(1, bit_right),
        names::RIGHT_BIT_RIGHT => NativeMethod::new(1, right_bit_right),
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
        names::TO_INTEGER => NativeMethod::new(0, copy),
        names::TO_FLOAT => NativeMethod::new(0, to_float),
        names::TO_STRING => NativeMethod::new(0, to_string),
        names::TO_BOOL => NativeMethod::new(0, to_bool),
        _ => return None,
    })
}

fn negate_bits(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let integer = ctx.value(this).integer;
    Ok(ctx.new_integer(!integer))
}

fn negative(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let integer = ctx.value(this).integer;
    Ok(ctx.new_integer(integer.wrapping_neg()))
}

/// An integer hashes to itself.
fn hash(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let integer = ctx.value(this).integer;
    Ok(ctx.new_integer(integer))
}

fn copy(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let integer = ctx.value(this).integer;
    Ok(ctx.new_integer(integer))
}

fn to_float(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let integer = ctx.value(this).integer;
    Ok(ctx.new_float(integer as f64))
}

fn to_string(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let integer = ctx.value(this).integer;
    let mut buffer = itoa::Buffer::new();
    let text = buffer.format(integer).to_string();
    Ok(ctx.new_string(text))
}

fn to_bool(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let integer = ctx.value(this).integer;
    Ok(ctx.get_boolean(integer != 0))
}
