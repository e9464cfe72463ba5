//! Immutable sequences: Array behaviour without `Add` or `Assign`, and
//! hashable.

use crate::core::{MethodTable, NativeMethod, ValueRef, names};
use crate::{Context, protocol};

use super::array::structural_equals;
use super::common::{Picked, content_contains, content_of, expect_integer, join, pick, repeat_copies};
use super::iterator;

pub(crate) const TABLE: MethodTable = MethodTable {
    names: NAMES,
    lookup,
};

const NAMES: &[&str] = &[
    names::MUL,
    names::RIGHT_MUL,
    names::EQUALS,
    names::RIGHT_EQUALS,
    names::NOT_EQUALS,
    names::RIGHT_NOT_EQUALS,
    names::CONTAINS,
    names::HASH,
    names::COPY,
    names::INDEX,
    names::ITER,
    names::TO_STRING,
    names::TO_BOOL,
    names::TO_ARRAY,
    names::TO_TUPLE,
];

fn lookup(name: &str) -> Option<NativeMethod> {
    Some(match name {
        names::MUL | names::RIGHT_MUL => NativeMethod::new(1, mul),
        names::EQUALS | names::RIGHT_EQUALS => NativeMethod::new(1, equals),
        names::NOT_EQUALS | names::RIGHT_NOT_EQUALS => NativeMethod::new(1, not_equals),
        names::CONTAINS => NativeMethod::new(1, contains),
        names::HASH => NativeMethod::new(0, hash),
        names::COPY | names::TO_TUPLE => NativeMethod::new(0, copy),
        names::INDEX => NativeMethod::new(1, index),
        names::ITER => NativeMethod::new(0, iter),
        names::TO_STRING => NativeMethod::new(0, to_string),
        names::TO_BOOL => NativeMethod::new(0, to_bool),
        names::TO_ARRAY => NativeMethod::new(0, to_array),
        _ => return None,
    })
}

fn mul(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let count = expect_integer(ctx, arguments[0])?;
    let content = content_of(ctx, this);
    let repeated = repeat_copies(ctx, &content, count)?;
    Ok(ctx.new_tuple(repeated))
}

fn equals(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let equal = structural_equals(ctx, this, arguments[0])?;
    Ok(ctx.get_boolean(equal))
}

fn not_equals(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let equal = structural_equals(ctx, this, arguments[0])?;
    Ok(ctx.get_boolean(!equal))
}

fn contains(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let content = content_of(ctx, this);
    let found = content_contains(ctx, &content, arguments[0])?;
    Ok(ctx.get_boolean(found))
}

/// Combined hash of the elements; fails when any element is unhashable.
fn hash(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    if let Some(hash) = ctx.value(this).hash {
        return Ok(ctx.new_integer(hash));
    }
    let content = content_of(ctx, this);
    let mut hashes = Vec::with_capacity(content.len());
    for element in content {
        hashes.push(protocol::calculate_hash(ctx, element)?);
    }
    let hash = ctx.hashing.hash_array(&hashes);
    ctx.value_mut(this).hash = Some(hash);
    Ok(ctx.new_integer(hash))
}

fn copy(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let content = content_of(ctx, this);
    Ok(ctx.new_tuple(content))
}

fn index(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    match pick(ctx, this, arguments[0])? {
        Picked::One(element) => Ok(element),
        Picked::Many(slice) => Ok(ctx.new_tuple(slice)),
    }
}

fn iter(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    Ok(ctx.new_collection_iterator(this, iterator::CONTENT_TABLE))
}

fn to_string(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let content = content_of(ctx, this);
    let text = join(ctx, &content, "(", ")")?;
    Ok(ctx.new_string(text))
}

fn to_bool(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let non_empty = !ctx.value(this).content.is_empty();
    Ok(ctx.get_boolean(non_empty))
}

fn to_array(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let content = content_of(ctx, this);
    Ok(ctx.new_array(content))
}
