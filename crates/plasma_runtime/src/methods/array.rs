use crate::core::{MethodTable, NativeMethod, TypeTag, ValueRef, names};
use crate::{Context, errors};

use super::common::{
    Picked, content_contains, content_equals, content_of, element, expect_integer, expect_tag, join,
    pick, repeat_copies,
};
use super::iterator;

pub(crate) const TABLE: MethodTable = MethodTable {
    names: NAMES,
    lookup,
};

const NAMES: &[&str] = &[
    names::ADD,
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
    names::ASSIGN,
    names::ITER,
    names::TO_STRING,
    names::TO_BOOL,
    names::TO_ARRAY,
    names::TO_TUPLE,
];

fn lookup(name: &str) -> Option<NativeMethod> {
    Some(match name {
        names::ADD => NativeMethod::new(1, add),
        names::MUL | names::RIGHT_MUL => NativeMethod::new(1, mul),
        names::EQUALS | names::RIGHT_EQUALS => NativeMethod::new(1, equals),
        names::NOT_EQUALS | names::RIGHT_NOT_EQUALS => NativeMethod::new(1, not_equals),
        names::CONTAINS => NativeMethod::new(1, contains),
        names::HASH => NativeMethod::new(0, hash),
        names::COPY | names::TO_ARRAY => NativeMethod::new(0, copy),
        names::INDEX => NativeMethod::new(1, index),
        names::ASSIGN => NativeMethod::new(2, assign),
        names::ITER => NativeMethod::new(0, iter),
        names::TO_STRING => NativeMethod::new(0, to_string),
        names::TO_BOOL => NativeMethod::new(0, to_bool),
        names::TO_TUPLE => NativeMethod::new(0, to_tuple),
        _ => return None,
    })
}

fn add(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    expect_tag(ctx, arguments[0], TypeTag::Array, names::ARRAY)?;
    let mut content = content_of(ctx, this);
    content.extend_from_slice(&ctx.value(arguments[0]).content);
    Ok(ctx.new_array(content))
}

/// Copies of the elements repeated `count` times; negative counts reverse.
fn mul(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let count = expect_integer(ctx, arguments[0])?;
    let content = content_of(ctx, this);
    let repeated = repeat_copies(ctx, &content, count)?;
    Ok(ctx.new_array(repeated))
}

/// Element-wise equality with another Array; anything else is unequal.
pub(crate) fn structural_equals(
    ctx: &mut Context,
    this: ValueRef,
    other: ValueRef,
) -> Result<bool, ValueRef> {
    let tag = ctx.value(this).tag;
    if ctx.value(other).tag != tag {
        return Ok(false);
    }
    if this == other {
        return Ok(true);
    }
    let left = content_of(ctx, this);
    let right = content_of(ctx, other);
    content_equals(ctx, &left, &right)
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

/// Arrays are mutable and never hashable.
fn hash(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    Err(errors::unhashable(ctx, this))
}

fn copy(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let content = content_of(ctx, this);
    Ok(ctx.new_array(content))
}

fn index(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    match pick(ctx, this, arguments[0])? {
        Picked::One(element) => Ok(element),
        Picked::Many(slice) => Ok(ctx.new_array(slice)),
    }
}

/// Replace one element; slices cannot be assigned.
fn assign(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let requested = expect_integer(ctx, arguments[0])?;
    let len = ctx.value(this).content.len();
    let position = element(ctx, len, requested)?;
    ctx.value_mut(this).content[position] = arguments[1];
    Ok(ctx.get_none())
}

fn iter(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    Ok(ctx.new_collection_iterator(this, iterator::CONTENT_TABLE))
}

fn to_string(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let content = content_of(ctx, this);
    let text = join(ctx, &content, "[", "]")?;
    Ok(ctx.new_string(text))
}

fn to_bool(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let non_empty = !ctx.value(this).content.is_empty();
    Ok(ctx.get_boolean(non_empty))
}

fn to_tuple(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let content = content_of(ctx, this);
    Ok(ctx.new_tuple(content))
}
