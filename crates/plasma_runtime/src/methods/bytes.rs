use crate::core::{MethodTable, NativeMethod, TypeTag, ValueRef, names};
use crate::Context;

use super::common::{Selection, byte_integers, expect_integer, expect_tag, repeat_checked, select};
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
        names::COPY => NativeMethod::new(0, copy),
        names::INDEX => NativeMethod::new(1, index),
        names::ITER => NativeMethod::new(0, iter),
        names::TO_STRING => NativeMethod::new(0, to_string),
        names::TO_BOOL => NativeMethod::new(0, to_bool),
        names::TO_ARRAY => NativeMethod::new(0, to_array),
        names::TO_TUPLE => NativeMethod::new(0, to_tuple),
        _ => return None,
    })
}

fn data(ctx: &Context, value: ValueRef) -> &[u8] {
    &ctx.value(value).bytes
}

fn add(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    expect_tag(ctx, arguments[0], TypeTag::Bytes, names::BYTES)?;
    let mut joined = data(ctx, this).to_vec();
    joined.extend_from_slice(data(ctx, arguments[0]));
    Ok(ctx.new_bytes(joined))
}

fn mul(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let count = expect_integer(ctx, arguments[0])?;
    let bytes = data(ctx, this).to_vec();
    let repeated = repeat_checked(ctx, &bytes, count)?;
    Ok(ctx.new_bytes(repeated))
}

fn same(ctx: &Context, this: ValueRef, other: ValueRef) -> bool {
    let other = ctx.value(other);
    other.tag == TypeTag::Bytes && other.bytes == ctx.value(this).bytes
}

fn equals(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let equal = same(ctx, this, arguments[0]);
    Ok(ctx.get_boolean(equal))
}

fn not_equals(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let equal = same(ctx, this, arguments[0]);
    Ok(ctx.get_boolean(!equal))
}

/// Subsequence test; the empty sequence is contained everywhere.
fn contains(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    expect_tag(ctx, arguments[0], TypeTag::Bytes, names::BYTES)?;
    let haystack = data(ctx, this);
    let needle = data(ctx, arguments[0]);
    let found = needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle);
    Ok(ctx.get_boolean(found))
}

fn hash(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let cached = ctx.value(this).hash;
    let hash = match cached {
        Some(hash) => hash,
        None => {
            let hash = ctx.hashing.hash_bytes(data(ctx, this));
            ctx.value_mut(this).hash = Some(hash);
            hash
        }
    };
    Ok(ctx.new_integer(hash))
}

fn copy(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let bytes = data(ctx, this).to_vec();
    Ok(ctx.new_bytes(bytes))
}

/// A single index yields the byte as an Integer; a slice yields Bytes.
fn index(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let len = data(ctx, this).len();
    match select(ctx, len, arguments[0])? {
        Selection::Element(position) => {
            let byte = data(ctx, this)[position];
            Ok(ctx.new_integer(i64::from(byte)))
        }
        Selection::Slice(range) => {
            let slice = data(ctx, this)[range].to_vec();
            Ok(ctx.new_bytes(slice))
        }
    }
}

fn iter(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    Ok(ctx.new_collection_iterator(this, iterator::BYTES_TABLE))
}

/// The bytes read as text; invalid UTF-8 is replaced.
fn to_string(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let text = String::from_utf8_lossy(data(ctx, this)).into_owned();
    Ok(ctx.new_string(text))
}

fn to_bool(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let non_empty = !data(ctx, this).is_empty();
    Ok(ctx.get_boolean(non_empty))
}

fn to_array(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let bytes = data(ctx, this).to_vec();
    let content = byte_integers(ctx, &bytes);
    Ok(ctx.new_array(content))
}

fn to_tuple(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let bytes = data(ctx, this).to_vec();
    let content = byte_integers(ctx, &bytes);
    Ok(ctx.new_tuple(content))
}
