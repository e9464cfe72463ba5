use crate::core::{self, MethodTable, NativeMethod, TypeTag, ValueRef, names};
use crate::{Context, errors, protocol};

use super::iterator;

pub(crate) const TABLE: MethodTable = MethodTable {
    names: NAMES,
    lookup,
};

const NAMES: &[&str] = &[
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
        names::EQUALS | names::RIGHT_EQUALS => NativeMethod::new(1, equals),
        names::NOT_EQUALS | names::RIGHT_NOT_EQUALS => NativeMethod::new(1, not_equals),
        names::CONTAINS => NativeMethod::new(1, contains),
        names::HASH => NativeMethod::new(0, hash),
        names::COPY => NativeMethod::new(0, copy),
        names::INDEX => NativeMethod::new(1, index),
        names::ASSIGN => NativeMethod::new(2, assign),
        names::ITER => NativeMethod::new(0, iter),
        names::TO_STRING => NativeMethod::new(0, to_string),
        names::TO_BOOL => NativeMethod::new(0, to_bool),
        names::TO_ARRAY => NativeMethod::new(0, to_array),
        names::TO_TUPLE => NativeMethod::new(0, to_tuple),
        _ => return None,
    })
}

/// Same keys, each mapped to an equal value.
fn same_entries(ctx: &mut Context, this: ValueRef, other: ValueRef) -> Result<bool, ValueRef> {
    if ctx.value(other).tag != TypeTag::HashTable {
        return Ok(false);
    }
    if this == other {
        return Ok(true);
    }
    if ctx.value(this).entry_count() != ctx.value(other).entry_count() {
        return Ok(false);
    }
    let entries = ctx.value(this).entries();
    for entry in entries {
        let Some(value) = core::lookup_key(ctx, other, entry.key)? else {
            return Ok(false);
        };
        if !protocol::equals(ctx, entry.value, value)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn equals(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let equal = same_entries(ctx, this, arguments[0])?;
    Ok(ctx.get_boolean(equal))
}

fn not_equals(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let equal = same_entries(ctx, this, arguments[0])?;
    Ok(ctx.get_boolean(!equal))
}

fn contains(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let found = core::lookup_key(ctx, this, arguments[0])?.is_some();
    Ok(ctx.get_boolean(found))
}

fn hash(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    Err(errors::unhashable(ctx, this))
}

fn copy(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let key_values = ctx.value(this).key_values.clone();
    let table = ctx.new_hash_table();
    ctx.value_mut(table).key_values = key_values;
    Ok(table)
}

fn index(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    match core::lookup_key(ctx, this, arguments[0])? {
        Some(value) => Ok(value),
        None => Err(errors::key_not_found(ctx, arguments[0])),
    }
}

fn assign(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    core::add_key_value(ctx, this, arguments[0], arguments[1])?;
    Ok(ctx.get_none())
}

/// Iterates the keys in insertion order, as they were when iteration began.
fn iter(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let keys = ctx.value(this).keys();
    let keys_iterator = ctx.new_collection_iterator(this, iterator::KEYS_TABLE);
    ctx.value_mut(keys_iterator).content = keys;
    Ok(keys_iterator)
}

fn to_string(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let mut text = String::from("{");
    let entries = ctx.value(this).entries();
    for (position, entry) in entries.into_iter().enumerate() {
        if position > 0 {
            text.push_str(", ");
        }
        text.push_str(&protocol::to_string(ctx, entry.key)?);
        text.push_str(": ");
        text.push_str(&protocol::to_string(ctx, entry.value)?);
    }
    text.push('}');
    Ok(ctx.new_string(text))
}

fn to_bool(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let non_empty = ctx.value(this).entry_count() > 0;
    Ok(ctx.get_boolean(non_empty))
}

fn to_array(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let keys = ctx.value(this).keys();
    Ok(ctx.new_array(keys))
}

fn to_tuple(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let keys = ctx.value(this).keys();
    Ok(ctx.new_tuple(keys))
}
