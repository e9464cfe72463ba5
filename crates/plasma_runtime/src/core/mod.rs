//! Object model: values, symbol tables and name resolution.

mod creators;
mod hashing;
pub mod names;
mod symbol_table;
mod value;

pub use hashing::Hashing;
pub use symbol_table::{SymbolTable, SymbolTableRef};
pub use value::{
    Arity, Callable, Constructor, KeyValue, KeyValues, MethodTable, NativeCallback, NativeConstructor,
    NativeMethod, TypeTag, Value, ValueRef,
};

use plasma_core::fast_set_new;

use crate::{Context, errors, protocol};

/// Resolve `name` on `value`: own symbols first, then the on-demand tables.
/// A method found on demand is bound to `value` and memoised in its symbols.
pub fn get(ctx: &mut Context, value: ValueRef, name: &str) -> Result<ValueRef, ValueRef> {
    match find(ctx, value, name) {
        Some(found) => Ok(found),
        None => Err(errors::name_not_found(ctx, value, name)),
    }
}

/// [`get`] without the error.
pub fn find(ctx: &mut Context, value: ValueRef, name: &str) -> Option<ValueRef> {
    if let Some(table) = ctx.value(value).symbols {
        if let Some(found) = ctx.table(table).get_self(name) {
            return Some(found);
        }
    }
    let method = ctx.value(value).on_demand_method(name)?;
    let function = ctx.new_native_function(name, method, Some(value));
    let table = ctx.ensure_symbols(value);
    ctx.bind(table, name, function);
    Some(function)
}

/// True when `name` resolves on `value`, without binding anything.
pub fn has(ctx: &Context, value: ValueRef, name: &str) -> bool {
    let record = ctx.value(value);
    if let Some(table) = record.symbols {
        if ctx.table(table).contains(name) {
            return true;
        }
    }
    record.on_demand_method(name).is_some()
}

/// Bind an attribute in the value's own symbols.
pub fn set(ctx: &mut Context, value: ValueRef, name: &str, attribute: ValueRef) {
    let table = ctx.ensure_symbols(value);
    ctx.bind(table, name, attribute);
}

pub fn get_type(ctx: &mut Context, value: ValueRef) -> Result<ValueRef, ValueRef> {
    if let Some(type_) = ctx.value(value).type_ {
        return Ok(type_);
    }
    let type_name = ctx.value(value).type_name.clone();
    match ctx.lookup(ctx.master(), &type_name) {
        Some(type_) => Ok(type_),
        None => Err(errors::identifier_not_found(ctx, &type_name)),
    }
}

/// Whether `value` (or its type, for non-type values) is `candidate` or
/// derives from it.
pub fn implements(ctx: &mut Context, value: ValueRef, candidate: ValueRef) -> Result<bool, ValueRef> {
    let start = if ctx.value(value).tag == TypeTag::Type {
        value
    } else {
        get_type(ctx, value)?
    };
    let mut visited = fast_set_new();
    let mut pending = vec![start];
    while let Some(current) = pending.pop() {
        if current == candidate {
            return Ok(true);
        }
        if !visited.insert(current) {
            continue;
        }
        pending.extend(ctx.value(current).sub_types.iter().copied());
    }
    Ok(false)
}

/// Insert or replace `key` in a hash table, comparing keys with `Equals`.
pub fn add_key_value(
    ctx: &mut Context,
    table: ValueRef,
    key: ValueRef,
    value: ValueRef,
) -> Result<(), ValueRef> {
    let hash = protocol::calculate_hash(ctx, key)?;
    if let Some(index) = bucket_position(ctx, table, hash, key)? {
        if let Some(bucket) = ctx.value_mut(table).key_values.get_mut(&hash) {
            bucket[index].value = value;
        }
        return Ok(());
    }
    ctx.value_mut(table)
        .key_values
        .entry(hash)
        .or_default()
        .push(KeyValue { key, value });
    Ok(())
}

/// Value stored under `key`, if any.
pub fn lookup_key(ctx: &mut Context, table: ValueRef, key: ValueRef) -> Result<Option<ValueRef>, ValueRef> {
    let hash = protocol::calculate_hash(ctx, key)?;
    let Some(index) = bucket_position(ctx, table, hash, key)? else {
        return Ok(None);
    };
    Ok(ctx
        .value(table)
        .key_values
        .get(&hash)
        .and_then(|bucket| bucket.get(index))
        .map(|entry| entry.value))
}

fn bucket_position(
    ctx: &mut Context,
    table: ValueRef,
    hash: i64,
    key: ValueRef,
) -> Result<Option<usize>, ValueRef> {
    let candidates: Vec<ValueRef> = match ctx.value(table).key_values.get(&hash) {
        Some(bucket) => bucket.iter().map(|entry| entry.key).collect(),
        None => return Ok(None),
    };
    for (index, candidate) in candidates.into_iter().enumerate() {
        if protocol::equals(ctx, candidate, key)? {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

/// Sorted union of the value's own names and its on-demand names.
pub fn dir(ctx: &Context, value: ValueRef) -> Vec<String> {
    let record = ctx.value(value);
    let mut names: Vec<String> = record
        .on_demand
        .iter()
        .flat_map(|table| table.names.iter().map(|name| name.to_string()))
        .collect();
    if let Some(table) = record.symbols {
        names.extend(ctx.table(table).names().map(str::to_string));
    }
    names.sort_unstable();
    names.dedup();
    names
}
