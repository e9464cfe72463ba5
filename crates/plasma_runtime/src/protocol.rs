//! Protocol helpers shared by the dispatch loop and the built-in methods.

use crate::core::{self, Callable, TypeTag, ValueRef, names};
use crate::vm::call_function;
use crate::{Context, errors};

/// Resolve `name` on `receiver` and call it.
pub fn call_method(
    ctx: &mut Context,
    receiver: ValueRef,
    name: &str,
    arguments: &[ValueRef],
) -> Result<ValueRef, ValueRef> {
    let method = core::get(ctx, receiver, name)?;
    call_function(ctx, method, arguments)
}

/// Left/right fallback: `left.name(right)` when it resolves and succeeds,
/// otherwise `right.right_name(left)`.
///
/// When the right-hand method is missing, the left-hand error is reported
/// if there was one.
pub fn binary_operation(
    ctx: &mut Context,
    left: ValueRef,
    right: ValueRef,
    name: &str,
    right_name: &str,
) -> Result<ValueRef, ValueRef> {
    let mut left_error = None;
    if let Some(method) = core::find(ctx, left, name) {
        match call_function(ctx, method, &[right]) {
            Ok(result) => return Ok(result),
            Err(error) => left_error = Some(error),
        }
    }
    match core::find(ctx, right, right_name) {
        Some(method) => call_function(ctx, method, &[left]),
        None => Err(match left_error {
            Some(error) => error,
            None => errors::name_not_found(ctx, right, right_name),
        }),
    }
}

pub fn equals(ctx: &mut Context, left: ValueRef, right: ValueRef) -> Result<bool, ValueRef> {
    let result = binary_operation(ctx, left, right, names::EQUALS, names::RIGHT_EQUALS)?;
    interpret_as_boolean(ctx, result)
}

pub fn calculate_hash(ctx: &mut Context, value: ValueRef) -> Result<i64, ValueRef> {
    let hash = call_method(ctx, value, names::HASH, &[])?;
    if ctx.value(hash).tag != TypeTag::Integer {
        return Err(errors::invalid_type(ctx, hash, names::INTEGER));
    }
    Ok(ctx.value(hash).integer)
}

pub fn interpret_as_boolean(ctx: &mut Context, value: ValueRef) -> Result<bool, ValueRef> {
    if ctx.value(value).tag == TypeTag::Boolean {
        return Ok(ctx.value(value).boolean);
    }
    let result = call_method(ctx, value, names::TO_BOOL, &[])?;
    if ctx.value(result).tag != TypeTag::Boolean {
        return Err(errors::invalid_type(ctx, result, names::BOOL));
    }
    Ok(ctx.value(result).boolean)
}

/// `value` itself when it already behaves as an iterator, else `value.Iter()`.
pub fn interpret_as_iterator(ctx: &mut Context, value: ValueRef) -> Result<ValueRef, ValueRef> {
    if core::has(ctx, value, names::HAS_NEXT) && core::has(ctx, value, names::NEXT) {
        return Ok(value);
    }
    call_method(ctx, value, names::ITER, &[])
}

pub fn has_next(ctx: &mut Context, iterator: ValueRef) -> Result<bool, ValueRef> {
    let result = call_method(ctx, iterator, names::HAS_NEXT, &[])?;
    interpret_as_boolean(ctx, result)
}

pub fn next(ctx: &mut Context, iterator: ValueRef) -> Result<ValueRef, ValueRef> {
    call_method(ctx, iterator, names::NEXT, &[])
}

/// Drain an iterable into a vector.
pub fn collect_values(ctx: &mut Context, iterable: ValueRef) -> Result<Vec<ValueRef>, ValueRef> {
    let iterator = interpret_as_iterator(ctx, iterable)?;
    let mut values = Vec::new();
    while has_next(ctx, iterator)? {
        values.push(next(ctx, iterator)?);
    }
    Ok(values)
}

/// Iterate `value` and require exactly `expected` elements.
pub fn unpack_values(ctx: &mut Context, value: ValueRef, expected: usize) -> Result<Vec<ValueRef>, ValueRef> {
    let values = collect_values(ctx, value)?;
    if values.len() != expected {
        return Err(errors::invalid_arguments(ctx, expected, values.len()));
    }
    Ok(values)
}

pub fn to_string(ctx: &mut Context, value: ValueRef) -> Result<String, ValueRef> {
    let result = call_method(ctx, value, names::TO_STRING, &[])?;
    if ctx.value(result).tag != TypeTag::String {
        return Err(errors::invalid_type(ctx, result, names::STRING));
    }
    Ok(ctx.value(result).string.clone())
}

/// Normalise `index` against `len`: negative indices count from the end.
pub fn calculate_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let real = if index < 0 { index.checked_add(len)? } else { index };
    if real < 0 || real >= len {
        return None;
    }
    usize::try_from(real).ok()
}

/// A method bound by user bytecode in the value's own symbols.
pub(crate) fn user_method(ctx: &Context, value: ValueRef, name: &str) -> Option<ValueRef> {
    let table = ctx.value(value).symbols?;
    let method = ctx.table(table).get_self(name)?;
    match ctx.value(method).callable {
        Some(Callable::Bytecode { .. }) => Some(method),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::calculate_index;

    #[test]
    fn negative_indices_wrap_once() {
        assert_eq!(calculate_index(-1, 5), Some(4));
        assert_eq!(calculate_index(0, 5), Some(0));
        assert_eq!(calculate_index(5, 5), None);
        assert_eq!(calculate_index(-6, 5), None);
        assert_eq!(calculate_index(0, 0), None);
        assert_eq!(calculate_index(i64::MIN, 3), None);
    }
}
