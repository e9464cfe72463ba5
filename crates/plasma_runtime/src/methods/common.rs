//! Helpers shared by the method tables.

use std::ops::Range;

use crate::core::{TypeTag, ValueRef, names};
use crate::{Context, errors, protocol};

pub(crate) fn expect_tag(
    ctx: &mut Context,
    value: ValueRef,
    tag: TypeTag,
    expected: &str,
) -> Result<(), ValueRef> {
    if ctx.value(value).tag != tag {
        return Err(errors::invalid_type(ctx, value, expected));
    }
    Ok(())
}

pub(crate) fn expect_integer(ctx: &mut Context, value: ValueRef) -> Result<i64, ValueRef> {
    expect_tag(ctx, value, TypeTag::Integer, names::INTEGER)?;
    Ok(ctx.value(value).integer)
}

pub(crate) fn expect_string(ctx: &mut Context, value: ValueRef) -> Result<String, ValueRef> {
    expect_tag(ctx, value, TypeTag::String, names::STRING)?;
    Ok(ctx.value(value).string.clone())
}

/// What an `Index` argument selects from a sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Selection {
    Element(usize),
    Slice(Range<usize>),
}

/// Resolve an index against a sequence of `len` elements.
///
/// An Integer selects one element; a 2-Tuple of Integers selects the
/// half-open slice between them. Both ends normalise like a single index,
/// and a start past the end yields an empty slice.
pub(crate) fn select(ctx: &mut Context, len: usize, index: ValueRef) -> Result<Selection, ValueRef> {
    match ctx.value(index).tag {
        TypeTag::Integer => {
            let requested = ctx.value(index).integer;
            element(ctx, len, requested).map(Selection::Element)
        }
        TypeTag::Tuple => {
            let bounds = ctx.value(index).content.clone();
            let [start, end] = bounds.as_slice() else {
                return Err(errors::invalid_arguments(ctx, 2, bounds.len()));
            };
            let start = expect_integer(ctx, *start)?;
            let end = expect_integer(ctx, *end)?;
            let start = element(ctx, len, start)?;
            let end = element(ctx, len, end)?;
            Ok(Selection::Slice(start..end.max(start)))
        }
        _ => Err(errors::invalid_type(ctx, index, "Integer, Tuple")),
    }
}

/// Result of indexing a content sequence.
pub(crate) enum Picked {
    One(ValueRef),
    Many(Vec<ValueRef>),
}

/// Index the content of an Array or Tuple.
pub(crate) fn pick(ctx: &mut Context, source: ValueRef, index: ValueRef) -> Result<Picked, ValueRef> {
    let content = content_of(ctx, source);
    Ok(match select(ctx, content.len(), index)? {
        Selection::Element(position) => Picked::One(content[position]),
        Selection::Slice(range) => Picked::Many(content[range].to_vec()),
    })
}

pub(crate) fn element(ctx: &mut Context, len: usize, index: i64) -> Result<usize, ValueRef> {
    match protocol::calculate_index(index, len) {
        Some(position) => Ok(position),
        None => Err(errors::index_out_of_range(ctx, len, index)),
    }
}

/// Largest sequence a repeat may produce.
pub(crate) const MAX_REPEAT_LENGTH: usize = 1 << 28;

/// `count` concatenated copies of `items`; a negative count reverses the
/// result. `None` when the result would exceed [`MAX_REPEAT_LENGTH`].
pub(crate) fn repeat<T: Clone>(items: &[T], count: i64) -> Option<Vec<T>> {
    if items.is_empty() || count == 0 {
        return Some(Vec::new());
    }
    let times = usize::try_from(count.unsigned_abs()).ok()?;
    let length = items.len().checked_mul(times)?;
    if length > MAX_REPEAT_LENGTH {
        return None;
    }
    let mut result = Vec::with_capacity(length);
    for _ in 0..times {
        result.extend_from_slice(items);
    }
    if count < 0 {
        result.reverse();
    }
    Some(result)
}

/// [`repeat`], raising when the result is too large.
pub(crate) fn repeat_checked<T: Clone>(
    ctx: &mut Context,
    items: &[T],
    count: i64,
) -> Result<Vec<T>, ValueRef> {
    match repeat(items, count) {
        Some(result) => Ok(result),
        None => Err(errors::runtime_error(ctx, errors::messages::REPEAT_TOO_LARGE)),
    }
}

/// Repeat a container's elements, copying each with its `Copy` method.
pub(crate) fn repeat_copies(
    ctx: &mut Context,
    items: &[ValueRef],
    count: i64,
) -> Result<Vec<ValueRef>, ValueRef> {
    let order = repeat_checked(ctx, items, count)?;
    let mut copies = Vec::with_capacity(order.len());
    for item in order {
        copies.push(protocol::call_method(ctx, item, names::COPY, &[])?);
    }
    Ok(copies)
}

/// Pairwise `Equals` of two element lists.
pub(crate) fn content_equals(
    ctx: &mut Context,
    left: &[ValueRef],
    right: &[ValueRef],
) -> Result<bool, ValueRef> {
    if left.len() != right.len() {
        return Ok(false);
    }
    for (left, right) in left.iter().zip(right) {
        if !protocol::equals(ctx, *left, *right)? {
            return Ok(false);
        }
    }
    Ok(true)
}

pub(crate) fn content_contains(
    ctx: &mut Context,
    items: &[ValueRef],
    needle: ValueRef,
) -> Result<bool, ValueRef> {
    for item in items {
        if protocol::equals(ctx, *item, needle)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// `ToString` of each element joined with `", "` between `open` and `close`.
pub(crate) fn join(
    ctx: &mut Context,
    items: &[ValueRef],
    open: &str,
    close: &str,
) -> Result<String, ValueRef> {
    let mut result = String::from(open);
    for (position, item) in items.iter().enumerate() {
        if position > 0 {
            result.push_str(", ");
        }
        result.push_str(&protocol::to_string(ctx, *item)?);
    }
    result.push_str(close);
    Ok(result)
}

/// Integers holding the given bytes.
pub(crate) fn byte_integers(ctx: &mut Context, bytes: &[u8]) -> Vec<ValueRef> {
    bytes.iter().map(|byte| ctx.new_integer(i64::from(*byte))).collect()
}

/// Snapshot of a value's content, for callbacks that call back into the VM.
pub(crate) fn content_of(ctx: &Context, value: ValueRef) -> Vec<ValueRef> {
    ctx.value(value).content.clone()
}

#[cfg(test)]
mod tests {
    use super::{MAX_REPEAT_LENGTH, repeat};

    #[test]
    fn negative_repeat_reverses_the_whole_result() {
        assert_eq!(repeat(&[1, 2, 3], 2), Some(vec![1, 2, 3, 1, 2, 3]));
        assert_eq!(repeat(&[1, 2, 3], -1), Some(vec![3, 2, 1]));
        assert_eq!(repeat(&[1, 2], -2), Some(vec![2, 1, 2, 1]));
        assert_eq!(repeat(&[1, 2, 3], 0), Some(Vec::new()));
    }

    #[test]
    fn oversized_repeat_is_refused() {
        assert_eq!(repeat(&[1], i64::MAX), None);
        assert_eq!(repeat(&[1, 2], i64::MIN), None);
        assert_eq!(repeat(&[1], (MAX_REPEAT_LENGTH + 1) as i64), None);
        assert_eq!(repeat::<u8>(&[], i64::MAX), Some(Vec::new()));
    }
}
