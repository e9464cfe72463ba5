//! Iterators.
//!
//! `TABLE` is the default behaviour: never has a next element. The
//! collection tables layer a cursor (`integer`) over `source`; the generator
//! table maps `source` through the function stored in `content[0]`.

use crate::core::{Arity, MethodTable, NativeCallback, NativeMethod, ValueRef, names};
use crate::vm::call_function;
use crate::{Context, errors, protocol};

pub(crate) const TABLE: MethodTable = MethodTable {
    names: &[names::HAS_NEXT, names::NEXT, names::ITER],
    lookup,
};

fn lookup(name: &str) -> Option<NativeMethod> {
    Some(match name {
        names::HAS_NEXT => NativeMethod::new(0, exhausted),
        names::NEXT => NativeMethod::new(0, nothing),
        names::ITER => NativeMethod::new(0, identity),
        _ => return None,
    })
}

fn exhausted(ctx: &mut Context, _this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    Ok(ctx.get_false())
}

fn nothing(ctx: &mut Context, _this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    Ok(ctx.get_none())
}

fn identity(_ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    Ok(this)
}

const CURSOR_NAMES: &[&str] = &[names::HAS_NEXT, names::NEXT];

/// Elements of an Array or Tuple.
pub(crate) const CONTENT_TABLE: MethodTable = MethodTable {
    names: CURSOR_NAMES,
    lookup: content_lookup,
};

fn content_lookup(name: &str) -> Option<NativeMethod> {
    cursor_lookup(name, content_has_next, content_next)
}

/// Characters of a String, as one-character Strings.
pub(crate) const STRING_TABLE: MethodTable = MethodTable {
    names: CURSOR_NAMES,
    lookup: string_lookup,
};

fn string_lookup(name: &str) -> Option<NativeMethod> {
    cursor_lookup(name, string_has_next, string_next)
}

/// Bytes of a Bytes value, as Integers.
pub(crate) const BYTES_TABLE: MethodTable = MethodTable {
    names: CURSOR_NAMES,
    lookup: bytes_lookup,
};

fn bytes_lookup(name: &str) -> Option<NativeMethod> {
    cursor_lookup(name, bytes_has_next, bytes_next)
}

/// Keys of a HashTable, snapshotted into the iterator's own `content`.
pub(crate) const KEYS_TABLE: MethodTable = MethodTable {
    names: CURSOR_NAMES,
    lookup: keys_lookup,
};

fn keys_lookup(name: &str) -> Option<NativeMethod> {
    cursor_lookup(name, keys_has_next, keys_next)
}

pub(crate) const GENERATOR_TABLE: MethodTable = MethodTable {
    names: CURSOR_NAMES,
    lookup: generator_lookup,
};

fn generator_lookup(name: &str) -> Option<NativeMethod> {
    cursor_lookup(name, generator_has_next, generator_next)
}

fn cursor_lookup(
    name: &str,
    has_next: NativeCallback,
    next: NativeCallback,
) -> Option<NativeMethod> {
    match name {
        names::HAS_NEXT => Some(NativeMethod::new(0, has_next)),
        names::NEXT => Some(NativeMethod::new(0, next)),
        _ => None,
    }
}

/// Source and cursor of a collection iterator.
fn cursor(ctx: &Context, this: ValueRef) -> Option<(ValueRef, usize)> {
    let record = ctx.value(this);
    let position = usize::try_from(record.integer).ok()?;
    Some((record.source?, position))
}

/// Whether the cursor is still inside the source.
fn remaining(ctx: &Context, this: ValueRef, length: fn(&Context, ValueRef) -> usize) -> bool {
    match cursor(ctx, this) {
        Some((source, position)) => position < length(ctx, source),
        None => false,
    }
}

/// Move the cursor past the current element and return its position, or
/// raise when the source is exhausted.
fn advance(
    ctx: &mut Context,
    this: ValueRef,
    length: fn(&Context, ValueRef) -> usize,
) -> Result<(ValueRef, usize), ValueRef> {
    let requested = ctx.value(this).integer;
    let Some((source, position)) = cursor(ctx, this) else {
        return Err(errors::index_out_of_range(ctx, 0, requested));
    };
    let len = length(ctx, source);
    if position >= len {
        return Err(errors::index_out_of_range(ctx, len, requested));
    }
    ctx.value_mut(this).integer += 1;
    Ok((source, position))
}

fn content_length(ctx: &Context, source: ValueRef) -> usize {
    ctx.value(source).content.len()
}

fn string_length(ctx: &Context, source: ValueRef) -> usize {
    ctx.value(source).string.chars().count()
}

fn bytes_length(ctx: &Context, source: ValueRef) -> usize {
    ctx.value(source).bytes.len()
}


fn content_has_next(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let more = remaining(ctx, this, content_length);
    Ok(ctx.get_boolean(more))
}

fn content_next(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let (source, position) = advance(ctx, this, content_length)?;
    Ok(ctx.value(source).content[position])
}

fn string_has_next(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let more = remaining(ctx, this, string_length);
    Ok(ctx.get_boolean(more))
}

fn string_next(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let (source, position) = advance(ctx, this, string_length)?;
    let character: String = ctx.value(source).string.chars().skip(position).take(1).collect();
    Ok(ctx.new_string(character))
}

fn bytes_has_next(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let more = remaining(ctx, this, bytes_length);
    Ok(ctx.get_boolean(more))
}

fn bytes_next(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let (source, position) = advance(ctx, this, bytes_length)?;
    let byte = ctx.value(source).bytes[position];
    Ok(ctx.new_integer(i64::from(byte)))
}

fn keys_has_next(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let record = ctx.value(this);
    let more = usize::try_from(record.integer).is_ok_and(|position| position < record.content.len());
    Ok(ctx.get_boolean(more))
}

fn keys_next(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let record = ctx.value(this);
    let requested = record.integer;
    let len = record.content.len();
    let key = usize::try_from(requested)
        .ok()
        .and_then(|position| record.content.get(position).copied());
    match key {
        Some(key) => {
            ctx.value_mut(this).integer += 1;
            Ok(key)
        }
        None => Err(errors::index_out_of_range(ctx, len, requested)),
    }
}

fn generator_has_next(
    ctx: &mut Context,
    this: ValueRef,
    _arguments: &[ValueRef],
) -> Result<ValueRef, ValueRef> {
    let more = match ctx.value(this).source {
        Some(source) => protocol::has_next(ctx, source)?,
        None => false,
    };
    Ok(ctx.get_boolean(more))
}

/// Feed the source's next element to the operation; several receivers
/// unpack the element first.
fn generator_next(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let record = ctx.value(this);
    let (Some(source), Some(operation)) = (record.source, record.content.first().copied()) else {
        return Ok(ctx.get_none());
    };
    let element = protocol::next(ctx, source)?;
    let receivers = match ctx.value(operation).callable.as_ref().map(|callable| callable.arity()) {
        Some(Arity::Exact(count)) => count,
        _ => 1,
    };
    if receivers == 1 {
        return call_function(ctx, operation, &[element]);
    }
    let values = protocol::unpack_values(ctx, element, receivers)?;
    call_function(ctx, operation, &values)
}
