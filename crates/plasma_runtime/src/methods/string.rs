use crate::core::{MethodTable, NativeMethod, TypeTag, ValueRef, names};
use crate::{Context, errors};

use super::common::{Selection, byte_integers, expect_integer, expect_string, repeat_checked, select};
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
    names::TO_INTEGER,
    names::TO_FLOAT,
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
        names::TO_INTEGER => NativeMethod::new(0, to_integer),
        names::TO_FLOAT => NativeMethod::new(0, to_float),
        names::TO_STRING => NativeMethod::new(0, to_string),
        names::TO_BOOL => NativeMethod::new(0, to_bool),
        names::TO_ARRAY => NativeMethod::new(0, to_array),
        names::TO_TUPLE => NativeMethod::new(0, to_tuple),
        _ => return None,
    })
}

fn text(ctx: &Context, value: ValueRef) -> &str {
    &ctx.value(value).string
}

fn add(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let other = expect_string(ctx, arguments[0])?;
    let joined = format!("{}{}", text(ctx, this), other);
    Ok(ctx.new_string(joined))
}

/// `"ab" * 3` and `3 * "ab"`; a negative count reverses the characters.
fn mul(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let count = expect_integer(ctx, arguments[0])?;
    let characters: Vec<char> = text(ctx, this).chars().collect();
    let repeated: String = repeat_checked(ctx, &characters, count)?.into_iter().collect();
    Ok(ctx.new_string(repeated))
}

fn same(ctx: &Context, this: ValueRef, other: ValueRef) -> bool {
    let other = ctx.value(other);
    other.tag == TypeTag::String && other.string == ctx.value(this).string
}

fn equals(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let equal = same(ctx, this, arguments[0]);
    Ok(ctx.get_boolean(equal))
}

fn not_equals(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let equal = same(ctx, this, arguments[0]);
    Ok(ctx.get_boolean(!equal))
}

fn contains(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let needle = expect_string(ctx, arguments[0])?;
    let found = text(ctx, this).contains(needle.as_str());
    Ok(ctx.get_boolean(found))
}

fn hash(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let cached = ctx.value(this).hash;
    let hash = match cached {
        Some(hash) => hash,
        None => {
            let hash = ctx.hashing.hash_string(text(ctx, this));
            ctx.value_mut(this).hash = Some(hash);
            hash
        }
    };
    Ok(ctx.new_integer(hash))
}

fn copy(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let string = text(ctx, this).to_string();
    Ok(ctx.new_string(string))
}

/// Indices count characters, not bytes.
fn index(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let characters: Vec<char> = text(ctx, this).chars().collect();
    let selected: String = match select(ctx, characters.len(), arguments[0])? {
        Selection::Element(position) => characters[position].to_string(),
        Selection::Slice(range) => characters[range].iter().collect(),
    };
    Ok(ctx.new_string(selected))
}

fn iter(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    Ok(ctx.new_collection_iterator(this, iterator::STRING_TABLE))
}

/// Decimal, or `0x`/`0o`/`0b` prefixed, with an optional sign and `_`
/// separators.
pub(crate) fn parse_integer(source: &str) -> Option<i64> {
    let cleaned: String = source.trim().chars().filter(|c| *c != '_').collect();
    let (negative, unsigned) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..]),
        Some("0o" | "0O") => (8, &unsigned[2..]),
        Some("0b" | "0B") => (2, &unsigned[2..]),
        _ => (10, unsigned),
    };
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }
    let magnitude = i128::from_str_radix(digits, radix).ok()?;
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

pub(crate) fn parse_float(source: &str) -> Option<f64> {
    let cleaned: String = source.trim().chars().filter(|c| *c != '_').collect();
    cleaned.parse().ok()
}

fn to_integer(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    match parse_integer(text(ctx, this)) {
        Some(integer) => Ok(ctx.new_integer(integer)),
        None => Err(errors::integer_parsing(ctx)),
    }
}

fn to_float(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    match parse_float(text(ctx, this)) {
        Some(floating) => Ok(ctx.new_float(floating)),
        None => Err(errors::float_parsing(ctx)),
    }
}

fn to_string(_ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    Ok(this)
}

fn to_bool(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let non_empty = !text(ctx, this).is_empty();
    Ok(ctx.get_boolean(non_empty))
}

fn to_array(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let bytes = text(ctx, this).as_bytes().to_vec();
    let content = byte_integers(ctx, &bytes);
    Ok(ctx.new_array(content))
}

fn to_tuple(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let bytes = text(ctx, this).as_bytes().to_vec();
    let content = byte_integers(ctx, &bytes);
    Ok(ctx.new_tuple(content))
}

#[cfg(test)]
mod tests {
    use super::{parse_float, parse_integer};

    #[test]
    fn integers_accept_prefixes_and_separators() {
        assert_eq!(parse_integer("42"), Some(42));
        assert_eq!(parse_integer(" -1_000 "), Some(-1000));
        assert_eq!(parse_integer("0xff"), Some(255));
        assert_eq!(parse_integer("0b101"), Some(5));
        assert_eq!(parse_integer("-0o17"), Some(-15));
        assert_eq!(parse_integer("-9223372036854775808"), Some(i64::MIN));
        assert_eq!(parse_integer("9223372036854775808"), None);
        assert_eq!(parse_integer("0x"), None);
        assert_eq!(parse_integer("--1"), None);
        assert_eq!(parse_integer("abc"), None);
    }

    #[test]
    fn floats_ignore_separators() {
        assert_eq!(parse_float("1_000.5"), Some(1000.5));
        assert_eq!(parse_float("nope"), None);
    }
}
