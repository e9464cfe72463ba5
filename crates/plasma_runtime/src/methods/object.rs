//! Behaviour every value starts with.

use crate::core::{self, MethodTable, NativeMethod, TypeTag, ValueRef, names};
use crate::vm::call_function;
use crate::{Context, errors, protocol};

use super::common::expect_tag;

pub(crate) const TABLE: MethodTable = MethodTable {
    names: NAMES,
    lookup,
};

const NAMES: &[&str] = &[
    names::INITIALIZE,
    names::NEGATE,
    names::AND,
    names::RIGHT_AND,
    names::OR,
    names::RIGHT_OR,
    names::XOR,
    names::RIGHT_XOR,
    names::EQUALS,
    names::RIGHT_EQUALS,
    names::NOT_EQUALS,
    names::RIGHT_NOT_EQUALS,
    names::HASH,
    names::COPY,
    names::CLASS,
    names::SUB_CLASSES,
    names::TO_STRING,
    names::TO_BOOL,
    names::GET_INTEGER,
    names::GET_FLOAT,
    names::GET_STRING,
    names::GET_BOOL,
    names::GET_BYTES,
    names::GET_CONTENT,
    names::GET_KEY_VALUES,
    names::SET_INTEGER,
    names::SET_FLOAT,
    names::SET_STRING,
    names::SET_BOOL,
    names::SET_BYTES,
    names::SET_CONTENT,
    names::SET_KEY_VALUES,
];

fn lookup(name: &str) -> Option<NativeMethod> {
    Some(match name {
        names::INITIALIZE => NativeMethod::new(0, initialize),
        names::NEGATE => NativeMethod::new(0, negate),
        names::AND => NativeMethod::new(1, and),
        names::RIGHT_AND => NativeMethod::new(1, and),
        names::OR => NativeMethod::new(1, or),
        names::RIGHT_OR => NativeMethod::new(1, or),
        names::XOR => NativeMethod::new(1, xor),
        names::RIGHT_XOR => NativeMethod::new(1, xor),
        names::EQUALS => NativeMethod::new(1, equals),
        names::RIGHT_EQUALS => NativeMethod::new(1, right_equals),
        names::NOT_EQUALS => NativeMethod::new(1, not_equals),
        names::RIGHT_NOT_EQUALS => NativeMethod::new(1, right_not_equals),
        names::HASH => NativeMethod::new(0, hash),
        names::COPY => NativeMethod::new(0, copy),
        names::CLASS => NativeMethod::new(0, class),
        names::SUB_CLASSES => NativeMethod::new(0, sub_classes),
        names::TO_STRING => NativeMethod::new(0, to_string),
        names::TO_BOOL => NativeMethod::new(0, to_bool),
        names::GET_INTEGER => NativeMethod::new(0, get_integer),
        names::GET_FLOAT => NativeMethod::new(0, get_float),
        names::GET_STRING => NativeMethod::new(0, get_string),
        names::GET_BOOL => NativeMethod::new(0, get_bool),
        names::GET_BYTES => NativeMethod::new(0, get_bytes),
        names::GET_CONTENT => NativeMethod::new(0, get_content),
        names::GET_KEY_VALUES => NativeMethod::new(0, get_key_values),
        names::SET_INTEGER => NativeMethod::new(1, set_integer),
        names::SET_FLOAT => NativeMethod::new(1, set_float),
        names::SET_STRING => NativeMethod::new(1, set_string),
        names::SET_BOOL => NativeMethod::new(1, set_bool),
        names::SET_BYTES => NativeMethod::new(1, set_bytes),
        names::SET_CONTENT => NativeMethod::new(1, set_content),
        names::SET_KEY_VALUES => NativeMethod::new(1, set_key_values),
        _ => return None,
    })
}

fn initialize(ctx: &mut Context, _this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    Ok(ctx.get_none())
}

fn negate(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let truth = protocol::interpret_as_boolean(ctx, this)?;
    Ok(ctx.get_boolean(!truth))
}

fn truth_pair(ctx: &mut Context, this: ValueRef, other: ValueRef) -> Result<(bool, bool), ValueRef> {
    let left = protocol::interpret_as_boolean(ctx, this)?;
    let right = protocol::interpret_as_boolean(ctx, other)?;
    Ok((left, right))
}

fn and(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let (left, right) = truth_pair(ctx, this, arguments[0])?;
    Ok(ctx.get_boolean(left && right))
}

fn or(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let (left, right) = truth_pair(ctx, this, arguments[0])?;
    Ok(ctx.get_boolean(left || right))
}

fn xor(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let (left, right) = truth_pair(ctx, this, arguments[0])?;
    Ok(ctx.get_boolean(left != right))
}

/// Identity, unless either side defines its own `RightEquals`: that one
/// decides, the other operand's first.
fn equals(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let other = arguments[0];
    if this == other {
        return Ok(ctx.get_true());
    }
    let delegate = match protocol::user_method(ctx, other, names::RIGHT_EQUALS) {
        Some(method) => Some((method, this)),
        None => protocol::user_method(ctx, this, names::RIGHT_EQUALS).map(|method| (method, other)),
    };
    match delegate {
        Some((method, argument)) => {
            let result = call_function(ctx, method, &[argument])?;
            let truth = protocol::interpret_as_boolean(ctx, result)?;
            Ok(ctx.get_boolean(truth))
        }
        None => Ok(ctx.get_false()),
    }
}

fn right_equals(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    Ok(ctx.get_boolean(this == arguments[0]))
}

fn not_equals(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let equal = protocol::equals(ctx, this, arguments[0])?;
    Ok(ctx.get_boolean(!equal))
}

fn right_not_equals(
    ctx: &mut Context,
    this: ValueRef,
    arguments: &[ValueRef],
) -> Result<ValueRef, ValueRef> {
    let equal = protocol::equals(ctx, arguments[0], this)?;
    Ok(ctx.get_boolean(!equal))
}

/// Identity hash, computed once.
fn hash(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let cached = ctx.value(this).hash;
    let hash = match cached {
        Some(hash) => hash,
        None => {
            let record = ctx.value(this);
            let key = format!("{}@{}", record.type_name, record.id);
            let hash = ctx.hashing.hash_string(&key);
            ctx.value_mut(this).hash = Some(hash);
            hash
        }
    };
    Ok(ctx.new_integer(hash))
}

fn copy(_ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    Ok(this)
}

fn class(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    core::get_type(ctx, this)
}

/// Every type the value's type derives from, nearest first, without
/// duplicates.
fn sub_classes(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let start = if ctx.value(this).tag == TypeTag::Type {
        this
    } else {
        core::get_type(ctx, this)?
    };
    let mut found: Vec<ValueRef> = Vec::new();
    let mut pending = std::collections::VecDeque::from(ctx.value(start).sub_types.clone());
    while let Some(base) = pending.pop_front() {
        if base == start || found.contains(&base) {
            continue;
        }
        found.push(base);
        pending.extend(ctx.value(base).sub_types.iter().copied());
    }
    Ok(ctx.new_tuple(found))
}

fn to_string(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let record = ctx.value(this);
    let text = format!("{}{{{}}}", errors::type_name_of(ctx, this), record.id);
    Ok(ctx.new_string(text))
}

fn to_bool(ctx: &mut Context, _this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    Ok(ctx.get_true())
}

fn get_integer(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let integer = ctx.value(this).integer;
    Ok(ctx.new_integer(integer))
}

fn get_float(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let floating = ctx.value(this).floating;
    Ok(ctx.new_float(floating))
}

fn get_string(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let string = ctx.value(this).string.clone();
    Ok(ctx.new_string(string))
}

fn get_bool(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let boolean = ctx.value(this).boolean;
    Ok(ctx.get_boolean(boolean))
}

fn get_bytes(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let bytes = ctx.value(this).bytes.clone();
    Ok(ctx.new_bytes(bytes))
}

fn get_content(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let content = ctx.value(this).content.clone();
    Ok(ctx.new_array(content))
}

fn get_key_values(
    ctx: &mut Context,
    this: ValueRef,
    _arguments: &[ValueRef],
) -> Result<ValueRef, ValueRef> {
    let key_values = ctx.value(this).key_values.clone();
    let table = ctx.new_hash_table();
    ctx.value_mut(table).key_values = key_values;
    Ok(table)
}

// Setters copy a payload from a value of the matching built-in type and
// drop any cached hash.

fn set_integer(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    expect_tag(ctx, arguments[0], TypeTag::Integer, names::INTEGER)?;
    let integer = ctx.value(arguments[0]).integer;
    let record = ctx.value_mut(this);
    record.integer = integer;
    record.hash = None;
    Ok(ctx.get_none())
}

fn set_float(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    expect_tag(ctx, arguments[0], TypeTag::Float, names::FLOAT)?;
    let floating = ctx.value(arguments[0]).floating;
    let record = ctx.value_mut(this);
    record.floating = floating;
    record.hash = None;
    Ok(ctx.get_none())
}

fn set_string(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    expect_tag(ctx, arguments[0], TypeTag::String, names::STRING)?;
    let string = ctx.value(arguments[0]).string.clone();
    let record = ctx.value_mut(this);
    record.string = string;
    record.hash = None;
    Ok(ctx.get_none())
}

fn set_bool(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    expect_tag(ctx, arguments[0], TypeTag::Boolean, names::BOOL)?;
    let boolean = ctx.value(arguments[0]).boolean;
    let record = ctx.value_mut(this);
    record.boolean = boolean;
    record.hash = None;
    Ok(ctx.get_none())
}

fn set_bytes(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    expect_tag(ctx, arguments[0], TypeTag::Bytes, names::BYTES)?;
    let bytes = ctx.value(arguments[0]).bytes.clone();
    let record = ctx.value_mut(this);
    record.bytes = bytes;
    record.hash = None;
    Ok(ctx.get_none())
}

fn set_content(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let source = arguments[0];
    if !matches!(ctx.value(source).tag, TypeTag::Array | TypeTag::Tuple) {
        return Err(errors::invalid_type(ctx, source, "Array, Tuple"));
    }
    let content = ctx.value(source).content.clone();
    let record = ctx.value_mut(this);
    record.content = content;
    record.hash = None;
    Ok(ctx.get_none())
}

fn set_key_values(
    ctx: &mut Context,
    this: ValueRef,
    arguments: &[ValueRef],
) -> Result<ValueRef, ValueRef> {
    expect_tag(ctx, arguments[0], TypeTag::HashTable, names::HASH_TABLE)?;
    let key_values = ctx.value(arguments[0]).key_values.clone();
    let record = ctx.value_mut(this);
    record.key_values = key_values;
    record.hash = None;
    Ok(ctx.get_none())
}
