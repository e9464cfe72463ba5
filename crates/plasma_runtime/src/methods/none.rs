use crate::core::{MethodTable, NativeMethod, TypeTag, ValueRef, names};
use crate::Context;

pub(crate) const TABLE: MethodTable = MethodTable {
    names: NAMES,
    lookup,
};

const NAMES: &[&str] = &[
    names::EQUALS,
    names::RIGHT_EQUALS,
    names::NOT_EQUALS,
    names::RIGHT_NOT_EQUALS,
    names::HASH,
    names::COPY,
    names::TO_STRING,
    names::TO_BOOL,
];

fn lookup(name: &str) -> Option<NativeMethod> {
    Some(match name {
        names::EQUALS | names::RIGHT_EQUALS => NativeMethod::new(1, equals),
        names::NOT_EQUALS | names::RIGHT_NOT_EQUALS => NativeMethod::new(1, not_equals),
        names::HASH => NativeMethod::new(0, hash),
        names::COPY => NativeMethod::new(0, copy),
        names::TO_STRING => NativeMethod::new(0, to_string),
        names::TO_BOOL => NativeMethod::new(0, to_bool),
        _ => return None,
    })
}

fn equals(ctx: &mut Context, _this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let equal = ctx.value(arguments[0]).tag == TypeTag::NoneType;
    Ok(ctx.get_boolean(equal))
}

fn not_equals(ctx: &mut Context, _this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let equal = ctx.value(arguments[0]).tag == TypeTag::NoneType;
    Ok(ctx.get_boolean(!equal))
}

fn hash(ctx: &mut Context, _this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let hash = ctx.hashing.hash_string(names::NONE);
    Ok(ctx.new_integer(hash))
}

fn copy(_ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    Ok(this)
}

fn to_string(ctx: &mut Context, _this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    Ok(ctx.new_string(names::NONE))
}

fn to_bool(ctx: &mut Context, _this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    Ok(ctx.get_false())
}
