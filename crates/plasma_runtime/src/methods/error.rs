//! Methods shared by the `RuntimeError` family. The message lives in `string`.

use super::common::expect_string;
use crate::Context;
use crate::core::{MethodTable, NativeMethod, ValueRef, names};

pub(crate) const TABLE: MethodTable = MethodTable {
    names: &[names::INITIALIZE, names::TO_STRING],
    lookup,
};

fn lookup(name: &str) -> Option<NativeMethod> {
    Some(match name {
        names::INITIALIZE => NativeMethod::new(1, initialize),
        names::TO_STRING => NativeMethod::new(0, to_string),
        _ => return None,
    })
}

fn initialize(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let message = expect_string(ctx, arguments[0])?;
    ctx.value_mut(this).string = message;
    Ok(ctx.get_none())
}

fn to_string(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let record = ctx.value(this);
    let text = format!("{}: {}", record.type_name, record.string);
    Ok(ctx.new_string(text))
}
