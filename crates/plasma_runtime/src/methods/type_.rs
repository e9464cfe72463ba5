use crate::Context;
use crate::core::{MethodTable, NativeMethod, ValueRef, names};

pub(crate) const TABLE: MethodTable = MethodTable {
    names: &[names::TO_STRING],
    lookup,
};

fn lookup(name: &str) -> Option<NativeMethod> {
    match name {
        names::TO_STRING => Some(NativeMethod::new(0, to_string)),
        _ => None,
    }
}

fn to_string(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let text = format!("{}@{}", names::TYPE, ctx.value(this).name);
    Ok(ctx.new_string(text))
}
