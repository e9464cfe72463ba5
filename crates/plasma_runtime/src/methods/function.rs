use crate::Context;
use crate::core::{MethodTable, NativeMethod, ValueRef, names};
use crate::vm::call_function;

pub(crate) const TABLE: MethodTable = MethodTable {
    names: &[names::CALL, names::TO_STRING],
    lookup,
};

fn lookup(name: &str) -> Option<NativeMethod> {
    Some(match name {
        names::CALL => NativeMethod::variadic(call),
        names::TO_STRING => NativeMethod::new(0, to_string),
        _ => return None,
    })
}

/// `f.Call(args...)` is `f(args...)`; arity is checked by the function itself.
fn call(ctx: &mut Context, this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    call_function(ctx, this, arguments)
}

fn to_string(ctx: &mut Context, this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let text = format!("{}@{}", names::FUNCTION, ctx.value(this).name);
    Ok(ctx.new_string(text))
}
