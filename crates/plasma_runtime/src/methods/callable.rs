//! Behaviour of objects deriving from `Callable` that do not define `Call`.

use crate::core::{MethodTable, NativeMethod, ValueRef, names};
use crate::{Context, errors};

pub(crate) const TABLE: MethodTable = MethodTable {
    names: &[names::CALL],
    lookup,
};

fn lookup(name: &str) -> Option<NativeMethod> {
    match name {
        names::CALL => Some(NativeMethod::variadic(call)),
        _ => None,
    }
}

fn call(ctx: &mut Context, _this: ValueRef, _arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    Err(errors::not_implemented_callable(ctx, names::CALL))
}
