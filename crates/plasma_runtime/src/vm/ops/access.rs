use crate::core::{self, ValueRef, names};
use crate::vm::call_function;
use crate::{Context, errors, protocol};

pub(crate) fn get_identifier(ctx: &mut Context, name: &str) -> Result<(), ValueRef> {
    let scope = ctx.current_scope();
    match ctx.lookup(scope, name) {
        Some(value) => {
            ctx.set_last_value(value);
            Ok(())
        }
        None => Err(errors::identifier_not_found(ctx, name)),
    }
}

pub(crate) fn select(ctx: &mut Context, name: &str) -> Result<(), ValueRef> {
    let receiver = ctx.pop_protected()?;
    let value = core::get(ctx, receiver, name)?;
    ctx.set_last_value(value);
    Ok(())
}

pub(crate) fn index(ctx: &mut Context) -> Result<(), ValueRef> {
    let index = ctx.pop_protected()?;
    let source = ctx.pop_protected()?;
    let value = protocol::call_method(ctx, source, names::INDEX, &[index])?;
    ctx.set_last_value(value);
    Ok(())
}

pub(crate) fn invoke(ctx: &mut Context, count: usize) -> Result<(), ValueRef> {
    let callee = ctx.pop_protected()?;
    let mut arguments = Vec::with_capacity(count);
    for _ in 0..count {
        arguments.push(ctx.pop_protected()?);
    }
    let result = call_function(ctx, callee, &arguments)?;
    ctx.set_last_value(result);
    Ok(())
}
