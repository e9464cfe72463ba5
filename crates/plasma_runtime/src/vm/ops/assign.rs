use crate::core::{self, ValueRef, names};
use crate::{Context, errors, protocol};

pub(crate) fn identifier(ctx: &mut Context, name: &str) -> Result<(), ValueRef> {
    let value = ctx.pop_protected()?;
    let scope = ctx.current_scope();
    ctx.bind(scope, name, value);
    Ok(())
}

/// Built-in values refuse new attributes.
pub(crate) fn selector(ctx: &mut Context, name: &str) -> Result<(), ValueRef> {
    let receiver = ctx.pop_protected()?;
    let value = ctx.pop_protected()?;
    if ctx.value(receiver).built_in {
        return Err(errors::built_in_protection(ctx, receiver, name));
    }
    core::set(ctx, receiver, name, value);
    Ok(())
}

pub(crate) fn index(ctx: &mut Context) -> Result<(), ValueRef> {
    let index = ctx.pop_protected()?;
    let receiver = ctx.pop_protected()?;
    let element = ctx.pop_protected()?;
    protocol::call_method(ctx, receiver, names::ASSIGN, &[index, element])?;
    Ok(())
}
