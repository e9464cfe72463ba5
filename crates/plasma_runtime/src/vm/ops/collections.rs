//! Composite literals.

use plasma_ir::GeneratorInformation;

use crate::core::{self, ValueRef};
use crate::methods::iterator;
use crate::{Context, protocol};

fn pop_elements(ctx: &mut Context, count: usize) -> Result<Vec<ValueRef>, ValueRef> {
    let mut elements = Vec::with_capacity(count);
    for _ in 0..count {
        elements.push(ctx.pop_protected()?);
    }
    Ok(elements)
}

pub(crate) fn new_tuple(ctx: &mut Context, count: usize) -> Result<(), ValueRef> {
    let elements = pop_elements(ctx, count)?;
    let tuple = ctx.new_tuple(elements);
    ctx.set_last_value(tuple);
    Ok(())
}

pub(crate) fn new_array(ctx: &mut Context, count: usize) -> Result<(), ValueRef> {
    let elements = pop_elements(ctx, count)?;
    let array = ctx.new_array(elements);
    ctx.set_last_value(array);
    Ok(())
}

/// Later duplicates of an equal key overwrite earlier ones.
pub(crate) fn new_hash(ctx: &mut Context, count: usize) -> Result<(), ValueRef> {
    let table = ctx.new_hash_table();
    for _ in 0..count {
        let key = ctx.pop_protected()?;
        let value = ctx.pop_protected()?;
        core::add_key_value(ctx, table, key, value)?;
    }
    ctx.set_last_value(table);
    Ok(())
}

/// Lazy map over an iterable: each `Next` feeds the source's next element
/// to the operation, which closes over the current scope.
pub(crate) fn new_generator(ctx: &mut Context, information: &GeneratorInformation) -> Result<(), ValueRef> {
    let source = ctx.pop_protected()?;
    let source = protocol::interpret_as_iterator(ctx, source)?;
    ctx.protect(source);
    let scope = ctx.current_scope();
    let operation = ctx.new_bytecode_function(
        "generator",
        information.receivers.len(),
        information.operation.clone(),
        None,
        scope,
    );
    let generator = ctx.new_collection_iterator(source, iterator::GENERATOR_TABLE);
    ctx.value_mut(generator).content.push(operation);
    ctx.set_last_value(generator);
    Ok(())
}
