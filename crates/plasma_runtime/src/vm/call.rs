//! Call protocol and object construction.

use std::ops::{Deref, DerefMut};

use plasma_ir::Bytecode;

use super::{ControlFlow, dispatch};
use crate::core::{self, Arity, Callable, Constructor, SymbolTableRef, TypeTag, ValueRef, names};
use crate::{Context, errors};

const STACK_RED_ZONE: usize = 128 * 1024;
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

/// Pushes a scope on creation and pops it on drop, whatever the exit path.
pub(crate) struct ScopeGuard<'a> {
    ctx: &'a mut Context,
}

impl<'a> ScopeGuard<'a> {
    pub(crate) fn enter(ctx: &'a mut Context, scope: SymbolTableRef) -> Self {
        ctx.push_scope(scope);
        ctx.depth += 1;
        Self { ctx }
    }
}

impl Deref for ScopeGuard<'_> {
    type Target = Context;

    fn deref(&self) -> &Context {
        self.ctx
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Context {
        self.ctx
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.ctx.depth = self.ctx.depth.saturating_sub(1);
        self.ctx.pop_scope();
    }
}

/// Call `callee` with `arguments`.
///
/// Functions are invoked directly, types construct an instance and run its
/// `Initialize`, anything else is called through its `Call` method. The callee
/// and arguments stay protected for the duration of the call; the result is
/// protected in the caller's frame.
pub fn call_function(
    ctx: &mut Context,
    callee: ValueRef,
    arguments: &[ValueRef],
) -> Result<ValueRef, ValueRef> {
    let frame = ctx.protected_frame();
    ctx.protect(callee);
    for argument in arguments {
        ctx.protect(*argument);
    }
    let result = match ctx.value(callee).tag {
        TypeTag::Function => invoke(ctx, callee, arguments),
        TypeTag::Type => instantiate(ctx, callee, arguments),
        _ => call_through(ctx, callee, arguments),
    };
    ctx.restore_protected(frame);
    match result {
        Ok(value) => {
            ctx.protect(value);
            Ok(value)
        }
        Err(error) => {
            ctx.protect(error);
            Err(error)
        }
    }
}

fn instantiate(ctx: &mut Context, type_: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let object = construct_object(ctx, type_)?;
    let initialize = core::get(ctx, object, names::INITIALIZE)?;
    call_function(ctx, initialize, arguments)?;
    Ok(object)
}

fn call_through(ctx: &mut Context, callee: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let Some(call) = core::find(ctx, callee, names::CALL) else {
        return Err(errors::not_callable(ctx, callee));
    };
    if ctx.value(call).tag != TypeTag::Function {
        return Err(errors::invalid_type(ctx, call, "Function, Callable"));
    }
    call_function(ctx, call, arguments)
}

fn invoke(ctx: &mut Context, function: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let Some(callable) = ctx.value(function).callable.clone() else {
        return Err(errors::not_callable(ctx, function));
    };
    if let Arity::Exact(expected) = callable.arity() {
        if expected != arguments.len() {
            return Err(errors::invalid_arguments(ctx, expected, arguments.len()));
        }
    }
    if ctx.depth >= ctx.config.max_call_depth {
        return Err(errors::runtime_error(ctx, errors::messages::MAX_CALL_DEPTH));
    }
    log::trace!("call {} ({} args)", ctx.value(function).name, arguments.len());

    let parent = closure_parent(ctx, function);
    let receiver = ctx.value(function).self_.unwrap_or(function);
    let scope = ctx.allocate_table(Some(parent));
    ctx.bind(scope, names::SELF, receiver);
    let mut guard = ScopeGuard::enter(ctx, scope);

    // One VM call nests several host frames.
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || match callable {
        Callable::Native(method) => (method.callback)(&mut guard, receiver, arguments),
        Callable::Bytecode { body, .. } => {
            let base = guard.stack.len();
            for argument in arguments.iter().rev() {
                guard.push(*argument);
            }
            let mut bytecode = Bytecode::from_body(&body);
            let flow = dispatch::run(&mut guard, &mut bytecode);
            guard.stack.truncate(base);
            match flow? {
                ControlFlow::Return(value) => Ok(value),
                _ => Ok(guard.get_none()),
            }
        }
    })
}

/// Parent of the function's own table, or master for functions without one.
fn closure_parent(ctx: &Context, function: ValueRef) -> SymbolTableRef {
    ctx.value(function)
        .symbols
        .and_then(|table| ctx.table(table).parent)
        .unwrap_or(ctx.master())
}

/// Scope a type was defined in.
fn defining_scope(ctx: &Context, type_: ValueRef) -> SymbolTableRef {
    ctx.value(type_)
        .symbols
        .and_then(|table| ctx.table(table).parent)
        .unwrap_or(ctx.master())
}

/// Create an instance of `type_`, running base constructors before the
/// type's own.
pub fn construct_object(ctx: &mut Context, type_: ValueRef) -> Result<ValueRef, ValueRef> {
    if ctx.value(type_).tag != TypeTag::Type {
        let name = errors::type_name_of(ctx, type_);
        return Err(errors::construction_error(ctx, &name, "not a type"));
    }
    let object = ctx.new_object();
    let name = ctx.value(type_).name.clone();
    {
        let value = ctx.value_mut(object);
        value.type_name = name;
        value.type_ = Some(type_);
    }
    let table = ctx.ensure_symbols(object);
    run_constructors(ctx, object, table, type_)?;
    Ok(object)
}

fn run_constructors(
    ctx: &mut Context,
    object: ValueRef,
    table: SymbolTableRef,
    type_: ValueRef,
) -> Result<(), ValueRef> {
    let bases = ctx.value(type_).sub_types.clone();
    for base in bases {
        run_constructors(ctx, object, table, base)?;
    }
    let scope = defining_scope(ctx, type_);
    ctx.set_parent(table, Some(scope));
    match ctx.value(type_).constructor.clone() {
        Some(Constructor::Native(constructor)) => constructor(ctx, object),
        Some(Constructor::Bytecode(body)) => {
            let mut guard = ScopeGuard::enter(ctx, table);
            let base = guard.stack.len();
            guard.push(object);
            let mut bytecode = Bytecode::from_body(&body);
            let flow = dispatch::run(&mut guard, &mut bytecode);
            guard.stack.truncate(base);
            match flow? {
                ControlFlow::Normal => Ok(()),
                _ => {
                    let name = guard.value(type_).name.clone();
                    Err(errors::construction_error(
                        &mut guard,
                        &name,
                        "class body left through a control-flow statement",
                    ))
                }
            }
        }
        None => Ok(()),
    }
}
