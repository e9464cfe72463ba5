//! Bytecode execution.
//!
//! [`execute`] drives a [`Bytecode`] cursor through the dispatch loop in the
//! current scope. Nested bodies (function bodies, loop bodies, handlers) run
//! through the same loop and report how they ended with a [`ControlFlow`].

mod call;
mod dispatch;
mod machine;
mod ops;

pub use call::{call_function, construct_object};
pub use machine::VirtualMachine;

pub(crate) use call::ScopeGuard;

use plasma_ir::Bytecode;

use crate::Context;
use crate::core::ValueRef;

/// How a body finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlFlow {
    Normal,
    Break,
    Continue,
    Redo,
    Return(ValueRef),
}

/// Run `bytecode` to completion in the current scope.
///
/// Yields the returned value, or the last evaluated value when the code
/// falls off its end. Errors come back as the raised value.
pub fn execute(ctx: &mut Context, bytecode: &mut Bytecode) -> Result<ValueRef, ValueRef> {
    match dispatch::run(ctx, bytecode)? {
        ControlFlow::Return(value) => Ok(value),
        _ => Ok(ctx.last_value().unwrap_or(ctx.get_none())),
    }
}
