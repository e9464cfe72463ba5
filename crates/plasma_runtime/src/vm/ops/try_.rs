//! `Try` with except, else and finally clauses.

use plasma_ir::{ExceptBlock, TryInformation};

use crate::core::{self, ValueRef};
use crate::vm::ControlFlow;
use crate::vm::dispatch::run_body;
use crate::Context;

use super::control::evaluate;

/// The finally block runs exactly once on every exit path. An error or a
/// signal it produces replaces the pending outcome.
pub(crate) fn try_(ctx: &mut Context, information: &TryInformation) -> Result<ControlFlow, ValueRef> {
    let outcome = match run_body(ctx, &information.body) {
        Ok(ControlFlow::Normal) => match &information.else_body {
            Some(else_body) => run_body(ctx, else_body),
            None => Ok(ControlFlow::Normal),
        },
        Ok(flow) => Ok(flow),
        Err(error) => handle(ctx, &information.excepts, error),
    };
    if let Some(finally) = &information.finally {
        match &outcome {
            Ok(ControlFlow::Return(value)) => ctx.protect(*value),
            Err(error) => ctx.protect(*error),
            Ok(_) => {}
        }
        match run_body(ctx, finally)? {
            ControlFlow::Normal => {}
            flow => return Ok(flow),
        }
    }
    outcome
}

fn handle(ctx: &mut Context, excepts: &[ExceptBlock], error: ValueRef) -> Result<ControlFlow, ValueRef> {
    ctx.protect(error);
    for except in excepts {
        if !catches(ctx, except, error)? {
            continue;
        }
        if let Some(capture) = &except.capture {
            let scope = ctx.current_scope();
            ctx.bind(scope, capture, error);
        }
        return run_body(ctx, &except.body);
    }
    Err(error)
}

/// An except clause without targets catches everything; otherwise the
/// error must implement one of the target types.
fn catches(ctx: &mut Context, except: &ExceptBlock, error: ValueRef) -> Result<bool, ValueRef> {
    if except.targets.is_empty() {
        return Ok(true);
    }
    for target in &except.targets {
        let target = evaluate(ctx, target)?;
        if core::implements(ctx, error, target)? {
            return Ok(true);
        }
    }
    Ok(false)
}
