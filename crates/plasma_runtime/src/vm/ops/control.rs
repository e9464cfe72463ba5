//! Jumps, conditionals, loops and the control-flow signals.

use plasma_ir::{Body, Bytecode, ConditionInformation, LoopInformation, SwitchInformation};

use crate::core::ValueRef;
use crate::vm::ControlFlow;
use crate::vm::dispatch::run_body;
use crate::{Context, protocol};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LoopKind {
    While,
    DoWhile,
    Until,
}

/// Run an expression block and take its last value (None when empty).
pub(crate) fn evaluate(ctx: &mut Context, body: &Body) -> Result<ValueRef, ValueRef> {
    ctx.last_value = None;
    run_body(ctx, body)?;
    let value = ctx.last_value().unwrap_or(ctx.get_none());
    ctx.protect(value);
    Ok(value)
}

fn test(ctx: &mut Context, condition: &Body) -> Result<bool, ValueRef> {
    let value = evaluate(ctx, condition)?;
    protocol::interpret_as_boolean(ctx, value)
}

/// Pop a condition and jump when it equals `when`. `backwards` selects the
/// relative direction.
pub(crate) fn conditional_jump(
    ctx: &mut Context,
    bytecode: &mut Bytecode,
    offset: usize,
    when: bool,
    backwards: bool,
) -> Result<(), ValueRef> {
    let condition = ctx.pop_protected()?;
    if protocol::interpret_as_boolean(ctx, condition)? == when {
        if backwards {
            bytecode.rjump(offset);
        } else {
            bytecode.jump(offset);
        }
    }
    Ok(())
}

/// `If` (`expected` true) and `Unless` (`expected` false). Signals raised by
/// the chosen branch propagate to the enclosing body.
pub(crate) fn if_(
    ctx: &mut Context,
    information: &ConditionInformation,
    expected: bool,
) -> Result<ControlFlow, ValueRef> {
    if test(ctx, &information.condition)? == expected {
        return run_body(ctx, &information.body);
    }
    match &information.else_body {
        Some(else_body) => run_body(ctx, else_body),
        None => Ok(ControlFlow::Normal),
    }
}

/// Conditional expression; the chosen branch's value becomes the last value.
pub(crate) fn one_liner(
    ctx: &mut Context,
    information: &ConditionInformation,
    expected: bool,
) -> Result<ControlFlow, ValueRef> {
    let branch = if test(ctx, &information.condition)? == expected {
        &information.body
    } else {
        match &information.else_body {
            Some(else_body) => else_body,
            None => {
                let none = ctx.get_none();
                ctx.set_last_value(none);
                return Ok(ControlFlow::Normal);
            }
        }
    };
    let value = evaluate(ctx, branch)?;
    ctx.set_last_value(value);
    Ok(ControlFlow::Normal)
}

/// Outcome of one loop iteration.
enum Iteration {
    Next,
    Exit,
    Return(ValueRef),
}

/// Run a loop body, repeating it on `Redo` without re-testing. Values
/// protected by the body are released after every pass.
fn iterate(ctx: &mut Context, body: &Body) -> Result<Iteration, ValueRef> {
    loop {
        let frame = ctx.protected_frame();
        let flow = run_body(ctx, body);
        ctx.restore_protected(frame);
        match flow? {
            ControlFlow::Normal | ControlFlow::Continue => return Ok(Iteration::Next),
            ControlFlow::Redo => continue,
            ControlFlow::Break => return Ok(Iteration::Exit),
            ControlFlow::Return(value) => {
                ctx.protect(value);
                return Ok(Iteration::Return(value));
            }
        }
    }
}

pub(crate) fn conditional_loop(
    ctx: &mut Context,
    information: &LoopInformation,
    kind: LoopKind,
) -> Result<ControlFlow, ValueRef> {
    let mut first = true;
    loop {
        let frame = ctx.protected_frame();
        let proceed = match kind {
            LoopKind::DoWhile if first => true,
            LoopKind::While | LoopKind::DoWhile => test(ctx, &information.condition)?,
            LoopKind::Until => !test(ctx, &information.condition)?,
        };
        ctx.restore_protected(frame);
        first = false;
        if !proceed {
            return Ok(ControlFlow::Normal);
        }
        match iterate(ctx, &information.body)? {
            Iteration::Next => {}
            Iteration::Exit => return Ok(ControlFlow::Normal),
            Iteration::Return(value) => return Ok(ControlFlow::Return(value)),
        }
    }
}

/// Iterate the popped value, binding each element to the receivers. Several
/// receivers unpack each element.
pub(crate) fn for_(ctx: &mut Context, information: &LoopInformation) -> Result<ControlFlow, ValueRef> {
    let iterable = ctx.pop_protected()?;
    let iterator = protocol::interpret_as_iterator(ctx, iterable)?;
    ctx.protect(iterator);
    let scope = ctx.current_scope();
    loop {
        let frame = ctx.protected_frame();
        if !protocol::has_next(ctx, iterator)? {
            return Ok(ControlFlow::Normal);
        }
        let element = protocol::next(ctx, iterator)?;
        match information.receivers.as_slice() {
            [receiver] => ctx.bind(scope, receiver, element),
            receivers => {
                let values = protocol::unpack_values(ctx, element, receivers.len())?;
                for (receiver, value) in receivers.iter().zip(values) {
                    ctx.bind(scope, receiver, value);
                }
            }
        }
        ctx.restore_protected(frame);
        match iterate(ctx, &information.body)? {
            Iteration::Next => {}
            Iteration::Exit => return Ok(ControlFlow::Normal),
            Iteration::Return(value) => return Ok(ControlFlow::Return(value)),
        }
    }
}

/// First case with a target equal to the popped subject runs; otherwise
/// the default, if any.
pub(crate) fn switch(ctx: &mut Context, information: &SwitchInformation) -> Result<ControlFlow, ValueRef> {
    let subject = ctx.pop_protected()?;
    for case in &information.cases {
        for target in &case.targets {
            let target = evaluate(ctx, target)?;
            if protocol::equals(ctx, subject, target)? {
                return run_body(ctx, &case.body);
            }
        }
    }
    match &information.default {
        Some(default) => run_body(ctx, default),
        None => Ok(ControlFlow::Normal),
    }
}

/// No values return None, one returns itself, several return a tuple in
/// pop order.
pub(crate) fn return_(ctx: &mut Context, count: usize) -> Result<ControlFlow, ValueRef> {
    let value = match count {
        0 => ctx.get_none(),
        1 => ctx.pop_protected()?,
        _ => {
            let mut values = Vec::with_capacity(count);
            for _ in 0..count {
                values.push(ctx.pop_protected()?);
            }
            ctx.new_tuple(values)
        }
    };
    Ok(ControlFlow::Return(value))
}
