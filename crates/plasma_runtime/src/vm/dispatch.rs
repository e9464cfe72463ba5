use std::rc::Rc;

use plasma_ir::{Body, Bytecode, Instruction, Opcode, Operand};

use super::ControlFlow;
use super::ops::{access, assign, collections, control, definitions, literals, operators, try_};
use crate::core::ValueRef;
use crate::{Context, errors};

/// Dispatch loop.
///
/// Values protected while an instruction runs are released when it ends,
/// except a returned value or a raised error, which stay protected in the
/// enclosing frame.
pub(crate) fn run(ctx: &mut Context, bytecode: &mut Bytecode) -> Result<ControlFlow, ValueRef> {
    let code = Rc::clone(bytecode.instructions());
    while let Some(position) = bytecode.advance() {
        let Some(instruction) = code.get(position) else {
            break;
        };
        log::trace!(
            "{position:>4} line {:<4} {} {:?}",
            instruction.line,
            instruction.opcode,
            instruction.operand.kind()
        );
        let frame = ctx.protected_frame();
        let result = step(ctx, bytecode, instruction);
        ctx.restore_protected(frame);
        match result {
            Ok(ControlFlow::Normal) => {}
            Ok(flow) => {
                if let ControlFlow::Return(value) = flow {
                    ctx.protect(value);
                }
                return Ok(flow);
            }
            Err(error) => {
                ctx.protect(error);
                return Err(error);
            }
        }
    }
    Ok(ControlFlow::Normal)
}

/// Run a nested block with its own cursor.
pub(crate) fn run_body(ctx: &mut Context, body: &Body) -> Result<ControlFlow, ValueRef> {
    run(ctx, &mut Bytecode::from_body(body))
}

fn step(
    ctx: &mut Context,
    bytecode: &mut Bytecode,
    instruction: &Instruction,
) -> Result<ControlFlow, ValueRef> {
    use Opcode::*;

    match (instruction.opcode, &instruction.operand) {
        (NewString, Operand::String(value)) => literals::new_string(ctx, value),
        (NewInteger, Operand::Integer(value)) => literals::new_integer(ctx, *value),
        (NewFloat, Operand::Float(value)) => literals::new_float(ctx, *value),
        (NewBytes, Operand::Bytes(value)) => literals::new_bytes(ctx, value),
        (GetTrue, _) => literals::get_boolean(ctx, true),
        (GetFalse, _) => literals::get_boolean(ctx, false),
        (GetNone, _) => literals::get_none(ctx),

        (NewTuple, Operand::Count(count)) => collections::new_tuple(ctx, *count)?,
        (NewArray, Operand::Count(count)) => collections::new_array(ctx, *count)?,
        (NewHash, Operand::Count(count)) => collections::new_hash(ctx, *count)?,
        (NewGenerator, Operand::Generator(information)) => {
            collections::new_generator(ctx, information)?
        }

        (Unary, Operand::Unary(op)) => operators::unary(ctx, *op)?,
        (Binary, Operand::Binary(op)) => operators::binary(ctx, *op)?,

        (GetIdentifier, Operand::String(name)) => access::get_identifier(ctx, name)?,
        (SelectNameFromObject, Operand::String(name)) => access::select(ctx, name)?,
        (Index, _) => access::index(ctx)?,
        (MethodInvocation, Operand::Count(count)) => access::invoke(ctx, *count)?,

        (AssignIdentifier, Operand::String(name)) => assign::identifier(ctx, name)?,
        (AssignSelector, Operand::String(name)) => assign::selector(ctx, name)?,
        (AssignIndex, _) => assign::index(ctx)?,

        (NewFunction, Operand::Function(information)) => {
            definitions::new_function(ctx, bytecode, information, true)?
        }
        (NewLambdaFunction, Operand::Function(information)) => {
            definitions::new_function(ctx, bytecode, information, false)?
        }
        (NewClassFunction, Operand::Function(information)) => {
            definitions::new_class_function(ctx, bytecode, information)?
        }
        (NewClass, Operand::Class(information)) => {
            definitions::new_class(ctx, bytecode, information)?
        }
        (NewInterface, Operand::Class(information)) => {
            definitions::new_interface(ctx, bytecode, information)?
        }
        (NewModule, Operand::Class(information)) => {
            definitions::new_module(ctx, bytecode, information)?
        }
        (LoadFunctionArguments, Operand::Names(names)) => {
            definitions::load_arguments(ctx, names)?
        }

        (Push, _) => {
            let value = ctx.last_value().unwrap_or(ctx.get_none());
            ctx.push(value);
        }
        (Pop, _) => {
            ctx.pop()?;
        }
        (Nop, _) => {}

        (Jump, Operand::Jump(offset)) => bytecode.jump(*offset),
        (RJump, Operand::Jump(offset)) => bytecode.rjump(*offset),
        (IfJump, Operand::Jump(offset)) => control::conditional_jump(ctx, bytecode, *offset, true, false)?,
        (RIfJump, Operand::Jump(offset)) => control::conditional_jump(ctx, bytecode, *offset, true, true)?,
        (UnlessJump, Operand::Jump(offset)) => {
            control::conditional_jump(ctx, bytecode, *offset, false, false)?
        }
        (RUnlessJump, Operand::Jump(offset)) => {
            control::conditional_jump(ctx, bytecode, *offset, false, true)?
        }

        (If, Operand::Condition(information)) => return control::if_(ctx, information, true),
        (Unless, Operand::Condition(information)) => return control::if_(ctx, information, false),
        (IfOneLiner, Operand::Condition(information)) => {
            return control::one_liner(ctx, information, true);
        }
        (UnlessOneLiner, Operand::Condition(information)) => {
            return control::one_liner(ctx, information, false);
        }
        (While, Operand::Loop(information)) => {
            return control::conditional_loop(ctx, information, control::LoopKind::While);
        }
        (DoWhile, Operand::Loop(information)) => {
            return control::conditional_loop(ctx, information, control::LoopKind::DoWhile);
        }
        (Until, Operand::Loop(information)) => {
            return control::conditional_loop(ctx, information, control::LoopKind::Until);
        }
        (For, Operand::Loop(information)) => return control::for_(ctx, information),
        (Switch, Operand::Switch(information)) => return control::switch(ctx, information),
        (Try, Operand::Try(information)) => return try_::try_(ctx, information),

        (Raise, _) => {
            let error = ctx.pop_protected()?;
            return Err(error);
        }
        (Break, _) => return Ok(ControlFlow::Break),
        (Continue, _) => return Ok(ControlFlow::Continue),
        (Redo, _) => return Ok(ControlFlow::Redo),
        (Return, Operand::Count(count)) => return control::return_(ctx, *count),

        (opcode, operand) => {
            log::warn!("{opcode} carries a {} operand", operand.kind());
            return Err(errors::runtime_error(ctx, errors::messages::MALFORMED_OPERAND));
        }
    }
    Ok(ControlFlow::Normal)
}
