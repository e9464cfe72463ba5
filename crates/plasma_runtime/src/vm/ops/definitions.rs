//! Function, class, interface and module definitions.

use plasma_ir::{Body, Bytecode, ClassInformation, FunctionInformation, Opcode, Operand};

use crate::core::{Constructor, TypeTag, ValueRef, names};
use crate::vm::{ControlFlow, ScopeGuard, dispatch};
use crate::{Context, errors};

/// `NewFunction` binds the function by name; `NewLambdaFunction` only
/// leaves it as the last value.
pub(crate) fn new_function(
    ctx: &mut Context,
    bytecode: &mut Bytecode,
    information: &FunctionInformation,
    bind: bool,
) -> Result<(), ValueRef> {
    let body = bytecode.next_n(information.body_length);
    let scope = ctx.current_scope();
    let function =
        ctx.new_bytecode_function(&information.name, information.arg_count, body, None, scope);
    if bind {
        ctx.bind(scope, &information.name, function);
    }
    ctx.set_last_value(function);
    Ok(())
}

/// Method defined inside a class body: the object under construction sits
/// on top of the stack and becomes the receiver.
pub(crate) fn new_class_function(
    ctx: &mut Context,
    bytecode: &mut Bytecode,
    information: &FunctionInformation,
) -> Result<(), ValueRef> {
    let body = bytecode.next_n(information.body_length);
    let Some(object) = ctx.peek() else {
        return Err(errors::runtime_error(ctx, errors::messages::STACK_UNDERFLOW));
    };
    let scope = ctx.current_scope();
    let method = ctx.new_bytecode_function(
        &information.name,
        information.arg_count,
        body,
        Some(object),
        scope,
    );
    ctx.bind(scope, &information.name, method);
    ctx.set_last_value(method);
    Ok(())
}

fn define_type(
    ctx: &mut Context,
    information: &ClassInformation,
    body: Body,
) -> Result<ValueRef, ValueRef> {
    let mut bases = Vec::with_capacity(information.base_count);
    for _ in 0..information.base_count {
        let base = ctx.pop_protected()?;
        if ctx.value(base).tag != TypeTag::Type {
            return Err(errors::invalid_type(ctx, base, names::TYPE));
        }
        bases.push(base);
    }
    let scope = ctx.current_scope();
    let type_ = ctx.new_type(
        &information.name,
        bases,
        Some(Constructor::Bytecode(body)),
        Some(scope),
    );
    ctx.bind(scope, &information.name, type_);
    ctx.set_last_value(type_);
    Ok(type_)
}

pub(crate) fn new_class(
    ctx: &mut Context,
    bytecode: &mut Bytecode,
    information: &ClassInformation,
) -> Result<(), ValueRef> {
    let body = bytecode.next_n(information.body_length);
    define_type(ctx, information, body)?;
    Ok(())
}

/// Like a class, but the body may only define methods.
pub(crate) fn new_interface(
    ctx: &mut Context,
    bytecode: &mut Bytecode,
    information: &ClassInformation,
) -> Result<(), ValueRef> {
    let body = bytecode.next_n(information.body_length);
    if !only_methods(&body) {
        return Err(errors::runtime_error(ctx, errors::messages::INTERFACE_BODY));
    }
    define_type(ctx, information, body)?;
    Ok(())
}

fn only_methods(body: &Body) -> bool {
    let mut cursor = Bytecode::from_body(body);
    while let Some(instruction) = cursor.next() {
        match (instruction.opcode, &instruction.operand) {
            (Opcode::NewClassFunction, Operand::Function(information)) => {
                let length = information.body_length;
                cursor.jump(length);
            }
            (Opcode::Nop, _) => {}
            _ => return false,
        }
    }
    true
}

/// Run the module body once, in the module's own table.
pub(crate) fn new_module(
    ctx: &mut Context,
    bytecode: &mut Bytecode,
    information: &ClassInformation,
) -> Result<(), ValueRef> {
    let body = bytecode.next_n(information.body_length);
    let scope = ctx.current_scope();
    let module = ctx.new_module(&information.name, scope);
    let Some(table) = ctx.value(module).symbols else {
        return Err(errors::runtime_error(ctx, errors::messages::MALFORMED_OPERAND));
    };
    {
        let mut guard = ScopeGuard::enter(ctx, table);
        let base = guard.stack_len();
        let flow = dispatch::run_body(&mut guard, &body);
        guard.stack.truncate(base);
        if let ControlFlow::Return(_) = flow? {
            log::debug!("return at module level in {}", information.name);
        }
    }
    ctx.bind(scope, &information.name, module);
    ctx.set_last_value(module);
    Ok(())
}

/// Bind call arguments, pushed in reverse by the caller, to `names`.
pub(crate) fn load_arguments(ctx: &mut Context, names: &[String]) -> Result<(), ValueRef> {
    let scope = ctx.current_scope();
    for name in names {
        let value = ctx.pop_protected()?;
        ctx.bind(scope, name, value);
    }
    Ok(())
}
