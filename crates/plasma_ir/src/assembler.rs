//! Hand assembly of instruction sequences.
//!
//! Stack conventions the runtime expects:
//! - `Binary` pops the left operand first, so push the right one before it.
//! - `MethodInvocation(n)` pops the callee, then `n` arguments in order, so
//!   push the arguments last-to-first and the callee on top.
//! - `NewArray`/`NewTuple` pop element 0 first; `NewHash` pops key then value.
//! - `Index` pops the index, then the source.
//! - `AssignSelector` pops the receiver, then the value.
//! - `AssignIndex` pops the index, the receiver, then the element.

use crate::{
    BinaryOperator, Body, ClassInformation, ConditionInformation, ExceptBlock,
    FunctionInformation, GeneratorInformation, Instruction, LoopInformation, Opcode, Operand,
    SwitchCase, SwitchInformation, TryInformation, UnaryOperator,
};

#[derive(Clone, Debug, Default)]
pub struct Assembler {
    code: Vec<Instruction>,
    line: u32,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source line attached to every following instruction.
    pub fn line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }

    pub fn emit(mut self, opcode: Opcode, operand: Operand) -> Self {
        self.code.push(Instruction::new(opcode, operand).at_line(self.line));
        self
    }

    fn op(self, opcode: Opcode) -> Self {
        self.emit(opcode, Operand::None)
    }

    /// Append another assembled sequence verbatim.
    pub fn append(mut self, other: Assembler) -> Self {
        self.code.extend(other.code);
        self
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn finish(self) -> Vec<Instruction> {
        self.code
    }

    pub fn into_body(self) -> Body {
        self.code.into()
    }

    // Literals

    pub fn string(self, value: impl Into<String>) -> Self {
        self.emit(Opcode::NewString, Operand::String(value.into()))
    }

    pub fn integer(self, value: i64) -> Self {
        self.emit(Opcode::NewInteger, Operand::Integer(value))
    }

    pub fn float(self, value: f64) -> Self {
        self.emit(Opcode::NewFloat, Operand::Float(value))
    }

    pub fn bytes(self, value: impl Into<Vec<u8>>) -> Self {
        self.emit(Opcode::NewBytes, Operand::Bytes(value.into()))
    }

    pub fn get_true(self) -> Self {
        self.op(Opcode::GetTrue)
    }

    pub fn get_false(self) -> Self {
        self.op(Opcode::GetFalse)
    }

    pub fn get_none(self) -> Self {
        self.op(Opcode::GetNone)
    }

    // Stack

    pub fn push(self) -> Self {
        self.op(Opcode::Push)
    }

    pub fn pop(self) -> Self {
        self.op(Opcode::Pop)
    }

    pub fn nop(self) -> Self {
        self.op(Opcode::Nop)
    }

    // Composites

    pub fn tuple(self, count: usize) -> Self {
        self.emit(Opcode::NewTuple, Operand::Count(count))
    }

    pub fn array(self, count: usize) -> Self {
        self.emit(Opcode::NewArray, Operand::Count(count))
    }

    pub fn hash(self, count: usize) -> Self {
        self.emit(Opcode::NewHash, Operand::Count(count))
    }

    /// `operation` receives one argument per receiver; a `LoadFunctionArguments`
    /// for them is inserted in front of it.
    pub fn generator(self, receivers: &[&str], operation: Assembler) -> Self {
        let receivers = names(receivers);
        let operation = Assembler::new()
            .load_arguments_owned(receivers.clone())
            .append(operation)
            .into_body();
        self.emit(
            Opcode::NewGenerator,
            Operand::Generator(GeneratorInformation {
                receivers,
                operation,
            }),
        )
    }

    // Operators

    pub fn unary(self, op: UnaryOperator) -> Self {
        self.emit(Opcode::Unary, Operand::Unary(op))
    }

    pub fn binary(self, op: BinaryOperator) -> Self {
        self.emit(Opcode::Binary, Operand::Binary(op))
    }

    // Access

    pub fn identifier(self, name: impl Into<String>) -> Self {
        self.emit(Opcode::GetIdentifier, Operand::String(name.into()))
    }

    pub fn select(self, name: impl Into<String>) -> Self {
        self.emit(Opcode::SelectNameFromObject, Operand::String(name.into()))
    }

    pub fn index(self) -> Self {
        self.op(Opcode::Index)
    }

    pub fn call(self, arguments: usize) -> Self {
        self.emit(Opcode::MethodInvocation, Operand::Count(arguments))
    }

    // Assignment

    pub fn assign(self, name: impl Into<String>) -> Self {
        self.emit(Opcode::AssignIdentifier, Operand::String(name.into()))
    }

    pub fn assign_selector(self, name: impl Into<String>) -> Self {
        self.emit(Opcode::AssignSelector, Operand::String(name.into()))
    }

    pub fn assign_index(self) -> Self {
        self.op(Opcode::AssignIndex)
    }

    // Definitions

    pub fn load_arguments(self, arguments: &[&str]) -> Self {
        self.load_arguments_owned(names(arguments))
    }

    fn load_arguments_owned(self, arguments: Vec<String>) -> Self {
        self.emit(Opcode::LoadFunctionArguments, Operand::Names(arguments))
    }

    fn definition(self, opcode: Opcode, name: &str, arguments: &[&str], body: Assembler) -> Self {
        let body = Assembler::new().load_arguments(arguments).append(body);
        let information = FunctionInformation {
            name: name.to_string(),
            body_length: body.len(),
            arg_count: arguments.len(),
        };
        self.emit(opcode, Operand::Function(information)).append(body)
    }

    pub fn function(self, name: &str, arguments: &[&str], body: Assembler) -> Self {
        self.definition(Opcode::NewFunction, name, arguments, body)
    }

    pub fn lambda(self, arguments: &[&str], body: Assembler) -> Self {
        self.definition(Opcode::NewLambdaFunction, "lambda", arguments, body)
    }

    /// Method definition inside a class body.
    pub fn method(self, name: &str, arguments: &[&str], body: Assembler) -> Self {
        self.definition(Opcode::NewClassFunction, name, arguments, body)
    }

    fn type_definition(self, opcode: Opcode, name: &str, bases: usize, body: Assembler) -> Self {
        let information = ClassInformation {
            name: name.to_string(),
            base_count: bases,
            body_length: body.len(),
        };
        self.emit(opcode, Operand::Class(information)).append(body)
    }

    /// Expects `bases` types pushed on the stack.
    pub fn class(self, name: &str, bases: usize, body: Assembler) -> Self {
        self.type_definition(Opcode::NewClass, name, bases, body)
    }

    pub fn interface(self, name: &str, bases: usize, body: Assembler) -> Self {
        self.type_definition(Opcode::NewInterface, name, bases, body)
    }

    pub fn module(self, name: &str, body: Assembler) -> Self {
        self.type_definition(Opcode::NewModule, name, 0, body)
    }

    // Jumps

    pub fn jump(self, offset: usize) -> Self {
        self.emit(Opcode::Jump, Operand::Jump(offset))
    }

    pub fn rjump(self, offset: usize) -> Self {
        self.emit(Opcode::RJump, Operand::Jump(offset))
    }

    pub fn if_jump(self, offset: usize) -> Self {
        self.emit(Opcode::IfJump, Operand::Jump(offset))
    }

    pub fn rif_jump(self, offset: usize) -> Self {
        self.emit(Opcode::RIfJump, Operand::Jump(offset))
    }

    pub fn unless_jump(self, offset: usize) -> Self {
        self.emit(Opcode::UnlessJump, Operand::Jump(offset))
    }

    pub fn runless_jump(self, offset: usize) -> Self {
        self.emit(Opcode::RUnlessJump, Operand::Jump(offset))
    }

    // Structured control flow

    fn condition(
        self,
        opcode: Opcode,
        condition: Assembler,
        body: Assembler,
        else_body: Option<Assembler>,
    ) -> Self {
        let information = ConditionInformation {
            condition: condition.into_body(),
            body: body.into_body(),
            else_body: else_body.map(Assembler::into_body),
        };
        self.emit(opcode, Operand::Condition(information))
    }

    pub fn if_(self, condition: Assembler, body: Assembler, else_body: Option<Assembler>) -> Self {
        self.condition(Opcode::If, condition, body, else_body)
    }

    pub fn unless(
        self,
        condition: Assembler,
        body: Assembler,
        else_body: Option<Assembler>,
    ) -> Self {
        self.condition(Opcode::Unless, condition, body, else_body)
    }

    /// `body if condition else else_body` as an expression.
    pub fn if_one_liner(self, condition: Assembler, body: Assembler, else_body: Assembler) -> Self {
        self.condition(Opcode::IfOneLiner, condition, body, Some(else_body))
    }

    pub fn unless_one_liner(
        self,
        condition: Assembler,
        body: Assembler,
        else_body: Assembler,
    ) -> Self {
        self.condition(Opcode::UnlessOneLiner, condition, body, Some(else_body))
    }

    fn loop_(self, opcode: Opcode, condition: Assembler, body: Assembler, receivers: &[&str]) -> Self {
        let information = LoopInformation {
            condition: condition.into_body(),
            body: body.into_body(),
            receivers: names(receivers),
        };
        self.emit(opcode, Operand::Loop(information))
    }

    pub fn while_(self, condition: Assembler, body: Assembler) -> Self {
        self.loop_(Opcode::While, condition, body, &[])
    }

    pub fn do_while(self, condition: Assembler, body: Assembler) -> Self {
        self.loop_(Opcode::DoWhile, condition, body, &[])
    }

    pub fn until(self, condition: Assembler, body: Assembler) -> Self {
        self.loop_(Opcode::Until, condition, body, &[])
    }

    /// Expects the iterable pushed on the stack.
    pub fn for_(self, receivers: &[&str], body: Assembler) -> Self {
        self.loop_(Opcode::For, Assembler::new(), body, receivers)
    }

    /// Expects the subject pushed on the stack. Each case lists target
    /// expressions (evaluated into the last value) and a body.
    pub fn switch(self, cases: Vec<(Vec<Assembler>, Assembler)>, default: Option<Assembler>) -> Self {
        let cases = cases
            .into_iter()
            .map(|(targets, body)| SwitchCase {
                targets: targets.into_iter().map(Assembler::into_body).collect(),
                body: body.into_body(),
            })
            .collect();
        self.emit(
            Opcode::Switch,
            Operand::Switch(SwitchInformation {
                cases,
                default: default.map(Assembler::into_body),
            }),
        )
    }

    pub fn try_(
        self,
        body: Assembler,
        excepts: Vec<ExceptBlock>,
        else_body: Option<Assembler>,
        finally: Option<Assembler>,
    ) -> Self {
        let information = TryInformation {
            body: body.into_body(),
            excepts,
            else_body: else_body.map(Assembler::into_body),
            finally: finally.map(Assembler::into_body),
        };
        self.emit(Opcode::Try, Operand::Try(information))
    }

    pub fn except(targets: Vec<Assembler>, capture: Option<&str>, body: Assembler) -> ExceptBlock {
        ExceptBlock {
            targets: targets.into_iter().map(Assembler::into_body).collect(),
            capture: capture.map(str::to_string),
            body: body.into_body(),
        }
    }

    /// Expects the error pushed on the stack.
    pub fn raise(self) -> Self {
        self.op(Opcode::Raise)
    }

    pub fn break_(self) -> Self {
        self.op(Opcode::Break)
    }

    pub fn continue_(self) -> Self {
        self.op(Opcode::Continue)
    }

    pub fn redo(self) -> Self {
        self.op(Opcode::Redo)
    }

    pub fn return_(self, values: usize) -> Self {
        self.emit(Opcode::Return, Operand::Count(values))
    }
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
