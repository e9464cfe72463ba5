use std::fmt;
use std::rc::Rc;

use crate::{BinaryOperator, UnaryOperator};

/// Shared, immutable instruction sequence (function bodies, nested blocks).
pub type Body = Rc<[Instruction]>;

pub fn empty_body() -> Body {
    Rc::from(Vec::new())
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Literals
    NewString,
    NewInteger,
    NewFloat,
    NewBytes,
    GetTrue,
    GetFalse,
    GetNone,
    // Composites
    NewTuple,
    NewArray,
    NewHash,
    NewGenerator,
    // Operators
    Unary,
    Binary,
    // Access
    GetIdentifier,
    SelectNameFromObject,
    Index,
    MethodInvocation,
    // Assignment
    AssignIdentifier,
    AssignSelector,
    AssignIndex,
    // Definitions
    NewFunction,
    NewLambdaFunction,
    NewClass,
    NewClassFunction,
    NewInterface,
    NewModule,
    LoadFunctionArguments,
    // Stack
    Push,
    Pop,
    // Jumps
    Jump,
    RJump,
    IfJump,
    RIfJump,
    UnlessJump,
    RUnlessJump,
    // Structured control flow
    If,
    Unless,
    IfOneLiner,
    UnlessOneLiner,
    While,
    DoWhile,
    Until,
    For,
    Switch,
    Try,
    Raise,
    Break,
    Continue,
    Redo,
    Return,
    Nop,
}

impl Opcode {
    /// Operand payload this opcode carries.
    pub fn operand_kind(self) -> OperandKind {
        use Opcode::*;
        match self {
            NewString | GetIdentifier | SelectNameFromObject | AssignIdentifier | AssignSelector => {
                OperandKind::String
            }
            NewInteger => OperandKind::Integer,
            NewFloat => OperandKind::Float,
            NewBytes => OperandKind::Bytes,
            NewTuple | NewArray | NewHash | MethodInvocation | Return => OperandKind::Count,
            NewGenerator => OperandKind::Generator,
            Unary => OperandKind::Unary,
            Binary => OperandKind::Binary,
            NewFunction | NewLambdaFunction | NewClassFunction => OperandKind::Function,
            NewClass | NewInterface | NewModule => OperandKind::Class,
            LoadFunctionArguments => OperandKind::Names,
            Jump | RJump | IfJump | RIfJump | UnlessJump | RUnlessJump => OperandKind::Jump,
            If | Unless | IfOneLiner | UnlessOneLiner => OperandKind::Condition,
            While | DoWhile | Until | For => OperandKind::Loop,
            Switch => OperandKind::Switch,
            Try => OperandKind::Try,
            GetTrue | GetFalse | GetNone | Index | AssignIndex | Push | Pop | Raise | Break
            | Continue | Redo | Nop => OperandKind::None,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandKind {
    None,
    String,
    Integer,
    Float,
    Bytes,
    Count,
    Jump,
    Unary,
    Binary,
    Names,
    Function,
    Class,
    Generator,
    Condition,
    Loop,
    Switch,
    Try,
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Metadata of `NewFunction`, `NewLambdaFunction` and `NewClassFunction`.
/// The next `body_length` instructions form the function body.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionInformation {
    pub name: String,
    pub body_length: usize,
    pub arg_count: usize,
}

/// Metadata of `NewClass`, `NewInterface` and `NewModule`.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassInformation {
    pub name: String,
    pub base_count: usize,
    pub body_length: usize,
}

/// `operation` is a function body taking one argument per receiver.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorInformation {
    pub receivers: Vec<String>,
    pub operation: Body,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConditionInformation {
    pub condition: Body,
    pub body: Body,
    pub else_body: Option<Body>,
}

/// Shared by the loop opcodes; `For` uses `receivers` and ignores `condition`.
#[derive(Clone, Debug, PartialEq)]
pub struct LoopInformation {
    pub condition: Body,
    pub body: Body,
    pub receivers: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SwitchCase {
    pub targets: Vec<Body>,
    pub body: Body,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SwitchInformation {
    pub cases: Vec<SwitchCase>,
    pub default: Option<Body>,
}

/// An except clause. No targets means it catches everything.
#[derive(Clone, Debug, PartialEq)]
pub struct ExceptBlock {
    pub targets: Vec<Body>,
    pub capture: Option<String>,
    pub body: Body,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TryInformation {
    pub body: Body,
    pub excepts: Vec<ExceptBlock>,
    pub else_body: Option<Body>,
    pub finally: Option<Body>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    None,
    String(String),
    Integer(i64),
    Float(f64),
    Bytes(Vec<u8>),
    Count(usize),
    Jump(usize),
    Unary(UnaryOperator),
    Binary(BinaryOperator),
    Names(Vec<String>),
    Function(FunctionInformation),
    Class(ClassInformation),
    Generator(GeneratorInformation),
    Condition(ConditionInformation),
    Loop(LoopInformation),
    Switch(SwitchInformation),
    Try(TryInformation),
}

impl Operand {
    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::None => OperandKind::None,
            Operand::String(_) => OperandKind::String,
            Operand::Integer(_) => OperandKind::Integer,
            Operand::Float(_) => OperandKind::Float,
            Operand::Bytes(_) => OperandKind::Bytes,
            Operand::Count(_) => OperandKind::Count,
            Operand::Jump(_) => OperandKind::Jump,
            Operand::Unary(_) => OperandKind::Unary,
            Operand::Binary(_) => OperandKind::Binary,
            Operand::Names(_) => OperandKind::Names,
            Operand::Function(_) => OperandKind::Function,
            Operand::Class(_) => OperandKind::Class,
            Operand::Generator(_) => OperandKind::Generator,
            Operand::Condition(_) => OperandKind::Condition,
            Operand::Loop(_) => OperandKind::Loop,
            Operand::Switch(_) => OperandKind::Switch,
            Operand::Try(_) => OperandKind::Try,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operand: Operand,
    pub line: u32,
}

impl Instruction {
    pub fn new(opcode: Opcode, operand: Operand) -> Self {
        Self {
            opcode,
            operand,
            line: 0,
        }
    }

    pub fn simple(opcode: Opcode) -> Self {
        Self::new(opcode, Operand::None)
    }

    pub fn at_line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }
}
