//! Structural checks on instruction sequences.

use thiserror::Error;

use crate::{Body, Instruction, Opcode, Operand, OperandKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BytecodeError {
    #[error("instruction {index} ({opcode}) expects a {expected} operand, found {found}")]
    OperandMismatch {
        index: usize,
        opcode: Opcode,
        expected: OperandKind,
        found: OperandKind,
    },

    #[error("instruction {index} jumps to {target}, outside 0..={len}")]
    JumpOutOfRange {
        index: usize,
        target: isize,
        len: usize,
    },

    #[error("instruction {index} declares a body of {length} instructions but only {remaining} remain")]
    TruncatedBody {
        index: usize,
        length: usize,
        remaining: usize,
    },

    #[error("instruction {index} declares {declared} arguments but loads {loaded}")]
    ArgumentCountMismatch {
        index: usize,
        declared: usize,
        loaded: usize,
    },

    #[error("in nested block of instruction {index}: {source}")]
    Nested {
        index: usize,
        #[source]
        source: Box<BytecodeError>,
    },
}

/// Check operand shapes, jump targets and definition lengths, recursing into
/// nested blocks.
pub fn validate(instructions: &[Instruction]) -> Result<(), BytecodeError> {
    let len = instructions.len();
    for (index, instruction) in instructions.iter().enumerate() {
        let expected = instruction.opcode.operand_kind();
        let found = instruction.operand.kind();
        if expected != found {
            return Err(BytecodeError::OperandMismatch {
                index,
                opcode: instruction.opcode,
                expected,
                found,
            });
        }
        let after = index + 1;
        match (&instruction.opcode, &instruction.operand) {
            (Opcode::Jump | Opcode::IfJump | Opcode::UnlessJump, Operand::Jump(n)) => {
                let target = after as isize + *n as isize;
                if target > len as isize {
                    return Err(BytecodeError::JumpOutOfRange { index, target, len });
                }
            }
            (Opcode::RJump | Opcode::RIfJump | Opcode::RUnlessJump, Operand::Jump(n)) => {
                let target = after as isize - *n as isize;
                if target < 0 {
                    return Err(BytecodeError::JumpOutOfRange { index, target, len });
                }
            }
            (_, Operand::Function(info)) => {
                check_length(index, info.body_length, len - after)?;
                let body = &instructions[after..after + info.body_length];
                if let Some(Instruction {
                    opcode: Opcode::LoadFunctionArguments,
                    operand: Operand::Names(names),
                    ..
                }) = body.first()
                {
                    if names.len() != info.arg_count {
                        return Err(BytecodeError::ArgumentCountMismatch {
                            index,
                            declared: info.arg_count,
                            loaded: names.len(),
                        });
                    }
                }
            }
            (_, Operand::Class(info)) => check_length(index, info.body_length, len - after)?,
            (_, Operand::Generator(info)) => nested(index, &info.operation)?,
            (_, Operand::Condition(info)) => {
                nested(index, &info.condition)?;
                nested(index, &info.body)?;
                if let Some(body) = &info.else_body {
                    nested(index, body)?;
                }
            }
            (_, Operand::Loop(info)) => {
                nested(index, &info.condition)?;
                nested(index, &info.body)?;
            }
            (_, Operand::Switch(info)) => {
                for case in &info.cases {
                    for target in &case.targets {
                        nested(index, target)?;
                    }
                    nested(index, &case.body)?;
                }
                if let Some(body) = &info.default {
                    nested(index, body)?;
                }
            }
            (_, Operand::Try(info)) => {
                nested(index, &info.body)?;
                for except in &info.excepts {
                    for target in &except.targets {
                        nested(index, target)?;
                    }
                    nested(index, &except.body)?;
                }
                if let Some(body) = &info.else_body {
                    nested(index, body)?;
                }
                if let Some(body) = &info.finally {
                    nested(index, body)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn check_length(index: usize, length: usize, remaining: usize) -> Result<(), BytecodeError> {
    if length > remaining {
        return Err(BytecodeError::TruncatedBody {
            index,
            length,
            remaining,
        });
    }
    Ok(())
}

fn nested(index: usize, body: &Body) -> Result<(), BytecodeError> {
    validate(body).map_err(|source| BytecodeError::Nested {
        index,
        source: Box::new(source),
    })
}
