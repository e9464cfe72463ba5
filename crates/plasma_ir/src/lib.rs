//! Instruction set for the Plasma virtual machine.
//!
//! Compilers (outside this workspace) lower a syntax tree into a flat
//! sequence of [`Instruction`]s. The runtime consumes that sequence through a
//! [`Bytecode`] cursor. [`Assembler`] builds sequences by hand.

mod assembler;
mod bytecode;
mod instruction;
mod operators;
mod validate;

pub use assembler::*;
pub use bytecode::*;
pub use instruction::*;
pub use operators::*;
pub use validate::*;
