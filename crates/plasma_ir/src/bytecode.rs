use std::rc::Rc;

use crate::{Body, Instruction};

/// Cursor over an instruction sequence.
///
/// Jumps are relative to the cursor, which always points at the instruction
/// that will be returned next. Moving past either end clamps to the bounds.
#[derive(Clone, Debug)]
pub struct Bytecode {
    instructions: Body,
    index: usize,
}

impl Bytecode {
    pub fn new(instructions: impl Into<Body>) -> Self {
        Self {
            instructions: instructions.into(),
            index: 0,
        }
    }

    pub fn from_body(instructions: &Body) -> Self {
        Self {
            instructions: Rc::clone(instructions),
            index: 0,
        }
    }

    #[inline]
    pub fn has_next(&self) -> bool {
        self.index < self.instructions.len()
    }

    #[inline]
    pub fn peek(&self) -> Option<&Instruction> {
        self.instructions.get(self.index)
    }

    pub fn next(&mut self) -> Option<&Instruction> {
        let instruction = self.instructions.get(self.index)?;
        self.index += 1;
        Some(instruction)
    }

    /// Advance the cursor and return the position of the instruction it
    /// passed over.
    #[inline]
    pub fn advance(&mut self) -> Option<usize> {
        if self.index < self.instructions.len() {
            self.index += 1;
            Some(self.index - 1)
        } else {
            None
        }
    }

    /// Take the next `n` instructions as an owned body. Returns fewer when
    /// the sequence ends first.
    pub fn next_n(&mut self, n: usize) -> Body {
        let start = self.index;
        let end = start.saturating_add(n).min(self.instructions.len());
        self.index = end;
        Rc::from(&self.instructions[start..end])
    }

    pub fn jump(&mut self, offset: usize) {
        self.index = self.index.saturating_add(offset).min(self.instructions.len());
    }

    pub fn rjump(&mut self, offset: usize) {
        self.index = self.index.saturating_sub(offset);
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.instructions.len() - self.index
    }

    pub fn instructions(&self) -> &Body {
        &self.instructions
    }
}

impl From<Vec<Instruction>> for Bytecode {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self::new(instructions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Instruction, Opcode};

    fn nops(n: usize) -> Vec<Instruction> {
        (0..n).map(|_| Instruction::simple(Opcode::Nop)).collect()
    }

    #[test]
    fn next_n_takes_a_sub_range() {
        let mut bc = Bytecode::new(nops(5));
        bc.next();
        let body = bc.next_n(3);
        assert_eq!(body.len(), 3);
        assert_eq!(bc.position(), 4);
        assert_eq!(bc.next_n(10).len(), 1);
        assert!(!bc.has_next());
    }

    #[test]
    fn jumps_clamp_to_bounds() {
        let mut bc = Bytecode::new(nops(3));
        bc.jump(10);
        assert_eq!(bc.position(), 3);
        bc.rjump(10);
        assert_eq!(bc.position(), 0);
        bc.jump(2);
        bc.rjump(1);
        assert_eq!(bc.position(), 1);
    }
}
