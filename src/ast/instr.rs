//! Instruction AST type

use crate::ast::Operand;
use std::slice;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// The instruction being executed
    opcode: String,
    /// Operands for the instruction, if any
    operands: Vec<Operand>,
}

impl Instruction {
    pub fn new(opcode: &str, operands: Vec<Operand>) -> Self {
        Instruction {
            opcode: opcode.to_string(),
            operands,
        }
    }

    /// An instruction that failed to decode, shown as a raw data directive.
    pub fn data_byte(value: u8) -> Self {
        Instruction::new(".db", vec![Operand::int(u32::from(value), 2)])
    }

    pub fn opcode(&self) -> &str {
        &self.opcode
    }

    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    pub fn iter_operands(&self) -> slice::Iter<Operand> {
        self.operands.iter()
    }
}
