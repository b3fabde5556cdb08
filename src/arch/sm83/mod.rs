//! A Z80 derivative created by SHARP for use in the Nintendo Game Boy

mod dis;
mod ea;

pub use dis::disassemble;

use crate::analysis::{EffectiveAddressInfo, Error, Result};
use crate::arch::{ArchName, DecodeStrategy, OpBytes};
use crate::ast::Instruction;
use crate::memory::MemoryPort;
use crate::reg::CpuState;

/// Determine if an opcode is one of the eight `RST` vectors.
fn is_rst(opcode: u8) -> bool {
    opcode & 0xC7 == 0xC7
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Sm83;

impl DecodeStrategy for Sm83 {
    fn name(&self) -> &'static str {
        "SM83"
    }

    fn operand_length(&self, opcode: u8, _flags: u8) -> u8 {
        match opcode {
            0xCB | 0x10 => 2,
            0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => 2,
            0x18 | 0x20 | 0x28 | 0x30 | 0x38 => 2,
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => 2,
            0xE0 | 0xE8 | 0xF0 | 0xF8 => 2,
            0x01 | 0x11 | 0x21 | 0x31 | 0x08 => 3,
            0xC2 | 0xC3 | 0xC4 | 0xCA | 0xCC | 0xCD | 0xD2 | 0xD4 | 0xDA | 0xDC => 3,
            0xEA | 0xFA => 3,
            _ => 1,
        }
    }

    fn is_jump_to_sub(&self, op: OpBytes<'_>) -> bool {
        matches!(op.opcode(), 0xC4 | 0xCC | 0xCD | 0xD4 | 0xDC) || is_rst(op.opcode())
    }

    fn is_return(&self, op: OpBytes<'_>) -> bool {
        matches!(op.opcode(), 0xC9 | 0xD9 | 0xC0 | 0xC8 | 0xD0 | 0xD8)
    }

    fn is_unconditional_jump(&self, op: OpBytes<'_>) -> bool {
        matches!(op.opcode(), 0x18 | 0xC3 | 0xE9 | 0xCD | 0xC9 | 0xD9) || is_rst(op.opcode())
    }

    fn is_conditional_jump(&self, op: OpBytes<'_>) -> bool {
        matches!(
            op.opcode(),
            0x20 | 0x28
                | 0x30
                | 0x38
                | 0xC2
                | 0xCA
                | 0xD2
                | 0xDA
                | 0xC4
                | 0xCC
                | 0xD4
                | 0xDC
                | 0xC0
                | 0xC8
                | 0xD0
                | 0xD8
        )
    }

    fn effective_address(
        &self,
        op: OpBytes<'_>,
        _arch: ArchName,
        state: &CpuState,
        _port: &dyn MemoryPort,
    ) -> Result<EffectiveAddressInfo> {
        match state {
            CpuState::Gameboy(cpu) => Ok(ea::effective_address(op, cpu)),
            other => Err(Error::state_mismatch(self.name(), other)),
        }
    }

    fn disassemble(&self, op: OpBytes<'_>, address: u32) -> Instruction {
        disassemble(op, address)
    }
}
