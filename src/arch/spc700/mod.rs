//! SPC700 architecture, the sound CPU of the Super Famicom.
//!
//! A close cousin of the 6502 with a 16-bit address space. Its direct page
//! sits at either `$0000` or `$0100`, chosen by the P flag, and the stack is
//! fixed to page 1.

mod dis;

pub use dis::{LENGTHS, TEMPLATES};

use crate::analysis::{EffectiveAddressInfo, Error, Result};
use crate::arch::{ArchName, DecodeStrategy, OpBytes};
use crate::ast::Instruction;
use crate::memory::{MemoryPort, MemoryType};
use crate::reg::CpuState;

/// How an opcode addresses memory.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Access {
    None,
    Dp,
    DpX,
    DpY,

    /// Direct page address held in the second operand byte.
    DpDest,

    DpWord,
    Abs,
    AbsX,
    AbsY,

    /// `(X)`: the direct page byte that X points to.
    IndX,

    /// `[dp+X]`
    DpIndX,

    /// `[dp]+Y`
    DpIndY,

    /// `mem.bit` operands.
    AbsBit,

    /// `JMP [abs+X]`
    AbsIndX,

    Push,
    Pop,
}

fn access(opcode: u8) -> Access {
    let hi = opcode >> 4;
    let even = hi & 1 == 0;

    match opcode & 0x0F {
        0x2 | 0x3 => Access::Dp,
        0x4 | 0xB if even => Access::Dp,
        0x4 | 0xB => Access::DpX,
        0x5 if even => Access::Abs,
        0x5 => Access::AbsX,
        0x6 if even => Access::IndX,
        0x6 => Access::AbsY,
        0x7 if even => Access::DpIndX,
        0x7 => Access::DpIndY,
        0x8 => match opcode {
            0x18 | 0x38 | 0x58 | 0x78 | 0x98 | 0xB8 => Access::DpDest,
            0xD8 | 0xF8 => Access::Dp,
            _ => Access::None,
        },
        0x9 => match opcode {
            0x09 | 0x29 | 0x49 | 0x69 | 0x89 | 0xA9 => Access::DpDest,
            0x19 | 0x39 | 0x59 | 0x79 | 0x99 | 0xB9 => Access::IndX,
            0xC9 | 0xE9 => Access::Abs,
            _ => Access::DpY,
        },
        0xA => match opcode {
            0xFA => Access::DpDest,
            _ if even => Access::AbsBit,
            _ => Access::DpWord,
        },
        0xC if even => Access::Abs,
        0xD => match opcode {
            0x0D | 0x2D | 0x4D | 0x6D => Access::Push,
            _ => Access::None,
        },
        0xE => match opcode {
            0x0E | 0x1E | 0x4E | 0x5E => Access::Abs,
            0x2E | 0x3E | 0x6E | 0x7E => Access::Dp,
            0xDE => Access::DpX,
            0x8E | 0xAE | 0xCE | 0xEE => Access::Pop,
            _ => Access::None,
        },
        0xF => match opcode {
            0x1F => Access::AbsIndX,
            0x8F => Access::DpDest,
            0xAF | 0xBF => Access::IndX,
            _ => Access::None,
        },
        _ => Access::None,
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Spc700;

impl DecodeStrategy for Spc700 {
    fn name(&self) -> &'static str {
        "SPC700"
    }

    fn operand_length(&self, opcode: u8, _flags: u8) -> u8 {
        LENGTHS[usize::from(opcode)]
    }

    fn is_jump_to_sub(&self, op: OpBytes<'_>) -> bool {
        matches!(op.opcode(), 0x3F | 0x4F | 0x0F) || op.opcode() & 0x0F == 0x01
    }

    fn is_return(&self, op: OpBytes<'_>) -> bool {
        matches!(op.opcode(), 0x6F | 0x7F)
    }

    fn is_unconditional_jump(&self, op: OpBytes<'_>) -> bool {
        matches!(
            op.opcode(),
            0x2F | 0x5F | 0x1F | 0x3F | 0x4F | 0x6F | 0x7F | 0x0F
        ) || op.opcode() & 0x0F == 0x01
    }

    fn is_conditional_jump(&self, op: OpBytes<'_>) -> bool {
        let opcode = op.opcode();

        match opcode & 0x0F {
            0x0 => opcode & 0x10 != 0,
            0x3 => true,
            _ => matches!(opcode, 0x2E | 0xDE | 0x6E | 0xFE),
        }
    }

    fn can_continue(&self, op: OpBytes<'_>) -> bool {
        !matches!(op.opcode(), 0xEF | 0xFF)
    }

    fn effective_address(
        &self,
        op: OpBytes<'_>,
        arch: ArchName,
        state: &CpuState,
        port: &dyn MemoryPort,
    ) -> Result<EffectiveAddressInfo> {
        let cpu = match state {
            CpuState::Spc(cpu) => cpu,
            other => return Err(Error::state_mismatch(self.name(), other)),
        };

        let bus = MemoryType::CpuBus(arch);
        let page = u32::from(cpu.direct_page());
        let x = u32::from(cpu.x);
        let y = u32::from(cpu.y);
        let b1 = u32::from(op.byte(1));
        let w1 = u32::from(op.word(1));
        let direct = |offset: u32| page | (offset & 0xFF);
        let pointer = |address: u32| u32::from(port.read_word(bus, address));

        let info = match access(op.opcode()) {
            Access::None => EffectiveAddressInfo::none(),
            Access::Dp => EffectiveAddressInfo::new(direct(b1), 1),
            Access::DpX => EffectiveAddressInfo::new(direct(b1 + x), 1),
            Access::DpY => EffectiveAddressInfo::new(direct(b1 + y), 1),
            Access::DpDest => EffectiveAddressInfo::new(direct(u32::from(op.byte(2))), 1),
            Access::DpWord => EffectiveAddressInfo::new(direct(b1), 2),
            Access::Abs => EffectiveAddressInfo::new(w1, 1),
            Access::AbsX => EffectiveAddressInfo::new((w1 + x) & 0xFFFF, 1),
            Access::AbsY => EffectiveAddressInfo::new((w1 + y) & 0xFFFF, 1),
            Access::IndX => EffectiveAddressInfo::new(direct(x), 1),
            Access::DpIndX => EffectiveAddressInfo::new(pointer(direct(b1 + x)), 1),
            Access::DpIndY => {
                EffectiveAddressInfo::new((pointer(direct(b1)) + y) & 0xFFFF, 1)
            }
            Access::AbsBit => EffectiveAddressInfo::new(w1 & 0x1FFF, 1),
            Access::AbsIndX => EffectiveAddressInfo::new((w1 + x) & 0xFFFF, 2),
            Access::Push => EffectiveAddressInfo::new(0x100 | u32::from(cpu.sp), 1),
            Access::Pop => {
                EffectiveAddressInfo::new(0x100 | u32::from(cpu.sp.wrapping_add(1)), 1)
            }
        };

        Ok(info)
    }

    fn disassemble(&self, op: OpBytes<'_>, address: u32) -> Instruction {
        dis::disassemble(op, address)
    }
}

#[cfg(test)]
mod tests;
