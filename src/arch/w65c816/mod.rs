//! 65C816 CPU architecture. Extension of the 6502 to ""16-bit"" operation.
//!
//! I swear, if this counts as 16-bit, then the god damned Sega Genesis was
//! 32-bit. Do the math.
//!
//! Used as the main CPU of the Super Famicom, and again inside the SA-1
//! cartridge coprocessor. Both share this decoder.
//!
//! The accumulator and index registers are variable-width: the M and X bits
//! of P shorten them to 8 bits, which also shortens immediate operands. The
//! flags byte handed to this decoder therefore carries those two bits, and
//! `REP`/`SEP` update them as a listing is walked.

mod dis;
mod ea;

pub use dis::OPCODES;

use crate::analysis::{EffectiveAddressInfo, Result};
use crate::arch::{ArchName, DecodeStrategy, OpBytes};
use crate::ast::Instruction;
use crate::memory::MemoryPort;
use crate::reg::CpuState;

/// The M flag: accumulator and memory operands are 8 bits wide.
pub const FLAG_MEMORY_8BIT: u8 = 0x20;

/// The X flag: index registers are 8 bits wide.
pub const FLAG_INDEX_8BIT: u8 = 0x10;

/// 65C816 addressing modes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Imp,
    Acc,

    /// Signature byte of `BRK`, `COP` and `WDM`.
    Sig8,

    /// Always-8-bit immediate of `REP` and `SEP`.
    Imm8,

    /// Immediate sized by the M flag.
    ImmM,

    /// Immediate sized by the X flag.
    ImmX,

    Rel,
    RelLng,
    Dir,
    DirIdxX,
    DirIdxY,
    DirInd,
    DirIdxIndX,
    DirIndIdxY,
    DirIndLng,
    DirIndLngIdxY,
    StkRel,
    StkRelIndIdxY,

    /// `PEI`: pushes the word stored in the direct page.
    StkDirInd,

    /// `PEA`: pushes its operand.
    StkAbs,

    Abs,
    AbsIdxX,
    AbsIdxY,
    AbsInd,
    AbsIndLng,
    AbsIdxXInd,
    AbsJmp,
    AbsLng,
    AbsLngIdxX,
    AbsLngJmp,
    BlkMov,
}

impl Mode {
    /// Number of operand bytes following the opcode.
    pub fn operand_bytes(self, flags: u8) -> u8 {
        match self {
            Mode::Imp | Mode::Acc => 0,
            Mode::ImmM => {
                if flags & FLAG_MEMORY_8BIT != 0 {
                    1
                } else {
                    2
                }
            }
            Mode::ImmX => {
                if flags & FLAG_INDEX_8BIT != 0 {
                    1
                } else {
                    2
                }
            }
            Mode::Sig8
            | Mode::Imm8
            | Mode::Rel
            | Mode::Dir
            | Mode::DirIdxX
            | Mode::DirIdxY
            | Mode::DirInd
            | Mode::DirIdxIndX
            | Mode::DirIndIdxY
            | Mode::DirIndLng
            | Mode::DirIndLngIdxY
            | Mode::StkRel
            | Mode::StkRelIndIdxY
            | Mode::StkDirInd => 1,
            Mode::RelLng
            | Mode::StkAbs
            | Mode::Abs
            | Mode::AbsIdxX
            | Mode::AbsIdxY
            | Mode::AbsInd
            | Mode::AbsIndLng
            | Mode::AbsIdxXInd
            | Mode::AbsJmp
            | Mode::BlkMov => 2,
            Mode::AbsLng | Mode::AbsLngIdxX | Mode::AbsLngJmp => 3,
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct W65C816;

impl DecodeStrategy for W65C816 {
    fn name(&self) -> &'static str {
        "65C816"
    }

    fn operand_length(&self, opcode: u8, flags: u8) -> u8 {
        1 + OPCODES[usize::from(opcode)].1.operand_bytes(flags)
    }

    fn is_jump_to_sub(&self, op: OpBytes<'_>) -> bool {
        matches!(op.opcode(), 0x20 | 0x22 | 0xFC)
    }

    fn is_return(&self, op: OpBytes<'_>) -> bool {
        matches!(op.opcode(), 0x60 | 0x6B | 0x40)
    }

    fn is_unconditional_jump(&self, op: OpBytes<'_>) -> bool {
        matches!(
            op.opcode(),
            0x00 | 0x02
                | 0x20
                | 0x22
                | 0x40
                | 0x4C
                | 0x5C
                | 0x60
                | 0x6B
                | 0x6C
                | 0x7C
                | 0x80
                | 0x82
                | 0xDC
                | 0xFC
        )
    }

    fn is_conditional_jump(&self, op: OpBytes<'_>) -> bool {
        matches!(
            op.opcode(),
            0x10 | 0x30 | 0x50 | 0x70 | 0x90 | 0xB0 | 0xD0 | 0xF0
        )
    }

    /// `PLP` and `XCE` may change the register widths in ways that cannot be
    /// known without executing them.
    fn can_continue(&self, op: OpBytes<'_>) -> bool {
        !matches!(op.opcode(), 0x28 | 0xFB)
    }

    fn update_flags(&self, op: OpBytes<'_>, flags: &mut u8) {
        let mask = op.byte(1) & (FLAG_MEMORY_8BIT | FLAG_INDEX_8BIT);

        match op.opcode() {
            0xC2 => *flags &= !mask,
            0xE2 => *flags |= mask,
            _ => {}
        }
    }

    fn effective_address(
        &self,
        op: OpBytes<'_>,
        arch: ArchName,
        state: &CpuState,
        port: &dyn MemoryPort,
    ) -> Result<EffectiveAddressInfo> {
        ea::effective_address(self.name(), op, arch, state, port)
    }

    fn disassemble(&self, op: OpBytes<'_>, address: u32) -> Instruction {
        dis::disassemble(op, address)
    }
}

#[cfg(test)]
mod tests;
