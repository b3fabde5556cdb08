//! MOS 6502 architecture, as found in the NES's 2A03.
//!
//! The 2A03 lacks decimal mode but otherwise decodes exactly like an NMOS
//! 6502, unofficial opcodes included. Games do use some of those (`LAX`,
//! `DCP`, the multi-byte `NOP`s), so they are decoded by name rather than
//! shown as data.
//!
//! The addressing modes defined here are shared with the HuC6280, which
//! extends the 65C02 with a few modes of its own. Both processors have an
//! 8-bit zero page and stack page; only their location in the logical
//! address space differs.

mod dis;

pub use dis::OPCODES;

use crate::analysis::{EffectiveAddressInfo, Error, Result};
use crate::arch::{ArchName, DecodeStrategy, OpBytes};
use crate::ast::Instruction;
use crate::ast::Operand as op;
use crate::memory::{MemoryPort, MemoryType};
use crate::reg::CpuState;

/// 6502-family addressing modes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Imp,
    Acc,
    Imm,
    Zp,
    ZpX,
    ZpY,

    /// `(zp)`, 65C02 and later.
    ZpInd,

    /// `(zp,X)`
    IdxInd,

    /// `(zp),Y`
    IndIdx,

    Abs,
    AbsX,
    AbsY,

    /// `JMP (abs)`
    Ind,

    /// `JMP (abs,X)`, 65C02 and later.
    AbsIdxInd,

    /// Absolute jump or call target.
    AbsJmp,

    Rel,

    /// HuC6280 `BBRn`/`BBSn`: zero page operand, then a branch offset.
    ZpRel,

    /// HuC6280 `TST #imm, zp`
    ImmZp,
    ImmZpX,
    ImmAbs,
    ImmAbsX,

    /// HuC6280 block transfers: source, destination, length.
    Block,
}

impl Mode {
    /// Number of operand bytes following the opcode.
    pub fn operand_bytes(self) -> u8 {
        match self {
            Mode::Imp | Mode::Acc => 0,
            Mode::Imm
            | Mode::Zp
            | Mode::ZpX
            | Mode::ZpY
            | Mode::ZpInd
            | Mode::IdxInd
            | Mode::IndIdx
            | Mode::Rel => 1,
            Mode::Abs
            | Mode::AbsX
            | Mode::AbsY
            | Mode::Ind
            | Mode::AbsIdxInd
            | Mode::AbsJmp
            | Mode::ZpRel
            | Mode::ImmZp
            | Mode::ImmZpX => 2,
            Mode::ImmAbs | Mode::ImmAbsX => 3,
            Mode::Block => 6,
        }
    }
}

/// Branch targets wrap within the 16-bit address space.
fn relative_target(address: u32, length: u32, offset: i8) -> u32 {
    address
        .wrapping_add(length)
        .wrapping_add(offset as u32)
        & 0xFFFF
}

fn indexed(operand: op, index: &str) -> op {
    op::wrap("", vec![operand, op::sym(index)], "")
}

/// Build the operands of an instruction in `mode`.
///
/// `zero_page` is the logical address of the zero page; zero page operands
/// are shown as one byte but refer to their full logical address.
pub(crate) fn operands(mode: Mode, bytes: OpBytes<'_>, address: u32, zero_page: u32) -> Vec<op> {
    let b1 = u32::from(bytes.byte(1));
    let b2 = u32::from(bytes.byte(2));
    let w1 = u32::from(bytes.word(1));
    let w2 = u32::from(bytes.word(2));
    let zp = |offset: u32| op::dptr(zero_page | offset, 2);

    match mode {
        Mode::Imp => vec![],
        Mode::Acc => vec![op::sym("A")],
        Mode::Imm => vec![op::imm(b1, 2)],
        Mode::Zp => vec![zp(b1)],
        Mode::ZpX => vec![indexed(zp(b1), "X")],
        Mode::ZpY => vec![indexed(zp(b1), "Y")],
        Mode::ZpInd => vec![op::wrap("(", vec![zp(b1)], ")")],
        Mode::IdxInd => vec![op::wrap("(", vec![zp(b1), op::sym("X")], ")")],
        Mode::IndIdx => vec![indexed(op::wrap("(", vec![zp(b1)], ")"), "Y")],
        Mode::Abs => vec![op::dptr(w1, 4)],
        Mode::AbsX => vec![indexed(op::dptr(w1, 4), "X")],
        Mode::AbsY => vec![indexed(op::dptr(w1, 4), "Y")],
        Mode::Ind => vec![op::wrap("(", vec![op::dptr(w1, 4)], ")")],
        Mode::AbsIdxInd => vec![op::wrap("(", vec![op::dptr(w1, 4), op::sym("X")], ")")],
        Mode::AbsJmp => vec![op::cptr(w1, 4)],
        Mode::Rel => vec![op::cptr(
            relative_target(address, 2, bytes.byte(1) as i8),
            4,
        )],
        Mode::ZpRel => vec![
            zp(b1),
            op::cptr(relative_target(address, 3, bytes.byte(2) as i8), 4),
        ],
        Mode::ImmZp => vec![op::imm(b1, 2), zp(b2)],
        Mode::ImmZpX => vec![op::imm(b1, 2), indexed(zp(b2), "X")],
        Mode::ImmAbs => vec![op::imm(b1, 2), op::dptr(w2, 4)],
        Mode::ImmAbsX => vec![op::imm(b1, 2), indexed(op::dptr(w2, 4), "X")],
        Mode::Block => vec![
            op::dptr(w1, 4),
            op::dptr(u32::from(bytes.word(3)), 4),
            op::int(u32::from(bytes.word(5)), 4),
        ],
    }
}

/// Index and stack registers common to the 6502 family.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Registers {
    pub x: u8,
    pub y: u8,
    pub sp: u8,
}

/// Compute the effective address of an instruction.
///
/// Zero page pointers are read through `port` and wrap within the zero page,
/// as they do on hardware. Stack pushes and pulls address the page after the
/// zero page.
pub(crate) fn effective_address(
    mnemonic: &str,
    mode: Mode,
    bytes: OpBytes<'_>,
    regs: Registers,
    zero_page: u32,
    bus: MemoryType,
    port: &dyn MemoryPort,
) -> EffectiveAddressInfo {
    let b1 = u32::from(bytes.byte(1));
    let b2 = u32::from(bytes.byte(2));
    let w1 = u32::from(bytes.word(1));
    let x = u32::from(regs.x);
    let y = u32::from(regs.y);
    let sp = u32::from(regs.sp);
    let stack = zero_page + 0x100;

    let zp_pointer = |offset: u32| {
        let lo = port.read_byte(bus, zero_page | (offset & 0xFF));
        let hi = port.read_byte(bus, zero_page | (offset.wrapping_add(1) & 0xFF));

        u32::from(u16::from_le_bytes([lo, hi]))
    };

    match mode {
        Mode::Zp | Mode::ZpRel => EffectiveAddressInfo::new(zero_page | b1, 1),
        Mode::ZpX => EffectiveAddressInfo::new(zero_page | ((b1 + x) & 0xFF), 1),
        Mode::ZpY => EffectiveAddressInfo::new(zero_page | ((b1 + y) & 0xFF), 1),
        Mode::ZpInd => EffectiveAddressInfo::new(zp_pointer(b1), 1),
        Mode::IdxInd => EffectiveAddressInfo::new(zp_pointer(b1 + x), 1),
        Mode::IndIdx => EffectiveAddressInfo::new((zp_pointer(b1) + y) & 0xFFFF, 1),
        Mode::Abs => EffectiveAddressInfo::new(w1, 1),
        Mode::AbsX => EffectiveAddressInfo::new((w1 + x) & 0xFFFF, 1),
        Mode::AbsY => EffectiveAddressInfo::new((w1 + y) & 0xFFFF, 1),
        Mode::Ind => EffectiveAddressInfo::new(w1, 2),
        Mode::AbsIdxInd => EffectiveAddressInfo::new((w1 + x) & 0xFFFF, 2),
        Mode::ImmZp => EffectiveAddressInfo::new(zero_page | b2, 1),
        Mode::ImmZpX => EffectiveAddressInfo::new(zero_page | ((b2 + x) & 0xFF), 1),
        Mode::ImmAbs => EffectiveAddressInfo::new(u32::from(bytes.word(2)), 1),
        Mode::ImmAbsX => EffectiveAddressInfo::new((u32::from(bytes.word(2)) + x) & 0xFFFF, 1),
        Mode::Imp => match mnemonic {
            "PHA" | "PHP" | "PHX" | "PHY" => EffectiveAddressInfo::new(stack | sp, 1),
            "PLA" | "PLP" | "PLX" | "PLY" => {
                EffectiveAddressInfo::new(stack | ((sp + 1) & 0xFF), 1)
            }
            _ => EffectiveAddressInfo::none(),
        },
        Mode::Acc | Mode::Imm | Mode::AbsJmp | Mode::Rel | Mode::Block => {
            EffectiveAddressInfo::none()
        }
    }
}

/// Opcodes that halt the CPU until reset.
fn is_jam(opcode: u8) -> bool {
    opcode & 0x0F == 0x02 && opcode & 0x90 != 0x80
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Mos6502;

impl DecodeStrategy for Mos6502 {
    fn name(&self) -> &'static str {
        "6502"
    }

    fn operand_length(&self, opcode: u8, _flags: u8) -> u8 {
        1 + OPCODES[usize::from(opcode)].1.operand_bytes()
    }

    fn is_jump_to_sub(&self, op: OpBytes<'_>) -> bool {
        op.opcode() == 0x20
    }

    fn is_return(&self, op: OpBytes<'_>) -> bool {
        matches!(op.opcode(), 0x60 | 0x40)
    }

    fn is_unconditional_jump(&self, op: OpBytes<'_>) -> bool {
        matches!(op.opcode(), 0x00 | 0x20 | 0x40 | 0x4C | 0x60 | 0x6C)
    }

    fn is_conditional_jump(&self, op: OpBytes<'_>) -> bool {
        matches!(
            op.opcode(),
            0x10 | 0x30 | 0x50 | 0x70 | 0x90 | 0xB0 | 0xD0 | 0xF0
        )
    }

    fn can_continue(&self, op: OpBytes<'_>) -> bool {
        !is_jam(op.opcode())
    }

    fn effective_address(
        &self,
        op: OpBytes<'_>,
        arch: ArchName,
        state: &CpuState,
        port: &dyn MemoryPort,
    ) -> Result<EffectiveAddressInfo> {
        let cpu = match state {
            CpuState::Nes(cpu) => cpu,
            other => return Err(Error::state_mismatch(self.name(), other)),
        };

        let (mnemonic, mode) = OPCODES[usize::from(op.opcode())];
        let regs = Registers {
            x: cpu.x,
            y: cpu.y,
            sp: cpu.sp,
        };

        Ok(effective_address(
            mnemonic,
            mode,
            op,
            regs,
            0,
            MemoryType::CpuBus(arch),
            port,
        ))
    }

    fn disassemble(&self, op: OpBytes<'_>, address: u32) -> Instruction {
        dis::disassemble(op, address)
    }
}
