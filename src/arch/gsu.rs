//! SuperFX (GSU) architecture
//!
//! The GSU's opcode space is overloaded by prefix instructions. `ALT1`,
//! `ALT2` and `ALT3` select alternate forms of the following instruction,
//! and `WITH` sets the B flag that turns `TO` into `MOVE` and `FROM` into
//! `MOVES`. These prefixes are carried in the flags byte handed to the
//! decoder: bit 0 is ALT1, bit 1 is ALT2 and bit 2 is B.
//!
//! Branches execute the following instruction before the jump lands, and
//! that delay slot still sees the prefixes set before the branch.

use crate::analysis::{EffectiveAddressInfo, Error, Result};
use crate::arch::{ArchName, DecodeStrategy, OpBytes};
use crate::ast::Instruction as inst;
use crate::ast::Operand as op;
use crate::memory::MemoryPort;
use crate::reg::CpuState;

pub const FLAG_ALT1: u8 = 0x01;
pub const FLAG_ALT2: u8 = 0x02;
pub const FLAG_B: u8 = 0x04;

const BRANCHES: [&str; 11] = [
    "BRA", "BGE", "BLT", "BNE", "BEQ", "BPL", "BMI", "BCC", "BCS", "BVC", "BVS",
];

fn register(n: u8) -> op {
    op::sym(&format!("R{}", n))
}

fn indirect(operand: op) -> op {
    op::wrap("(", vec![operand], ")")
}

/// An ALU instruction whose four ALT forms are listed in `forms`, each with
/// whether it takes a 4-bit immediate instead of a register.
fn alu(forms: [(&str, bool); 4], alt: u8, n: u8) -> inst {
    let (name, immediate) = forms[usize::from(alt)];
    let operand = if immediate {
        op::imm(u32::from(n), 1)
    } else {
        register(n)
    };

    inst::new(name, vec![operand])
}

/// Pick one of `names` according to the ALT1 prefix.
fn alt1(names: (&'static str, &'static str), alt: u8) -> &'static str {
    if alt & FLAG_ALT1 != 0 {
        names.1
    } else {
        names.0
    }
}

fn branch_target(address: u32, offset: u8) -> u32 {
    let pc = address.wrapping_add(2).wrapping_add(offset as i8 as u32);

    (address & 0xFF_0000) | (pc & 0xFFFF)
}

#[derive(Copy, Clone, Debug, Default)]
pub struct SuperFx;

impl DecodeStrategy for SuperFx {
    fn name(&self) -> &'static str {
        "SuperFX"
    }

    fn operand_length(&self, opcode: u8, _flags: u8) -> u8 {
        match opcode {
            0x05..=0x0F | 0xA0..=0xAF => 2,
            0xF0..=0xFF => 3,
            _ => 1,
        }
    }

    fn is_jump_to_sub(&self, _op: OpBytes<'_>) -> bool {
        false
    }

    fn is_return(&self, _op: OpBytes<'_>) -> bool {
        false
    }

    fn is_unconditional_jump(&self, op: OpBytes<'_>) -> bool {
        matches!(op.opcode(), 0x05 | 0x98..=0x9D)
    }

    fn is_conditional_jump(&self, op: OpBytes<'_>) -> bool {
        matches!(op.opcode(), 0x06..=0x0F | 0x3C)
    }

    fn can_continue(&self, op: OpBytes<'_>) -> bool {
        op.opcode() != 0x00
    }

    fn update_flags(&self, op: OpBytes<'_>, flags: &mut u8) {
        let b = *flags & FLAG_B != 0;

        match op.opcode() {
            0x3D => *flags = (*flags & !FLAG_B) | FLAG_ALT1,
            0x3E => *flags = (*flags & !FLAG_B) | FLAG_ALT2,
            0x3F => *flags = (*flags & !FLAG_B) | FLAG_ALT1 | FLAG_ALT2,
            0x20..=0x2F => *flags |= FLAG_B,
            0x05..=0x0F => {}
            0x10..=0x1F | 0xB0..=0xBF if !b => {}
            _ => *flags &= !(FLAG_ALT1 | FLAG_ALT2 | FLAG_B),
        }
    }

    fn effective_address(
        &self,
        op: OpBytes<'_>,
        _arch: ArchName,
        state: &CpuState,
        _port: &dyn MemoryPort,
    ) -> Result<EffectiveAddressInfo> {
        let cpu = match state {
            CpuState::Gsu(cpu) => cpu,
            other => return Err(Error::state_mismatch(self.name(), other)),
        };

        let opcode = op.opcode();
        let alt = op.flags() & (FLAG_ALT1 | FLAG_ALT2);
        let ram = (0x70 + u32::from(cpu.ram_bank)) << 16;
        let rom = u32::from(cpu.rom_bank) << 16;
        let rn = u32::from(cpu.r[usize::from(opcode & 0x0F)]);
        let r14 = u32::from(cpu.r[14]);

        let info = match opcode {
            0x30..=0x3B | 0x40..=0x4B => {
                let size = if alt & FLAG_ALT1 != 0 { 1 } else { 2 };

                EffectiveAddressInfo::new(ram | rn, size)
            }
            0xA0..=0xAF if alt != 0 => {
                EffectiveAddressInfo::new(ram | (u32::from(op.byte(1)) << 1), 2)
            }
            0xF0..=0xFF if alt != 0 => EffectiveAddressInfo::new(ram | u32::from(op.word(1)), 2),
            0xDF if alt & FLAG_ALT2 == 0 => EffectiveAddressInfo::new(rom | r14, 1),
            0xEF => EffectiveAddressInfo::new(rom | r14, 1),
            _ => EffectiveAddressInfo::none(),
        };

        Ok(info)
    }

    fn disassemble(&self, bytes: OpBytes<'_>, address: u32) -> inst {
        let opcode = bytes.opcode();
        let n = opcode & 0x0F;
        let alt = bytes.flags() & (FLAG_ALT1 | FLAG_ALT2);
        let b = bytes.flags() & FLAG_B != 0;

        match opcode {
            0x00 => inst::new("STOP", vec![]),
            0x01 => inst::new("NOP", vec![]),
            0x02 => inst::new("CACHE", vec![]),
            0x03 => inst::new("LSR", vec![]),
            0x04 => inst::new("ROL", vec![]),
            0x05..=0x0F => inst::new(
                BRANCHES[usize::from(opcode - 0x05)],
                vec![op::cptr(branch_target(address, bytes.byte(1)), 4)],
            ),
            0x10..=0x1F if b => inst::new("MOVE", vec![register(n)]),
            0x10..=0x1F => inst::new("TO", vec![register(n)]),
            0x20..=0x2F => inst::new("WITH", vec![register(n)]),
            0x30..=0x3B => inst::new(alt1(("STW", "STB"), alt), vec![indirect(register(n))]),
            0x3C => inst::new("LOOP", vec![]),
            0x3D => inst::new("ALT1", vec![]),
            0x3E => inst::new("ALT2", vec![]),
            0x3F => inst::new("ALT3", vec![]),
            0x40..=0x4B => inst::new(alt1(("LDW", "LDB"), alt), vec![indirect(register(n))]),
            0x4C => inst::new(alt1(("PLOT", "RPIX"), alt), vec![]),
            0x4D => inst::new("SWAP", vec![]),
            0x4E => inst::new(alt1(("COLOR", "CMODE"), alt), vec![]),
            0x4F => inst::new("NOT", vec![]),
            0x50..=0x5F => alu(
                [("ADD", false), ("ADC", false), ("ADD", true), ("ADC", true)],
                alt,
                n,
            ),
            0x60..=0x6F => alu(
                [("SUB", false), ("SBC", false), ("SUB", true), ("CMP", false)],
                alt,
                n,
            ),
            0x70 => inst::new("MERGE", vec![]),
            0x71..=0x7F => alu(
                [("AND", false), ("BIC", false), ("AND", true), ("BIC", true)],
                alt,
                n,
            ),
            0x80..=0x8F => alu(
                [("MULT", false), ("UMULT", false), ("MULT", true), ("UMULT", true)],
                alt,
                n,
            ),
            0x90 => inst::new("SBK", vec![]),
            0x91..=0x94 => inst::new("LINK", vec![op::imm(u32::from(n), 1)]),
            0x95 => inst::new("SEX", vec![]),
            0x96 => inst::new(alt1(("ASR", "DIV2"), alt), vec![]),
            0x97 => inst::new("ROR", vec![]),
            0x98..=0x9D => inst::new(alt1(("JMP", "LJMP"), alt), vec![register(n)]),
            0x9E => inst::new("LOB", vec![]),
            0x9F => inst::new(alt1(("FMULT", "LMULT"), alt), vec![]),
            0xA0..=0xAF => {
                let short = indirect(op::dptr(u32::from(bytes.byte(1)) << 1, 3));

                if alt & FLAG_ALT1 != 0 {
                    inst::new("LMS", vec![register(n), short])
                } else if alt & FLAG_ALT2 != 0 {
                    inst::new("SMS", vec![short, register(n)])
                } else {
                    inst::new("IBT", vec![register(n), op::imm(u32::from(bytes.byte(1)), 2)])
                }
            }
            0xB0..=0xBF if b => inst::new("MOVES", vec![register(n)]),
            0xB0..=0xBF => inst::new("FROM", vec![register(n)]),
            0xC0 => inst::new("HIB", vec![]),
            0xC1..=0xCF => alu(
                [("OR", false), ("XOR", false), ("OR", true), ("XOR", true)],
                alt,
                n,
            ),
            0xD0..=0xDE => inst::new("INC", vec![register(n)]),
            0xDF => match alt {
                3 => inst::new("ROMB", vec![]),
                FLAG_ALT2 => inst::new("RAMB", vec![]),
                _ => inst::new("GETC", vec![]),
            },
            0xE0..=0xEE => inst::new("DEC", vec![register(n)]),
            0xEF => {
                let names = ["GETB", "GETBH", "GETBL", "GETBS"];

                inst::new(names[usize::from(alt)], vec![])
            }
            0xF0..=0xFF => {
                let long = indirect(op::dptr(u32::from(bytes.word(1)), 4));

                if alt & FLAG_ALT1 != 0 {
                    inst::new("LM", vec![register(n), long])
                } else if alt & FLAG_ALT2 != 0 {
                    inst::new("SM", vec![long, register(n)])
                } else {
                    inst::new("IWT", vec![register(n), op::imm(u32::from(bytes.word(1)), 4)])
                }
            }
        }
    }
}
