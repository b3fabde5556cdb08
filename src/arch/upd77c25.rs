//! NEC uPD7725 / uPD96050 DSP architecture
//!
//! Every instruction is one 24-bit word, stored little-endian. The top two
//! bits pick one of four formats:
//!
//!  * `OP`: ALU operation, register move and pointer updates in parallel
//!  * `RT`: the same as `OP`, followed by a return
//!  * `JP`: jumps, calls and conditional branches
//!  * `LD`: load a 16-bit immediate into a register
//!
//! The program counter counts words, while listings address bytes. Jump
//! targets are therefore scaled by three into byte addresses.

use crate::analysis::{EffectiveAddressInfo, Result};
use crate::arch::{ArchName, DecodeStrategy, OpBytes};
use crate::ast::Instruction as inst;
use crate::ast::Operand as op;
use crate::memory::MemoryPort;
use crate::reg::CpuState;

const ALU: [&str; 16] = [
    "NOP", "OR", "AND", "XOR", "SUB", "ADD", "SBB", "ADC", "DEC", "INC", "CMP", "SHR1", "SHL1",
    "SHL2", "SHL4", "XCHG",
];

const PSELECT: [&str; 4] = ["RAM", "IDB", "M", "N"];

const SRC: [&str; 16] = [
    "TRB", "A", "B", "TR", "DP", "RP", "RO", "SGN", "DR", "DRNF", "SR", "SIM", "SIL", "K", "L",
    "MEM",
];

const DST: [&str; 16] = [
    "@NON", "@A", "@B", "@TR", "@DP", "@RP", "@DR", "@SR", "@SOL", "@SOM", "@K", "@KLR", "@KLM",
    "@L", "@TRB", "@MEM",
];

const DPL: [&str; 4] = ["", "DPINC", "DPDEC", "DPCLR"];

const KIND_OP: u32 = 0;
const KIND_RT: u32 = 1;
const KIND_JP: u32 = 2;

/// Branch conditions that always jump.
const UNCONDITIONAL: [u32; 5] = [0x000, 0x100, 0x101, 0x140, 0x141];

fn word(op: OpBytes<'_>) -> u32 {
    op.long(0)
}

fn kind(word: u32) -> u32 {
    word >> 22
}

fn brch(word: u32) -> u32 {
    (word >> 13) & 0x1FF
}

/// Word address a `JP` instruction names.
fn next_address(word: u32) -> u32 {
    let na = ((word >> 2) & 0x7FF) | ((word & 0x3) << 11);

    match brch(word) {
        0x101 | 0x141 => na | 0x2000,
        _ => na,
    }
}

fn jump_name(brch: u32) -> Option<&'static str> {
    let name = match brch {
        0x000 => "JMPSO",
        0x080 => "JNCA",
        0x082 => "JCA",
        0x084 => "JNCB",
        0x086 => "JCB",
        0x088 => "JNZA",
        0x08A => "JZA",
        0x08C => "JNZB",
        0x08E => "JZB",
        0x090 => "JNOVA0",
        0x092 => "JOVA0",
        0x094 => "JNOVB0",
        0x096 => "JOVB0",
        0x098 => "JNOVA1",
        0x09A => "JOVA1",
        0x09C => "JNOVB1",
        0x09E => "JOVB1",
        0x0A0 => "JNSA0",
        0x0A2 => "JSA0",
        0x0A4 => "JNSB0",
        0x0A6 => "JSB0",
        0x0A8 => "JNSA1",
        0x0AA => "JSA1",
        0x0AC => "JNSB1",
        0x0AE => "JSB1",
        0x0B0 => "JDPL0",
        0x0B1 => "JDPLN0",
        0x0B2 => "JDPLF",
        0x0B3 => "JDPLNF",
        0x0B4 => "JNSIAK",
        0x0B6 => "JSIAK",
        0x0B8 => "JNSOAK",
        0x0BA => "JSOAK",
        0x0BC => "JNRQM",
        0x0BE => "JRQM",
        0x100 => "LJMP",
        0x101 => "HJMP",
        0x140 => "LCALL",
        0x141 => "HCALL",
        _ => return None,
    };

    Some(name)
}

/// Operands of the `OP` and `RT` formats, one per field that does anything.
fn alu_fields(word: u32) -> Vec<op> {
    let mut fields = Vec::new();
    let alu = (word >> 16) & 0xF;
    let src = (word >> 4) & 0xF;
    let dst = word & 0xF;
    let dpl = (word >> 13) & 0x3;
    let dphm = (word >> 9) & 0xF;

    if alu != 0 {
        let acc = if word & 0x8000 != 0 { "B" } else { "A" };
        let pselect = PSELECT[((word >> 20) & 0x3) as usize];

        fields.push(op::sym(&format!("{} {},{}", ALU[alu as usize], acc, pselect)));
    }

    if src != 0 || dst != 0 {
        fields.push(op::sym(&format!("MOV {},{}", SRC[src as usize], DST[dst as usize])));
    }

    if dpl != 0 {
        fields.push(op::sym(DPL[dpl as usize]));
    }

    if dphm != 0 {
        fields.push(op::concat(vec![op::sym("M"), op::int(dphm, 1)]));
    }

    if word & 0x100 != 0 {
        fields.push(op::sym("RPDEC"));
    }

    fields
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Upd77c25;

impl DecodeStrategy for Upd77c25 {
    fn name(&self) -> &'static str {
        "uPD7725"
    }

    fn operand_length(&self, _opcode: u8, _flags: u8) -> u8 {
        3
    }

    fn is_jump_to_sub(&self, op: OpBytes<'_>) -> bool {
        let w = word(op);

        kind(w) == KIND_JP && matches!(brch(w), 0x140 | 0x141)
    }

    fn is_return(&self, op: OpBytes<'_>) -> bool {
        kind(word(op)) == KIND_RT
    }

    fn is_unconditional_jump(&self, op: OpBytes<'_>) -> bool {
        let w = word(op);

        match kind(w) {
            KIND_RT => true,
            KIND_JP => UNCONDITIONAL.contains(&brch(w)),
            _ => false,
        }
    }

    fn is_conditional_jump(&self, op: OpBytes<'_>) -> bool {
        let w = word(op);

        kind(w) == KIND_JP && !UNCONDITIONAL.contains(&brch(w))
    }

    /// The DSP's data memory is internal and its pointers are not exposed
    /// as bus addresses, so no instruction reports one.
    fn effective_address(
        &self,
        _op: OpBytes<'_>,
        _arch: ArchName,
        _state: &CpuState,
        _port: &dyn MemoryPort,
    ) -> Result<EffectiveAddressInfo> {
        Ok(EffectiveAddressInfo::none())
    }

    fn disassemble(&self, bytes: OpBytes<'_>, _address: u32) -> inst {
        let w = word(bytes);

        match kind(w) {
            KIND_OP | KIND_RT => {
                let fields = alu_fields(w);

                if kind(w) == KIND_RT {
                    inst::new("RT", fields)
                } else if fields.is_empty() {
                    inst::new("NOP", fields)
                } else {
                    inst::new("OP", fields)
                }
            }
            KIND_JP => {
                let target = op::cptr(next_address(w) * 3, 4);

                match jump_name(brch(w)) {
                    Some("JMPSO") => inst::new("JMPSO", vec![]),
                    Some(name) => inst::new(name, vec![target]),
                    None => inst::new("JP", vec![op::imm(brch(w), 3), target]),
                }
            }
            _ => inst::new(
                "LD",
                vec![
                    op::imm((w >> 6) & 0xFFFF, 4),
                    op::sym(DST[(w & 0xF) as usize]),
                ],
            ),
        }
    }
}
