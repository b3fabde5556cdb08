//! Hitachi HG51B architecture, the processor inside the Cx4 coprocessor.
//!
//! Instructions are one 16-bit little-endian word. The high byte holds the
//! operation in its upper six bits and a two-bit selector in the low bits;
//! the low byte is an immediate, register number or jump target.
//!
//! Program memory is cached in 512-byte pages of 256 instructions. Near
//! jumps stay within the current page; far jumps go to the page held in P.

use crate::analysis::{EffectiveAddressInfo, Error, Result};
use crate::arch::{ArchName, DecodeStrategy, OpBytes};
use crate::ast::Instruction as inst;
use crate::ast::Operand as op;
use crate::memory::MemoryPort;
use crate::reg::CpuState;

/// Targets of the `LD` and `ST` transfer forms, by selector.
const TRANSFER: [&str; 4] = ["A", "MDR", "MAR", "P"];

/// Flags tested by `SKIP`, by selector.
const SKIP_FLAGS: [&str; 4] = ["V", "C", "Z", "N"];

fn class(op: OpBytes<'_>) -> u8 {
    op.byte(1) & 0xFC
}

fn selector(op: OpBytes<'_>) -> usize {
    usize::from(op.byte(1) & 0x03)
}

fn register(index: u8) -> op {
    match index {
        0x00 => op::sym("A"),
        0x01 => op::sym("MULH"),
        0x02 => op::sym("MULL"),
        0x03 => op::sym("MDR"),
        0x08 => op::sym("ROM"),
        0x0C => op::sym("RAM"),
        0x13 => op::sym("MAR"),
        0x1C => op::sym("DPR"),
        0x20 => op::sym("PC"),
        0x28 => op::sym("P"),
        0x60..=0x6F => op::sym(&format!("R{}", index & 0x0F)),
        _ => op::int(u32::from(index), 2),
    }
}

fn jump_target(bytes: OpBytes<'_>, address: u32) -> op {
    if bytes.byte(1) & 0x01 != 0 {
        op::concat(vec![op::sym("P:"), op::int(u32::from(bytes.byte(0)), 2)])
    } else {
        op::cptr((address & 0xFF_FE00) | (u32::from(bytes.byte(0)) << 1), 6)
    }
}

fn alu_name(class: u8) -> Option<&'static str> {
    let name = match class & 0xF8 {
        0x80 => "ADD",
        0x88 => "SUB",
        0x98 => "MUL",
        0xA8 => "XOR",
        0xB0 => "AND",
        0xB8 => "OR",
        0xC0 => "SHR",
        0xC8 => "ASR",
        0xD0 => "ROR",
        0xD8 => "SHL",
        _ => return None,
    };

    Some(name)
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Hg51b;

impl DecodeStrategy for Hg51b {
    fn name(&self) -> &'static str {
        "HG51B"
    }

    fn operand_length(&self, _opcode: u8, _flags: u8) -> u8 {
        2
    }

    fn is_jump_to_sub(&self, op: OpBytes<'_>) -> bool {
        matches!(class(op), 0x28 | 0x2C | 0x30 | 0x34 | 0x38)
    }

    fn is_return(&self, op: OpBytes<'_>) -> bool {
        class(op) == 0x3C
    }

    fn is_unconditional_jump(&self, op: OpBytes<'_>) -> bool {
        matches!(class(op), 0x08 | 0x28 | 0x3C)
    }

    fn is_conditional_jump(&self, op: OpBytes<'_>) -> bool {
        matches!(
            class(op),
            0x0C | 0x10 | 0x14 | 0x18 | 0x24 | 0x2C | 0x30 | 0x34 | 0x38
        )
    }

    fn can_continue(&self, op: OpBytes<'_>) -> bool {
        class(op) != 0xFC
    }

    fn effective_address(
        &self,
        op: OpBytes<'_>,
        _arch: ArchName,
        state: &CpuState,
        _port: &dyn MemoryPort,
    ) -> Result<EffectiveAddressInfo> {
        let cpu = match state {
            CpuState::Cx4(cpu) => cpu,
            other => return Err(Error::state_mismatch(self.name(), other)),
        };

        let dpr = u32::from(cpu.dpr);
        let info = match class(op) {
            0x40 => EffectiveAddressInfo::new(cpu.mar & 0xFF_FFFF, 1),
            0x68 | 0xE8 => EffectiveAddressInfo::new(dpr.wrapping_add(cpu.a) & 0xFFF, 1),
            0x6C | 0xEC => {
                EffectiveAddressInfo::new(dpr.wrapping_add(u32::from(op.byte(0))) & 0xFFF, 1)
            }
            _ => EffectiveAddressInfo::none(),
        };

        Ok(info)
    }

    fn disassemble(&self, bytes: OpBytes<'_>, address: u32) -> inst {
        let param = bytes.byte(0);
        let imm = op::imm(u32::from(param), 2);
        let sel = selector(bytes);
        let class = class(bytes);

        match class {
            0x00 => inst::new("NOP", vec![]),
            0x08 => inst::new("JMP", vec![jump_target(bytes, address)]),
            0x0C => inst::new("JEQ", vec![jump_target(bytes, address)]),
            0x10 => inst::new("JGE", vec![jump_target(bytes, address)]),
            0x14 => inst::new("JMI", vec![jump_target(bytes, address)]),
            0x18 => inst::new("JVS", vec![jump_target(bytes, address)]),
            0x1C => inst::new("WAIT", vec![]),
            0x24 => {
                let sense = if param & 0x01 != 0 { "" } else { "N" };

                inst::new("SKIP", vec![op::sym(&format!("{}{}", sense, SKIP_FLAGS[sel]))])
            }
            0x28 => inst::new("CALL", vec![jump_target(bytes, address)]),
            0x2C => inst::new("CEQ", vec![jump_target(bytes, address)]),
            0x30 => inst::new("CGE", vec![jump_target(bytes, address)]),
            0x34 => inst::new("CMI", vec![jump_target(bytes, address)]),
            0x38 => inst::new("CVS", vec![jump_target(bytes, address)]),
            0x3C => inst::new("RET", vec![]),
            0x40 => inst::new("RDBUS", vec![]),
            0x48 => inst::new("CMPR", vec![op::sym("A"), register(param)]),
            0x4C => inst::new("CMPR", vec![op::sym("A"), imm]),
            0x50 => inst::new("CMP", vec![op::sym("A"), register(param)]),
            0x54 => inst::new("CMP", vec![op::sym("A"), imm]),
            0x58 if sel == 2 => inst::new("SXW", vec![]),
            0x58 => inst::new("SXB", vec![]),
            0x60 => inst::new("LD", vec![op::sym(TRANSFER[sel]), register(param)]),
            0x68 => inst::new("RDRAM", vec![op::dec(sel as i64), op::sym("A")]),
            0x6C => inst::new("RDRAM", vec![op::dec(sel as i64), imm]),
            0x70 => inst::new("RDROM", vec![op::wrap("(", vec![op::sym("A")], ")")]),
            0x74 => inst::new(
                "RDROM",
                vec![op::imm(((sel as u32) << 8) | u32::from(param), 3)],
            ),
            0x7C => {
                let half = if sel & 1 != 0 { "PH" } else { "PL" };

                inst::new("LD", vec![op::sym(half), imm])
            }
            0xE0 => inst::new("ST", vec![op::sym(TRANSFER[sel]), register(param)]),
            0xE8 => inst::new("WRRAM", vec![op::dec(sel as i64), op::sym("A")]),
            0xEC => inst::new("WRRAM", vec![op::dec(sel as i64), imm]),
            0xF0 => inst::new("SWAP", vec![op::sym("A"), register(param)]),
            0xF8 => inst::new("CLEAR", vec![]),
            0xFC => inst::new("HALT", vec![]),
            _ => match alu_name(class) {
                Some(name) if class & 0x04 != 0 => inst::new(name, vec![op::sym("A"), imm]),
                Some(name) => inst::new(name, vec![op::sym("A"), register(param)]),
                None => inst::new(".dw", vec![op::int(u32::from(bytes.word(0)), 4)]),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::analysis::{EffectiveAddressInfo, Error, InstructionRecord};
    use crate::arch::ArchName;
    use crate::asm::Renderer;
    use crate::memory::BinaryImage;
    use crate::reg::{CpuState, Cx4State, SpcState};

    macro_rules! assert_hg51b {
        ($data: expr, $text: expr) => {
            assert_eq!(
                InstructionRecord::from_bytes(ArchName::Cx4, 0, &$data)
                    .unwrap()
                    .render(0x02_8200, &Renderer::default())
                    .unwrap(),
                $text
            )
        };
    }

    fn record(data: &[u8]) -> InstructionRecord {
        InstructionRecord::from_bytes(ArchName::Cx4, 0, data).unwrap()
    }

    #[test]
    fn hg51b_disasm() {
        assert_hg51b!([0x00, 0x00], "NOP");
        assert_hg51b!([0x10, 0x08], "JMP $028220");
        assert_hg51b!([0x10, 0x09], "JMP P:$10");
        assert_hg51b!([0x04, 0x28], "CALL $028208");
        assert_hg51b!([0x00, 0x3C], "RET");
        assert_hg51b!([0x01, 0x26], "SKIP Z");
        assert_hg51b!([0x00, 0x25], "SKIP NC");
        assert_hg51b!([0x63, 0x60], "LD A, R3");
        assert_hg51b!([0x1C, 0x61], "LD MDR, DPR");
        assert_hg51b!([0x12, 0x84], "ADD A, #$12");
        assert_hg51b!([0x65, 0x80], "ADD A, R5");
        assert_hg51b!([0x01, 0xDC], "SHL A, #$01");
        assert_hg51b!([0x00, 0x70], "RDROM (A)");
        assert_hg51b!([0x34, 0x76], "RDROM #$234");
        assert_hg51b!([0x7F, 0x7D], "LD PH, #$7F");
        assert_hg51b!([0x20, 0xED], "WRRAM 1, #$20");
        assert_hg51b!([0x00, 0xFC], "HALT");
        assert_hg51b!([0xAA, 0x04], ".dw $04AA");
    }

    #[test]
    fn hg51b_classification() {
        let call = record(&[0x04, 0x28]);
        assert!(call.is_jump_to_sub().unwrap());
        assert!(call.is_unconditional_jump().unwrap());

        let conditional_call = record(&[0x04, 0x2C]);
        assert!(conditional_call.is_jump_to_sub().unwrap());
        assert!(conditional_call.is_conditional_jump().unwrap());
        assert!(conditional_call.can_continue().unwrap());

        assert!(record(&[0x00, 0x3C]).is_return().unwrap());
        assert!(record(&[0x01, 0x24]).is_conditional_jump().unwrap());
        assert!(!record(&[0x00, 0xFC]).can_continue().unwrap());
        assert!(!record(&[0x00, 0x00]).is_jump().unwrap());
    }

    #[test]
    fn hg51b_effective_address() {
        let image = BinaryImage::default();
        let state = CpuState::Cx4(Cx4State {
            a: 0x20,
            mar: 0x12_3456,
            dpr: 0x0FF0,
            ..Default::default()
        });
        let ea = |data: &[u8]| record(data).effective_address(&state, &image).unwrap();

        assert_eq!(ea(&[0x00, 0x40]), EffectiveAddressInfo::new(0x12_3456, 1));
        assert_eq!(ea(&[0x00, 0x68]), EffectiveAddressInfo::new(0x010, 1));
        assert_eq!(ea(&[0x08, 0xEC]), EffectiveAddressInfo::new(0xFF8, 1));
        assert_eq!(ea(&[0x00, 0x08]), EffectiveAddressInfo::none());

        assert!(matches!(
            record(&[0x00, 0x40]).effective_address(&CpuState::Spc(SpcState::default()), &image),
            Err(Error::StateMismatch { .. })
        ));
    }
}
