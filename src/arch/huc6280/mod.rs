//! HuC6280 architecture, the CPU of the PC Engine.
//!
//! A 65C02 with an on-chip MMU and a handful of extra instructions: block
//! transfers, `TST`, immediate stores to the video chip (`ST0`-`ST2`), and
//! the `TAM`/`TMA` pair that programs the memory paging registers.
//!
//! The zero page and stack live at logical $2000 and $2100 rather than at
//! $0000. Effective addresses are reported as logical addresses; mapping
//! them through the paging registers is left to the memory port.

use crate::analysis::{EffectiveAddressInfo, Error, Result};
use crate::arch::mos6502::{self, Mode, Mode::*};
use crate::arch::{ArchName, DecodeStrategy, OpBytes};
use crate::ast::Instruction;
use crate::memory::{MemoryPort, MemoryType};
use crate::reg::CpuState;

/// Logical address of the zero page.
pub const ZERO_PAGE: u32 = 0x2000;

/// Mnemonic and addressing mode of every HuC6280 opcode.
pub static OPCODES: [(&str, Mode); 256] = [
    //$00
    ("BRK", Imp), ("ORA", IdxInd), ("SXY", Imp), ("ST0", Imm),
    ("TSB", Zp), ("ORA", Zp), ("ASL", Zp), ("RMB0", Zp),
    ("PHP", Imp), ("ORA", Imm), ("ASL", Acc), ("NOP", Imp),
    ("TSB", Abs), ("ORA", Abs), ("ASL", Abs), ("BBR0", ZpRel),
    //$10
    ("BPL", Rel), ("ORA", IndIdx), ("ORA", ZpInd), ("ST1", Imm),
    ("TRB", Zp), ("ORA", ZpX), ("ASL", ZpX), ("RMB1", Zp),
    ("CLC", Imp), ("ORA", AbsY), ("INC", Acc), ("NOP", Imp),
    ("TRB", Abs), ("ORA", AbsX), ("ASL", AbsX), ("BBR1", ZpRel),
    //$20
    ("JSR", AbsJmp), ("AND", IdxInd), ("SAX", Imp), ("ST2", Imm),
    ("BIT", Zp), ("AND", Zp), ("ROL", Zp), ("RMB2", Zp),
    ("PLP", Imp), ("AND", Imm), ("ROL", Acc), ("NOP", Imp),
    ("BIT", Abs), ("AND", Abs), ("ROL", Abs), ("BBR2", ZpRel),
    //$30
    ("BMI", Rel), ("AND", IndIdx), ("AND", ZpInd), ("NOP", Imp),
    ("BIT", ZpX), ("AND", ZpX), ("ROL", ZpX), ("RMB3", Zp),
    ("SEC", Imp), ("AND", AbsY), ("DEC", Acc), ("NOP", Imp),
    ("BIT", AbsX), ("AND", AbsX), ("ROL", AbsX), ("BBR3", ZpRel),
    //$40
    ("RTI", Imp), ("EOR", IdxInd), ("SAY", Imp), ("TMA", Imm),
    ("BSR", Rel), ("EOR", Zp), ("LSR", Zp), ("RMB4", Zp),
    ("PHA", Imp), ("EOR", Imm), ("LSR", Acc), ("NOP", Imp),
    ("JMP", AbsJmp), ("EOR", Abs), ("LSR", Abs), ("BBR4", ZpRel),
    //$50
    ("BVC", Rel), ("EOR", IndIdx), ("EOR", ZpInd), ("TAM", Imm),
    ("CSL", Imp), ("EOR", ZpX), ("LSR", ZpX), ("RMB5", Zp),
    ("CLI", Imp), ("EOR", AbsY), ("PHY", Imp), ("NOP", Imp),
    ("NOP", Imp), ("EOR", AbsX), ("LSR", AbsX), ("BBR5", ZpRel),
    //$60
    ("RTS", Imp), ("ADC", IdxInd), ("CLA", Imp), ("NOP", Imp),
    ("STZ", Zp), ("ADC", Zp), ("ROR", Zp), ("RMB6", Zp),
    ("PLA", Imp), ("ADC", Imm), ("ROR", Acc), ("NOP", Imp),
    ("JMP", Ind), ("ADC", Abs), ("ROR", Abs), ("BBR6", ZpRel),
    //$70
    ("BVS", Rel), ("ADC", IndIdx), ("ADC", ZpInd), ("TII", Block),
    ("STZ", ZpX), ("ADC", ZpX), ("ROR", ZpX), ("RMB7", Zp),
    ("SEI", Imp), ("ADC", AbsY), ("PLY", Imp), ("NOP", Imp),
    ("JMP", AbsIdxInd), ("ADC", AbsX), ("ROR", AbsX), ("BBR7", ZpRel),
    //$80
    ("BRA", Rel), ("STA", IdxInd), ("CLX", Imp), ("TST", ImmZp),
    ("STY", Zp), ("STA", Zp), ("STX", Zp), ("SMB0", Zp),
    ("DEY", Imp), ("BIT", Imm), ("TXA", Imp), ("NOP", Imp),
    ("STY", Abs), ("STA", Abs), ("STX", Abs), ("BBS0", ZpRel),
    //$90
    ("BCC", Rel), ("STA", IndIdx), ("STA", ZpInd), ("TST", ImmAbs),
    ("STY", ZpX), ("STA", ZpX), ("STX", ZpY), ("SMB1", Zp),
    ("TYA", Imp), ("STA", AbsY), ("TXS", Imp), ("NOP", Imp),
    ("STZ", Abs), ("STA", AbsX), ("STZ", AbsX), ("BBS1", ZpRel),
    //$A0
    ("LDY", Imm), ("LDA", IdxInd), ("LDX", Imm), ("TST", ImmZpX),
    ("LDY", Zp), ("LDA", Zp), ("LDX", Zp), ("SMB2", Zp),
    ("TAY", Imp), ("LDA", Imm), ("TAX", Imp), ("NOP", Imp),
    ("LDY", Abs), ("LDA", Abs), ("LDX", Abs), ("BBS2", ZpRel),
    //$B0
    ("BCS", Rel), ("LDA", IndIdx), ("LDA", ZpInd), ("TST", ImmAbsX),
    ("LDY", ZpX), ("LDA", ZpX), ("LDX", ZpY), ("SMB3", Zp),
    ("CLV", Imp), ("LDA", AbsY), ("TSX", Imp), ("NOP", Imp),
    ("LDY", AbsX), ("LDA", AbsX), ("LDX", AbsY), ("BBS3", ZpRel),
    //$C0
    ("CPY", Imm), ("CMP", IdxInd), ("CLY", Imp), ("TDD", Block),
    ("CPY", Zp), ("CMP", Zp), ("DEC", Zp), ("SMB4", Zp),
    ("INY", Imp), ("CMP", Imm), ("DEX", Imp), ("NOP", Imp),
    ("CPY", Abs), ("CMP", Abs), ("DEC", Abs), ("BBS4", ZpRel),
    //$D0
    ("BNE", Rel), ("CMP", IndIdx), ("CMP", ZpInd), ("TIN", Block),
    ("CSH", Imp), ("CMP", ZpX), ("DEC", ZpX), ("SMB5", Zp),
    ("CLD", Imp), ("CMP", AbsY), ("PHX", Imp), ("NOP", Imp),
    ("NOP", Imp), ("CMP", AbsX), ("DEC", AbsX), ("BBS5", ZpRel),
    //$E0
    ("CPX", Imm), ("SBC", IdxInd), ("NOP", Imp), ("TIA", Block),
    ("CPX", Zp), ("SBC", Zp), ("INC", Zp), ("SMB6", Zp),
    ("INX", Imp), ("SBC", Imm), ("NOP", Imp), ("NOP", Imp),
    ("CPX", Abs), ("SBC", Abs), ("INC", Abs), ("BBS6", ZpRel),
    //$F0
    ("BEQ", Rel), ("SBC", IndIdx), ("SBC", ZpInd), ("TAI", Block),
    ("SET", Imp), ("SBC", ZpX), ("INC", ZpX), ("SMB7", Zp),
    ("SED", Imp), ("SBC", AbsY), ("PLX", Imp), ("NOP", Imp),
    ("NOP", Imp), ("SBC", AbsX), ("INC", AbsX), ("BBS7", ZpRel),
];

#[derive(Copy, Clone, Debug, Default)]
pub struct HuC6280;

impl DecodeStrategy for HuC6280 {
    fn name(&self) -> &'static str {
        "HuC6280"
    }

    fn operand_length(&self, opcode: u8, _flags: u8) -> u8 {
        1 + OPCODES[usize::from(opcode)].1.operand_bytes()
    }

    fn is_jump_to_sub(&self, op: OpBytes<'_>) -> bool {
        matches!(op.opcode(), 0x20 | 0x44)
    }

    fn is_return(&self, op: OpBytes<'_>) -> bool {
        matches!(op.opcode(), 0x60 | 0x40)
    }

    fn is_unconditional_jump(&self, op: OpBytes<'_>) -> bool {
        matches!(
            op.opcode(),
            0x00 | 0x20 | 0x40 | 0x44 | 0x4C | 0x60 | 0x6C | 0x7C | 0x80
        )
    }

    /// The eight flag branches, plus `BBRn`/`BBSn`.
    fn is_conditional_jump(&self, op: OpBytes<'_>) -> bool {
        matches!(
            op.opcode(),
            0x10 | 0x30 | 0x50 | 0x70 | 0x90 | 0xB0 | 0xD0 | 0xF0
        ) || op.opcode() & 0x0F == 0x0F
    }

    fn effective_address(
        &self,
        op: OpBytes<'_>,
        arch: ArchName,
        state: &CpuState,
        port: &dyn MemoryPort,
    ) -> Result<EffectiveAddressInfo> {
        let cpu = match state {
            CpuState::Pce(cpu) => cpu,
            other => return Err(Error::state_mismatch(self.name(), other)),
        };

        let (mnemonic, mode) = OPCODES[usize::from(op.opcode())];
        let regs = mos6502::Registers {
            x: cpu.x,
            y: cpu.y,
            sp: cpu.sp,
        };

        Ok(mos6502::effective_address(
            mnemonic,
            mode,
            op,
            regs,
            ZERO_PAGE,
            MemoryType::CpuBus(arch),
            port,
        ))
    }

    fn disassemble(&self, op: OpBytes<'_>, address: u32) -> Instruction {
        let (mnemonic, mode) = OPCODES[usize::from(op.opcode())];

        Instruction::new(mnemonic, mos6502::operands(mode, op, address, ZERO_PAGE))
    }
}

#[cfg(test)]
mod tests;
