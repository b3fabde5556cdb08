//! 6502 disassembly

use crate::arch::mos6502::{operands, Mode, Mode::*};
use crate::arch::OpBytes;
use crate::ast::Instruction as inst;

/// Mnemonic and addressing mode of every 2A03 opcode.
pub static OPCODES: [(&str, Mode); 256] = [
    //$00
    ("BRK", Imp), ("ORA", IdxInd), ("KIL", Imp), ("SLO", IdxInd),
    ("NOP", Zp), ("ORA", Zp), ("ASL", Zp), ("SLO", Zp),
    ("PHP", Imp), ("ORA", Imm), ("ASL", Acc), ("ANC", Imm),
    ("NOP", Abs), ("ORA", Abs), ("ASL", Abs), ("SLO", Abs),
    //$10
    ("BPL", Rel), ("ORA", IndIdx), ("KIL", Imp), ("SLO", IndIdx),
    ("NOP", ZpX), ("ORA", ZpX), ("ASL", ZpX), ("SLO", ZpX),
    ("CLC", Imp), ("ORA", AbsY), ("NOP", Imp), ("SLO", AbsY),
    ("NOP", AbsX), ("ORA", AbsX), ("ASL", AbsX), ("SLO", AbsX),
    //$20
    ("JSR", AbsJmp), ("AND", IdxInd), ("KIL", Imp), ("RLA", IdxInd),
    ("BIT", Zp), ("AND", Zp), ("ROL", Zp), ("RLA", Zp),
    ("PLP", Imp), ("AND", Imm), ("ROL", Acc), ("ANC", Imm),
    ("BIT", Abs), ("AND", Abs), ("ROL", Abs), ("RLA", Abs),
    //$30
    ("BMI", Rel), ("AND", IndIdx), ("KIL", Imp), ("RLA", IndIdx),
    ("NOP", ZpX), ("AND", ZpX), ("ROL", ZpX), ("RLA", ZpX),
    ("SEC", Imp), ("AND", AbsY), ("NOP", Imp), ("RLA", AbsY),
    ("NOP", AbsX), ("AND", AbsX), ("ROL", AbsX), ("RLA", AbsX),
    //$40
    ("RTI", Imp), ("EOR", IdxInd), ("KIL", Imp), ("SRE", IdxInd),
    ("NOP", Zp), ("EOR", Zp), ("LSR", Zp), ("SRE", Zp),
    ("PHA", Imp), ("EOR", Imm), ("LSR", Acc), ("ALR", Imm),
    ("JMP", AbsJmp), ("EOR", Abs), ("LSR", Abs), ("SRE", Abs),
    //$50
    ("BVC", Rel), ("EOR", IndIdx), ("KIL", Imp), ("SRE", IndIdx),
    ("NOP", ZpX), ("EOR", ZpX), ("LSR", ZpX), ("SRE", ZpX),
    ("CLI", Imp), ("EOR", AbsY), ("NOP", Imp), ("SRE", AbsY),
    ("NOP", AbsX), ("EOR", AbsX), ("LSR", AbsX), ("SRE", AbsX),
    //$60
    ("RTS", Imp), ("ADC", IdxInd), ("KIL", Imp), ("RRA", IdxInd),
    ("NOP", Zp), ("ADC", Zp), ("ROR", Zp), ("RRA", Zp),
    ("PLA", Imp), ("ADC", Imm), ("ROR", Acc), ("ARR", Imm),
    ("JMP", Ind), ("ADC", Abs), ("ROR", Abs), ("RRA", Abs),
    //$70
    ("BVS", Rel), ("ADC", IndIdx), ("KIL", Imp), ("RRA", IndIdx),
    ("NOP", ZpX), ("ADC", ZpX), ("ROR", ZpX), ("RRA", ZpX),
    ("SEI", Imp), ("ADC", AbsY), ("NOP", Imp), ("RRA", AbsY),
    ("NOP", AbsX), ("ADC", AbsX), ("ROR", AbsX), ("RRA", AbsX),
    //$80
    ("NOP", Imm), ("STA", IdxInd), ("NOP", Imm), ("SAX", IdxInd),
    ("STY", Zp), ("STA", Zp), ("STX", Zp), ("SAX", Zp),
    ("DEY", Imp), ("NOP", Imm), ("TXA", Imp), ("XAA", Imm),
    ("STY", Abs), ("STA", Abs), ("STX", Abs), ("SAX", Abs),
    //$90
    ("BCC", Rel), ("STA", IndIdx), ("KIL", Imp), ("SHA", IndIdx),
    ("STY", ZpX), ("STA", ZpX), ("STX", ZpY), ("SAX", ZpY),
    ("TYA", Imp), ("STA", AbsY), ("TXS", Imp), ("TAS", AbsY),
    ("SHY", AbsX), ("STA", AbsX), ("SHX", AbsY), ("SHA", AbsY),
    //$A0
    ("LDY", Imm), ("LDA", IdxInd), ("LDX", Imm), ("LAX", IdxInd),
    ("LDY", Zp), ("LDA", Zp), ("LDX", Zp), ("LAX", Zp),
    ("TAY", Imp), ("LDA", Imm), ("TAX", Imp), ("LAX", Imm),
    ("LDY", Abs), ("LDA", Abs), ("LDX", Abs), ("LAX", Abs),
    //$B0
    ("BCS", Rel), ("LDA", IndIdx), ("KIL", Imp), ("LAX", IndIdx),
    ("LDY", ZpX), ("LDA", ZpX), ("LDX", ZpY), ("LAX", ZpY),
    ("CLV", Imp), ("LDA", AbsY), ("TSX", Imp), ("LAS", AbsY),
    ("LDY", AbsX), ("LDA", AbsX), ("LDX", AbsY), ("LAX", AbsY),
    //$C0
    ("CPY", Imm), ("CMP", IdxInd), ("NOP", Imm), ("DCP", IdxInd),
    ("CPY", Zp), ("CMP", Zp), ("DEC", Zp), ("DCP", Zp),
    ("INY", Imp), ("CMP", Imm), ("DEX", Imp), ("AXS", Imm),
    ("CPY", Abs), ("CMP", Abs), ("DEC", Abs), ("DCP", Abs),
    //$D0
    ("BNE", Rel), ("CMP", IndIdx), ("KIL", Imp), ("DCP", IndIdx),
    ("NOP", ZpX), ("CMP", ZpX), ("DEC", ZpX), ("DCP", ZpX),
    ("CLD", Imp), ("CMP", AbsY), ("NOP", Imp), ("DCP", AbsY),
    ("NOP", AbsX), ("CMP", AbsX), ("DEC", AbsX), ("DCP", AbsX),
    //$E0
    ("CPX", Imm), ("SBC", IdxInd), ("NOP", Imm), ("ISC", IdxInd),
    ("CPX", Zp), ("SBC", Zp), ("INC", Zp), ("ISC", Zp),
    ("INX", Imp), ("SBC", Imm), ("NOP", Imp), ("SBC", Imm),
    ("CPX", Abs), ("SBC", Abs), ("INC", Abs), ("ISC", Abs),
    //$F0
    ("BEQ", Rel), ("SBC", IndIdx), ("KIL", Imp), ("ISC", IndIdx),
    ("NOP", ZpX), ("SBC", ZpX), ("INC", ZpX), ("ISC", ZpX),
    ("SED", Imp), ("SBC", AbsY), ("NOP", Imp), ("ISC", AbsY),
    ("NOP", AbsX), ("SBC", AbsX), ("INC", AbsX), ("ISC", AbsX),
];

pub fn disassemble(bytes: OpBytes<'_>, address: u32) -> inst {
    let (mnemonic, mode) = OPCODES[usize::from(bytes.opcode())];

    inst::new(mnemonic, operands(mode, bytes, address, 0))
}
