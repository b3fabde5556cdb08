//! 65C816 disassembly

use crate::arch::w65c816::Mode;
use crate::arch::w65c816::Mode::*;
use crate::arch::OpBytes;
use crate::ast::Instruction as inst;
use crate::ast::Operand as op;

/// Mnemonic and addressing mode of every 65C816 opcode.
pub static OPCODES: [(&str, Mode); 256] = [
    //$00
    ("BRK", Sig8), ("ORA", DirIdxIndX), ("COP", Sig8), ("ORA", StkRel),
    ("TSB", Dir), ("ORA", Dir), ("ASL", Dir), ("ORA", DirIndLng),
    ("PHP", Imp), ("ORA", ImmM), ("ASL", Acc), ("PHD", Imp),
    ("TSB", Abs), ("ORA", Abs), ("ASL", Abs), ("ORA", AbsLng),
    //$10
    ("BPL", Rel), ("ORA", DirIndIdxY), ("ORA", DirInd), ("ORA", StkRelIndIdxY),
    ("TRB", Dir), ("ORA", DirIdxX), ("ASL", DirIdxX), ("ORA", DirIndLngIdxY),
    ("CLC", Imp), ("ORA", AbsIdxY), ("INC", Acc), ("TCS", Imp),
    ("TRB", Abs), ("ORA", AbsIdxX), ("ASL", AbsIdxX), ("ORA", AbsLngIdxX),
    //$20
    ("JSR", AbsJmp), ("AND", DirIdxIndX), ("JSL", AbsLngJmp), ("AND", StkRel),
    ("BIT", Dir), ("AND", Dir), ("ROL", Dir), ("AND", DirIndLng),
    ("PLP", Imp), ("AND", ImmM), ("ROL", Acc), ("PLD", Imp),
    ("BIT", Abs), ("AND", Abs), ("ROL", Abs), ("AND", AbsLng),
    //$30
    ("BMI", Rel), ("AND", DirIndIdxY), ("AND", DirInd), ("AND", StkRelIndIdxY),
    ("BIT", DirIdxX), ("AND", DirIdxX), ("ROL", DirIdxX), ("AND", DirIndLngIdxY),
    ("SEC", Imp), ("AND", AbsIdxY), ("DEC", Acc), ("TSC", Imp),
    ("BIT", AbsIdxX), ("AND", AbsIdxX), ("ROL", AbsIdxX), ("AND", AbsLngIdxX),
    //$40
    ("RTI", Imp), ("EOR", DirIdxIndX), ("WDM", Sig8), ("EOR", StkRel),
    ("MVP", BlkMov), ("EOR", Dir), ("LSR", Dir), ("EOR", DirIndLng),
    ("PHA", Imp), ("EOR", ImmM), ("LSR", Acc), ("PHK", Imp),
    ("JMP", AbsJmp), ("EOR", Abs), ("LSR", Abs), ("EOR", AbsLng),
    //$50
    ("BVC", Rel), ("EOR", DirIndIdxY), ("EOR", DirInd), ("EOR", StkRelIndIdxY),
    ("MVN", BlkMov), ("EOR", DirIdxX), ("LSR", DirIdxX), ("EOR", DirIndLngIdxY),
    ("CLI", Imp), ("EOR", AbsIdxY), ("PHY", Imp), ("TCD", Imp),
    ("JML", AbsLngJmp), ("EOR", AbsIdxX), ("LSR", AbsIdxX), ("EOR", AbsLngIdxX),
    //$60
    ("RTS", Imp), ("ADC", DirIdxIndX), ("PER", RelLng), ("ADC", StkRel),
    ("STZ", Dir), ("ADC", Dir), ("ROR", Dir), ("ADC", DirIndLng),
    ("PLA", Imp), ("ADC", ImmM), ("ROR", Acc), ("RTL", Imp),
    ("JMP", AbsInd), ("ADC", Abs), ("ROR", Abs), ("ADC", AbsLng),
    //$70
    ("BVS", Rel), ("ADC", DirIndIdxY), ("ADC", DirInd), ("ADC", StkRelIndIdxY),
    ("STZ", DirIdxX), ("ADC", DirIdxX), ("ROR", DirIdxX), ("ADC", DirIndLngIdxY),
    ("SEI", Imp), ("ADC", AbsIdxY), ("PLY", Imp), ("TDC", Imp),
    ("JMP", AbsIdxXInd), ("ADC", AbsIdxX), ("ROR", AbsIdxX), ("ADC", AbsLngIdxX),
    //$80
    ("BRA", Rel), ("STA", DirIdxIndX), ("BRL", RelLng), ("STA", StkRel),
    ("STY", Dir), ("STA", Dir), ("STX", Dir), ("STA", DirIndLng),
    ("DEY", Imp), ("BIT", ImmM), ("TXA", Imp), ("PHB", Imp),
    ("STY", Abs), ("STA", Abs), ("STX", Abs), ("STA", AbsLng),
    //$90
    ("BCC", Rel), ("STA", DirIndIdxY), ("STA", DirInd), ("STA", StkRelIndIdxY),
    ("STY", DirIdxX), ("STA", DirIdxX), ("STX", DirIdxY), ("STA", DirIndLngIdxY),
    ("TYA", Imp), ("STA", AbsIdxY), ("TXS", Imp), ("TXY", Imp),
    ("STZ", Abs), ("STA", AbsIdxX), ("STZ", AbsIdxX), ("STA", AbsLngIdxX),
    //$A0
    ("LDY", ImmX), ("LDA", DirIdxIndX), ("LDX", ImmX), ("LDA", StkRel),
    ("LDY", Dir), ("LDA", Dir), ("LDX", Dir), ("LDA", DirIndLng),
    ("TAY", Imp), ("LDA", ImmM), ("TAX", Imp), ("PLB", Imp),
    ("LDY", Abs), ("LDA", Abs), ("LDX", Abs), ("LDA", AbsLng),
    //$B0
    ("BCS", Rel), ("LDA", DirIndIdxY), ("LDA", DirInd), ("LDA", StkRelIndIdxY),
    ("LDY", DirIdxX), ("LDA", DirIdxX), ("LDX", DirIdxY), ("LDA", DirIndLngIdxY),
    ("CLV", Imp), ("LDA", AbsIdxY), ("TSX", Imp), ("TYX", Imp),
    ("LDY", AbsIdxX), ("LDA", AbsIdxX), ("LDX", AbsIdxY), ("LDA", AbsLngIdxX),
    //$C0
    ("CPY", ImmX), ("CMP", DirIdxIndX), ("REP", Imm8), ("CMP", StkRel),
    ("CPY", Dir), ("CMP", Dir), ("DEC", Dir), ("CMP", DirIndLng),
    ("INY", Imp), ("CMP", ImmM), ("DEX", Imp), ("WAI", Imp),
    ("CPY", Abs), ("CMP", Abs), ("DEC", Abs), ("CMP", AbsLng),
    //$D0
    ("BNE", Rel), ("CMP", DirIndIdxY), ("CMP", DirInd), ("CMP", StkRelIndIdxY),
    ("PEI", StkDirInd), ("CMP", DirIdxX), ("DEC", DirIdxX), ("CMP", DirIndLngIdxY),
    ("CLD", Imp), ("CMP", AbsIdxY), ("PHX", Imp), ("STP", Imp),
    ("JML", AbsIndLng), ("CMP", AbsIdxX), ("DEC", AbsIdxX), ("CMP", AbsLngIdxX),
    //$E0
    ("CPX", ImmX), ("SBC", DirIdxIndX), ("SEP", Imm8), ("SBC", StkRel),
    ("CPX", Dir), ("SBC", Dir), ("INC", Dir), ("SBC", DirIndLng),
    ("INX", Imp), ("SBC", ImmM), ("NOP", Imp), ("XBA", Imp),
    ("CPX", Abs), ("SBC", Abs), ("INC", Abs), ("SBC", AbsLng),
    //$F0
    ("BEQ", Rel), ("SBC", DirIndIdxY), ("SBC", DirInd), ("SBC", StkRelIndIdxY),
    ("PEA", StkAbs), ("SBC", DirIdxX), ("INC", DirIdxX), ("SBC", DirIndLngIdxY),
    ("SED", Imp), ("SBC", AbsIdxY), ("PLX", Imp), ("XCE", Imp),
    ("JSR", AbsIdxXInd), ("SBC", AbsIdxX), ("INC", AbsIdxX), ("SBC", AbsLngIdxX),
];

/// Branch targets stay within the program bank.
fn relative_target(address: u32, length: u32, offset: i32) -> u32 {
    let pc = (address as i32).wrapping_add(length as i32).wrapping_add(offset) as u32;

    (address & 0xFF_0000) | (pc & 0xFFFF)
}

pub fn disassemble(bytes: OpBytes<'_>, address: u32) -> inst {
    let (mnemonic, mode) = OPCODES[usize::from(bytes.opcode())];
    let b1 = u32::from(bytes.byte(1));
    let w1 = u32::from(bytes.word(1));
    let bank = address & 0xFF_0000;

    let operands = match mode {
        Imp => vec![],
        Acc => vec![op::sym("A")],
        Sig8 | Imm8 => vec![op::imm(b1, 2)],
        ImmM | ImmX => {
            if mode.operand_bytes(bytes.flags()) == 1 {
                vec![op::imm(b1, 2)]
            } else {
                vec![op::imm(w1, 4)]
            }
        }
        Rel => vec![op::cptr(
            relative_target(address, 2, i32::from(bytes.byte(1) as i8)),
            4,
        )],
        RelLng => vec![op::cptr(
            relative_target(address, 3, i32::from(bytes.word(1) as i16)),
            4,
        )],
        Dir => vec![op::dptr(b1, 2)],
        DirIdxX => vec![op::wrap("", vec![op::dptr(b1, 2), op::sym("X")], "")],
        DirIdxY => vec![op::wrap("", vec![op::dptr(b1, 2), op::sym("Y")], "")],
        DirInd | StkDirInd => vec![op::wrap("(", vec![op::dptr(b1, 2)], ")")],
        DirIdxIndX => vec![op::wrap("(", vec![op::dptr(b1, 2), op::sym("X")], ")")],
        DirIndIdxY => vec![op::wrap(
            "",
            vec![op::wrap("(", vec![op::dptr(b1, 2)], ")"), op::sym("Y")],
            "",
        )],
        DirIndLng => vec![op::wrap("[", vec![op::dptr(b1, 2)], "]")],
        DirIndLngIdxY => vec![op::wrap(
            "",
            vec![op::wrap("[", vec![op::dptr(b1, 2)], "]"), op::sym("Y")],
            "",
        )],
        StkRel => vec![op::wrap("", vec![op::int(b1, 2), op::sym("S")], "")],
        StkRelIndIdxY => vec![op::wrap(
            "",
            vec![
                op::wrap("(", vec![op::int(b1, 2), op::sym("S")], ")"),
                op::sym("Y"),
            ],
            "",
        )],
        Abs => vec![op::dptr(w1, 4)],
        AbsIdxX => vec![op::wrap("", vec![op::dptr(w1, 4), op::sym("X")], "")],
        AbsIdxY => vec![op::wrap("", vec![op::dptr(w1, 4), op::sym("Y")], "")],
        AbsInd => vec![op::wrap("(", vec![op::dptr(w1, 4)], ")")],
        AbsIndLng => vec![op::wrap("[", vec![op::dptr(w1, 4)], "]")],
        AbsIdxXInd => vec![op::wrap(
            "(",
            vec![op::dptr(bank | w1, 4), op::sym("X")],
            ")",
        )],
        AbsJmp => vec![op::cptr(bank | w1, 4)],
        AbsLng => vec![op::dptr(bytes.long(1), 6)],
        AbsLngIdxX => vec![op::wrap("", vec![op::dptr(bytes.long(1), 6), op::sym("X")], "")],
        AbsLngJmp => vec![op::cptr(bytes.long(1), 6)],
        BlkMov => vec![
            op::int(u32::from(bytes.byte(2)), 2),
            op::int(b1, 2),
        ],
        StkAbs => vec![op::int(w1, 4)],
    };

    inst::new(mnemonic, operands)
}
