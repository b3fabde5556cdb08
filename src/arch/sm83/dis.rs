//! SM83 disassembly

use crate::arch::OpBytes;
use crate::ast::{Instruction as inst, Operand, Operand as op};

/// A register operand, either used directly or as a pointer.
#[derive(Copy, Clone)]
pub enum AbstractOperand {
    Symbol(&'static str),
    Indirect(&'static str),
}

impl From<AbstractOperand> for Operand {
    fn from(abs: AbstractOperand) -> Operand {
        match abs {
            AbstractOperand::Symbol(s) => op::sym(s),
            AbstractOperand::Indirect(is) => indir(op::sym(is)),
        }
    }
}

/// z80 instruction encoding uses this 3-bit enumeration to encode the target of
/// 8-bit ALU or register transfer operations.
pub static ALU_TARGET_REGS: [AbstractOperand; 8] = [
    AbstractOperand::Symbol("B"),
    AbstractOperand::Symbol("C"),
    AbstractOperand::Symbol("D"),
    AbstractOperand::Symbol("E"),
    AbstractOperand::Symbol("H"),
    AbstractOperand::Symbol("L"),
    AbstractOperand::Indirect("HL"),
    AbstractOperand::Symbol("A"),
];

/// z80 instruction encoding uses this 2-bit enumeration to encode the target of
/// 16-bit ALU operations.
static ALU_TARGET_PAIRS: [&str; 4] = ["BC", "DE", "HL", "SP"];

/// z80 instruction encoding uses this 2-bit enumeration to encode the target of
/// stack manipulation instructions.
static STACK_TARGET_PAIRS: [&str; 4] = ["BC", "DE", "HL", "AF"];

/// z80 instruction encoding uses this 2-bit enumeration for memory pointers.
static ALU_TARGET_MEM: [&str; 4] = ["BC", "DE", "HL+", "HL-"];

/// z80 instruction encoding uses this 3-bit enumeration to encode most common
/// ALU operations. The source register is always A for these operations, which
/// are actually a holdover from 8080 and have been carried into SM83.
static ALU_OPS: [&str; 8] = ["ADD", "ADC", "SUB", "SBC", "AND", "XOR", "OR", "CP"];

/// z80 instruction encoding uses this 2-bit enumeration to encode condition
/// codes for instructions that change control flow.
static ALU_CONDCODE: [&str; 4] = ["NZ", "Z", "NC", "C"];

/// z80 instruction encoding uses this 3-bit enumeration to encode "bitwise" ALU
/// operations, such as rotates, carry flag manipulation, and BCD adjustment
static ALU_BITOPS: [&str; 8] = ["RLCA", "RRCA", "RLA", "RRA", "DAA", "CPL", "SCF", "CCF"];

static NEW_ALU_BITOPS: [&str; 8] = ["RLC", "RRC", "RL", "RR", "SLA", "SRA", "SWAP", "SRL"];

fn indir(operand: Operand) -> Operand {
    op::wrap("[", vec![operand], "]")
}

fn int_op8(bytes: OpBytes<'_>) -> Operand {
    op::int(u32::from(bytes.byte(1)), 2)
}

fn int_op16(bytes: OpBytes<'_>) -> Operand {
    op::int(u32::from(bytes.word(1)), 4)
}

fn dptr_op16(bytes: OpBytes<'_>) -> Operand {
    indir(op::dptr(u32::from(bytes.word(1)), 4))
}

fn cptr_op16(bytes: OpBytes<'_>) -> Operand {
    op::cptr(u32::from(bytes.word(1)), 4)
}

fn hram_op8(bytes: OpBytes<'_>) -> Operand {
    indir(op::dptr(0xFF00 + u32::from(bytes.byte(1)), 4))
}

fn pcrel_op8(bytes: OpBytes<'_>, address: u32) -> Operand {
    let target = address
        .wrapping_add(2)
        .wrapping_add(bytes.byte(1) as i8 as u32)
        & 0xFFFF;

    op::cptr(target, 4)
}

fn prefixed(subop: u8) -> inst {
    let targetreg = ALU_TARGET_REGS[(subop & 0x07) as usize].into();
    let bit = op::dec(i64::from((subop >> 3) & 0x07));

    match (subop >> 6) & 0x03 {
        0 => inst::new(NEW_ALU_BITOPS[((subop >> 3) & 0x07) as usize], vec![targetreg]),
        1 => inst::new("BIT", vec![bit, targetreg]),
        2 => inst::new("RES", vec![bit, targetreg]),
        _ => inst::new("SET", vec![bit, targetreg]),
    }
}

/// Disassemble an SM83 instruction located at `address`.
///
/// Opcodes with no defined behavior decode as a `.db` directive.
pub fn disassemble(bytes: OpBytes<'_>, address: u32) -> inst {
    match bytes.opcode() {
        0xCB => prefixed(bytes.byte(1)),

        //Z80 instructions that don't fit the pattern decoder below
        0x00 => inst::new("NOP", vec![]),
        0x08 => inst::new("LD", vec![dptr_op16(bytes), op::sym("SP")]),
        0x10 => inst::new("STOP", vec![]),
        0x18 => inst::new("JR", vec![pcrel_op8(bytes, address)]),
        0x76 => inst::new("HALT", vec![]), //encoded as ld [hl], [hl]

        0xC3 => inst::new("JP", vec![cptr_op16(bytes)]),
        0xCD => inst::new("CALL", vec![cptr_op16(bytes)]),
        0xC9 => inst::new("RET", vec![]),
        0xD9 => inst::new("RETI", vec![]),
        0xE9 => inst::new("JP", vec![op::sym("HL")]),
        0xF9 => inst::new("LD", vec![op::sym("SP"), op::sym("HL")]),

        0xE0 => inst::new("LDH", vec![hram_op8(bytes), op::sym("A")]),
        0xE8 => inst::new("ADD", vec![op::sym("SP"), int_op8(bytes)]),
        0xF0 => inst::new("LDH", vec![op::sym("A"), hram_op8(bytes)]),
        0xF8 => inst::new(
            "LD",
            vec![op::sym("HL"), op::add(op::sym("SP"), int_op8(bytes))],
        ),

        0xE2 => inst::new("LD", vec![indir(op::sym("C")), op::sym("A")]),
        0xEA => inst::new("LD", vec![dptr_op16(bytes), op::sym("A")]),
        0xF2 => inst::new("LD", vec![op::sym("A"), indir(op::sym("C"))]),
        0xFA => inst::new("LD", vec![op::sym("A"), dptr_op16(bytes)]),

        0xF3 => inst::new("DI", vec![]),
        0xFB => inst::new("EI", vec![]),

        //Z80 instructions that follow a particular pattern
        opcode => {
            let condcode = ALU_CONDCODE[((opcode >> 3) & 0x03) as usize];
            let targetpair = ALU_TARGET_PAIRS[((opcode >> 4) & 0x03) as usize];
            let targetreg: Operand = ALU_TARGET_REGS[((opcode >> 3) & 0x07) as usize].into();
            let targetmem = ALU_TARGET_MEM[((opcode >> 4) & 0x03) as usize];
            let bitop = ALU_BITOPS[((opcode >> 3) & 0x07) as usize];
            let targetreg2: Operand = ALU_TARGET_REGS[(opcode & 0x07) as usize].into();
            let aluop = ALU_OPS[((opcode >> 3) & 0x07) as usize];
            let stackpair = STACK_TARGET_PAIRS[((opcode >> 4) & 0x03) as usize];

            //decode `opcode` into aab?cddd. This creates a nice visual table for
            //the Z80's semiperiodic instruction encoding
            match (
                (opcode >> 6) & 0x03,
                (opcode >> 5) & 0x01,
                (opcode >> 3) & 0x01,
                opcode & 0x07,
            ) {
                (0, 1, _, 0) => inst::new(
                    "JR",
                    vec![op::sym(condcode), pcrel_op8(bytes, address)],
                ),
                (0, _, 0, 1) => inst::new("LD", vec![op::sym(targetpair), int_op16(bytes)]),
                (0, _, 1, 1) => inst::new("ADD", vec![op::sym("HL"), op::sym(targetpair)]),
                (0, _, 0, 2) => inst::new("LD", vec![indir(op::sym(targetmem)), op::sym("A")]),
                (0, _, 1, 2) => inst::new("LD", vec![op::sym("A"), indir(op::sym(targetmem))]),
                (0, _, 0, 3) => inst::new("INC", vec![op::sym(targetpair)]),
                (0, _, 1, 3) => inst::new("DEC", vec![op::sym(targetpair)]),
                (0, _, _, 4) => inst::new("INC", vec![targetreg]),
                (0, _, _, 5) => inst::new("DEC", vec![targetreg]),
                (0, _, _, 6) => inst::new("LD", vec![targetreg, int_op8(bytes)]),
                (0, _, _, 7) => inst::new(bitop, vec![]),
                (1, _, _, _) => inst::new("LD", vec![targetreg, targetreg2]),
                (2, _, _, _) => inst::new(aluop, vec![op::sym("A"), targetreg2]),
                (3, 0, _, 0) => inst::new("RET", vec![op::sym(condcode)]),
                (3, _, 0, 1) => inst::new("POP", vec![op::sym(stackpair)]),
                (3, 0, _, 2) => inst::new("JP", vec![op::sym(condcode), cptr_op16(bytes)]),
                (3, 0, _, 4) => inst::new("CALL", vec![op::sym(condcode), cptr_op16(bytes)]),
                (3, _, 0, 5) => inst::new("PUSH", vec![op::sym(stackpair)]),
                (3, _, _, 6) => inst::new(aluop, vec![op::sym("A"), int_op8(bytes)]),
                (3, _, _, 7) => inst::new("RST", vec![op::cptr(u32::from(opcode & 0x38), 4)]),

                //D3, DB, DD, E3, E4, EB, EC, ED, F4, FC, FD
                _ => inst::data_byte(opcode),
            }
        }
    }
}
