//! SPC700 disassembly
//!
//! Every opcode is described by a template in the native Sony syntax. The
//! placeholders within each template name the operand bytes it consumes,
//! which is also how instruction lengths are derived.

use crate::arch::OpBytes;
use crate::ast::{expand, Instruction, Operand as op};

/// Templates for all 256 opcodes.
///
///  * `{d}` direct page address in byte 1
///  * `{e}` direct page address in byte 2
///  * `{a}` absolute data address in bytes 1-2
///  * `{j}` absolute code address in bytes 1-2
///  * `{i}` immediate in byte 1
///  * `{r}` relative branch target in byte 1
///  * `{R}` relative branch target in byte 2
///  * `{m}` 13-bit address and bit number in bytes 1-2
///  * `{n}` TCALL vector number, from the opcode
///  * `{b}` bit number, from the opcode
///  * `{u}` PCALL target in the uppermost page
pub static TEMPLATES: [&str; 256] = [
    //$00
    "NOP", "TCALL {n}", "SET1 {d}.{b}", "BBS {d}.{b}, {R}",
    "OR A, {d}", "OR A, {a}", "OR A, (X)", "OR A, [{d}+X]",
    "OR A, {i}", "OR {e}, {d}", "OR1 C, {m}", "ASL {d}",
    "ASL {a}", "PUSH PSW", "TSET1 {a}", "BRK",
    //$10
    "BPL {r}", "TCALL {n}", "CLR1 {d}.{b}", "BBC {d}.{b}, {R}",
    "OR A, {d}+X", "OR A, {a}+X", "OR A, {a}+Y", "OR A, [{d}]+Y",
    "OR {e}, {i}", "OR (X), (Y)", "DECW {d}", "ASL {d}+X",
    "ASL A", "DEC X", "CMP X, {a}", "JMP [{a}+X]",
    //$20
    "CLRP", "TCALL {n}", "SET1 {d}.{b}", "BBS {d}.{b}, {R}",
    "AND A, {d}", "AND A, {a}", "AND A, (X)", "AND A, [{d}+X]",
    "AND A, {i}", "AND {e}, {d}", "OR1 C, /{m}", "ROL {d}",
    "ROL {a}", "PUSH A", "CBNE {d}, {R}", "BRA {r}",
    //$30
    "BMI {r}", "TCALL {n}", "CLR1 {d}.{b}", "BBC {d}.{b}, {R}",
    "AND A, {d}+X", "AND A, {a}+X", "AND A, {a}+Y", "AND A, [{d}]+Y",
    "AND {e}, {i}", "AND (X), (Y)", "INCW {d}", "ROL {d}+X",
    "ROL A", "INC X", "CMP X, {d}", "CALL {j}",
    //$40
    "SETP", "TCALL {n}", "SET1 {d}.{b}", "BBS {d}.{b}, {R}",
    "EOR A, {d}", "EOR A, {a}", "EOR A, (X)", "EOR A, [{d}+X]",
    "EOR A, {i}", "EOR {e}, {d}", "AND1 C, {m}", "LSR {d}",
    "LSR {a}", "PUSH X", "TCLR1 {a}", "PCALL {u}",
    //$50
    "BVC {r}", "TCALL {n}", "CLR1 {d}.{b}", "BBC {d}.{b}, {R}",
    "EOR A, {d}+X", "EOR A, {a}+X", "EOR A, {a}+Y", "EOR A, [{d}]+Y",
    "EOR {e}, {i}", "EOR (X), (Y)", "CMPW YA, {d}", "LSR {d}+X",
    "LSR A", "MOV X, A", "CMP Y, {a}", "JMP {j}",
    //$60
    "CLRC", "TCALL {n}", "SET1 {d}.{b}", "BBS {d}.{b}, {R}",
    "CMP A, {d}", "CMP A, {a}", "CMP A, (X)", "CMP A, [{d}+X]",
    "CMP A, {i}", "CMP {e}, {d}", "AND1 C, /{m}", "ROR {d}",
    "ROR {a}", "PUSH Y", "DBNZ {d}, {R}", "RET",
    //$70
    "BVS {r}", "TCALL {n}", "CLR1 {d}.{b}", "BBC {d}.{b}, {R}",
    "CMP A, {d}+X", "CMP A, {a}+X", "CMP A, {a}+Y", "CMP A, [{d}]+Y",
    "CMP {e}, {i}", "CMP (X), (Y)", "ADDW YA, {d}", "ROR {d}+X",
    "ROR A", "MOV A, X", "CMP Y, {d}", "RETI",
    //$80
    "SETC", "TCALL {n}", "SET1 {d}.{b}", "BBS {d}.{b}, {R}",
    "ADC A, {d}", "ADC A, {a}", "ADC A, (X)", "ADC A, [{d}+X]",
    "ADC A, {i}", "ADC {e}, {d}", "EOR1 C, {m}", "DEC {d}",
    "DEC {a}", "MOV Y, {i}", "POP PSW", "MOV {e}, {i}",
    //$90
    "BCC {r}", "TCALL {n}", "CLR1 {d}.{b}", "BBC {d}.{b}, {R}",
    "ADC A, {d}+X", "ADC A, {a}+X", "ADC A, {a}+Y", "ADC A, [{d}]+Y",
    "ADC {e}, {i}", "ADC (X), (Y)", "SUBW YA, {d}", "DEC {d}+X",
    "DEC A", "MOV X, SP", "DIV YA, X", "XCN A",
    //$A0
    "EI", "TCALL {n}", "SET1 {d}.{b}", "BBS {d}.{b}, {R}",
    "SBC A, {d}", "SBC A, {a}", "SBC A, (X)", "SBC A, [{d}+X]",
    "SBC A, {i}", "SBC {e}, {d}", "MOV1 C, {m}", "INC {d}",
    "INC {a}", "CMP Y, {i}", "POP A", "MOV (X)+, A",
    //$B0
    "BCS {r}", "TCALL {n}", "CLR1 {d}.{b}", "BBC {d}.{b}, {R}",
    "SBC A, {d}+X", "SBC A, {a}+X", "SBC A, {a}+Y", "SBC A, [{d}]+Y",
    "SBC {e}, {i}", "SBC (X), (Y)", "MOVW YA, {d}", "INC {d}+X",
    "INC A", "MOV SP, X", "DAS A", "MOV A, (X)+",
    //$C0
    "DI", "TCALL {n}", "SET1 {d}.{b}", "BBS {d}.{b}, {R}",
    "MOV {d}, A", "MOV {a}, A", "MOV (X), A", "MOV [{d}+X], A",
    "CMP X, {i}", "MOV {a}, X", "MOV1 {m}, C", "MOV {d}, Y",
    "MOV {a}, Y", "MOV X, {i}", "POP X", "MUL YA",
    //$D0
    "BNE {r}", "TCALL {n}", "CLR1 {d}.{b}", "BBC {d}.{b}, {R}",
    "MOV {d}+X, A", "MOV {a}+X, A", "MOV {a}+Y, A", "MOV [{d}]+Y, A",
    "MOV {d}, X", "MOV {d}+Y, X", "MOVW {d}, YA", "MOV {d}+X, Y",
    "DEC Y", "MOV A, Y", "CBNE {d}+X, {R}", "DAA A",
    //$E0
    "CLRV", "TCALL {n}", "SET1 {d}.{b}", "BBS {d}.{b}, {R}",
    "MOV A, {d}", "MOV A, {a}", "MOV A, (X)", "MOV A, [{d}+X]",
    "MOV A, {i}", "MOV X, {a}", "NOT1 {m}", "MOV Y, {d}",
    "MOV Y, {a}", "NOTC", "POP Y", "SLEEP",
    //$F0
    "BEQ {r}", "TCALL {n}", "CLR1 {d}.{b}", "BBC {d}.{b}, {R}",
    "MOV A, {d}+X", "MOV A, {a}+X", "MOV A, {a}+Y", "MOV A, [{d}]+Y",
    "MOV X, {d}", "MOV X, {d}+Y", "MOV {e}, {d}", "MOV Y, {d}+X",
    "INC Y", "MOV Y, A", "DBNZ Y, {r}", "STOP",
];

/// Index of the last operand byte a placeholder consumes.
fn last_byte(placeholder: char) -> u8 {
    match placeholder {
        'd' | 'i' | 'r' | 'u' => 1,
        'e' | 'R' | 'a' | 'j' | 'm' => 2,
        _ => 0,
    }
}

fn template_length(template: &str) -> u8 {
    let mut chars = template.chars();
    let mut last = 0;

    while let Some(c) = chars.next() {
        if c == '{' {
            if let Some(name) = chars.next() {
                last = last.max(last_byte(name));
            }
        }
    }

    1 + last
}

lazy_static! {
    /// Length of every opcode, as implied by its template.
    pub static ref LENGTHS: [u8; 256] = {
        let mut lengths = [1; 256];

        for (length, template) in lengths.iter_mut().zip(TEMPLATES.iter()) {
            *length = template_length(template);
        }

        lengths
    };
}

/// Branch targets wrap around the 64KiB address space.
fn relative_target(address: u32, length: u8, offset: u8) -> u32 {
    address
        .wrapping_add(u32::from(length))
        .wrapping_add(offset as i8 as u32)
        & 0xFFFF
}

pub fn disassemble(bytes: OpBytes<'_>, address: u32) -> Instruction {
    let opcode = bytes.opcode();
    let length = LENGTHS[usize::from(opcode)];
    let b1 = u32::from(bytes.byte(1));
    let w1 = u32::from(bytes.word(1));

    expand(TEMPLATES[usize::from(opcode)], |placeholder| match placeholder {
        'd' => op::dptr(b1, 2),
        'e' => op::dptr(u32::from(bytes.byte(2)), 2),
        'a' => op::dptr(w1, 4),
        'j' => op::cptr(w1, 4),
        'i' => op::imm(b1, 2),
        'r' => op::cptr(relative_target(address, length, bytes.byte(1)), 4),
        'R' => op::cptr(relative_target(address, length, bytes.byte(2)), 4),
        'm' => op::concat(vec![
            op::dptr(w1 & 0x1FFF, 4),
            op::sym("."),
            op::dec(i64::from(w1 >> 13)),
        ]),
        'n' => op::dec(i64::from(opcode >> 4)),
        'b' => op::dec(i64::from(opcode >> 5)),
        'u' => op::cptr(0xFF00 | b1, 4),
        _ => op::sym("?"),
    })
}
