//! Instruction construction from textual templates

use crate::ast::{Instruction, Operand};

/// Build an instruction from a template such as `"MOV A, [{d}+X]"`.
///
/// The text up to the first space is the mnemonic; the remainder is split on
/// `", "` into operands. Inside an operand, `{c}` is a placeholder that
/// `placeholder` is called with (`c` being the single character between the
/// braces); all other text is kept as architectural symbols.
pub fn expand<F>(template: &str, mut placeholder: F) -> Instruction
where
    F: FnMut(char) -> Operand,
{
    let mut split = template.splitn(2, ' ');
    let mnemonic = split.next().unwrap_or("");
    let operands = match split.next() {
        Some(rest) => rest
            .split(", ")
            .map(|op| expand_operand(op, &mut placeholder))
            .collect(),
        None => Vec::new(),
    };

    Instruction::new(mnemonic, operands)
}

fn expand_operand<F>(template: &str, placeholder: &mut F) -> Operand
where
    F: FnMut(char) -> Operand,
{
    let mut parts = Vec::new();
    let mut text = String::new();
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '{' {
            text.push(c);
            continue;
        }

        let name = chars.next().unwrap_or(' ');
        chars.next(); //closing brace

        if !text.is_empty() {
            parts.push(Operand::Symbol(std::mem::take(&mut text)));
        }

        parts.push(placeholder(name));
    }

    if !text.is_empty() {
        parts.push(Operand::Symbol(text));
    }

    if parts.len() == 1 {
        parts.remove(0)
    } else {
        Operand::concat(parts)
    }
}
