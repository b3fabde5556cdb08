//! Text rendering of disassembled instructions.
//!
//! Every architecture builds its instructions as `ast::Instruction` trees; the
//! `Renderer` turns those trees into the debugger's display syntax. Numbers
//! are printed as `$`-prefixed hexadecimal, references to absolute addresses
//! are replaced with label names when the label lookup knows one, and
//! mnemonics and register names may optionally be lowercased.

use crate::ast::{Instruction, LabelLookup, Literal, NoLabels, Operand};
use crate::config::DisassemblyConfig;
use std::fmt::{Result, Write};

/// Renders instruction trees into text.
#[derive(Copy, Clone)]
pub struct Renderer<'a> {
    labels: &'a dyn LabelLookup,
    lowercase: bool,
    show_labels: bool,
}

impl Default for Renderer<'static> {
    fn default() -> Self {
        Renderer::new(&NoLabels)
    }
}

impl<'a> Renderer<'a> {
    pub fn new(labels: &'a dyn LabelLookup) -> Self {
        Renderer {
            labels,
            lowercase: false,
            show_labels: true,
        }
    }

    pub fn with_config(labels: &'a dyn LabelLookup, config: &DisassemblyConfig) -> Self {
        Renderer {
            labels,
            lowercase: config.lowercase,
            show_labels: config.show_labels,
        }
    }

    pub fn lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Render an entire instruction into a new string.
    pub fn render(&self, instr: &Instruction) -> String {
        let mut out = String::new();

        //Writing into a String cannot fail.
        let _ = self.emit_instr(&mut out, instr);

        out
    }

    /// Emit an entire instruction.
    pub fn emit_instr(&self, stream: &mut dyn Write, instr: &Instruction) -> Result {
        self.emit_symbol(stream, instr.opcode())?;

        for (i, operand) in instr.iter_operands().enumerate() {
            if i == 0 {
                write!(stream, " ")?;
            } else {
                write!(stream, ", ")?;
            }

            self.emit_operand(stream, operand)?;
        }

        Ok(())
    }

    /// Emit an entire operand.
    pub fn emit_operand(&self, stream: &mut dyn Write, operand: &Operand) -> Result {
        match operand {
            Operand::Symbol(symbol) => self.emit_symbol(stream, symbol)?,
            Operand::Literal(literal) => self.emit_literal(stream, literal)?,
            Operand::DataReference(opr) | Operand::CodeReference(opr) => {
                match self.label_for(operand) {
                    Some(label) => write!(stream, "{}", label)?,
                    None => self.emit_operand(stream, opr)?,
                }
            }
            Operand::Infix(opr1, infix, opr2) => {
                self.emit_operand(stream, opr1)?;
                self.emit_symbol(stream, infix)?;
                self.emit_operand(stream, opr2)?;
            }
            Operand::PrefixSymbol(prefix, opr) => {
                self.emit_symbol(stream, prefix)?;
                self.emit_operand(stream, opr)?;
            }
            Operand::SuffixSymbol(opr, suffix) => {
                self.emit_operand(stream, opr)?;
                self.emit_symbol(stream, suffix)?;
            }
            Operand::WrapperSymbol(prefix, operands, suffix) => {
                self.emit_symbol(stream, prefix)?;

                for (i, inner_opr) in operands.iter().enumerate() {
                    if i > 0 {
                        write!(stream, ",")?;
                    }

                    self.emit_operand(stream, inner_opr)?;
                }

                self.emit_symbol(stream, suffix)?;
            }
            Operand::Concat(operands) => {
                for inner_opr in operands {
                    self.emit_operand(stream, inner_opr)?;
                }
            }
        }

        Ok(())
    }

    fn emit_symbol(&self, stream: &mut dyn Write, symbol: &str) -> Result {
        if self.lowercase {
            write!(stream, "{}", symbol.to_ascii_lowercase())
        } else {
            write!(stream, "{}", symbol)
        }
    }

    fn emit_literal(&self, stream: &mut dyn Write, literal: &Literal) -> Result {
        match *literal {
            Literal::Integer { value, digits } => {
                write!(stream, "${:0width$X}", value, width = usize::from(digits))
            }
            Literal::Pointer { address, digits } => {
                let shown = if digits >= 8 {
                    address
                } else {
                    address & ((1u32 << (u32::from(digits) * 4)) - 1)
                };

                write!(stream, "${:0width$X}", shown, width = usize::from(digits))
            }
            Literal::Decimal(value) => write!(stream, "{}", value),
        }
    }

    fn label_for(&self, operand: &Operand) -> Option<String> {
        if !self.show_labels {
            return None;
        }

        self.labels.resolve(operand.referenced_address()?)
    }
}
