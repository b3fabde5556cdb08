//! An abstract syntax tree representation of disassembled code

mod instr;
mod label;
mod literal;
mod operand;
mod template;

pub use instr::Instruction;
pub use label::{LabelLookup, NoLabels};
pub use literal::Literal;
pub use operand::Operand;
pub use template::expand;
