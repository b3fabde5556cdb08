//! Tools for decoding and inspecting captured program code

pub mod effective;
mod error;
mod listing;
mod record;

pub use effective::{read_operand_value, EffectiveAddressInfo};
pub use error::{Error, Result};
pub use listing::{disassemble_block, Listing, ListingLine};
pub use record::{InstructionRecord, MAX_INSTRUCTION_LENGTH};
