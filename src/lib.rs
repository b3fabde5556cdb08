//! Instruction decoding and address translation for an emulator debugger.
//!
//! The crate is split the following way:
//!
//!  * `arch` holds one decode strategy per supported instruction set, plus the
//!    registry that maps architecture tags onto them.
//!  * `analysis` holds the instruction record, the effective address resolver
//!    and a linear-sweep listing builder.
//!  * `memory` holds the memory port abstraction and owned storage.
//!  * `platform` holds the banked memory model of specific systems.
//!  * `ast` and `asm` hold the structured form of a disassembled instruction
//!    and the renderer that turns it into text.

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate serde_plain;

pub mod analysis;
pub mod arch;
pub mod asm;
pub mod ast;
pub mod config;
pub mod memory;
pub mod platform;
pub mod reg;
