//! Implementations of the processor architectures the debugger can decode.
//!
//! Each instruction set is implemented as a child module exposing a single
//! zero-sized strategy type that implements `DecodeStrategy`. Strategies are
//! stateless: everything they know about an instruction comes from the bytes
//! captured by an `InstructionRecord` and the processor flags that were live
//! when those bytes were captured.
//!
//! Several architecture tags may share one strategy. The 65C816 decoder, for
//! example, serves both the main SNES CPU and the SA-1 coprocessor; the tag is
//! still threaded through effective address resolution so that pointer reads
//! go to the right bus.
//!
//! To add an architecture, implement `DecodeStrategy` for it and register it
//! in `Registry::standard`.

pub mod gsu;
pub mod hg51b;
pub mod huc6280;
pub mod mos6502;
pub mod sm83;
pub mod spc700;
pub mod upd77c25;
pub mod w65c816;

mod bytes;
mod registry;
mod traits;

pub use bytes::OpBytes;
pub use registry::{standard_registry, Registry};
pub use traits::DecodeStrategy;

use serde::Serialize;
use std::{fmt, str};

/// Enumeration of every architecture tag the debugger knows how to decode.
#[derive(Copy, Clone, Serialize, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArchName {
    /// The main 65C816 CPU of the Super Famicom.
    Snes,

    /// The SA-1 coprocessor, another 65C816.
    Sa1,

    /// The SPC700 sound CPU.
    Spc,

    /// The NEC uPD7725/uPD96050 DSP family.
    NecDsp,

    /// The SuperFX (GSU) graphics coprocessor.
    Gsu,

    /// The Hitachi HG51B inside the Cx4 chip.
    Cx4,

    /// The Game Boy's SM83.
    Gameboy,

    /// The NES 2A03, a 6502 without decimal mode.
    Nes,

    /// The PC Engine's HuC6280.
    Pce,
}

impl ArchName {
    pub fn iter() -> impl Iterator<Item = ArchName> {
        [
            ArchName::Snes,
            ArchName::Sa1,
            ArchName::Spc,
            ArchName::NecDsp,
            ArchName::Gsu,
            ArchName::Cx4,
            ArchName::Gameboy,
            ArchName::Nes,
            ArchName::Pce,
        ]
        .iter()
        .copied()
    }

    pub fn friendly_name(self) -> &'static str {
        match self {
            ArchName::Snes => "SNES (65C816)",
            ArchName::Sa1 => "SA-1 (65C816)",
            ArchName::Spc => "SPC700",
            ArchName::NecDsp => "NEC DSP (uPD7725)",
            ArchName::Gsu => "SuperFX (GSU)",
            ArchName::Cx4 => "Cx4 (HG51B)",
            ArchName::Gameboy => "Game Boy (SM83)",
            ArchName::Nes => "NES (2A03)",
            ArchName::Pce => "PC Engine (HuC6280)",
        }
    }

    /// Compute the address of the instruction following one of `length`
    /// bytes located at `address`.
    ///
    /// Architectures with 24-bit program counters keep the program bank and
    /// wrap within it, the same way their hardware does.
    pub fn next_address(self, address: u32, length: u8) -> u32 {
        let length = u32::from(length);

        match self {
            ArchName::Snes | ArchName::Sa1 | ArchName::Gsu => {
                (address & 0xFF_0000) | (address.wrapping_add(length) & 0xFFFF)
            }
            ArchName::Cx4 => (address & 0xFF_FE00) | (address.wrapping_add(length) & 0x1FF),
            ArchName::NecDsp => address.wrapping_add(length) & 0xFF_FFFF,
            ArchName::Spc | ArchName::Gameboy | ArchName::Nes | ArchName::Pce => {
                address.wrapping_add(length) & 0xFFFF
            }
        }
    }
}

impl fmt::Display for ArchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.friendly_name())
    }
}

impl str::FromStr for ArchName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "snes" | "65c816" | "w65c816" => Ok(ArchName::Snes),
            "sa1" | "sa-1" => Ok(ArchName::Sa1),
            "spc" | "spc700" => Ok(ArchName::Spc),
            "necdsp" | "upd7725" | "upd77c25" | "upd96050" => Ok(ArchName::NecDsp),
            "gsu" | "superfx" => Ok(ArchName::Gsu),
            "cx4" | "hg51b" => Ok(ArchName::Cx4),
            "gameboy" | "gb" | "sm83" | "lr35902" | "gbz80" => Ok(ArchName::Gameboy),
            "nes" | "2a03" | "6502" => Ok(ArchName::Nes),
            "pce" | "huc6280" => Ok(ArchName::Pce),
            _ => Err(()),
        }
    }
}

derive_deserialize_from_str!(ArchName, "valid architecture name");
