//! Per-architecture register snapshots

use serde::{Deserialize, Serialize};

/// Registers of a 65C816, used for both the SNES CPU and the SA-1.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnesCpuState {
    pub a: u16,
    pub x: u16,
    pub y: u16,
    pub sp: u16,
    pub d: u16,
    pub pc: u16,

    /// Program bank.
    pub k: u8,

    /// Data bank.
    pub dbr: u8,

    pub ps: u8,
    pub emulation_mode: bool,
}

impl SnesCpuState {
    pub const FLAG_INDEX_8BIT: u8 = 0x10;
    pub const FLAG_MEMORY_8BIT: u8 = 0x20;

    /// Determine if accumulator-sized memory operands are 8 bits wide.
    pub fn memory_8bit(&self) -> bool {
        self.emulation_mode || self.ps & Self::FLAG_MEMORY_8BIT != 0
    }

    /// Determine if the index registers are 8 bits wide.
    pub fn index_8bit(&self) -> bool {
        self.emulation_mode || self.ps & Self::FLAG_INDEX_8BIT != 0
    }

    /// The X register as the CPU currently sees it.
    pub fn index_x(&self) -> u16 {
        if self.index_8bit() {
            self.x & 0xFF
        } else {
            self.x
        }
    }

    pub fn index_y(&self) -> u16 {
        if self.index_8bit() {
            self.y & 0xFF
        } else {
            self.y
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpcState {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub ps: u8,
}

impl SpcState {
    pub const FLAG_DIRECT_PAGE: u8 = 0x20;

    /// Base address of the direct page selected by the P flag.
    pub fn direct_page(&self) -> u16 {
        if self.ps & Self::FLAG_DIRECT_PAGE != 0 {
            0x100
        } else {
            0
        }
    }
}

/// Registers of the SuperFX.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GsuState {
    pub r: [u16; 16],
    pub sfr: u16,
    pub program_bank: u8,
    pub rom_bank: u8,
    pub ram_bank: u8,
}

/// Registers of the HG51B inside a Cx4.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cx4State {
    pub a: u32,
    pub mar: u32,
    pub mdr: u32,
    pub dpr: u16,
    pub p: u16,
    pub pc: u8,
    pub pb: u16,
    pub r: [u32; 16],
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NecDspState {
    pub a: u16,
    pub b: u16,
    pub tr: u16,
    pub trb: u16,
    pub dp: u16,
    pub rp: u16,
    pub dr: u16,
    pub sr: u16,
    pub pc: u16,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GbCpuState {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

impl GbCpuState {
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NesCpuState {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub ps: u8,
    pub pc: u16,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PceCpuState {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub ps: u8,
    pub pc: u16,

    /// Memory paging registers, one per 8KiB logical segment.
    pub mpr: [u8; 8],
}

/// A register snapshot of any supported processor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CpuState {
    Snes(SnesCpuState),
    Spc(SpcState),
    Gsu(GsuState),
    Cx4(Cx4State),
    NecDsp(NecDspState),
    Gameboy(GbCpuState),
    Nes(NesCpuState),
    Pce(PceCpuState),
}

impl CpuState {
    /// A short name for the kind of processor this snapshot came from.
    pub fn kind(&self) -> &'static str {
        match self {
            CpuState::Snes(_) => "65C816",
            CpuState::Spc(_) => "SPC700",
            CpuState::Gsu(_) => "SuperFX",
            CpuState::Cx4(_) => "HG51B",
            CpuState::NecDsp(_) => "uPD7725",
            CpuState::Gameboy(_) => "SM83",
            CpuState::Nes(_) => "2A03",
            CpuState::Pce(_) => "HuC6280",
        }
    }
}
