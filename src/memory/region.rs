//! Physical region and address space identifiers.

use crate::arch::ArchName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of physical storage a byte lives in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionType {
    ProgramRom,
    CartRam,
    WorkRam,
    VideoRam,
    SpriteRam,
    HighRam,
    BootRom,

    /// Not backed by owned storage, such as a hardware register.
    Unmapped,
}

/// The address space a memory port read targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemoryType {
    /// The banked address space as seen by the given processor.
    CpuBus(ArchName),

    /// A physical region, addressed by offset from its start.
    Region(RegionType),
}

/// A banking-independent location: a physical region plus an offset into it.
///
/// The `Unmapped` region always carries an offset of `-1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressDescriptor {
    pub region: RegionType,
    pub offset: i32,
}

impl AddressDescriptor {
    pub const UNMAPPED: AddressDescriptor = AddressDescriptor {
        region: RegionType::Unmapped,
        offset: -1,
    };

    pub fn new(region: RegionType, offset: i32) -> Self {
        AddressDescriptor { region, offset }
    }

    pub fn unmapped() -> Self {
        Self::UNMAPPED
    }

    pub fn is_mapped(&self) -> bool {
        self.region != RegionType::Unmapped && self.offset >= 0
    }
}

impl Default for AddressDescriptor {
    fn default() -> Self {
        Self::UNMAPPED
    }
}

impl fmt::Display for AddressDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_mapped() {
            write!(f, "{:?}:${:X}", self.region, self.offset)
        } else {
            write!(f, "Unmapped")
        }
    }
}
