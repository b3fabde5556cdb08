//! Effective address resolution

use crate::analysis::{InstructionRecord, Result};
use crate::arch::ArchName;
use crate::memory::{MemoryPort, MemoryType};
use crate::reg::CpuState;
use std::fmt;

/// The memory location an instruction accesses, and how wide that access is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EffectiveAddressInfo {
    /// The accessed address, or `-1` if the instruction has no memory operand.
    pub address: i32,

    /// Width of the accessed value in bytes: 0, 1 or 2.
    pub value_size: u8,
}

impl EffectiveAddressInfo {
    pub const NONE: EffectiveAddressInfo = EffectiveAddressInfo {
        address: -1,
        value_size: 0,
    };

    pub fn none() -> Self {
        Self::NONE
    }

    /// An access of `value_size` bytes at `address`.
    ///
    /// Addresses are at most 24 bits wide on every supported processor.
    pub fn new(address: u32, value_size: u8) -> Self {
        EffectiveAddressInfo {
            address: (address & 0xFF_FFFF) as i32,
            value_size,
        }
    }

    pub fn is_some(&self) -> bool {
        self.address >= 0
    }

    pub fn address(&self) -> Option<u32> {
        if self.is_some() {
            Some(self.address as u32)
        } else {
            None
        }
    }
}

impl Default for EffectiveAddressInfo {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for EffectiveAddressInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.address() {
            Some(address) => write!(f, "[${:06X}]", address),
            None => write!(f, "-"),
        }
    }
}

/// Resolve the memory operand of a captured instruction.
///
/// `arch` names the processor whose registers `state` holds; it may differ
/// from the record's own tag only between processors sharing a strategy
/// (e.g. an SNES-decoded record resolved against SA-1 registers).
pub fn resolve(
    record: &InstructionRecord,
    state: &CpuState,
    arch: ArchName,
    port: &dyn MemoryPort,
) -> Result<EffectiveAddressInfo> {
    let strategy = record.strategy()?;

    strategy.effective_address(record.op_bytes()?, arch, state, port)
}

/// Read the value at a resolved effective address.
///
/// Yields `None` if there is no memory operand. Two-byte operands are read
/// little-endian.
pub fn read_operand_value(
    info: &EffectiveAddressInfo,
    port: &dyn MemoryPort,
    mem_type: MemoryType,
) -> Option<u16> {
    let address = info.address()?;

    match info.value_size {
        2 => Some(port.read_word(mem_type, address)),
        _ => Some(u16::from(port.read_byte(mem_type, address))),
    }
}
