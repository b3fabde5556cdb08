//! Memory access traits

use crate::memory::MemoryType;

/// Read-only access to the bytes of an emulated system.
///
/// The decoder never touches emulated memory except through this trait, and
/// only while the emulation is paused. Reads must not have side effects on the
/// emulated hardware: a port backed by I/O registers should return a
/// debugger-safe view of them instead of triggering register reads.
pub trait MemoryPort {
    /// Read one byte from the given address space.
    fn read_byte(&self, mem_type: MemoryType, address: u32) -> u8;

    /// Read a little-endian 16-bit word from the given address space.
    ///
    /// The default implementation assembles the word from two byte reads;
    /// ports with a native word accessor may override it.
    fn read_word(&self, mem_type: MemoryType, address: u32) -> u16 {
        let lo = self.read_byte(mem_type, address);
        let hi = self.read_byte(mem_type, address.wrapping_add(1));

        u16::from_le_bytes([lo, hi])
    }
}

impl<T> MemoryPort for &T
where
    T: MemoryPort + ?Sized,
{
    fn read_byte(&self, mem_type: MemoryType, address: u32) -> u8 {
        (**self).read_byte(mem_type, address)
    }

    fn read_word(&self, mem_type: MemoryType, address: u32) -> u16 {
        (**self).read_word(mem_type, address)
    }
}
