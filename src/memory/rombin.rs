//! ROM binary dump images

use crate::memory::{MemoryPort, MemoryType};
use std::io;

/// A flat binary image, such as a ROM dump, visible at a fixed base address.
///
/// The image answers every address space identically. Addresses outside of it
/// read as zero.
#[derive(Clone, Debug, Default)]
pub struct BinaryImage {
    data: Vec<u8>,
    base: u32,
}

impl BinaryImage {
    pub fn from_bytes(data: Vec<u8>, base: u32) -> Self {
        BinaryImage { data, base }
    }

    /// Read an image out of a file or other byte stream.
    pub fn read_bytes<F>(file: &mut F, base: u32) -> io::Result<Self>
    where
        F: io::Read,
    {
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        Ok(Self { data, base })
    }

    pub fn retrieve(&self, offset: usize, count: usize) -> Option<&[u8]> {
        self.data.get(offset..offset.checked_add(count)?)
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn image_size(&self) -> usize {
        self.data.len()
    }
}

impl MemoryPort for BinaryImage {
    fn read_byte(&self, _mem_type: MemoryType, address: u32) -> u8 {
        address
            .checked_sub(self.base)
            .and_then(|offset| self.data.get(offset as usize))
            .copied()
            .unwrap_or(0)
    }
}
