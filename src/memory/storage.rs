//! Owned physical storage

use crate::memory::RegionType;

/// One physical storage block inside a `Storage` arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Block {
    region: RegionType,
    base: usize,
    len: usize,
}

impl Block {
    pub fn region(&self) -> RegionType {
        self.region
    }

    /// Index of the first byte of this block within the arena.
    pub fn base(&self) -> usize {
        self.base
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Determine if an arena index falls within this block.
    pub fn contains(&self, index: usize) -> bool {
        index >= self.base && index - self.base < self.len
    }
}

/// All of the physical storage of an emulated system, held in one arena.
///
/// Every region lives in a block with an explicit base index and length, so
/// determining which region an arena index belongs to is a range check
/// against each block. Each region type is expected to be allocated at most
/// once; lookups by region return the first block allocated for it.
#[derive(Clone, Debug, Default)]
pub struct Storage {
    arena: Vec<u8>,
    blocks: Vec<Block>,
}

impl Storage {
    pub fn new() -> Self {
        Storage {
            arena: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Allocate a zero-filled block for a region.
    pub fn allocate(&mut self, region: RegionType, len: usize) -> Block {
        let block = Block {
            region,
            base: self.arena.len(),
            len,
        };

        self.arena.resize(block.base + len, 0);
        self.blocks.push(block);

        block
    }

    /// Allocate a block of at least `len` bytes for a region and fill it with
    /// `data`.
    ///
    /// Data longer than `len` grows the block to fit.
    pub fn load(&mut self, region: RegionType, data: &[u8], len: usize) -> Block {
        let block = self.allocate(region, len.max(data.len()));

        self.arena[block.base..block.base + data.len()].copy_from_slice(data);

        block
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, region: RegionType) -> Option<Block> {
        self.blocks.iter().find(|b| b.region == region).copied()
    }

    pub fn region(&self, region: RegionType) -> Option<&[u8]> {
        let block = self.block(region)?;

        self.arena.get(block.base..block.base + block.len)
    }

    /// Size of a region in bytes, or zero if it was never allocated.
    pub fn region_len(&self, region: RegionType) -> usize {
        self.block(region).map(|b| b.len).unwrap_or(0)
    }

    /// Convert a region-relative offset into an arena index.
    pub fn index_of(&self, region: RegionType, offset: usize) -> Option<usize> {
        let block = self.block(region)?;

        if offset < block.len {
            Some(block.base + offset)
        } else {
            None
        }
    }

    /// Determine which of the listed regions holds an arena index.
    ///
    /// Regions are tested in the order given and the first containing block
    /// wins. The result is the region and the index's offset from the start
    /// of that region's block.
    pub fn locate(&self, index: usize, order: &[RegionType]) -> Option<(RegionType, usize)> {
        order.iter().find_map(|&region| {
            let block = self.block(region)?;

            if block.contains(index) {
                Some((region, index - block.base))
            } else {
                None
            }
        })
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.arena.get(index).copied()
    }

    /// Store a byte at an arena index, returning `false` if out of range.
    pub fn set(&mut self, index: usize, value: u8) -> bool {
        match self.arena.get_mut(index) {
            Some(byte) => {
                *byte = value;
                true
            }
            None => false,
        }
    }
}
