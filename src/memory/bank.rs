//! Page-granular bank mapping

use std::fmt;

/// Size of one page of a 16-bit CPU address space.
pub const PAGE_SIZE: usize = 0x100;

/// Number of pages in a 16-bit CPU address space.
pub const PAGE_COUNT: usize = 0x100;

/// The current mapping of a 16-bit CPU address space onto owned storage.
///
/// Each of the 256 entries covers one 0x100-byte page and holds the arena
/// index of the storage byte that the start of the page maps to, or `None`
/// if the page is not backed by storage. The table is rebuilt by the memory
/// manager on every bank switch; everything else only reads it.
#[derive(Clone)]
pub struct BankTable {
    pages: [Option<usize>; PAGE_COUNT],
}

impl BankTable {
    pub fn new() -> Self {
        BankTable {
            pages: [None; PAGE_COUNT],
        }
    }

    /// The arena index the page containing `address` starts at.
    pub fn page(&self, address: u16) -> Option<usize> {
        self.pages[usize::from(address >> 8)]
    }

    /// Map the pages spanning `start..=end` to consecutive storage starting
    /// at arena index `base`.
    ///
    /// Both bounds are truncated to page granularity.
    pub fn map(&mut self, start: u16, end: u16, base: usize) {
        let first = usize::from(start >> 8);
        let last = usize::from(end >> 8);

        for (i, page) in (first..=last).enumerate() {
            self.pages[page] = Some(base + i * PAGE_SIZE);
        }
    }

    /// Map a single page.
    pub fn map_page(&mut self, page: u8, base: usize) {
        self.pages[usize::from(page)] = Some(base);
    }

    pub fn clear(&mut self) {
        self.pages = [None; PAGE_COUNT];
    }

    /// Count how many pages are currently backed by storage.
    pub fn mapped_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.is_some()).count()
    }
}

impl Default for BankTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BankTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.pages
                    .iter()
                    .enumerate()
                    .filter_map(|(i, p)| p.map(|base| (i << 8, base))),
            )
            .finish()
    }
}
