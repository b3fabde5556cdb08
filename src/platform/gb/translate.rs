//! Translation between banked CPU addresses and physical locations

use crate::memory::{AddressDescriptor, BankTable, RegionType, Storage, PAGE_SIZE};
use log::trace;

/// Regions a mapped page may resolve into, in the order they are tested.
pub const REGION_PRIORITY: [RegionType; 4] = [
    RegionType::ProgramRom,
    RegionType::WorkRam,
    RegionType::CartRam,
    RegionType::BootRom,
];

/// Converts between the Game Boy's 16-bit banked address space and
/// banking-independent `AddressDescriptor`s.
///
/// A translator is a read-only view over the current bank table; bank
/// switches happen on the memory manager it was borrowed from.
#[derive(Copy, Clone, Debug)]
pub struct AddressTranslator<'a> {
    storage: &'a Storage,
    banks: &'a BankTable,
}

impl<'a> AddressTranslator<'a> {
    pub fn new(storage: &'a Storage, banks: &'a BankTable) -> Self {
        AddressTranslator { storage, banks }
    }

    /// Find the physical location a CPU address currently maps to.
    pub fn to_absolute(&self, address: u16) -> AddressDescriptor {
        if (0xFF80..=0xFFFE).contains(&address) {
            return AddressDescriptor::new(RegionType::HighRam, i32::from(address & 0x7F));
        }

        let index = match self.banks.page(address) {
            Some(base) => base + usize::from(address & 0xFF),
            None => return AddressDescriptor::unmapped(),
        };

        match self.storage.locate(index, &REGION_PRIORITY) {
            Some((region, offset)) => AddressDescriptor::new(region, offset as i32),
            None => AddressDescriptor::unmapped(),
        }
    }

    /// Find a CPU address that currently maps to a physical location.
    ///
    /// When the location is mirrored, the lowest mapping address wins.
    /// Returns `-1` if nothing in the address space maps there.
    pub fn to_banked(&self, descriptor: &AddressDescriptor) -> i32 {
        match descriptor.region {
            RegionType::HighRam => return 0xFF80 | (descriptor.offset & 0x7F),
            RegionType::Unmapped => return -1,
            _ if descriptor.offset < 0 => return -1,
            _ => {}
        }

        let window = descriptor.offset & !0xFF;

        for page in (0..=0xFF00u32).step_by(PAGE_SIZE) {
            let found = self.to_absolute(page as u16);

            if found.region == descriptor.region && found.offset & !0xFF == window {
                return page as i32 | (descriptor.offset & 0xFF);
            }
        }

        trace!("{} is not visible to the CPU", descriptor);

        -1
    }
}
