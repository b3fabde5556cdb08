//! Platform implementation for Game Boy and its attendant memory mapper chips

mod header;
mod mapper;
mod translate;

pub use header::{GameboyHeader, MapperKind, HEADER_END, HEADER_OFFSET};
pub use mapper::{LinearMapper, Mapper, Mbc1Mapper, Mbc2Mapper, Mbc3Mapper, Mbc5Mapper};
pub use translate::{AddressTranslator, REGION_PRIORITY};

use crate::config::{GameboyConfig, ModelSetting};
use crate::memory::{
    AddressDescriptor, BankTable, MemoryPort, MemoryType, RegionType, Storage, PAGE_SIZE,
};
use log::{debug, trace};
use std::result;
use thiserror::Error;

pub const ROM_BANK_SIZE: usize = 0x4000;
pub const CART_RAM_BANK_SIZE: usize = 0x2000;
pub const WORK_RAM_BANK_SIZE: usize = 0x1000;
pub const VIDEO_RAM_BANK_SIZE: usize = 0x2000;
pub const SPRITE_RAM_SIZE: usize = 0xA0;
pub const HIGH_RAM_SIZE: usize = 0x7F;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("ROM image of {0} bytes is too small to hold a cartridge header")]
    RomTooSmall(usize),

    #[error("cartridge type ${0:02X} is not supported")]
    UnsupportedCartType(u8),
}

pub type Result<T> = result::Result<T, Error>;

/// Which Game Boy hardware revision a cartridge runs on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GbModel {
    Gameboy,
    GameboyColor,
    SuperGameboy,
}

impl GbModel {
    /// Pick the hardware to emulate for a cartridge.
    ///
    /// `Auto` picks the Game Boy Color for CGB-capable carts and the Super
    /// Game Boy for everything else. Without `allow_sgb`, any Super Game Boy
    /// selection runs as a Game Boy Color instead.
    pub fn select(setting: ModelSetting, header: &GameboyHeader, allow_sgb: bool) -> Self {
        let model = match setting {
            ModelSetting::Auto if header.supports_cgb() => GbModel::GameboyColor,
            ModelSetting::Auto | ModelSetting::SuperGameboy => GbModel::SuperGameboy,
            ModelSetting::Gameboy => GbModel::Gameboy,
            ModelSetting::GameboyColor => GbModel::GameboyColor,
        };

        match model {
            GbModel::SuperGameboy if !allow_sgb => GbModel::GameboyColor,
            model => model,
        }
    }

    pub fn is_cgb(self) -> bool {
        self == GbModel::GameboyColor
    }

    pub fn work_ram_size(self) -> usize {
        if self.is_cgb() {
            8 * WORK_RAM_BANK_SIZE
        } else {
            2 * WORK_RAM_BANK_SIZE
        }
    }

    pub fn video_ram_size(self) -> usize {
        if self.is_cgb() {
            2 * VIDEO_RAM_BANK_SIZE
        } else {
            VIDEO_RAM_BANK_SIZE
        }
    }

    /// The CGB boot ROM is 2KB of code plus a hole for the cartridge header.
    pub fn boot_rom_size(self) -> usize {
        if self.is_cgb() {
            9 * PAGE_SIZE
        } else {
            PAGE_SIZE
        }
    }
}

/// The memory of a Game Boy: every physical region, the banked CPU view of
/// them, and the cartridge mapper that decides that view.
#[derive(Debug)]
pub struct GbMemory {
    header: GameboyHeader,
    model: GbModel,
    mapper: Box<dyn Mapper>,
    storage: Storage,
    banks: BankTable,
    boot_rom_enabled: bool,
    work_ram_select: u8,
    video_ram_bank: usize,
}

impl GbMemory {
    /// Load a cartridge.
    ///
    /// `boot_rom` may be empty, in which case the cartridge is visible from
    /// the first instruction.
    pub fn new(rom: &[u8], boot_rom: &[u8], config: &GameboyConfig) -> Result<Self> {
        let header = GameboyHeader::parse(rom)?;
        let kind = header.mapper_kind()?;
        let model = GbModel::select(config.model, &header, config.allow_sgb);

        debug!(
            "cartridge \"{}\" (type ${:02X}) uses mapper {:?}, running as {:?}",
            header.title(),
            header.cart_type(),
            kind,
            model
        );

        let rom_len = (rom.len() + ROM_BANK_SIZE - 1) / ROM_BANK_SIZE * ROM_BANK_SIZE;

        let mut storage = Storage::new();
        storage.load(RegionType::ProgramRom, rom, rom_len.max(2 * ROM_BANK_SIZE));
        storage.allocate(RegionType::WorkRam, model.work_ram_size());
        storage.allocate(RegionType::CartRam, header.cart_ram_size());
        storage.load(RegionType::BootRom, boot_rom, model.boot_rom_size());
        storage.allocate(RegionType::VideoRam, model.video_ram_size());
        storage.allocate(RegionType::SpriteRam, SPRITE_RAM_SIZE);
        storage.allocate(RegionType::HighRam, HIGH_RAM_SIZE);

        let mut memory = GbMemory {
            header,
            model,
            mapper: mapper::for_kind(kind),
            storage,
            banks: BankTable::new(),
            boot_rom_enabled: !boot_rom.is_empty(),
            work_ram_select: 0,
            video_ram_bank: 0,
        };

        memory.remap();

        Ok(memory)
    }

    pub fn header(&self) -> &GameboyHeader {
        &self.header
    }

    pub fn model(&self) -> GbModel {
        self.model
    }

    pub fn mapper(&self) -> &dyn Mapper {
        &*self.mapper
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn bank_table(&self) -> &BankTable {
        &self.banks
    }

    pub fn is_boot_rom_enabled(&self) -> bool {
        self.boot_rom_enabled
    }

    pub fn translator(&self) -> AddressTranslator<'_> {
        AddressTranslator::new(&self.storage, &self.banks)
    }

    pub fn to_absolute(&self, address: u16) -> AddressDescriptor {
        self.translator().to_absolute(address)
    }

    pub fn to_banked(&self, descriptor: &AddressDescriptor) -> i32 {
        self.translator().to_banked(descriptor)
    }

    /// The work RAM bank visible at $D000-$DFFF.
    fn work_ram_bank(&self) -> usize {
        if self.model.is_cgb() {
            usize::from(self.work_ram_select.max(1))
        } else {
            1
        }
    }

    /// Map a window of the CPU address space onto a region, starting at
    /// `offset` into it. Windows larger than the region repeat it.
    fn map_window(&mut self, region: RegionType, start: u16, end: u16, offset: usize) {
        let block = match self.storage.block(region) {
            Some(block) if !block.is_empty() => block,
            _ => return,
        };

        let len = usize::from(end | 0xFF) - usize::from(start & !0xFF) + 1;
        let within = offset % block.len();

        if within + len <= block.len() {
            self.banks.map(start, end, block.base() + within);
            return;
        }

        for (i, page) in ((start >> 8)..=(end >> 8)).enumerate() {
            let within = (offset + i * PAGE_SIZE) % block.len();

            self.banks.map_page(page as u8, block.base() + within);
        }
    }

    /// Rebuild the bank table from the current mapper and banking registers.
    fn remap(&mut self) {
        self.banks.clear();

        let rom_bank = self.mapper.rom_bank();
        let work_ram_bank = self.work_ram_bank();

        self.map_window(RegionType::ProgramRom, 0x0000, 0x3FFF, 0);
        self.map_window(
            RegionType::ProgramRom,
            0x4000,
            0x7FFF,
            rom_bank * ROM_BANK_SIZE,
        );

        if self.mapper.ram_enabled() {
            let offset = self.mapper.ram_bank() * CART_RAM_BANK_SIZE;

            self.map_window(RegionType::CartRam, 0xA000, 0xBFFF, offset);
        }

        let offset = work_ram_bank * WORK_RAM_BANK_SIZE;

        self.map_window(RegionType::WorkRam, 0xC000, 0xCFFF, 0);
        self.map_window(RegionType::WorkRam, 0xD000, 0xDFFF, offset);
        self.map_window(RegionType::WorkRam, 0xE000, 0xEFFF, 0);
        self.map_window(RegionType::WorkRam, 0xF000, 0xFDFF, offset);

        if self.boot_rom_enabled {
            self.map_window(RegionType::BootRom, 0x0000, 0x00FF, 0);

            //$0100-$01FF stays on the cartridge so the header is readable
            if self.model.is_cgb() {
                self.map_window(RegionType::BootRom, 0x0200, 0x08FF, 0x200);
            }
        }

        trace!(
            "remapped: ROM bank {}, WRAM bank {}, cart RAM {}, boot ROM {}",
            rom_bank,
            work_ram_bank,
            self.mapper.ram_enabled(),
            self.boot_rom_enabled
        );
    }

    fn load(&self, region: RegionType, offset: usize) -> u8 {
        self.storage
            .index_of(region, offset)
            .and_then(|index| self.storage.get(index))
            .unwrap_or(0xFF)
    }

    fn store(&mut self, region: RegionType, offset: usize, value: u8) {
        if let Some(index) = self.storage.index_of(region, offset) {
            self.storage.set(index, value);
        }
    }

    fn video_ram_offset(&self, address: u16) -> usize {
        self.video_ram_bank * VIDEO_RAM_BANK_SIZE + usize::from(address - 0x8000)
    }

    /// Read a byte as the CPU would see it.
    ///
    /// Unmapped addresses and I/O registers this manager does not own read
    /// as $FF. Reads never have side effects.
    pub fn read(&self, address: u16) -> u8 {
        match address {
            0x8000..=0x9FFF => self.load(RegionType::VideoRam, self.video_ram_offset(address)),
            0xFE00..=0xFE9F => self.load(RegionType::SpriteRam, usize::from(address - 0xFE00)),
            0xFF4F if self.model.is_cgb() => 0xFE | self.video_ram_bank as u8,
            0xFF70 if self.model.is_cgb() => 0xF8 | self.work_ram_select,
            0xFF80..=0xFFFE => self.load(RegionType::HighRam, usize::from(address & 0x7F)),
            _ => self
                .banks
                .page(address)
                .and_then(|base| self.storage.get(base + usize::from(address & 0xFF)))
                .unwrap_or(0xFF),
        }
    }

    /// Write a byte as the CPU would, updating the bank table if the write
    /// changes banking.
    pub fn write(&mut self, address: u16, value: u8) {
        match address {
            0x0000..=0x7FFF => {
                if self.mapper.register_write(address, value) {
                    self.remap();
                }
            }
            0x8000..=0x9FFF => {
                let offset = self.video_ram_offset(address);

                self.store(RegionType::VideoRam, offset, value);
            }
            0xA000..=0xFDFF => {
                let index = match self.banks.page(address) {
                    Some(base) => base + usize::from(address & 0xFF),
                    None => return,
                };

                let writable = [RegionType::CartRam, RegionType::WorkRam];
                if self.storage.locate(index, &writable).is_some() {
                    self.storage.set(index, value);
                }
            }
            0xFE00..=0xFE9F => {
                self.store(RegionType::SpriteRam, usize::from(address - 0xFE00), value)
            }
            0xFF4F if self.model.is_cgb() => self.video_ram_bank = usize::from(value & 0x01),
            0xFF50 if value != 0 && self.boot_rom_enabled => {
                self.boot_rom_enabled = false;
                self.remap();
            }
            0xFF70 if self.model.is_cgb() => {
                self.work_ram_select = value & 0x07;
                self.remap();
            }
            0xFF80..=0xFFFE => {
                self.store(RegionType::HighRam, usize::from(address & 0x7F), value)
            }
            _ => {}
        }
    }
}

impl MemoryPort for GbMemory {
    fn read_byte(&self, mem_type: MemoryType, address: u32) -> u8 {
        match mem_type {
            MemoryType::CpuBus(_) => self.read(address as u16),
            MemoryType::Region(region) => self
                .storage
                .region(region)
                .and_then(|bytes| bytes.get(address as usize))
                .copied()
                .unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests;
