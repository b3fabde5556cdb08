//! Memory bank controllers

use crate::platform::gb::header::MapperKind;
use std::fmt;

/// A cartridge memory bank controller.
///
/// Mappers only track their register state; turning that state into page
/// mappings is the job of the memory manager.
pub trait Mapper: Send + Sync + fmt::Debug {
    /// Accept a CPU write into cartridge ROM space.
    ///
    /// Returns `true` if the write touched a mapper register and the bank
    /// table needs to be rebuilt.
    fn register_write(&mut self, address: u16, value: u8) -> bool;

    /// The ROM bank visible at $4000-$7FFF.
    fn rom_bank(&self) -> usize;

    /// The cartridge RAM bank visible at $A000-$BFFF.
    fn ram_bank(&self) -> usize {
        0
    }

    /// Determine if cartridge RAM is visible at all.
    fn ram_enabled(&self) -> bool;
}

fn is_ram_enable(value: u8) -> bool {
    value & 0x0F == 0x0A
}

/// Construct the mapper for a cartridge.
pub fn for_kind(kind: MapperKind) -> Box<dyn Mapper> {
    match kind {
        MapperKind::None => Box::new(LinearMapper),
        MapperKind::Mbc1 => Box::new(Mbc1Mapper::default()),
        MapperKind::Mbc2 => Box::new(Mbc2Mapper::default()),
        MapperKind::Mbc3 => Box::new(Mbc3Mapper::default()),
        MapperKind::Mbc5 => Box::new(Mbc5Mapper::default()),
    }
}

/// Cartridges with no mapper: bank 1 is always visible and any RAM is
/// always enabled.
#[derive(Copy, Clone, Debug, Default)]
pub struct LinearMapper;

impl Mapper for LinearMapper {
    fn register_write(&mut self, _address: u16, _value: u8) -> bool {
        false
    }

    fn rom_bank(&self) -> usize {
        1
    }

    fn ram_enabled(&self) -> bool {
        true
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Mbc1Mapper {
    ram_enable: bool,
    low: u8,
    high: u8,
    ram_mode: bool,
}

impl Default for Mbc1Mapper {
    fn default() -> Self {
        Mbc1Mapper {
            ram_enable: false,
            low: 1,
            high: 0,
            ram_mode: false,
        }
    }
}

impl Mapper for Mbc1Mapper {
    fn register_write(&mut self, address: u16, value: u8) -> bool {
        match address {
            0x0000..=0x1FFF => self.ram_enable = is_ram_enable(value),
            0x2000..=0x3FFF => {
                self.low = match value & 0x1F {
                    0 => 1,
                    bank => bank,
                }
            }
            0x4000..=0x5FFF => self.high = value & 0x03,
            0x6000..=0x7FFF => self.ram_mode = value & 0x01 != 0,
            _ => return false,
        }

        true
    }

    fn rom_bank(&self) -> usize {
        usize::from(self.high) << 5 | usize::from(self.low)
    }

    fn ram_bank(&self) -> usize {
        if self.ram_mode {
            usize::from(self.high)
        } else {
            0
        }
    }

    fn ram_enabled(&self) -> bool {
        self.ram_enable
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Mbc2Mapper {
    ram_enable: bool,
    bank: u8,
}

impl Default for Mbc2Mapper {
    fn default() -> Self {
        Mbc2Mapper {
            ram_enable: false,
            bank: 1,
        }
    }
}

impl Mapper for Mbc2Mapper {
    fn register_write(&mut self, address: u16, value: u8) -> bool {
        if address > 0x3FFF {
            return false;
        }

        //Address bit 8 selects between the RAM enable and bank registers
        if address & 0x100 != 0 {
            self.bank = match value & 0x0F {
                0 => 1,
                bank => bank,
            };
        } else {
            self.ram_enable = is_ram_enable(value);
        }

        true
    }

    fn rom_bank(&self) -> usize {
        usize::from(self.bank)
    }

    fn ram_enabled(&self) -> bool {
        self.ram_enable
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Mbc3Mapper {
    ram_enable: bool,
    rom: u8,
    ram: u8,
}

impl Default for Mbc3Mapper {
    fn default() -> Self {
        Mbc3Mapper {
            ram_enable: false,
            rom: 1,
            ram: 0,
        }
    }
}

impl Mapper for Mbc3Mapper {
    fn register_write(&mut self, address: u16, value: u8) -> bool {
        match address {
            0x0000..=0x1FFF => self.ram_enable = is_ram_enable(value),
            0x2000..=0x3FFF => {
                self.rom = match value & 0x7F {
                    0 => 1,
                    bank => bank,
                }
            }
            0x4000..=0x5FFF => self.ram = value,

            //Includes the clock latch; the RTC is not modeled
            _ => return false,
        }

        true
    }

    fn rom_bank(&self) -> usize {
        usize::from(self.rom)
    }

    fn ram_bank(&self) -> usize {
        usize::from(self.ram & 0x03)
    }

    /// Selecting one of the clock registers ($08-$0C) hides cartridge RAM.
    fn ram_enabled(&self) -> bool {
        self.ram_enable && self.ram <= 0x03
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Mbc5Mapper {
    ram_enable: bool,
    rom: u16,
    ram: u8,
}

impl Default for Mbc5Mapper {
    fn default() -> Self {
        Mbc5Mapper {
            ram_enable: false,
            rom: 1,
            ram: 0,
        }
    }
}

impl Mapper for Mbc5Mapper {
    fn register_write(&mut self, address: u16, value: u8) -> bool {
        match address {
            0x0000..=0x1FFF => self.ram_enable = is_ram_enable(value),
            0x2000..=0x2FFF => self.rom = (self.rom & 0x100) | u16::from(value),
            0x3000..=0x3FFF => self.rom = (self.rom & 0xFF) | (u16::from(value & 0x01) << 8),
            0x4000..=0x5FFF => self.ram = value & 0x0F,
            _ => return false,
        }

        true
    }

    fn rom_bank(&self) -> usize {
        usize::from(self.rom)
    }

    fn ram_bank(&self) -> usize {
        usize::from(self.ram)
    }

    fn ram_enabled(&self) -> bool {
        self.ram_enable
    }
}
