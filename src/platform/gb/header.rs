//! Game Boy cartridge header

use crate::platform::gb::{Error, Result};

/// Offset of the cartridge header within the ROM image.
pub const HEADER_OFFSET: usize = 0x134;

/// Offset of the first byte past the cartridge header.
pub const HEADER_END: usize = 0x150;

/// Which memory bank controller a cartridge uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MapperKind {
    /// No banking at all; up to 32KB of ROM and optional RAM.
    None,
    Mbc1,
    Mbc2,
    Mbc3,
    Mbc5,
}

/// The parts of the cartridge header that determine how to map a cartridge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameboyHeader {
    title: String,
    cgb_flag: u8,
    sgb_flag: u8,
    cart_type: u8,
    rom_size: u8,
    ram_size: u8,
}

impl GameboyHeader {
    /// Read the header out of a ROM image.
    pub fn parse(rom: &[u8]) -> Result<Self> {
        if rom.len() < HEADER_END {
            return Err(Error::RomTooSmall(rom.len()));
        }

        let cgb_flag = rom[0x143];

        //CGB-aware carts give up the last byte of the title for the flag
        let title_end = if cgb_flag & 0x80 != 0 { 0x143 } else { 0x144 };
        let title = rom[HEADER_OFFSET..title_end]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    char::from(b)
                } else {
                    '?'
                }
            })
            .collect();

        Ok(GameboyHeader {
            title,
            cgb_flag,
            sgb_flag: rom[0x146],
            cart_type: rom[0x147],
            rom_size: rom[0x148],
            ram_size: rom[0x149],
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn cart_type(&self) -> u8 {
        self.cart_type
    }

    /// Determine if the cartridge can run in Game Boy Color mode.
    pub fn supports_cgb(&self) -> bool {
        self.cgb_flag & 0x80 != 0
    }

    /// Determine if the cartridge refuses to run on anything but a Game Boy
    /// Color.
    pub fn is_cgb_only(&self) -> bool {
        self.cgb_flag & 0xC0 == 0xC0
    }

    pub fn supports_sgb(&self) -> bool {
        self.sgb_flag == 0x03
    }

    pub fn has_battery(&self) -> bool {
        matches!(
            self.cart_type,
            0x03 | 0x06 | 0x09 | 0x0D | 0x0F | 0x10 | 0x13 | 0x1B | 0x1E | 0x22 | 0xFF
        )
    }

    /// Size of the ROM as declared by the header.
    pub fn rom_size(&self) -> usize {
        if self.rom_size <= 8 {
            0x8000 << self.rom_size
        } else {
            0
        }
    }

    /// Size of the cartridge RAM in bytes.
    ///
    /// MBC2 carries 512 half-bytes of RAM inside the mapper itself and
    /// declares no external RAM.
    pub fn cart_ram_size(&self) -> usize {
        if matches!(self.cart_type, 0x05 | 0x06) {
            return 0x200;
        }

        match self.ram_size {
            0x01 => 0x800,
            0x02 => 0x2000,
            0x03 => 0x8000,
            0x04 => 0x2_0000,
            0x05 => 0x1_0000,
            _ => 0,
        }
    }

    /// Determine which mapper the cartridge uses.
    pub fn mapper_kind(&self) -> Result<MapperKind> {
        match self.cart_type {
            0x00 | 0x08 | 0x09 => Ok(MapperKind::None),
            0x01..=0x03 => Ok(MapperKind::Mbc1),
            0x05 | 0x06 => Ok(MapperKind::Mbc2),
            0x0F..=0x13 => Ok(MapperKind::Mbc3),
            0x19..=0x1E => Ok(MapperKind::Mbc5),

            //MMM01, MBC6, MBC7, camera, TAMA5, HuC1 and HuC3
            other => Err(Error::UnsupportedCartType(other)),
        }
    }
}
