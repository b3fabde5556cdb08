//! Game Boy memory model tests

use crate::analysis::InstructionRecord;
use crate::arch::ArchName;
use crate::asm::Renderer;
use crate::config::{GameboyConfig, ModelSetting};
use crate::memory::{AddressDescriptor, MemoryPort, MemoryType, RegionType};
use crate::platform::gb::{Error, GameboyHeader, GbMemory, GbModel, MapperKind};
use proptest::prelude::*;

/// Build a cartridge image whose every ROM bank starts with its own number.
fn cart(cart_type: u8, ram_size: u8, cgb_flag: u8, banks: usize) -> Vec<u8> {
    let mut rom = vec![0; banks * 0x4000];

    for (bank, chunk) in rom.chunks_mut(0x4000).enumerate() {
        chunk[0] = bank as u8;
    }

    rom[0x134..0x13C].copy_from_slice(b"TESTCART");
    rom[0x143] = cgb_flag;
    rom[0x146] = 0x03;
    rom[0x147] = cart_type;
    rom[0x148] = match banks {
        2 => 0,
        4 => 1,
        _ => 2,
    };
    rom[0x149] = ram_size;

    rom
}

fn dmg() -> GameboyConfig {
    GameboyConfig {
        model: ModelSetting::Gameboy,
        allow_sgb: false,
    }
}

fn load(cart_type: u8, ram_size: u8) -> GbMemory {
    GbMemory::new(&cart(cart_type, ram_size, 0, 8), &[], &dmg()).unwrap()
}

fn at(region: RegionType, offset: i32) -> AddressDescriptor {
    AddressDescriptor::new(region, offset)
}

#[test]
fn header_fields() {
    let header = GameboyHeader::parse(&cart(0x03, 0x03, 0, 8)).unwrap();

    assert_eq!(header.title(), "TESTCART");
    assert_eq!(header.cart_type(), 0x03);
    assert_eq!(header.mapper_kind(), Ok(MapperKind::Mbc1));
    assert!(header.has_battery());
    assert!(header.supports_sgb());
    assert!(!header.supports_cgb());
    assert_eq!(header.rom_size(), 0x2_0000);
    assert_eq!(header.cart_ram_size(), 0x8000);

    let mbc2 = GameboyHeader::parse(&cart(0x05, 0x00, 0, 2)).unwrap();
    assert_eq!(mbc2.mapper_kind(), Ok(MapperKind::Mbc2));
    assert_eq!(mbc2.cart_ram_size(), 0x200);
    assert!(!mbc2.has_battery());

    let cgb = GameboyHeader::parse(&cart(0x1B, 0x02, 0xC0, 2)).unwrap();
    assert_eq!(cgb.mapper_kind(), Ok(MapperKind::Mbc5));
    assert!(cgb.supports_cgb());
    assert!(cgb.is_cgb_only());
    assert_eq!(cgb.cart_ram_size(), 0x2000);
}

#[test]
fn header_mapper_table() {
    let kind = |t| GameboyHeader::parse(&cart(t, 0, 0, 2)).unwrap().mapper_kind();

    assert_eq!(kind(0x00), Ok(MapperKind::None));
    assert_eq!(kind(0x09), Ok(MapperKind::None));
    assert_eq!(kind(0x02), Ok(MapperKind::Mbc1));
    assert_eq!(kind(0x06), Ok(MapperKind::Mbc2));
    assert_eq!(kind(0x0F), Ok(MapperKind::Mbc3));
    assert_eq!(kind(0x13), Ok(MapperKind::Mbc3));
    assert_eq!(kind(0x19), Ok(MapperKind::Mbc5));
    assert_eq!(kind(0x1E), Ok(MapperKind::Mbc5));
    assert_eq!(kind(0x20), Err(Error::UnsupportedCartType(0x20)));
    assert_eq!(kind(0xFE), Err(Error::UnsupportedCartType(0xFE)));
}

#[test]
fn cartridge_errors() {
    assert_eq!(
        GameboyHeader::parse(&[0; 0x14F]),
        Err(Error::RomTooSmall(0x14F))
    );
    assert_eq!(
        GbMemory::new(&[0; 0x100], &[], &dmg()).err(),
        Some(Error::RomTooSmall(0x100))
    );
    assert_eq!(
        GbMemory::new(&cart(0xFC, 0, 0, 2), &[], &dmg()).err(),
        Some(Error::UnsupportedCartType(0xFC))
    );
}

#[test]
fn model_selection() {
    let dmg_cart = GameboyHeader::parse(&cart(0, 0, 0x00, 2)).unwrap();
    let cgb_cart = GameboyHeader::parse(&cart(0, 0, 0x80, 2)).unwrap();
    let select = GbModel::select;

    assert_eq!(select(ModelSetting::Auto, &cgb_cart, false), GbModel::GameboyColor);
    assert_eq!(select(ModelSetting::Auto, &cgb_cart, true), GbModel::GameboyColor);
    assert_eq!(select(ModelSetting::Auto, &dmg_cart, true), GbModel::SuperGameboy);
    assert_eq!(select(ModelSetting::Auto, &dmg_cart, false), GbModel::GameboyColor);
    assert_eq!(select(ModelSetting::SuperGameboy, &dmg_cart, true), GbModel::SuperGameboy);
    assert_eq!(select(ModelSetting::SuperGameboy, &dmg_cart, false), GbModel::GameboyColor);
    assert_eq!(select(ModelSetting::Gameboy, &cgb_cart, true), GbModel::Gameboy);
    assert_eq!(select(ModelSetting::GameboyColor, &dmg_cart, false), GbModel::GameboyColor);
}

#[test]
fn default_config_runs_plain_carts_as_color() {
    let mut memory = GbMemory::new(&cart(0x00, 0x00, 0x00, 2), &[], &GameboyConfig::default()).unwrap();

    assert_eq!(memory.model(), GbModel::GameboyColor);
    assert_eq!(memory.storage().region_len(RegionType::WorkRam), 0x8000);
    assert_eq!(memory.storage().region_len(RegionType::VideoRam), 0x4000);

    memory.write(0xFF70, 0x03);
    assert_eq!(memory.to_absolute(0xD000), at(RegionType::WorkRam, 0x3000));

    let sgb = GameboyConfig {
        model: ModelSetting::Auto,
        allow_sgb: true,
    };
    let mut memory = GbMemory::new(&cart(0x00, 0x00, 0x00, 2), &[], &sgb).unwrap();

    assert_eq!(memory.model(), GbModel::SuperGameboy);
    assert_eq!(memory.storage().region_len(RegionType::WorkRam), 0x2000);

    memory.write(0xFF70, 0x03);
    assert_eq!(memory.to_absolute(0xD000), at(RegionType::WorkRam, 0x1000));
}

#[test]
fn bank_table_covers_rom_and_work_ram() {
    let mut memory = load(0x03, 0x03);

    //ROM $0000-$7FFF plus work RAM and its echo at $C000-$FDFF
    assert_eq!(memory.bank_table().mapped_pages(), 0x80 + 0x3E);
    assert_eq!(memory.bank_table().page(0x4100), memory.storage().index_of(RegionType::ProgramRom, 0x4100));

    memory.write(0x0000, 0x0A);
    assert_eq!(memory.bank_table().mapped_pages(), 0x80 + 0x20 + 0x3E);

    //Built-in MBC2 RAM repeats across the whole window
    let mut mbc2 = load(0x05, 0x00);
    mbc2.write(0x0000, 0x0A);

    assert_eq!(mbc2.bank_table().mapped_pages(), 0x80 + 0x20 + 0x3E);
    assert_eq!(mbc2.bank_table().page(0xA000), mbc2.bank_table().page(0xBE00));
}

#[test]
fn storage_is_sized_by_model() {
    let memory = load(0x00, 0x00);
    let storage = memory.storage();

    assert_eq!(memory.model(), GbModel::Gameboy);
    assert_eq!(storage.region_len(RegionType::ProgramRom), 8 * 0x4000);
    assert_eq!(storage.region_len(RegionType::WorkRam), 0x2000);
    assert_eq!(storage.region_len(RegionType::VideoRam), 0x2000);
    assert_eq!(storage.region_len(RegionType::BootRom), 0x100);
    assert_eq!(storage.region_len(RegionType::CartRam), 0);
    assert_eq!(storage.region_len(RegionType::SpriteRam), 0xA0);
    assert_eq!(storage.region_len(RegionType::HighRam), 0x7F);

    let color = GbMemory::new(&cart(0x00, 0x00, 0x80, 2), &[], &GameboyConfig::default()).unwrap();
    let storage = color.storage();

    assert_eq!(color.model(), GbModel::GameboyColor);
    assert_eq!(storage.region_len(RegionType::WorkRam), 0x8000);
    assert_eq!(storage.region_len(RegionType::VideoRam), 0x4000);
    assert_eq!(storage.region_len(RegionType::BootRom), 0x900);
}

#[test]
fn high_ram_maps_directly() {
    let memory = load(0x00, 0x00);

    assert_eq!(memory.to_absolute(0xFF80), at(RegionType::HighRam, 0));
    assert_eq!(memory.to_absolute(0xFFFE), at(RegionType::HighRam, 0x7E));
    assert_eq!(memory.to_banked(&at(RegionType::HighRam, 0x10)), 0xFF90);
}

#[test]
fn unmapped_addresses() {
    let memory = load(0x03, 0x02);

    //Video RAM, sprite RAM and I/O are not part of the bank table
    assert_eq!(memory.to_absolute(0x8000), AddressDescriptor::UNMAPPED);
    assert_eq!(memory.to_absolute(0xFE00), AddressDescriptor::UNMAPPED);
    assert_eq!(memory.to_absolute(0xFF00), AddressDescriptor::UNMAPPED);
    assert_eq!(memory.to_absolute(0xFFFF), AddressDescriptor::UNMAPPED);

    //Cartridge RAM starts out disabled
    assert_eq!(memory.to_absolute(0xA000), AddressDescriptor::UNMAPPED);
    assert_eq!(memory.to_banked(&at(RegionType::CartRam, 0)), -1);

    assert_eq!(memory.to_banked(&AddressDescriptor::UNMAPPED), -1);
    assert_eq!(memory.to_banked(&at(RegionType::VideoRam, 0)), -1);
    assert_eq!(memory.to_banked(&at(RegionType::WorkRam, -1)), -1);
}

#[test]
fn echo_ram_resolves_to_first_mirror() {
    let memory = load(0x00, 0x00);

    assert_eq!(memory.to_absolute(0xE010), at(RegionType::WorkRam, 0x10));
    assert_eq!(memory.to_absolute(0xF123), at(RegionType::WorkRam, 0x1123));
    assert_eq!(memory.to_banked(&at(RegionType::WorkRam, 0x10)), 0xC010);
    assert_eq!(memory.to_banked(&at(RegionType::WorkRam, 0x1123)), 0xD123);
}

#[test]
fn mbc1_rom_banking() {
    let mut memory = load(0x01, 0x00);

    assert_eq!(memory.to_absolute(0x0150), at(RegionType::ProgramRom, 0x150));
    assert_eq!(memory.to_absolute(0x4000), at(RegionType::ProgramRom, 0x4000));

    memory.write(0x2000, 3);
    assert_eq!(memory.to_absolute(0x4000), at(RegionType::ProgramRom, 0xC000));
    assert_eq!(memory.read(0x4000), 3);
    assert_eq!(memory.to_banked(&at(RegionType::ProgramRom, 0xC010)), 0x4010);
    assert_eq!(memory.to_banked(&at(RegionType::ProgramRom, 0x8000)), -1);

    memory.write(0x2000, 0);
    assert_eq!(memory.mapper().rom_bank(), 1);
    assert_eq!(memory.read(0x4000), 1);

    //Banks past the end of the ROM wrap around
    memory.write(0x2000, 0x1F);
    assert_eq!(memory.to_absolute(0x4000), at(RegionType::ProgramRom, 0x1C000));
}

#[test]
fn mbc1_cart_ram() {
    let mut memory = load(0x03, 0x03);

    memory.write(0xA005, 0x77);
    assert_eq!(memory.read(0xA005), 0xFF);

    memory.write(0x0000, 0x0A);
    assert_eq!(memory.to_absolute(0xA000), at(RegionType::CartRam, 0));

    memory.write(0x6000, 0x01);
    memory.write(0x4000, 0x02);
    assert_eq!(memory.to_absolute(0xA000), at(RegionType::CartRam, 0x4000));

    memory.write(0xA005, 0x77);
    assert_eq!(memory.read(0xA005), 0x77);
    assert_eq!(
        memory.read_byte(MemoryType::Region(RegionType::CartRam), 0x4005),
        0x77
    );

    memory.write(0x0000, 0x00);
    assert_eq!(memory.to_absolute(0xA000), AddressDescriptor::UNMAPPED);
}

#[test]
fn mbc2_register_select_and_builtin_ram() {
    let mut memory = load(0x05, 0x00);

    //Address bit 8 set selects the bank register
    memory.write(0x2100, 0x05);
    assert_eq!(memory.read(0x4000), 5);

    //...and clear selects RAM enable
    memory.write(0x2000, 0x0A);
    assert_eq!(memory.mapper().rom_bank(), 5);
    assert_eq!(memory.to_absolute(0xA000), at(RegionType::CartRam, 0));
    assert_eq!(memory.to_absolute(0xA310), at(RegionType::CartRam, 0x110));
    assert_eq!(memory.to_banked(&at(RegionType::CartRam, 0x110)), 0xA110);
}

#[test]
fn mbc3_rom_and_clock_select() {
    let mut memory = load(0x13, 0x03);

    memory.write(0x2000, 0x00);
    assert_eq!(memory.mapper().rom_bank(), 1);

    memory.write(0x2000, 0x85);
    assert_eq!(memory.read(0x4000), 5);

    memory.write(0x0000, 0x0A);
    memory.write(0x4000, 0x01);
    assert_eq!(memory.to_absolute(0xA000), at(RegionType::CartRam, 0x2000));

    //Selecting a clock register hides cartridge RAM
    memory.write(0x4000, 0x08);
    assert_eq!(memory.to_absolute(0xA000), AddressDescriptor::UNMAPPED);
}

#[test]
fn mbc5_nine_bit_banks() {
    let mut memory = load(0x19, 0x00);

    memory.write(0x2000, 0x00);
    assert_eq!(memory.to_absolute(0x4000), at(RegionType::ProgramRom, 0));

    memory.write(0x3000, 0x01);
    memory.write(0x2000, 0x02);
    assert_eq!(memory.mapper().rom_bank(), 0x102);
    assert_eq!(memory.to_absolute(0x4000), at(RegionType::ProgramRom, 0x8000));
}

#[test]
fn unbanked_cart_ignores_register_writes() {
    let mut memory = load(0x00, 0x00);

    memory.write(0x2000, 0x03);
    assert_eq!(memory.read(0x4000), 1);
    assert_eq!(memory.read(0x0000), 0);
}

#[test]
fn boot_rom_overlay() {
    let boot = vec![0x31; 0x100];
    let mut memory = GbMemory::new(&cart(0x00, 0x00, 0, 2), &boot, &dmg()).unwrap();

    assert!(memory.is_boot_rom_enabled());
    assert_eq!(memory.to_absolute(0x0000), at(RegionType::BootRom, 0));
    assert_eq!(memory.to_absolute(0x0100), at(RegionType::ProgramRom, 0x100));
    assert_eq!(memory.read(0x0000), 0x31);

    memory.write(0xFF50, 0x01);
    assert!(!memory.is_boot_rom_enabled());
    assert_eq!(memory.to_absolute(0x0000), at(RegionType::ProgramRom, 0));
    assert_eq!(memory.to_banked(&at(RegionType::BootRom, 0)), -1);
}

#[test]
fn cgb_boot_rom_skips_header() {
    let boot = vec![0x31; 0x900];
    let memory = GbMemory::new(&cart(0x00, 0x00, 0x80, 2), &boot, &GameboyConfig::default()).unwrap();

    assert_eq!(memory.to_absolute(0x0010), at(RegionType::BootRom, 0x10));
    assert_eq!(memory.to_absolute(0x0150), at(RegionType::ProgramRom, 0x150));
    assert_eq!(memory.to_absolute(0x0210), at(RegionType::BootRom, 0x210));
    assert_eq!(memory.to_absolute(0x0900), at(RegionType::ProgramRom, 0x900));
}

#[test]
fn cgb_work_ram_banking() {
    let mut memory = GbMemory::new(&cart(0x00, 0x00, 0x80, 2), &[], &GameboyConfig::default()).unwrap();

    assert_eq!(memory.to_absolute(0xD000), at(RegionType::WorkRam, 0x1000));

    memory.write(0xFF70, 0x03);
    assert_eq!(memory.to_absolute(0xD000), at(RegionType::WorkRam, 0x3000));
    assert_eq!(memory.to_absolute(0xF000), at(RegionType::WorkRam, 0x3000));
    assert_eq!(memory.read(0xFF70), 0xFB);

    //Bank 0 selects bank 1
    memory.write(0xFF70, 0x00);
    assert_eq!(memory.to_absolute(0xD000), at(RegionType::WorkRam, 0x1000));

    let mut plain = load(0x00, 0x00);
    plain.write(0xFF70, 0x03);
    assert_eq!(plain.to_absolute(0xD000), at(RegionType::WorkRam, 0x1000));
}

#[test]
fn unbanked_regions_are_readable() {
    let mut memory = load(0x00, 0x00);

    memory.write(0x8001, 0x12);
    memory.write(0xFE02, 0x34);
    memory.write(0xFF81, 0x56);
    memory.write(0xC003, 0x78);

    assert_eq!(memory.read(0x8001), 0x12);
    assert_eq!(memory.read(0xFE02), 0x34);
    assert_eq!(memory.read(0xFF81), 0x56);
    assert_eq!(memory.read(0xE003), 0x78);

    let region = |r| MemoryType::Region(r);
    assert_eq!(memory.read_byte(region(RegionType::VideoRam), 1), 0x12);
    assert_eq!(memory.read_byte(region(RegionType::SpriteRam), 2), 0x34);
    assert_eq!(memory.read_byte(region(RegionType::HighRam), 1), 0x56);
    assert_eq!(memory.read_byte(region(RegionType::WorkRam), 3), 0x78);

    //ROM is not writable through the bus
    memory.write(0x0150, 0xAA);
    assert_eq!(memory.read(0x0150), 0);
}

#[test]
fn decode_through_banked_bus() {
    let mut rom = cart(0x01, 0x00, 0, 8);
    rom[0x8010..0x8013].copy_from_slice(&[0xC3, 0x50, 0x01]);

    let mut memory = GbMemory::new(&rom, &[], &dmg()).unwrap();
    memory.write(0x2000, 0x02);

    let record = InstructionRecord::capture(0x4010, 0, ArchName::Gameboy, &memory).unwrap();

    assert_eq!(
        memory.read_word(MemoryType::CpuBus(ArchName::Gameboy), 0x4011),
        0x0150
    );
    assert_eq!(
        record.render(0x4010, &Renderer::default()).unwrap(),
        "JP $0150"
    );
    assert!(record.is_unconditional_jump().unwrap());
}

/// A write that can change banking: a mapper register, or the CGB work
/// RAM bank select.
fn banking_write() -> impl Strategy<Value = (u16, u8)> {
    (
        prop_oneof![0x0000..0x8000u16, Just(0xFF70u16)],
        any::<u8>(),
    )
}

proptest! {
    #[test]
    fn translation_round_trips(
        cart_type in prop::sample::select(vec![0x00u8, 0x03, 0x05, 0x13, 0x1B]),
        color in any::<bool>(),
        writes in prop::collection::vec(banking_write(), 0..16),
        address in any::<u16>()
    ) {
        let rom = cart(cart_type, 0x03, if color { 0x80 } else { 0 }, 8);
        let mut memory = GbMemory::new(&rom, &[], &GameboyConfig::default()).unwrap();

        for (register, value) in writes {
            memory.write(register, value);
        }

        let absolute = memory.to_absolute(address);

        if absolute.is_mapped() {
            let banked = memory.to_banked(&absolute);

            prop_assert!(banked >= 0);
            prop_assert_eq!(banked & 0xFF, i32::from(address & 0xFF));
            prop_assert_eq!(memory.to_absolute(banked as u16), absolute);
        } else {
            prop_assert_eq!(absolute, AddressDescriptor::UNMAPPED);
        }
    }

    #[test]
    fn high_ram_ignores_banking(
        writes in prop::collection::vec(banking_write(), 0..16),
        address in 0xFF80..=0xFFFEu16
    ) {
        let mut memory = load(0x1B, 0x03);

        for (register, value) in writes {
            memory.write(register, value);
        }

        let absolute = memory.to_absolute(address);

        prop_assert_eq!(absolute, at(RegionType::HighRam, i32::from(address & 0x7F)));
        prop_assert_eq!(memory.to_banked(&absolute), i32::from(address));
    }
}
