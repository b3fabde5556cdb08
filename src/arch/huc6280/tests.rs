//! HuC6280 test suite

use crate::analysis::{EffectiveAddressInfo, Error, InstructionRecord};
use crate::arch::ArchName;
use crate::asm::Renderer;
use crate::memory::BinaryImage;
use crate::reg::{CpuState, NesCpuState, PceCpuState};
use std::collections::HashMap;

macro_rules! assert_huc6280 {
    ($data: expr, $text: expr, $len: expr) => {{
        let record = InstructionRecord::from_bytes(ArchName::Pce, 0, &$data).unwrap();

        assert_eq!(
            (
                record.render(0xE000, &Renderer::default()).unwrap(),
                record.length().unwrap()
            ),
            ($text.to_string(), $len)
        )
    }};
}

fn record(data: &[u8]) -> InstructionRecord {
    InstructionRecord::from_bytes(ArchName::Pce, 0, data).unwrap()
}

#[test]
fn huc6280_disasm() {
    assert_huc6280!([0xA9, 0x12], "LDA #$12", 2);
    assert_huc6280!([0x12, 0x20], "ORA ($20)", 2);
    assert_huc6280!([0x62], "CLA", 1);
    assert_huc6280!([0x02], "SXY", 1);
    assert_huc6280!([0xD4], "CSH", 1);
    assert_huc6280!([0x87, 0x10], "SMB0 $10", 2);
    assert_huc6280!([0x7C, 0x00, 0xE1], "JMP ($E100,X)", 3);
    assert_huc6280!([0x44, 0x10], "BSR $E012", 2);
    assert_huc6280!([0x80, 0xFE], "BRA $E000", 2);
}

#[test]
fn huc6280_extended_lengths() {
    assert_huc6280!([0x03, 0x00], "ST0 #$00", 2);
    assert_huc6280!([0x23, 0x7F], "ST2 #$7F", 2);
    assert_huc6280!([0x53, 0x01], "TAM #$01", 2);
    assert_huc6280!([0x43, 0x80], "TMA #$80", 2);
    assert_huc6280!([0x83, 0x01, 0x10], "TST #$01, $10", 3);
    assert_huc6280!([0xA3, 0x01, 0x10], "TST #$01, $10,X", 3);
    assert_huc6280!([0x93, 0x80, 0x00, 0x30], "TST #$80, $3000", 4);
    assert_huc6280!([0xB3, 0x80, 0x00, 0x30], "TST #$80, $3000,X", 4);
    assert_huc6280!([0x0F, 0x10, 0xFD], "BBR0 $10, $E000", 3);
    assert_huc6280!([0xFF, 0x10, 0x10], "BBS7 $10, $E013", 3);
    assert_huc6280!(
        [0x73, 0x00, 0x20, 0x00, 0x30, 0x10, 0x00],
        "TII $2000, $3000, $0010",
        7
    );

    for &block in &[0x73, 0xC3, 0xD3, 0xE3, 0xF3] {
        assert_eq!(record(&[block]).length().unwrap(), 7);
    }
}

#[test]
fn huc6280_zero_page_labels_use_logical_address() {
    let mut labels: HashMap<u32, String> = HashMap::new();
    labels.insert(0x2010, "joypad".to_string());

    let renderer = Renderer::new(&labels);

    assert_eq!(
        record(&[0xA5, 0x10]).render(0xE000, &renderer).unwrap(),
        "LDA joypad"
    );
}

#[test]
fn huc6280_classification() {
    let bsr = record(&[0x44, 0x10]);
    assert!(bsr.is_jump_to_sub().unwrap());
    assert!(bsr.is_unconditional_jump().unwrap());

    assert!(record(&[0x80, 0x00]).is_unconditional_jump().unwrap());
    assert!(record(&[0x7C, 0x00, 0xE1]).is_unconditional_jump().unwrap());

    let bbr = record(&[0x0F, 0x10, 0x00]);
    assert!(bbr.is_conditional_jump().unwrap());
    assert!(bbr.can_continue().unwrap());

    assert!(record(&[0x40]).is_return().unwrap());
    assert!(!record(&[0x73]).is_jump().unwrap());
}

#[test]
fn huc6280_effective_address() {
    let mut zp = vec![0; 0x100];
    zp[0x20] = 0x00;
    zp[0x21] = 0x40;

    let image = BinaryImage::from_bytes(zp, 0x2000);
    let state = CpuState::Pce(PceCpuState {
        x: 2,
        y: 1,
        sp: 0xFF,
        ..Default::default()
    });
    let ea = |data: &[u8]| record(data).effective_address(&state, &image).unwrap();

    assert_eq!(ea(&[0xA5, 0x10]), EffectiveAddressInfo::new(0x2010, 1));
    assert_eq!(ea(&[0xB5, 0xFF]), EffectiveAddressInfo::new(0x2001, 1));
    assert_eq!(ea(&[0xB2, 0x20]), EffectiveAddressInfo::new(0x4000, 1));
    assert_eq!(ea(&[0xB1, 0x20]), EffectiveAddressInfo::new(0x4001, 1));
    assert_eq!(ea(&[0x83, 0x01, 0x10]), EffectiveAddressInfo::new(0x2010, 1));
    assert_eq!(ea(&[0xB3, 0x80, 0x00, 0x30]), EffectiveAddressInfo::new(0x3002, 1));
    assert_eq!(ea(&[0x0F, 0x10, 0x00]), EffectiveAddressInfo::new(0x2010, 1));
    assert_eq!(ea(&[0x48]), EffectiveAddressInfo::new(0x21FF, 1));
    assert_eq!(ea(&[0x68]), EffectiveAddressInfo::new(0x2100, 1));
    assert_eq!(ea(&[0x73]), EffectiveAddressInfo::none());

    assert!(matches!(
        record(&[0xA5, 0x10]).effective_address(&CpuState::Nes(NesCpuState::default()), &image),
        Err(Error::StateMismatch { .. })
    ));
}
