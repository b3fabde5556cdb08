//! SPC700 test suite

use crate::analysis::{EffectiveAddressInfo, Error, InstructionRecord};
use crate::arch::ArchName;
use crate::asm::Renderer;
use crate::memory::BinaryImage;
use crate::reg::{CpuState, GbCpuState, SpcState};

macro_rules! assert_spc700 {
    ($data: expr, $text: expr, $len: expr) => {{
        let record = InstructionRecord::from_bytes(ArchName::Spc, 0, &$data).unwrap();
        assert_eq!(record.length().unwrap(), $len);
        assert_eq!(record.render(0x0400, &Renderer::default()).unwrap(), $text);
    }};
}

fn record(data: &[u8]) -> InstructionRecord {
    InstructionRecord::from_bytes(ArchName::Spc, 0, data).unwrap()
}

#[test]
fn spc700_disasm() {
    assert_spc700!([0x00], "NOP", 1);
    assert_spc700!([0xE4, 0x12], "MOV A, $12", 2);
    assert_spc700!([0xE8, 0x7F], "MOV A, #$7F", 2);
    assert_spc700!([0xF4, 0x12], "MOV A, $12+X", 2);
    assert_spc700!([0xE5, 0x34, 0x12], "MOV A, $1234", 3);
    assert_spc700!([0x07, 0x20], "OR A, [$20+X]", 2);
    assert_spc700!([0xF7, 0x20], "MOV A, [$20]+Y", 2);
    assert_spc700!([0x8F, 0x55, 0x12], "MOV $12, #$55", 3);
    assert_spc700!([0xFA, 0x10, 0x20], "MOV $20, $10", 3);
    assert_spc700!([0x09, 0x10, 0x20], "OR $20, $10", 3);
    assert_spc700!([0x19], "OR (X), (Y)", 1);
    assert_spc700!([0xAF], "MOV (X)+, A", 1);
    assert_spc700!([0xBA, 0xF4], "MOVW YA, $F4", 2);
    assert_spc700!([0xCF], "MUL YA", 1);
    assert_spc700!([0x9E], "DIV YA, X", 1);
}

#[test]
fn spc700_bit_operands() {
    assert_spc700!([0x02, 0x34], "SET1 $34.0", 2);
    assert_spc700!([0xE2, 0x34], "SET1 $34.7", 2);
    assert_spc700!([0xF2, 0x34], "CLR1 $34.7", 2);
    assert_spc700!([0x0A, 0x34, 0x52], "OR1 C, $1234.2", 3);
    assert_spc700!([0x2A, 0x34, 0x52], "OR1 C, /$1234.2", 3);
    assert_spc700!([0xCA, 0xFF, 0xFF], "MOV1 $1FFF.7, C", 3);
}

#[test]
fn spc700_control_flow_targets() {
    assert_spc700!([0x2F, 0xFE], "BRA $0400", 2);
    assert_spc700!([0xD0, 0x10], "BNE $0412", 2);
    assert_spc700!([0x03, 0x10, 0xFD], "BBS $10.0, $0400", 3);
    assert_spc700!([0x2E, 0x10, 0x00], "CBNE $10, $0403", 3);
    assert_spc700!([0xFE, 0xFE], "DBNZ Y, $0400", 2);
    assert_spc700!([0x3F, 0x00, 0x08], "CALL $0800", 3);
    assert_spc700!([0x5F, 0xC0, 0xFF], "JMP $FFC0", 3);
    assert_spc700!([0x1F, 0x00, 0x10], "JMP [$1000+X]", 3);
    assert_spc700!([0x4F, 0x20], "PCALL $FF20", 2);
    assert_spc700!([0x01], "TCALL 0", 1);
    assert_spc700!([0xF1], "TCALL 15", 1);
}

#[test]
fn spc700_classification() {
    for &call in &[0x3F, 0x4F, 0x0F, 0x01, 0x81] {
        let call = record(&[call]);
        assert!(call.is_jump_to_sub().unwrap());
        assert!(call.is_unconditional_jump().unwrap());
    }

    assert!(record(&[0x6F]).is_return().unwrap());
    assert!(record(&[0x7F]).is_return().unwrap());

    for &branch in &[0x10, 0xF0, 0x03, 0x13, 0x2E, 0xDE, 0x6E, 0xFE] {
        let branch = record(&[branch]);
        assert!(branch.is_conditional_jump().unwrap());
        assert!(branch.can_continue().unwrap());
    }

    assert!(!record(&[0x20]).is_jump().unwrap());
    assert!(!record(&[0x2F, 0x00]).can_continue().unwrap());
    assert!(!record(&[0xEF]).can_continue().unwrap());
    assert!(!record(&[0xFF]).can_continue().unwrap());
}

fn spc_image() -> BinaryImage {
    let mut data = vec![0; 0x400];
    data[0x120] = 0x00;
    data[0x121] = 0x30;

    BinaryImage::from_bytes(data, 0)
}

#[test]
fn spc700_effective_address() {
    let image = spc_image();
    let state = CpuState::Spc(SpcState {
        x: 2,
        y: 3,
        sp: 0xEF,
        ps: SpcState::FLAG_DIRECT_PAGE,
        ..Default::default()
    });
    let ea = |data: &[u8]| record(data).effective_address(&state, &image).unwrap();

    assert_eq!(ea(&[0xE4, 0x12]), EffectiveAddressInfo::new(0x112, 1));
    assert_eq!(ea(&[0xF4, 0xFF]), EffectiveAddressInfo::new(0x101, 1));
    assert_eq!(ea(&[0xE5, 0x34, 0x12]), EffectiveAddressInfo::new(0x1234, 1));
    assert_eq!(ea(&[0xF5, 0x34, 0x12]), EffectiveAddressInfo::new(0x1236, 1));
    assert_eq!(ea(&[0xE6]), EffectiveAddressInfo::new(0x102, 1));
    assert_eq!(ea(&[0x07, 0x1E]), EffectiveAddressInfo::new(0x3000, 1));
    assert_eq!(ea(&[0xF7, 0x20]), EffectiveAddressInfo::new(0x3003, 1));
    assert_eq!(ea(&[0x8F, 0x55, 0x12]), EffectiveAddressInfo::new(0x112, 1));
    assert_eq!(ea(&[0xBA, 0x10]), EffectiveAddressInfo::new(0x110, 2));
    assert_eq!(ea(&[0xAA, 0x34, 0x52]), EffectiveAddressInfo::new(0x1234, 1));
    assert_eq!(ea(&[0x2D]), EffectiveAddressInfo::new(0x1EF, 1));
    assert_eq!(ea(&[0xAE]), EffectiveAddressInfo::new(0x1F0, 1));
    assert_eq!(ea(&[0x1F, 0x00, 0x10]), EffectiveAddressInfo::new(0x1002, 2));
    assert_eq!(ea(&[0x00]), EffectiveAddressInfo::none());
    assert_eq!(ea(&[0x3F, 0x00, 0x08]), EffectiveAddressInfo::none());
}

#[test]
fn spc700_direct_page_follows_p_flag() {
    let image = spc_image();
    let state = CpuState::Spc(SpcState::default());

    assert_eq!(
        record(&[0xE4, 0x12]).effective_address(&state, &image).unwrap(),
        EffectiveAddressInfo::new(0x012, 1)
    );
}

#[test]
fn spc700_rejects_foreign_state() {
    let result = record(&[0xE4, 0x12])
        .effective_address(&CpuState::Gameboy(GbCpuState::default()), &spc_image());

    assert!(matches!(result, Err(Error::StateMismatch { .. })));
}
