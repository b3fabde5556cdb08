//! 65C816 test suite

use crate::analysis::{EffectiveAddressInfo, Error, InstructionRecord};
use crate::arch::w65c816::{FLAG_INDEX_8BIT as X8, FLAG_MEMORY_8BIT as M8};
use crate::arch::ArchName;
use crate::asm::Renderer;
use crate::memory::BinaryImage;
use crate::reg::{CpuState, NesCpuState, SnesCpuState};

macro_rules! assert_w65c816 {
    ($data: expr, $flags: expr, $text: expr, $len: expr) => {{
        let record = InstructionRecord::from_bytes(ArchName::Snes, $flags, &$data).unwrap();
        assert_eq!(record.length().unwrap(), $len);
        assert_eq!(
            record.render(0x80_8000, &Renderer::default()).unwrap(),
            $text
        );
    }};
}

fn record(data: &[u8], flags: u8) -> InstructionRecord {
    InstructionRecord::from_bytes(ArchName::Snes, flags, data).unwrap()
}

#[test]
fn w65c816_immediate_width_follows_flags() {
    assert_w65c816!([0xA9, 0x34, 0x12], M8, "LDA #$34", 2);
    assert_w65c816!([0xA9, 0x34, 0x12], 0, "LDA #$1234", 3);
    assert_w65c816!([0xA2, 0x34, 0x12], X8, "LDX #$34", 2);
    assert_w65c816!([0xA2, 0x34, 0x12], M8, "LDX #$1234", 3);
    assert_w65c816!([0x89, 0xFF, 0x00], 0, "BIT #$00FF", 3);

    //REP and SEP operands never change width
    assert_w65c816!([0xC2, 0x30], 0, "REP #$30", 2);
    assert_w65c816!([0xE2, 0x30], M8 | X8, "SEP #$30", 2);
}

#[test]
fn w65c816_disasm() {
    assert_w65c816!([0xEA], 0, "NOP", 1);
    assert_w65c816!([0x0A], 0, "ASL A", 1);
    assert_w65c816!([0x20, 0x34, 0x12], 0, "JSR $1234", 3);
    assert_w65c816!([0x22, 0x56, 0x34, 0x12], 0, "JSL $123456", 4);
    assert_w65c816!([0xAF, 0x00, 0x00, 0x7E], 0, "LDA $7E0000", 4);
    assert_w65c816!([0xBF, 0x00, 0x00, 0x7E], 0, "LDA $7E0000,X", 4);
    assert_w65c816!([0xB7, 0x10], 0, "LDA [$10],Y", 2);
    assert_w65c816!([0xB3, 0x04], 0, "LDA ($04,S),Y", 2);
    assert_w65c816!([0xA1, 0x20], 0, "LDA ($20,X)", 2);
    assert_w65c816!([0x96, 0x20], 0, "STX $20,Y", 2);
    assert_w65c816!([0x7C, 0x00, 0x90], 0, "JMP ($9000,X)", 3);
    assert_w65c816!([0xDC, 0x00, 0x90], 0, "JML [$9000]", 3);
    assert_w65c816!([0x54, 0x7E, 0x7F], 0, "MVN $7F, $7E", 3);
    assert_w65c816!([0xF4, 0x00, 0x21], 0, "PEA $2100", 3);
    assert_w65c816!([0xD4, 0x40], 0, "PEI ($40)", 2);
    assert_w65c816!([0x00, 0x01], 0, "BRK #$01", 2);
}

#[test]
fn w65c816_branch_targets_stay_in_bank() {
    assert_w65c816!([0xD0, 0xFE], 0, "BNE $8000", 2);
    assert_w65c816!([0x80, 0x80], 0, "BRA $7F82", 2);
    assert_w65c816!([0x82, 0x00, 0x80], 0, "BRL $0003", 3);

    let instr = record(&[0x10, 0x10], 0).disassemble(0x80_FFF0).unwrap();
    assert_eq!(instr.operands()[0].referenced_address(), Some(0x80_0002));
}

#[test]
fn w65c816_rep_and_sep_update_flags() {
    let mut flags = M8 | X8;
    record(&[0xC2, 0x30], flags).update_flags(&mut flags).unwrap();
    assert_eq!(flags, 0);

    record(&[0xE2, 0x20], flags).update_flags(&mut flags).unwrap();
    assert_eq!(flags, M8);

    //Only the width bits are tracked
    let mut flags = M8 | 0x01;
    record(&[0xC2, 0xFF], flags).update_flags(&mut flags).unwrap();
    assert_eq!(flags, 0x01);

    let mut flags = 0;
    record(&[0xA9, 0x00, 0x00], flags).update_flags(&mut flags).unwrap();
    assert_eq!(flags, 0);
}

#[test]
fn w65c816_classification() {
    let jsr = record(&[0x20, 0x00, 0x80], 0);
    assert!(jsr.is_jump_to_sub().unwrap());
    assert!(jsr.is_unconditional_jump().unwrap());
    assert!(!jsr.can_continue().unwrap());

    let rtl = record(&[0x6B], 0);
    assert!(rtl.is_return().unwrap());
    assert!(rtl.is_jump().unwrap());

    let bne = record(&[0xD0, 0x10], 0);
    assert!(bne.is_conditional_jump().unwrap());
    assert!(!bne.is_unconditional_jump().unwrap());
    assert!(bne.is_jump().unwrap());
    assert!(bne.can_continue().unwrap());

    assert!(!record(&[0x28], 0).can_continue().unwrap());
    assert!(!record(&[0xFB], 0).can_continue().unwrap());
    assert!(record(&[0xEA], 0).can_continue().unwrap());
    assert!(!record(&[0xEA], 0).is_jump().unwrap());
}

fn snes_image() -> BinaryImage {
    let mut data = vec![0; 0x200];
    data[0x110] = 0x00;
    data[0x111] = 0x20;
    data[0x112] = 0x7F;

    BinaryImage::from_bytes(data, 0)
}

fn snes_state(ps: u8) -> CpuState {
    CpuState::Snes(SnesCpuState {
        d: 0x0100,
        dbr: 0x7E,
        k: 0x80,
        x: 0x0004,
        y: 0x0010,
        sp: 0x1FF0,
        ps,
        ..Default::default()
    })
}

#[test]
fn w65c816_effective_address() {
    let image = snes_image();
    let state = snes_state(0);
    let ea = |data: &[u8]| record(data, 0).effective_address(&state, &image).unwrap();

    assert_eq!(ea(&[0xA5, 0x10]), EffectiveAddressInfo::new(0x0110, 2));
    assert_eq!(ea(&[0xB5, 0x10]), EffectiveAddressInfo::new(0x0114, 2));
    assert_eq!(ea(&[0xB1, 0x10]), EffectiveAddressInfo::new(0x7E_2010, 2));
    assert_eq!(ea(&[0xB7, 0x10]), EffectiveAddressInfo::new(0x7F_2010, 2));
    assert_eq!(ea(&[0xBD, 0x34, 0x12]), EffectiveAddressInfo::new(0x7E_1238, 2));
    assert_eq!(ea(&[0xBF, 0x00, 0x00, 0x7F]), EffectiveAddressInfo::new(0x7F_0004, 2));
    assert_eq!(ea(&[0x83, 0x12]), EffectiveAddressInfo::new(0x2002, 2));
    assert_eq!(ea(&[0x7C, 0x00, 0x90]), EffectiveAddressInfo::new(0x80_9004, 2));
    assert_eq!(ea(&[0x4C, 0x00, 0x80]), EffectiveAddressInfo::none());
    assert_eq!(ea(&[0xEA]), EffectiveAddressInfo::none());
}

#[test]
fn w65c816_effective_address_width() {
    let image = snes_image();
    let narrow = snes_state(M8 | X8);
    let lda = record(&[0xA5, 0x10], M8 | X8);
    let ldx = record(&[0xA6, 0x10], M8 | X8);
    let ldx_indexed = record(&[0xBE, 0x00, 0x10], M8 | X8);

    assert_eq!(lda.effective_address(&narrow, &image).unwrap().value_size, 1);
    assert_eq!(ldx.effective_address(&narrow, &image).unwrap().value_size, 1);
    assert_eq!(
        ldx_indexed.effective_address(&narrow, &image).unwrap(),
        EffectiveAddressInfo::new(0x7E_1010, 1)
    );

    let mut emulation = SnesCpuState::default();
    emulation.emulation_mode = true;
    assert_eq!(
        lda.effective_address(&CpuState::Snes(emulation), &image)
            .unwrap()
            .value_size,
        1
    );
}

#[test]
fn w65c816_rejects_foreign_state() {
    let image = snes_image();
    let result = record(&[0xA5, 0x10], 0)
        .effective_address(&CpuState::Nes(NesCpuState::default()), &image);

    assert!(matches!(result, Err(Error::StateMismatch { .. })));
}

#[test]
fn sa1_shares_the_65c816_decoder() {
    let record = InstructionRecord::from_bytes(ArchName::Sa1, M8, &[0xA9, 0x12, 0x00]).unwrap();

    assert_eq!(record.length().unwrap(), 2);
    assert_eq!(record.arch().unwrap(), ArchName::Sa1);
    assert_eq!(
        record.effective_address(&snes_state(0), &snes_image()).unwrap(),
        EffectiveAddressInfo::none()
    );
}
