use crate::reg::{CpuState, GbCpuState, SnesCpuState, SpcState};

#[test]
fn snes_index_width_follows_flags() {
    let mut cpu = SnesCpuState {
        x: 0x1234,
        y: 0xABCD,
        ..Default::default()
    };

    assert_eq!(cpu.index_x(), 0x1234);
    assert_eq!(cpu.index_y(), 0xABCD);

    cpu.ps = SnesCpuState::FLAG_INDEX_8BIT;
    assert_eq!(cpu.index_x(), 0x34);
    assert!(!cpu.memory_8bit());

    cpu.ps = 0;
    cpu.emulation_mode = true;
    assert_eq!(cpu.index_y(), 0xCD);
    assert!(cpu.memory_8bit());
}

#[test]
fn spc_direct_page_follows_p_flag() {
    let mut cpu = SpcState::default();
    assert_eq!(cpu.direct_page(), 0);

    cpu.ps = SpcState::FLAG_DIRECT_PAGE;
    assert_eq!(cpu.direct_page(), 0x100);
}

#[test]
fn gb_register_pairs() {
    let cpu = GbCpuState {
        b: 0x12,
        c: 0x34,
        h: 0xC0,
        l: 0x01,
        ..Default::default()
    };

    assert_eq!(cpu.bc(), 0x1234);
    assert_eq!(cpu.hl(), 0xC001);
    assert_eq!(CpuState::Gameboy(cpu).kind(), "SM83");
}
