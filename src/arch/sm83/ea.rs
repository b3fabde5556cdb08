//! SM83 effective address computation

use crate::analysis::EffectiveAddressInfo;
use crate::arch::OpBytes;
use crate::reg::GbCpuState;

/// Determine if an opcode reads or writes `[HL]` through its register fields.
fn uses_hl(opcode: u8) -> bool {
    match opcode {
        0x34 | 0x35 | 0x36 => true,
        0x76 => false,
        0x40..=0x7F => opcode & 0x07 == 6 || (opcode >> 3) & 0x07 == 6,
        0x80..=0xBF => opcode & 0x07 == 6,
        _ => false,
    }
}

pub fn effective_address(op: OpBytes<'_>, cpu: &GbCpuState) -> EffectiveAddressInfo {
    let opcode = op.opcode();
    let hl = u32::from(cpu.hl());
    let sp = u32::from(cpu.sp);

    match opcode {
        0x02 | 0x0A => EffectiveAddressInfo::new(u32::from(cpu.bc()), 1),
        0x12 | 0x1A => EffectiveAddressInfo::new(u32::from(cpu.de()), 1),

        //HL+ and HL- access HL before adjusting it
        0x22 | 0x2A | 0x32 | 0x3A => EffectiveAddressInfo::new(hl, 1),

        0x08 => EffectiveAddressInfo::new(u32::from(op.word(1)), 2),
        0xEA | 0xFA => EffectiveAddressInfo::new(u32::from(op.word(1)), 1),
        0xE0 | 0xF0 => EffectiveAddressInfo::new(0xFF00 | u32::from(op.byte(1)), 1),
        0xE2 | 0xF2 => EffectiveAddressInfo::new(0xFF00 | u32::from(cpu.c), 1),
        0xC5 | 0xD5 | 0xE5 | 0xF5 => {
            EffectiveAddressInfo::new(sp.wrapping_sub(2) & 0xFFFF, 2)
        }
        0xC1 | 0xD1 | 0xE1 | 0xF1 => EffectiveAddressInfo::new(sp, 2),
        0xCB if op.byte(1) & 0x07 == 6 => EffectiveAddressInfo::new(hl, 1),
        _ if uses_hl(opcode) => EffectiveAddressInfo::new(hl, 1),
        _ => EffectiveAddressInfo::none(),
    }
}
