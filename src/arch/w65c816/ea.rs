//! 65C816 effective address computation

use crate::analysis::{EffectiveAddressInfo, Error, Result};
use crate::arch::w65c816::{Mode, OPCODES};
use crate::arch::{ArchName, OpBytes};
use crate::memory::{MemoryPort, MemoryType};
use crate::reg::{CpuState, SnesCpuState};

/// Mnemonics whose memory operand is as wide as the accumulator.
const MEMORY_SIZED: &[&str] = &[
    "ADC", "AND", "ASL", "BIT", "CMP", "DEC", "EOR", "INC", "LDA", "LSR", "ORA", "ROL", "ROR",
    "SBC", "STA", "STZ", "TRB", "TSB",
];

/// Mnemonics whose memory operand is as wide as the index registers.
const INDEX_SIZED: &[&str] = &["CPX", "CPY", "LDX", "LDY", "STX", "STY"];

fn value_size(mnemonic: &str, cpu: &SnesCpuState) -> u8 {
    if MEMORY_SIZED.contains(&mnemonic) {
        if cpu.memory_8bit() {
            1
        } else {
            2
        }
    } else if INDEX_SIZED.contains(&mnemonic) {
        if cpu.index_8bit() {
            1
        } else {
            2
        }
    } else {
        1
    }
}

/// Reads of pointers stored in bank 0 (direct page, stack, indirect jumps).
struct Pointers<'a> {
    port: &'a dyn MemoryPort,
    bus: MemoryType,
}

impl<'a> Pointers<'a> {
    fn word(&self, address: u32) -> u32 {
        u32::from(self.port.read_word(self.bus, address & 0xFFFF))
    }

    fn long(&self, address: u32) -> u32 {
        self.word(address)
            | (u32::from(self.port.read_byte(self.bus, address.wrapping_add(2) & 0xFFFF)) << 16)
    }
}

pub fn effective_address(
    strategy: &'static str,
    op: OpBytes<'_>,
    arch: ArchName,
    state: &CpuState,
    port: &dyn MemoryPort,
) -> Result<EffectiveAddressInfo> {
    let cpu = match state {
        CpuState::Snes(cpu) => cpu,
        other => return Err(Error::state_mismatch(strategy, other)),
    };

    let (mnemonic, mode) = OPCODES[usize::from(op.opcode())];
    let size = value_size(mnemonic, cpu);
    let ptrs = Pointers {
        port,
        bus: MemoryType::CpuBus(arch),
    };

    let d = u32::from(cpu.d);
    let x = u32::from(cpu.index_x());
    let y = u32::from(cpu.index_y());
    let dbr = u32::from(cpu.dbr) << 16;
    let b1 = u32::from(op.byte(1));
    let w1 = u32::from(op.word(1));
    let direct = |offset: u32| d.wrapping_add(offset) & 0xFFFF;

    let info = match mode {
        Mode::Dir => EffectiveAddressInfo::new(direct(b1), size),
        Mode::DirIdxX => EffectiveAddressInfo::new(direct(b1 + x), size),
        Mode::DirIdxY => EffectiveAddressInfo::new(direct(b1 + y), size),
        Mode::DirInd => EffectiveAddressInfo::new(dbr | ptrs.word(direct(b1)), size),
        Mode::DirIdxIndX => EffectiveAddressInfo::new(dbr | ptrs.word(direct(b1 + x)), size),
        Mode::DirIndIdxY => {
            EffectiveAddressInfo::new((dbr | ptrs.word(direct(b1))).wrapping_add(y), size)
        }
        Mode::DirIndLng => EffectiveAddressInfo::new(ptrs.long(direct(b1)), size),
        Mode::DirIndLngIdxY => {
            EffectiveAddressInfo::new(ptrs.long(direct(b1)).wrapping_add(y), size)
        }
        Mode::StkRel => {
            EffectiveAddressInfo::new(u32::from(cpu.sp).wrapping_add(b1) & 0xFFFF, size)
        }
        Mode::StkRelIndIdxY => {
            let pointer = ptrs.word(u32::from(cpu.sp).wrapping_add(b1));

            EffectiveAddressInfo::new((dbr | pointer).wrapping_add(y), size)
        }
        Mode::StkDirInd => EffectiveAddressInfo::new(direct(b1), 2),
        Mode::Abs => EffectiveAddressInfo::new(dbr | w1, size),
        Mode::AbsIdxX => EffectiveAddressInfo::new((dbr | w1).wrapping_add(x), size),
        Mode::AbsIdxY => EffectiveAddressInfo::new((dbr | w1).wrapping_add(y), size),
        Mode::AbsLng => EffectiveAddressInfo::new(op.long(1), size),
        Mode::AbsLngIdxX => EffectiveAddressInfo::new(op.long(1).wrapping_add(x), size),
        Mode::AbsInd | Mode::AbsIndLng => EffectiveAddressInfo::new(w1, 2),
        Mode::AbsIdxXInd => {
            let pointer = (u32::from(cpu.k) << 16) | (w1.wrapping_add(x) & 0xFFFF);

            EffectiveAddressInfo::new(pointer, 2)
        }
        Mode::Imp
        | Mode::Acc
        | Mode::Sig8
        | Mode::Imm8
        | Mode::ImmM
        | Mode::ImmX
        | Mode::Rel
        | Mode::RelLng
        | Mode::StkAbs
        | Mode::AbsJmp
        | Mode::AbsLngJmp
        | Mode::BlkMov => EffectiveAddressInfo::none(),
    };

    Ok(info)
}
