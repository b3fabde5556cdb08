//! Register state snapshots.
//!
//! A snapshot is taken by the emulator whenever execution stops and handed to
//! the effective address resolver. Snapshots are plain data; nothing in this
//! crate ever observes a live, mutating CPU.

mod state;

pub use state::{
    CpuState, Cx4State, GbCpuState, GsuState, NecDspState, NesCpuState, PceCpuState, SnesCpuState,
    SpcState,
};

#[cfg(test)]
mod tests;
