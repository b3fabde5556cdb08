//! Architecture decode trait

use crate::analysis::{EffectiveAddressInfo, Result};
use crate::arch::{ArchName, OpBytes};
use crate::ast::Instruction;
use crate::memory::MemoryPort;
use crate::reg::CpuState;
use std::fmt;

/// The rule set for one instruction-set architecture.
///
/// A `DecodeStrategy` answers every question the debugger may ask about an
/// instruction, given only the instruction's captured bytes. Implementations
/// must be pure: the same bytes and flags always yield the same answers, and
/// no method may consult anything other than its arguments.
///
/// Strategies are shared between threads through the `Registry`, hence the
/// `Send + Sync` bound. In practice every strategy is a zero-sized type.
pub trait DecodeStrategy: fmt::Debug + Send + Sync {
    /// A short name for the architecture, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Compute the total length, in bytes, of the instruction starting with
    /// `opcode`, given the processor flags that will be live when it runs.
    ///
    /// The returned length must lie within `1..=8`. Architectures without
    /// flag-dependent operand widths are free to ignore `flags`.
    fn operand_length(&self, opcode: u8, flags: u8) -> u8;

    /// Determine if the instruction calls a subroutine.
    fn is_jump_to_sub(&self, op: OpBytes<'_>) -> bool;

    /// Determine if the instruction returns from a subroutine or interrupt.
    fn is_return(&self, op: OpBytes<'_>) -> bool;

    /// Determine if the instruction always transfers control elsewhere.
    fn is_unconditional_jump(&self, op: OpBytes<'_>) -> bool;

    /// Determine if the instruction may transfer control elsewhere depending
    /// on runtime state.
    fn is_conditional_jump(&self, op: OpBytes<'_>) -> bool;

    /// Determine if a linear disassembly may proceed past this instruction.
    ///
    /// Callers check for unconditional jumps before asking; this method only
    /// needs to flag the additional terminal opcodes of the architecture,
    /// such as ones that change how the following bytes decode.
    fn can_continue(&self, _op: OpBytes<'_>) -> bool {
        true
    }

    /// Apply the effects this instruction has on the decode-relevant
    /// processor flags.
    ///
    /// Architectures with no flag-dependent decoding leave `flags` alone.
    fn update_flags(&self, _op: OpBytes<'_>, _flags: &mut u8) {}

    /// Compute the memory location the instruction will access, given a
    /// snapshot of the registers at the time it executes.
    ///
    /// `arch` names the concrete processor the snapshot belongs to, which is
    /// needed by strategies that serve more than one bus. Pointer-indirect
    /// addressing modes read their pointers through `port`.
    ///
    /// Instructions that do not access memory yield
    /// `EffectiveAddressInfo::none()`.
    fn effective_address(
        &self,
        op: OpBytes<'_>,
        arch: ArchName,
        state: &CpuState,
        port: &dyn MemoryPort,
    ) -> Result<EffectiveAddressInfo>;

    /// Build the structured form of the instruction located at `address`.
    fn disassemble(&self, op: OpBytes<'_>, address: u32) -> Instruction;
}
