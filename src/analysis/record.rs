//! Captured instructions

use crate::analysis::{effective, EffectiveAddressInfo, Error, Result};
use crate::arch::{standard_registry, ArchName, DecodeStrategy, OpBytes, Registry};
use crate::asm::Renderer;
use crate::ast::Instruction;
use crate::memory::{MemoryPort, MemoryType};
use crate::reg::CpuState;
use std::fmt::Write;
use std::sync::Arc;

/// The longest instruction any supported architecture can encode.
pub const MAX_INSTRUCTION_LENGTH: usize = 8;

#[derive(Clone, Debug)]
struct Capture {
    arch: ArchName,
    flags: u8,
    bytes: [u8; MAX_INSTRUCTION_LENGTH],
    length: u8,
    strategy: Arc<dyn DecodeStrategy>,
}

/// One instruction as it was in memory at the moment it was captured.
///
/// Initializing a record copies the instruction's bytes out of memory; every
/// later query is answered from that copy, so a record stays meaningful after
/// the memory it came from is banked out or overwritten. The processor flags
/// live at capture time are stored alongside the bytes, since they determine
/// the length of some instructions. If the live flags have since changed, the
/// record may have been decoded with the wrong length; `is_valid` tells the
/// caller whether to recapture.
///
/// A record that has not been initialized (or has been `reset`) refuses every
/// query with `Error::NotInitialized`.
#[derive(Clone, Debug, Default)]
pub struct InstructionRecord {
    capture: Option<Capture>,
}

impl InstructionRecord {
    /// Construct an uninitialized record.
    pub fn new() -> Self {
        InstructionRecord { capture: None }
    }

    /// Construct a record by capturing the instruction at `address`.
    pub fn capture(
        address: u32,
        flags: u8,
        arch: ArchName,
        port: &dyn MemoryPort,
    ) -> Result<Self> {
        let mut record = Self::new();
        record.initialize(address, flags, arch, port)?;

        Ok(record)
    }

    /// Construct a record from bytes that were already fetched.
    ///
    /// Bytes past the end of `bytes` that the instruction needs are taken as
    /// zero; extra bytes are ignored.
    pub fn from_bytes(arch: ArchName, flags: u8, bytes: &[u8]) -> Result<Self> {
        let strategy = standard_registry().get(arch)?;
        let length = decode_length(&*strategy, bytes.first().copied().unwrap_or(0), flags);
        let mut buffer = [0; MAX_INSTRUCTION_LENGTH];

        for (dst, src) in buffer.iter_mut().zip(bytes.iter().take(usize::from(length))) {
            *dst = *src;
        }

        Ok(InstructionRecord {
            capture: Some(Capture {
                arch,
                flags,
                bytes: buffer,
                length,
                strategy,
            }),
        })
    }

    /// Capture the instruction at `address` using the built-in strategies.
    pub fn initialize(
        &mut self,
        address: u32,
        flags: u8,
        arch: ArchName,
        port: &dyn MemoryPort,
    ) -> Result<()> {
        self.initialize_with(standard_registry(), address, flags, arch, port)
    }

    /// Capture the instruction at `address` using strategies from `registry`.
    ///
    /// The opcode byte is read first to learn the instruction's length, then
    /// the remaining bytes are read. All reads go through the CPU bus of
    /// `arch`. On failure the record is left uninitialized.
    pub fn initialize_with(
        &mut self,
        registry: &Registry,
        address: u32,
        flags: u8,
        arch: ArchName,
        port: &dyn MemoryPort,
    ) -> Result<()> {
        self.capture = None;

        let strategy = registry.get(arch)?;
        let bus = MemoryType::CpuBus(arch);
        let mut bytes = [0; MAX_INSTRUCTION_LENGTH];

        bytes[0] = port.read_byte(bus, address);

        let length = decode_length(&*strategy, bytes[0], flags);

        for i in 1..length {
            bytes[usize::from(i)] = port.read_byte(bus, arch.next_address(address, i));
        }

        self.capture = Some(Capture {
            arch,
            flags,
            bytes,
            length,
            strategy,
        });

        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.capture.is_some()
    }

    /// Determine if the record was captured under the given processor flags.
    ///
    /// Uninitialized records are never valid.
    pub fn is_valid(&self, flags: u8) -> bool {
        match &self.capture {
            Some(capture) => capture.flags == flags,
            None => false,
        }
    }

    /// Discard the captured instruction.
    pub fn reset(&mut self) {
        self.capture = None;
    }

    fn captured(&self) -> Result<&Capture> {
        self.capture.as_ref().ok_or(Error::NotInitialized)
    }

    pub(crate) fn strategy(&self) -> Result<&dyn DecodeStrategy> {
        Ok(&*self.captured()?.strategy)
    }

    pub(crate) fn op_bytes(&self) -> Result<OpBytes<'_>> {
        let capture = self.captured()?;

        Ok(OpBytes::new(
            &capture.bytes[..usize::from(capture.length)],
            capture.flags,
        ))
    }

    pub fn arch(&self) -> Result<ArchName> {
        Ok(self.captured()?.arch)
    }

    /// The processor flags the record was captured under.
    pub fn flags(&self) -> Result<u8> {
        Ok(self.captured()?.flags)
    }

    pub fn opcode(&self) -> Result<u8> {
        Ok(self.captured()?.bytes[0])
    }

    pub fn length(&self) -> Result<u8> {
        Ok(self.captured()?.length)
    }

    /// The instruction's bytes, exactly `length` of them.
    pub fn byte_code(&self) -> Result<&[u8]> {
        let capture = self.captured()?;

        Ok(&capture.bytes[..usize::from(capture.length)])
    }

    /// The instruction's bytes as text, e.g. `$20 $34 $12`.
    pub fn byte_code_string(&self) -> Result<String> {
        let mut out = String::new();

        for (i, byte) in self.byte_code()?.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }

            let _ = write!(out, "${:02X}", byte);
        }

        Ok(out)
    }

    pub fn is_jump_to_sub(&self) -> Result<bool> {
        Ok(self.strategy()?.is_jump_to_sub(self.op_bytes()?))
    }

    pub fn is_return(&self) -> Result<bool> {
        Ok(self.strategy()?.is_return(self.op_bytes()?))
    }

    pub fn is_unconditional_jump(&self) -> Result<bool> {
        Ok(self.strategy()?.is_unconditional_jump(self.op_bytes()?))
    }

    pub fn is_conditional_jump(&self) -> Result<bool> {
        Ok(self.strategy()?.is_conditional_jump(self.op_bytes()?))
    }

    /// Determine if the instruction may transfer control, conditionally or
    /// otherwise.
    pub fn is_jump(&self) -> Result<bool> {
        Ok(self.is_unconditional_jump()? || self.is_conditional_jump()?)
    }

    /// Determine if a linear disassembly may continue past this instruction.
    ///
    /// Unconditional jumps always end a linear run; beyond that, the
    /// architecture may name other terminal instructions.
    pub fn can_continue(&self) -> Result<bool> {
        if self.is_unconditional_jump()? {
            return Ok(false);
        }

        Ok(self.strategy()?.can_continue(self.op_bytes()?))
    }

    /// Apply this instruction's effect on decode-relevant processor flags to
    /// `flags`.
    ///
    /// Callers stepping through a listing call this after each instruction
    /// and use the result to capture the next one.
    pub fn update_flags(&self, flags: &mut u8) -> Result<()> {
        self.strategy()?.update_flags(self.op_bytes()?, flags);

        Ok(())
    }

    /// Build the structured form of the instruction, as located at `address`.
    pub fn disassemble(&self, address: u32) -> Result<Instruction> {
        Ok(self.strategy()?.disassemble(self.op_bytes()?, address))
    }

    /// Render the instruction as text, as located at `address`.
    pub fn render(&self, address: u32, renderer: &Renderer<'_>) -> Result<String> {
        Ok(renderer.render(&self.disassemble(address)?))
    }

    /// Resolve the memory operand against a register snapshot of the
    /// record's own processor.
    pub fn effective_address(
        &self,
        state: &CpuState,
        port: &dyn MemoryPort,
    ) -> Result<EffectiveAddressInfo> {
        effective::resolve(self, state, self.arch()?, port)
    }
}

fn decode_length(strategy: &dyn DecodeStrategy, opcode: u8, flags: u8) -> u8 {
    let length = strategy.operand_length(opcode, flags);

    debug_assert!(
        length >= 1 && usize::from(length) <= MAX_INSTRUCTION_LENGTH,
        "{} reported length {} for opcode ${:02X}",
        strategy.name(),
        length,
        opcode
    );

    length.max(1).min(MAX_INSTRUCTION_LENGTH as u8)
}
