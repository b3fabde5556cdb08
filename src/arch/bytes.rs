//! Read-only view of a captured instruction.

/// The captured bytes of one instruction, together with the processor flags
/// that were live when they were captured.
///
/// Reads past the end of the captured bytes yield zero rather than panic, so a
/// strategy can always compute operands of its widest form.
#[derive(Copy, Clone, Debug)]
pub struct OpBytes<'a> {
    bytes: &'a [u8],
    flags: u8,
}

impl<'a> OpBytes<'a> {
    pub fn new(bytes: &'a [u8], flags: u8) -> Self {
        OpBytes { bytes, flags }
    }

    pub fn opcode(&self) -> u8 {
        self.byte(0)
    }

    pub fn flags(&self) -> u8 {
        self.flags
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn byte(&self, index: usize) -> u8 {
        self.bytes.get(index).copied().unwrap_or(0)
    }

    /// Little-endian 16-bit operand starting at `index`.
    pub fn word(&self, index: usize) -> u16 {
        u16::from_le_bytes([self.byte(index), self.byte(index + 1)])
    }

    /// Little-endian 24-bit operand starting at `index`.
    pub fn long(&self, index: usize) -> u32 {
        u32::from(self.word(index)) | (u32::from(self.byte(index + 2)) << 16)
    }
}
