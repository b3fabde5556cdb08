//! AST type for literal values

/// A literal value appearing in an operand.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    /// An unsigned value, printed in hexadecimal with `digits` digits.
    Integer { value: u32, digits: u8 },

    /// A memory address, printed in hexadecimal with `digits` digits.
    ///
    /// The address may carry more significant bits than are printed (e.g. the
    /// program bank of a 65C816 jump target); the full address is what label
    /// lookups are performed against.
    Pointer { address: u32, digits: u8 },

    /// A small number printed in decimal, such as a bit index.
    Decimal(i64),
}

impl Literal {
    pub fn is_pointer(&self) -> bool {
        matches!(self, Literal::Pointer { .. })
    }

    pub fn as_pointer(&self) -> Option<u32> {
        match self {
            Literal::Pointer { address, .. } => Some(*address),
            _ => None,
        }
    }
}
