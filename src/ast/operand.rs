//! Operand AST type

use crate::ast::Literal;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    /// The name of an architecturally defined register, or some derivative of
    /// that register, or another non-register operand defined by the
    /// architecture.
    Symbol(String),

    /// A literal constant value.
    Literal(Literal),

    /// An operand which constitutes a data reference.
    DataReference(Box<Operand>),

    /// An operand which constitutes a code reference.
    CodeReference(Box<Operand>),

    /// Some infix operand, e.g. +, * etc
    Infix(Box<Operand>, String, Box<Operand>),

    ///A symbol prefixed to an operand
    PrefixSymbol(String, Box<Operand>),

    ///A symbol suffixed to an operand
    SuffixSymbol(Box<Operand>, String),

    ///A symbol that wraps a comma-separated list of operands
    WrapperSymbol(String, Vec<Operand>, String),

    ///Operands printed back to back with nothing between them
    Concat(Vec<Operand>),
}

impl Operand {
    pub fn sym(sym: &str) -> Self {
        Operand::Symbol(sym.to_string())
    }

    pub fn int(value: u32, digits: u8) -> Self {
        Operand::Literal(Literal::Integer { value, digits })
    }

    pub fn dec(value: i64) -> Self {
        Operand::Literal(Literal::Decimal(value))
    }

    /// An immediate value, e.g. `#$12`.
    pub fn imm(value: u32, digits: u8) -> Self {
        Operand::pref("#", Operand::int(value, digits))
    }

    pub fn dptr(address: u32, digits: u8) -> Self {
        Operand::DataReference(Box::new(Operand::Literal(Literal::Pointer { address, digits })))
    }

    pub fn cptr(address: u32, digits: u8) -> Self {
        Operand::CodeReference(Box::new(Operand::Literal(Literal::Pointer { address, digits })))
    }

    pub fn add(op1: Self, op2: Self) -> Self {
        Operand::Infix(Box::new(op1), "+".to_string(), Box::new(op2))
    }

    pub fn pref(sym: &str, op: Self) -> Self {
        Operand::PrefixSymbol(sym.to_string(), Box::new(op))
    }

    pub fn wrap(sym1: &str, ops: Vec<Self>, sym2: &str) -> Self {
        Operand::WrapperSymbol(sym1.to_string(), ops, sym2.to_string())
    }

    pub fn concat(ops: Vec<Self>) -> Self {
        Operand::Concat(ops)
    }

    /// The address this operand refers to, if it is a data or code reference.
    pub fn referenced_address(&self) -> Option<u32> {
        match self {
            Operand::DataReference(inner) | Operand::CodeReference(inner) => match &**inner {
                Operand::Literal(lit) => lit.as_pointer(),
                _ => None,
            },
            _ => None,
        }
    }
}
