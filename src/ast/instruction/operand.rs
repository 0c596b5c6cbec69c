use std::fmt;

/// An operand of an [`instruction`][super::Instruction].
///
/// This represents the data written in the source code. Whether a byte is an immediate value or
/// a zero page address is decided by the [`AddressingMode`][super::AddressingMode].
#[derive(Debug, Hash, Eq, PartialEq, Clone)]
pub enum Operand {
    /// Covers both [`AddressingMode::Accumulator`][super::AddressingMode#variant.Accumulator]
    /// and [`AddressingMode::Implied`][super::AddressingMode#variant.Implied]
    Implied,
    /// Two hex digit literal, e.g. `$44`
    Byte(u8),
    /// Four hex digit literal, e.g. `$4400`
    Word(u16),
    /// Reference to a label, resolved through the symbol table in the second pass
    Label(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Implied => Ok(()),
            Operand::Byte(byte) => write!(f, "${:02x}", byte),
            Operand::Word(word) => write!(f, "${:04x}", word),
            Operand::Label(label) => write!(f, "{}", label),
        }
    }
}
