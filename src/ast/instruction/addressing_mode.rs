/// Addressing mode of an instruction.
///
/// This represents the way the instruction uses the operand.
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy, strum_macros::Display, strum_macros::EnumIter)]
pub enum AddressingMode {
    /// `a`
    Accumulator,
    /// `label` for branch instructions, resolved to a signed offset
    Relative,
    Implied,
    /// `#$44`
    Immediate,
    /// `$44`
    ZeroPage,
    /// `$44,x`
    ZeroPageX,
    /// `$44,y`
    ZeroPageY,
    /// `$4400`
    Absolute,
    /// `$4400,x`
    AbsoluteX,
    /// `$4400,y`
    AbsoluteY,
    /// `($44,x)`
    IndirectX,
    /// `($44),y`
    IndirectY,
    /// `($4400)`, only used by `jmp`
    Indirect,
}

impl AddressingMode {
    /// Size of instruction opcode + operand in bytes
    pub fn size(&self) -> usize {
        match self {
            AddressingMode::Accumulator | AddressingMode::Implied => 1,
            AddressingMode::Relative
            | AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 2,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 3,
        }
    }
}
