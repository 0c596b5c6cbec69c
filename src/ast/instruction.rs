pub mod addressing_mode;
pub mod mnemonic;
pub mod operand;

use std::fmt;

pub use addressing_mode::AddressingMode;
pub use mnemonic::Mnemonic;
pub use operand::Operand;

/// A CPU instruction with an an optional operand and the addressing mode which tells the CPU how
/// to interpret the operand.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub addr_mode: AddressingMode,
    pub operand: Operand,
}

impl Instruction {
    pub fn new(mnemonic: Mnemonic, addr_mode: AddressingMode, operand: Operand) -> Instruction {
        Instruction {
            mnemonic,
            addr_mode,
            operand,
        }
    }

    /// Size of instruction opcode + operand in bytes
    pub fn size(&self) -> usize {
        self.addr_mode.size()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.mnemonic;
        let o = &self.operand;
        match self.addr_mode {
            AddressingMode::Implied => write!(f, "{}", m),
            AddressingMode::Accumulator => write!(f, "{} a", m),
            AddressingMode::Immediate => write!(f, "{} #{}", m, o),
            AddressingMode::Relative | AddressingMode::ZeroPage | AddressingMode::Absolute => {
                write!(f, "{} {}", m, o)
            }
            AddressingMode::ZeroPageX | AddressingMode::AbsoluteX => write!(f, "{} {},x", m, o),
            AddressingMode::ZeroPageY | AddressingMode::AbsoluteY => write!(f, "{} {},y", m, o),
            AddressingMode::Indirect => write!(f, "{} ({})", m, o),
            AddressingMode::IndirectX => write!(f, "{} ({},x)", m, o),
            AddressingMode::IndirectY => write!(f, "{} ({}),y", m, o),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_display() {
        let tests = vec![
            (
                Instruction::new(Mnemonic::BRK, AddressingMode::Implied, Operand::Implied),
                "brk",
            ),
            (
                Instruction::new(Mnemonic::ROL, AddressingMode::Accumulator, Operand::Implied),
                "rol a",
            ),
            (
                Instruction::new(Mnemonic::LDA, AddressingMode::Immediate, Operand::Byte(0x01)),
                "lda #$01",
            ),
            (
                Instruction::new(
                    Mnemonic::BNE,
                    AddressingMode::Relative,
                    Operand::Label("loop".to_string()),
                ),
                "bne loop",
            ),
            (
                Instruction::new(Mnemonic::STA, AddressingMode::AbsoluteY, Operand::Word(0x0200)),
                "sta $0200,y",
            ),
            (
                Instruction::new(Mnemonic::JMP, AddressingMode::Indirect, Operand::Word(0xfffc)),
                "jmp ($fffc)",
            ),
            (
                Instruction::new(Mnemonic::EOR, AddressingMode::IndirectX, Operand::Byte(0xc8)),
                "eor ($c8,x)",
            ),
            (
                Instruction::new(
                    Mnemonic::LDA,
                    AddressingMode::IndirectY,
                    Operand::Label("ptr".to_string()),
                ),
                "lda (ptr),y",
            ),
        ];
        for (ins, expected) in tests {
            assert_eq!(ins.to_string(), expected);
        }
    }
}
