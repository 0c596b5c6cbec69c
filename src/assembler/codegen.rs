use super::{compiler::InstructionRecord, opcode::OPCODE_MAPPING, symbols::SymbolTable, ErrorKind};
use crate::ast::{AddressingMode, Operand};

/// Machine code of a single instruction placed at an absolute address.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct EncodedInstruction {
    /// Source line the instruction was assembled from
    pub line: usize,
    pub address: u16,
    pub opcode: u8,
    /// Zero to two operand bytes, words are stored low byte first
    pub operand: Vec<u8>,
}

impl EncodedInstruction {
    /// Opcode followed by the operand bytes.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        std::iter::once(self.opcode).chain(self.operand.iter().copied())
    }

    pub fn size(&self) -> usize {
        1 + self.operand.len()
    }
}

/// Single byte operand: a literal or the zero page address of a label.
fn byte_operand(operand: &Operand, symbols: &SymbolTable) -> Result<u8, ErrorKind> {
    match operand {
        Operand::Byte(byte) => Ok(*byte),
        Operand::Label(label) => {
            let address = symbols.resolve(label)?;
            u8::try_from(address).map_err(|_| ErrorKind::AddressOutOfRange(address.into()))
        }
        Operand::Word(_) | Operand::Implied => Err(ErrorKind::Syntax(operand.to_string())),
    }
}

/// Two byte operand: a literal or the absolute address of a label.
fn word_operand(operand: &Operand, symbols: &SymbolTable) -> Result<u16, ErrorKind> {
    match operand {
        Operand::Word(word) => Ok(*word),
        Operand::Label(label) => symbols.resolve(label),
        Operand::Byte(_) | Operand::Implied => Err(ErrorKind::Syntax(operand.to_string())),
    }
}

/// Signed offset from the instruction following the branch to the target label.
///
/// The CPU has already moved the program counter past the branch instruction when the offset is
/// applied.
fn relative_offset(record: &InstructionRecord, symbols: &SymbolTable) -> Result<i8, ErrorKind> {
    let Operand::Label(label) = &record.instruction.operand else {
        return Err(ErrorKind::Syntax(record.instruction.operand.to_string()));
    };
    let target = i32::from(symbols.resolve(label)?);
    let next = i32::from(record.address) + record.instruction.size() as i32;
    let offset = target - next;

    i8::try_from(offset).map_err(|_| ErrorKind::BranchOutOfRange(offset))
}

/// Compile a single instruction to machine code.
///
/// All labels must have been bound in the symbol table before any instruction is encoded.
#[tracing::instrument(skip(symbols))]
pub fn encode(
    record: &InstructionRecord,
    symbols: &SymbolTable,
) -> Result<EncodedInstruction, ErrorKind> {
    let ins = &record.instruction;
    let opcode = OPCODE_MAPPING.opcode(ins.mnemonic, ins.addr_mode)?;

    let operand = match ins.addr_mode {
        AddressingMode::Accumulator | AddressingMode::Implied => vec![],
        AddressingMode::Immediate
        | AddressingMode::ZeroPage
        | AddressingMode::ZeroPageX
        | AddressingMode::ZeroPageY
        | AddressingMode::IndirectX
        | AddressingMode::IndirectY => vec![byte_operand(&ins.operand, symbols)?],
        AddressingMode::Absolute
        | AddressingMode::AbsoluteX
        | AddressingMode::AbsoluteY
        | AddressingMode::Indirect => word_operand(&ins.operand, symbols)?.to_le_bytes().to_vec(),
        AddressingMode::Relative => vec![relative_offset(record, symbols)? as u8],
    };

    Ok(EncodedInstruction {
        line: record.line,
        address: record.address,
        opcode,
        operand,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::symbols::Symbol;
    use crate::ast::{Instruction, Mnemonic};

    use pretty_assertions::assert_eq;

    fn record(address: u16, mnemonic: Mnemonic, mode: AddressingMode, operand: Operand) -> InstructionRecord {
        InstructionRecord {
            line: 1,
            address,
            instruction: Instruction::new(mnemonic, mode, operand),
        }
    }

    fn label(name: &str) -> Operand {
        Operand::Label(name.to_string())
    }

    fn symbols() -> SymbolTable {
        let mut symbols = SymbolTable::new();
        for (name, address) in [("zp", 0x0042), ("far", 0x1234), ("loop", 0x8000), ("skip", 0x8081)] {
            symbols.new_symbol(Symbol::new(name, address, 1)).unwrap();
        }
        symbols
    }

    #[test]
    fn test_encode() -> Result<(), ErrorKind> {
        let tests = vec![
            (record(0x8000, Mnemonic::ROL, AddressingMode::Accumulator, Operand::Implied), vec![0x2A]),
            (record(0x8000, Mnemonic::BRK, AddressingMode::Implied, Operand::Implied), vec![0x00]),
            (record(0x8000, Mnemonic::ADC, AddressingMode::Immediate, Operand::Byte(0x44)), vec![0x69, 0x44]),
            (record(0x8000, Mnemonic::ADC, AddressingMode::ZeroPage, Operand::Byte(0x44)), vec![0x65, 0x44]),
            (record(0x8000, Mnemonic::ADC, AddressingMode::ZeroPageX, Operand::Byte(0x44)), vec![0x75, 0x44]),
            (record(0x8000, Mnemonic::LDX, AddressingMode::ZeroPageY, Operand::Byte(0x44)), vec![0xB6, 0x44]),
            (record(0x8000, Mnemonic::ADC, AddressingMode::Absolute, Operand::Word(0x4400)), vec![0x6D, 0x00, 0x44]),
            (record(0x8000, Mnemonic::ADC, AddressingMode::AbsoluteX, Operand::Word(0x4400)), vec![0x7D, 0x00, 0x44]),
            (record(0x8000, Mnemonic::ADC, AddressingMode::AbsoluteY, Operand::Word(0x4400)), vec![0x79, 0x00, 0x44]),
            (record(0x8000, Mnemonic::ADC, AddressingMode::IndirectX, Operand::Byte(0x44)), vec![0x61, 0x44]),
            (record(0x8000, Mnemonic::ADC, AddressingMode::IndirectY, Operand::Byte(0x44)), vec![0x71, 0x44]),
            (record(0x8000, Mnemonic::JMP, AddressingMode::Indirect, Operand::Word(0xfffc)), vec![0x6C, 0xFC, 0xFF]),
            (record(0x8010, Mnemonic::JSR, AddressingMode::Absolute, label("loop")), vec![0x20, 0x00, 0x80]),
            (record(0x8010, Mnemonic::LDA, AddressingMode::IndirectY, label("zp")), vec![0xB1, 0x42]),
            (record(0x8010, Mnemonic::BNE, AddressingMode::Relative, label("loop")), vec![0xD0, 0xEE]),
            (record(0x8000, Mnemonic::BPL, AddressingMode::Relative, label("skip")), vec![0x10, 0x7F]),
        ];

        let symbols = symbols();
        for (record, expected) in tests {
            let encoded = encode(&record, &symbols)?;
            assert_eq!(encoded.address, record.address);
            assert_eq!(encoded.size(), record.instruction.size());
            assert_eq!(encoded.bytes().collect::<Vec<u8>>(), expected, "{}", record.instruction);
        }

        Ok(())
    }

    #[test]
    fn test_encode_errors() {
        let tests = vec![
            (
                record(0x8000, Mnemonic::STA, AddressingMode::Immediate, Operand::Byte(0x01)),
                ErrorKind::UnsupportedAddressingMode(Mnemonic::STA, AddressingMode::Immediate),
            ),
            (
                record(0x8000, Mnemonic::JMP, AddressingMode::Absolute, label("nowhere")),
                ErrorKind::UndefinedLabel("nowhere".to_string()),
            ),
            (
                record(0x8000, Mnemonic::BEQ, AddressingMode::Relative, label("nowhere")),
                ErrorKind::UndefinedLabel("nowhere".to_string()),
            ),
            (
                record(0x8000, Mnemonic::LDA, AddressingMode::IndirectX, label("far")),
                ErrorKind::AddressOutOfRange(0x1234),
            ),
            // 0x8081 - (0x7fff + 2) = 128
            (
                record(0x7fff, Mnemonic::BPL, AddressingMode::Relative, label("skip")),
                ErrorKind::BranchOutOfRange(128),
            ),
            // 0x8000 - (0x807f + 2) = -129
            (
                record(0x807f, Mnemonic::BNE, AddressingMode::Relative, label("loop")),
                ErrorKind::BranchOutOfRange(-129),
            ),
        ];

        let symbols = symbols();
        for (record, expected) in tests {
            assert_eq!(encode(&record, &symbols), Err(expected), "{}", record.instruction);
        }
    }

    #[test]
    fn test_branch_range_limits() -> Result<(), ErrorKind> {
        let symbols = symbols();
        // 0x8000 - (0x807e + 2) = -128
        let backward = encode(
            &record(0x807e, Mnemonic::BNE, AddressingMode::Relative, label("loop")),
            &symbols,
        )?;
        assert_eq!(backward.operand, vec![0x80]);
        // 0x8081 - (0x8000 + 2) = 127
        let forward = encode(
            &record(0x8000, Mnemonic::BPL, AddressingMode::Relative, label("skip")),
            &symbols,
        )?;
        assert_eq!(forward.operand, vec![0x7F]);

        Ok(())
    }
}
