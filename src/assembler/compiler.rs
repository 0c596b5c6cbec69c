use super::{
    blocks::Block,
    classifier::{classify, is_identifier},
    codegen::{encode, EncodedInstruction},
    line::parse_line,
    opcode::{parse_mnemonic, OPCODE_MAPPING},
    symbols::{Symbol, SymbolTable},
    AssemblerError, ErrorKind,
};
use crate::{
    ast::{AddressingMode, Instruction},
    image::MemoryImage,
};

/// An instruction placed at its address by the first pass.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct InstructionRecord {
    /// Source line of the instruction
    pub line: usize,
    pub address: u16,
    pub instruction: Instruction,
}

/// Result of the first pass over a block: every instruction with its address and mode.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct BlockLayout {
    pub offset: u16,
    pub records: Vec<InstructionRecord>,
}

/// A fully assembled block.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AssembledBlock {
    pub offset: u16,
    /// Instructions as laid out by the first pass
    pub records: Vec<InstructionRecord>,
    /// Machine code of each record, in the same order
    pub code: Vec<EncodedInstruction>,
}

impl AssembledBlock {
    pub fn size(&self) -> usize {
        self.code.iter().map(EncodedInstruction::size).sum()
    }
}

/// Two pass assembler.
///
/// Pass 1 walks every block, binds labels to addresses and fixes the addressing mode and thereby
/// the size of every instruction. Pass 2 resolves operands and generates the machine code. All
/// blocks finish pass 1 before any block enters pass 2, so a label can be referenced anywhere in
/// the program.
#[derive(Debug, Default)]
pub struct Compiler {
    symbol_table: SymbolTable,
}

impl Compiler {
    pub fn new() -> Compiler {
        Compiler {
            symbol_table: SymbolTable::new(),
        }
    }

    /// Pass 1 of the compiler.
    ///
    /// Binds the labels of the block in the symbol table and lays out its instructions starting
    /// at the block offset.
    #[tracing::instrument(skip(self, block), fields(offset = block.offset))]
    pub fn pass_1(&mut self, block: &Block) -> Result<BlockLayout, AssemblerError> {
        let mut address = block.offset as usize;
        let mut records = Vec::new();

        for line in &block.lines {
            let at = |kind: ErrorKind| AssemblerError::new(line.number, kind);
            let parsed = parse_line(&line.code);

            if let Some(label) = &parsed.label {
                if !is_identifier(label) {
                    return Err(at(ErrorKind::Syntax(label.clone())));
                }
                let label_addr = u16::try_from(address)
                    .map_err(|_| at(ErrorKind::AddressOutOfRange(address as u32)))?;
                self.symbol_table
                    .new_symbol(Symbol::new(label, label_addr, line.number))
                    .map_err(at)?;
            }

            // Label on a line of its own
            let Some(mnemonic) = &parsed.mnemonic else {
                continue;
            };

            let mnemonic = parse_mnemonic(mnemonic).map_err(at)?;
            let (mut addr_mode, operand) = classify(parsed.operands.as_deref()).map_err(at)?;

            // A bare label is an absolute address for anything but branches
            if addr_mode == AddressingMode::Relative
                && !OPCODE_MAPPING.supports(mnemonic, AddressingMode::Relative)
            {
                addr_mode = AddressingMode::Absolute;
            }
            OPCODE_MAPPING.opcode(mnemonic, addr_mode).map_err(at)?;

            let instruction = Instruction::new(mnemonic, addr_mode, operand);
            let next = address + instruction.size();
            if next > MemoryImage::MEMORY_SIZE {
                return Err(at(ErrorKind::AddressOutOfRange((next - 1) as u32)));
            }

            records.push(InstructionRecord {
                line: line.number,
                address: address as u16,
                instruction,
            });
            address = next;
        }

        Ok(BlockLayout {
            offset: block.offset,
            records,
        })
    }

    /// Pass 2 of the compiler.
    ///
    /// Generates machine code for a block laid out by pass 1. The symbol table is assumed to be
    /// complete.
    #[tracing::instrument(skip(self, layout), fields(offset = layout.offset))]
    pub fn pass_2(&self, layout: &BlockLayout) -> Result<Vec<EncodedInstruction>, AssemblerError> {
        layout
            .records
            .iter()
            .map(|record| {
                encode(record, &self.symbol_table)
                    .map_err(|kind| AssemblerError::new(record.line, kind))
            })
            .collect()
    }

    /// Assemble all blocks of a program.
    #[tracing::instrument(skip_all)]
    pub fn compile(
        mut self,
        blocks: &[Block],
    ) -> Result<(Vec<AssembledBlock>, SymbolTable), AssemblerError> {
        let layouts = blocks
            .iter()
            .map(|block| self.pass_1(block))
            .collect::<Result<Vec<_>, _>>()?;

        // Every label is bound at this point
        let assembled = layouts
            .into_iter()
            .map(|layout| {
                let code = self.pass_2(&layout)?;
                Ok(AssembledBlock {
                    offset: layout.offset,
                    records: layout.records,
                    code,
                })
            })
            .collect::<Result<Vec<_>, AssemblerError>>()?;

        Ok((assembled, self.symbol_table))
    }
}
