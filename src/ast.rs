/// Assembler directives, i.e. `.org`.
mod directive;

/// Instructions and their building blocks: mnemonic, addressing mode and operand.
mod instruction;

/// Source lines as handed over by the normalizer and split by the line parser.
mod line;

pub use directive::Directive;
pub use instruction::{AddressingMode, Instruction, Mnemonic, Operand};
pub use line::{ParsedLine, SourceLine};
