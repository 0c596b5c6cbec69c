use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::{
    ast::{AddressingMode, Mnemonic, SourceLine},
    export,
    image::{self, MemoryImage, VectorValue, Vectors},
    listing, overlay,
};

/// Cleans up raw source text into numbered lines of code.
///
/// Comments, surrounding whitespace and empty lines are removed and everything is lower cased,
/// e.g. `  LDA #$10 ; load` becomes `lda #$10`.
pub mod source;

/// Splits a line of code into label, mnemonic and operand text.
pub mod line;

/// Determines the addressing mode and operand of an instruction from its operand text.
pub mod classifier;

/// Opcode table of the documented instruction set.
pub mod opcode;

/// Groups lines into blocks placed by `.org` directives.
pub mod blocks;

/// Label bookkeeping shared by all blocks.
pub mod symbols;

/// Two pass compilation of blocks into machine code.
///
/// - Pass 1: Layout - binding labels and sizing instructions
/// - Pass 2: Code generation - resolving operands and generating machine code
pub mod compiler;

/// Machine code generation for a single instruction.
pub mod codegen;

use compiler::{AssembledBlock, Compiler};
use symbols::SymbolTable;

#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum ErrorKind {
    #[error("Syntax error: '{0}'")]
    Syntax(String),
    #[error("Unknown mnemonic: '{0}'")]
    UnknownMnemonic(String),
    #[error("Addressing mode {1} is not supported by {0}")]
    UnsupportedAddressingMode(Mnemonic, AddressingMode),
    #[error("Code before the first .org directive")]
    MissingOrigin,
    #[error("Label '{0}' is already defined")]
    DuplicateLabel(String),
    #[error("Undefined label: '{0}'")]
    UndefinedLabel(String),
    #[error("Branch target is out of range: {0} bytes")]
    BranchOutOfRange(i32),
    #[error("Address out of range: ${0:04x}")]
    AddressOutOfRange(u32),
}

/// Error from assembling a program, tagged with the source line it originates from.
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct AssemblerError {
    pub line: usize,
    pub kind: ErrorKind,
}

impl AssemblerError {
    pub fn new(line: usize, kind: ErrorKind) -> Self {
        Self { line, kind }
    }
}

/// An assembled program.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Blocks in ascending order of their origin
    pub blocks: Vec<AssembledBlock>,
    pub symbols: SymbolTable,
}

impl Assembly {
    /// Machine code of every instruction as `(address, bytes)`, in block order.
    pub fn code(&self) -> impl Iterator<Item = (u16, Vec<u8>)> + '_ {
        self.blocks
            .iter()
            .flat_map(|block| block.code.iter())
            .map(|ins| (ins.address, ins.bytes().collect()))
    }

    /// Lowest origin of all blocks.
    pub fn entry_point(&self) -> Option<u16> {
        self.blocks.first().map(|block| block.offset)
    }

    /// Build the memory image of the program.
    ///
    /// Code is written over a NOP filled memory, then the vectors and last the overlay bytes.
    pub fn image(&self, vectors: &Vectors, overlay: &[(u16, u8)]) -> MemoryImage {
        image::build(self.code(), vectors, overlay)
    }
}

/// Assemble normalized lines of code.
#[tracing::instrument(skip_all)]
pub fn assemble_lines(lines: &[SourceLine]) -> Result<Assembly, AssemblerError> {
    let blocks = blocks::extract_blocks(lines)?;
    let (blocks, symbols) = Compiler::new().compile(&blocks)?;

    Ok(Assembly { blocks, symbols })
}

/// Utility function for assembling a program from its source text.
#[tracing::instrument(skip_all)]
pub fn assemble_source(input: &str) -> Result<Assembly, AssemblerError> {
    assemble_lines(&source::normalize(input))
}

#[derive(clap::Args, Debug)]
pub struct AssemblyArgs {
    #[clap(help = "Assembly source file")]
    pub input: PathBuf,
    #[clap(short, long)]
    #[clap(help = "Output file, defaults to the input file with a .mif extension")]
    pub output: Option<PathBuf>,
    #[clap(short, long)]
    #[clap(help = "Write a .coe coefficients file instead of a .mif file")]
    pub coe_only: bool,
    #[clap(short = 'm', long, value_name = "FILE")]
    #[clap(help = "Place additional data into memory from a map file")]
    #[clap(long_help = "Place additional data into memory from a map file. Every line
of the file holds a single byte, `$addr: $data`. Map bytes are
written last and may overwrite code and vectors.")]
    pub with_map: Option<PathBuf>,
    #[clap(short, long, value_name = "FILE")]
    #[clap(help = "Also write an assembly listing")]
    pub listing: Option<PathBuf>,
    #[clap(long, value_name = "ADDRESS|LABEL")]
    #[clap(help = "Reset vector, defaults to the lowest origin")]
    pub reset: Option<VectorValue>,
    #[clap(long, value_name = "ADDRESS|LABEL")]
    #[clap(help = "NMI vector")]
    pub nmi: Option<VectorValue>,
    #[clap(long, value_name = "ADDRESS|LABEL")]
    #[clap(help = "IRQ vector")]
    pub irq: Option<VectorValue>,
}

impl AssemblyArgs {
    fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(output) => output.clone(),
            None if self.coe_only => self.input.with_extension("coe"),
            None => self.input.with_extension("mif"),
        }
    }

    fn vectors(&self, assembly: &Assembly) -> Result<Vectors> {
        let resolve = |value: &Option<VectorValue>| {
            value
                .as_ref()
                .map(|value| value.resolve(&assembly.symbols))
                .transpose()
        };

        Ok(Vectors {
            nmi: resolve(&self.nmi).context("Invalid NMI vector")?,
            reset: resolve(&self.reset)
                .context("Invalid reset vector")?
                .or_else(|| assembly.entry_point()),
            irq: resolve(&self.irq).context("Invalid IRQ vector")?,
        })
    }
}

/// Assemble a source file into a memory initialization file.
#[tracing::instrument]
pub fn assemble(args: &AssemblyArgs) -> Result<()> {
    let input = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Unable to read file {}", args.input.display()))?;
    let assembly = assemble_source(&input).with_context(|| "Assembly failed")?;
    tracing::info!(
        blocks = assembly.blocks.len(),
        symbols = assembly.symbols.len(),
        "assembled {}",
        args.input.display()
    );

    let overlay = match &args.with_map {
        Some(path) => {
            let map = std::fs::read_to_string(path)
                .with_context(|| format!("Unable to read file {}", path.display()))?;
            let overlay = overlay::parse_overlay(&map)
                .with_context(|| format!("Invalid memory map {}", path.display()))?;
            tracing::debug!(bytes = overlay.len(), "loaded {}", path.display());
            overlay
        }
        None => vec![],
    };

    let vectors = args.vectors(&assembly)?;
    tracing::debug!(?vectors);
    let image = assembly.image(&vectors, &overlay);

    let contents = if args.coe_only {
        export::to_coe(&image)
    } else {
        export::to_mif(&image)
    };
    let mut outputs = vec![(args.output_path(), contents)];
    if let Some(path) = &args.listing {
        outputs.push((path.clone(), listing::generate(&assembly)));
    }

    for (path, contents) in outputs {
        std::fs::write(&path, contents)
            .with_context(|| format!("Unable to write file {}", path.display()))?;
        tracing::info!("wrote {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_assemble_source() -> Result<(), AssemblerError> {
        let input = "
            .org $8000
            reset:  ldx #$ff    ; stack
                    txs
            loop:   inc $10
                    bne loop
                    jmp reset
            .org $9000
            nmi:    rti
        ";

        let assembly = assemble_source(input)?;
        assert_eq!(assembly.entry_point(), Some(0x8000));
        assert_eq!(
            assembly.code().collect::<Vec<_>>(),
            vec![
                (0x8000, vec![0xA2, 0xFF]),
                (0x8002, vec![0x9A]),
                (0x8003, vec![0xE6, 0x10]),
                (0x8005, vec![0xD0, 0xFC]),
                (0x8007, vec![0x4C, 0x00, 0x80]),
                (0x9000, vec![0x40]),
            ]
        );
        assert_eq!(assembly.symbols.resolve("nmi"), Ok(0x9000));

        Ok(())
    }

    #[test]
    fn test_error_display() {
        let tests = vec![
            (
                AssemblerError::new(3, ErrorKind::MissingOrigin),
                "line 3: Code before the first .org directive",
            ),
            (
                AssemblerError::new(12, ErrorKind::AddressOutOfRange(0x1234)),
                "line 12: Address out of range: $1234",
            ),
            (
                AssemblerError::new(
                    1,
                    ErrorKind::UnsupportedAddressingMode(Mnemonic::STA, AddressingMode::Immediate),
                ),
                "line 1: Addressing mode Immediate is not supported by sta",
            ),
        ];
        for (error, expected) in tests {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_default_reset_vector() -> Result<()> {
        let assembly = assemble_source(".org $c000\nnop\n.org $8000\nnop")?;
        let args = AssemblyArgs {
            input: PathBuf::from("program.asm"),
            output: None,
            coe_only: false,
            with_map: None,
            listing: None,
            reset: None,
            nmi: Some(VectorValue::Address(0x1234)),
            irq: Some(VectorValue::Label("missing".to_string())),
        };
        assert!(args.vectors(&assembly).is_err());

        let args = AssemblyArgs { irq: None, ..args };
        assert_eq!(
            args.vectors(&assembly)?,
            Vectors {
                nmi: Some(0x1234),
                reset: Some(0x8000),
                irq: None,
            }
        );
        assert_eq!(args.output_path(), PathBuf::from("program.mif"));

        let args = AssemblyArgs {
            coe_only: true,
            ..args
        };
        assert_eq!(args.output_path(), PathBuf::from("program.coe"));

        Ok(())
    }
}
