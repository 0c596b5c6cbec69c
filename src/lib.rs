/// Syntax tree of 6502 assembly: source lines, instructions and directives.
pub mod ast;

/// Transforms 6502 assembly code to machine code.
///
/// The steps are:
/// 1. **Normalizing** - stripping comments and blank lines
/// 2. **Block extraction** - splitting the program at `.org` directives
/// 3. **Compiling** - converting every block into machine code in two passes
///     - Pass 1: Layout - binding labels and choosing addressing modes
///     - Pass 2: Code generation - resolving labels and generating machine code
pub mod assembler;

/// 64 KiB memory image with interrupt vectors.
pub mod image;

/// Memory map files with extra data placed on top of the assembled image.
pub mod overlay;

/// Memory initialization file formats.
pub mod export;

/// Human readable listing of an assembled program.
pub mod listing;

/// Logging and tracing setup.
pub mod instrumentation;
