use std::str::FromStr;

use crate::assembler::{classifier, symbols::SymbolTable};

/// Opcode of `nop`, unused memory is filled with it.
pub const NOP: u8 = 0xEA;

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// The full 64 KiB address space of the CPU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryImage {
    data: Box<[u8]>,
}

impl MemoryImage {
    pub const MEMORY_SIZE: usize = 64 * 1024;

    /// A memory image filled with NOP.
    pub fn new() -> Self {
        Self {
            data: vec![NOP; MemoryImage::MEMORY_SIZE].into_boxed_slice(),
        }
    }

    pub fn read_byte(&self, address: u16) -> u8 {
        self.data[address as usize]
    }

    /// Reads a little endian word. The high byte of `$ffff` wraps around to `$0000`.
    pub fn read_word(&self, address: u16) -> u16 {
        u16::from_le_bytes([
            self.read_byte(address),
            self.read_byte(address.wrapping_add(1)),
        ])
    }

    pub fn write_byte(&mut self, address: u16, data: u8) {
        self.data[address as usize] = data;
    }

    /// Writes a little endian word.
    pub fn write_word(&mut self, address: u16, data: u16) {
        let [lo, hi] = data.to_le_bytes();
        self.write_byte(address, lo);
        self.write_byte(address.wrapping_add(1), hi);
    }

    /// Writes a sequence of bytes starting at `start_address`, wrapping at the end of memory.
    pub fn load(&mut self, start_address: u16, data: &[u8]) {
        let mut address = start_address;
        for byte in data {
            self.write_byte(address, *byte);
            address = address.wrapping_add(1);
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Default for MemoryImage {
    fn default() -> Self {
        Self::new()
    }
}

/// Interrupt vectors of the CPU. A vector left as `None` keeps whatever is in memory.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Vectors {
    pub nmi: Option<u16>,
    pub reset: Option<u16>,
    pub irq: Option<u16>,
}

/// Compose a memory image.
///
/// The layers are written in order, later layers overwrite earlier ones:
/// 1. NOP fill
/// 2. Machine code, one `(address, bytes)` run per instruction
/// 3. Interrupt vectors
/// 4. Overlay bytes
#[tracing::instrument(skip_all)]
pub fn build(
    code: impl IntoIterator<Item = (u16, Vec<u8>)>,
    vectors: &Vectors,
    overlay: &[(u16, u8)],
) -> MemoryImage {
    let mut image = MemoryImage::new();

    for (address, bytes) in code {
        image.load(address, &bytes);
    }

    for (address, vector) in [
        (NMI_VECTOR, vectors.nmi),
        (RESET_VECTOR, vectors.reset),
        (IRQ_VECTOR, vectors.irq),
    ] {
        if let Some(vector) = vector {
            image.write_word(address, vector);
        }
    }

    for (address, byte) in overlay {
        image.write_byte(*address, *byte);
    }

    image
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum VectorError {
    #[error("Invalid vector '{0}', expected $XXXX or a label")]
    Invalid(String),
    #[error("Undefined label: '{0}'")]
    UndefinedLabel(String),
}

/// Value of an interrupt vector given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VectorValue {
    /// `$8000`
    Address(u16),
    /// `reset`
    Label(String),
}

impl VectorValue {
    pub fn resolve(&self, symbols: &SymbolTable) -> Result<u16, VectorError> {
        match self {
            VectorValue::Address(address) => Ok(*address),
            VectorValue::Label(label) => symbols
                .resolve(label)
                .map_err(|_| VectorError::UndefinedLabel(label.clone())),
        }
    }
}

impl FromStr for VectorValue {
    type Err = VectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        if let Some(hex) = value.strip_prefix('$') {
            classifier::hex_value(hex, 1..=4)
                .map(|address| VectorValue::Address(address as u16))
                .ok_or_else(|| VectorError::Invalid(s.to_owned()))
        } else if classifier::is_identifier(&value) {
            Ok(VectorValue::Label(value))
        } else {
            Err(VectorError::Invalid(s.to_owned()))
        }
    }
}
