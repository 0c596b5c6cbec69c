use lazy_static::lazy_static;
use std::collections::HashMap;
use std::str::FromStr;

use super::ErrorKind;
use crate::ast::{AddressingMode, Mnemonic};

/// Opcodes of the documented NMOS 6502 instruction set, grouped by mnemonic.
///
/// Combinations missing here are not supported by the CPU.
const OPCODES: &[(Mnemonic, &[(AddressingMode, u8)])] = {
    use AddressingMode::*;
    &[
        (
            Mnemonic::ADC,
            &[
                (Immediate, 0x69),
                (ZeroPage, 0x65),
                (ZeroPageX, 0x75),
                (Absolute, 0x6D),
                (AbsoluteX, 0x7D),
                (AbsoluteY, 0x79),
                (IndirectX, 0x61),
                (IndirectY, 0x71),
            ],
        ),
        (
            Mnemonic::AND,
            &[
                (Immediate, 0x29),
                (ZeroPage, 0x25),
                (ZeroPageX, 0x35),
                (Absolute, 0x2D),
                (AbsoluteX, 0x3D),
                (AbsoluteY, 0x39),
                (IndirectX, 0x21),
                (IndirectY, 0x31),
            ],
        ),
        (
            Mnemonic::ASL,
            &[
                (Accumulator, 0x0A),
                (ZeroPage, 0x06),
                (ZeroPageX, 0x16),
                (Absolute, 0x0E),
                (AbsoluteX, 0x1E),
            ],
        ),
        (Mnemonic::BCC, &[(Relative, 0x90)]),
        (Mnemonic::BCS, &[(Relative, 0xB0)]),
        (Mnemonic::BEQ, &[(Relative, 0xF0)]),
        (Mnemonic::BIT, &[(ZeroPage, 0x24), (Absolute, 0x2C)]),
        (Mnemonic::BMI, &[(Relative, 0x30)]),
        (Mnemonic::BNE, &[(Relative, 0xD0)]),
        (Mnemonic::BPL, &[(Relative, 0x10)]),
        (Mnemonic::BRK, &[(Implied, 0x00)]),
        (Mnemonic::BVC, &[(Relative, 0x50)]),
        (Mnemonic::BVS, &[(Relative, 0x70)]),
        (Mnemonic::CLC, &[(Implied, 0x18)]),
        (Mnemonic::CLD, &[(Implied, 0xD8)]),
        (Mnemonic::CLI, &[(Implied, 0x58)]),
        (Mnemonic::CLV, &[(Implied, 0xB8)]),
        (
            Mnemonic::CMP,
            &[
                (Immediate, 0xC9),
                (ZeroPage, 0xC5),
                (ZeroPageX, 0xD5),
                (Absolute, 0xCD),
                (AbsoluteX, 0xDD),
                (AbsoluteY, 0xD9),
                (IndirectX, 0xC1),
                (IndirectY, 0xD1),
            ],
        ),
        (
            Mnemonic::CPX,
            &[(Immediate, 0xE0), (ZeroPage, 0xE4), (Absolute, 0xEC)],
        ),
        (
            Mnemonic::CPY,
            &[(Immediate, 0xC0), (ZeroPage, 0xC4), (Absolute, 0xCC)],
        ),
        (
            Mnemonic::DEC,
            &[
                (ZeroPage, 0xC6),
                (ZeroPageX, 0xD6),
                (Absolute, 0xCE),
                (AbsoluteX, 0xDE),
            ],
        ),
        (Mnemonic::DEX, &[(Implied, 0xCA)]),
        (Mnemonic::DEY, &[(Implied, 0x88)]),
        (
            Mnemonic::EOR,
            &[
                (Immediate, 0x49),
                (ZeroPage, 0x45),
                (ZeroPageX, 0x55),
                (Absolute, 0x4D),
                (AbsoluteX, 0x5D),
                (AbsoluteY, 0x59),
                (IndirectX, 0x41),
                (IndirectY, 0x51),
            ],
        ),
        (
            Mnemonic::INC,
            &[
                (ZeroPage, 0xE6),
                (ZeroPageX, 0xF6),
                (Absolute, 0xEE),
                (AbsoluteX, 0xFE),
            ],
        ),
        (Mnemonic::INX, &[(Implied, 0xE8)]),
        (Mnemonic::INY, &[(Implied, 0xC8)]),
        (Mnemonic::JMP, &[(Absolute, 0x4C), (Indirect, 0x6C)]),
        (Mnemonic::JSR, &[(Absolute, 0x20)]),
        (
            Mnemonic::LDA,
            &[
                (Immediate, 0xA9),
                (ZeroPage, 0xA5),
                (ZeroPageX, 0xB5),
                (Absolute, 0xAD),
                (AbsoluteX, 0xBD),
                (AbsoluteY, 0xB9),
                (IndirectX, 0xA1),
                (IndirectY, 0xB1),
            ],
        ),
        (
            Mnemonic::LDX,
            &[
                (Immediate, 0xA2),
                (ZeroPage, 0xA6),
                (ZeroPageY, 0xB6),
                (Absolute, 0xAE),
                (AbsoluteY, 0xBE),
            ],
        ),
        (
            Mnemonic::LDY,
            &[
                (Immediate, 0xA0),
                (ZeroPage, 0xA4),
                (ZeroPageX, 0xB4),
                (Absolute, 0xAC),
                (AbsoluteX, 0xBC),
            ],
        ),
        (
            Mnemonic::LSR,
            &[
                (Accumulator, 0x4A),
                (ZeroPage, 0x46),
                (ZeroPageX, 0x56),
                (Absolute, 0x4E),
                (AbsoluteX, 0x5E),
            ],
        ),
        (Mnemonic::NOP, &[(Implied, 0xEA)]),
        (
            Mnemonic::ORA,
            &[
                (Immediate, 0x09),
                (ZeroPage, 0x05),
                (ZeroPageX, 0x15),
                (Absolute, 0x0D),
                (AbsoluteX, 0x1D),
                (AbsoluteY, 0x19),
                (IndirectX, 0x01),
                (IndirectY, 0x11),
            ],
        ),
        (Mnemonic::PHA, &[(Implied, 0x48)]),
        (Mnemonic::PHP, &[(Implied, 0x08)]),
        (Mnemonic::PLA, &[(Implied, 0x68)]),
        (Mnemonic::PLP, &[(Implied, 0x28)]),
        (
            Mnemonic::ROL,
            &[
                (Accumulator, 0x2A),
                (ZeroPage, 0x26),
                (ZeroPageX, 0x36),
                (Absolute, 0x2E),
                (AbsoluteX, 0x3E),
            ],
        ),
        (
            Mnemonic::ROR,
            &[
                (Accumulator, 0x6A),
                (ZeroPage, 0x66),
                (ZeroPageX, 0x76),
                (Absolute, 0x6E),
                (AbsoluteX, 0x7E),
            ],
        ),
        (Mnemonic::RTI, &[(Implied, 0x40)]),
        (Mnemonic::RTS, &[(Implied, 0x60)]),
        (
            Mnemonic::SBC,
            &[
                (Immediate, 0xE9),
                (ZeroPage, 0xE5),
                (ZeroPageX, 0xF5),
                (Absolute, 0xED),
                (AbsoluteX, 0xFD),
                (AbsoluteY, 0xF9),
                (IndirectX, 0xE1),
                (IndirectY, 0xF1),
            ],
        ),
        (Mnemonic::SEC, &[(Implied, 0x38)]),
        (Mnemonic::SED, &[(Implied, 0xF8)]),
        (Mnemonic::SEI, &[(Implied, 0x78)]),
        (
            Mnemonic::STA,
            &[
                (ZeroPage, 0x85),
                (ZeroPageX, 0x95),
                (Absolute, 0x8D),
                (AbsoluteX, 0x9D),
                (AbsoluteY, 0x99),
                (IndirectX, 0x81),
                (IndirectY, 0x91),
            ],
        ),
        (
            Mnemonic::STX,
            &[(ZeroPage, 0x86), (ZeroPageY, 0x96), (Absolute, 0x8E)],
        ),
        (
            Mnemonic::STY,
            &[(ZeroPage, 0x84), (ZeroPageX, 0x94), (Absolute, 0x8C)],
        ),
        (Mnemonic::TAX, &[(Implied, 0xAA)]),
        (Mnemonic::TAY, &[(Implied, 0xA8)]),
        (Mnemonic::TSX, &[(Implied, 0xBA)]),
        (Mnemonic::TXA, &[(Implied, 0x8A)]),
        (Mnemonic::TXS, &[(Implied, 0x9A)]),
        (Mnemonic::TYA, &[(Implied, 0x98)]),
    ]
};

/// A mapper between instruction definitions and opcodes.
#[derive(Debug)]
pub struct OpcodeMapping {
    forward_map: HashMap<(Mnemonic, AddressingMode), u8>,
}

impl OpcodeMapping {
    #[tracing::instrument]
    fn new() -> Self {
        let forward_map = OPCODES
            .iter()
            .flat_map(|(mnemonic, modes)| {
                modes
                    .iter()
                    .map(move |&(addr_mode, opcode)| ((*mnemonic, addr_mode), opcode))
            })
            .collect();

        OpcodeMapping { forward_map }
    }

    /// Find the opcode corresponding to the given instruction.
    #[tracing::instrument(skip(self))]
    pub fn find_opcode(&self, instruction: (Mnemonic, AddressingMode)) -> Option<u8> {
        self.forward_map.get(&instruction).copied()
    }

    /// Whether the mnemonic can be encoded with the addressing mode.
    pub fn supports(&self, mnemonic: Mnemonic, addr_mode: AddressingMode) -> bool {
        self.forward_map.contains_key(&(mnemonic, addr_mode))
    }

    /// Opcode of a known mnemonic in the given addressing mode.
    pub fn opcode(&self, mnemonic: Mnemonic, addr_mode: AddressingMode) -> Result<u8, ErrorKind> {
        self.find_opcode((mnemonic, addr_mode))
            .ok_or(ErrorKind::UnsupportedAddressingMode(mnemonic, addr_mode))
    }
}

lazy_static! {
    /// A mapping between instructions and opcodes.
    pub static ref OPCODE_MAPPING: OpcodeMapping = OpcodeMapping::new();
}

/// Parse a mnemonic as written in the source code.
pub fn parse_mnemonic(mnemonic: &str) -> Result<Mnemonic, ErrorKind> {
    Mnemonic::from_str(mnemonic).map_err(|_| ErrorKind::UnknownMnemonic(mnemonic.to_owned()))
}

/// Look up the opcode of a mnemonic in the given addressing mode.
#[tracing::instrument]
pub fn lookup(mnemonic: &str, addr_mode: AddressingMode) -> Result<u8, ErrorKind> {
    OPCODE_MAPPING.opcode(parse_mnemonic(mnemonic)?, addr_mode)
}
