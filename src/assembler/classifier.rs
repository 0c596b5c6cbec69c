use std::ops::RangeInclusive;

use super::ErrorKind;
use crate::ast::{AddressingMode, Operand};

/// Index register suffix of an operand, i.e. `,x` or `,y`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Index {
    None,
    X,
    Y,
}

/// Parse a hex number with a digit count within `digits`.
///
/// Only plain hex digits are accepted, no sign or prefix.
pub(crate) fn hex_value(text: &str, digits: RangeInclusive<usize>) -> Option<u32> {
    if !digits.contains(&text.len()) || !text.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(text, 16).ok()
}

/// Label names consist of letters, digits and underscores.
pub(crate) fn is_identifier(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn split_index(text: &str) -> (&str, Index) {
    if let Some(base) = text.strip_suffix(",x") {
        (base, Index::X)
    } else if let Some(base) = text.strip_suffix(",y") {
        (base, Index::Y)
    } else {
        (text, Index::None)
    }
}

/// `$44` or a label, the operand of the indexed indirect modes
fn zero_page_operand(text: &str) -> Option<Operand> {
    match text.strip_prefix('$') {
        Some(hex) => hex_value(hex, 2..=2).map(|byte| Operand::Byte(byte as u8)),
        None if is_identifier(text) => Some(Operand::Label(text.to_owned())),
        None => None,
    }
}

/// `$4400` or a label, the operand of `jmp (..)`
fn address_operand(text: &str) -> Option<Operand> {
    match text.strip_prefix('$') {
        Some(hex) => hex_value(hex, 4..=4).map(|word| Operand::Word(word as u16)),
        None if is_identifier(text) => Some(Operand::Label(text.to_owned())),
        None => None,
    }
}

fn classify_indirect(text: &str) -> Option<(AddressingMode, Operand)> {
    let inner = text.strip_prefix('(')?;
    if let Some(inner) = inner.strip_suffix(",x)") {
        zero_page_operand(inner).map(|operand| (AddressingMode::IndirectX, operand))
    } else if let Some(inner) = inner.strip_suffix("),y") {
        zero_page_operand(inner).map(|operand| (AddressingMode::IndirectY, operand))
    } else if let Some(inner) = inner.strip_suffix(')') {
        address_operand(inner).map(|operand| (AddressingMode::Indirect, operand))
    } else {
        None
    }
}

fn classify_hex(hex: &str, index: Index) -> Option<(AddressingMode, Operand)> {
    let value = hex_value(hex, 2..=4)?;
    match (hex.len(), index) {
        (4, Index::None) => Some((AddressingMode::Absolute, Operand::Word(value as u16))),
        (4, Index::X) => Some((AddressingMode::AbsoluteX, Operand::Word(value as u16))),
        (4, Index::Y) => Some((AddressingMode::AbsoluteY, Operand::Word(value as u16))),
        (2, Index::None) => Some((AddressingMode::ZeroPage, Operand::Byte(value as u8))),
        (2, Index::X) => Some((AddressingMode::ZeroPageX, Operand::Byte(value as u8))),
        (2, Index::Y) => Some((AddressingMode::ZeroPageY, Operand::Byte(value as u8))),
        _ => None,
    }
}

/// Infer the addressing mode from the operand text of an instruction.
///
/// Whitespace is ignored and matching is case-insensitive. The rules are tried in order:
///
/// | Operand            | Mode                     |
/// |--------------------|--------------------------|
/// | *(none)*           | Implied                  |
/// | `a`                | Accumulator              |
/// | `#$44`             | Immediate                |
/// | `($44,x)`          | IndirectX                |
/// | `($44),y`          | IndirectY                |
/// | `($4400)`          | Indirect                 |
/// | `$4400[,x\|,y]`     | Absolute[X\|Y]           |
/// | `$44[,x\|,y]`       | ZeroPage[X\|Y]           |
/// | `label`            | Relative                 |
///
/// A bare label is always classified as relative. Instructions without a relative mode treat
/// it as an absolute address instead, see [`Compiler`][super::compiler::Compiler].
#[tracing::instrument]
pub fn classify(operands: Option<&str>) -> Result<(AddressingMode, Operand), ErrorKind> {
    let raw = operands.unwrap_or_default();
    let text: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();

    if text.is_empty() {
        return Ok((AddressingMode::Implied, Operand::Implied));
    }

    if text == "a" {
        return Ok((AddressingMode::Accumulator, Operand::Implied));
    }

    let classified = if let Some(hex) = text.strip_prefix("#$") {
        hex_value(hex, 1..=2).map(|byte| (AddressingMode::Immediate, Operand::Byte(byte as u8)))
    } else if text.starts_with('(') {
        classify_indirect(&text)
    } else {
        let (base, index) = split_index(&text);
        match base.strip_prefix('$') {
            Some(hex) => classify_hex(hex, index),
            None if index == Index::None && is_identifier(base) => {
                Some((AddressingMode::Relative, Operand::Label(base.to_owned())))
            }
            None => None,
        }
    };

    classified.ok_or_else(|| ErrorKind::Syntax(raw.trim().to_owned()))
}
