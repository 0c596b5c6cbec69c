use crate::assembler::{classifier::hex_value, source::normalize};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum OverlayError {
    #[error("line {line}: expected '$addr: $data', found '{text}'")]
    Syntax { line: usize, text: String },
}

/// Parse a memory map into `(address, value)` pairs.
///
/// Every line holds a 16 bit address and an 8 bit value, e.g. `$9000: $33`. Comments and empty
/// lines are ignored like in assembly source. Entries are returned in file order, a later entry
/// for the same address wins when applied.
#[tracing::instrument(skip(input))]
pub fn parse_overlay(input: &str) -> Result<Vec<(u16, u8)>, OverlayError> {
    normalize(input)
        .into_iter()
        .map(|line| {
            parse_entry(&line.code).ok_or(OverlayError::Syntax {
                line: line.number,
                text: line.code,
            })
        })
        .collect()
}

fn parse_entry(code: &str) -> Option<(u16, u8)> {
    let (address, data) = code.split_once(':')?;
    let address = hex_value(address.trim().strip_prefix('$')?, 1..=4)?;
    let data = hex_value(data.trim().strip_prefix('$')?, 1..=2)?;

    Some((address as u16, data as u8))
}
