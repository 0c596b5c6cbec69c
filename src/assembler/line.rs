use crate::ast::ParsedLine;

/// Split a normalized line into label, mnemonic and operand text.
///
/// The label is everything before the first `:`, the mnemonic is the first word of the
/// statement and the operand text is whatever follows it. Parsing never fails, malformed input
/// is reported when the mnemonic or operands are interpreted.
#[tracing::instrument]
pub fn parse_line(code: &str) -> ParsedLine {
    let (label, statement) = match code.split_once(':') {
        Some((label, statement)) => (Some(label.trim()), statement.trim()),
        None => (None, code.trim()),
    };

    let (mnemonic, operands) = match statement.split_once(char::is_whitespace) {
        Some((mnemonic, operands)) => (mnemonic, Some(operands.trim())),
        None => (statement, None),
    };

    ParsedLine::new(
        label,
        Some(mnemonic).filter(|m| !m.is_empty()),
        operands.filter(|o| !o.is_empty()),
    )
}
