/// A normalized line of source code.
///
/// The code is lower-cased with comments and surrounding whitespace removed. The number is the
/// 1-based line number in the source file and is carried along for diagnostics.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SourceLine {
    pub number: usize,
    pub code: String,
}

impl SourceLine {
    pub fn new(number: usize, code: &str) -> Self {
        Self {
            number,
            code: code.to_owned(),
        }
    }
}

/// A source line split into its label, mnemonic and operand text.
///
/// `label: mnemonic operands`
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ParsedLine {
    pub label: Option<String>,
    pub mnemonic: Option<String>,
    pub operands: Option<String>,
}

impl ParsedLine {
    pub fn new(label: Option<&str>, mnemonic: Option<&str>, operands: Option<&str>) -> Self {
        Self {
            label: label.map(str::to_owned),
            mnemonic: mnemonic.map(str::to_owned),
            operands: operands.map(str::to_owned),
        }
    }
}
