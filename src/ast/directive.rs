use std::fmt;

/// Commands to the assembler that are not instructions.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Directive {
    /// Defines where in the memory code from now on should be placed.
    ///
    /// E.g. `.org $8000` in the assembly code opens a new block of code which is placed at
    /// address $8000. Labels within the block are bound to absolute addresses counted from the
    /// origin.
    Origin(u16),
}

impl Directive {
    /// Token that starts an origin directive.
    pub const ORIGIN: &'static str = ".org";
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Origin(address) => write!(f, "{} ${:04x}", Directive::ORIGIN, address),
        }
    }
}
