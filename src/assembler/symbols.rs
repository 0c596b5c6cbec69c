use std::collections::HashMap;
use std::fmt;

use super::ErrorKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Name of the label, case-folded
    pub name: String,
    /// Absolute address the label is bound to
    pub address: u16,
    /// Source line of the definition
    pub line: usize,
}

impl Symbol {
    pub fn new(name: &str, address: u16, line: usize) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            address,
            line,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:04x}  {}", self.address, self.name)
    }
}

/// The symbol table binds label names to absolute addresses.
///
/// There is one table for the whole program. It is filled by the first pass over every block
/// and only read by the second pass, so labels may be referenced before they are defined and
/// from other blocks.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable {
            symbols: HashMap::new(),
        }
    }

    pub fn find_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(&name.to_ascii_lowercase())
    }

    /// Bind a new label. A label can only be defined once.
    #[tracing::instrument(skip(self))]
    pub fn new_symbol(&mut self, symbol: Symbol) -> Result<(), ErrorKind> {
        if self.symbols.contains_key(&symbol.name) {
            return Err(ErrorKind::DuplicateLabel(symbol.name));
        }
        self.symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Address of a label.
    pub fn resolve(&self, name: &str) -> Result<u16, ErrorKind> {
        self.find_symbol(name)
            .map(|symbol| symbol.address)
            .ok_or_else(|| ErrorKind::UndefinedLabel(name.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// All symbols ordered by address, then name.
    pub fn sorted(&self) -> Vec<&Symbol> {
        let mut symbols: Vec<&Symbol> = self.symbols.values().collect();
        symbols.sort_by(|a, b| a.address.cmp(&b.address).then_with(|| a.name.cmp(&b.name)));
        symbols
    }
}
