//! Gate symbols and the catalog that assigns them roles.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// A gate label placed on a track.
///
/// The QUIC encoding stores one character per track and column, so a symbol
/// is always exactly one character. Symbols outside the catalog are still
/// valid symbols; they simply have the [`SymbolRole::Plain`] role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(char);

/// Character separating columns in a QUIC string. Never a valid symbol.
pub const COLUMN_SEPARATOR: char = ',';

impl Symbol {
    /// Create a symbol from a character.
    #[inline]
    pub const fn new(c: char) -> Self {
        Symbol(c)
    }

    /// Parse a one-character label.
    pub fn parse(label: &str) -> GridResult<Self> {
        let mut chars = label.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c != COLUMN_SEPARATOR => Ok(Symbol(c)),
            _ => Err(GridError::InvalidSymbol(label.to_string())),
        }
    }

    /// Check if this is the column separator, which no cell may hold.
    #[inline]
    pub const fn is_reserved(self) -> bool {
        self.0 == COLUMN_SEPARATOR
    }

    /// The underlying character.
    #[inline]
    pub const fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol(c)
    }
}

impl FromStr for Symbol {
    type Err = GridError;

    fn from_str(s: &str) -> GridResult<Self> {
        Symbol::parse(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = GridError;

    fn try_from(s: String) -> GridResult<Self> {
        Symbol::parse(&s)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0.to_string()
    }
}

/// How a symbol participates in the connectivity overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolRole {
    /// Control symbol (`C`).
    Control,
    /// Symbol that can be the target of a control (`X`, `Y`, `Z`, `N`).
    Target,
    /// No-op symbol; also fills empty cells when serializing (`I`).
    Identity,
    /// Ordinary single-track operation.
    Plain,
}

impl fmt::Display for SymbolRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolRole::Control => write!(f, "control"),
            SymbolRole::Target => write!(f, "target"),
            SymbolRole::Identity => write!(f, "identity"),
            SymbolRole::Plain => write!(f, "plain"),
        }
    }
}

/// The palette of symbols offered to the editor, with their roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolCatalog {
    /// Symbols in palette order.
    symbols: Vec<Symbol>,
    /// Role of every non-plain symbol.
    roles: FxHashMap<Symbol, SymbolRole>,
    /// Symbol used for empty cells.
    identity: Symbol,
}

impl SymbolCatalog {
    /// Symbols of the standard palette, in display order.
    pub const STANDARD_SYMBOLS: [char; 10] = ['H', 'X', 'Y', 'Z', 'C', 'N', 'P', 'T', 'I', 'm'];

    /// Build a catalog from explicit role assignments.
    ///
    /// Every control, target and the identity symbol must appear in
    /// `symbols`, no symbol may be listed twice, and a symbol can hold only
    /// one role.
    pub fn new(
        symbols: impl IntoIterator<Item = Symbol>,
        controls: impl IntoIterator<Item = Symbol>,
        targets: impl IntoIterator<Item = Symbol>,
        identity: Symbol,
    ) -> GridResult<Self> {
        let symbols: Vec<Symbol> = symbols.into_iter().collect();
        if let Some(reserved) = symbols.iter().chain([&identity]).find(|s| s.is_reserved()) {
            return Err(GridError::InvalidCatalog(format!(
                "'{reserved}' separates QUIC columns and cannot be a symbol"
            )));
        }
        for (i, s) in symbols.iter().enumerate() {
            if symbols[..i].contains(s) {
                return Err(GridError::InvalidCatalog(format!(
                    "symbol '{s}' listed more than once"
                )));
            }
        }

        let mut roles = FxHashMap::default();
        roles.insert(identity, SymbolRole::Identity);
        let assigned = controls
            .into_iter()
            .map(|s| (s, SymbolRole::Control))
            .chain(targets.into_iter().map(|s| (s, SymbolRole::Target)));
        for (symbol, role) in assigned {
            if let Some(existing) = roles.insert(symbol, role) {
                if existing != role {
                    return Err(GridError::InvalidCatalog(format!(
                        "symbol '{symbol}' cannot be both {existing} and {role}"
                    )));
                }
            }
        }

        if let Some(missing) = roles.keys().find(|s| !symbols.contains(s)) {
            return Err(GridError::InvalidCatalog(format!(
                "symbol '{missing}' has a role but is not in the palette"
            )));
        }

        Ok(Self {
            symbols,
            roles,
            identity,
        })
    }

    /// Build a catalog from string labels, as found in configuration files.
    pub fn from_labels<S: AsRef<str>>(
        symbols: &[S],
        controls: &[S],
        targets: &[S],
        identity: &str,
    ) -> GridResult<Self> {
        let parse_all = |labels: &[S]| -> GridResult<Vec<Symbol>> {
            labels.iter().map(|l| Symbol::parse(l.as_ref())).collect()
        };
        Self::new(
            parse_all(symbols)?,
            parse_all(controls)?,
            parse_all(targets)?,
            Symbol::parse(identity)?,
        )
    }

    /// The standard palette: `H X Y Z C N P T I m`, `C` controls `X Y Z N`.
    pub fn standard() -> Self {
        let mut roles = FxHashMap::default();
        roles.insert(Symbol('C'), SymbolRole::Control);
        for t in ['X', 'Y', 'Z', 'N'] {
            roles.insert(Symbol(t), SymbolRole::Target);
        }
        roles.insert(Symbol('I'), SymbolRole::Identity);

        Self {
            symbols: Self::STANDARD_SYMBOLS.iter().copied().map(Symbol).collect(),
            roles,
            identity: Symbol('I'),
        }
    }

    /// Palette symbols in declaration order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Role of a symbol. Symbols outside the catalog are [`SymbolRole::Plain`].
    #[inline]
    pub fn role(&self, symbol: Symbol) -> SymbolRole {
        self.roles
            .get(&symbol)
            .copied()
            .unwrap_or(SymbolRole::Plain)
    }

    /// Check whether a symbol acts as a control.
    #[inline]
    pub fn is_control(&self, symbol: Symbol) -> bool {
        self.role(symbol) == SymbolRole::Control
    }

    /// Check whether a symbol can be targeted by a control.
    #[inline]
    pub fn is_target(&self, symbol: Symbol) -> bool {
        self.role(symbol) == SymbolRole::Target
    }

    /// Check whether the palette offers this symbol.
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.symbols.contains(&symbol)
    }

    /// The identity symbol.
    #[inline]
    pub fn identity(&self) -> Symbol {
        self.identity
    }

    /// Number of palette symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for SymbolCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(c: char) -> Symbol {
        Symbol::new(c)
    }

    #[test]
    fn test_symbol_parse() {
        assert_eq!(Symbol::parse("H").unwrap(), sym('H'));
        assert!(matches!(
            Symbol::parse("CN"),
            Err(GridError::InvalidSymbol(ref s)) if s == "CN"
        ));
        assert!(Symbol::parse("").is_err());
    }

    #[test]
    fn test_symbol_serde_as_string() {
        let json = serde_json::to_string(&sym('m')).unwrap();
        assert_eq!(json, "\"m\"");
        let back: Symbol = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sym('m'));
        assert!(serde_json::from_str::<Symbol>("\"HX\"").is_err());
    }

    #[test]
    fn test_standard_roles() {
        let catalog = SymbolCatalog::standard();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.role(sym('C')), SymbolRole::Control);
        for t in ['X', 'Y', 'Z', 'N'] {
            assert!(catalog.is_target(sym(t)));
        }
        assert_eq!(catalog.role(sym('I')), SymbolRole::Identity);
        assert_eq!(catalog.role(sym('H')), SymbolRole::Plain);
        assert_eq!(catalog.role(sym('?')), SymbolRole::Plain);
        assert!(!catalog.contains(sym('?')));
    }

    #[test]
    fn test_standard_matches_explicit_construction() {
        let explicit = SymbolCatalog::from_labels(
            &["H", "X", "Y", "Z", "C", "N", "P", "T", "I", "m"],
            &["C"],
            &["X", "Y", "Z", "N"],
            "I",
        )
        .unwrap();
        assert_eq!(explicit, SymbolCatalog::standard());
    }

    #[test]
    fn test_column_separator_is_reserved() {
        assert!(Symbol::parse(",").is_err());
        assert!(serde_json::from_str::<Symbol>("\",\"").is_err());
        assert!(sym(',').is_reserved());

        let err = SymbolCatalog::new([sym('H'), sym(','), sym('I')], [], [], sym('I')).unwrap_err();
        assert!(matches!(err, GridError::InvalidCatalog(_)));
        let err = SymbolCatalog::new([sym('H'), sym(',')], [], [], sym(',')).unwrap_err();
        assert!(matches!(err, GridError::InvalidCatalog(_)));
    }

    #[test]
    fn test_catalog_rejects_conflicting_roles() {
        let err = SymbolCatalog::from_labels(&["C", "X", "I"], &["C"], &["C"], "I").unwrap_err();
        assert!(matches!(err, GridError::InvalidCatalog(_)));
    }

    #[test]
    fn test_catalog_rejects_unlisted_role() {
        let err = SymbolCatalog::from_labels(&["C", "I"], &["C"], &["X"], "I").unwrap_err();
        assert!(err.to_string().contains("'X'"));
    }

    #[test]
    fn test_catalog_rejects_duplicates_and_wide_labels() {
        assert!(SymbolCatalog::from_labels(&["H", "H", "I"], &[], &[], "I").is_err());
        assert!(matches!(
            SymbolCatalog::from_labels(&["CN", "I"], &[], &[], "I"),
            Err(GridError::InvalidSymbol(_))
        ));
    }
}
