//! Symbol kinds and the namespace keys they are stored under.

use std::fmt;

/// Separator between scope name segments (`main::call_3`).
pub const SCOPE_SEPARATOR: &str = "::";
/// Variables, classes and enums.
pub const VARIABLES_NS: &str = "::variables";
pub const CONSTANTS_NS: &str = "::constants";
pub const FUNCTIONS_NS: &str = "::functions";
pub const METHODS_NS: &str = "::methods";
/// Anything that fits no other namespace.
pub const OTHERS_NS: &str = "::others";
/// Infix of per-call scope names.
pub const CALL_SCOPE: &str = "::call_";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Variable,
    Constant,
    Function,
    Method,
    Class,
    Enum,
}

impl SymbolKind {
    pub fn name(self) -> &'static str {
        match self {
            SymbolKind::Variable => "variable",
            SymbolKind::Constant => "constant",
            SymbolKind::Function => "function",
            SymbolKind::Method => "method",
            SymbolKind::Class => "class",
            SymbolKind::Enum => "enum",
        }
    }

    /// Namespace a symbol of this kind is defined under.
    pub fn namespace(self) -> &'static str {
        match self {
            SymbolKind::Variable | SymbolKind::Class | SymbolKind::Enum => VARIABLES_NS,
            SymbolKind::Constant => CONSTANTS_NS,
            SymbolKind::Function => FUNCTIONS_NS,
            SymbolKind::Method => METHODS_NS,
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
