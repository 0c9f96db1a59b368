//! Identity types for contract symbols.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Package-qualified symbol name, the comparison key between two contracts.
///
/// Members (interface methods, struct fields, receiver methods) use the
/// container-qualified form `Container.Member` as `name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QualifiedName {
    pub package: String,
    pub name: String,
}

impl QualifiedName {
    /// Create a qualified name from a package and a symbol name.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.package, self.name)
        }
    }
}

/// Declaration kind of a symbol or member.
///
/// Variant order is the sort order of kinds within one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Interface,
    Method,
    Type,
    Field,
    Function,
    Variable,
    Constant,
}

impl SymbolKind {
    /// Top-level category the kind is reported under.
    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::Interface | Self::Method => Category::Interfaces,
            Self::Type | Self::Field => Category::Types,
            Self::Function => Category::Functions,
            Self::Variable => Category::Variables,
            Self::Constant => Category::Constants,
        }
    }

    /// Lowercase name used in documents and reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Interface => "interface",
            Self::Method => "method",
            Self::Type => "type",
            Self::Field => "field",
            Self::Function => "function",
            Self::Variable => "variable",
            Self::Constant => "constant",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Top-level contract category. Variant order is the change set sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Interfaces,
    Types,
    Functions,
    Variables,
    Constants,
}

impl Category {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Interfaces => "interfaces",
            Self::Types => "types",
            Self::Functions => "functions",
            Self::Variables => "variables",
            Self::Constants => "constants",
        }
    }
}

/// Declaration site of a symbol, recorded only when extraction asks for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourcePosition {
    /// File path relative to the extraction root, `/`-separated
    pub file: String,
    /// 1-based line number
    pub line: u32,
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name_display() {
        let qn = QualifiedName::new("example.com/auth", "AuthService");
        assert_eq!(qn.to_string(), "example.com/auth.AuthService");
        assert_eq!(QualifiedName::new("", "Login").to_string(), "Login");
    }

    #[test]
    fn test_kind_categories() {
        assert_eq!(SymbolKind::Method.category(), Category::Interfaces);
        assert_eq!(SymbolKind::Field.category(), Category::Types);
        assert!(Category::Interfaces < Category::Constants);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&SymbolKind::Constant).expect("serialize");
        assert_eq!(json, "\"constant\"");
    }
}
