//! Canonical contract documents.
//!
//! A contract is persisted as JSON with every entity list in canonical
//! order, so two extractions of identical sources serialize to identical
//! bytes. Decoding is tolerant: unknown fields are ignored and missing
//! optional attributes are treated as absent. Structural violations are
//! reported as [`DocumentError`]s.

use super::{
    Constant, Contract, Declared, Function, Interface, Parameter, TypeDecl, TypeKind, Variable,
    SCHEMA_VERSION,
};
use crate::utils::content_hash;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// One structural problem found in a contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Symbol the violation was found on (empty for document-level issues)
    pub symbol: String,
    pub message: String,
}

impl Violation {
    fn new(symbol: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.symbol.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.symbol, self.message)
        }
    }
}

/// Errors decoding or validating a contract document.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DocumentError {
    #[error("malformed contract document: {0}")]
    Malformed(String),

    #[error("unsupported schema version {found} (supported: {})", SCHEMA_VERSION)]
    UnsupportedSchema { found: u32 },

    #[error("{} violation(s), first: {}", .0.len(), first_violation(.0))]
    Invalid(Vec<Violation>),
}

fn first_violation(violations: &[Violation]) -> String {
    violations
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

impl Contract {
    /// Serialize to the canonical pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(&self.canonical())?)
    }

    /// Serialize to canonical compact JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, DocumentError> {
        Ok(serde_json::to_vec(&self.canonical())?)
    }

    /// Decode, canonicalize and validate a contract document.
    pub fn from_json(content: &str) -> Result<Self, DocumentError> {
        let mut contract: Self = serde_json::from_str(content)?;
        if contract.schema_version > SCHEMA_VERSION {
            return Err(DocumentError::UnsupportedSchema {
                found: contract.schema_version,
            });
        }
        contract.canonicalize();
        contract.validate()?;
        Ok(contract)
    }

    /// Content hash of the canonical encoding. Equal hashes mean identical
    /// contracts (up to xxh3 collisions).
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        match self.to_json_bytes() {
            Ok(bytes) => content_hash(&bytes),
            Err(_) => 0,
        }
    }

    /// Check the structural invariants of the contract.
    pub fn validate(&self) -> Result<(), DocumentError> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(DocumentError::Invalid(violations))
        }
    }

    /// Every structural violation, in canonical symbol order.
    #[must_use]
    pub fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        if self.schema_version > SCHEMA_VERSION {
            out.push(Violation::new(
                "",
                format!("unsupported schema version {}", self.schema_version),
            ));
        }

        check_unique(&self.interfaces, &mut out);
        for iface in &self.interfaces {
            check_interface(iface, &mut out);
        }
        check_unique(&self.types, &mut out);
        for ty in &self.types {
            check_type(ty, &mut out);
        }
        check_unique(&self.functions, &mut out);
        for func in &self.functions {
            check_function(func, &mut out);
        }
        check_unique(&self.variables, &mut out);
        for var in &self.variables {
            check_value::<Variable>(var, var.ty.as_deref(), &mut out);
        }
        check_unique(&self.constants, &mut out);
        for constant in &self.constants {
            check_value::<Constant>(constant, constant.ty.as_deref(), &mut out);
        }
        out
    }

    fn canonical(&self) -> std::borrow::Cow<'_, Self> {
        let mut sorted = self.clone();
        sorted.canonicalize();
        if sorted == *self {
            std::borrow::Cow::Borrowed(self)
        } else {
            std::borrow::Cow::Owned(sorted)
        }
    }
}

fn check_unique<T: Declared>(items: &[T], out: &mut Vec<Violation>) {
    let mut seen = HashSet::new();
    for item in items {
        if item.name().is_empty() {
            out.push(Violation::new(
                item.package(),
                format!("{} with empty name", T::KIND),
            ));
            continue;
        }
        if !seen.insert((item.package(), item.name())) {
            out.push(Violation::new(
                item.qualified_name().to_string(),
                format!("duplicate {} declaration", T::KIND),
            ));
        }
    }
}

fn check_params(symbol: &str, what: &str, params: &[Parameter], out: &mut Vec<Violation>) {
    for (idx, param) in params.iter().enumerate() {
        if param.ty.trim().is_empty() {
            out.push(Violation::new(
                symbol,
                format!("{what} {} has no type", idx + 1),
            ));
        }
    }
}

fn check_interface(iface: &Interface, out: &mut Vec<Violation>) {
    let symbol = iface.qualified_name().to_string();
    check_params(&symbol, "type parameter", &iface.type_params, out);
    let mut seen = HashSet::new();
    for method in &iface.methods {
        if method.name.is_empty() {
            out.push(Violation::new(&symbol, "method with empty name"));
            continue;
        }
        if !seen.insert(method.name.as_str()) {
            out.push(Violation::new(
                &symbol,
                format!("duplicate method {}", method.name),
            ));
        }
        let member = format!("{symbol}.{}", method.name);
        check_params(&member, "parameter", &method.params, out);
        check_params(&member, "result", &method.results, out);
    }
}

fn check_type(ty: &TypeDecl, out: &mut Vec<Violation>) {
    let symbol = ty.qualified_name().to_string();
    if ty.kind == TypeKind::Alias && !ty.fields.is_empty() {
        out.push(Violation::new(&symbol, "alias type declares fields"));
    }
    check_params(&symbol, "type parameter", &ty.type_params, out);
    let mut seen = HashSet::new();
    for field in &ty.fields {
        if field.name.is_empty() {
            out.push(Violation::new(&symbol, "field with empty name"));
            continue;
        }
        if !seen.insert(field.name.as_str()) {
            out.push(Violation::new(
                &symbol,
                format!("duplicate field {}", field.name),
            ));
        }
        if field.ty.trim().is_empty() {
            out.push(Violation::new(
                format!("{symbol}.{}", field.name),
                "field has no type",
            ));
        }
    }
}

fn check_function(func: &Function, out: &mut Vec<Violation>) {
    let symbol = func.qualified_name().to_string();
    check_params(&symbol, "type parameter", &func.type_params, out);
    check_params(&symbol, "parameter", &func.params, out);
    check_params(&symbol, "result", &func.results, out);
}

fn check_value<T: Declared>(item: &T, ty: Option<&str>, out: &mut Vec<Violation>) {
    if matches!(ty, Some(t) if t.trim().is_empty()) {
        out.push(Violation::new(
            item.qualified_name().to_string(),
            format!("{} has an empty type", T::KIND),
        ));
    }
}
