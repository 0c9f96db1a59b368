//! Language adapter abstraction.
//!
//! The extractor core only asks an adapter which files belong to a package
//! and what each file declares. Parser node types never leave the adapter.

use crate::error::Result;
use crate::model::{Constant, Function, Interface, SymbolKind, TypeDecl, Variable};
use std::path::Path;

/// One source file handed to an adapter.
#[derive(Debug, Clone, Copy)]
pub struct SourceFile<'a> {
    /// Path relative to the extraction root, `/`-separated
    pub relative_path: &'a str,
    pub content: &'a str,
    /// Module identity of the extraction root, if the adapter found one
    pub module: Option<&'a str>,
    /// Whether declarations should carry source positions
    pub record_positions: bool,
}

impl SourceFile<'_> {
    /// Directory part of the relative path (empty for root files).
    #[must_use]
    pub fn relative_dir(&self) -> &str {
        self.relative_path
            .rsplit_once('/')
            .map_or("", |(dir, _)| dir)
    }
}

/// A top-level declaration yielded by an adapter.
///
/// Members are included unfiltered; visibility rules are applied by the
/// extractor core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Interface(Interface),
    Type(TypeDecl),
    Function(Function),
    Variable(Variable),
    Constant(Constant),
}

impl Declaration {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Interface(d) => &d.name,
            Self::Type(d) => &d.name,
            Self::Function(d) => &d.name,
            Self::Variable(d) => &d.name,
            Self::Constant(d) => &d.name,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> SymbolKind {
        match self {
            Self::Interface(_) => SymbolKind::Interface,
            Self::Type(_) => SymbolKind::Type,
            Self::Function(_) => SymbolKind::Function,
            Self::Variable(_) => SymbolKind::Variable,
            Self::Constant(_) => SymbolKind::Constant,
        }
    }
}

/// Everything a single file declares.
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    /// Package identity the declarations belong to
    pub package: String,
    pub declarations: Vec<Declaration>,
}

/// Source-language specific knowledge needed to extract a contract.
///
/// Implementations must be stateless between files: files are parsed
/// concurrently.
pub trait LanguageAdapter: Send + Sync {
    /// Short language name used in logs.
    fn name(&self) -> &'static str;

    /// Whether a file takes part in the package at all.
    fn is_source_file(&self, path: &Path) -> bool;

    /// Whether a source file only exists for tests.
    fn is_test_file(&self, path: &Path) -> bool;

    /// Whether a directory name marks an internal sub-package.
    fn is_internal_dir(&self, name: &str) -> bool;

    /// Whether a directory is never part of the package tree.
    fn is_ignored_dir(&self, name: &str) -> bool;

    /// Whether a symbol or member name is part of the public surface.
    fn is_exported(&self, name: &str) -> bool;

    /// Identity of the module rooted at `root`, if declared.
    fn module_path(&self, root: &Path) -> Result<Option<String>>;

    /// Parse one file into declarations.
    fn parse_file(&self, file: &SourceFile<'_>) -> Result<ParsedFile>;
}
