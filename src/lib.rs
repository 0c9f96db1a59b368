//! **API contract extraction and breaking-change detection.**
//!
//! `contract-tools` reads the source of a package, records its exported API
//! surface as a [`Contract`], and compares two contracts to produce a
//! [`ChangeSet`]: every difference classified as a breaking change, an
//! addition, or a modification, with the semantic-version bump it implies.
//!
//! Contracts serialize to a canonical JSON document, so a snapshot taken at
//! release time can later be compared against the working tree without
//! checking out the old sources. The differ treats extracted and decoded
//! contracts identically.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The [`Contract`] document and its declarations
//!   (interfaces, types, functions, variables, constants).
//! - **[`extract`]**: The [`Extractor`] and the [`LanguageAdapter`] seam.
//!   Go is supported through `tree-sitter-go`.
//! - **[`diff`]**: The [`DiffEngine`], which runs one change computer per
//!   declaration category and merges their output into a sorted [`ChangeSet`].
//! - **[`reports`]**: JSON, Markdown and plain-text renderings of a change set.
//! - **[`pipeline`]**: Load-or-extract, diff, and report stages used by the CLI.
//! - **[`config`]**: `.contract-tools.yaml` discovery, presets and validation.
//!
//! ## Extracting and Diffing
//!
//! ```no_run
//! use std::path::Path;
//! use contract_tools::{DiffEngine, DiffOptions, ExtractOptions, Extractor};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extractor = Extractor::new(ExtractOptions::default());
//!     let old = extractor.extract(Path::new("v1/"))?;
//!     let new = extractor.extract(Path::new("v2/"))?;
//!
//!     let changes = DiffEngine::new(DiffOptions::default()).diff(&old, &new)?;
//!     println!("Recommended bump: {}", changes.recommended_bump());
//!     for change in changes.iter().filter(|c| c.is_breaking()) {
//!         println!("  {} {}: {}", change.kind, change.symbol, change.description);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Persisted Contracts
//!
//! ```no_run
//! use contract_tools::{diff_contracts, Contract, DiffOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let old = Contract::from_json(&std::fs::read_to_string("users-v1.json")?)?;
//!     let new = Contract::from_json(&std::fs::read_to_string("users-v2.json")?)?;
//!
//!     let changes = diff_contracts(&old, &new, DiffOptions::default())?;
//!     println!("{} changes, breaking: {}", changes.len(), changes.has_breaking());
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `contract-tools` binary wraps the library with `extract` and `diff`
//! subcommands; see `contract-tools --help`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Line numbers and counts stay far below the cast limits
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::too_many_lines,
    // Option structs legitimately use many bools for toggle flags
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::unused_self,
    // Variable names like `old`/`new` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod extract;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod utils;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigPreset};
pub use config::{BehaviorConfig, DiffConfig, ExtractConfig, OutputConfig};
pub use config::{ConfigError, Validatable};
pub use diff::{
    diff_contracts, Change, ChangeSet, ChangeSummary, DiffEngine, DiffOptions, Severity,
    VersionBump,
};
pub use error::{ContractError, ErrorContext, Result};
pub use extract::{ExtractOptions, Extractor, LanguageAdapter};
pub use model::{Contract, DocumentError, QualifiedName, SymbolKind};
pub use reports::{ReportFormat, ReportGenerator};
