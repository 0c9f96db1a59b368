//! Unified error types for contract-tools.
//!
//! Library code returns [`ContractError`]; each variant carries a context
//! string that grows as the error travels outward (see [`ErrorContext`]).

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for contract-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ContractError {
    /// Errors while extracting a contract from source
    #[error("Failed to extract contract: {context}")]
    Extraction {
        context: String,
        #[source]
        source: ExtractErrorKind,
    },

    /// Errors while comparing two contracts
    #[error("Diff computation failed: {context}")]
    Diff {
        context: String,
        #[source]
        source: DiffErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific extraction error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExtractErrorKind {
    #[error("package not found: {0}")]
    PackageNotFound(PathBuf),

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("no source files found under {0}")]
    NoSourceFiles(PathBuf),

    #[error("cannot read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("syntax error in {file} at line {line}: {message}")]
    Syntax {
        file: String,
        line: usize,
        message: String,
    },

    #[error("language adapter error: {0}")]
    Language(String),
}

/// Which of the two compared contracts an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractSide {
    Old,
    New,
}

impl fmt::Display for ContractSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Old => "old",
            Self::New => "new",
        })
    }
}

/// Specific diff error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DiffErrorKind {
    #[error("{side} contract is invalid: {violation}")]
    InvalidContract { side: ContractSide, violation: String },

    #[error("{side} contract is malformed: {message}")]
    Malformed { side: ContractSide, message: String },

    #[error("{side} contract uses unsupported schema version {version}")]
    UnsupportedSchema { side: ContractSide, version: u32 },
}

impl DiffErrorKind {
    /// Input the error was found in.
    #[must_use]
    pub const fn side(&self) -> ContractSide {
        match self {
            Self::InvalidContract { side, .. }
            | Self::Malformed { side, .. }
            | Self::UnsupportedSchema { side, .. } => *side,
        }
    }
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),

    #[error("Output format not supported for this operation: {0}")]
    UnsupportedFormat(String),
}

/// Convenient Result type for contract-tools operations
pub type Result<T> = std::result::Result<T, ContractError>;

impl ContractError {
    /// Create an extraction error with context
    pub fn extraction(context: impl Into<String>, source: ExtractErrorKind) -> Self {
        Self::Extraction {
            context: context.into(),
            source,
        }
    }

    /// Create a diff error with context
    pub fn diff(context: impl Into<String>, source: DiffErrorKind) -> Self {
        Self::Diff {
            context: context.into(),
            source,
        }
    }

    /// Create a report error with context
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            message: source.to_string(),
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a syntax error for one source file
    pub fn syntax(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        let file = file.into();
        Self::extraction(
            format!("parsing {file}"),
            ExtractErrorKind::Syntax {
                file,
                line,
                message: message.into(),
            },
        )
    }
}

impl From<std::io::Error> for ContractError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: err.to_string(),
            source: err,
        }
    }
}

/// Extension trait for adding context to errors.
///
/// Context is prepended, so the final message reads outermost first:
///
/// ```ignore
/// use contract_tools::error::ErrorContext;
///
/// let contract = extractor
///     .extract(path)
///     .with_context(|| format!("extracting {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<ContractError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: ContractError, new_ctx: &str) -> ContractError {
    match err {
        ContractError::Extraction { context, source } => ContractError::Extraction {
            context: chain_context(new_ctx, &context),
            source,
        },
        ContractError::Diff { context, source } => ContractError::Diff {
            context: chain_context(new_ctx, &context),
            source,
        },
        ContractError::Report { context, source } => ContractError::Report {
            context: chain_context(new_ctx, &context),
            source,
        },
        ContractError::Io {
            path,
            message,
            source,
        } => ContractError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        ContractError::Config(msg) => ContractError::Config(chain_context(new_ctx, &msg)),
        ContractError::Validation(msg) => ContractError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// `"new: existing"`, or just `new` when nothing exists yet.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
