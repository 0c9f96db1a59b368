//! Report generation for contract diff results.
//!
//! This module provides multiple output formats for a [`ChangeSet`]:
//! - JSON: Structured data for programmatic integration
//! - Markdown: Human-readable release notes and review comments
//! - Text: Aligned terminal table
//!
//! # Security
//!
//! The `escape` module provides utilities for safe output generation.
//! Symbol names, signatures and documentation come from the compared
//! sources and must be escaped before embedding in Markdown.

pub mod escape;
mod json;
mod markdown;
mod text;
mod types;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use text::TextReporter;
pub use types::{ReportConfig, ReportFormat, ReportMetadata};

use crate::diff::ChangeSet;
use crate::error::{ContractError, ReportErrorKind};
use crate::model::Contract;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(ReportFormat),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<ReportError> for ContractError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::IoError(source) => Self::from(source),
            ReportError::SerializationError(message) => Self::report(
                "rendering report",
                ReportErrorKind::JsonSerializationError(message),
            ),
            ReportError::UnsupportedFormat(format) => Self::report(
                "selecting reporter",
                ReportErrorKind::UnsupportedFormat(format.to_string()),
            ),
            ReportError::FormatError(source) => Self::report(
                "rendering report",
                ReportErrorKind::JsonSerializationError(source.to_string()),
            ),
        }
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report from a change set
    fn generate_diff_report(
        &self,
        changes: &ChangeSet,
        old: &Contract,
        new: &Contract,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Write report to a writer
    fn write_diff_report(
        &self,
        changes: &ChangeSet,
        old: &Contract,
        new: &Contract,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate_diff_report(changes, old, new, config)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
pub fn create_reporter(format: ReportFormat) -> Result<Box<dyn ReportGenerator>, ReportError> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control.
///
/// `Auto` must be resolved by the caller (see
/// [`crate::pipeline::auto_detect_format`]).
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Result<Box<dyn ReportGenerator>, ReportError> {
    match format {
        ReportFormat::Auto => Err(ReportError::UnsupportedFormat(format)),
        ReportFormat::Json => Ok(Box::new(JsonReporter::new())),
        ReportFormat::Markdown => Ok(Box::new(MarkdownReporter::new())),
        ReportFormat::Text => {
            if use_color {
                Ok(Box::new(TextReporter::new()))
            } else {
                Ok(Box::new(TextReporter::new().no_color()))
            }
        }
    }
}

/// Changes a report lists under the configured filter.
pub(crate) fn listed<'a>(
    changes: &'a ChangeSet,
    config: &'a ReportConfig,
) -> impl Iterator<Item = &'a crate::diff::Change> {
    changes
        .iter()
        .filter(move |c| !config.breaking_only || c.is_breaking())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_reporter_formats() {
        for format in [ReportFormat::Json, ReportFormat::Markdown, ReportFormat::Text] {
            let reporter = create_reporter(format).expect("concrete format");
            assert_eq!(reporter.format(), format);
        }
    }

    #[test]
    fn test_auto_must_be_resolved() {
        let err = create_reporter(ReportFormat::Auto).err().expect("auto rejected");
        assert!(matches!(err, ReportError::UnsupportedFormat(ReportFormat::Auto)));

        let converted = ContractError::from(err);
        assert!(matches!(
            converted,
            ContractError::Report {
                source: ReportErrorKind::UnsupportedFormat(_),
                ..
            }
        ));
    }

    #[test]
    fn test_write_diff_report() {
        let contract = Contract::empty("app");
        let mut buffer = Vec::new();
        TextReporter::new()
            .no_color()
            .write_diff_report(
                &ChangeSet::new(),
                &contract,
                &contract,
                &ReportConfig::default(),
                &mut buffer,
            )
            .expect("write");
        let text = String::from_utf8(buffer).expect("utf8");
        assert!(text.contains("No API changes"));
    }
}
