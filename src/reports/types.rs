//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Auto-detect: from the output file extension, text otherwise
    #[default]
    Auto,
    /// Structured JSON output
    Json,
    /// Human-readable Markdown
    #[value(alias = "md")]
    Markdown,
    /// Aligned terminal table
    Text,
}

impl ReportFormat {
    /// Infer a format from an output file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "md" | "markdown" => Some(Self::Markdown),
            "txt" | "text" => Some(Self::Text),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Json => write!(f, "json"),
            Self::Markdown => write!(f, "markdown"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Title for the report
    pub title: Option<String>,
    /// Only list breaking changes (summary counts stay complete)
    pub breaking_only: bool,
    /// Released version of the old contract
    pub current_version: Option<semver::Version>,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
}

impl ReportConfig {
    /// Report title, falling back to the compared package names.
    #[must_use]
    pub fn title_for(&self, old_package: &str, new_package: &str) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        if old_package == new_package {
            format!("API changes in {new_package}")
        } else {
            format!("API changes from {old_package} to {new_package}")
        }
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Old contract source (directory or document)
    pub old_path: Option<String>,
    /// New contract source (directory or document)
    pub new_path: Option<String>,
    /// Tool version
    pub tool_version: String,
}

impl ReportMetadata {
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }
}
