//! Configuration types for contract-tools operations.
//!
//! Provides structured configuration for extraction and diff runs.

use crate::diff::DiffOptions;
use crate::extract::ExtractOptions;
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// This is the top-level configuration struct that aggregates all configuration
/// options. It can be constructed from CLI arguments, config files, or both
/// (with CLI overriding file settings).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Which symbols and source files enter a contract
    pub extraction: ExtractOptions,
    /// Comparison policy
    pub diff: DiffOptions,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the extraction options.
    pub const fn extraction(mut self, options: ExtractOptions) -> Self {
        self.config.extraction = options;
        self
    }

    /// Set the comparison options.
    pub const fn diff_options(mut self, options: DiffOptions) -> Self {
        self.config.diff = options;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// List only breaking changes in reports.
    pub const fn breaking_only(mut self, breaking_only: bool) -> Self {
        self.config.output.breaking_only = breaking_only;
        self
    }

    /// Enable fail-on-breaking mode.
    pub const fn fail_on_breaking(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_breaking = fail;
        self
    }

    /// Enable fail-on-change mode.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Set the released version used for bump recommendations.
    pub fn current_version(mut self, version: Option<String>) -> Self {
        self.config.behavior.current_version = version;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Command-specific Configuration Types
// ============================================================================

/// Configuration for extract operations
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Package directory to extract
    pub package: PathBuf,
    /// Extraction options
    pub extraction: ExtractOptions,
    /// Output file path (None for stdout)
    pub output_file: Option<PathBuf>,
    /// Suppress non-essential output
    pub quiet: bool,
}

/// Configuration for diff operations
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Contracts to compare
    pub paths: DiffPaths,
    /// Extraction options, used when an input is a package directory
    pub extraction: ExtractOptions,
    /// Comparison policy
    pub diff: DiffOptions,
    /// Output configuration
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

/// Paths for diff operation
#[derive(Debug, Clone)]
pub struct DiffPaths {
    /// Old package directory or contract document
    pub old: PathBuf,
    /// New package directory or contract document
    pub new: PathBuf,
}

impl DiffConfig {
    /// Combine input paths with a loaded application configuration.
    #[must_use]
    pub fn from_app_config(paths: DiffPaths, config: AppConfig) -> Self {
        Self {
            paths,
            extraction: config.extraction,
            diff: config.diff,
            output: config.output,
            behavior: config.behavior,
        }
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
    /// List only breaking changes (summary counts stay complete)
    pub breaking_only: bool,
}

/// Behavior flags for diff operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 2 if breaking changes are found
    pub fail_on_breaking: bool,
    /// Exit with code 1 if any changes are found
    pub fail_on_change: bool,
    /// Suppress non-essential output
    pub quiet: bool,
    /// Released version of the old contract, used to compute the next version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_version: Option<String>,
}

// ============================================================================
// Builder for DiffConfig
// ============================================================================

/// Builder for `DiffConfig`
#[derive(Debug, Default)]
pub struct DiffConfigBuilder {
    old: Option<PathBuf>,
    new: Option<PathBuf>,
    extraction: ExtractOptions,
    diff: DiffOptions,
    output: OutputConfig,
    behavior: BehaviorConfig,
}

impl DiffConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn old_path(mut self, path: PathBuf) -> Self {
        self.old = Some(path);
        self
    }

    #[must_use]
    pub fn new_path(mut self, path: PathBuf) -> Self {
        self.new = Some(path);
        self
    }

    #[must_use]
    pub const fn extraction(mut self, options: ExtractOptions) -> Self {
        self.extraction = options;
        self
    }

    #[must_use]
    pub const fn diff_options(mut self, options: DiffOptions) -> Self {
        self.diff = options;
        self
    }

    #[must_use]
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.output.format = format;
        self
    }

    #[must_use]
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.output.file = file;
        self
    }

    #[must_use]
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.output.no_color = no_color;
        self
    }

    #[must_use]
    pub const fn breaking_only(mut self, breaking_only: bool) -> Self {
        self.output.breaking_only = breaking_only;
        self
    }

    #[must_use]
    pub const fn fail_on_breaking(mut self, fail: bool) -> Self {
        self.behavior.fail_on_breaking = fail;
        self
    }

    #[must_use]
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.behavior.fail_on_change = fail;
        self
    }

    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.behavior.quiet = quiet;
        self
    }

    #[must_use]
    pub fn current_version(mut self, version: Option<String>) -> Self {
        self.behavior.current_version = version;
        self
    }

    pub fn build(self) -> anyhow::Result<DiffConfig> {
        let old = self.old.ok_or_else(|| anyhow::anyhow!("old path is required"))?;
        let new = self.new.ok_or_else(|| anyhow::anyhow!("new path is required"))?;

        Ok(DiffConfig {
            paths: DiffPaths { old, new },
            extraction: self.extraction,
            diff: self.diff,
            output: self.output,
            behavior: self.behavior,
        })
    }
}
