//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".contract-tools.yaml",
    ".contract-tools.yml",
    "contract-tools.yaml",
    "contract-tools.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/contract-tools/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    search_dirs()
        .iter()
        .find_map(|dir| find_config_in_dir(dir))
}

/// Directories searched for a config file, in priority order.
#[must_use]
pub fn search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(git_root) = find_git_root() {
        dirs.push(git_root);
    }
    if let Some(config_dir) = dirs::config_dir() {
        dirs.push(config_dir.join("contract-tools"));
    }
    if let Some(home) = dirs::home_dir() {
        dirs.push(home);
    }
    dirs
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config file");
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override, so CLI flags that
    /// were not given leave file settings alone.
    pub fn merge(&mut self, other: &Self) {
        // Extraction options
        let extraction = &other.extraction;
        self.extraction.include_private |= extraction.include_private;
        self.extraction.include_tests |= extraction.include_tests;
        self.extraction.include_internal |= extraction.include_internal;
        self.extraction.record_positions |= extraction.record_positions;

        // Diff options
        if !other.diff.ignore_positions {
            self.diff.ignore_positions = false;
        }
        self.diff.ignore_comments |= other.diff.ignore_comments;
        self.diff.param_name_changes_breaking |= other.diff.param_name_changes_breaking;
        self.diff.tag_changes_breaking |= other.diff.tag_changes_breaking;

        // Output config - only override if explicitly set
        if other.output.format != ReportFormat::Auto {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        self.output.no_color |= other.output.no_color;
        self.output.breaking_only |= other.output.breaking_only;

        // Behavior config
        self.behavior.fail_on_breaking |= other.behavior.fail_on_breaking;
        self.behavior.fail_on_change |= other.behavior.fail_on_change;
        self.behavior.quiet |= other.behavior.quiet;
        if other.behavior.current_version.is_some() {
            self.behavior
                .current_version
                .clone_from(&other.behavior.current_version);
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# contract-tools configuration
# Place this file at .contract-tools.yaml in your project root or ~/.config/contract-tools/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# contract-tools Configuration File
# ==================================
#
# Place it at:
#   - .contract-tools.yaml in your project root
#   - ~/.config/contract-tools/contract-tools.yaml for global config
#
# CLI arguments always override file settings.

# Which symbols and files enter a contract
extraction:
  # Admit unexported symbols and members
  include_private: false
  # Parse *_test.go files
  include_tests: false
  # Descend into internal/ packages
  include_internal: false
  # Record declaration file and line
  record_positions: false

# Comparison policy
diff:
  # Never report position moves (requires extraction.record_positions to matter)
  ignore_positions: true
  # Never report documentation-only edits
  ignore_comments: false
  # Treat parameter renames as breaking
  param_name_changes_breaking: false
  # Treat struct tag edits as breaking
  tag_changes_breaking: false

# Output configuration
output:
  # Format: auto, json, markdown, text
  format: auto
  # Output file path (omit for stdout)
  # file: changes.json
  # Disable colored output
  no_color: false
  # List only breaking changes
  breaking_only: false

# Behavior flags
behavior:
  # Exit with code 2 if breaking changes are found
  fail_on_breaking: false
  # Exit with code 1 if any changes are found
  fail_on_change: false
  # Suppress non-essential output
  quiet: false
  # Released version of the old contract, enables next-version output
  # current_version: 1.4.0
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
