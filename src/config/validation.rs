//! Configuration validation for contract-tools.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, BehaviorConfig, DiffConfig, ExtractConfig, OutputConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());

        if !self.diff.ignore_positions && !self.extraction.record_positions {
            errors.push(ConfigError {
                field: "diff.ignore_positions".to_string(),
                message: "Positions are only compared when extraction.record_positions is enabled"
                    .to_string(),
            });
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError {
                        field: "output.file".to_string(),
                        message: format!("Parent directory does not exist: {}", parent.display()),
                    });
                }
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref version) = self.current_version {
            if let Err(err) = semver::Version::parse(version.trim_start_matches('v')) {
                errors.push(ConfigError {
                    field: "behavior.current_version".to_string(),
                    message: format!("Invalid semantic version '{version}': {err}"),
                });
            }
        }

        errors
    }
}

impl Validatable for ExtractConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !self.package.is_dir() {
            errors.push(ConfigError {
                field: "package".to_string(),
                message: format!("Package directory not found: {}", self.package.display()),
            });
        }

        errors
    }
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (field, path) in [("paths.old", &self.paths.old), ("paths.new", &self.paths.new)] {
            if !path.exists() {
                errors.push(ConfigError {
                    field: field.to_string(),
                    message: format!("Contract input not found: {}", path.display()),
                });
            }
        }

        // Documents keep whatever positions they were written with.
        let extracts = self.paths.old.is_dir() || self.paths.new.is_dir();
        if extracts && !self.diff.ignore_positions && !self.extraction.record_positions {
            errors.push(ConfigError {
                field: "diff.ignore_positions".to_string(),
                message: "Positions are only compared when extraction.record_positions is enabled"
                    .to_string(),
            });
        }

        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiffPaths;
    use std::path::PathBuf;

    #[test]
    fn test_config_error_display() {
        let error = ConfigError {
            field: "test_field".to_string(),
            message: "test error message".to_string(),
        };
        assert_eq!(error.to_string(), "test_field: test error message");
    }

    #[test]
    fn test_current_version_validation() {
        let valid = BehaviorConfig {
            current_version: Some("v1.2.3".to_string()),
            ..BehaviorConfig::default()
        };
        assert!(valid.is_valid());

        let invalid = BehaviorConfig {
            current_version: Some("1.2".to_string()),
            ..BehaviorConfig::default()
        };
        let errors = invalid.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "behavior.current_version");
    }

    #[test]
    fn test_output_parent_must_exist() {
        let invalid = OutputConfig {
            file: Some(PathBuf::from("/nonexistent/dir/report.json")),
            ..OutputConfig::default()
        };
        assert!(!invalid.is_valid());

        let relative = OutputConfig {
            file: Some(PathBuf::from("report.json")),
            ..OutputConfig::default()
        };
        assert!(relative.is_valid());
    }

    #[test]
    fn test_positions_require_recording() {
        let mut config = AppConfig::default();
        assert!(config.is_valid());

        config.diff.ignore_positions = false;
        assert!(!config.is_valid());

        config.extraction.record_positions = true;
        assert!(config.is_valid());
    }

    #[test]
    fn test_diff_config_missing_inputs() {
        let config = DiffConfig::from_app_config(
            DiffPaths {
                old: PathBuf::from("/nonexistent/v1"),
                new: PathBuf::from("/nonexistent/v2"),
            },
            AppConfig::default(),
        );
        let fields: Vec<_> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["paths.old", "paths.new"]);
    }
}
