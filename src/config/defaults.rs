//! Default configurations and presets for contract-tools.
//!
//! Provides named presets for common use cases.

use super::types::{AppConfig, BehaviorConfig, OutputConfig};
use crate::diff::DiffOptions;
use crate::extract::ExtractOptions;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Default settings: renames and tag edits are modifications
    Default,
    /// Strict: renames and tag edits break, breaking changes fail the run
    Strict,
    /// Lenient: documentation edits are ignored
    Lenient,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "balanced" => Some(Self::Default),
            "strict" | "ci" => Some(Self::Strict),
            "lenient" | "permissive" => Some(Self::Lenient),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => {
                "Signature and shape changes break, renames and tags are modifications"
            }
            Self::Strict => "Parameter renames and tag edits break, breaking changes fail the run",
            Self::Lenient => "Documentation-only edits are not reported",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Strict, Self::Lenient]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Strict => Self::strict_preset(),
            ConfigPreset::Lenient => Self::lenient_preset(),
        }
    }

    /// Strict preset for published libraries.
    ///
    /// - Parameter renames and struct tag edits are breaking
    /// - Exit with code 2 on breaking changes
    #[must_use]
    pub fn strict_preset() -> Self {
        Self {
            extraction: ExtractOptions::default(),
            diff: DiffOptions::strict(),
            output: OutputConfig::default(),
            behavior: BehaviorConfig {
                fail_on_breaking: true,
                ..BehaviorConfig::default()
            },
        }
    }

    /// Lenient preset for internal or pre-release packages.
    ///
    /// - Documentation-only edits are ignored
    /// - No fail modes
    #[must_use]
    pub fn lenient_preset() -> Self {
        Self {
            extraction: ExtractOptions::default(),
            diff: DiffOptions {
                ignore_comments: true,
                ..DiffOptions::default()
            },
            output: OutputConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
