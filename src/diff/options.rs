//! Comparison options.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Options for one contract comparison.
///
/// Every default is spelled out here; the change computers only read the
/// values they are handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DiffOptions {
    /// Never report source position moves
    pub ignore_positions: bool,
    /// Never report documentation-only edits
    pub ignore_comments: bool,
    /// Classify parameter/result renames as breaking
    pub param_name_changes_breaking: bool,
    /// Classify struct tag edits as breaking
    pub tag_changes_breaking: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            ignore_positions: true,
            ignore_comments: false,
            param_name_changes_breaking: false,
            tag_changes_breaking: false,
        }
    }
}

impl DiffOptions {
    /// Every policy flag set to its breaking variant.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            param_name_changes_breaking: true,
            tag_changes_breaking: true,
            ..Self::default()
        }
    }
}
