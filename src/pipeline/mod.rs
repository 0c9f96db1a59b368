//! Pipeline orchestration for contract operations.
//!
//! This module provides shared orchestration logic for the
//! load-or-extract → diff → report workflow, keeping CLI command handlers
//! thin.

mod diff_stage;
mod load;
mod output;
mod report_stage;

pub use diff_stage::compute_diff;
pub use load::{extract_contract, load_contract, write_contract, ContractSource, LoadedContract};
pub use output::{auto_detect_format, should_use_color, write_output, OutputTarget};
pub use report_stage::{build_report_config, output_report};

use crate::error::ContractSide;

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to extract or decode one of the compared contracts
    #[error("Failed to load {side} contract from {path}: {source}")]
    LoadFailed {
        side: ContractSide,
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// Diff computation failed
    #[error("Diff failed: {source}")]
    DiffFailed {
        #[source]
        source: anyhow::Error,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no changes detected, or no fail flag tripped
    pub const SUCCESS: i32 = 0;
    /// Changes were detected (`--fail-on-change`)
    pub const CHANGES_DETECTED: i32 = 1;
    /// Breaking changes were detected (`--fail-on-breaking`)
    pub const BREAKING_CHANGES: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
