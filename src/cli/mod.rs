//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod diff;
mod extract;

pub use diff::run_diff;
pub use extract::run_extract;

// Re-export config types used by handlers
pub use crate::config::{DiffConfig, ExtractConfig};

use crate::config::Validatable;
use crate::error::ContractError;

/// Reject a configuration that fails validation, listing every problem.
fn ensure_valid(config: &impl Validatable) -> anyhow::Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let message = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(ContractError::config(message).into())
}
