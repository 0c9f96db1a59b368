//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing two contracts.

use super::ensure_valid;
use crate::config::DiffConfig;
use crate::diff::ChangeSet;
use crate::error::ContractSide;
use crate::pipeline::{compute_diff, exit_codes, load_contract, output_report};
use anyhow::Result;

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    ensure_valid(&config)?;
    let quiet = config.behavior.quiet;

    let old = load_contract(&config.paths.old, ContractSide::Old, &config.extraction, quiet)?;
    let new = load_contract(&config.paths.new, ContractSide::New, &config.extraction, quiet)?;

    if !quiet {
        tracing::info!(
            "Loaded {} symbols from old contract, {} from new contract",
            old.contract.symbol_count(),
            new.contract.symbol_count()
        );
    }

    let changes = compute_diff(&config, &old.contract, &new.contract)?;
    let exit_code = determine_exit_code(&config, &changes);

    output_report(&config, &changes, &old.contract, &new.contract)?;

    Ok(exit_code)
}

/// Determine the appropriate exit code based on diff results and config flags.
fn determine_exit_code(config: &DiffConfig, changes: &ChangeSet) -> i32 {
    if config.behavior.fail_on_breaking && changes.has_breaking() {
        return exit_codes::BREAKING_CHANGES;
    }
    if config.behavior.fail_on_change && !changes.is_empty() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}
