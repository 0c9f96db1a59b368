//! Extract command handler.
//!
//! Implements the `extract` subcommand, which writes the canonical contract
//! document of one package directory.

use super::ensure_valid;
use crate::config::ExtractConfig;
use crate::pipeline::{exit_codes, extract_contract, write_contract, OutputTarget};
use anyhow::Result;

/// Run the extract command, returning the desired exit code.
#[allow(clippy::needless_pass_by_value)]
pub fn run_extract(config: ExtractConfig) -> Result<i32> {
    ensure_valid(&config)?;

    let contract = extract_contract(&config)?;
    let target = OutputTarget::from_option(config.output_file.clone());
    write_contract(&contract, &target, config.quiet)?;

    Ok(exit_codes::SUCCESS)
}
