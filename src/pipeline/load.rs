//! Contract loading stage.
//!
//! A compared contract comes either from live extraction of a package
//! directory or from a previously written contract document. Both paths
//! yield the same [`Contract`] value, so the differ never knows which one
//! it was handed.

use super::{write_output, OutputTarget, PipelineError};
use crate::config::ExtractConfig;
use crate::diff::side_error;
use crate::error::{ContractError, ContractSide, ExtractErrorKind};
use crate::extract::{ExtractOptions, Extractor};
use crate::model::Contract;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Where a loaded contract came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractSource {
    /// Extracted from a package directory
    Directory(PathBuf),
    /// Decoded from a contract document
    Document(PathBuf),
}

impl ContractSource {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(path) | Self::Document(path) => path,
        }
    }
}

/// A contract together with its origin
#[derive(Debug, Clone)]
pub struct LoadedContract {
    pub contract: Contract,
    pub source: ContractSource,
}

/// Load one side of a comparison.
///
/// Directories are extracted with `options`; files are decoded as contract
/// documents and validated. Failures name the side they came from.
pub fn load_contract(
    path: &Path,
    side: ContractSide,
    options: &ExtractOptions,
    quiet: bool,
) -> Result<LoadedContract> {
    load(path, side, options, quiet).map_err(|source| {
        PipelineError::LoadFailed {
            side,
            path: path.display().to_string(),
            source,
        }
        .into()
    })
}

fn load(
    path: &Path,
    side: ContractSide,
    options: &ExtractOptions,
    quiet: bool,
) -> Result<LoadedContract> {
    if path.is_dir() {
        if !quiet {
            tracing::info!("Extracting {side} contract from {}", path.display());
        }
        let contract = Extractor::new(*options).extract(path)?;
        return Ok(LoadedContract {
            contract,
            source: ContractSource::Directory(path.to_path_buf()),
        });
    }

    if !path.exists() {
        return Err(ContractError::extraction(
            format!("resolving {side} input"),
            ExtractErrorKind::PackageNotFound(path.to_path_buf()),
        )
        .into());
    }

    if !quiet {
        tracing::info!("Reading {side} contract document {}", path.display());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read contract document: {}", path.display()))?;
    let contract = Contract::from_json(&content).map_err(|err| {
        ContractError::diff(
            format!("decoding {}", path.display()),
            side_error(err, side),
        )
    })?;
    tracing::debug!(
        package = %contract.package,
        symbols = contract.symbol_count(),
        "decoded contract document"
    );

    Ok(LoadedContract {
        contract,
        source: ContractSource::Document(path.to_path_buf()),
    })
}

/// Run the extract command's core: extract the configured package.
pub fn extract_contract(config: &ExtractConfig) -> Result<Contract> {
    if !config.quiet {
        tracing::info!("Extracting contract from {}", config.package.display());
    }
    let contract = Extractor::new(config.extraction)
        .extract(&config.package)
        .with_context(|| format!("Failed to extract {}", config.package.display()))?;
    if !config.quiet {
        tracing::info!(
            "Extracted {} symbols from package {}",
            contract.symbol_count(),
            contract.package
        );
    }
    Ok(contract)
}

/// Write a contract as its canonical JSON document.
pub fn write_contract(contract: &Contract, target: &OutputTarget, quiet: bool) -> Result<()> {
    let json = contract
        .to_json()
        .context("Failed to encode contract document")?;
    write_output(&json, target, quiet)
}
