//! Contract diff engine implementation.

use super::changes::{
    ConstantChangeComputer, FunctionChangeComputer, InterfaceChangeComputer, TypeChangeComputer,
    VariableChangeComputer,
};
use super::traits::{ChangeComputer, IndexedContract};
use super::{ChangeSet, DiffOptions};
use crate::error::{ContractError, ContractSide, DiffErrorKind, Result};
use crate::model::{Contract, DocumentError, SCHEMA_VERSION};

/// Compares two contracts and classifies every difference.
pub struct DiffEngine {
    options: DiffOptions,
    computers: Vec<Box<dyn ChangeComputer>>,
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new(DiffOptions::default())
    }
}

impl DiffEngine {
    /// Create an engine with explicit options.
    pub fn new(options: DiffOptions) -> Self {
        Self {
            options,
            computers: vec![
                Box::new(InterfaceChangeComputer::new()),
                Box::new(TypeChangeComputer::new()),
                Box::new(FunctionChangeComputer::new()),
                Box::new(VariableChangeComputer::new()),
                Box::new(ConstantChangeComputer::new()),
            ],
        }
    }

    #[must_use]
    pub const fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Compare `old` against `new`.
    ///
    /// Both inputs are validated first; an invalid input is reported with
    /// the side it came from. Equal contracts short-circuit to an empty
    /// change set.
    pub fn diff(&self, old: &Contract, new: &Contract) -> Result<ChangeSet> {
        validate(old, ContractSide::Old)?;
        validate(new, ContractSide::New)?;

        if old == new {
            tracing::debug!("contracts are identical");
            return Ok(ChangeSet::new());
        }

        let old = IndexedContract::new(old);
        let new = IndexedContract::new(new);
        let mut changes = Vec::new();
        for computer in &self.computers {
            let found = computer.compute(&old, &new, &self.options);
            tracing::debug!(computer = computer.name(), changes = found.len(), "computed changes");
            changes.extend(found);
        }

        let result = ChangeSet::from_changes(changes);
        let summary = result.summary();
        tracing::info!(
            total = summary.total,
            breaking = summary.breaking,
            additions = summary.additions,
            modifications = summary.modifications,
            "diff complete"
        );
        Ok(result)
    }
}

/// Compare two contracts with the given options.
pub fn diff_contracts(old: &Contract, new: &Contract, options: DiffOptions) -> Result<ChangeSet> {
    DiffEngine::new(options).diff(old, new)
}

fn validate(contract: &Contract, side: ContractSide) -> Result<()> {
    if contract.schema_version > SCHEMA_VERSION {
        return Err(ContractError::diff(
            "validating input",
            DiffErrorKind::UnsupportedSchema {
                side,
                version: contract.schema_version,
            },
        ));
    }
    contract
        .validate()
        .map_err(|err| ContractError::diff("validating input", side_error(err, side)))
}

/// Attach the input side to a document error.
pub(crate) fn side_error(err: DocumentError, side: ContractSide) -> DiffErrorKind {
    match err {
        DocumentError::UnsupportedSchema { found } => DiffErrorKind::UnsupportedSchema {
            side,
            version: found,
        },
        DocumentError::Invalid(violations) => DiffErrorKind::InvalidContract {
            side,
            violation: violations
                .first()
                .map(ToString::to_string)
                .unwrap_or_default(),
        },
        DocumentError::Malformed(message) => DiffErrorKind::Malformed { side, message },
    }
}
