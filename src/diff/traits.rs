//! Trait definitions for per-category change computation.

use super::{Change, DiffOptions};
use crate::model::{Contract, ContractIndex};

/// A contract together with its lookup index, built once per comparison.
#[derive(Debug)]
pub struct IndexedContract<'a> {
    pub contract: &'a Contract,
    pub index: ContractIndex,
}

impl<'a> IndexedContract<'a> {
    pub fn new(contract: &'a Contract) -> Self {
        Self {
            contract,
            index: ContractIndex::build(contract),
        }
    }
}

/// Computes the changes of one contract category.
///
/// Output order is irrelevant: the engine sorts the combined result.
pub trait ChangeComputer: Send + Sync {
    fn compute(
        &self,
        old: &IndexedContract<'_>,
        new: &IndexedContract<'_>,
        options: &DiffOptions,
    ) -> Vec<Change>;

    /// Name of this computer for logging.
    fn name(&self) -> &'static str;
}
