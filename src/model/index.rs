//! Lookup index over a built contract.
//!
//! Entities stay in the contract's ordered vectors; the index only maps
//! qualified names to positions in those vectors. It is built once after the
//! contract is fully populated and is never used to drive output order.
//!
//! ```ignore
//! let index = ContractIndex::build(&contract);
//! if let Some(&i) = index.interfaces.get(&qualified_name) {
//!     let iface = &contract.interfaces[i];
//!     println!("{} has {} methods", iface.name, iface.methods.len());
//! }
//! ```

use super::{Contract, Declared, QualifiedName};
use std::collections::HashMap;

/// Position lookup for one category.
pub type PositionMap = HashMap<QualifiedName, usize>;

/// Precomputed name → position maps for every contract category.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ContractIndex {
    pub interfaces: PositionMap,
    pub types: PositionMap,
    pub functions: PositionMap,
    pub variables: PositionMap,
    pub constants: PositionMap,
}

impl ContractIndex {
    /// Build the index. O(n) in the number of top-level symbols.
    pub fn build(contract: &Contract) -> Self {
        Self {
            interfaces: positions(&contract.interfaces),
            types: positions(&contract.types),
            functions: positions(&contract.functions),
            variables: positions(&contract.variables),
            constants: positions(&contract.constants),
        }
    }
}

/// Map each item's qualified name to its position. Later duplicates do not
/// replace earlier entries.
#[must_use]
pub fn positions<T: Declared>(items: &[T]) -> PositionMap {
    let mut map = HashMap::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        map.entry(item.qualified_name()).or_insert(idx);
    }
    map
}

/// Map member names (methods, fields) to their positions.
#[must_use]
pub fn member_positions<'a, T>(
    items: &'a [T],
    name: impl Fn(&T) -> &str,
) -> HashMap<&'a str, usize> {
    let mut map = HashMap::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        map.entry(name(item)).or_insert(idx);
    }
    map
}
