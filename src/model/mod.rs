//! Contract model: the canonical representation of a package's API surface.
//!
//! Extractors produce these structures and the diff engine consumes them.
//! Contracts can also be persisted as canonical JSON documents (see
//! [`Contract::to_json`] and [`Contract::from_json`]) and compared later,
//! possibly by a different process or tool version.
//!
//! # Index Support
//!
//! Entities are stored as ordered vectors. For keyed access build a
//! [`ContractIndex`] once the contract is complete:
//!
//! ```ignore
//! let index = ContractIndex::build(&contract);
//! let user = index.types.get(&QualifiedName::new("app", "User")).map(|&i| &contract.types[i]);
//! ```

mod contract;
mod document;
mod identifiers;
mod index;

pub use contract::*;
pub use document::{DocumentError, Violation};
pub use identifiers::*;
pub use index::*;
