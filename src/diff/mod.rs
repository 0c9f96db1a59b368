//! Semantic diff engine for API contracts.
//!
//! Two contracts are compared category by category, keyed by qualified
//! name. Every difference becomes a [`Change`] with exactly one
//! [`Severity`]; the combined result is sorted into a deterministic
//! [`ChangeSet`].
//!
//! # Architecture
//!
//! - [`ChangeComputer`](traits::ChangeComputer): one implementation per
//!   contract category, in the [`changes`] module
//! - [`DiffEngine`]: validates both inputs, runs every computer, sorts and
//!   deduplicates the result
//!
//! # Example
//!
//! ```ignore
//! use contract_tools::diff::{DiffEngine, DiffOptions};
//!
//! let engine = DiffEngine::new(DiffOptions::default());
//! let changes = engine.diff(&old_contract, &new_contract)?;
//! if changes.has_breaking() {
//!     println!("recommended bump: {}", changes.recommended_bump());
//! }
//! ```

pub mod changes;
mod engine;
mod options;
mod result;
pub mod traits;

pub use engine::{diff_contracts, DiffEngine};
pub(crate) use engine::side_error;
pub use options::DiffOptions;
pub use result::{Change, ChangeSet, ChangeSummary, Severity, VersionBump};
