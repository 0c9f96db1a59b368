//! Shared utilities.

mod hash;
mod text;

pub use hash::content_hash;
pub use text::normalize_whitespace;
