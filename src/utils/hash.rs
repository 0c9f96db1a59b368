//! Content hashing.

use xxhash_rust::xxh3::xxh3_64;

/// Hash of a canonical byte encoding, used to short-circuit equal contracts.
#[must_use]
pub fn content_hash(data: &[u8]) -> u64 {
    xxh3_64(data)
}
