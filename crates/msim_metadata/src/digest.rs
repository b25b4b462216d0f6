//! Content-digest discipline.
//!
//! Each type, parameter, table, and the whole model receives a SHA-256
//! digest computed over its metadata-visible fields only, serialized through
//! a canonical JSON encoding so the digest is stable across symbol
//! allocation order, source-file order, or any internal field not exposed
//! in metadata rows.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of `value`'s canonical JSON form.
pub fn digest_hex<T: Serialize>(value: &T) -> String {
    let canonical = serde_json::to_string(value).expect("metadata rows always serialize");
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Combines several already-computed digests into one, for the whole-model
/// digest built from its constituent types/parameters/tables digests.
pub fn combine(digests: &[String]) -> String {
    let mut hasher = Sha256::new();
    for d in digests {
        hasher.update(d.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}
