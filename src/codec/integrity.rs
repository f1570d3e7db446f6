//! Key-store integrity hashing.
//!
//! The public record commits to the exact bytes of the key store via a
//! SHA-256 digest recorded under the `KH` tag. Any post-publication edit
//! to the key store must surface as a digest mismatch on the next load.

use std::path::Path;

use sha2::{Digest, Sha256};

/// Computes the lowercase hex SHA-256 digest of a byte buffer.
///
/// Used on the write path, where the buffer just written *is* the file
/// content and hashing it avoids a read-back race.
#[must_use]
pub fn bytes_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Computes the lowercase hex SHA-256 digest of a file's bytes.
///
/// # Errors
///
/// Propagates the underlying I/O error when the file cannot be read.
pub fn file_hash(path: &Path) -> std::io::Result<String> {
    Ok(bytes_hash(&std::fs::read(path)?))
}
