//! Credential hashing.
//!
//! A single unsalted SHA-256 pass, hex encoded. Existing rows depend on this
//! exact digest, so a stronger scheme needs a migration of stored hashes.

use sha2::{Digest, Sha256};

/// Length of a digest produced by [`hash_password`].
pub const DIGEST_LEN: usize = 64;

pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn verify_password(password: &str, digest: &str) -> bool {
    hash_password(password).eq_ignore_ascii_case(digest)
}
