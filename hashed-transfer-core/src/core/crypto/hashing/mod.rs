//! Hashing functionality for the core
//!
//! This module handles the selectable digest algorithms (truncated SHA-512,
//! BLAKE3 and their concatenation) and the engine that times them.

pub mod hash_algorithm;
pub mod hash_engine;
pub mod hash_input;

// Re-export all public items from submodules
pub use hash_algorithm::*;
pub use hash_engine::*;
pub use hash_input::*;

use crate::shared::utils::bytes_to_hex;
use serde::{Deserialize, Serialize};

/// Hash result wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredHashResult")]
pub struct HashResult {
    pub algorithm: HashAlgorithmId,
    pub digest: Vec<u8>,
    pub elapsed_millis: f64,
    hex: String,
}

impl HashResult {
    /// Create a new hash result
    pub fn new(algorithm: HashAlgorithmId, digest: Vec<u8>, elapsed_millis: f64) -> Self {
        let hex = bytes_to_hex(&digest);
        Self { algorithm, digest, elapsed_millis: elapsed_millis.max(0.0), hex }
    }

    /// Get the digest as bytes
    pub fn bytes(&self) -> &[u8] {
        &self.digest
    }

    /// Get the digest as 0x-prefixed lowercase hex
    pub fn hex(&self) -> &str {
        &self.hex
    }
}

/// Serialized form; the hex text is always rebuilt from the digest
#[derive(Deserialize)]
struct StoredHashResult {
    algorithm: HashAlgorithmId,
    digest: Vec<u8>,
    elapsed_millis: f64,
}

impl From<StoredHashResult> for HashResult {
    fn from(stored: StoredHashResult) -> Self {
        HashResult::new(stored.algorithm, stored.digest, stored.elapsed_millis)
    }
}
