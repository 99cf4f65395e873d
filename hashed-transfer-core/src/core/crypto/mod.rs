//! Cryptographic functionality for the hashed transfer core
//!
//! This module provides the digest primitives and the timed hashing engine.

pub mod hashing;

// Re-export all public items from submodules
pub use hashing::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_engine() {
        let engine = HashEngine::new();
        let result = engine.run_bytes(HashAlgorithmId::Combined, b"abc");
        assert_eq!(result.bytes().len(), HashAlgorithmId::Combined.digest_len());
    }
}
