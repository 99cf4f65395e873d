use crate::shared::constants::{
    BLAKE3_OUTPUT_LEN, COMBINED_DIGEST_LEN, METHOD_TRANSFER_BLAKE3, METHOD_TRANSFER_COMBINED,
    METHOD_TRANSFER_SHA512, SHA512_TRUNCATED_LEN,
};
use crate::shared::error::TransferError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use std::fmt;
use std::str::FromStr;

/// Hash algorithms selectable for a transfer or a benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HashAlgorithmId {
    #[serde(rename = "SHA-512")]
    Sha512Truncated32,
    #[serde(rename = "BLAKE3")]
    Blake3Full,
    #[serde(rename = "SHA512+BLAKE3")]
    Combined,
}

impl HashAlgorithmId {
    pub const ALL: [HashAlgorithmId; 3] = [
        HashAlgorithmId::Sha512Truncated32,
        HashAlgorithmId::Blake3Full,
        HashAlgorithmId::Combined,
    ];

    /// Label used in records and reports
    pub fn label(&self) -> &'static str {
        match self {
            HashAlgorithmId::Sha512Truncated32 => "SHA-512",
            HashAlgorithmId::Blake3Full => "BLAKE3",
            HashAlgorithmId::Combined => "SHA512+BLAKE3",
        }
    }

    /// Contract method that accepts a digest of this kind
    pub fn contract_method(&self) -> &'static str {
        match self {
            HashAlgorithmId::Sha512Truncated32 => METHOD_TRANSFER_SHA512,
            HashAlgorithmId::Blake3Full => METHOD_TRANSFER_BLAKE3,
            HashAlgorithmId::Combined => METHOD_TRANSFER_COMBINED,
        }
    }

    pub fn digest_len(&self) -> usize {
        self.algorithm().digest_len()
    }

    /// Hash `input` with this algorithm
    pub fn compute(&self, input: &[u8]) -> Vec<u8> {
        self.algorithm().compute(input)
    }

    fn algorithm(&self) -> &'static dyn HashAlgorithm {
        match self {
            HashAlgorithmId::Sha512Truncated32 => &Sha512Truncated32,
            HashAlgorithmId::Blake3Full => &Blake3Full,
            HashAlgorithmId::Combined => &Combined,
        }
    }
}

impl fmt::Display for HashAlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HashAlgorithmId {
    type Err = TransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "sha512" | "sha512truncated32" => Ok(HashAlgorithmId::Sha512Truncated32),
            "blake3" | "blake3full" => Ok(HashAlgorithmId::Blake3Full),
            "sha512+blake3" | "combined" => Ok(HashAlgorithmId::Combined),
            _ => Err(TransferError::invalid_input(format!("Unknown hash algorithm: {}", s))),
        }
    }
}

/// Uniform contract for a digest primitive.
///
/// Implementations must be pure: the same input always yields the same bytes,
/// with no state shared between calls.
pub trait HashAlgorithm: Send + Sync {
    fn id(&self) -> HashAlgorithmId;

    fn digest_len(&self) -> usize;

    fn compute(&self, input: &[u8]) -> Vec<u8>;
}

/// First 32 bytes of SHA-512
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha512Truncated32;

impl HashAlgorithm for Sha512Truncated32 {
    fn id(&self) -> HashAlgorithmId {
        HashAlgorithmId::Sha512Truncated32
    }

    fn digest_len(&self) -> usize {
        SHA512_TRUNCATED_LEN
    }

    fn compute(&self, input: &[u8]) -> Vec<u8> {
        let mut hasher = Sha512::new();
        hasher.update(input);
        hasher.finalize()[..SHA512_TRUNCATED_LEN].to_vec()
    }
}

/// BLAKE3 with its default output length
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Full;

impl HashAlgorithm for Blake3Full {
    fn id(&self) -> HashAlgorithmId {
        HashAlgorithmId::Blake3Full
    }

    fn digest_len(&self) -> usize {
        BLAKE3_OUTPUT_LEN
    }

    fn compute(&self, input: &[u8]) -> Vec<u8> {
        blake3::hash(input).as_bytes().to_vec()
    }
}

/// Truncated SHA-512 followed by BLAKE3 (concatenation, not a hash of hashes)
#[derive(Debug, Clone, Copy, Default)]
pub struct Combined;

impl HashAlgorithm for Combined {
    fn id(&self) -> HashAlgorithmId {
        HashAlgorithmId::Combined
    }

    fn digest_len(&self) -> usize {
        COMBINED_DIGEST_LEN
    }

    fn compute(&self, input: &[u8]) -> Vec<u8> {
        let mut digest = Sha512Truncated32.compute(input);
        digest.extend_from_slice(&Blake3Full.compute(input));
        digest
    }
}
