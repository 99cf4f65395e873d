//! Constants for the hashed transfer core
//!
//! This module contains all constants used throughout the core.

// Digest constants
pub const SHA512_TRUNCATED_LEN: usize = 32;
pub const BLAKE3_OUTPUT_LEN: usize = blake3::OUT_LEN;
pub const COMBINED_DIGEST_LEN: usize = SHA512_TRUNCATED_LEN + BLAKE3_OUTPUT_LEN;
pub const DIGEST_HEX_PREFIX: &str = "0x";

// Contract methods, one per hash algorithm
pub const METHOD_TRANSFER_SHA512: &str = "transferWithSHA512Hash";
pub const METHOD_TRANSFER_BLAKE3: &str = "transferWithBLAKE3Hash";
pub const METHOD_TRANSFER_COMBINED: &str = "transferWithCombinedHash";

// Benchmark constants
pub const DEFAULT_BENCH_INPUT: &str = "default test input";
pub const DEFAULT_TRIAL_COUNT: usize = 100;
pub const DEFAULT_WARMUP_COUNT: usize = 5;
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;
pub const MAX_TRIAL_COUNT: usize = 1_000_000;

// Amount constants (SUSD uses 18 decimals like ether)
pub const DEFAULT_AMOUNT_DECIMALS: u8 = 18;
pub const MAX_AMOUNT_DECIMALS: u8 = 36;

// Network defaults (local Ganache)
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:7545";
pub const RPC_TIMEOUT: u64 = 30000; // milliseconds
pub const RECEIPT_POLL_INTERVAL: u64 = 1000; // milliseconds
pub const RECEIPT_POLL_ATTEMPTS: u32 = 30;

// Storage constants
pub const DEFAULT_RECORD_DIR: &str = "transactions";

// Validation constants
pub const ADDRESS_LENGTH: usize = 42; // 0x + 40 hex chars

// Metric names
pub const METRIC_HASH_DURATION: &str = "hash_duration_ms";
pub const METRIC_SUBMISSIONS: &str = "transfer_submissions_total";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_lengths() {
        assert_eq!(SHA512_TRUNCATED_LEN, 32);
        assert_eq!(BLAKE3_OUTPUT_LEN, 32);
        assert_eq!(COMBINED_DIGEST_LEN, 64);
    }

    #[test]
    fn test_benchmark_defaults() {
        assert_eq!(DEFAULT_TRIAL_COUNT, 100);
        assert_eq!(DEFAULT_WARMUP_COUNT, 5);
        assert!(DEFAULT_HISTORY_CAPACITY > 0);
    }
}
