use super::{HashAlgorithmId, HashInput, HashResult};
use crate::shared::constants::METRIC_HASH_DURATION;
use crate::shared::TransferResult;
use std::time::Instant;

/// A hasher that reports how long each invocation took
pub trait TimedHasher {
    fn run_bytes(&self, algorithm: HashAlgorithmId, input: &[u8]) -> HashResult;
}

/// Runs one hash algorithm and measures how long the hashing call took.
///
/// The engine holds no state, so a single instance can be shared freely
/// between benchmarks and submissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashEngine;

impl HashEngine {
    pub fn new() -> Self {
        Self
    }

    /// Hash `input` with `algorithm`.
    ///
    /// Converting the input to bytes happens before the clock starts, so a
    /// malformed payload fails with `InvalidInput` without being timed.
    pub fn run(&self, algorithm: HashAlgorithmId, input: &HashInput) -> TransferResult<HashResult> {
        let bytes = input.as_bytes()?;
        Ok(self.run_bytes(algorithm, &bytes))
    }

    /// Hash raw bytes; infallible
    pub fn run_bytes(&self, algorithm: HashAlgorithmId, input: &[u8]) -> HashResult {
        let started = Instant::now();
        let digest = algorithm.compute(input);
        let elapsed_millis = started.elapsed().as_secs_f64() * 1000.0;

        metrics::histogram!(METRIC_HASH_DURATION, "algorithm" => algorithm.label()).record(elapsed_millis);
        log::debug!(
            "Hashed {} bytes with {} in {:.3} ms",
            input.len(),
            algorithm,
            elapsed_millis
        );

        HashResult::new(algorithm, digest, elapsed_millis)
    }

    /// Hash the same input once with each algorithm, in the given order
    pub fn compare(
        &self,
        algorithms: &[HashAlgorithmId],
        input: &HashInput,
    ) -> TransferResult<Vec<HashResult>> {
        let bytes = input.as_bytes()?;
        Ok(algorithms
            .iter()
            .map(|algorithm| self.run_bytes(*algorithm, &bytes))
            .collect())
    }

    /// Hash to prefixed hex string
    pub fn hash_to_hex(&self, algorithm: HashAlgorithmId, input: &HashInput) -> TransferResult<String> {
        Ok(self.run(algorithm, input)?.hex().to_string())
    }
}

impl TimedHasher for HashEngine {
    fn run_bytes(&self, algorithm: HashAlgorithmId, input: &[u8]) -> HashResult {
        HashEngine::run_bytes(self, algorithm, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::TransferError;
    use crate::shared::utils::hex_to_bytes;

    const SHA512_100: &str = "643c30f73a3017050b287794fc8c5bb9ab06b9ce38a1fc58df402a8b66ff58f6";
    const BLAKE3_100: &str = "abcfe76e6ab933c067566735afe60950b13af3bf428307ed95ae8ee0d9f912c4";

    #[test]
    fn test_run_sha512_truncated() {
        let engine = HashEngine::new();
        let result = engine.run(HashAlgorithmId::Sha512Truncated32, &"100".into()).unwrap();

        assert_eq!(result.algorithm, HashAlgorithmId::Sha512Truncated32);
        assert_eq!(result.digest.len(), 32);
        assert_eq!(result.hex(), format!("0x{}", SHA512_100));
        assert!(result.elapsed_millis >= 0.0);
    }

    #[test]
    fn test_run_blake3() {
        let engine = HashEngine::new();
        let result = engine.run(HashAlgorithmId::Blake3Full, &"100".into()).unwrap();

        assert_eq!(result.hex(), format!("0x{}", BLAKE3_100));
    }

    #[test]
    fn test_run_combined() {
        let engine = HashEngine::new();
        let sha = engine.run(HashAlgorithmId::Sha512Truncated32, &"100".into()).unwrap();
        let blake = engine.run(HashAlgorithmId::Blake3Full, &"100".into()).unwrap();
        let combined = engine.run(HashAlgorithmId::Combined, &"100".into()).unwrap();

        let body = combined.hex().trim_start_matches("0x");
        assert_eq!(body.len(), 128);
        assert_eq!(&body[..64], sha.hex().trim_start_matches("0x"));
        assert_eq!(&body[64..], blake.hex().trim_start_matches("0x"));
    }

    #[test]
    fn test_hex_round_trip() {
        let engine = HashEngine::new();
        for algorithm in HashAlgorithmId::ALL {
            let result = engine.run(algorithm, &"round trip".into()).unwrap();
            assert_eq!(hex_to_bytes(result.hex()).unwrap(), result.digest);
            assert_eq!(result.hex(), result.hex().to_lowercase());
        }
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let engine = HashEngine::new();
        let err = engine
            .run(HashAlgorithmId::Blake3Full, &HashInput::Hex("0x123".to_string()))
            .unwrap_err();
        assert!(matches!(err, TransferError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_input() {
        let engine = HashEngine::new();
        let result = engine.run_bytes(HashAlgorithmId::Blake3Full, b"");
        assert_eq!(
            result.hex(),
            "0xaf1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }

    #[test]
    fn test_compare_runs_each_algorithm() {
        let engine = HashEngine::new();
        let results = engine
            .compare(&[HashAlgorithmId::Sha512Truncated32, HashAlgorithmId::Blake3Full], &"100".into())
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].algorithm, HashAlgorithmId::Sha512Truncated32);
        assert_eq!(results[1].algorithm, HashAlgorithmId::Blake3Full);
    }
}
