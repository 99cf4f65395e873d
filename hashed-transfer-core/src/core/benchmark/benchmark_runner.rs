use super::{validate_trial_count, BenchmarkConfig, BenchmarkRun, BenchmarkSample, BenchmarkSummary};
use crate::core::crypto::hashing::{HashAlgorithmId, HashEngine, HashInput, TimedHasher};
use crate::shared::error::{TransferError, TransferResult};
use crate::shared::utils::bytes_to_hex;
use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Benchmark runner
pub struct BenchmarkRunner<H: TimedHasher = HashEngine> {
    hasher: H,
}

impl BenchmarkRunner<HashEngine> {
    pub fn new() -> Self {
        Self { hasher: HashEngine::new() }
    }
}

impl Default for BenchmarkRunner<HashEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: TimedHasher> BenchmarkRunner<H> {
    pub fn with_hasher(hasher: H) -> Self {
        Self { hasher }
    }

    /// Time every algorithm in `algorithms` over `input`.
    ///
    /// Each algorithm gets `warmup_count` untimed runs, then exactly
    /// `trial_count` timed runs. Parameters are validated before anything is
    /// hashed.
    pub fn benchmark(
        &self,
        algorithms: &[HashAlgorithmId],
        input: &HashInput,
        trial_count: usize,
        warmup_count: usize,
    ) -> TransferResult<BTreeMap<HashAlgorithmId, BenchmarkSummary>> {
        validate_trial_count(trial_count)?;
        let algorithms: BTreeSet<HashAlgorithmId> = algorithms.iter().copied().collect();
        if algorithms.is_empty() {
            return Err(TransferError::invalid_configuration(
                "At least one algorithm must be benchmarked",
            ));
        }
        let bytes = input.as_bytes()?;

        let mut summaries = BTreeMap::new();
        for algorithm in algorithms {
            let summary = self.benchmark_one(algorithm, &bytes, trial_count, warmup_count)?;
            log::info!(
                "Benchmarked {}: {} trials, average {:.4} ms",
                algorithm,
                summary.sample_count,
                summary.average_millis
            );
            summaries.insert(algorithm, summary);
        }
        Ok(summaries)
    }

    /// Run a benchmark with `config` and wrap it as a history entry
    pub fn run(
        &self,
        config: &BenchmarkConfig,
        algorithms: &[HashAlgorithmId],
        input: &HashInput,
    ) -> TransferResult<BenchmarkRun> {
        config.validate()?;
        let started_at = Utc::now();
        let summaries = self.benchmark(algorithms, input, config.trial_count, config.warmup_count)?;

        Ok(BenchmarkRun {
            run_id: Uuid::new_v4(),
            started_at,
            input_len: input.as_bytes()?.len(),
            trial_count: config.trial_count,
            warmup_count: config.warmup_count,
            summaries: summaries.into_values().collect(),
        })
    }

    fn benchmark_one(
        &self,
        algorithm: HashAlgorithmId,
        input: &[u8],
        trial_count: usize,
        warmup_count: usize,
    ) -> TransferResult<BenchmarkSummary> {
        let mut reference: Option<Vec<u8>> = None;

        for _ in 0..warmup_count {
            let result = self.hasher.run_bytes(algorithm, input);
            check_digest(algorithm, &mut reference, result.digest)?;
        }

        let mut samples = Vec::with_capacity(trial_count);
        for trial_index in 0..trial_count {
            let result = self.hasher.run_bytes(algorithm, input);
            samples.push(BenchmarkSample {
                algorithm,
                trial_index,
                elapsed_millis: result.elapsed_millis,
            });
            check_digest(algorithm, &mut reference, result.digest)?;
        }

        let digest_hex = bytes_to_hex(reference.as_deref().unwrap_or_default());
        BenchmarkSummary::from_samples(algorithm, samples, digest_hex)
    }
}

/// Every trial of one algorithm over one input must yield the same digest
fn check_digest(
    algorithm: HashAlgorithmId,
    reference: &mut Option<Vec<u8>>,
    digest: Vec<u8>,
) -> TransferResult<()> {
    if let Some(expected) = reference.as_ref() {
        if *expected != digest {
            return Err(TransferError::non_deterministic(format!(
                "{} produced {} after {}",
                algorithm,
                bytes_to_hex(&digest),
                bytes_to_hex(expected)
            )));
        }
        return Ok(());
    }
    *reference = Some(digest);
    Ok(())
}
