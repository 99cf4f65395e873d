//! Hash benchmarking
//!
//! Repeated, warmed-up timing of the hash algorithms over a fixed input,
//! plus a bounded history of completed runs for charting.

pub mod benchmark_runner;
pub mod benchmark_history;

pub use benchmark_runner::*;
pub use benchmark_history::*;

use crate::core::crypto::hashing::HashAlgorithmId;
use crate::shared::constants::{
    DEFAULT_HISTORY_CAPACITY, DEFAULT_TRIAL_COUNT, DEFAULT_WARMUP_COUNT, MAX_TRIAL_COUNT,
};
use crate::shared::error::TransferError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One timed trial
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSample {
    pub algorithm: HashAlgorithmId,
    pub trial_index: usize,
    pub elapsed_millis: f64,
}

/// Aggregate timings of one algorithm over one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSummary {
    pub algorithm: HashAlgorithmId,
    pub sample_count: usize,
    pub average_millis: f64,
    pub min_millis: f64,
    pub max_millis: f64,
    pub median_millis: f64,
    pub std_dev_millis: f64,
    /// Digest every warm-up and timed trial produced
    pub digest_hex: String,
    pub samples: Vec<BenchmarkSample>,
}

impl BenchmarkSummary {
    /// Build a summary from recorded samples. `samples` must not be empty.
    pub fn from_samples(
        algorithm: HashAlgorithmId,
        samples: Vec<BenchmarkSample>,
        digest_hex: String,
    ) -> Result<Self, TransferError> {
        if samples.is_empty() {
            return Err(TransferError::invalid_configuration(
                "Cannot summarize a benchmark without samples",
            ));
        }

        let count = samples.len() as f64;
        let mut timings: Vec<f64> = samples.iter().map(|s| s.elapsed_millis).collect();
        let average = timings.iter().sum::<f64>() / count;
        let variance = timings.iter().map(|t| (t - average).powi(2)).sum::<f64>() / count;

        timings.sort_by(|a, b| a.total_cmp(b));
        let mid = timings.len() / 2;
        let median = if timings.len() % 2 == 0 {
            (timings[mid - 1] + timings[mid]) / 2.0
        } else {
            timings[mid]
        };

        Ok(Self {
            algorithm,
            sample_count: samples.len(),
            average_millis: average,
            min_millis: timings[0],
            max_millis: timings[timings.len() - 1],
            median_millis: median,
            std_dev_millis: variance.sqrt(),
            digest_hex,
            samples,
        })
    }
}

/// Parameters of a benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    pub trial_count: usize,
    pub warmup_count: usize,
    /// Number of completed runs kept in the history
    pub history_capacity: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            trial_count: DEFAULT_TRIAL_COUNT,
            warmup_count: DEFAULT_WARMUP_COUNT,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl BenchmarkConfig {
    pub fn validate(&self) -> Result<(), TransferError> {
        validate_trial_count(self.trial_count)?;
        if self.history_capacity == 0 {
            return Err(TransferError::invalid_configuration(
                "History capacity must be greater than zero",
            ));
        }
        Ok(())
    }
}

pub(crate) fn validate_trial_count(trial_count: usize) -> Result<(), TransferError> {
    if trial_count == 0 {
        return Err(TransferError::invalid_configuration(
            "Trial count must be greater than zero",
        ));
    }
    if trial_count > MAX_TRIAL_COUNT {
        return Err(TransferError::invalid_configuration(format!(
            "Trial count must be at most {}",
            MAX_TRIAL_COUNT
        )));
    }
    Ok(())
}

/// A completed benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRun {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub input_len: usize,
    pub trial_count: usize,
    pub warmup_count: usize,
    /// Ordered by algorithm
    pub summaries: Vec<BenchmarkSummary>,
}

impl BenchmarkRun {
    pub fn summary(&self, algorithm: HashAlgorithmId) -> Option<&BenchmarkSummary> {
        self.summaries.iter().find(|s| s.algorithm == algorithm)
    }
}
