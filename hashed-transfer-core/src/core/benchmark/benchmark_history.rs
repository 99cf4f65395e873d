use super::BenchmarkRun;
use crate::core::crypto::hashing::HashAlgorithmId;
use crate::shared::error::{TransferError, TransferResult};
use std::collections::VecDeque;

/// Completed benchmark runs, oldest first.
///
/// Runs are appended, never merged. Once `capacity` runs are held, recording
/// a new one evicts the oldest.
#[derive(Debug, Clone)]
pub struct BenchmarkHistory {
    capacity: usize,
    runs: VecDeque<BenchmarkRun>,
}

impl BenchmarkHistory {
    pub fn new(capacity: usize) -> TransferResult<Self> {
        if capacity == 0 {
            return Err(TransferError::invalid_configuration(
                "History capacity must be greater than zero",
            ));
        }
        Ok(Self { capacity, runs: VecDeque::with_capacity(capacity) })
    }

    /// Append a run, returning the evicted run if the history was full
    pub fn record(&mut self, run: BenchmarkRun) -> Option<BenchmarkRun> {
        let evicted = if self.runs.len() == self.capacity {
            self.runs.pop_front()
        } else {
            None
        };
        if let Some(old) = &evicted {
            log::debug!("Benchmark history full, evicting run {}", old.run_id);
        }
        self.runs.push_back(run);
        evicted
    }

    pub fn runs(&self) -> impl Iterator<Item = &BenchmarkRun> {
        self.runs.iter()
    }

    pub fn latest(&self) -> Option<&BenchmarkRun> {
        self.runs.back()
    }

    /// Average latency of `algorithm` in each retained run, oldest first.
    /// Runs that did not include the algorithm are skipped.
    pub fn series(&self, algorithm: HashAlgorithmId) -> Vec<f64> {
        self.runs
            .iter()
            .filter_map(|run| run.summary(algorithm))
            .map(|summary| summary.average_millis)
            .collect()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn clear(&mut self) {
        self.runs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::benchmark::{BenchmarkConfig, BenchmarkRunner};

    fn run_once(algorithms: &[HashAlgorithmId]) -> BenchmarkRun {
        let config = BenchmarkConfig { trial_count: 3, warmup_count: 0, history_capacity: 2 };
        BenchmarkRunner::new()
            .run(&config, algorithms, &"history".into())
            .unwrap()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            BenchmarkHistory::new(0),
            Err(TransferError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_runs_are_appended() {
        let mut history = BenchmarkHistory::new(5).unwrap();
        let first = run_once(&[HashAlgorithmId::Blake3Full]);
        let second = run_once(&[HashAlgorithmId::Blake3Full]);
        let second_id = second.run_id;

        assert!(history.record(first).is_none());
        assert!(history.record(second).is_none());

        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().run_id, second_id);
        assert_eq!(history.series(HashAlgorithmId::Blake3Full).len(), 2);
    }

    #[test]
    fn test_oldest_run_is_evicted() {
        let mut history = BenchmarkHistory::new(2).unwrap();
        let runs: Vec<BenchmarkRun> = (0..3).map(|_| run_once(&[HashAlgorithmId::Combined])).collect();
        let ids: Vec<_> = runs.iter().map(|r| r.run_id).collect();

        let mut evicted = Vec::new();
        for run in runs {
            if let Some(old) = history.record(run) {
                evicted.push(old.run_id);
            }
        }

        assert_eq!(history.len(), 2);
        assert_eq!(evicted, vec![ids[0]]);
        let kept: Vec<_> = history.runs().map(|r| r.run_id).collect();
        assert_eq!(kept, vec![ids[1], ids[2]]);
    }

    #[test]
    fn test_series_skips_missing_algorithms() {
        let mut history = BenchmarkHistory::new(3).unwrap();
        history.record(run_once(&[HashAlgorithmId::Blake3Full]));
        history.record(run_once(&[HashAlgorithmId::Sha512Truncated32]));

        assert_eq!(history.series(HashAlgorithmId::Blake3Full).len(), 1);
        assert_eq!(history.series(HashAlgorithmId::Combined).len(), 0);

        history.clear();
        assert!(history.is_empty());
    }
}
