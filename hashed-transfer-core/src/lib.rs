//! Hashed Transfer Core
//!
//! Hash computation, hash benchmarking and hashed stablecoin transfer
//! submission.
//!
//! ## Architecture
//!
//! - **Core**: hash algorithms and the timed hash engine, the benchmark
//!   runner and history, the transfer submission pipeline
//! - **Domain**: transfer entities and the collaborator traits
//! - **Infrastructure**: configuration, JSON-RPC gateway, JSON file store
//! - **Shared**: common types, constants, errors and utilities
//!
//! ## Usage
//!
//! ```rust
//! use hashed_transfer_core::{HashAlgorithmId, HashEngine, HashInput};
//!
//! let engine = HashEngine::new();
//! let result = engine.run(HashAlgorithmId::Blake3Full, &HashInput::from("100")).unwrap();
//! assert_eq!(
//!     result.hex(),
//!     "0xabcfe76e6ab933c067566735afe60950b13af3bf428307ed95ae8ee0d9f912c4"
//! );
//! ```

pub mod core;
pub mod domain;
pub mod shared;
pub mod infrastructure;

use crate::core::benchmark::{BenchmarkHistory, BenchmarkRun, BenchmarkRunner};
use crate::core::transactions::TransferSubmissionPipeline;
use crate::infrastructure::{CoreConfig, JsonFileTransferStore, JsonRpcTransferGateway};
use shared::error::{TransferError, TransferResult};

// Re-export specific components
pub use crate::core::crypto::hashing::{HashAlgorithmId, HashEngine, HashInput, HashResult};
pub use crate::core::benchmark::{BenchmarkConfig, BenchmarkSummary};
pub use crate::core::transactions::SubmissionState;

// Re-export domain entities
pub use crate::domain::{Amount, TransferRecord, TransferRequest};

// Re-export shared types
pub use shared::error::{SubmissionStage, TransferReceipt};

// Initialize logging
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    // Hosts may have installed their own logger already
    if env_logger::try_init().is_err() {
        log::debug!("Logger already initialized");
    }
    Ok(())
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

// Feature flags
#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export FFI functions when feature is enabled
#[cfg(feature = "ffi")]
pub use ffi::*;

/// Initialize the core with configuration from .env or safe defaults
pub async fn init_hashed_transfer_core() -> Result<HashedTransferCore, TransferError> {
    let config = CoreConfig::from_env()?;
    log::info!("Initializing {} {}", NAME, VERSION);
    HashedTransferCore::new(config)
}

/// Main struct that provides access to hashing, benchmarking and submission
pub struct HashedTransferCore {
    config: CoreConfig,
    engine: HashEngine,
    runner: BenchmarkRunner,
    history: BenchmarkHistory,
}

impl HashedTransferCore {
    pub fn new(config: CoreConfig) -> TransferResult<Self> {
        config.validate()?;
        let history = BenchmarkHistory::new(config.benchmark.history_capacity)?;
        Ok(Self {
            config,
            engine: HashEngine::new(),
            runner: BenchmarkRunner::new(),
            history,
        })
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Hash `input` with `algorithm`, timing the hashing call
    pub fn hash(&self, algorithm: HashAlgorithmId, input: &HashInput) -> TransferResult<HashResult> {
        self.engine.run(algorithm, input)
    }

    /// Hash `input` with the configured default algorithm
    pub fn hash_default(&self, input: &HashInput) -> TransferResult<HashResult> {
        self.hash(self.config.default_algorithm, input)
    }

    /// Hash `input` once with each algorithm
    pub fn compare(&self, algorithms: &[HashAlgorithmId], input: &HashInput) -> TransferResult<Vec<HashResult>> {
        self.engine.compare(algorithms, input)
    }

    /// Benchmark `algorithms` with the configured trial counts and record the run
    pub fn run_benchmark(
        &mut self,
        algorithms: &[HashAlgorithmId],
        input: &HashInput,
    ) -> TransferResult<&BenchmarkRun> {
        let run = self.runner.run(&self.config.benchmark, algorithms, input)?;
        self.history.record(run);
        self.history
            .latest()
            .ok_or_else(|| TransferError::internal("Benchmark run missing from history"))
    }

    pub fn history(&self) -> &BenchmarkHistory {
        &self.history
    }

    /// Record store rooted at the configured record directory
    pub fn record_store(&self) -> TransferResult<JsonFileTransferStore> {
        JsonFileTransferStore::new(&self.config.record_dir)
    }

    /// Pipeline submitting over JSON-RPC and recording to JSON files
    pub fn submission_pipeline(
        &self,
    ) -> TransferResult<TransferSubmissionPipeline<JsonRpcTransferGateway, JsonFileTransferStore>> {
        let gateway = JsonRpcTransferGateway::from_config(&self.config)?;
        let sender = gateway.sender().to_string();
        let store = self.record_store()?;
        Ok(TransferSubmissionPipeline::new(gateway, store, sender)
            .with_amount_decimals(self.config.amount_decimals))
    }
}

impl Drop for HashedTransferCore {
    fn drop(&mut self) {
        log::info!("HashedTransferCore dropped after {} benchmark runs", self.history.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> CoreConfig {
        let mut config = CoreConfig::default();
        config.benchmark.trial_count = 5;
        config.benchmark.warmup_count = 1;
        config.benchmark.history_capacity = 2;
        config
    }

    #[tokio::test]
    async fn test_core_initialization() {
        let core = init_hashed_transfer_core().await;
        assert!(core.is_ok());
    }

    #[test]
    fn test_initialized_core_is_ready_to_hash() {
        let core = tokio_test::block_on(init_hashed_transfer_core()).unwrap();
        assert!(core.history().is_empty());

        let result = core.hash_default(&"100".into()).unwrap();
        assert_eq!(result.algorithm, core.config().default_algorithm);
    }

    #[test]
    fn test_version_info() {
        assert_eq!(NAME, "hashed-transfer-core");
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_init_is_idempotent() {
        assert!(init().is_ok());
        assert!(init().is_ok());
    }

    #[test]
    fn test_hash_default_uses_config() {
        let mut config = test_config();
        config.default_algorithm = HashAlgorithmId::Combined;
        let core = HashedTransferCore::new(config).unwrap();

        let result = core.hash_default(&"100".into()).unwrap();
        assert_eq!(result.algorithm, HashAlgorithmId::Combined);
        assert_eq!(result.bytes().len(), 64);
    }

    #[test]
    fn test_benchmark_runs_are_kept_in_bounded_history() {
        let mut core = HashedTransferCore::new(test_config()).unwrap();
        for _ in 0..3 {
            let run = core
                .run_benchmark(&[HashAlgorithmId::Sha512Truncated32, HashAlgorithmId::Blake3Full], &"x".into())
                .unwrap();
            assert_eq!(run.summaries.len(), 2);
        }
        assert_eq!(core.history().len(), 2);
        assert_eq!(core.history().series(HashAlgorithmId::Blake3Full).len(), 2);
    }

    #[test]
    fn test_pipeline_requires_accounts() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config();
        config.record_dir = dir.path().to_path_buf();
        let core = HashedTransferCore::new(config.clone()).unwrap();
        assert!(matches!(core.submission_pipeline(), Err(TransferError::Config(_))));

        config.contract_address = Some("0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string());
        config.sender = Some("0x1111111111111111111111111111111111111111".to_string());
        let core = HashedTransferCore::new(config).unwrap();
        let pipeline = core.submission_pipeline().unwrap();
        assert_eq!(*pipeline.state(), SubmissionState::Idle);
        assert_eq!(pipeline.sender(), "0x1111111111111111111111111111111111111111");
    }
}
