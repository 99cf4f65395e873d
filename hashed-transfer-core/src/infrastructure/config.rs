//! Environment configuration
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file. Every key is prefixed with `HASHED_TRANSFER_`; unset keys fall back to
//! local development defaults.

use crate::core::benchmark::BenchmarkConfig;
use crate::core::crypto::hashing::HashAlgorithmId;
use crate::shared::constants::{
    DEFAULT_AMOUNT_DECIMALS, DEFAULT_HISTORY_CAPACITY, DEFAULT_RECORD_DIR, DEFAULT_RPC_URL,
    DEFAULT_TRIAL_COUNT, DEFAULT_WARMUP_COUNT, MAX_AMOUNT_DECIMALS,
};
use crate::shared::error::{TransferError, TransferResult};
use crate::shared::types::Address;
use crate::shared::utils::validate_ethereum_address;
use dotenv::dotenv;
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

const ENV_PREFIX: &str = "HASHED_TRANSFER_";

/// Resolved core configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoreConfig {
    pub rpc_url: String,
    /// Hashed-transfer contract; required by the JSON-RPC gateway only
    pub contract_address: Option<Address>,
    /// Account transfers are sent from
    pub sender: Option<Address>,
    pub default_algorithm: HashAlgorithmId,
    pub amount_decimals: u8,
    pub record_dir: PathBuf,
    pub benchmark: BenchmarkConfig,
    /// Wait for a mined receipt before reporting a transfer as sent
    pub confirm_receipts: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            contract_address: None,
            sender: None,
            default_algorithm: HashAlgorithmId::Blake3Full,
            amount_decimals: DEFAULT_AMOUNT_DECIMALS,
            record_dir: PathBuf::from(DEFAULT_RECORD_DIR),
            benchmark: BenchmarkConfig::default(),
            confirm_receipts: false,
        }
    }
}

impl CoreConfig {
    /// Load configuration from `.env` (if present) and the environment
    pub fn from_env() -> TransferResult<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    /// Keys are passed with their full `HASHED_TRANSFER_` prefix.
    pub fn from_lookup<F>(lookup: F) -> TransferResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(&format!("{}{}", ENV_PREFIX, name))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let config = Self {
            rpc_url: get("RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            contract_address: get("CONTRACT_ADDRESS"),
            sender: get("SENDER"),
            default_algorithm: parse_or(get("DEFAULT_ALGORITHM"), "DEFAULT_ALGORITHM", HashAlgorithmId::Blake3Full)?,
            amount_decimals: parse_or(get("AMOUNT_DECIMALS"), "AMOUNT_DECIMALS", DEFAULT_AMOUNT_DECIMALS)?,
            record_dir: get("RECORD_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_RECORD_DIR)),
            benchmark: BenchmarkConfig {
                trial_count: parse_or(get("BENCH_TRIALS"), "BENCH_TRIALS", DEFAULT_TRIAL_COUNT)?,
                warmup_count: parse_or(get("BENCH_WARMUP"), "BENCH_WARMUP", DEFAULT_WARMUP_COUNT)?,
                history_capacity: parse_or(get("BENCH_HISTORY"), "BENCH_HISTORY", DEFAULT_HISTORY_CAPACITY)?,
            },
            confirm_receipts: parse_or(get("CONFIRM_RECEIPTS"), "CONFIRM_RECEIPTS", false)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> TransferResult<()> {
        if !self.rpc_url.starts_with("http://") && !self.rpc_url.starts_with("https://") {
            return Err(TransferError::config(format!("RPC URL must be http(s): {}", self.rpc_url)));
        }
        if let Some(contract) = &self.contract_address {
            validate_ethereum_address(contract)
                .map_err(|e| TransferError::config(format!("Contract address: {}", e)))?;
        }
        if let Some(sender) = &self.sender {
            validate_ethereum_address(sender)
                .map_err(|e| TransferError::config(format!("Sender address: {}", e)))?;
        }
        if self.amount_decimals > MAX_AMOUNT_DECIMALS {
            return Err(TransferError::config(format!(
                "Amount decimals must be at most {}",
                MAX_AMOUNT_DECIMALS
            )));
        }
        self.benchmark.validate()
    }

    /// Contract and sender, both required to submit transfers over JSON-RPC
    pub fn transfer_accounts(&self) -> TransferResult<(Address, Address)> {
        let contract = self
            .contract_address
            .clone()
            .ok_or_else(|| TransferError::config(format!("{}CONTRACT_ADDRESS is not set", ENV_PREFIX)))?;
        let sender = self
            .sender
            .clone()
            .ok_or_else(|| TransferError::config(format!("{}SENDER is not set", ENV_PREFIX)))?;
        Ok((contract, sender))
    }
}

fn parse_or<T: FromStr>(value: Option<String>, name: &str, default: T) -> TransferResult<T> {
    match value {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| {
            TransferError::config(format!("Invalid value for {}{}: {}", ENV_PREFIX, name, raw))
        }),
    }
}
