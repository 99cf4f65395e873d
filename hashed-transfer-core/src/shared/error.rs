//! Error handling for the hashed transfer core
//!
//! This module defines the error types used throughout the core. Every
//! submission failure names the stage it happened in, so callers can tell
//! "nothing happened" apart from "the transfer happened but bookkeeping failed".

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stage of a transfer submission at which a failure occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStage {
    Validation,
    Hashing,
    Submitting,
    Persisting,
}

impl fmt::Display for SubmissionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmissionStage::Validation => "validation",
            SubmissionStage::Hashing => "hashing",
            SubmissionStage::Submitting => "submitting",
            SubmissionStage::Persisting => "persisting",
        };
        f.write_str(name)
    }
}

/// Receipt handed back by the transfer collaborator after a successful call
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransferReceipt {
    /// On-chain transaction hash, when the collaborator reports one
    pub transaction_hash: Option<String>,
}

impl TransferReceipt {
    pub fn new(transaction_hash: impl Into<String>) -> Self {
        Self { transaction_hash: Some(transaction_hash.into()) }
    }
}

/// Failure reported by an external collaborator (transfer call or storage write)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct CollaboratorError(pub String);

impl CollaboratorError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    pub fn reason(&self) -> &str {
        &self.0
    }
}

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransferError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error("Transfer rejected: {reason}")]
    TransferRejected { reason: String },

    /// The transfer went through but the record could not be written
    #[error("Transfer sent but record not persisted: {reason}")]
    PersistenceError { receipt: TransferReceipt, reason: String },

    #[error("Non-deterministic digest: {0}")]
    NonDeterministicDigest(String),

    #[error("Outcome of a previous submission is unknown: {0}")]
    OutcomeUnknown(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TransferError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Create a missing input error
    pub fn missing_input(message: impl Into<String>) -> Self {
        Self::MissingInput(message.into())
    }

    /// Create a hashing error
    pub fn hashing(message: impl Into<String>) -> Self {
        Self::HashingError(message.into())
    }

    /// Create a transfer rejected error
    pub fn transfer_rejected(reason: impl Into<String>) -> Self {
        Self::TransferRejected { reason: reason.into() }
    }

    /// Create a persistence error for a transfer that already went through
    pub fn persistence(receipt: TransferReceipt, reason: impl Into<String>) -> Self {
        Self::PersistenceError { receipt, reason: reason.into() }
    }

    pub fn non_deterministic(message: impl Into<String>) -> Self {
        Self::NonDeterministicDigest(message.into())
    }

    pub fn outcome_unknown(message: impl Into<String>) -> Self {
        Self::OutcomeUnknown(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Submission stage this error belongs to, if it is a submission failure
    pub fn stage(&self) -> Option<SubmissionStage> {
        match self {
            Self::MissingInput(_) | Self::OutcomeUnknown(_) => Some(SubmissionStage::Validation),
            Self::HashingError(_) => Some(SubmissionStage::Hashing),
            Self::TransferRejected { .. } => Some(SubmissionStage::Submitting),
            Self::PersistenceError { .. } => Some(SubmissionStage::Persisting),
            _ => None,
        }
    }

    /// Whether the on-chain transfer is known to have been sent
    pub fn transfer_was_sent(&self) -> bool {
        matches!(self, Self::PersistenceError { .. })
    }
}

/// Result alias used across the core
pub type TransferResult<T> = Result<T, TransferError>;

// Standard library error conversions
impl From<std::io::Error> for TransferError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(format!("IO error: {}", err))
    }
}

impl From<hex::FromHexError> for TransferError {
    fn from(err: hex::FromHexError) -> Self {
        Self::invalid_input(format!("Hex decoding error: {}", err))
    }
}

impl From<serde_json::Error> for TransferError {
    fn from(err: serde_json::Error) -> Self {
        Self::storage(format!("JSON error: {}", err))
    }
}

impl From<reqwest::Error> for TransferError {
    fn from(err: reqwest::Error) -> Self {
        Self::network(format!("HTTP error: {}", err))
    }
}
