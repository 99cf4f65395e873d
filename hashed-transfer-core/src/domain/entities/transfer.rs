//! Transfer request and record entities

use super::Amount;
use crate::core::crypto::hashing::{HashAlgorithmId, HashInput};
use crate::domain::repositories::AddressDirectory;
use crate::shared::error::{TransferError, TransferResult};
use crate::shared::types::{Address, DigestHex, TransactionHash};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What the user asked to send. Fields are validated by the pipeline, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub recipient_address: Address,
    /// Human-readable recipient, e.g. the e-mail the address was looked up by
    pub recipient_label: Option<String>,
    /// Decimal amount as entered
    pub amount: String,
    pub payload: HashInput,
    pub algorithm: HashAlgorithmId,
}

impl TransferRequest {
    pub fn new(
        recipient_address: impl Into<Address>,
        amount: impl Into<String>,
        payload: impl Into<HashInput>,
        algorithm: HashAlgorithmId,
    ) -> Self {
        Self {
            recipient_address: recipient_address.into(),
            recipient_label: None,
            amount: amount.into(),
            payload: payload.into(),
            algorithm,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.recipient_label = Some(label.into());
        self
    }

    /// Build a request for a directory identifier, resolving it to an address
    pub fn to_identifier(
        directory: &dyn AddressDirectory,
        identifier: &str,
        amount: impl Into<String>,
        payload: impl Into<HashInput>,
        algorithm: HashAlgorithmId,
    ) -> TransferResult<Self> {
        let address = directory.address_for(identifier).ok_or_else(|| {
            TransferError::missing_input(format!("No address registered for {}", identifier))
        })?;
        Ok(Self::new(address, amount, payload, algorithm).with_label(identifier))
    }
}

/// Arguments handed to the transfer collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferCall {
    pub recipient: Address,
    pub amount: Amount,
    pub digest_hex: DigestHex,
    pub algorithm: HashAlgorithmId,
}

/// Record contents known once the transfer went through; the store stamps it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecordDraft {
    pub sender: Address,
    pub recipient: Address,
    pub recipient_label: Option<String>,
    pub amount: Amount,
    pub digest_hex: DigestHex,
    pub algorithm: HashAlgorithmId,
    pub transaction_hash: Option<TransactionHash>,
}

impl TransferRecordDraft {
    pub fn into_record(self, id: Uuid, timestamp: DateTime<Utc>) -> TransferRecord {
        TransferRecord {
            id,
            sender: self.sender,
            recipient: self.recipient,
            recipient_label: self.recipient_label,
            amount: self.amount,
            digest_hex: self.digest_hex,
            algorithm: self.algorithm,
            transaction_hash: self.transaction_hash,
            timestamp,
        }
    }
}

/// Persisted record of a completed hashed transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub id: Uuid,
    pub sender: Address,
    pub recipient: Address,
    pub recipient_label: Option<String>,
    pub amount: Amount,
    pub digest_hex: DigestHex,
    pub algorithm: HashAlgorithmId,
    pub transaction_hash: Option<TransactionHash>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::address_book::InMemoryAddressDirectory;

    const ALICE: &str = "0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6";

    #[test]
    fn test_request_for_identifier() {
        let mut directory = InMemoryAddressDirectory::new();
        directory.register("alice@example.com", ALICE).unwrap();

        let request = TransferRequest::to_identifier(
            &directory,
            "alice@example.com",
            "10",
            "100",
            HashAlgorithmId::Blake3Full,
        )
        .unwrap();

        assert_eq!(request.recipient_address, ALICE);
        assert_eq!(request.recipient_label.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn test_unknown_identifier_is_missing_input() {
        let directory = InMemoryAddressDirectory::new();
        let result = TransferRequest::to_identifier(
            &directory,
            "nobody@example.com",
            "10",
            "100",
            HashAlgorithmId::Blake3Full,
        );
        assert!(matches!(result, Err(TransferError::MissingInput(_))));
    }

    #[test]
    fn test_draft_into_record() {
        let draft = TransferRecordDraft {
            sender: "0xsender".to_string(),
            recipient: ALICE.to_string(),
            recipient_label: None,
            amount: Amount::parse("1", 18).unwrap(),
            digest_hex: "0xabcd".to_string(),
            algorithm: HashAlgorithmId::Combined,
            transaction_hash: Some("0xtx".to_string()),
        };
        let id = Uuid::new_v4();
        let now = Utc::now();
        let record = draft.clone().into_record(id, now);

        assert_eq!(record.id, id);
        assert_eq!(record.timestamp, now);
        assert_eq!(record.digest_hex, draft.digest_hex);
        assert_eq!(record.algorithm, HashAlgorithmId::Combined);
    }
}
