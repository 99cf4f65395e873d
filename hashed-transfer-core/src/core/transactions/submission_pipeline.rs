use super::SubmissionState;
use crate::core::crypto::hashing::HashEngine;
use crate::domain::entities::{Amount, TransferCall, TransferRecord, TransferRecordDraft, TransferRequest};
use crate::domain::repositories::{TransferGateway, TransferRecordStore};
use crate::shared::constants::{DEFAULT_AMOUNT_DECIMALS, METRIC_SUBMISSIONS};
use crate::shared::error::{TransferError, TransferResult};
use crate::shared::types::Address;

/// Hashes a transfer payload, submits the transfer and records it.
///
/// The gateway and the store are injected; the pipeline owns no global state.
/// `submit` takes `&mut self`, so one pipeline runs one submission at a time.
pub struct TransferSubmissionPipeline<G, S> {
    gateway: G,
    store: S,
    engine: HashEngine,
    sender: Address,
    amount_decimals: u8,
    state: SubmissionState,
}

impl<G: TransferGateway, S: TransferRecordStore> TransferSubmissionPipeline<G, S> {
    pub fn new(gateway: G, store: S, sender: impl Into<Address>) -> Self {
        Self {
            gateway,
            store,
            engine: HashEngine::new(),
            sender: sender.into(),
            amount_decimals: DEFAULT_AMOUNT_DECIMALS,
            state: SubmissionState::Idle,
        }
    }

    pub fn with_amount_decimals(mut self, decimals: u8) -> Self {
        self.amount_decimals = decimals;
        self
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Clear a submission whose collaborator call never resolved.
    ///
    /// Call this only after reconciling with the gateway or store. Returns the
    /// state that was cleared, or `None` if nothing was pending.
    pub fn acknowledge_unknown_outcome(&mut self) -> Option<SubmissionState> {
        if !self.state.is_awaiting_collaborator() {
            return None;
        }
        log::warn!("Clearing unresolved {} submission", self.state);
        Some(std::mem::take(&mut self.state))
    }

    /// Run one submission to completion.
    ///
    /// The transfer call is made exactly once; the record is written at most
    /// once and only after the transfer succeeded. Nothing is retried.
    pub async fn submit(&mut self, request: &TransferRequest) -> TransferResult<TransferRecord> {
        if self.state.is_awaiting_collaborator() {
            // A dropped submit left a collaborator call unresolved
            return Err(TransferError::outcome_unknown(format!(
                "previous submission stopped while {}",
                self.state
            )));
        }
        self.transition(SubmissionState::Idle);

        let amount = match self.validate(request) {
            Ok(amount) => amount,
            Err(err) => return self.fail(err),
        };

        self.transition(SubmissionState::Hashing);
        let hash = match self.engine.run(request.algorithm, &request.payload) {
            Ok(hash) => hash,
            Err(err) => return self.fail(TransferError::hashing(err.to_string())),
        };
        log::info!(
            "Hashed transfer payload with {} in {:.3} ms: {}",
            hash.algorithm,
            hash.elapsed_millis,
            hash.hex()
        );

        let call = TransferCall {
            recipient: request.recipient_address.trim().to_string(),
            amount,
            digest_hex: hash.hex().to_string(),
            algorithm: request.algorithm,
        };

        self.transition(SubmissionState::Submitting);
        let receipt = match self.gateway.transfer(&call).await {
            Ok(receipt) => receipt,
            Err(err) => return self.fail(TransferError::transfer_rejected(err.reason())),
        };

        self.transition(SubmissionState::Persisting);
        let draft = TransferRecordDraft {
            sender: self.sender.clone(),
            recipient: call.recipient,
            recipient_label: request.recipient_label.clone(),
            amount: call.amount,
            digest_hex: call.digest_hex,
            algorithm: call.algorithm,
            transaction_hash: receipt.transaction_hash.clone(),
        };
        match self.store.persist(&draft).await {
            Ok(record) => {
                log::info!("Transfer {} recorded", record.id);
                metrics::counter!(METRIC_SUBMISSIONS, "outcome" => "completed").increment(1);
                self.transition(SubmissionState::Completed(record.clone()));
                Ok(record)
            }
            Err(err) => {
                log::error!(
                    "Transfer sent ({:?}) but record was not written: {}",
                    receipt.transaction_hash,
                    err
                );
                self.fail(TransferError::persistence(receipt, err.reason()))
            }
        }
    }

    fn validate(&self, request: &TransferRequest) -> TransferResult<Amount> {
        if request.recipient_address.trim().is_empty() {
            return Err(TransferError::missing_input("Recipient address is required"));
        }
        if request.amount.trim().is_empty() {
            return Err(TransferError::missing_input("Amount is required"));
        }
        if request.payload.is_empty() {
            return Err(TransferError::missing_input("Payload to hash is required"));
        }
        Amount::parse(&request.amount, self.amount_decimals)
    }

    fn transition(&mut self, next: SubmissionState) {
        log::debug!("Submission {} -> {}", self.state, next);
        self.state = next;
    }

    fn fail(&mut self, err: TransferError) -> TransferResult<TransferRecord> {
        let stage = err.stage().map(|s| s.to_string()).unwrap_or_else(|| "validation".to_string());
        log::warn!("Submission failed while {}: {}", self.state, err);
        metrics::counter!(METRIC_SUBMISSIONS, "outcome" => "failed", "stage" => stage).increment(1);
        self.transition(SubmissionState::Failed(err.clone()));
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::crypto::hashing::{HashAlgorithmId, HashInput};
    use crate::domain::repositories::{MockTransferGateway, MockTransferRecordStore};
    use crate::infrastructure::file_storage::JsonFileTransferStore;
    use crate::shared::error::{CollaboratorError, SubmissionStage, TransferReceipt};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::time::Duration;
    use uuid::Uuid;

    const SENDER: &str = "0x1111111111111111111111111111111111111111";
    const RECIPIENT: &str = "0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6";
    const BLAKE3_100: &str = "0xabcfe76e6ab933c067566735afe60950b13af3bf428307ed95ae8ee0d9f912c4";

    fn request(recipient: &str, payload: &str) -> TransferRequest {
        TransferRequest::new(recipient, "10", payload, HashAlgorithmId::Blake3Full)
    }

    fn stamping_store() -> MockTransferRecordStore {
        let mut store = MockTransferRecordStore::new();
        store
            .expect_persist()
            .times(1)
            .returning(|draft| Ok(draft.clone().into_record(Uuid::new_v4(), Utc::now())));
        store
    }

    #[tokio::test]
    async fn test_successful_submission() {
        let mut gateway = MockTransferGateway::new();
        gateway
            .expect_transfer()
            .withf(|call| call.digest_hex == BLAKE3_100 && call.recipient == RECIPIENT)
            .times(1)
            .returning(|_| Ok(TransferReceipt::new("0xfeed")));

        let mut pipeline = TransferSubmissionPipeline::new(gateway, stamping_store(), SENDER);
        let record = pipeline.submit(&request(RECIPIENT, "100")).await.unwrap();

        assert_eq!(record.sender, SENDER);
        assert_eq!(record.recipient, RECIPIENT);
        assert_eq!(record.digest_hex, BLAKE3_100);
        assert_eq!(record.algorithm, HashAlgorithmId::Blake3Full);
        assert_eq!(record.amount.minor_units(), 10_000_000_000_000_000_000);
        assert_eq!(record.transaction_hash.as_deref(), Some("0xfeed"));
        assert!(matches!(pipeline.state(), SubmissionState::Completed(r) if r.id == record.id));
    }

    #[tokio::test]
    async fn test_empty_recipient_never_calls_transfer() {
        let mut gateway = MockTransferGateway::new();
        gateway.expect_transfer().never();
        let mut store = MockTransferRecordStore::new();
        store.expect_persist().never();

        let mut pipeline = TransferSubmissionPipeline::new(gateway, store, SENDER);
        let err = pipeline.submit(&request("  ", "100")).await.unwrap_err();

        assert!(matches!(err, TransferError::MissingInput(_)));
        assert_eq!(err.stage(), Some(SubmissionStage::Validation));
        assert!(matches!(pipeline.state(), SubmissionState::Failed(TransferError::MissingInput(_))));
    }

    #[tokio::test]
    async fn test_missing_amount_and_payload() {
        let mut gateway = MockTransferGateway::new();
        gateway.expect_transfer().never();
        let mut store = MockTransferRecordStore::new();
        store.expect_persist().never();
        let mut pipeline = TransferSubmissionPipeline::new(gateway, store, SENDER);

        let no_amount = TransferRequest::new(RECIPIENT, "", "100", HashAlgorithmId::Combined);
        assert!(matches!(pipeline.submit(&no_amount).await, Err(TransferError::MissingInput(_))));

        let no_payload = request(RECIPIENT, "");
        assert!(matches!(pipeline.submit(&no_payload).await, Err(TransferError::MissingInput(_))));
    }

    #[tokio::test]
    async fn test_unhashable_payload_is_hashing_error() {
        let mut gateway = MockTransferGateway::new();
        gateway.expect_transfer().never();
        let mut store = MockTransferRecordStore::new();
        store.expect_persist().never();

        let mut pipeline = TransferSubmissionPipeline::new(gateway, store, SENDER);
        let mut bad = request(RECIPIENT, "ignored");
        bad.payload = HashInput::Hex("0xabc".to_string());
        let err = pipeline.submit(&bad).await.unwrap_err();

        assert!(matches!(err, TransferError::HashingError(_)));
        assert_eq!(err.stage(), Some(SubmissionStage::Hashing));
    }

    #[tokio::test]
    async fn test_rejected_transfer_is_not_persisted() {
        let mut gateway = MockTransferGateway::new();
        gateway
            .expect_transfer()
            .times(1)
            .returning(|_| Err(CollaboratorError::new("execution reverted")));
        let mut store = MockTransferRecordStore::new();
        store.expect_persist().never();

        let mut pipeline = TransferSubmissionPipeline::new(gateway, store, SENDER);
        let err = pipeline.submit(&request(RECIPIENT, "100")).await.unwrap_err();

        assert_eq!(err, TransferError::transfer_rejected("execution reverted"));
        assert!(!err.transfer_was_sent());
    }

    #[tokio::test]
    async fn test_persistence_failure_reports_sent_transfer() {
        let mut gateway = MockTransferGateway::new();
        gateway
            .expect_transfer()
            .times(1)
            .returning(|_| Ok(TransferReceipt::new("0xbeef")));
        let mut store = MockTransferRecordStore::new();
        store
            .expect_persist()
            .times(1)
            .returning(|_| Err(CollaboratorError::new("quota exceeded")));

        let mut pipeline = TransferSubmissionPipeline::new(gateway, store, SENDER);
        let err = pipeline.submit(&request(RECIPIENT, "100")).await.unwrap_err();

        match &err {
            TransferError::PersistenceError { receipt, reason } => {
                assert_eq!(receipt.transaction_hash.as_deref(), Some("0xbeef"));
                assert_eq!(reason, "quota exceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.transfer_was_sent());
        assert_eq!(err.stage(), Some(SubmissionStage::Persisting));
    }

    #[tokio::test]
    async fn test_invalid_amount_rejected_before_hashing() {
        let mut gateway = MockTransferGateway::new();
        gateway.expect_transfer().never();
        let mut store = MockTransferRecordStore::new();
        store.expect_persist().never();

        let mut pipeline = TransferSubmissionPipeline::new(gateway, store, SENDER).with_amount_decimals(2);
        let req = TransferRequest::new(RECIPIENT, "1.005", "100", HashAlgorithmId::Blake3Full);
        assert!(matches!(pipeline.submit(&req).await, Err(TransferError::InvalidInput(_))));
    }

    /// Gateway whose call never resolves
    struct HangingGateway;

    #[async_trait]
    impl TransferGateway for HangingGateway {
        async fn transfer(&self, _call: &TransferCall) -> Result<TransferReceipt, CollaboratorError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_cancelled_submission_leaves_outcome_unknown() {
        let mut store = MockTransferRecordStore::new();
        store.expect_persist().never();
        let mut pipeline = TransferSubmissionPipeline::new(HangingGateway, store, SENDER);

        let req = request(RECIPIENT, "100");
        let timed_out = tokio::time::timeout(Duration::from_millis(20), pipeline.submit(&req)).await;
        assert!(timed_out.is_err());
        assert_eq!(*pipeline.state(), SubmissionState::Submitting);

        let err = pipeline.submit(&req).await.unwrap_err();
        assert!(matches!(err, TransferError::OutcomeUnknown(_)));
        assert_eq!(*pipeline.state(), SubmissionState::Submitting);

        assert_eq!(pipeline.acknowledge_unknown_outcome(), Some(SubmissionState::Submitting));
        assert_eq!(*pipeline.state(), SubmissionState::Idle);
        assert_eq!(pipeline.acknowledge_unknown_outcome(), None);
    }

    #[tokio::test]
    async fn test_records_reach_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileTransferStore::new(dir.path()).unwrap();
        let mut gateway = MockTransferGateway::new();
        gateway
            .expect_transfer()
            .times(2)
            .returning(|_| Ok(TransferReceipt::default()));

        let mut pipeline = TransferSubmissionPipeline::new(gateway, store, SENDER);
        pipeline.submit(&request(RECIPIENT, "first")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = pipeline
            .submit(&request(RECIPIENT, "second").with_label("bob@example.com"))
            .await
            .unwrap();

        let records = pipeline.store().list_records(SENDER).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, second.id);
        assert_eq!(records[0].recipient_label.as_deref(), Some("bob@example.com"));
    }
}
