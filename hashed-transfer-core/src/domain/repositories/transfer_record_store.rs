//! Record store for completed transfers

use crate::domain::entities::{TransferRecord, TransferRecordDraft};
use crate::shared::error::CollaboratorError;
use async_trait::async_trait;

/// Transfer record store trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransferRecordStore: Send + Sync {
    /// Persist a record, stamping it with the store's own id and timestamp
    async fn persist(&self, draft: &TransferRecordDraft) -> Result<TransferRecord, CollaboratorError>;

    /// Records sent by `sender`, newest first
    async fn list_records(&self, sender: &str) -> Result<Vec<TransferRecord>, CollaboratorError>;
}
