//! JSON file record store
//!
//! One file per transfer record, grouped by sender:
//! `<root>/<sender>/<record id>.json`.

use crate::domain::entities::{TransferRecord, TransferRecordDraft};
use crate::domain::repositories::TransferRecordStore;
use crate::shared::error::{CollaboratorError, TransferError, TransferResult};
use async_trait::async_trait;
use chrono::Utc;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Transfer records stored as pretty-printed JSON files
#[derive(Debug, Clone)]
pub struct JsonFileTransferStore {
    root: PathBuf,
}

impl JsonFileTransferStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn new(root: impl AsRef<Path>) -> TransferResult<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        log::debug!("Transfer records stored under {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn sender_dir(&self, sender: &str) -> PathBuf {
        self.root.join(sender.trim().to_lowercase())
    }

    async fn write_record(&self, record: &TransferRecord) -> TransferResult<PathBuf> {
        let dir = self.sender_dir(&record.sender);
        tokio::fs::create_dir_all(&dir).await?;
        let path = dir.join(format!("{}.json", record.id));
        let json = serde_json::to_vec_pretty(record)?;
        tokio::fs::write(&path, json).await?;
        Ok(path)
    }

    async fn read_records(&self, sender: &str) -> TransferResult<Vec<TransferRecord>> {
        let dir = self.sender_dir(sender);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let bytes = tokio::fs::read(&path).await?;
            let record: TransferRecord = serde_json::from_slice(&bytes).map_err(|e| {
                TransferError::storage(format!("Corrupt record {}: {}", path.display(), e))
            })?;
            records.push(record);
        }
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(records)
    }
}

#[async_trait]
impl TransferRecordStore for JsonFileTransferStore {
    async fn persist(&self, draft: &TransferRecordDraft) -> Result<TransferRecord, CollaboratorError> {
        let record = draft.clone().into_record(Uuid::new_v4(), Utc::now());
        let path = self
            .write_record(&record)
            .await
            .map_err(|e| CollaboratorError::new(e.to_string()))?;
        log::info!("Wrote transfer record {}", path.display());
        Ok(record)
    }

    async fn list_records(&self, sender: &str) -> Result<Vec<TransferRecord>, CollaboratorError> {
        self.read_records(sender)
            .await
            .map_err(|e| CollaboratorError::new(e.to_string()))
    }
}
