use serde::{Deserialize, Serialize};

// Basic types for transfer operations
pub type Address = String;
pub type TransactionHash = String;
pub type DigestHex = String;

// On-chain status of a submitted transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
}

impl TransactionStatus {
    /// Map a JSON-RPC receipt `status` field ("0x1" / "0x0") to a status
    pub fn from_receipt_status(status: Option<&str>) -> Self {
        match status {
            Some("0x1") => TransactionStatus::Confirmed,
            Some("0x0") => TransactionStatus::Failed,
            _ => TransactionStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_status_mapping() {
        assert_eq!(TransactionStatus::from_receipt_status(Some("0x1")), TransactionStatus::Confirmed);
        assert_eq!(TransactionStatus::from_receipt_status(Some("0x0")), TransactionStatus::Failed);
        assert_eq!(TransactionStatus::from_receipt_status(None), TransactionStatus::Pending);
    }
}
