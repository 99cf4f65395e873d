//! Transfer gateway for the on-chain hashed transfer call

use crate::domain::entities::TransferCall;
use crate::shared::error::{CollaboratorError, TransferReceipt};
use async_trait::async_trait;

/// Transfer gateway trait
///
/// One call is one transfer attempt. Implementations decide how a rejected
/// call, a timeout or an on-chain revert is reported, but every one of them
/// must come back as an `Err`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransferGateway: Send + Sync {
    /// Send `call.amount` to `call.recipient` with the digest attached
    async fn transfer(&self, call: &TransferCall) -> Result<TransferReceipt, CollaboratorError>;
}
