//! JSON-RPC transfer gateway
//!
//! Calls the hashed-transfer contract through a node that manages the sender
//! account (`eth_sendTransaction`), e.g. a local Ganache instance.

use crate::domain::entities::TransferCall;
use crate::domain::repositories::TransferGateway;
use crate::infrastructure::config::CoreConfig;
use crate::shared::constants::{RECEIPT_POLL_ATTEMPTS, RECEIPT_POLL_INTERVAL, RPC_TIMEOUT};
use crate::shared::error::{CollaboratorError, TransferError, TransferReceipt, TransferResult};
use crate::shared::types::{Address, TransactionHash, TransactionStatus};
use crate::shared::utils::{bytes_to_hex, hex_to_bytes, validate_ethereum_address};
use async_trait::async_trait;
use ethers::abi::{encode, Token};
use ethers::types::{H160, U256};
use ethers::utils::id;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Transfer gateway backed by a JSON-RPC node
pub struct JsonRpcTransferGateway {
    client: Client,
    rpc_url: String,
    contract: Address,
    sender: Address,
    confirm_receipts: bool,
    poll_attempts: u32,
    poll_interval: Duration,
}

impl JsonRpcTransferGateway {
    pub fn new(rpc_url: impl Into<String>, contract: impl Into<Address>, sender: impl Into<Address>) -> TransferResult<Self> {
        let contract = contract.into();
        let sender = sender.into();
        validate_ethereum_address(&contract)?;
        validate_ethereum_address(&sender)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(RPC_TIMEOUT))
            .build()
            .map_err(|e| TransferError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            rpc_url: rpc_url.into(),
            contract,
            sender,
            confirm_receipts: false,
            poll_attempts: RECEIPT_POLL_ATTEMPTS,
            poll_interval: Duration::from_millis(RECEIPT_POLL_INTERVAL),
        })
    }

    pub fn from_config(config: &CoreConfig) -> TransferResult<Self> {
        let (contract, sender) = config.transfer_accounts()?;
        Ok(Self::new(config.rpc_url.clone(), contract, sender)?
            .with_receipt_confirmation(config.confirm_receipts))
    }

    /// Wait for the transaction to be mined and treat a reverted receipt as a rejection
    pub fn with_receipt_confirmation(mut self, confirm: bool) -> Self {
        self.confirm_receipts = confirm;
        self
    }

    /// How often and how many times to ask for the receipt
    pub fn with_receipt_polling(mut self, attempts: u32, interval: Duration) -> Self {
        self.poll_attempts = attempts;
        self.poll_interval = interval;
        self
    }

    pub fn contract(&self) -> &str {
        &self.contract
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    async fn rpc(&self, method: &str, params: Value) -> TransferResult<Value> {
        let body = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });
        let resp = self
            .client
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TransferError::network(format!("{} failed: {}", method, e)))?;
        let resp_json: Value = resp
            .json()
            .await
            .map_err(|e| TransferError::network(format!("Invalid response to {}: {}", method, e)))?;
        rpc_result(resp_json).map_err(TransferError::network)
    }

    async fn send_transfer(&self, call: &TransferCall) -> TransferResult<TransactionHash> {
        let data = encode_transfer_call(call)?;
        let params = json!([{
            "from": self.sender,
            "to": self.contract,
            "data": bytes_to_hex(&data),
        }]);
        let result = self.rpc("eth_sendTransaction", params).await?;
        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| TransferError::network("No transaction hash returned"))
    }

    async fn wait_for_receipt(&self, transaction_hash: &str) -> TransferResult<TransactionStatus> {
        for _ in 0..self.poll_attempts {
            let receipt = self
                .rpc("eth_getTransactionReceipt", json!([transaction_hash]))
                .await?;
            if !receipt.is_null() {
                let status = receipt.get("status").and_then(Value::as_str);
                return Ok(TransactionStatus::from_receipt_status(status));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
        Ok(TransactionStatus::Pending)
    }
}

#[async_trait]
impl TransferGateway for JsonRpcTransferGateway {
    async fn transfer(&self, call: &TransferCall) -> Result<TransferReceipt, CollaboratorError> {
        log::info!(
            "Calling {} for {} ({} minor units)",
            call.algorithm.contract_method(),
            call.recipient,
            call.amount.minor_units()
        );
        let transaction_hash = self
            .send_transfer(call)
            .await
            .map_err(|e| CollaboratorError::new(e.to_string()))?;

        // From here on the transaction is broadcast; only a mined revert is a rejection
        if self.confirm_receipts {
            match self.wait_for_receipt(&transaction_hash).await {
                Ok(TransactionStatus::Failed) => {
                    return Err(CollaboratorError::new(format!(
                        "Transaction {} reverted",
                        transaction_hash
                    )));
                }
                Ok(TransactionStatus::Pending) => {
                    log::warn!("Transaction {} not mined yet", transaction_hash);
                }
                Ok(TransactionStatus::Confirmed) => {
                    log::debug!("Transaction {} confirmed", transaction_hash);
                }
                Err(e) => {
                    log::warn!("Transaction {} sent but receipt unavailable: {}", transaction_hash, e);
                }
            }
        }

        Ok(TransferReceipt::new(transaction_hash))
    }
}

/// ABI calldata for `method(address recipient, uint256 amount, bytes digest)`
pub fn encode_transfer_call(call: &TransferCall) -> TransferResult<Vec<u8>> {
    let recipient = hex_to_bytes(call.recipient.trim())?;
    if recipient.len() != 20 {
        return Err(TransferError::invalid_input(format!(
            "Recipient must be 20 bytes, got {}",
            recipient.len()
        )));
    }
    let digest = hex_to_bytes(&call.digest_hex)?;
    let signature = format!("{}(address,uint256,bytes)", call.algorithm.contract_method());

    let mut data = id(signature).to_vec();
    data.extend(encode(&[
        Token::Address(H160::from_slice(&recipient)),
        Token::Uint(U256::from(call.amount.minor_units())),
        Token::Bytes(digest),
    ]));
    Ok(data)
}

/// Split a JSON-RPC response into its result or its error message
fn rpc_result(resp_json: Value) -> Result<Value, String> {
    if let Some(error) = resp_json.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(message);
    }
    match resp_json.get("result") {
        Some(result) => Ok(result.clone()),
        None => Err("Response has neither result nor error".to_string()),
    }
}
