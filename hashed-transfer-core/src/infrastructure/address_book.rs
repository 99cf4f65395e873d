//! In-memory address directory

use crate::domain::repositories::AddressDirectory;
use crate::shared::error::TransferResult;
use crate::shared::types::Address;
use crate::shared::utils::validate_ethereum_address;
use std::collections::HashMap;

/// Identifier to address map, e.g. e-mails registered by users.
/// Addresses are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAddressDirectory {
    by_identifier: HashMap<String, Address>,
    by_address: HashMap<String, String>,
}

impl InMemoryAddressDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `identifier` for `address`, replacing any earlier mapping of either
    pub fn register(&mut self, identifier: &str, address: &str) -> TransferResult<()> {
        let address = address.trim();
        validate_ethereum_address(address)?;
        let identifier = identifier.trim().to_string();

        if let Some(previous) = self.by_identifier.insert(identifier.clone(), address.to_string()) {
            self.by_address.remove(&previous.to_lowercase());
        }
        if let Some(previous) = self.by_address.insert(address.to_lowercase(), identifier.clone()) {
            if previous != identifier {
                self.by_identifier.remove(&previous);
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.by_identifier.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_identifier.is_empty()
    }
}

impl AddressDirectory for InMemoryAddressDirectory {
    fn address_for(&self, identifier: &str) -> Option<Address> {
        self.by_identifier.get(identifier.trim()).cloned()
    }

    fn identifier_for(&self, address: &str) -> Option<String> {
        self.by_address.get(&address.trim().to_lowercase()).cloned()
    }
}
