//! Address directory for recipient lookups

use crate::shared::types::Address;

/// Synchronous lookup between recipient identifiers (e-mails) and chain addresses
pub trait AddressDirectory: Send + Sync {
    fn address_for(&self, identifier: &str) -> Option<Address>;

    /// Address comparison is case-insensitive
    fn identifier_for(&self, address: &str) -> Option<String>;
}
