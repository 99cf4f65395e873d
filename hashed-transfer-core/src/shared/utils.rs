//! Utility functions for the hashed transfer core
//!
//! This module contains common utility functions used throughout the core.

use crate::shared::constants::{ADDRESS_LENGTH, DIGEST_HEX_PREFIX, MAX_AMOUNT_DECIMALS};
use crate::shared::error::TransferError;

/// Validate Ethereum address format
pub fn validate_ethereum_address(address: &str) -> Result<(), TransferError> {
    if !address.starts_with("0x") {
        return Err(TransferError::invalid_input("Address must start with 0x"));
    }

    if address.len() != ADDRESS_LENGTH {
        return Err(TransferError::invalid_input("Address must be 42 characters long"));
    }

    if !address[2..].chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TransferError::invalid_input("Address contains invalid hex characters"));
    }

    Ok(())
}

/// Convert hex string (with or without 0x) to bytes
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, TransferError> {
    let hex = hex.strip_prefix(DIGEST_HEX_PREFIX).unwrap_or(hex);
    hex::decode(hex)
        .map_err(|e| TransferError::invalid_input(format!("Invalid hex string: {}", e)))
}

/// Convert bytes to a lowercase, 0x-prefixed hex string
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("{}{}", DIGEST_HEX_PREFIX, hex::encode(bytes))
}

/// Parse a decimal amount ("1.5") into integer minor units with `decimals` precision
pub fn parse_amount(amount: &str, decimals: u8) -> Result<u128, TransferError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(TransferError::missing_input("Amount cannot be empty"));
    }
    if decimals > MAX_AMOUNT_DECIMALS {
        return Err(TransferError::invalid_configuration(format!(
            "At most {} decimals are supported",
            MAX_AMOUNT_DECIMALS
        )));
    }

    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (amount, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(TransferError::invalid_input("Invalid amount format"));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(TransferError::invalid_input(format!("Invalid amount format: {}", amount)));
    }
    if fraction.len() > decimals as usize {
        return Err(TransferError::invalid_input(format!(
            "Amount has more than {} fractional digits",
            decimals
        )));
    }

    let mut digits = String::with_capacity(whole.len() + decimals as usize);
    digits.push_str(if whole.is_empty() { "0" } else { whole });
    digits.push_str(fraction);
    for _ in fraction.len()..decimals as usize {
        digits.push('0');
    }

    digits
        .parse::<u128>()
        .map_err(|_| TransferError::invalid_input(format!("Amount out of range: {}", amount)))
}

/// Format integer minor units back into a decimal string
pub fn format_amount(minor_units: u128, decimals: u8) -> String {
    if decimals == 0 {
        return minor_units.to_string();
    }

    let digits = format!("{:0>width$}", minor_units, width = decimals as usize + 1);
    let split = digits.len() - decimals as usize;
    let (whole, fraction) = digits.split_at(split);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}
