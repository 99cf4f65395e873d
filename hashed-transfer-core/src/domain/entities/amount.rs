//! Transfer amount value object

use crate::shared::error::TransferError;
use crate::shared::utils::{format_amount, parse_amount};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal amount held as integer minor units (e.g. SUSD -> wei)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AmountRepr", into = "AmountRepr")]
pub struct Amount {
    minor_units: u128,
    decimals: u8,
}

impl Amount {
    /// Parse a decimal string such as "1.5" with `decimals` digits of precision
    pub fn parse(text: &str, decimals: u8) -> Result<Self, TransferError> {
        let minor_units = parse_amount(text, decimals)?;
        Ok(Self { minor_units, decimals })
    }

    pub fn from_minor_units(minor_units: u128, decimals: u8) -> Self {
        Self { minor_units, decimals }
    }

    pub fn minor_units(&self) -> u128 {
        self.minor_units
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_amount(self.minor_units, self.decimals))
    }
}

#[derive(Serialize, Deserialize)]
struct AmountRepr {
    value: String,
    decimals: u8,
}

impl From<Amount> for AmountRepr {
    fn from(amount: Amount) -> Self {
        Self { value: amount.to_string(), decimals: amount.decimals }
    }
}

impl TryFrom<AmountRepr> for Amount {
    type Error = TransferError;

    fn try_from(repr: AmountRepr) -> Result<Self, Self::Error> {
        Amount::parse(&repr.value, repr.decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let amount = Amount::parse("2.50", 18).unwrap();
        assert_eq!(amount.minor_units(), 2_500_000_000_000_000_000);
        assert_eq!(amount.to_string(), "2.5");
    }

    #[test]
    fn test_serde_keeps_precision() {
        let amount = Amount::parse("123456789.000000000000000001", 18).unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        assert!(json.contains("\"123456789.000000000000000001\""));

        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, amount);
    }

    #[test]
    fn test_invalid_serialized_amount_is_rejected() {
        let result: Result<Amount, _> = serde_json::from_str(r#"{"value":"abc","decimals":18}"#);
        assert!(result.is_err());
    }
}
