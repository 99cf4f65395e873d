use crate::shared::error::TransferError;
use crate::shared::utils::hex_to_bytes;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Payload to be hashed, as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum HashInput {
    /// Raw bytes, hashed as-is
    Bytes(Vec<u8>),
    /// Text, hashed as its UTF-8 encoding
    Text(String),
    /// Hex text (optionally 0x-prefixed), hashed as the decoded bytes
    Hex(String),
}

impl HashInput {
    /// Byte view of the payload. This is the only fallible step of hashing.
    pub fn as_bytes(&self) -> Result<Cow<'_, [u8]>, TransferError> {
        match self {
            HashInput::Bytes(bytes) => Ok(Cow::Borrowed(bytes.as_slice())),
            HashInput::Text(text) => Ok(Cow::Borrowed(text.as_bytes())),
            HashInput::Hex(hex) => hex_to_bytes(hex.trim()).map(Cow::Owned),
        }
    }

    /// Whether the caller supplied nothing to hash
    pub fn is_empty(&self) -> bool {
        match self {
            HashInput::Bytes(bytes) => bytes.is_empty(),
            HashInput::Text(text) => text.is_empty(),
            HashInput::Hex(hex) => {
                let hex = hex.trim();
                hex.strip_prefix("0x").unwrap_or(hex).is_empty()
            }
        }
    }
}

impl From<&str> for HashInput {
    fn from(text: &str) -> Self {
        HashInput::Text(text.to_string())
    }
}

impl From<String> for HashInput {
    fn from(text: String) -> Self {
        HashInput::Text(text)
    }
}

impl From<Vec<u8>> for HashInput {
    fn from(bytes: Vec<u8>) -> Self {
        HashInput::Bytes(bytes)
    }
}

impl From<&[u8]> for HashInput {
    fn from(bytes: &[u8]) -> Self {
        HashInput::Bytes(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_utf8() {
        let input = HashInput::from("héllo");
        assert_eq!(input.as_bytes().unwrap().as_ref(), "héllo".as_bytes());
    }

    #[test]
    fn test_hex_decodes() {
        let input = HashInput::Hex("0x0102ff".to_string());
        assert_eq!(input.as_bytes().unwrap().as_ref(), &[0x01, 0x02, 0xff]);
    }

    #[test]
    fn test_malformed_hex_is_invalid_input() {
        let input = HashInput::Hex("0xnothex".to_string());
        assert!(matches!(input.as_bytes(), Err(TransferError::InvalidInput(_))));
    }

    #[test]
    fn test_is_empty() {
        assert!(HashInput::from("").is_empty());
        assert!(HashInput::Bytes(Vec::new()).is_empty());
        assert!(HashInput::Hex("0x".to_string()).is_empty());
        assert!(!HashInput::from("100").is_empty());
    }
}
