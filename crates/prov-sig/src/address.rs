//! 20-byte account addresses.

use crate::digest::keccak256;
use k256::ecdsa::VerifyingKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of an address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Errors produced when parsing an address from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("address must be {expected} hex characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("address is not valid hex: {0}")]
    InvalidHex(String),
}

/// An account address: the last 20 bytes of the keccak-256 hash of an
/// uncompressed secp256k1 public key.
///
/// Displayed as lowercase `0x`-prefixed hex. Parsing accepts either case,
/// with or without the prefix, and does not enforce the EIP-55 checksum.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Derive the address controlled by a public key.
    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(false);
        // Skip the 0x04 SEC1 tag; the address hashes only the X || Y coordinates.
        let hash = keccak256(&point.as_bytes()[1..]);
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&hash[12..]);
        Self(bytes)
    }

    /// EIP-55 mixed-case checksum encoding.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = keccak256(lower.as_bytes());

        let mut out = String::with_capacity(2 + lower.len());
        out.push_str("0x");
        for (i, ch) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if ch.is_ascii_alphabetic() && nibble >= 8 {
                out.push(ch.to_ascii_uppercase());
            } else {
                out.push(ch);
            }
        }
        out
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != ADDRESS_LEN * 2 {
            return Err(AddressError::InvalidLength {
                expected: ADDRESS_LEN * 2,
                actual: digits.len(),
            });
        }
        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::ecdsa::SigningKey;

    fn key_one() -> SigningKey {
        let mut secret = [0u8; 32];
        secret[31] = 1;
        SigningKey::from_slice(&secret).unwrap()
    }

    #[test]
    fn test_address_of_secret_key_one() {
        let address = Address::from_verifying_key(key_one().verifying_key());
        assert_eq!(
            address.to_string(),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }

    #[test]
    fn test_checksum_encoding() {
        let address = Address::from_verifying_key(key_one().verifying_key());
        assert_eq!(
            address.to_checksum(),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
    }

    #[test]
    fn test_parse_accepts_mixed_case_and_bare_hex() {
        let checksummed: Address = "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf".parse().unwrap();
        let bare: Address = "7e5f4552091a69125d5dfcb7b8c2659029395bdf".parse().unwrap();
        assert_eq!(checksummed, bare);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        let err = "0x1234".parse::<Address>().unwrap_err();
        assert_eq!(
            err,
            AddressError::InvalidLength {
                expected: 40,
                actual: 4
            }
        );
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        let text = format!("0x{}", "zz".repeat(20));
        assert!(matches!(
            text.parse::<Address>(),
            Err(AddressError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let address = Address::new([0xab; ADDRESS_LEN]);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "ab".repeat(20)));

        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
