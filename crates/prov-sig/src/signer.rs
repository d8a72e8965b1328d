//! Client-side link signing.
//!
//! Providers run this on their own machine to endorse a downstream product.
//! The ledger only ever sees the resulting signature bytes.

use crate::address::Address;
use crate::digest::{eth_signed_message_hash, link_digest};
use crate::verify::SIGNATURE_LEN;
use k256::ecdsa::SigningKey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignError {
    #[error("invalid secp256k1 private key")]
    InvalidKey,

    #[error("private key is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("failed to gather entropy: {0}")]
    Entropy(String),

    #[error("signing failed: {0}")]
    Signing(String),
}

/// A secp256k1 key able to sign source links.
pub struct LinkSigner {
    key: SigningKey,
}

impl std::fmt::Debug for LinkSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkSigner")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

/// Generate a fresh random signing key.
pub fn keygen() -> Result<LinkSigner, SignError> {
    loop {
        let mut secret = [0u8; 32];
        getrandom::fill(&mut secret).map_err(|e| SignError::Entropy(e.to_string()))?;
        // A uniformly random 32-byte string falls outside the curve order with
        // negligible probability; draw again when it does.
        if let Ok(signer) = LinkSigner::from_bytes(&secret) {
            return Ok(signer);
        }
    }
}

impl LinkSigner {
    pub fn from_bytes(secret: &[u8]) -> Result<Self, SignError> {
        let key = SigningKey::from_slice(secret).map_err(|_| SignError::InvalidKey)?;
        Ok(Self { key })
    }

    /// Parse a 32-byte private key from hex, with or without a `0x` prefix.
    pub fn from_hex(secret: &str) -> Result<Self, SignError> {
        let digits = secret.trim();
        let digits = digits.strip_prefix("0x").unwrap_or(digits);
        let bytes = hex::decode(digits)?;
        Self::from_bytes(&bytes)
    }

    pub fn address(&self) -> Address {
        Address::from_verifying_key(self.key.verifying_key())
    }

    pub fn secret_hex(&self) -> String {
        hex::encode(self.key.to_bytes())
    }

    /// Sign the link digest of `(id, verifier)` with the signed-message prefix.
    ///
    /// The returned signature is `r || s || v` with `v` in `{27, 28}`.
    pub fn sign_link(&self, id: u64, verifier: &Address) -> Result<[u8; SIGNATURE_LEN], SignError> {
        let hash = eth_signed_message_hash(&link_digest(id, verifier));
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(&hash)
            .map_err(|e| SignError::Signing(e.to_string()))?;

        let mut out = [0u8; SIGNATURE_LEN];
        out[..64].copy_from_slice(&signature.to_bytes());
        out[64] = 27 + recovery_id.to_byte();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keygen_generates_distinct_keys() {
        let a = keygen().unwrap();
        let b = keygen().unwrap();
        assert_ne!(a.address(), b.address());
    }

    #[test]
    fn test_hex_round_trip_preserves_address() {
        let signer = keygen().unwrap();
        let restored = LinkSigner::from_hex(&format!("0x{}", signer.secret_hex())).unwrap();
        assert_eq!(restored.address(), signer.address());
    }

    #[test]
    fn test_zero_key_rejected() {
        assert!(matches!(
            LinkSigner::from_bytes(&[0u8; 32]),
            Err(SignError::InvalidKey)
        ));
    }

    #[test]
    fn test_bad_hex_rejected() {
        assert!(matches!(
            LinkSigner::from_hex("0xnothex"),
            Err(SignError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_signature_recovery_byte_is_27_or_28() {
        let signer = keygen().unwrap();
        let signature = signer.sign_link(1, &signer.address()).unwrap();
        assert!(signature[64] == 27 || signature[64] == 28);
    }

    #[test]
    fn test_signing_is_deterministic() {
        let signer = keygen().unwrap();
        let verifier = Address::new([9; 20]);
        assert_eq!(
            signer.sign_link(2, &verifier).unwrap(),
            signer.sign_link(2, &verifier).unwrap()
        );
    }
}
