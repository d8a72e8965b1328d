//! Signer recovery and link verification.

use crate::address::Address;
use crate::digest::{eth_signed_message_hash, link_digest};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};

/// Length of an `r || s || v` recoverable signature.
pub const SIGNATURE_LEN: usize = 65;

/// Recover the address that produced `signature` over `message_hash`.
///
/// The recovery byte may be given as `0`/`1` or as `27`/`28`. Returns `None`
/// for any malformed signature: wrong length, unknown recovery byte, zero or
/// out-of-range scalars, a high `s` value, or a point that does not recover.
pub fn recover_signer(message_hash: &[u8; 32], signature: &[u8]) -> Option<Address> {
    if signature.len() != SIGNATURE_LEN {
        return None;
    }

    let recovery_byte = match signature[64] {
        v @ (0 | 1) => v,
        v @ (27 | 28) => v - 27,
        _ => return None,
    };
    let recovery_id = RecoveryId::from_byte(recovery_byte)?;
    let signature = Signature::from_slice(&signature[..64]).ok()?;

    let key = VerifyingKey::recover_from_prehash(message_hash, &signature, recovery_id).ok()?;
    Some(Address::from_verifying_key(&key))
}

/// Check that `expected` signed the link `(id, claimed_verifier)`.
pub fn verify(expected: &Address, id: u64, claimed_verifier: &Address, signature: &[u8]) -> bool {
    let message_hash = eth_signed_message_hash(&link_digest(id, claimed_verifier));
    recover_signer(&message_hash, signature).is_some_and(|signer| signer == *expected)
}
