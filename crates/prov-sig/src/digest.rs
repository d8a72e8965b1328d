//! Link digest construction.

use crate::address::{Address, ADDRESS_LEN};
use sha3::{Digest, Keccak256};

/// Prefix applied by `eth_sign`/`personal_sign` style signers to a 32-byte message.
pub const SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Hash of the tightly packed pair `(id as uint256, verifier as address)`.
///
/// The id occupies 32 big-endian bytes and the address the following 20,
/// with no padding or separator between them.
pub fn link_digest(id: u64, verifier: &Address) -> [u8; 32] {
    let mut packed = [0u8; 32 + ADDRESS_LEN];
    packed[24..32].copy_from_slice(&id.to_be_bytes());
    packed[32..].copy_from_slice(verifier.as_bytes());
    keccak256(&packed)
}

/// Wrap a 32-byte digest in the signed-message prefix and hash it again.
pub fn eth_signed_message_hash(digest: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(SIGNED_MESSAGE_PREFIX);
    hasher.update(digest);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak_of_empty_input() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_link_digest_layout() {
        let verifier = Address::new([0x11; ADDRESS_LEN]);

        let mut expected = Vec::new();
        expected.extend_from_slice(&[0u8; 31]);
        expected.push(7);
        expected.extend_from_slice(&[0x11; ADDRESS_LEN]);
        assert_eq!(expected.len(), 52);

        assert_eq!(link_digest(7, &verifier), keccak256(&expected));
    }

    #[test]
    fn test_link_digest_encodes_full_u64_big_endian() {
        let verifier = Address::default();

        let mut expected = [0u8; 52];
        expected[24..32].copy_from_slice(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);

        assert_eq!(
            link_digest(0x0102_0304_0506_0708, &verifier),
            keccak256(&expected)
        );
    }

    #[test]
    fn test_link_digest_depends_on_both_inputs() {
        let a = Address::new([1; ADDRESS_LEN]);
        let b = Address::new([2; ADDRESS_LEN]);
        assert_ne!(link_digest(1, &a), link_digest(1, &b));
        assert_ne!(link_digest(1, &a), link_digest(2, &a));
    }

    #[test]
    fn test_signed_message_hash_prefix() {
        let digest = [0x42u8; 32];
        let mut preimage = b"\x19Ethereum Signed Message:\n32".to_vec();
        preimage.extend_from_slice(&digest);
        assert_eq!(eth_signed_message_hash(&digest), keccak256(&preimage));
    }
}
