//! Source-link signatures for the provenance ledger.
//!
//! A provider endorses a downstream use of one of its products by signing the
//! link digest `keccak256(id as uint256 || verifier address)`, wrapped in the
//! Ethereum signed-message prefix. This crate computes that digest, recovers
//! the secp256k1 signer of a 65-byte `r || s || v` signature, and compares the
//! recovered address with the expected provider.
//!
//! Signing lives here too, but only for collaborator tooling: the ledger
//! itself never holds a private key.
//!
//! # Example
//!
//! ```
//! use prov_sig::{keygen, verify};
//!
//! let provider = keygen().unwrap();
//! let consumer = keygen().unwrap().address();
//!
//! let signature = provider.sign_link(1, &consumer).unwrap();
//! assert!(verify(&provider.address(), 1, &consumer, &signature));
//! assert!(!verify(&provider.address(), 2, &consumer, &signature));
//! ```

mod address;
mod digest;
mod signer;
mod verify;

pub use address::{Address, AddressError, ADDRESS_LEN};
pub use digest::{eth_signed_message_hash, keccak256, link_digest, SIGNED_MESSAGE_PREFIX};
pub use signer::{keygen, LinkSigner, SignError};
pub use verify::{recover_signer, verify, SIGNATURE_LEN};
