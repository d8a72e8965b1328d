//! Ledger error types.
//!
//! Every error is terminal for the call that produced it and leaves the
//! ledger unchanged.

use crate::types::ProductId;
use prov_sig::Address;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of ledger failures, for callers that render or
/// route errors without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    AccessDenied,
    Conflict,
    MalformedInput,
    ReferentialIntegrityFailure,
    ProofFailure,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorizeError {
    #[error("only the creator can authorize addresses (caller {caller})")]
    Unauthorized { caller: Address },
}

impl AuthorizeError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::AccessDenied
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddProductError {
    #[error("{caller} is not authorized to add products")]
    NotAuthorized { caller: Address },

    #[error("product id {0} is already used")]
    IdAlreadyUsed(ProductId),

    #[error("product name is empty")]
    InformationIsEmpty,

    #[error("source arrays differ in length: {providers} providers, {ids} ids, {signatures} signatures")]
    UnequalLength {
        providers: usize,
        ids: usize,
        signatures: usize,
    },

    #[error("source provider {0} is not authorized")]
    ProviderNotAuthorized(Address),

    #[error("source product {1} of {0} does not exist")]
    IdNotExist(Address, ProductId),

    #[error("signature for source product {1} of {0} failed validation")]
    ValidationFail(Address, ProductId),
}

impl AddProductError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAuthorized { .. } | Self::ProviderNotAuthorized(_) => ErrorKind::AccessDenied,
            Self::IdAlreadyUsed(_) => ErrorKind::Conflict,
            Self::InformationIsEmpty | Self::UnequalLength { .. } => ErrorKind::MalformedInput,
            Self::IdNotExist(..) => ErrorKind::ReferentialIntegrityFailure,
            Self::ValidationFail(..) => ErrorKind::ProofFailure,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TraceError {
    #[error("product {1} of {0} does not exist")]
    IdNotExist(Address, ProductId),
}

impl TraceError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::ReferentialIntegrityFailure
    }
}

/// A stored product that no longer satisfies the registration rules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuditError {
    #[error("product {id} of {registrant}: registrant is not authorized")]
    RegistrantNotAuthorized { registrant: Address, id: ProductId },

    #[error("product {id} of {registrant}: source provider {provider} is not authorized")]
    ProviderNotAuthorized {
        registrant: Address,
        id: ProductId,
        provider: Address,
    },

    #[error("product {id} of {registrant}: source {source_id} of {provider} is missing")]
    MissingSource {
        registrant: Address,
        id: ProductId,
        provider: Address,
        source_id: ProductId,
    },

    #[error("product {id} of {registrant}: signature for source {source_id} of {provider} is invalid")]
    InvalidSignature {
        registrant: Address,
        id: ProductId,
        provider: Address,
        source_id: ProductId,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("snapshot contains product {id} of {registrant} more than once")]
    DuplicateProduct { registrant: Address, id: ProductId },
}
