//! Product records and registration inputs.

use prov_sig::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductIdError {
    #[error("product id must be at least 1")]
    Zero,

    #[error("product id is not an unsigned integer: {0}")]
    NotANumber(String),
}

/// Registrant-scoped product number. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(NonZeroU64);

impl ProductId {
    pub fn new(id: u64) -> Result<Self, ProductIdError> {
        NonZeroU64::new(id).map(Self).ok_or(ProductIdError::Zero)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u64 = s
            .trim()
            .parse()
            .map_err(|_| ProductIdError::NotANumber(s.to_string()))?;
        Self::new(value)
    }
}

impl TryFrom<u64> for ProductId {
    type Error = ProductIdError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Composite ledger key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductKey {
    pub registrant: Address,
    pub id: ProductId,
}

impl ProductKey {
    pub fn new(registrant: Address, id: ProductId) -> Self {
        Self { registrant, id }
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.registrant, self.id)
    }
}

/// An upstream product declared as an input, with the provider's endorsement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLink {
    pub provider: Address,
    pub id: ProductId,
    #[serde(with = "hex_bytes")]
    pub signature: Vec<u8>,
}

impl SourceLink {
    pub fn reference(&self) -> SourceRef {
        SourceRef {
            provider: self.provider,
            id: self.id,
        }
    }
}

/// A stored product. Never modified after registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub registrant: Address,
    pub id: ProductId,
    pub name: String,
    pub time: String,
    pub location: String,
    #[serde(default)]
    pub sources: Vec<SourceLink>,
}

impl Product {
    pub fn key(&self) -> ProductKey {
        ProductKey::new(self.registrant, self.id)
    }

    /// The public view returned by tracing: metadata plus first-level references.
    pub fn trace(&self) -> ProductTrace {
        ProductTrace {
            name: self.name.clone(),
            time: self.time.clone(),
            location: self.location.clone(),
            sources: self.sources.iter().map(SourceLink::reference).collect(),
        }
    }
}

/// Pointer to another product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRef {
    pub provider: Address,
    pub id: ProductId,
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.provider, self.id)
    }
}

/// Result of tracing one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTrace {
    pub name: String,
    pub time: String,
    pub location: String,
    pub sources: Vec<SourceRef>,
}

/// Arguments of a registration call.
///
/// Sources arrive as three parallel arrays; the ledger rejects the call when
/// their lengths differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub id: ProductId,
    pub name: String,
    pub time: String,
    pub location: String,
    pub source_providers: Vec<Address>,
    pub source_ids: Vec<ProductId>,
    pub signatures: Vec<Vec<u8>>,
}

impl NewProduct {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        time: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            time: time.into(),
            location: location.into(),
            source_providers: Vec::new(),
            source_ids: Vec::new(),
            signatures: Vec::new(),
        }
    }

    /// Append one source, keeping the three arrays aligned.
    pub fn with_source(mut self, provider: Address, id: ProductId, signature: impl Into<Vec<u8>>) -> Self {
        self.source_providers.push(provider);
        self.source_ids.push(id);
        self.signatures.push(signature.into());
        self
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        let digits = text.strip_prefix("0x").unwrap_or(&text);
        hex::decode(digits).map_err(serde::de::Error::custom)
    }
}
