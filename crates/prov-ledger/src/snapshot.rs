//! Serialized whole-ledger state.

use crate::types::Product;
use chrono::{DateTime, Utc};
use prov_sig::Address;
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub owner: Address,
    #[serde(default)]
    pub authorized: Vec<Address>,
    #[serde(default)]
    pub products: Vec<Product>,
}
