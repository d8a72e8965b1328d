//! Notifications produced by successful mutations.

use crate::types::ProductId;
use prov_sig::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    Authorized { address: Address },
    ProductAdded { registrant: Address, id: ProductId },
}

impl fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerEvent::Authorized { address } => write!(f, "Authorized({address})"),
            LedgerEvent::ProductAdded { registrant, id } => {
                write!(f, "ProductAdded({registrant}, {id})")
            }
        }
    }
}

/// Success value of a mutating call. Publishing the events is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Receipt {
    pub events: Vec<LedgerEvent>,
}

impl Receipt {
    pub fn single(event: LedgerEvent) -> Self {
        Self {
            events: vec![event],
        }
    }
}
