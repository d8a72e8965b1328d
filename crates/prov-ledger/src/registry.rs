//! Who may register products.

use crate::error::AuthorizeError;
use crate::event::LedgerEvent;
use prov_sig::Address;
use std::collections::BTreeSet;

/// The owner plus an append-only set of authorized registrants.
///
/// There is no revocation. The owner is not implicitly authorized to
/// register products; it must authorize itself like anyone else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRegistry {
    owner: Address,
    authorized: BTreeSet<Address>,
}

impl AuthorizationRegistry {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            authorized: BTreeSet::new(),
        }
    }

    pub(crate) fn from_parts(owner: Address, authorized: impl IntoIterator<Item = Address>) -> Self {
        Self {
            owner,
            authorized: authorized.into_iter().collect(),
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Grant `target` the right to register products.
    ///
    /// Re-authorizing an address is not an error and produces the event again.
    pub fn authorize(&mut self, caller: &Address, target: Address) -> Result<LedgerEvent, AuthorizeError> {
        if *caller != self.owner {
            return Err(AuthorizeError::Unauthorized { caller: *caller });
        }
        self.authorized.insert(target);
        Ok(LedgerEvent::Authorized { address: target })
    }

    pub fn is_authorized(&self, address: &Address) -> bool {
        self.authorized.contains(address)
    }

    /// Authorized addresses in ascending byte order.
    pub fn authorized(&self) -> impl Iterator<Item = &Address> {
        self.authorized.iter()
    }

    pub fn len(&self) -> usize {
        self.authorized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authorized.is_empty()
    }
}
