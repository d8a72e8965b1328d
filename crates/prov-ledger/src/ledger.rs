//! The shared ledger: registry and products behind one lock.

use crate::error::{AddProductError, AuditError, AuthorizeError, StoreError, TraceError};
use crate::event::Receipt;
use crate::products::ProductLedger;
use crate::registry::AuthorizationRegistry;
use crate::snapshot::{LedgerSnapshot, SNAPSHOT_VERSION};
use crate::types::{NewProduct, Product, ProductId, ProductTrace};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use prov_sig::Address;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug)]
struct LedgerState {
    registry: AuthorizationRegistry,
    products: ProductLedger,
}

/// Summary of a successful [`Ledger::audit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditReport {
    pub products: usize,
    pub links: usize,
}

/// The provenance ledger.
///
/// Mutations hold the write lock from their first check until the record is
/// stored, so concurrent readers never see a half-applied call. Share it
/// across threads with `Arc<Ledger>`.
#[derive(Debug)]
pub struct Ledger {
    created_at: DateTime<Utc>,
    state: RwLock<LedgerState>,
}

impl Ledger {
    pub fn new(owner: Address) -> Self {
        Self {
            created_at: Utc::now(),
            state: RwLock::new(LedgerState {
                registry: AuthorizationRegistry::new(owner),
                products: ProductLedger::new(),
            }),
        }
    }

    pub fn owner(&self) -> Address {
        self.state.read().registry.owner()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn authorize(&self, caller: &Address, target: Address) -> Result<Receipt, AuthorizeError> {
        let mut state = self.state.write();
        match state.registry.authorize(caller, target) {
            Ok(event) => {
                info!(%caller, %target, "address authorized");
                Ok(Receipt::single(event))
            }
            Err(err) => {
                warn!(%caller, %target, error = %err, "authorize rejected");
                Err(err)
            }
        }
    }

    pub fn is_authorized(&self, address: &Address) -> bool {
        self.state.read().registry.is_authorized(address)
    }

    pub fn add_product(&self, caller: &Address, product: NewProduct) -> Result<Receipt, AddProductError> {
        let id = product.id;
        let sources = product.source_ids.len();

        let mut state = self.state.write();
        let LedgerState { registry, products } = &mut *state;
        match products.add_product(registry, caller, product) {
            Ok(event) => {
                info!(registrant = %caller, %id, sources, "product added");
                Ok(Receipt::single(event))
            }
            Err(err) => {
                warn!(registrant = %caller, %id, error = %err, "add product rejected");
                Err(err)
            }
        }
    }

    pub fn trace_product(&self, registrant: &Address, id: ProductId) -> Result<ProductTrace, TraceError> {
        self.state.read().products.trace_product(registrant, id)
    }

    /// The full stored record, including source signatures.
    pub fn product(&self, registrant: &Address, id: ProductId) -> Option<Product> {
        self.state.read().products.get(registrant, id).cloned()
    }

    /// All products in `(registrant, id)` order.
    pub fn products(&self) -> Vec<Product> {
        self.state.read().products.iter().cloned().collect()
    }

    pub fn authorized(&self) -> Vec<Address> {
        self.state.read().registry.authorized().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.state.read().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().products.is_empty()
    }

    /// Re-verify every stored product and source link.
    pub fn audit(&self) -> Result<AuditReport, AuditError> {
        let state = self.state.read();
        let links = state.products.audit(&state.registry)?;
        Ok(AuditReport {
            products: state.products.len(),
            links,
        })
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        let state = self.state.read();
        LedgerSnapshot {
            version: SNAPSHOT_VERSION,
            created_at: self.created_at,
            owner: state.registry.owner(),
            authorized: state.registry.authorized().copied().collect(),
            products: state.products.iter().cloned().collect(),
        }
    }

    /// Rebuild a ledger from a snapshot.
    ///
    /// Products are restored as stored; run [`Ledger::audit`] to re-check
    /// their links against the registration rules.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Result<Self, StoreError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let registry = AuthorizationRegistry::from_parts(snapshot.owner, snapshot.authorized);
        let mut products = ProductLedger::new();
        for product in snapshot.products {
            let (registrant, id) = (product.registrant, product.id);
            if !products.restore(product) {
                return Err(StoreError::DuplicateProduct { registrant, id });
            }
        }

        Ok(Self {
            created_at: snapshot.created_at,
            state: RwLock::new(LedgerState { registry, products }),
        })
    }

    /// Load a ledger from a JSON snapshot file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: LedgerSnapshot = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), products = snapshot.products.len(), "ledger loaded");
        Self::from_snapshot(snapshot)
    }

    /// Save the ledger as a JSON snapshot file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StoreError> {
        let path = path.as_ref();
        let snapshot = self.snapshot();
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(path, json).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), products = snapshot.products.len(), "ledger saved");
        Ok(())
    }
}
