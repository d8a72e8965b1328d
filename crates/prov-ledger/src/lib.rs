//! Product provenance ledger.
//!
//! The ledger has one owner, fixed at creation, who alone can authorize
//! registrants. Authorized registrants record products under
//! `(registrant, id)` keys. A product may name upstream source products; each
//! source must exist, belong to an authorized provider, and carry the
//! provider's signature over `(source id, registrant)`.
//!
//! # Example
//!
//! ```
//! use prov_ledger::{Ledger, NewProduct, ProductId};
//! use prov_sig::keygen;
//!
//! let creator = keygen().unwrap();
//! let farm = keygen().unwrap();
//! let mill = keygen().unwrap();
//!
//! let ledger = Ledger::new(creator.address());
//! ledger.authorize(&creator.address(), farm.address()).unwrap();
//! ledger.authorize(&creator.address(), mill.address()).unwrap();
//!
//! let wheat = ProductId::new(1).unwrap();
//! ledger
//!     .add_product(&farm.address(), NewProduct::new(wheat, "wheat", "2024-06", "field 7"))
//!     .unwrap();
//!
//! let consent = farm.sign_link(wheat.get(), &mill.address()).unwrap();
//! let flour = NewProduct::new(ProductId::new(1).unwrap(), "flour", "2024-07", "mill")
//!     .with_source(farm.address(), wheat, consent);
//! ledger.add_product(&mill.address(), flour).unwrap();
//!
//! let trace = ledger.trace_product(&mill.address(), ProductId::new(1).unwrap()).unwrap();
//! assert_eq!(trace.sources[0].provider, farm.address());
//! ```

mod error;
mod event;
mod ledger;
mod products;
mod registry;
mod snapshot;
mod types;

pub use error::{AddProductError, AuditError, AuthorizeError, ErrorKind, StoreError, TraceError};
pub use event::{LedgerEvent, Receipt};
pub use ledger::{AuditReport, Ledger};
pub use products::ProductLedger;
pub use registry::AuthorizationRegistry;
pub use snapshot::{LedgerSnapshot, SNAPSHOT_VERSION};
pub use types::{
    NewProduct, Product, ProductId, ProductIdError, ProductKey, ProductTrace, SourceLink, SourceRef,
};
pub use prov_sig::Address;
