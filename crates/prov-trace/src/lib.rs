//! Client-side provenance traversal.
//!
//! Nothing here is ledger state. A [`HistoryCursor`] is a session value that
//! a UI keeps while a user steps through a product's history, and
//! [`ancestry`] expands every upstream product at once. Both read the ledger
//! only through [`ProductSource::trace_product`], so they can be rebuilt at
//! any time by querying again.

mod ancestry;
mod cursor;
mod source;

pub use ancestry::{ancestry, AncestryNode};
pub use cursor::{HistoryCursor, TracedProduct};
pub use source::ProductSource;

use prov_ledger::TraceError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TraversalError {
    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error("source index {index} out of range: product has {available} sources")]
    NoSuchSource { index: usize, available: usize },
}
