//! Back/forward navigation through a product's history.

use crate::source::ProductSource;
use crate::TraversalError;
use prov_ledger::{Address, ProductId, ProductTrace};
use serde::{Deserialize, Serialize};

/// A traced product together with the key it was traced under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracedProduct {
    pub registrant: Address,
    pub id: ProductId,
    #[serde(flatten)]
    pub trace: ProductTrace,
}

impl TracedProduct {
    pub fn fetch<S: ProductSource + ?Sized>(
        source: &S,
        registrant: Address,
        id: ProductId,
    ) -> Result<Self, TraversalError> {
        let trace = source.trace_product(&registrant, id)?;
        Ok(Self {
            registrant,
            id,
            trace,
        })
    }
}

/// Visited records plus a position, like a browser history.
///
/// Jumping to a source while positioned before the end discards the
/// records ahead of the cursor and continues along the new branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCursor")]
pub struct HistoryCursor {
    history: Vec<TracedProduct>,
    index: usize,
}

#[derive(Deserialize)]
struct RawCursor {
    history: Vec<TracedProduct>,
    index: usize,
}

impl TryFrom<RawCursor> for HistoryCursor {
    type Error = String;

    fn try_from(raw: RawCursor) -> Result<Self, Self::Error> {
        if raw.index >= raw.history.len() {
            return Err(format!(
                "cursor index {} outside history of {} records",
                raw.index,
                raw.history.len()
            ));
        }
        Ok(Self {
            history: raw.history,
            index: raw.index,
        })
    }
}

impl HistoryCursor {
    /// Begin a session at `(registrant, id)`.
    pub fn start<S: ProductSource + ?Sized>(
        source: &S,
        registrant: Address,
        id: ProductId,
    ) -> Result<Self, TraversalError> {
        let first = TracedProduct::fetch(source, registrant, id)?;
        Ok(Self {
            history: vec![first],
            index: 0,
        })
    }

    pub fn current(&self) -> &TracedProduct {
        &self.history[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn history(&self) -> &[TracedProduct] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.history.len()
    }

    /// Step back one record. Returns `false` at the start.
    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Step forward one record. Returns `false` at the end.
    pub fn forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Trace `(provider, id)` and move to it.
    ///
    /// On error the cursor is left unchanged.
    pub fn jump_to<S: ProductSource + ?Sized>(
        &mut self,
        source: &S,
        provider: Address,
        id: ProductId,
    ) -> Result<&TracedProduct, TraversalError> {
        let next = TracedProduct::fetch(source, provider, id)?;
        self.history.truncate(self.index + 1);
        self.history.push(next);
        self.index += 1;
        Ok(self.current())
    }

    /// Move to source `index` of the current record.
    pub fn jump_to_source<S: ProductSource + ?Sized>(
        &mut self,
        source: &S,
        index: usize,
    ) -> Result<&TracedProduct, TraversalError> {
        let sources = &self.current().trace.sources;
        let target = *sources.get(index).ok_or(TraversalError::NoSuchSource {
            index,
            available: sources.len(),
        })?;
        self.jump_to(source, target.provider, target.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prov_ledger::{Ledger, NewProduct, TraceError};
    use prov_sig::{keygen, LinkSigner};

    fn pid(id: u64) -> ProductId {
        ProductId::new(id).unwrap()
    }

    /// p1 and p2 feed p3; p4 is an unrelated product of p2's provider.
    struct Chain {
        ledger: Ledger,
        a: LinkSigner,
        b: LinkSigner,
        c: LinkSigner,
    }

    fn build_chain() -> Chain {
        let creator = keygen().unwrap();
        let (a, b, c) = (keygen().unwrap(), keygen().unwrap(), keygen().unwrap());
        let ledger = Ledger::new(creator.address());
        for signer in [&a, &b, &c] {
            ledger.authorize(&creator.address(), signer.address()).unwrap();
        }

        ledger
            .add_product(&a.address(), NewProduct::new(pid(1), "name1", "time1", "location1"))
            .unwrap();
        ledger
            .add_product(&b.address(), NewProduct::new(pid(2), "name2", "time2", "location2"))
            .unwrap();
        ledger
            .add_product(&b.address(), NewProduct::new(pid(4), "name4", "time4", "location4"))
            .unwrap();

        let p3 = NewProduct::new(pid(3), "name3", "time3", "location3")
            .with_source(a.address(), pid(1), a.sign_link(1, &c.address()).unwrap())
            .with_source(b.address(), pid(2), b.sign_link(2, &c.address()).unwrap());
        ledger.add_product(&c.address(), p3).unwrap();

        Chain { ledger, a, b, c }
    }

    #[test]
    fn test_start_at_product() {
        let chain = build_chain();
        let cursor = HistoryCursor::start(&chain.ledger, chain.c.address(), pid(3)).unwrap();

        assert_eq!(cursor.len(), 1);
        assert_eq!(cursor.current().trace.name, "name3");
        assert!(!cursor.can_go_back());
        assert!(!cursor.can_go_forward());
    }

    #[test]
    fn test_start_at_missing_product() {
        let chain = build_chain();
        let err = HistoryCursor::start(&chain.ledger, chain.a.address(), pid(9)).unwrap_err();
        assert_eq!(
            err,
            TraversalError::Trace(TraceError::IdNotExist(chain.a.address(), pid(9)))
        );
    }

    #[test]
    fn test_jump_appends_at_end() {
        let chain = build_chain();
        let mut cursor = HistoryCursor::start(&chain.ledger, chain.c.address(), pid(3)).unwrap();

        let record = cursor.jump_to_source(&chain.ledger, 0).unwrap();
        assert_eq!(record.registrant, chain.a.address());
        assert_eq!(cursor.len(), 2);
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn test_back_and_forward() {
        let chain = build_chain();
        let mut cursor = HistoryCursor::start(&chain.ledger, chain.c.address(), pid(3)).unwrap();
        cursor.jump_to_source(&chain.ledger, 1).unwrap();

        assert!(cursor.back());
        assert_eq!(cursor.current().id, pid(3));
        assert!(!cursor.back());

        assert!(cursor.forward());
        assert_eq!(cursor.current().id, pid(2));
        assert!(!cursor.forward());
    }

    #[test]
    fn test_jump_after_back_replaces_forward_branch() {
        let chain = build_chain();
        let mut cursor = HistoryCursor::start(&chain.ledger, chain.c.address(), pid(3)).unwrap();
        cursor.jump_to_source(&chain.ledger, 0).unwrap();
        cursor.back();

        cursor.jump_to_source(&chain.ledger, 1).unwrap();
        assert_eq!(cursor.len(), 2);
        assert_eq!(cursor.index(), 1);
        assert_eq!(cursor.current().registrant, chain.b.address());
        assert!(!cursor.can_go_forward());
    }

    #[test]
    fn test_jump_from_middle_truncates_longer_history() {
        let chain = build_chain();
        let mut cursor = HistoryCursor::start(&chain.ledger, chain.c.address(), pid(3)).unwrap();
        cursor.jump_to_source(&chain.ledger, 0).unwrap();
        cursor.jump_to(&chain.ledger, chain.b.address(), pid(4)).unwrap();
        assert_eq!(cursor.len(), 3);

        cursor.back();
        cursor.back();
        cursor.jump_to_source(&chain.ledger, 1).unwrap();

        let ids: Vec<_> = cursor.history().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![pid(3), pid(2)]);
    }

    #[test]
    fn test_failed_jump_leaves_cursor_unchanged() {
        let chain = build_chain();
        let mut cursor = HistoryCursor::start(&chain.ledger, chain.c.address(), pid(3)).unwrap();
        cursor.jump_to_source(&chain.ledger, 0).unwrap();
        cursor.back();
        let before = cursor.clone();

        assert!(cursor.jump_to(&chain.ledger, chain.c.address(), pid(99)).is_err());
        assert_eq!(cursor, before);

        assert_eq!(
            cursor.jump_to_source(&chain.ledger, 5).unwrap_err(),
            TraversalError::NoSuchSource {
                index: 5,
                available: 2
            }
        );
        assert_eq!(cursor, before);
    }

    #[test]
    fn test_cursor_serde_round_trip() {
        let chain = build_chain();
        let mut cursor = HistoryCursor::start(&chain.ledger, chain.c.address(), pid(3)).unwrap();
        cursor.jump_to_source(&chain.ledger, 0).unwrap();

        let json = serde_json::to_string(&cursor).unwrap();
        let restored: HistoryCursor = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cursor);
    }

    #[test]
    fn test_cursor_deserialize_rejects_bad_index() {
        let chain = build_chain();
        let cursor = HistoryCursor::start(&chain.ledger, chain.c.address(), pid(3)).unwrap();

        let mut value = serde_json::to_value(&cursor).unwrap();
        value["index"] = serde_json::json!(4);
        assert!(serde_json::from_value::<HistoryCursor>(value).is_err());
    }
}
