//! Full upstream expansion of a product.

use crate::cursor::TracedProduct;
use crate::source::ProductSource;
use crate::TraversalError;
use prov_ledger::{Address, ProductId};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// One product reached while walking upstream, with its distance from the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestryNode {
    pub depth: usize,
    pub product: TracedProduct,
}

/// Breadth-first walk from `(registrant, id)` through every source link.
///
/// The root comes first at depth 0. A product reachable along several paths
/// is reported once, at its shallowest depth. Sources must exist before a
/// product can cite them, so the link graph has no cycles.
pub fn ancestry<S: ProductSource + ?Sized>(
    source: &S,
    registrant: Address,
    id: ProductId,
) -> Result<Vec<AncestryNode>, TraversalError> {
    let mut seen: HashSet<(Address, ProductId)> = HashSet::new();
    let mut queue = VecDeque::new();
    let mut nodes = Vec::new();

    seen.insert((registrant, id));
    queue.push_back((registrant, id, 0usize));

    while let Some((registrant, id, depth)) = queue.pop_front() {
        let product = TracedProduct::fetch(source, registrant, id)?;
        for link in &product.trace.sources {
            if seen.insert((link.provider, link.id)) {
                queue.push_back((link.provider, link.id, depth + 1));
            }
        }
        nodes.push(AncestryNode { depth, product });
    }

    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prov_ledger::{Ledger, NewProduct, TraceError};
    use prov_sig::keygen;

    fn pid(id: u64) -> ProductId {
        ProductId::new(id).unwrap()
    }

    #[test]
    fn test_single_product_has_only_root() {
        let creator = keygen().unwrap();
        let a = keygen().unwrap();
        let ledger = Ledger::new(creator.address());
        ledger.authorize(&creator.address(), a.address()).unwrap();
        ledger
            .add_product(&a.address(), NewProduct::new(pid(1), "n", "t", "l"))
            .unwrap();

        let nodes = ancestry(&ledger, a.address(), pid(1)).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].depth, 0);
    }

    #[test]
    fn test_diamond_reports_shared_ancestor_once() {
        // root <- (left, right) <- base
        let creator = keygen().unwrap();
        let s = keygen().unwrap();
        let ledger = Ledger::new(creator.address());
        ledger.authorize(&creator.address(), s.address()).unwrap();
        let me = s.address();

        ledger.add_product(&me, NewProduct::new(pid(1), "base", "", "")).unwrap();
        for id in [2, 3] {
            let product = NewProduct::new(pid(id), format!("mid{id}"), "", "")
                .with_source(me, pid(1), s.sign_link(1, &me).unwrap());
            ledger.add_product(&me, product).unwrap();
        }
        let root = NewProduct::new(pid(4), "root", "", "")
            .with_source(me, pid(2), s.sign_link(2, &me).unwrap())
            .with_source(me, pid(3), s.sign_link(3, &me).unwrap());
        ledger.add_product(&me, root).unwrap();

        let nodes = ancestry(&ledger, me, pid(4)).unwrap();
        let summary: Vec<_> = nodes.iter().map(|n| (n.product.id.get(), n.depth)).collect();
        assert_eq!(summary, vec![(4, 0), (2, 1), (3, 1), (1, 2)]);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let creator = keygen().unwrap();
        let ledger = Ledger::new(creator.address());
        let who = keygen().unwrap().address();

        assert_eq!(
            ancestry(&ledger, who, pid(1)).unwrap_err(),
            TraversalError::Trace(TraceError::IdNotExist(who, pid(1)))
        );
    }
}
