//! Product storage and registration rules.

use crate::error::{AddProductError, AuditError, TraceError};
use crate::event::LedgerEvent;
use crate::registry::AuthorizationRegistry;
use crate::types::{NewProduct, Product, ProductId, ProductKey, ProductTrace, SourceLink};
use prov_sig::Address;
use std::collections::BTreeMap;

/// All registered products, keyed by `(registrant, id)`.
///
/// The store only grows: entries are inserted once and never replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductLedger {
    products: BTreeMap<ProductKey, Product>,
}

impl ProductLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a product registered by `caller`.
    ///
    /// Checks run in a fixed order and the first failure is returned. Sources
    /// are checked one index at a time in ascending order; nothing is written
    /// unless every check passes.
    pub fn add_product(
        &mut self,
        registry: &AuthorizationRegistry,
        caller: &Address,
        product: NewProduct,
    ) -> Result<LedgerEvent, AddProductError> {
        if !registry.is_authorized(caller) {
            return Err(AddProductError::NotAuthorized { caller: *caller });
        }

        let key = ProductKey::new(*caller, product.id);
        if self.products.contains_key(&key) {
            return Err(AddProductError::IdAlreadyUsed(product.id));
        }

        // Only the name is required; time and location may be empty.
        if product.name.is_empty() {
            return Err(AddProductError::InformationIsEmpty);
        }

        let NewProduct {
            id,
            name,
            time,
            location,
            source_providers,
            source_ids,
            signatures,
        } = product;

        if source_providers.len() != source_ids.len() || source_ids.len() != signatures.len() {
            return Err(AddProductError::UnequalLength {
                providers: source_providers.len(),
                ids: source_ids.len(),
                signatures: signatures.len(),
            });
        }

        let mut sources = Vec::with_capacity(source_providers.len());
        for ((provider, source_id), signature) in
            source_providers.into_iter().zip(source_ids).zip(signatures)
        {
            self.check_source(registry, caller, &provider, source_id, &signature)?;
            sources.push(SourceLink {
                provider,
                id: source_id,
                signature,
            });
        }

        self.products.insert(
            key,
            Product {
                registrant: *caller,
                id,
                name,
                time,
                location,
                sources,
            },
        );

        Ok(LedgerEvent::ProductAdded {
            registrant: *caller,
            id,
        })
    }

    fn check_source(
        &self,
        registry: &AuthorizationRegistry,
        consumer: &Address,
        provider: &Address,
        source_id: ProductId,
        signature: &[u8],
    ) -> Result<(), AddProductError> {
        if !registry.is_authorized(provider) {
            return Err(AddProductError::ProviderNotAuthorized(*provider));
        }
        if !self.contains(provider, source_id) {
            return Err(AddProductError::IdNotExist(*provider, source_id));
        }
        if !prov_sig::verify(provider, source_id.get(), consumer, signature) {
            return Err(AddProductError::ValidationFail(*provider, source_id));
        }
        Ok(())
    }

    /// Metadata and first-level source references of one product.
    pub fn trace_product(&self, registrant: &Address, id: ProductId) -> Result<ProductTrace, TraceError> {
        self.get(registrant, id)
            .map(Product::trace)
            .ok_or(TraceError::IdNotExist(*registrant, id))
    }

    pub fn get(&self, registrant: &Address, id: ProductId) -> Option<&Product> {
        self.products.get(&ProductKey::new(*registrant, id))
    }

    pub fn contains(&self, registrant: &Address, id: ProductId) -> bool {
        self.products.contains_key(&ProductKey::new(*registrant, id))
    }

    /// Products in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Insert a product restored from a snapshot. Returns `false` if the key
    /// was already taken, leaving the existing record in place.
    pub(crate) fn restore(&mut self, product: Product) -> bool {
        let key = product.key();
        if self.products.contains_key(&key) {
            return false;
        }
        self.products.insert(key, product);
        true
    }

    /// Re-check every stored product against the registration rules that
    /// still apply after the fact. Returns the number of links checked.
    pub(crate) fn audit(&self, registry: &AuthorizationRegistry) -> Result<usize, AuditError> {
        let mut links = 0;
        for product in self.products.values() {
            if !registry.is_authorized(&product.registrant) {
                return Err(AuditError::RegistrantNotAuthorized {
                    registrant: product.registrant,
                    id: product.id,
                });
            }
            for link in &product.sources {
                if !registry.is_authorized(&link.provider) {
                    return Err(AuditError::ProviderNotAuthorized {
                        registrant: product.registrant,
                        id: product.id,
                        provider: link.provider,
                    });
                }
                if !self.contains(&link.provider, link.id) {
                    return Err(AuditError::MissingSource {
                        registrant: product.registrant,
                        id: product.id,
                        provider: link.provider,
                        source_id: link.id,
                    });
                }
                if !prov_sig::verify(&link.provider, link.id.get(), &product.registrant, &link.signature) {
                    return Err(AuditError::InvalidSignature {
                        registrant: product.registrant,
                        id: product.id,
                        provider: link.provider,
                        source_id: link.id,
                    });
                }
                links += 1;
            }
        }
        Ok(links)
    }
}
