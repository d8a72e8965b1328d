use prov_ledger::{Address, Ledger, ProductId, ProductLedger, ProductTrace, TraceError};

/// Read access to traced products.
pub trait ProductSource {
    fn trace_product(&self, registrant: &Address, id: ProductId) -> Result<ProductTrace, TraceError>;
}

impl ProductSource for Ledger {
    fn trace_product(&self, registrant: &Address, id: ProductId) -> Result<ProductTrace, TraceError> {
        Ledger::trace_product(self, registrant, id)
    }
}

impl ProductSource for ProductLedger {
    fn trace_product(&self, registrant: &Address, id: ProductId) -> Result<ProductTrace, TraceError> {
        ProductLedger::trace_product(self, registrant, id)
    }
}
