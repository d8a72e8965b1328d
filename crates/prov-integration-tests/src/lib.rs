//! Cross-crate scenarios for the provenance ledger. See `tests/`.
