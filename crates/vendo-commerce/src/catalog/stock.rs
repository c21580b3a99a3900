//! Stock and price lookup.

use crate::cart::VariantKey;
use crate::error::CommerceError;
use crate::money::Money;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current price and stock for a variant, as returned by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariantRecord {
    /// Product name (denormalized for display).
    pub product_name: String,
    /// Current unit price.
    pub unit_price: Money,
    /// Units currently in stock.
    pub count_in_stock: i64,
}

impl VariantRecord {
    /// Check if a specific quantity is available.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        quantity <= self.count_in_stock
    }
}

/// Stock/price lookup service.
///
/// The backing service is external (a product database); the call may
/// fail or be slow.
#[async_trait]
pub trait StockLookup: Send + Sync {
    /// Resolve the current record for a variant.
    ///
    /// Fails with `VariantNotFound` if the variant does not exist.
    async fn lookup(&self, key: &VariantKey) -> Result<VariantRecord, CommerceError>;
}

/// In-memory catalog for development and tests.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    variants: HashMap<VariantKey, VariantRecord>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a variant.
    pub fn insert(&mut self, key: VariantKey, record: VariantRecord) {
        self.variants.insert(key, record);
    }
}

#[async_trait]
impl StockLookup for MemoryCatalog {
    async fn lookup(&self, key: &VariantKey) -> Result<VariantRecord, CommerceError> {
        self.variants
            .get(key)
            .cloned()
            .ok_or_else(|| CommerceError::VariantNotFound(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[tokio::test]
    async fn test_memory_catalog_lookup() {
        let mut catalog = MemoryCatalog::new();
        let key = VariantKey::new("prod-1", "red", "M");
        catalog.insert(
            key.clone(),
            VariantRecord {
                product_name: "Shirt".to_string(),
                unit_price: Money::new(1000, Currency::USD),
                count_in_stock: 5,
            },
        );

        let record = catalog.lookup(&key).await.unwrap();
        assert_eq!(record.count_in_stock, 5);
        assert!(record.can_fulfill(5));
        assert!(!record.can_fulfill(6));
    }

    #[tokio::test]
    async fn test_memory_catalog_missing_variant() {
        let catalog = MemoryCatalog::new();
        let err = catalog
            .lookup(&VariantKey::new("prod-9", "red", "M"))
            .await
            .unwrap_err();
        assert!(matches!(err, CommerceError::VariantNotFound(_)));
    }
}
