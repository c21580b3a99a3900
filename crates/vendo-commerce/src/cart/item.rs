//! Line item types.

use crate::catalog::VariantRecord;
use crate::ids::{ClientId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The identity of a purchasable unit: a product in a specific color and
/// size. A cart holds at most one line per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantKey {
    /// The product.
    pub product: ProductId,
    /// Color choice.
    pub color: String,
    /// Size choice.
    pub size: String,
}

impl VariantKey {
    /// Create a variant key.
    pub fn new(
        product: impl Into<ProductId>,
        color: impl Into<String>,
        size: impl Into<String>,
    ) -> Self {
        Self {
            product: product.into(),
            color: color.into(),
            size: size.into(),
        }
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.product, self.color, self.size)
    }
}

/// A line item in the cart.
///
/// `unit_price` and `count_in_stock` are snapshots captured from the
/// catalog when the line was created; `count_in_stock` is the quantity
/// ceiling for all later merges and updates of this line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Client-facing identifier, distinguishing entries added at
    /// different times.
    pub client_id: ClientId,
    /// The product.
    pub product: ProductId,
    /// Product name (denormalized for display).
    pub product_name: String,
    /// Color choice.
    pub color: String,
    /// Size choice.
    pub size: String,
    /// Quantity (positive).
    pub quantity: i64,
    /// Unit price snapshot.
    pub unit_price: Money,
    /// Stock ceiling snapshot.
    pub count_in_stock: i64,
}

impl LineItem {
    /// Create a line item from a catalog record.
    pub fn new(key: VariantKey, record: &VariantRecord, quantity: i64) -> Self {
        Self {
            client_id: ClientId::generate(),
            product: key.product,
            product_name: record.product_name.clone(),
            color: key.color,
            size: key.size,
            quantity,
            unit_price: record.unit_price,
            count_in_stock: record.count_in_stock,
        }
    }

    /// Whether this line is the entry for `key`.
    pub fn matches(&self, key: &VariantKey) -> bool {
        self.product == key.product && self.color == key.color && self.size == key.size
    }

    /// The variant key of this line.
    pub fn key(&self) -> VariantKey {
        VariantKey {
            product: self.product.clone(),
            color: self.color.clone(),
            size: self.size.clone(),
        }
    }

    /// Line total (unit price times quantity), or `None` on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.try_multiply(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn record(cents: i64, stock: i64) -> VariantRecord {
        VariantRecord {
            product_name: "Test Product".to_string(),
            unit_price: Money::new(cents, Currency::USD),
            count_in_stock: stock,
        }
    }

    #[test]
    fn test_matches_key() {
        let key = VariantKey::new("prod-1", "red", "M");
        let item = LineItem::new(key.clone(), &record(1000, 5), 2);

        assert!(item.matches(&key));
        assert!(!item.matches(&VariantKey::new("prod-1", "red", "L")));
        assert_eq!(item.key(), key);
    }

    #[test]
    fn test_line_total() {
        let item = LineItem::new(VariantKey::new("prod-1", "red", "M"), &record(1050, 9), 3);
        assert_eq!(item.line_total().unwrap().amount_cents, 3150);
    }

    #[test]
    fn test_variant_key_display() {
        let key = VariantKey::new("prod-1", "red", "M");
        assert_eq!(key.to_string(), "prod-1/red/M");
    }
}
