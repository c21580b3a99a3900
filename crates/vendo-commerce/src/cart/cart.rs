//! Cart state and line mutations.

use crate::cart::{CartTotals, LineItem, VariantKey};
use crate::checkout::{PaymentMethod, ShippingAddress};
use crate::delivery::QuotedOption;
use crate::error::CommerceError;
use crate::ids::ClientId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A shopping cart for one session.
///
/// Lines keep insertion order. The four aggregate price fields are
/// derived from (items, shipping address, selected delivery option) and
/// are only written together, via [`Cart::apply_totals`]; `None`
/// shipping/tax means "not yet computable", not zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Items in the cart, in insertion order.
    pub items: Vec<LineItem>,
    /// Items subtotal.
    pub items_price: Money,
    /// Shipping cost for the selected delivery option.
    pub shipping_price: Option<Money>,
    /// Tax amount for the selected delivery option.
    pub tax_price: Option<Money>,
    /// Grand total.
    pub total_price: Money,
    /// Selected payment method.
    pub payment_method: Option<PaymentMethod>,
    /// Destination address.
    pub shipping_address: Option<ShippingAddress>,
    /// Index into `delivery_options` of the selected option.
    pub delivery_date_index: Option<usize>,
    /// Delivery options from the last successful estimate.
    pub delivery_options: Vec<QuotedOption>,
    /// Cart currency.
    pub currency: Currency,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        let now = current_timestamp();
        Self {
            items: Vec::new(),
            items_price: Money::zero(currency),
            shipping_price: None,
            tax_price: None,
            total_price: Money::zero(currency),
            payment_method: None,
            shipping_address: None,
            delivery_date_index: None,
            delivery_options: Vec::new(),
            currency,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Get the line for a variant key.
    pub fn find_line(&self, key: &VariantKey) -> Option<&LineItem> {
        self.items.iter().find(|i| i.matches(key))
    }

    /// Get a line by its client-facing id.
    pub fn find_line_by_client_id(&self, id: &ClientId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.client_id == id)
    }

    /// Merge `quantity` into the existing line for `key`, if any.
    ///
    /// Returns `Ok(None)` when no line matches. Fails with `OutOfStock`
    /// if the combined quantity would exceed the line's stock ceiling,
    /// leaving the quantity unchanged.
    pub fn merge_line(
        &mut self,
        key: &VariantKey,
        quantity: i64,
    ) -> Result<Option<ClientId>, CommerceError> {
        let Some(existing) = self.items.iter_mut().find(|i| i.matches(key)) else {
            return Ok(None);
        };

        let requested = existing
            .quantity
            .checked_add(quantity)
            .ok_or(CommerceError::Overflow)?;
        if requested > existing.count_in_stock {
            return Err(CommerceError::OutOfStock {
                variant: key.to_string(),
                requested,
                available: existing.count_in_stock,
            });
        }

        existing.quantity = requested;
        let id = existing.client_id.clone();
        self.touch();
        Ok(Some(id))
    }

    /// Append a new line at the end of the sequence.
    ///
    /// Fails with `OutOfStock` if the line's quantity exceeds its stock
    /// ceiling, and `CurrencyMismatch` if its price is not in the cart
    /// currency.
    pub fn insert_line(&mut self, item: LineItem) -> Result<ClientId, CommerceError> {
        if item.unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: item.unit_price.currency.code().to_string(),
            });
        }
        if item.quantity > item.count_in_stock {
            return Err(CommerceError::OutOfStock {
                variant: item.key().to_string(),
                requested: item.quantity,
                available: item.count_in_stock,
            });
        }

        let id = item.client_id.clone();
        self.items.push(item);
        self.touch();
        Ok(id)
    }

    /// Set the quantity of the line for `key`.
    ///
    /// Returns `Ok(false)` without touching anything when no line
    /// matches; the caller may have raced a concurrent removal. Fails
    /// with `OutOfStock` if the quantity exceeds the line's stock
    /// ceiling.
    pub fn set_line_quantity(
        &mut self,
        key: &VariantKey,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        let Some(existing) = self.items.iter_mut().find(|i| i.matches(key)) else {
            return Ok(false);
        };

        if quantity > existing.count_in_stock {
            return Err(CommerceError::OutOfStock {
                variant: key.to_string(),
                requested: quantity,
                available: existing.count_in_stock,
            });
        }

        existing.quantity = quantity;
        self.touch();
        Ok(true)
    }

    /// Remove the line for `key`. Returns whether a line was removed.
    pub fn remove_line(&mut self, key: &VariantKey) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| !i.matches(key));
        let removed = self.items.len() < len_before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Remove all lines.
    pub fn clear_lines(&mut self) {
        self.items.clear();
        self.touch();
    }

    /// Write a consistent aggregate snapshot into the cart.
    pub fn apply_totals(&mut self, totals: CartTotals) {
        self.items_price = totals.items_price;
        self.shipping_price = totals.shipping_price;
        self.tax_price = totals.tax_price;
        self.total_price = totals.total_price;
    }

    /// Bump the update timestamp.
    pub fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::USD)
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VariantRecord;

    fn key(product: &str, color: &str, size: &str) -> VariantKey {
        VariantKey::new(product, color, size)
    }

    fn line(k: &VariantKey, cents: i64, stock: i64, quantity: i64) -> LineItem {
        let record = VariantRecord {
            product_name: format!("Product {}", k.product),
            unit_price: Money::new(cents, Currency::USD),
            count_in_stock: stock,
        };
        LineItem::new(k.clone(), &record, quantity)
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = Cart::default();
        assert!(cart.is_empty());
        assert!(cart.shipping_price.is_none());
        assert!(cart.tax_price.is_none());
        assert!(cart.total_price.is_zero());
    }

    #[test]
    fn test_insert_then_merge() {
        let mut cart = Cart::default();
        let k = key("prod-1", "red", "M");

        let id = cart.insert_line(line(&k, 1000, 5, 2)).unwrap();
        assert_eq!(cart.item_count(), 2);

        let merged = cart.merge_line(&k, 1).unwrap();
        assert_eq!(merged, Some(id));
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_merge_respects_stock_ceiling() {
        let mut cart = Cart::default();
        let k = key("prod-1", "red", "M");
        cart.insert_line(line(&k, 1000, 5, 2)).unwrap();

        let err = cart.merge_line(&k, 4).unwrap_err();
        assert!(matches!(
            err,
            CommerceError::OutOfStock {
                requested: 6,
                available: 5,
                ..
            }
        ));
        // quantity unchanged from before the failing call
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_merge_absent_returns_none() {
        let mut cart = Cart::default();
        let merged = cart.merge_line(&key("prod-1", "red", "M"), 1).unwrap();
        assert_eq!(merged, None);
    }

    #[test]
    fn test_insert_over_stock_rejected() {
        let mut cart = Cart::default();
        let k = key("prod-1", "red", "M");
        let err = cart.insert_line(line(&k, 1000, 3, 4)).unwrap_err();
        assert!(matches!(err, CommerceError::OutOfStock { .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_insert_currency_mismatch_rejected() {
        let mut cart = Cart::default();
        let k = key("prod-1", "red", "M");
        let record = VariantRecord {
            product_name: "P".to_string(),
            unit_price: Money::new(1000, Currency::EUR),
            count_in_stock: 5,
        };
        let err = cart.insert_line(LineItem::new(k, &record, 1)).unwrap_err();
        assert!(matches!(err, CommerceError::CurrencyMismatch { .. }));
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::default();
        let k1 = key("prod-1", "red", "M");
        let k2 = key("prod-2", "blue", "S");
        let k3 = key("prod-1", "red", "L");
        cart.insert_line(line(&k1, 1000, 9, 1)).unwrap();
        cart.insert_line(line(&k2, 2000, 9, 1)).unwrap();
        cart.insert_line(line(&k3, 1000, 9, 1)).unwrap();

        // merging does not reorder
        cart.merge_line(&k1, 1).unwrap();

        let keys: Vec<VariantKey> = cart.items.iter().map(|i| i.key()).collect();
        assert_eq!(keys, vec![k1, k2, k3]);
    }

    #[test]
    fn test_set_line_quantity() {
        let mut cart = Cart::default();
        let k = key("prod-1", "red", "M");
        cart.insert_line(line(&k, 1000, 5, 2)).unwrap();

        assert!(cart.set_line_quantity(&k, 4).unwrap());
        assert_eq!(cart.item_count(), 4);

        // absent key is a silent no-op
        assert!(!cart.set_line_quantity(&key("other", "x", "y"), 1).unwrap());
    }

    #[test]
    fn test_set_line_quantity_over_stock() {
        let mut cart = Cart::default();
        let k = key("prod-1", "red", "M");
        cart.insert_line(line(&k, 1000, 5, 2)).unwrap();

        let err = cart.set_line_quantity(&k, 6).unwrap_err();
        assert!(matches!(err, CommerceError::OutOfStock { .. }));
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_remove_line_twice() {
        let mut cart = Cart::default();
        let k = key("prod-1", "red", "M");
        cart.insert_line(line(&k, 1000, 5, 1)).unwrap();

        assert!(cart.remove_line(&k));
        assert!(!cart.remove_line(&k));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_find_line_by_client_id() {
        let mut cart = Cart::default();
        let k = key("prod-1", "red", "M");
        let id = cart.insert_line(line(&k, 1000, 5, 1)).unwrap();

        assert!(cart.find_line_by_client_id(&id).is_some());
        assert!(cart
            .find_line_by_client_id(&ClientId::new("missing"))
            .is_none());
    }
}
