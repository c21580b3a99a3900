//! Cart aggregate pricing.

use crate::cart::LineItem;
use crate::delivery::DeliveryRates;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A consistent aggregate snapshot for a cart.
///
/// `None` shipping/tax means the value is not yet computable (no address
/// or no items), which the UI must render differently from a computed
/// zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Items subtotal.
    pub items_price: Money,
    /// Shipping cost for the selected delivery option.
    pub shipping_price: Option<Money>,
    /// Tax amount for the selected delivery option.
    pub tax_price: Option<Money>,
    /// Grand total.
    pub total_price: Money,
}

impl CartTotals {
    /// Totals when no delivery quote applies: shipping and tax stay
    /// undefined and the total is the bare subtotal.
    pub fn offline(items_price: Money) -> Self {
        Self {
            items_price,
            shipping_price: None,
            tax_price: None,
            total_price: items_price,
        }
    }

    /// Totals for a quoted delivery selection:
    /// subtotal + shipping + tax.
    pub fn with_rates(items_price: Money, rates: &DeliveryRates) -> Result<Self, CommerceError> {
        let total_price = items_price
            .try_add(&rates.shipping_price)
            .and_then(|t| t.try_add(&rates.tax_amount))
            .ok_or(CommerceError::Overflow)?;
        Ok(Self {
            items_price,
            shipping_price: Some(rates.shipping_price),
            tax_price: Some(rates.tax_amount),
            total_price,
        })
    }
}

/// Sum of unit price times quantity over all lines, with checked
/// arithmetic.
pub fn items_subtotal(items: &[LineItem], currency: Currency) -> Result<Money, CommerceError> {
    let mut subtotal = Money::zero(currency);
    for item in items {
        let line = item.line_total().ok_or(CommerceError::Overflow)?;
        subtotal = subtotal.try_add(&line).ok_or(CommerceError::Overflow)?;
    }
    Ok(subtotal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::VariantKey;
    use crate::catalog::VariantRecord;

    fn line(cents: i64, quantity: i64) -> LineItem {
        let record = VariantRecord {
            product_name: "P".to_string(),
            unit_price: Money::new(cents, Currency::USD),
            count_in_stock: i64::MAX,
        };
        LineItem::new(VariantKey::new("prod-1", "red", "M"), &record, quantity)
    }

    #[test]
    fn test_items_subtotal() {
        let items = vec![line(1000, 2), line(2000, 1)];
        let subtotal = items_subtotal(&items, Currency::USD).unwrap();
        assert_eq!(subtotal.amount_cents, 4000);
    }

    #[test]
    fn test_items_subtotal_empty() {
        let subtotal = items_subtotal(&[], Currency::USD).unwrap();
        assert!(subtotal.is_zero());
    }

    #[test]
    fn test_items_subtotal_overflow() {
        let items = vec![line(i64::MAX, 2)];
        assert!(matches!(
            items_subtotal(&items, Currency::USD),
            Err(CommerceError::Overflow)
        ));
    }

    #[test]
    fn test_offline_totals() {
        let totals = CartTotals::offline(Money::new(2000, Currency::USD));
        assert!(totals.shipping_price.is_none());
        assert!(totals.tax_price.is_none());
        assert_eq!(totals.total_price.amount_cents, 2000);
    }

    #[test]
    fn test_totals_with_rates() {
        let rates = DeliveryRates {
            shipping_price: Money::new(500, Currency::USD),
            tax_amount: Money::new(160, Currency::USD),
        };
        let totals = CartTotals::with_rates(Money::new(2000, Currency::USD), &rates).unwrap();
        assert_eq!(totals.total_price.amount_cents, 2660);
        assert_eq!(totals.shipping_price.unwrap().amount_cents, 500);
        assert_eq!(totals.tax_price.unwrap().amount_cents, 160);
    }
}
