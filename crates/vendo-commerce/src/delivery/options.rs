//! Delivery option types.

use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A configured delivery option: a named speed with a flat shipping
/// price, an optional free-shipping subtotal threshold, and the tax rate
/// applied to orders shipped with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryOption {
    /// Display name (e.g., "Next 3 Days").
    pub name: String,
    /// Days from order to delivery.
    pub days_to_deliver: i64,
    /// Flat shipping price.
    pub shipping_price: Money,
    /// Items subtotal at which shipping becomes free, if offered.
    pub free_shipping_min: Option<Money>,
    /// Tax rate as a percentage of the items subtotal.
    pub tax_rate: f64,
}

impl DeliveryOption {
    /// Create an option with no free-shipping threshold.
    pub fn new(
        name: impl Into<String>,
        days_to_deliver: i64,
        shipping_price: Money,
        tax_rate: f64,
    ) -> Self {
        Self {
            name: name.into(),
            days_to_deliver,
            shipping_price,
            free_shipping_min: None,
            tax_rate,
        }
    }

    /// Offer free shipping at or above `min` items subtotal.
    pub fn with_free_shipping_min(mut self, min: Money) -> Self {
        self.free_shipping_min = Some(min);
        self
    }

    /// Shipping price for a given items subtotal, applying the
    /// free-shipping threshold when configured.
    pub fn shipping_for(&self, subtotal: &Money) -> Money {
        match &self.free_shipping_min {
            Some(min)
                if subtotal.currency == min.currency
                    && subtotal.amount_cents >= min.amount_cents =>
            {
                Money::zero(self.shipping_price.currency)
            }
            _ => self.shipping_price,
        }
    }
}

/// A delivery option priced for a concrete cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuotedOption {
    /// Display name of the option.
    pub name: String,
    /// Shipping cost for this cart.
    pub shipping_price: Money,
    /// Tax amount for this cart.
    pub tax_amount: Money,
    /// Estimated delivery date.
    pub estimated_date: DateTime<Utc>,
}

/// Shipping and tax for the chosen delivery option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryRates {
    /// Shipping cost.
    pub shipping_price: Money,
    /// Tax amount.
    pub tax_amount: Money,
}

/// Result of a delivery estimate: all options priced for the cart, and
/// the rates of the chosen one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryQuote {
    /// All offered options, priced.
    pub options: Vec<QuotedOption>,
    /// Index of the chosen option within `options`.
    pub chosen_index: usize,
    /// Rates for the chosen option.
    pub chosen: DeliveryRates,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_shipping_without_threshold() {
        let option = DeliveryOption::new(
            "Tomorrow",
            1,
            Money::new(1290, Currency::USD),
            15.0,
        );
        let subtotal = Money::new(100_000, Currency::USD);
        assert_eq!(option.shipping_for(&subtotal).amount_cents, 1290);
    }

    #[test]
    fn test_free_shipping_threshold() {
        let option = DeliveryOption::new("Next 5 Days", 5, Money::new(490, Currency::USD), 15.0)
            .with_free_shipping_min(Money::new(3500, Currency::USD));

        let below = Money::new(3499, Currency::USD);
        assert_eq!(option.shipping_for(&below).amount_cents, 490);

        let at = Money::new(3500, Currency::USD);
        assert!(option.shipping_for(&at).is_zero());
    }
}
