//! Delivery estimator seam and the table-driven default.

use crate::cart::LineItem;
use crate::checkout::ShippingAddress;
use crate::delivery::{DeliveryOption, DeliveryQuote, DeliveryRates, QuotedOption};
use crate::money::Money;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use thiserror::Error;

/// Errors from a delivery estimate.
#[derive(Error, Debug)]
pub enum EstimateError {
    /// The estimator backend failed or timed out.
    #[error("estimator unavailable: {0}")]
    Unavailable(String),

    /// The requested option index is outside the offered list.
    #[error("no delivery option at index {index} (have {count})")]
    UnknownOption { index: usize, count: usize },

    /// Money arithmetic overflowed while quoting.
    #[error("arithmetic overflow while quoting")]
    Overflow,
}

/// Delivery estimator service.
///
/// Treated as a potentially-latent external call (network or database
/// round trip); callers must reject the surrounding mutation when it
/// fails.
#[async_trait]
pub trait DeliveryEstimator: Send + Sync {
    /// Quote delivery options for an item set and destination.
    ///
    /// `selected_index` is the caller's prior selection; when `None` the
    /// estimator picks its default option.
    async fn estimate(
        &self,
        items: &[LineItem],
        address: Option<&ShippingAddress>,
        selected_index: Option<usize>,
    ) -> Result<DeliveryQuote, EstimateError>;
}

/// Table-driven estimator over a fixed list of delivery options.
///
/// The default selection is the last (cheapest) option in the table.
#[derive(Debug, Clone)]
pub struct RateTable {
    options: Vec<DeliveryOption>,
}

impl RateTable {
    /// Create an estimator over the given options.
    pub fn new(options: Vec<DeliveryOption>) -> Self {
        Self { options }
    }

    /// The standard storefront table: tomorrow at a premium, three-day,
    /// and five-day with free shipping over $35, all taxed at 15%.
    pub fn standard() -> Self {
        use crate::money::Currency::USD;
        Self::new(vec![
            DeliveryOption::new("Tomorrow", 1, Money::new(1290, USD), 15.0),
            DeliveryOption::new("Next 3 Days", 3, Money::new(690, USD), 15.0),
            DeliveryOption::new("Next 5 Days", 5, Money::new(490, USD), 15.0)
                .with_free_shipping_min(Money::new(3500, USD)),
        ])
    }

    /// The configured options.
    pub fn options(&self) -> &[DeliveryOption] {
        &self.options
    }
}

#[async_trait]
impl DeliveryEstimator for RateTable {
    async fn estimate(
        &self,
        items: &[LineItem],
        _address: Option<&ShippingAddress>,
        selected_index: Option<usize>,
    ) -> Result<DeliveryQuote, EstimateError> {
        if self.options.is_empty() {
            return Err(EstimateError::Unavailable(
                "no delivery options configured".to_string(),
            ));
        }

        let chosen_index = selected_index.unwrap_or(self.options.len() - 1);
        if chosen_index >= self.options.len() {
            return Err(EstimateError::UnknownOption {
                index: chosen_index,
                count: self.options.len(),
            });
        }

        let currency = items
            .first()
            .map(|i| i.unit_price.currency)
            .unwrap_or_default();
        let mut subtotal = Money::zero(currency);
        for item in items {
            let line = item.line_total().ok_or(EstimateError::Overflow)?;
            subtotal = subtotal.try_add(&line).ok_or(EstimateError::Overflow)?;
        }

        let now = Utc::now();
        let options: Vec<QuotedOption> = self
            .options
            .iter()
            .map(|option| QuotedOption {
                name: option.name.clone(),
                shipping_price: option.shipping_for(&subtotal),
                tax_amount: subtotal.percentage(option.tax_rate),
                estimated_date: now + Duration::days(option.days_to_deliver),
            })
            .collect();

        let chosen = DeliveryRates {
            shipping_price: options[chosen_index].shipping_price,
            tax_amount: options[chosen_index].tax_amount,
        };

        Ok(DeliveryQuote {
            options,
            chosen_index,
            chosen,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::VariantKey;
    use crate::catalog::VariantRecord;
    use crate::money::Currency;

    fn items(cents: i64, quantity: i64) -> Vec<LineItem> {
        let record = VariantRecord {
            product_name: "P".to_string(),
            unit_price: Money::new(cents, Currency::USD),
            count_in_stock: i64::MAX,
        };
        vec![LineItem::new(
            VariantKey::new("prod-1", "red", "M"),
            &record,
            quantity,
        )]
    }

    #[tokio::test]
    async fn test_defaults_to_last_option() {
        let table = RateTable::standard();
        let quote = table.estimate(&items(1000, 1), None, None).await.unwrap();

        assert_eq!(quote.options.len(), 3);
        assert_eq!(quote.chosen_index, 2);
        assert_eq!(quote.chosen.shipping_price.amount_cents, 490);
        // 15% of $10.00
        assert_eq!(quote.chosen.tax_amount.amount_cents, 150);
    }

    #[tokio::test]
    async fn test_selected_index_is_honored() {
        let table = RateTable::standard();
        let quote = table
            .estimate(&items(1000, 1), None, Some(0))
            .await
            .unwrap();

        assert_eq!(quote.chosen_index, 0);
        assert_eq!(quote.chosen.shipping_price.amount_cents, 1290);
    }

    #[tokio::test]
    async fn test_free_shipping_applies_to_quote() {
        let table = RateTable::standard();
        // $40.00 subtotal clears the $35.00 threshold on the last option
        let quote = table.estimate(&items(2000, 2), None, None).await.unwrap();

        assert!(quote.chosen.shipping_price.is_zero());
        // faster options are still paid
        assert_eq!(quote.options[0].shipping_price.amount_cents, 1290);
    }

    #[tokio::test]
    async fn test_out_of_range_index() {
        let table = RateTable::standard();
        let err = table
            .estimate(&items(1000, 1), None, Some(9))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EstimateError::UnknownOption { index: 9, count: 3 }
        ));
    }

    #[tokio::test]
    async fn test_estimated_dates_are_ordered() {
        let table = RateTable::standard();
        let quote = table.estimate(&items(1000, 1), None, None).await.unwrap();

        assert!(quote.options[0].estimated_date < quote.options[1].estimated_date);
        assert!(quote.options[1].estimated_date < quote.options[2].estimated_date);
    }

    #[tokio::test]
    async fn test_empty_table_is_unavailable() {
        let table = RateTable::new(Vec::new());
        let err = table.estimate(&items(1000, 1), None, None).await.unwrap_err();
        assert!(matches!(err, EstimateError::Unavailable(_)));
    }
}
