//! Delivery estimation module.
//!
//! Contains delivery-date options and the estimator seam that prices
//! shipping and tax for an item set and destination.

mod estimator;
mod options;

pub use estimator::{DeliveryEstimator, EstimateError, RateTable};
pub use options::{DeliveryOption, DeliveryQuote, DeliveryRates, QuotedOption};
