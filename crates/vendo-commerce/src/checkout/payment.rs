//! Payment method types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment methods offered at checkout.
///
/// Selecting one never changes the monetary aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// PayPal.
    PayPal,
    /// Stripe card payment.
    Stripe,
    /// Pay the courier on delivery.
    CashOnDelivery,
}

impl PaymentMethod {
    /// Stable code for persistence and forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::PayPal => "paypal",
            PaymentMethod::Stripe => "stripe",
            PaymentMethod::CashOnDelivery => "cash_on_delivery",
        }
    }

    /// Display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::PayPal => "PayPal",
            PaymentMethod::Stripe => "Stripe",
            PaymentMethod::CashOnDelivery => "Cash On Delivery",
        }
    }

    /// Parse a stable code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "paypal" => Some(PaymentMethod::PayPal),
            "stripe" => Some(PaymentMethod::Stripe),
            "cash_on_delivery" => Some(PaymentMethod::CashOnDelivery),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
