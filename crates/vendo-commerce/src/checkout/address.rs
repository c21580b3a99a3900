//! Shipping address types.

use serde::{Deserialize, Serialize};

/// A delivery destination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingAddress {
    /// Recipient full name.
    pub full_name: String,
    /// Street address.
    pub street: String,
    /// City.
    pub city: String,
    /// State/province.
    pub province: String,
    /// Postal/ZIP code.
    pub postal_code: String,
    /// Country.
    pub country: String,
    /// Phone number.
    pub phone: String,
}

impl ShippingAddress {
    /// Create a new address.
    pub fn new(
        full_name: impl Into<String>,
        street: impl Into<String>,
        city: impl Into<String>,
        province: impl Into<String>,
        postal_code: impl Into<String>,
        country: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            street: street.into(),
            city: city.into(),
            province: province.into(),
            postal_code: postal_code.into(),
            country: country.into(),
            phone: phone.into(),
        }
    }

    /// Check if the address has every field filled in.
    pub fn is_complete(&self) -> bool {
        !self.full_name.is_empty()
            && !self.street.is_empty()
            && !self.city.is_empty()
            && !self.province.is_empty()
            && !self.postal_code.is_empty()
            && !self.country.is_empty()
            && !self.phone.is_empty()
    }

    /// Format as a single line.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} {}, {}",
            self.street, self.city, self.province, self.postal_code, self.country
        )
    }
}
