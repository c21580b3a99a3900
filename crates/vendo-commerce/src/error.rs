//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart operations.
///
/// Every failing mutation leaves the cart at its pre-mutation state; none
/// of these are fatal to the session.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Requested quantity exceeds available stock.
    #[error("Not enough items in stock for {variant}: requested {requested}, available {available}")]
    OutOfStock {
        variant: String,
        requested: i64,
        available: i64,
    },

    /// The variant does not exist in the catalog.
    #[error("Variant not found: {0}")]
    VariantNotFound(String),

    /// The delivery estimator call failed; the mutation was rejected.
    #[error("Delivery estimate unavailable: {0}")]
    EstimationUnavailable(String),

    /// Selected delivery option index is outside the offered list.
    #[error("No delivery option at index {index} (have {count})")]
    InvalidDeliveryOption { index: usize, count: usize },

    /// Quantity must be a positive integer.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Session store error.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CommerceError {
    /// Whether the failure is user-correctable (shown as a message) as
    /// opposed to a transient backend failure (shown as a retry prompt).
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            CommerceError::OutOfStock { .. }
                | CommerceError::VariantNotFound(_)
                | CommerceError::InvalidDeliveryOption { .. }
                | CommerceError::InvalidQuantity(_)
        )
    }
}

impl From<vendo_cache::CacheError> for CommerceError {
    fn from(e: vendo_cache::CacheError) -> Self {
        match e {
            vendo_cache::CacheError::SerializeError(inner) => {
                CommerceError::SerializationError(inner.to_string())
            }
            other => CommerceError::StorageError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
