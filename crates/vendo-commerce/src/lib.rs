//! Commerce domain types and cart engine for Vendo storefronts.
//!
//! This crate provides the shopping-cart core of a storefront:
//!
//! - **Cart**: ordered line items keyed by product variant, with aggregate
//!   pricing kept consistent on every mutation
//! - **Catalog**: stock/price lookup seam for resolving variants
//! - **Delivery**: delivery-date options and the estimator seam
//! - **Checkout**: shipping address and payment method types
//! - **Engine**: the async [`CartEngine`](cart::CartEngine) orchestrating
//!   lookups, estimates, and session persistence
//!
//! # Example
//!
//! ```rust,ignore
//! use vendo_commerce::prelude::*;
//! use vendo_cache::{MemoryStore, SessionId};
//!
//! let mut engine = CartEngine::open(
//!     catalog,
//!     RateTable::standard(),
//!     KvSessionStore::new(MemoryStore::new()),
//!     SessionId::generate(),
//! )
//! .await?;
//!
//! let key = VariantKey::new("prod-1", "red", "M");
//! engine.add_item(&key, 2).await?;
//! println!("Total: {}", engine.cart().total_price.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod delivery;
pub mod store;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{Cart, CartEngine, CartTotals, LineItem, VariantKey};

    // Catalog
    pub use crate::catalog::{MemoryCatalog, StockLookup, VariantRecord};

    // Delivery
    pub use crate::delivery::{
        DeliveryEstimator, DeliveryOption, DeliveryQuote, DeliveryRates, QuotedOption, RateTable,
    };

    // Checkout
    pub use crate::checkout::{PaymentMethod, ShippingAddress};

    // Persistence
    pub use crate::store::{KvSessionStore, SessionStore};
}
