//! Product catalog module.
//!
//! Contains the stock/price lookup seam used to resolve variants.

mod stock;

pub use stock::{MemoryCatalog, StockLookup, VariantRecord};
