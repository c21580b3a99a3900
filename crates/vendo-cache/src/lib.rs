//! Type-safe key-value persistence layer for Vendo.
//!
//! Provides a byte-oriented [`KeyValue`] backend trait, an in-memory
//! implementation for development and tests, and a [`TypedStore`] wrapper
//! with automatic JSON serialization.
//!
//! # Example
//!
//! ```rust
//! use vendo_cache::{MemoryStore, TypedStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Profile {
//!     name: String,
//! }
//!
//! let store = TypedStore::new(MemoryStore::new());
//!
//! store.set("profile:u1", &Profile { name: "Ada".into() }).unwrap();
//! let profile: Option<Profile> = store.get("profile:u1").unwrap();
//! assert!(profile.is_some());
//! ```

mod error;
mod kv;
mod session;

pub use error::CacheError;
pub use kv::{KeyValue, MemoryStore, TypedStore};
pub use session::SessionId;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CacheError, KeyValue, MemoryStore, SessionId, TypedStore};
}
