//! Cart session persistence.

use crate::cart::Cart;
use crate::error::CommerceError;
use async_trait::async_trait;
use vendo_cache::{store_key, KeyValue, SessionId, TypedStore};

/// Durable per-session cart storage.
///
/// The whole cart is written atomically as one record; there is no
/// partial-field update.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the cart for a session, or `None` if the session has none.
    async fn load(&self, id: &SessionId) -> Result<Option<Cart>, CommerceError>;

    /// Persist the cart for a session, replacing any previous record.
    async fn save(&self, id: &SessionId, cart: &Cart) -> Result<(), CommerceError>;
}

/// Session store over a key-value backend, keyed `cart:<session>`.
pub struct KvSessionStore<S> {
    store: TypedStore<S>,
}

impl<S: KeyValue> KvSessionStore<S> {
    /// Wrap a key-value backend.
    pub fn new(backend: S) -> Self {
        Self {
            store: TypedStore::new(backend),
        }
    }

    fn key(id: &SessionId) -> String {
        store_key!("cart", id)
    }

    /// Access the underlying typed store.
    pub fn store(&self) -> &TypedStore<S> {
        &self.store
    }
}

#[async_trait]
impl<S: KeyValue> SessionStore for KvSessionStore<S> {
    async fn load(&self, id: &SessionId) -> Result<Option<Cart>, CommerceError> {
        Ok(self.store.get(&Self::key(id))?)
    }

    async fn save(&self, id: &SessionId, cart: &Cart) -> Result<(), CommerceError> {
        Ok(self.store.set(&Self::key(id), cart)?)
    }
}
