//! Cart engine: the mutation surface for one session's cart.

use crate::cart::{items_subtotal, Cart, CartTotals, LineItem, VariantKey};
use crate::catalog::StockLookup;
use crate::checkout::{PaymentMethod, ShippingAddress};
use crate::delivery::{DeliveryEstimator, EstimateError};
use crate::error::CommerceError;
use crate::ids::ClientId;
use crate::store::SessionStore;
use tracing::{debug, warn};
use vendo_cache::SessionId;

/// The cart engine for a single session.
///
/// Owns the session's cart and serializes mutations through `&mut self`.
/// Every mutator is all-or-nothing: it stages the change on a copy,
/// recomputes aggregates (which may await the delivery estimator),
/// persists, and only then commits the copy — a failing estimate or
/// store write leaves both memory and durable state untouched.
pub struct CartEngine<C, E, S> {
    catalog: C,
    estimator: E,
    store: S,
    session_id: SessionId,
    cart: Cart,
}

impl<C, E, S> CartEngine<C, E, S>
where
    C: StockLookup,
    E: DeliveryEstimator,
    S: SessionStore,
{
    /// Open the engine for a session, loading its cart from the store
    /// or starting empty.
    pub async fn open(
        catalog: C,
        estimator: E,
        store: S,
        session_id: SessionId,
    ) -> Result<Self, CommerceError> {
        let cart = store.load(&session_id).await?.unwrap_or_default();
        Ok(Self {
            catalog,
            estimator,
            store,
            session_id,
            cart,
        })
    }

    /// The current cart state.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The session this engine belongs to.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Add `quantity` of a variant to the cart.
    ///
    /// An existing line for the same variant absorbs the quantity,
    /// checked against its stock-ceiling snapshot; otherwise the variant
    /// is resolved through the catalog and appended as a new line.
    /// Returns the client id of the affected line.
    pub async fn add_item(
        &mut self,
        key: &VariantKey,
        quantity: i64,
    ) -> Result<ClientId, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        let mut next = self.cart.clone();
        let client_id = match next.merge_line(key, quantity)? {
            Some(id) => id,
            None => {
                let record = self.catalog.lookup(key).await?;
                next.insert_line(LineItem::new(key.clone(), &record, quantity))?
            }
        };

        self.commit(next, true).await?;
        debug!(session = %self.session_id, variant = %key, quantity, "cart item added");
        Ok(client_id)
    }

    /// Set the quantity of the line for `key`.
    ///
    /// Silently returns when no line matches: the caller may have raced
    /// a concurrent removal. The quantity is checked against the line's
    /// stock-ceiling snapshot.
    pub async fn update_item(
        &mut self,
        key: &VariantKey,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        let mut next = self.cart.clone();
        if !next.set_line_quantity(key, quantity)? {
            return Ok(());
        }

        self.commit(next, true).await?;
        debug!(session = %self.session_id, variant = %key, quantity, "cart item updated");
        Ok(())
    }

    /// Remove the line for `key`; silently returns when absent.
    pub async fn remove_item(&mut self, key: &VariantKey) -> Result<(), CommerceError> {
        let mut next = self.cart.clone();
        if !next.remove_line(key) {
            return Ok(());
        }

        self.commit(next, true).await?;
        debug!(session = %self.session_id, variant = %key, "cart item removed");
        Ok(())
    }

    /// Set the destination address. Delivery options depend on it, so
    /// aggregates are recomputed.
    pub async fn set_shipping_address(
        &mut self,
        address: ShippingAddress,
    ) -> Result<(), CommerceError> {
        let mut next = self.cart.clone();
        next.shipping_address = Some(address);
        next.touch();
        self.commit(next, true).await
    }

    /// Select a delivery option by index into the quoted list.
    ///
    /// Fails with `InvalidDeliveryOption` when the index is outside the
    /// estimator's offered list, leaving the cart unchanged.
    pub async fn set_delivery_date_index(&mut self, index: usize) -> Result<(), CommerceError> {
        let mut next = self.cart.clone();
        next.delivery_date_index = Some(index);
        next.touch();
        self.commit(next, true).await
    }

    /// Select a payment method. Does not affect monetary aggregates.
    pub async fn set_payment_method(&mut self, method: PaymentMethod) -> Result<(), CommerceError> {
        let mut next = self.cart.clone();
        next.payment_method = Some(method);
        next.touch();
        self.commit(next, false).await
    }

    /// Empty the cart. Aggregates reset; the address and payment method
    /// belong to the session and survive.
    pub async fn clear_cart(&mut self) -> Result<(), CommerceError> {
        let mut next = self.cart.clone();
        next.clear_lines();
        next.delivery_date_index = None;
        self.commit(next, true).await?;
        debug!(session = %self.session_id, "cart cleared");
        Ok(())
    }

    /// Recompute aggregates if asked, persist, then adopt the staged
    /// cart. Durable state is only written after a successful estimate.
    async fn commit(&mut self, mut next: Cart, recompute: bool) -> Result<(), CommerceError> {
        if recompute {
            self.refresh_totals(&mut next).await?;
        }
        self.store.save(&self.session_id, &next).await?;
        self.cart = next;
        Ok(())
    }

    /// Derive the aggregate fields from the staged cart's items, address
    /// and delivery selection.
    ///
    /// With no items or no address there is nothing to quote: shipping
    /// and tax stay undefined (not zero) and the total is the bare
    /// subtotal.
    async fn refresh_totals(&self, cart: &mut Cart) -> Result<(), CommerceError> {
        let subtotal = items_subtotal(&cart.items, cart.currency)?;

        if cart.items.is_empty() || cart.shipping_address.is_none() {
            cart.delivery_options.clear();
            cart.apply_totals(CartTotals::offline(subtotal));
            return Ok(());
        }

        let quote = self
            .estimator
            .estimate(
                &cart.items,
                cart.shipping_address.as_ref(),
                cart.delivery_date_index,
            )
            .await
            .map_err(|e| {
                warn!(session = %self.session_id, error = %e, "delivery estimate failed");
                match e {
                    EstimateError::UnknownOption { index, count } => {
                        CommerceError::InvalidDeliveryOption { index, count }
                    }
                    other => CommerceError::EstimationUnavailable(other.to_string()),
                }
            })?;

        cart.apply_totals(CartTotals::with_rates(subtotal, &quote.chosen)?);
        cart.delivery_date_index = Some(quote.chosen_index);
        cart.delivery_options = quote.options;
        Ok(())
    }
}
