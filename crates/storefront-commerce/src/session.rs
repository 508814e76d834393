//! Shopping session scope.
//!
//! A [`Session`] owns the catalog and the cart for one shopper visit and is
//! passed explicitly to whatever needs them. Once the session has ended any
//! cart access fails with [`CommerceError::NoActiveSession`] instead of
//! handing out an empty cart.

use crate::cart::{CartStore, ClampingCartFacade, OrderSummary, SummaryCache};
use crate::catalog::{Catalog, ProductDraft};
use crate::error::CommerceError;
use crate::ids::{ProductId, SessionId};

/// One shopper's catalog and cart.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    catalog: Catalog,
    cart: Option<CartStore>,
    summary: SummaryCache,
}

impl Session {
    /// Open a session with an empty cart.
    pub fn start(catalog: Catalog) -> Self {
        let id = SessionId::generate();
        tracing::info!(session_id = %id, products = catalog.len(), "session started");
        Self {
            id,
            catalog,
            cart: Some(CartStore::new()),
            summary: SummaryCache::new(),
        }
    }

    /// Session identifier.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Whether the cart is still available.
    pub fn is_active(&self) -> bool {
        self.cart.is_some()
    }

    /// The catalog. Available after the session ends.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Mutable catalog, for appending products.
    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// Validate a product form and append it to the catalog.
    pub fn add_product(&mut self, draft: &ProductDraft) -> Result<ProductId, CommerceError> {
        let new_product = draft.validate(self.catalog.currency())?;
        let id = self.catalog.append(new_product);
        tracing::info!(session_id = %self.id, product_id = %id, "product added");
        Ok(id)
    }

    /// The cart.
    pub fn cart(&self) -> Result<&CartStore, CommerceError> {
        self.cart.as_ref().ok_or_else(|| no_session(&self.id))
    }

    /// The cart, mutably. Prefer [`Session::clamp`] for stock-checked changes.
    pub fn cart_mut(&mut self) -> Result<&mut CartStore, CommerceError> {
        self.cart.as_mut().ok_or_else(|| no_session(&self.id))
    }

    /// Stock-checked access to the cart.
    pub fn clamp(&mut self) -> Result<ClampingCartFacade<'_>, CommerceError> {
        let catalog = &self.catalog;
        self.cart
            .as_mut()
            .map(|cart| ClampingCartFacade::new(cart, catalog))
            .ok_or_else(|| no_session(&self.id))
    }

    /// Order summary for the current cart and catalog.
    pub fn summary(&mut self) -> Result<&OrderSummary, CommerceError> {
        match self.cart.as_ref() {
            Some(cart) => Ok(self.summary.get(cart.snapshot(), &self.catalog)),
            None => Err(no_session(&self.id)),
        }
    }

    /// End the session, discarding the cart.
    pub fn end(&mut self) {
        if let Some(cart) = self.cart.take() {
            tracing::info!(session_id = %self.id, items = cart.item_count(), "session ended");
        }
        self.summary.invalidate();
    }
}

fn no_session(id: &SessionId) -> CommerceError {
    tracing::error!(session_id = %id, "cart accessed outside an active session");
    CommerceError::NoActiveSession
}
