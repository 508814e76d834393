//! Stock-aware quantity policy.
//!
//! [`CartStore`] has no notion of stock. [`ClampingCartFacade`] sits between
//! the UI and the store, reads available stock from the catalog and keeps
//! requested quantities within `[1, stock]` before anything reaches the
//! store. Quantities of zero or less are removals, never clamped up to 1.

use serde::Serialize;

use super::store::CartStore;
use crate::catalog::{Catalog, Product};
use crate::ids::ProductId;
use crate::money::Money;

/// What a facade call did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClampOutcome {
    /// The requested quantity was stored as-is.
    Applied { quantity: i64 },
    /// The request exceeded stock and was reduced.
    Clamped { requested: i64, quantity: i64 },
    /// The entry was removed from the cart.
    Removed,
    /// The cart already holds all available stock.
    AtStockLimit { quantity: i64 },
    /// The product is not in the catalog; the cart was not touched.
    UnknownProduct,
    /// Nothing to do (e.g., decrementing an absent entry).
    Unchanged,
}

impl ClampOutcome {
    /// Whether the store was mutated.
    pub fn changed(&self) -> bool {
        matches!(
            self,
            ClampOutcome::Applied { .. } | ClampOutcome::Clamped { .. } | ClampOutcome::Removed
        )
    }
}

/// Stock-checking wrapper around a [`CartStore`].
#[derive(Debug)]
pub struct ClampingCartFacade<'a> {
    store: &'a mut CartStore,
    catalog: &'a Catalog,
}

impl<'a> ClampingCartFacade<'a> {
    /// Wrap a store with the catalog that provides stock levels.
    pub fn new(store: &'a mut CartStore, catalog: &'a Catalog) -> Self {
        Self { store, catalog }
    }

    /// Current quantity of a product in the cart.
    pub fn quantity(&self, product_id: &ProductId) -> i64 {
        self.store.quantity(product_id)
    }

    /// Whether the "+" control for a product is enabled.
    pub fn can_increment(&self, product_id: &ProductId) -> bool {
        self.catalog
            .get(product_id)
            .map(|p| self.store.quantity(product_id) < p.quantity)
            .unwrap_or(false)
    }

    /// Add one unit unless the cart already holds all available stock.
    pub fn increment(&mut self, product_id: &ProductId) -> ClampOutcome {
        let Some(product) = self.catalog.get(product_id) else {
            return unknown(product_id);
        };

        let current = self.store.quantity(product_id);
        if current >= product.quantity {
            tracing::debug!(product_id = %product_id, quantity = current, stock = product.quantity, "increment refused at stock limit");
            return ClampOutcome::AtStockLimit { quantity: current };
        }

        self.store.add_to_cart(product_id);
        ClampOutcome::Applied {
            quantity: current + 1,
        }
    }

    /// Remove one unit.
    pub fn decrement(&mut self, product_id: &ProductId) -> ClampOutcome {
        match self.store.quantity(product_id) {
            0 => ClampOutcome::Unchanged,
            1 => {
                self.store.remove_from_cart(product_id);
                ClampOutcome::Removed
            }
            current => {
                self.store.remove_from_cart(product_id);
                ClampOutcome::Applied {
                    quantity: current - 1,
                }
            }
        }
    }

    /// Set a quantity, clamped to `[1, stock]`. `quantity <= 0` removes.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> ClampOutcome {
        if quantity <= 0 {
            return self.remove(product_id);
        }

        let Some(product) = self.catalog.get(product_id) else {
            return unknown(product_id);
        };

        let current = self.store.quantity(product_id);
        let target = clamp_to_stock(quantity, product);
        if target == 0 {
            tracing::debug!(product_id = %product_id, "product out of stock");
            return ClampOutcome::AtStockLimit { quantity: current };
        }
        if target == current {
            return if target < quantity {
                ClampOutcome::AtStockLimit { quantity: current }
            } else {
                ClampOutcome::Unchanged
            };
        }

        self.store.update_cart_quantity(product_id, target);
        if target < quantity {
            tracing::debug!(product_id = %product_id, requested = quantity, quantity = target, "quantity clamped to stock");
            ClampOutcome::Clamped {
                requested: quantity,
                quantity: target,
            }
        } else {
            ClampOutcome::Applied { quantity: target }
        }
    }

    /// Add `count` units at once, never exceeding stock.
    pub fn add_quantity(&mut self, product_id: &ProductId, count: i64) -> ClampOutcome {
        if count <= 0 {
            return ClampOutcome::Unchanged;
        }
        let current = self.store.quantity(product_id);
        match self.set_quantity(product_id, current.saturating_add(count)) {
            ClampOutcome::Unchanged => ClampOutcome::AtStockLimit { quantity: current },
            outcome => outcome,
        }
    }

    /// Remove the product from the cart regardless of stock or catalog.
    pub fn remove(&mut self, product_id: &ProductId) -> ClampOutcome {
        if self.store.quantity(product_id) == 0 {
            return ClampOutcome::Unchanged;
        }
        self.store.update_cart_quantity(product_id, 0);
        ClampOutcome::Removed
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> ClampOutcome {
        if self.store.is_empty() {
            return ClampOutcome::Unchanged;
        }
        self.store.clear_cart();
        ClampOutcome::Removed
    }
}

fn unknown(product_id: &ProductId) -> ClampOutcome {
    tracing::debug!(product_id = %product_id, "product not in catalog; cart unchanged");
    ClampOutcome::UnknownProduct
}

fn clamp_to_stock(quantity: i64, product: &Product) -> i64 {
    quantity.min(product.quantity.max(0))
}

/// Quantity picker on the product detail view.
///
/// Starts at 1 and stays within `[1, stock]`. Out-of-stock products pin the
/// selector at 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantitySelector {
    quantity: i64,
    stock: i64,
}

impl QuantitySelector {
    /// Selector for a product, starting at 1.
    pub fn for_product(product: &Product) -> Self {
        let stock = product.quantity.max(0);
        Self {
            quantity: stock.min(1),
            stock,
        }
    }

    /// Currently selected quantity.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Whether "+" is enabled.
    pub fn can_increment(&self) -> bool {
        self.quantity < self.stock
    }

    /// Whether "-" is enabled.
    pub fn can_decrement(&self) -> bool {
        self.quantity > 1
    }

    /// One more, up to stock.
    pub fn increment(&mut self) {
        if self.can_increment() {
            self.quantity += 1;
        }
    }

    /// One less, down to 1.
    pub fn decrement(&mut self) {
        if self.can_decrement() {
            self.quantity -= 1;
        }
    }

    /// Apply typed input. Unparseable or zero input counts as 1, then the
    /// value is clamped to stock.
    pub fn set_from_input(&mut self, input: &str) {
        let value = input.trim().parse::<i64>().ok().filter(|v| *v != 0).unwrap_or(1);
        self.quantity = value.max(1).min(self.stock);
    }

    /// Price of the selected quantity.
    pub fn line_subtotal(&self, product: &Product) -> Money {
        product.price_for(self.quantity)
    }
}
