//! The cart store: product id to requested quantity.

use serde::{Deserialize, Serialize};

use crate::ids::ProductId;

/// One cart line before it is joined against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Product being requested.
    pub product_id: ProductId,
    /// Requested quantity, always positive.
    pub quantity: i64,
}

/// Insertion-ordered mapping from product id to requested quantity.
///
/// The store knows nothing about stock. Every mutator is total: unknown ids
/// and non-positive quantities degrade to no-ops or removals, never errors.
/// An entry is never stored with a quantity of zero or less.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartStore {
    entries: Vec<CartEntry>,
    revision: u64,
}

impl CartStore {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit, creating the entry at 1 if absent.
    pub fn add_to_cart(&mut self, product_id: &ProductId) {
        let quantity = match self.position(product_id) {
            Some(index) => {
                let entry = &mut self.entries[index];
                entry.quantity = entry.quantity.saturating_add(1);
                entry.quantity
            }
            None => {
                self.entries.push(CartEntry {
                    product_id: product_id.clone(),
                    quantity: 1,
                });
                1
            }
        };
        self.touch();
        tracing::debug!(product_id = %product_id, quantity, "added to cart");
    }

    /// Remove one unit; the entry disappears when it would reach zero.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) {
        let Some(index) = self.position(product_id) else {
            return;
        };

        if self.entries[index].quantity <= 1 {
            self.entries.remove(index);
            self.touch();
            tracing::debug!(product_id = %product_id, "removed from cart");
        } else {
            let entry = &mut self.entries[index];
            entry.quantity -= 1;
            let quantity = entry.quantity;
            self.touch();
            tracing::debug!(product_id = %product_id, quantity, "decremented cart entry");
        }
    }

    /// Set the quantity directly. `quantity <= 0` deletes the entry.
    ///
    /// Existing entries keep their position; new ones are appended.
    pub fn update_cart_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        let position = self.position(product_id);

        if quantity <= 0 {
            if let Some(index) = position {
                self.entries.remove(index);
                self.touch();
                tracing::debug!(product_id = %product_id, "removed from cart");
            }
            return;
        }

        match position {
            Some(index) if self.entries[index].quantity == quantity => return,
            Some(index) => self.entries[index].quantity = quantity,
            None => self.entries.push(CartEntry {
                product_id: product_id.clone(),
                quantity,
            }),
        }
        self.touch();
        tracing::debug!(product_id = %product_id, quantity, "set cart quantity");
    }

    /// Empty the cart. Clearing an empty cart changes nothing.
    pub fn clear_cart(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let lines = self.entries.len();
        self.entries.clear();
        self.touch();
        tracing::debug!(lines, "cleared cart");
    }

    /// Read-only view of the current mapping.
    pub fn snapshot(&self) -> CartSnapshot<'_> {
        CartSnapshot {
            entries: &self.entries,
            revision: self.revision,
        }
    }

    /// Requested quantity for a product, 0 when absent.
    pub fn quantity(&self, product_id: &ProductId) -> i64 {
        self.snapshot().quantity(product_id)
    }

    /// Sum of all requested quantities.
    pub fn item_count(&self) -> i64 {
        self.snapshot().item_count()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Changes whenever the mapping changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.entries.iter().position(|e| &e.product_id == product_id)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

/// Borrowed view of a cart, used for rendering and summaries.
#[derive(Debug, Clone, Copy)]
pub struct CartSnapshot<'a> {
    entries: &'a [CartEntry],
    revision: u64,
}

impl<'a> CartSnapshot<'a> {
    /// Entries in insertion order.
    pub fn entries(&self) -> &'a [CartEntry] {
        self.entries
    }

    /// Iterate `(product id, quantity)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a ProductId, i64)> + 'a {
        self.entries.iter().map(|e| (&e.product_id, e.quantity))
    }

    /// Requested quantity for a product, 0 when absent.
    pub fn quantity(&self, product_id: &ProductId) -> i64 {
        self.entries
            .iter()
            .find(|e| &e.product_id == product_id)
            .map(|e| e.quantity)
            .unwrap_or(0)
    }

    /// Check whether a product is in the cart.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.entries.iter().any(|e| &e.product_id == product_id)
    }

    /// Sum of all requested quantities, resolvable or not. Saturates at
    /// `i64::MAX`.
    pub fn item_count(&self) -> i64 {
        self.entries
            .iter()
            .fold(0i64, |count, e| count.saturating_add(e.quantity))
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Revision of the store this view was taken from.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    fn order(cart: &CartStore) -> Vec<(String, i64)> {
        cart.snapshot()
            .iter()
            .map(|(id, q)| (id.to_string(), q))
            .collect()
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = CartStore::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.revision(), 0);
    }

    #[test]
    fn test_add_creates_then_increments() {
        let mut cart = CartStore::new();
        cart.add_to_cart(&id("1"));
        assert_eq!(cart.quantity(&id("1")), 1);

        cart.add_to_cart(&id("1"));
        cart.add_to_cart(&id("1"));
        assert_eq!(cart.quantity(&id("1")), 3);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_at_one_deletes_entry() {
        let mut cart = CartStore::new();
        cart.add_to_cart(&id("1"));
        cart.remove_from_cart(&id("1"));

        assert!(!cart.snapshot().contains(&id("1")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_decrements() {
        let mut cart = CartStore::new();
        cart.update_cart_quantity(&id("1"), 4);
        cart.remove_from_cart(&id("1"));
        assert_eq!(cart.quantity(&id("1")), 3);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut cart = CartStore::new();
        cart.add_to_cart(&id("1"));
        let before = cart.clone();

        cart.remove_from_cart(&id("missing"));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_update_overwrites_and_deletes() {
        let mut cart = CartStore::new();
        cart.add_to_cart(&id("1"));
        cart.update_cart_quantity(&id("1"), 7);
        assert_eq!(cart.quantity(&id("1")), 7);

        cart.update_cart_quantity(&id("1"), 2);
        assert_eq!(cart.quantity(&id("1")), 2);

        cart.update_cart_quantity(&id("1"), 0);
        assert!(cart.is_empty());

        cart.update_cart_quantity(&id("2"), -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_insertion_order_is_stable() {
        let mut cart = CartStore::new();
        cart.add_to_cart(&id("b"));
        cart.add_to_cart(&id("a"));
        cart.update_cart_quantity(&id("c"), 2);
        cart.update_cart_quantity(&id("b"), 5);

        assert_eq!(
            order(&cart),
            vec![
                ("b".to_string(), 5),
                ("a".to_string(), 1),
                ("c".to_string(), 2)
            ]
        );

        cart.remove_from_cart(&id("a"));
        cart.add_to_cart(&id("a"));
        assert_eq!(order(&cart).last().unwrap().0, "a");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = CartStore::new();
        cart.add_to_cart(&id("1"));
        cart.add_to_cart(&id("2"));

        cart.clear_cart();
        let once = cart.clone();
        cart.clear_cart();

        assert_eq!(cart, once);
        assert!(cart.snapshot().is_empty());
    }

    #[test]
    fn test_revision_tracks_changes_only() {
        let mut cart = CartStore::new();
        cart.add_to_cart(&id("1"));
        assert_eq!(cart.revision(), 1);

        cart.update_cart_quantity(&id("1"), 1);
        cart.remove_from_cart(&id("nope"));
        cart.update_cart_quantity(&id("nope"), 0);
        assert_eq!(cart.revision(), 1);

        cart.update_cart_quantity(&id("1"), 3);
        assert_eq!(cart.revision(), 2);

        cart.clear_cart();
        cart.clear_cart();
        assert_eq!(cart.revision(), 3);
    }

    #[test]
    fn test_snapshot_item_count() {
        let mut cart = CartStore::new();
        cart.update_cart_quantity(&id("1"), 2);
        cart.update_cart_quantity(&id("2"), 5);

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.item_count(), 7);
        assert_eq!(snapshot.entries().len(), 2);
        assert_eq!(snapshot.quantity(&id("3")), 0);
        assert_eq!(snapshot.revision(), cart.revision());
    }

    #[test]
    fn test_item_count_saturates() {
        let mut cart = CartStore::new();
        cart.update_cart_quantity(&id("a"), i64::MAX);
        cart.update_cart_quantity(&id("b"), 1);
        assert_eq!(cart.item_count(), i64::MAX);

        cart.add_to_cart(&id("a"));
        assert_eq!(cart.quantity(&id("a")), i64::MAX);
        assert_eq!(cart.snapshot().item_count(), i64::MAX);
    }
}
