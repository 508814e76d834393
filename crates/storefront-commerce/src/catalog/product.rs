//! Product records.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Stock level below which a product is flagged as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Highest allowed rating.
pub const MAX_RATING: f64 = 5.0;

/// A product in the catalog.
///
/// Products are immutable once they are in a catalog. The cart only ever
/// reads `id`, `price` and `quantity`; the rest is display metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Category name (e.g., "Electronics").
    pub category: String,
    /// Unit price.
    pub price: Money,
    /// Available stock.
    pub quantity: i64,
    /// Image path or URL.
    #[serde(default)]
    pub image: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Comma separated specification list.
    #[serde(default)]
    pub specification: String,
    /// Average rating, 0 to 5.
    #[serde(default)]
    pub rating: f64,
}

impl Product {
    /// Check if stock is below [`LOW_STOCK_THRESHOLD`].
    pub fn is_low_stock(&self) -> bool {
        self.is_low_stock_below(LOW_STOCK_THRESHOLD)
    }

    /// Check if stock is below a custom threshold.
    pub fn is_low_stock_below(&self, threshold: i64) -> bool {
        self.quantity < threshold
    }

    /// Check if out of stock.
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity <= 0
    }

    /// Specification entries, split on `", "`.
    pub fn specification_items(&self) -> Vec<&str> {
        self.specification
            .split(", ")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Number of filled stars for the rating.
    pub fn full_stars(&self) -> u8 {
        self.rating.clamp(0.0, MAX_RATING).floor() as u8
    }

    /// Rating rendered as five stars, e.g. `★★★★☆`.
    pub fn star_bar(&self) -> String {
        let full = usize::from(self.full_stars());
        format!("{}{}", "\u{2605}".repeat(full), "\u{2606}".repeat(5 - full))
    }

    /// Price multiplied by a quantity.
    pub fn price_for(&self, quantity: i64) -> Money {
        self.price.multiply(quantity)
    }
}
