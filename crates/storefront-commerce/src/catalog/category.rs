//! Category browsing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Product;

/// Label of the pseudo-category that matches every product.
pub const ALL_CATEGORIES: &str = "All";

/// Category names offered by the product form.
pub const KNOWN_CATEGORIES: [&str; 7] = [
    "Electronics",
    "Accessories",
    "Clothing",
    "Home",
    "Sports",
    "Books",
    "Other",
];

/// Which products a listing shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// Every product.
    #[default]
    All,
    /// Products whose category equals the name exactly.
    Named(String),
}

impl CategoryFilter {
    /// Build a filter from a user supplied label; `"All"` selects everything.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(label.to_string())
        }
    }

    /// Label shown for this filter.
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Named(name) => name,
        }
    }

    /// Check whether a product passes the filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => product.category == *name,
        }
    }
}

/// `"All"` followed by the sorted, de-duplicated category names.
pub(crate) fn category_labels<'a>(products: impl Iterator<Item = &'a Product>) -> Vec<String> {
    let names: BTreeSet<&str> = products.map(|p| p.category.as_str()).collect();
    std::iter::once(ALL_CATEGORIES.to_string())
        .chain(names.into_iter().map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label() {
        assert_eq!(CategoryFilter::from_label("All"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_label("Books"),
            CategoryFilter::Named("Books".to_string())
        );
    }

    #[test]
    fn test_label_round_trips() {
        assert_eq!(CategoryFilter::All.label(), "All");
        assert_eq!(CategoryFilter::Named("Home".to_string()).label(), "Home");
    }
}
