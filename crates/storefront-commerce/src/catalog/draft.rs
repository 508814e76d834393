//! Product creation form.
//!
//! A [`ProductDraft`] holds the raw text a user typed. [`ProductDraft::validate`]
//! checks every field at once and produces a [`NewProduct`] ready for
//! [`Catalog::append`](super::Catalog::append).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::product::MAX_RATING;
use crate::money::{Currency, Money};

/// Field-level validation failures, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    fn add(&mut self, field: &str, message: &str) {
        self.errors.insert(field.to_string(), message.to_string());
    }

    /// Message for a field, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Check if no field failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Failing fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// A validated product without an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: Money,
    pub quantity: i64,
    pub image: String,
    pub description: String,
    pub specification: String,
    pub rating: f64,
}

/// Raw product form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: String,
    pub quantity: String,
    pub image: String,
    pub description: String,
    pub specification: String,
    pub rating: String,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: "Electronics".to_string(),
            price: String::new(),
            quantity: String::new(),
            image: String::new(),
            description: String::new(),
            specification: String::new(),
            rating: "4".to_string(),
        }
    }
}

impl ProductDraft {
    /// Validate every field, priced in `currency`.
    pub fn validate(&self, currency: Currency) -> Result<NewProduct, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.name.trim().is_empty() {
            errors.add("name", "Product name is required");
        }
        if self.category.trim().is_empty() {
            errors.add("category", "Category is required");
        }

        let price = Money::parse(&self.price, currency).filter(Money::is_positive);
        if price.is_none() {
            errors.add("price", "Price must be greater than 0");
        }

        let quantity = self.quantity.trim().parse::<i64>().ok().filter(|q| *q >= 0);
        if quantity.is_none() {
            errors.add("quantity", "Quantity must be 0 or greater");
        }

        if self.image.trim().is_empty() {
            errors.add("image", "Product image URL is required");
        }
        if self.description.trim().is_empty() {
            errors.add("description", "Description is required");
        }
        if self.specification.trim().is_empty() {
            errors.add("specification", "Specification is required");
        }

        let rating = self
            .rating
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|r| (0.0..=MAX_RATING).contains(r));
        if rating.is_none() {
            errors.add("rating", "Rating must be between 0 and 5");
        }

        match (price, quantity, rating) {
            (Some(price), Some(quantity), Some(rating)) if errors.is_empty() => Ok(NewProduct {
                name: self.name.trim().to_string(),
                category: self.category.trim().to_string(),
                price,
                quantity,
                image: self.image.trim().to_string(),
                description: self.description.trim().to_string(),
                specification: self.specification.trim().to_string(),
                rating,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ProductDraft {
        ProductDraft {
            name: "Desk Lamp".to_string(),
            category: "Home".to_string(),
            price: "24.50".to_string(),
            quantity: "3".to_string(),
            image: "/lamp.jpg".to_string(),
            description: "Warm LED lamp".to_string(),
            specification: "LED, USB powered".to_string(),
            rating: "4.2".to_string(),
        }
    }

    #[test]
    fn test_valid_draft() {
        let product = filled().validate(Currency::USD).unwrap();
        assert_eq!(product.name, "Desk Lamp");
        assert_eq!(product.price, Money::from_minor(2450, Currency::USD));
        assert_eq!(product.quantity, 3);
        assert!((product.rating - 4.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_draft_reports_every_field() {
        let draft = ProductDraft {
            category: String::new(),
            rating: String::new(),
            ..ProductDraft::default()
        };
        let errors = draft.validate(Currency::USD).unwrap_err();

        assert_eq!(errors.len(), 8);
        assert_eq!(errors.get("name"), Some("Product name is required"));
        assert_eq!(errors.get("price"), Some("Price must be greater than 0"));
        assert_eq!(errors.get("rating"), Some("Rating must be between 0 and 5"));
    }

    #[test]
    fn test_numeric_bounds() {
        let mut draft = filled();
        draft.price = "0".to_string();
        draft.quantity = "-1".to_string();
        draft.rating = "5.5".to_string();

        let errors = draft.validate(Currency::USD).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.get("price").is_some());
        assert!(errors.get("quantity").is_some());
        assert!(errors.get("rating").is_some());
    }

    #[test]
    fn test_zero_stock_is_allowed() {
        let mut draft = filled();
        draft.quantity = "0".to_string();
        assert_eq!(draft.validate(Currency::USD).unwrap().quantity, 0);
    }

    #[test]
    fn test_default_draft() {
        let draft = ProductDraft::default();
        assert_eq!(draft.category, "Electronics");
        assert_eq!(draft.rating, "4");
    }

    #[test]
    fn test_errors_display() {
        let mut draft = filled();
        draft.name = "  ".to_string();
        let errors = draft.validate(Currency::USD).unwrap_err();
        assert_eq!(errors.to_string(), "name: Product name is required");
    }
}
