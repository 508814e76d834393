//! Product catalog module.
//!
//! The catalog is the read-only side of a session: an ordered list of
//! products, unique by id. It only changes by appending new products, and
//! every append bumps [`Catalog::version`].

mod category;
mod draft;
mod product;
mod seed;

pub use category::{CategoryFilter, ALL_CATEGORIES, KNOWN_CATEGORIES};
pub use draft::{NewProduct, ProductDraft, ValidationErrors};
pub use product::{Product, LOW_STOCK_THRESHOLD, MAX_RATING};
pub use seed::default_products;

use std::collections::HashSet;

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Currency;

/// Ordered, id-unique list of products.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    products: Vec<Product>,
    version: u64,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and out-of-range fields.
    pub fn new(products: Vec<Product>) -> Result<Self, CommerceError> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(CommerceError::DuplicateProduct(product.id.to_string()));
            }
            if let Some(reason) = out_of_range(product) {
                return Err(CommerceError::InvalidCatalogProduct {
                    id: product.id.to_string(),
                    reason: reason.to_string(),
                });
            }
        }
        Ok(Self {
            products,
            version: 0,
        })
    }

    /// The demo catalog.
    pub fn seeded() -> Self {
        Self {
            products: default_products(),
            version: 0,
        }
    }

    /// Parse a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Look up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Look up a product by id, failing when it is missing.
    pub fn require(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.get(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Incremented on every append.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Currency of the first product, USD for an empty catalog.
    pub fn currency(&self) -> Currency {
        self.products
            .first()
            .map(|p| p.price.currency)
            .unwrap_or_default()
    }

    /// `"All"` followed by the sorted category names.
    pub fn categories(&self) -> Vec<String> {
        category::category_labels(self.products.iter())
    }

    /// Products passing the filter, in catalog order.
    pub fn filter<'a>(&'a self, filter: &'a CategoryFilter) -> impl Iterator<Item = &'a Product> + 'a {
        self.products.iter().filter(move |p| filter.matches(p))
    }

    /// Append a validated product under a fresh id.
    pub fn append(&mut self, new_product: NewProduct) -> ProductId {
        let id = self.unused_id(ProductId::generate());
        tracing::debug!(product_id = %id, name = %new_product.name, "appending product to catalog");

        self.products.push(Product {
            id: id.clone(),
            name: new_product.name,
            category: new_product.category,
            price: new_product.price,
            quantity: new_product.quantity,
            image: new_product.image,
            description: new_product.description,
            specification: new_product.specification,
            rating: new_product.rating,
        });
        self.version += 1;
        id
    }

    fn unused_id(&self, candidate: ProductId) -> ProductId {
        let mut id = candidate;
        let mut suffix = 1u32;
        while self.get(&id).is_some() {
            id = match id.numeric() {
                Some(n) => ProductId::new((n + 1).to_string()),
                None => {
                    suffix += 1;
                    ProductId::new(format!("{}-{}", id, suffix))
                }
            };
        }
        id
    }
}

fn out_of_range(product: &Product) -> Option<&'static str> {
    if product.price.is_negative() {
        Some("price must not be negative")
    } else if product.quantity < 0 {
        Some("quantity must not be negative")
    } else if !(0.0..=MAX_RATING).contains(&product.rating) {
        Some("rating must be between 0 and 5")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn new_product(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            category: "Books".to_string(),
            price: Money::from_minor(1500, Currency::USD),
            quantity: 4,
            image: "/book.jpg".to_string(),
            description: "A book".to_string(),
            specification: "Paperback, 300 pages".to_string(),
            rating: 4.0,
        }
    }

    #[test]
    fn test_seeded_catalog() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.version(), 0);
        assert_eq!(catalog.get(&ProductId::new("1")).unwrap().name, "Wireless Headphones");
        assert!(catalog.get(&ProductId::new("99")).is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut products = default_products();
        products.push(products[0].clone());
        let result = Catalog::new(products);
        assert!(matches!(result, Err(CommerceError::DuplicateProduct(id)) if id == "1"));
    }

    #[test]
    fn test_out_of_range_products_rejected() {
        fn reject(edit: impl FnOnce(&mut Product)) -> Result<Catalog, CommerceError> {
            let mut products = default_products();
            edit(&mut products[1]);
            Catalog::new(products)
        }

        let negative_price = reject(|p| p.price = Money::from_minor(-1, Currency::USD));
        assert!(matches!(
            negative_price,
            Err(CommerceError::InvalidCatalogProduct { id, .. }) if id == "2"
        ));
        assert!(reject(|p| p.quantity = -3).is_err());
        assert!(reject(|p| p.rating = 9.0).is_err());
        assert!(reject(|p| p.rating = -0.5).is_err());
        assert!(reject(|p| p.rating = f64::NAN).is_err());

        assert!(reject(|p| p.quantity = 0).is_ok());
        assert!(reject(|p| p.rating = 5.0).is_ok());
    }

    #[test]
    fn test_from_json_rejects_negative_stock() {
        let json = r#"[{"id": "a", "name": "A", "category": "Books",
            "price": {"amount": "1.00", "currency": "USD"}, "quantity": -1}]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CommerceError::InvalidCatalogProduct { .. })
        ));
    }

    #[test]
    fn test_categories_sorted_after_all() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.categories(), vec!["All", "Accessories", "Electronics"]);
    }

    #[test]
    fn test_filter_preserves_order() {
        let catalog = Catalog::seeded();

        let all: Vec<&str> = catalog
            .filter(&CategoryFilter::All)
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(all, vec!["1", "2", "3", "4"]);

        let electronics = CategoryFilter::Named("Electronics".to_string());
        let ids: Vec<&str> = catalog.filter(&electronics).map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        let none = CategoryFilter::Named("Garden".to_string());
        assert_eq!(catalog.filter(&none).count(), 0);
    }

    #[test]
    fn test_append_assigns_unique_ids() {
        let mut catalog = Catalog::seeded();
        let a = catalog.append(new_product("First"));
        let b = catalog.append(new_product("Second"));

        assert_ne!(a, b);
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.version(), 2);
        assert_eq!(catalog.products().last().unwrap().name, "Second");
        assert!(catalog.categories().contains(&"Books".to_string()));
    }

    #[test]
    fn test_require_reports_missing_id() {
        let catalog = Catalog::seeded();
        let err = catalog.require(&ProductId::new("x")).unwrap_err();
        assert_eq!(err.to_string(), "Product not found: x");
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"id": "a", "name": "Mug", "category": "Home",
             "price": {"amount": "8.50", "currency": "USD"}, "quantity": 12}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        let mug = catalog.get(&ProductId::new("a")).unwrap();
        assert_eq!(mug.price, Money::from_minor(850, Currency::USD));
        assert_eq!(mug.rating, 0.0);
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CommerceError::SerializationError(_))
        ));
    }
}
