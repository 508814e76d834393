//! Catalog, cart and order summary model for the storefront.
//!
//! - **Catalog**: products, category browsing, the product creation form
//! - **Cart**: the quantity store, the stock-aware facade, line items and totals
//! - **Session**: explicit owner of one catalog and one cart
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let mut session = Session::start(Catalog::seeded());
//! let headphones = ProductId::new("1");
//!
//! let mut cart = session.clamp().unwrap();
//! for _ in 0..3 {
//!     cart.increment(&headphones);
//! }
//!
//! let summary = session.summary().unwrap();
//! assert_eq!(summary.subtotal.display(), "$239.97");
//! assert_eq!(summary.total.display(), "$263.97");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod session;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        Catalog, CategoryFilter, NewProduct, Product, ProductDraft, ValidationErrors,
    };

    // Cart
    pub use crate::cart::{
        compute_summary, CartSnapshot, CartStore, ClampOutcome, ClampingCartFacade, LineItem,
        OrderSummary, QuantitySelector, TAX_RATE,
    };

    // Session
    pub use crate::session::Session;
}
