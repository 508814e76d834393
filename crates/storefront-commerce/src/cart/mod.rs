//! Shopping cart module.
//!
//! Contains the cart store, the stock-aware facade over it, and the
//! line-item / order-summary derivation.

mod clamp;
mod store;
mod summary;

pub use clamp::{ClampOutcome, ClampingCartFacade, QuantitySelector};
pub use store::{CartEntry, CartSnapshot, CartStore};
pub use summary::{
    compute_summary, resolve_line_items, try_compute_summary, LineItem, OrderSummary,
    SummaryCache, TAX_RATE,
};
