//! Commerce error types.

use thiserror::Error;

use crate::catalog::ValidationErrors;

/// Errors that can occur in storefront operations.
///
/// Cart mutators never return these; invalid cart input degrades to a no-op.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Two catalog products share an id.
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateProduct(String),

    /// Cart accessed outside an active session.
    #[error("Cart accessed outside an active session")]
    NoActiveSession,

    /// Product form failed validation.
    #[error("Invalid product: {0}")]
    InvalidProduct(ValidationErrors),

    /// Catalog product with a negative price or stock, or a rating outside 0 to 5.
    #[error("Invalid catalog product {id}: {reason}")]
    InvalidCatalogProduct { id: String, reason: String },

    /// An order amount does not fit in a decimal.
    #[error("Amount overflow: {0}")]
    AmountOverflow(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

impl From<ValidationErrors> for CommerceError {
    fn from(e: ValidationErrors) -> Self {
        CommerceError::InvalidProduct(e)
    }
}
