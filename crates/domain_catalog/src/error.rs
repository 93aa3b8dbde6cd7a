//! Catalog domain errors

use thiserror::Error;

use core_kernel::{ProductId, ShopId};

/// Errors that can occur in the catalog domain
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Shop not found
    #[error("Shop not found: {0}")]
    ShopNotFound(ShopId),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Field validation failure
    #[error("Validation failed on {field}: {message}")]
    Validation { field: String, message: String },

    /// The text-generation collaborator failed
    #[error("Description generation failed: {0}")]
    Generation(String),

    /// Underlying storage failure
    #[error("Catalog store error: {0}")]
    Store(String),
}
