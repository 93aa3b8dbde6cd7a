//! Catalog Domain - Shops, Products, and Search
//!
//! This crate holds the marketplace catalog: shop records owned by sellers,
//! product records with validated fields, free-text product search, and the
//! port for the external text-generation service that writes marketing
//! descriptions for new products.
//!
//! The catalog is deliberately shallow - it is a storage collaborator the
//! payment reconciliation core reads prices from, not a domain with its own
//! state transitions.

pub mod shop;
pub mod product;
pub mod generator;
pub mod ports;
pub mod error;

pub use shop::Shop;
pub use product::{Product, ProductDraft};
pub use generator::{
    DescriptionGenerator, ExternalTextGenConfig, ExternalTextGenerator, TemplateGenerator,
};
pub use ports::{CatalogStore, ProductQuery};
pub use error::CatalogError;
