//! Product records and validation
//!
//! Products carry a price in `Money`; the payment workflow reads this price
//! when an order is checked out, so price validity is enforced at entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Money, ProductId, ShopId};

use crate::error::CatalogError;

/// A listed product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier
    pub id: ProductId,
    /// Shop the product belongs to
    pub shop_id: ShopId,
    /// Title shown in search results
    pub title: String,
    /// Marketing description (usually generated)
    pub description: String,
    /// Listed price
    pub price: Money,
    /// Optional image URL
    pub image_url: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated product input, as submitted by a seller
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub shop_id: ShopId,
    pub title: String,
    pub description: String,
    pub price: Money,
    pub image_url: Option<String>,
}

impl Product {
    /// Creates a product from a draft, enforcing the catalog entry rules
    pub fn from_draft(draft: ProductDraft) -> Result<Self, CatalogError> {
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(CatalogError::Validation {
                field: "title".to_string(),
                message: "product title must not be empty".to_string(),
            });
        }
        if title.len() > 255 {
            return Err(CatalogError::Validation {
                field: "title".to_string(),
                message: "product title must not exceed 255 characters".to_string(),
            });
        }
        if !draft.price.is_positive() {
            return Err(CatalogError::Validation {
                field: "price".to_string(),
                message: "product price must be positive".to_string(),
            });
        }

        let now = Utc::now();
        Ok(Self {
            id: ProductId::new_v7(),
            shop_id: draft.shop_id,
            title,
            description: draft.description,
            price: draft.price,
            image_url: draft.image_url,
            created_at: now,
            updated_at: now,
        })
    }

    /// Case-insensitive substring match on the title
    ///
    /// An empty query matches everything, so listing without a search term
    /// returns the whole catalog.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn draft(title: &str, price: Money) -> ProductDraft {
        ProductDraft {
            shop_id: ShopId::new(),
            title: title.to_string(),
            description: "A fine product".to_string(),
            price,
            image_url: None,
        }
    }

    #[test]
    fn test_from_draft_accepts_valid_product() {
        let product =
            Product::from_draft(draft("Woven rug", Money::new(dec!(450.00), Currency::MRU)))
                .unwrap();
        assert_eq!(product.title, "Woven rug");
        assert_eq!(product.price.amount(), dec!(450.00));
    }

    #[test]
    fn test_from_draft_rejects_empty_title() {
        let result = Product::from_draft(draft("  ", Money::new(dec!(10), Currency::MRU)));
        assert!(matches!(
            result,
            Err(CatalogError::Validation { ref field, .. }) if field == "title"
        ));
    }

    #[test]
    fn test_from_draft_rejects_non_positive_price() {
        let result = Product::from_draft(draft("Rug", Money::zero(Currency::MRU)));
        assert!(matches!(
            result,
            Err(CatalogError::Validation { ref field, .. }) if field == "price"
        ));
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let product =
            Product::from_draft(draft("Leather Sandals", Money::new(dec!(100), Currency::MRU)))
                .unwrap();
        assert!(product.matches("leather"));
        assert!(product.matches("SANDALS"));
        assert!(product.matches(""));
        assert!(!product.matches("teapot"));
    }
}
