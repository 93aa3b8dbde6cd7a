//! Shop records
//!
//! A shop is a seller's storefront. One seller owns exactly one shop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{SellerId, ShopId};

use crate::error::CatalogError;

/// A seller's shop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    /// Unique identifier
    pub id: ShopId,
    /// Owning seller
    pub seller_id: SellerId,
    /// Display name
    pub name: String,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Shop {
    /// Creates a new shop after validating the name
    pub fn new(seller_id: SellerId, name: impl Into<String>) -> Result<Self, CatalogError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::Validation {
                field: "name".to_string(),
                message: "shop name must not be empty".to_string(),
            });
        }
        if trimmed.len() > 255 {
            return Err(CatalogError::Validation {
                field: "name".to_string(),
                message: "shop name must not exceed 255 characters".to_string(),
            });
        }

        Ok(Self {
            id: ShopId::new_v7(),
            seller_id,
            name: trimmed.to_string(),
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shop_new_trims_name() {
        let shop = Shop::new(SellerId::new(), "  Boutique Nouakchott  ").unwrap();
        assert_eq!(shop.name, "Boutique Nouakchott");
    }

    #[test]
    fn test_shop_rejects_empty_name() {
        let result = Shop::new(SellerId::new(), "   ");
        assert!(matches!(result, Err(CatalogError::Validation { .. })));
    }
}
