//! Catalog DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_catalog::{Product, Shop};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateShopRequest {
    pub seller_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    pub shop_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub price: Decimal,
    pub currency: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
    pub shop_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ShopResponse {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Shop> for ShopResponse {
    fn from(shop: Shop) -> Self {
        Self {
            id: shop.id.into(),
            seller_id: shop.seller_id.into(),
            name: shop.name,
            created_at: shop.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub currency: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.into(),
            shop_id: product.shop_id.into(),
            title: product.title,
            description: product.description,
            price: product.price.amount(),
            currency: product.price.currency().code().to_string(),
            image_url: product.image_url,
            created_at: product.created_at,
        }
    }
}
