//! Catalog repository implementation
//!
//! PostgreSQL adapter for the `CatalogStore` port. Queries use the runtime
//! SQLx API with `FromRow` row structs; free-text search is a
//! case-insensitive substring match on the title, served by the
//! `lower(title)` index.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{Currency, DomainPort, Money, ProductId, ShopId};
use domain_catalog::{CatalogError, CatalogStore, Product, ProductQuery, Shop};

use crate::error::DatabaseError;

/// PostgreSQL-backed implementation of the CatalogStore trait
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    /// Creates a new store with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a shop
#[derive(Debug, sqlx::FromRow)]
struct ShopRow {
    shop_id: Uuid,
    seller_id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<ShopRow> for Shop {
    fn from(row: ShopRow) -> Self {
        Shop {
            id: row.shop_id.into(),
            seller_id: row.seller_id.into(),
            name: row.name,
            created_at: row.created_at,
        }
    }
}

/// Database row representation of a product
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    product_id: Uuid,
    shop_id: Uuid,
    title: String,
    description: String,
    price_amount: Decimal,
    currency: String,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Result<Product, CatalogError> {
        let currency: Currency = self
            .currency
            .parse()
            .map_err(|e: core_kernel::MoneyError| CatalogError::Store(e.to_string()))?;

        Ok(Product {
            id: self.product_id.into(),
            shop_id: self.shop_id.into(),
            title: self.title,
            description: self.description,
            price: Money::new(self.price_amount, currency),
            image_url: self.image_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn store_err(error: sqlx::Error) -> CatalogError {
    CatalogError::Store(DatabaseError::from(&error).to_string())
}

impl DomainPort for PgCatalogStore {}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn create_shop(&self, shop: Shop) -> Result<Shop, CatalogError> {
        sqlx::query(
            r#"
            INSERT INTO shops (shop_id, seller_id, name, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::from(shop.id))
        .bind(Uuid::from(shop.seller_id))
        .bind(&shop.name)
        .bind(shop.created_at)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(shop)
    }

    async fn get_shop(&self, id: ShopId) -> Result<Shop, CatalogError> {
        let row: Option<ShopRow> = sqlx::query_as(
            r#"
            SELECT shop_id, seller_id, name, created_at
            FROM shops
            WHERE shop_id = $1
            "#,
        )
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        row.map(Shop::from).ok_or(CatalogError::ShopNotFound(id))
    }

    async fn create_product(&self, product: Product) -> Result<Product, CatalogError> {
        sqlx::query(
            r#"
            INSERT INTO products (
                product_id, shop_id, title, description,
                price_amount, currency, image_url, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(Uuid::from(product.id))
        .bind(Uuid::from(product.shop_id))
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.price.amount())
        .bind(product.price.currency().code())
        .bind(&product.image_url)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(product)
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT product_id, shop_id, title, description,
                   price_amount, currency, image_url, created_at, updated_at
            FROM products
            WHERE product_id = $1
            "#,
        )
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        row.ok_or(CatalogError::ProductNotFound(id))?.into_product()
    }

    async fn search_products(&self, query: ProductQuery) -> Result<Vec<Product>, CatalogError> {
        let term = query.search.unwrap_or_default().trim().to_string();

        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT product_id, shop_id, title, description,
                   price_amount, currency, image_url, created_at, updated_at
            FROM products
            WHERE ($1 = '' OR lower(title) LIKE '%' || lower($1) || '%')
              AND ($2::uuid IS NULL OR shop_id = $2)
            ORDER BY created_at
            "#,
        )
        .bind(&term)
        .bind(query.shop_id.map(Uuid::from))
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }
}
