//! Catalog Domain Ports
//!
//! The `CatalogStore` trait defines all operations the catalog needs from its
//! data source. Adapters: the PostgreSQL repository in `infra_db`, and an
//! in-memory mock behind the `mock` feature for tests.

use async_trait::async_trait;

use core_kernel::{DomainPort, ProductId, ShopId};

use crate::error::CatalogError;
use crate::product::Product;
use crate::shop::Shop;

/// Query parameters for product search
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Free-text search over product titles; `None` lists everything
    pub search: Option<String>,
    /// Restrict to a single shop
    pub shop_id: Option<ShopId>,
}

impl ProductQuery {
    /// Creates a free-text search query
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Default::default()
        }
    }
}

/// The main port trait for catalog storage
#[async_trait]
pub trait CatalogStore: DomainPort {
    /// Persists a new shop
    async fn create_shop(&self, shop: Shop) -> Result<Shop, CatalogError>;

    /// Retrieves a shop by id
    async fn get_shop(&self, id: ShopId) -> Result<Shop, CatalogError>;

    /// Persists a new product
    async fn create_product(&self, product: Product) -> Result<Product, CatalogError>;

    /// Retrieves a product by id
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Finds products matching the query
    ///
    /// Never errors for an unmatched query - the empty list is the answer.
    async fn search_products(&self, query: ProductQuery) -> Result<Vec<Product>, CatalogError>;
}

/// In-memory mock implementation of CatalogStore for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    /// In-memory catalog store
    #[derive(Debug, Default)]
    pub struct MockCatalogStore {
        shops: RwLock<HashMap<ShopId, Shop>>,
        products: RwLock<HashMap<ProductId, Product>>,
    }

    impl MockCatalogStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates the store with products
        pub async fn with_products(products: Vec<Product>) -> Self {
            let store = Self::new();
            {
                let mut guard = store.products.write().await;
                for product in products {
                    guard.insert(product.id, product);
                }
            }
            store
        }
    }

    impl DomainPort for MockCatalogStore {}

    #[async_trait]
    impl CatalogStore for MockCatalogStore {
        async fn create_shop(&self, shop: Shop) -> Result<Shop, CatalogError> {
            self.shops.write().await.insert(shop.id, shop.clone());
            Ok(shop)
        }

        async fn get_shop(&self, id: ShopId) -> Result<Shop, CatalogError> {
            self.shops
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or(CatalogError::ShopNotFound(id))
        }

        async fn create_product(&self, product: Product) -> Result<Product, CatalogError> {
            self.products
                .write()
                .await
                .insert(product.id, product.clone());
            Ok(product)
        }

        async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
            self.products
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or(CatalogError::ProductNotFound(id))
        }

        async fn search_products(&self, query: ProductQuery) -> Result<Vec<Product>, CatalogError> {
            let products = self.products.read().await;
            let term = query.search.unwrap_or_default();
            let mut results: Vec<Product> = products
                .values()
                .filter(|p| p.matches(&term))
                .filter(|p| query.shop_id.map_or(true, |shop| p.shop_id == shop))
                .cloned()
                .collect();
            results.sort_by_key(|p| p.created_at);
            Ok(results)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockCatalogStore;
    use super::*;
    use core_kernel::{Currency, Money, SellerId};
    use rust_decimal::Decimal;

    use crate::product::ProductDraft;

    fn product(title: &str) -> Product {
        Product::from_draft(ProductDraft {
            shop_id: ShopId::new(),
            title: title.to_string(),
            description: "desc".to_string(),
            price: Money::new(Decimal::new(1000, 2), Currency::MRU),
            image_url: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_mock_store_create_and_get_product() {
        let store = MockCatalogStore::new();
        let created = store.create_product(product("Silver teapot")).await.unwrap();
        let fetched = store.get_product(created.id).await.unwrap();
        assert_eq!(fetched.title, "Silver teapot");
    }

    #[tokio::test]
    async fn test_mock_store_search_matches_substring() {
        let store = MockCatalogStore::with_products(vec![
            product("Silver teapot"),
            product("Woven rug"),
        ])
        .await;

        let hits = store
            .search_products(ProductQuery::search("tea"))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Silver teapot");
    }

    #[tokio::test]
    async fn test_mock_store_search_no_match_returns_empty_list() {
        let store = MockCatalogStore::with_products(vec![product("Woven rug")]).await;
        let hits = store
            .search_products(ProductQuery::search("camera"))
            .await
            .unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_mock_store_get_missing_product_is_not_found() {
        let store = MockCatalogStore::new();
        let result = store.get_product(ProductId::new()).await;
        assert!(matches!(result, Err(CatalogError::ProductNotFound(_))));
    }

    #[tokio::test]
    async fn test_mock_store_shop_round_trip() {
        let store = MockCatalogStore::new();
        let shop = Shop::new(SellerId::new(), "Atelier Chinguetti").unwrap();
        let created = store.create_shop(shop).await.unwrap();
        let fetched = store.get_shop(created.id).await.unwrap();
        assert_eq!(fetched.name, "Atelier Chinguetti");
    }
}
