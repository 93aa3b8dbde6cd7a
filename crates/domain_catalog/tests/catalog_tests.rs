//! Tests for the catalog domain
//!
//! Covers the seller-facing entry rules and the buyer-facing search
//! behaviour end to end against the in-memory store.

use core_kernel::{Currency, Money, SellerId, ShopId};
use rust_decimal_macros::dec;

use domain_catalog::ports::mock::MockCatalogStore;
use domain_catalog::{
    CatalogError, CatalogStore, DescriptionGenerator, Product, ProductDraft, ProductQuery, Shop,
    TemplateGenerator,
};

fn draft(shop_id: ShopId, title: &str, price: Money) -> ProductDraft {
    ProductDraft {
        shop_id,
        title: title.to_string(),
        description: String::new(),
        price,
        image_url: None,
    }
}

#[tokio::test]
async fn test_create_product_with_generated_description() {
    let store = MockCatalogStore::new();
    let generator = TemplateGenerator::new();
    let shop = store
        .create_shop(Shop::new(SellerId::new(), "Atelier Chinguetti").unwrap())
        .await
        .unwrap();

    let mut product_draft = draft(shop.id, "Camel hair blanket", Money::new(dec!(1200), Currency::MRU));
    product_draft.description = generator.generate(&product_draft.title).await.unwrap();

    let product = store
        .create_product(Product::from_draft(product_draft).unwrap())
        .await
        .unwrap();

    assert!(product.description.contains("Camel hair blanket"));
}

#[tokio::test]
async fn test_search_is_scoped_by_shop_when_requested() {
    let store = MockCatalogStore::new();
    let shop_a = ShopId::new();
    let shop_b = ShopId::new();

    store
        .create_product(
            Product::from_draft(draft(shop_a, "Rug", Money::new(dec!(100), Currency::MRU))).unwrap(),
        )
        .await
        .unwrap();
    store
        .create_product(
            Product::from_draft(draft(shop_b, "Rug deluxe", Money::new(dec!(200), Currency::MRU)))
                .unwrap(),
        )
        .await
        .unwrap();

    let query = ProductQuery {
        search: Some("rug".to_string()),
        shop_id: Some(shop_a),
    };
    let hits = store.search_products(query).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].shop_id, shop_a);
}

#[tokio::test]
async fn test_empty_query_lists_whole_catalog() {
    let store = MockCatalogStore::new();
    let shop = ShopId::new();
    for title in ["Rug", "Teapot", "Sandals"] {
        store
            .create_product(
                Product::from_draft(draft(shop, title, Money::new(dec!(50), Currency::MRU)))
                    .unwrap(),
            )
            .await
            .unwrap();
    }

    let hits = store.search_products(ProductQuery::default()).await.unwrap();
    assert_eq!(hits.len(), 3);
}

#[test]
fn test_validation_errors_name_the_offending_field() {
    let err = Product::from_draft(draft(
        ShopId::new(),
        "Rug",
        Money::new(dec!(-5), Currency::MRU),
    ))
    .unwrap_err();

    match err {
        CatalogError::Validation { field, message } => {
            assert_eq!(field, "price");
            assert!(message.contains("positive"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}
