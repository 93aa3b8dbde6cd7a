//! Catalog handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{Currency, Money};
use domain_catalog::{Product, ProductDraft, ProductQuery, Shop};

use crate::dto::catalog::*;
use crate::{error::ApiError, AppState};

/// Creates a new shop
pub async fn create_shop(
    State(state): State<AppState>,
    Json(request): Json<CreateShopRequest>,
) -> Result<Json<ShopResponse>, ApiError> {
    request.validate()?;

    let shop = Shop::new(request.seller_id.into(), request.name)?;
    let shop = state.catalog.create_shop(shop).await?;
    Ok(Json(shop.into()))
}

/// Creates a product, generating its marketing description
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    request.validate()?;

    let currency: Currency = request
        .currency
        .parse()
        .map_err(|e: core_kernel::MoneyError| ApiError::Validation(e.to_string()))?;

    // The shop must exist before we spend a generation call
    let shop = state.catalog.get_shop(request.shop_id.into()).await?;

    let description = state.descriptions.generate(&request.title).await?;

    let product = Product::from_draft(ProductDraft {
        shop_id: shop.id,
        title: request.title,
        description,
        price: Money::new(request.price, currency),
        image_url: request.image_url,
    })?;

    let product = state.catalog.create_product(product).await?;
    Ok(Json(product.into()))
}

/// Searches products by free text
pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let query = ProductQuery {
        search: params.search,
        shop_id: params.shop_id.map(Into::into),
    };

    let products = state.catalog.search_products(query).await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// Gets a product by ID
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.catalog.get_product(id.into()).await?;
    Ok(Json(product.into()))
}
