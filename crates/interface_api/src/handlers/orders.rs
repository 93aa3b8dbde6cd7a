//! Order handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use domain_orders::{Order, OrderLine};

use crate::dto::orders::*;
use crate::{error::ApiError, AppState};

/// Checks out a new order
///
/// Unit prices come from the catalog at this moment and are captured on the
/// order lines; the stored total never changes afterwards.
pub async fn checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    request.validate()?;

    let mut lines = Vec::with_capacity(request.lines.len());
    for line in &request.lines {
        let product = state.catalog.get_product(line.product_id.into()).await?;
        lines.push(OrderLine::new(
            product.id,
            product.title,
            line.quantity,
            product.price,
        ));
    }

    let order = Order::checkout(request.buyer_id.into(), lines)?;
    let order = state.store.create_order(order).await?;
    Ok(Json(order.into()))
}

/// Gets an order by ID
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state.store.get_order(id.into()).await?;
    Ok(Json(order.into()))
}
