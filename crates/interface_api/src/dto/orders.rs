//! Order DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_orders::{Order, OrderLine};

#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutRequest {
    pub buyer_id: Uuid,
    #[validate(length(min = 1))]
    pub lines: Vec<CheckoutLine>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CheckoutLine {
    pub product_id: Uuid,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub struct OrderLineResponse {
    pub product_id: Uuid,
    pub title: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl From<&OrderLine> for OrderLineResponse {
    fn from(line: &OrderLine) -> Self {
        Self {
            product_id: line.product_id.into(),
            title: line.title.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price.amount(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub status: String,
    pub total: Decimal,
    pub currency: String,
    pub lines: Vec<OrderLineResponse>,
    pub settlement_reference: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.into(),
            buyer_id: order.buyer_id.into(),
            status: order.status.to_string(),
            total: order.total.amount(),
            currency: order.total.currency().code().to_string(),
            lines: order.lines.iter().map(OrderLineResponse::from).collect(),
            settlement_reference: order.settlement_reference,
            paid_at: order.paid_at,
            created_at: order.created_at,
        }
    }
}
