//! Payment handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use domain_payments::PaymentOutcome;

use crate::dto::orders::OrderResponse;
use crate::dto::payments::*;
use crate::{error::ApiError, AppState};

/// Initiates payment for an order
///
/// Routes to the card gateway or the local mobile-money ledger depending on
/// the requested method.
pub async fn initiate_payment(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(request): Json<InitiatePaymentRequest>,
) -> Result<Json<PaymentInitiatedResponse>, ApiError> {
    let outcome = state
        .reconciliation
        .initiate_payment(
            order_id.into(),
            &request.method,
            request.transaction_reference,
        )
        .await?;

    let response = match outcome {
        PaymentOutcome::GatewayIntent {
            reference,
            client_secret,
        } => PaymentInitiatedResponse::Gateway {
            client_secret,
            reference,
        },
        PaymentOutcome::LocalPending(payment) => PaymentInitiatedResponse::Local {
            message: "Local payment received, awaiting admin confirmation".to_string(),
            payment_id: payment.id.into(),
            order_status: "AWAITING_CONFIRMATION".to_string(),
        },
    };

    Ok(Json(response))
}

/// Gateway confirmation callback
///
/// The card processor reports a completed intent; the order settles and the
/// platform commission is recorded.
pub async fn confirm_gateway_payment(
    State(state): State<AppState>,
    Json(request): Json<GatewayConfirmationRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    request.validate()?;

    let order = state
        .reconciliation
        .confirm_gateway_payment(request.order_id.into(), &request.reference)
        .await?;

    Ok(Json(order.into()))
}
