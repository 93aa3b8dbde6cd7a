//! Admin handlers
//!
//! The reconciliation back office: reviewing pending local payments and
//! approving them. All routes require the `payments:approve` role.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::auth::{has_role, permissions, Claims};
use crate::dto::payments::*;
use crate::{error::ApiError, AppState};

fn require_approver(claims: &Claims) -> Result<(), ApiError> {
    if !has_role(claims, permissions::PAYMENTS_APPROVE) {
        return Err(ApiError::Forbidden(format!(
            "requires role {}",
            permissions::PAYMENTS_APPROVE
        )));
    }
    Ok(())
}

/// Lists local payments awaiting verification
pub async fn list_local_payments(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<LocalPaymentResponse>>, ApiError> {
    require_approver(&claims)?;

    let pending = state.reconciliation.pending_local_payments().await?;
    Ok(Json(pending.into_iter().map(Into::into).collect()))
}

/// Approves a local payment
///
/// Verifies the payment, settles the order, and reports the platform
/// commission computed at the configured rate.
pub async fn approve_local_payment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(payment_id): Path<Uuid>,
) -> Result<Json<ApprovalResponse>, ApiError> {
    require_approver(&claims)?;

    let outcome = state
        .reconciliation
        .approve_local_payment(payment_id.into())
        .await?;

    Ok(Json(outcome.into()))
}
