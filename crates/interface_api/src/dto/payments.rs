//! Payment DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_payments::{ApprovalOutcome, LocalPayment};

#[derive(Debug, Deserialize)]
pub struct InitiatePaymentRequest {
    /// Payment method literal, e.g. "STRIPE" or "BANKILY"
    pub method: String,
    /// Mobile-money transaction reference, required for BANKILY
    pub transaction_reference: Option<String>,
}

/// Response for a payment initiation
///
/// The STRIPE path answers with the client secret; the BANKILY path answers
/// with an acknowledgement carrying the parked payment.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PaymentInitiatedResponse {
    Gateway {
        client_secret: String,
        reference: String,
    },
    Local {
        message: String,
        payment_id: Uuid,
        order_status: String,
    },
}

#[derive(Debug, Deserialize, Validate)]
pub struct GatewayConfirmationRequest {
    pub order_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub reference: String,
}

#[derive(Debug, Serialize)]
pub struct LocalPaymentResponse {
    pub id: Uuid,
    pub order_id: Uuid,
    pub transaction_reference: String,
    pub verified: bool,
    pub submitted_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
}

impl From<LocalPayment> for LocalPaymentResponse {
    fn from(payment: LocalPayment) -> Self {
        Self {
            id: payment.id.into(),
            order_id: payment.order_id.into(),
            transaction_reference: payment.transaction_reference,
            verified: payment.verified,
            submitted_at: payment.submitted_at,
            verified_at: payment.verified_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApprovalResponse {
    pub message: String,
    pub payment_id: Uuid,
    pub order_id: Uuid,
    pub order_status: String,
    pub commission: Decimal,
    pub currency: String,
}

impl From<ApprovalOutcome> for ApprovalResponse {
    fn from(outcome: ApprovalOutcome) -> Self {
        Self {
            message: format!(
                "Local payment verified, platform commission: {}",
                outcome.commission.amount
            ),
            payment_id: outcome.payment.id.into(),
            order_id: outcome.order.id.into(),
            order_status: outcome.order.status.to_string(),
            commission: outcome.commission.amount.amount(),
            currency: outcome.commission.amount.currency().code().to_string(),
        }
    }
}
