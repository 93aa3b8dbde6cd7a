//! Reconciliation workflow
//!
//! `ReconciliationService` is the application service behind the payment
//! endpoints. It owns the business rules - method dispatch, the
//! not-yet-verified precondition, commission computation - and delegates
//! atomicity to the store and external calls to the gateway port.

use std::str::FromStr;
use std::sync::Arc;

use tracing::{info, warn};

use core_kernel::{LocalPaymentId, OrderId};
use domain_orders::{CommissionPolicy, Order, OrderStatus};

use crate::error::PaymentError;
use crate::gateway::PaymentGateway;
use crate::local_payment::LocalPayment;
use crate::method::PaymentMethod;
use crate::store::{ApprovalOutcome, ReconciliationStore};

/// Result of a payment initiation
#[derive(Debug, Clone)]
pub enum PaymentOutcome {
    /// STRIPE path: the client completes the card flow with this secret
    GatewayIntent {
        reference: String,
        client_secret: String,
    },
    /// BANKILY path: the payment is parked until an administrator verifies it
    LocalPending(LocalPayment),
}

/// Orchestrates payment dispatch, admin approval, and gateway confirmation
pub struct ReconciliationService {
    store: Arc<dyn ReconciliationStore>,
    gateway: Arc<dyn PaymentGateway>,
    policy: CommissionPolicy,
}

impl ReconciliationService {
    pub fn new(
        store: Arc<dyn ReconciliationStore>,
        gateway: Arc<dyn PaymentGateway>,
        policy: CommissionPolicy,
    ) -> Self {
        Self {
            store,
            gateway,
            policy,
        }
    }

    /// Returns the commission policy in force
    pub fn policy(&self) -> CommissionPolicy {
        self.policy
    }

    /// Routes a payment request to the correct path
    ///
    /// The method string is parsed before anything is read or written, so an
    /// unsupported method can never mutate state. The STRIPE path leaves the
    /// order untouched - settlement arrives via `confirm_gateway_payment`.
    pub async fn initiate_payment(
        &self,
        order_id: OrderId,
        method: &str,
        transaction_reference: Option<String>,
    ) -> Result<PaymentOutcome, PaymentError> {
        let method = PaymentMethod::from_str(method)?;
        let order = self.store.get_order(order_id).await?;

        match method {
            PaymentMethod::Stripe => {
                let intent = self
                    .gateway
                    .create_intent(order.id, order.total)
                    .await
                    .map_err(|e| {
                        warn!(%order_id, error = %e, "gateway intent creation failed");
                        PaymentError::Gateway(e.to_string())
                    })?;

                info!(%order_id, reference = %intent.reference, "gateway intent created");
                Ok(PaymentOutcome::GatewayIntent {
                    reference: intent.reference,
                    client_secret: intent.client_secret,
                })
            }
            PaymentMethod::Bankily => {
                let reference = transaction_reference
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty())
                    .ok_or(PaymentError::MissingReference)?;

                // Fail fast before touching the ledger; the store re-checks
                // the transition inside its critical section.
                if !order.can_transition_to(OrderStatus::AwaitingConfirmation) {
                    return Err(PaymentError::InvalidTransition {
                        from: order.status,
                        to: OrderStatus::AwaitingConfirmation,
                    });
                }

                let payment = LocalPayment::new(order.id, reference)?;
                let recorded = self.store.record_local_payment(payment).await?;

                info!(
                    %order_id,
                    payment_id = %recorded.id,
                    reference = %recorded.transaction_reference,
                    "local payment recorded, order awaiting confirmation"
                );
                Ok(PaymentOutcome::LocalPending(recorded))
            }
        }
    }

    /// Approves a pending local payment
    ///
    /// Verifies the payment, settles its order, and records the platform
    /// commission - all in one atomic store operation. Approving an
    /// already-verified payment is rejected with `AlreadyProcessed`; the
    /// commission is never recomputed.
    pub async fn approve_local_payment(
        &self,
        payment_id: LocalPaymentId,
    ) -> Result<ApprovalOutcome, PaymentError> {
        let payment = self.store.get_local_payment(payment_id).await?;
        if payment.verified {
            return Err(PaymentError::AlreadyProcessed(payment_id.to_string()));
        }

        let order = self.store.get_order(payment.order_id).await?;
        let commission = self.policy.compute(&order).for_local_payment(payment_id);

        let outcome = self
            .store
            .approve_local_payment(payment_id, commission)
            .await?;

        info!(
            %payment_id,
            order_id = %outcome.order.id,
            commission = %outcome.commission.amount,
            "local payment approved"
        );
        Ok(outcome)
    }

    /// Settles an order confirmed by the card gateway
    ///
    /// The confirmation callback carries the gateway's intent reference; the
    /// order moves Pending -> Paid and commission is recorded, mirroring the
    /// local path.
    pub async fn confirm_gateway_payment(
        &self,
        order_id: OrderId,
        reference: &str,
    ) -> Result<Order, PaymentError> {
        let order = self.store.get_order(order_id).await?;
        if order.is_paid() {
            return Err(PaymentError::AlreadyProcessed(order_id.to_string()));
        }

        let commission = self.policy.compute(&order);
        let order = self
            .store
            .settle_gateway_payment(order_id, reference, commission)
            .await?;

        info!(%order_id, %reference, "gateway payment confirmed");
        Ok(order)
    }

    /// Lists local payments awaiting admin review
    pub async fn pending_local_payments(&self) -> Result<Vec<LocalPayment>, PaymentError> {
        self.store.list_unverified_payments().await
    }
}
