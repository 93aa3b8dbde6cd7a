//! Reconciliation persistence boundary
//!
//! The `ReconciliationStore` trait is the single seam between the workflow
//! and storage. The three mutating operations are each atomic: either every
//! write in the operation lands, or none do. The PostgreSQL adapter in
//! `infra_db` uses row-locking transactions; the in-memory mock holds one
//! mutex across the same read-check-write sequence.

use async_trait::async_trait;

use core_kernel::{DomainPort, LocalPaymentId, OrderId};
use domain_orders::{CommissionRecord, Order};

use crate::error::PaymentError;
use crate::local_payment::LocalPayment;

/// Result of a successful admin approval
#[derive(Debug, Clone)]
pub struct ApprovalOutcome {
    /// The now-verified payment
    pub payment: LocalPayment,
    /// The order, now Paid
    pub order: Order,
    /// The commission recorded for the platform
    pub commission: CommissionRecord,
}

/// Persistence port for the reconciliation workflow
#[async_trait]
pub trait ReconciliationStore: DomainPort {
    /// Persists a freshly checked-out order
    async fn create_order(&self, order: Order) -> Result<Order, PaymentError>;

    /// Retrieves an order by id
    async fn get_order(&self, id: OrderId) -> Result<Order, PaymentError>;

    /// Retrieves a local payment by id
    async fn get_local_payment(&self, id: LocalPaymentId) -> Result<LocalPayment, PaymentError>;

    /// Lists local payments still awaiting verification
    async fn list_unverified_payments(&self) -> Result<Vec<LocalPayment>, PaymentError>;

    /// Records a local payment and moves its order to AwaitingConfirmation
    ///
    /// Atomic. Fails with `DuplicateReference` if the transaction reference
    /// is already held by any local payment, and with `InvalidTransition` if
    /// the order is not Pending.
    async fn record_local_payment(&self, payment: LocalPayment)
        -> Result<LocalPayment, PaymentError>;

    /// Verifies a local payment, marks its order Paid, and records commission
    ///
    /// Atomic. The verified flag is re-checked inside the critical section,
    /// so the second of two concurrent approvals gets `AlreadyProcessed` and
    /// the commission is recorded exactly once.
    async fn approve_local_payment(
        &self,
        id: LocalPaymentId,
        commission: CommissionRecord,
    ) -> Result<ApprovalOutcome, PaymentError>;

    /// Settles a gateway-paid order and records commission
    ///
    /// Atomic. Moves the order Pending -> Paid with the gateway reference;
    /// an order already Paid yields `AlreadyProcessed`.
    async fn settle_gateway_payment(
        &self,
        order_id: OrderId,
        reference: &str,
        commission: CommissionRecord,
    ) -> Result<Order, PaymentError>;

    /// Lists commission records for an order
    async fn list_commissions(&self, order_id: OrderId)
        -> Result<Vec<CommissionRecord>, PaymentError>;
}

/// In-memory mock implementation of ReconciliationStore for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use domain_orders::OrderStatus;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Debug, Default)]
    struct MemoryState {
        orders: HashMap<OrderId, Order>,
        payments: HashMap<LocalPaymentId, LocalPayment>,
        commissions: Vec<CommissionRecord>,
    }

    /// In-memory reconciliation store
    ///
    /// A single mutex guards all state, which makes every trait operation a
    /// critical section - the same exclusivity the Postgres adapter gets
    /// from row locks.
    #[derive(Debug, Default)]
    pub struct MemoryReconciliationStore {
        state: Mutex<MemoryState>,
    }

    impl MemoryReconciliationStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates the store with orders
        pub async fn with_orders(orders: Vec<Order>) -> Self {
            let store = Self::new();
            {
                let mut state = store.state.lock().await;
                for order in orders {
                    state.orders.insert(order.id, order);
                }
            }
            store
        }
    }

    impl DomainPort for MemoryReconciliationStore {}

    #[async_trait]
    impl ReconciliationStore for MemoryReconciliationStore {
        async fn create_order(&self, order: Order) -> Result<Order, PaymentError> {
            let mut state = self.state.lock().await;
            state.orders.insert(order.id, order.clone());
            Ok(order)
        }

        async fn get_order(&self, id: OrderId) -> Result<Order, PaymentError> {
            self.state
                .lock()
                .await
                .orders
                .get(&id)
                .cloned()
                .ok_or(PaymentError::OrderNotFound(id))
        }

        async fn get_local_payment(
            &self,
            id: LocalPaymentId,
        ) -> Result<LocalPayment, PaymentError> {
            self.state
                .lock()
                .await
                .payments
                .get(&id)
                .cloned()
                .ok_or(PaymentError::PaymentNotFound(id))
        }

        async fn list_unverified_payments(&self) -> Result<Vec<LocalPayment>, PaymentError> {
            let state = self.state.lock().await;
            let mut pending: Vec<LocalPayment> = state
                .payments
                .values()
                .filter(|p| !p.verified)
                .cloned()
                .collect();
            pending.sort_by_key(|p| p.submitted_at);
            Ok(pending)
        }

        async fn record_local_payment(
            &self,
            payment: LocalPayment,
        ) -> Result<LocalPayment, PaymentError> {
            let mut state = self.state.lock().await;

            if state
                .payments
                .values()
                .any(|p| p.transaction_reference == payment.transaction_reference)
            {
                return Err(PaymentError::DuplicateReference(
                    payment.transaction_reference.clone(),
                ));
            }

            let order = state
                .orders
                .get_mut(&payment.order_id)
                .ok_or(PaymentError::OrderNotFound(payment.order_id))?;
            order.transition(OrderStatus::AwaitingConfirmation)?;

            state.payments.insert(payment.id, payment.clone());
            Ok(payment)
        }

        async fn approve_local_payment(
            &self,
            id: LocalPaymentId,
            commission: CommissionRecord,
        ) -> Result<ApprovalOutcome, PaymentError> {
            let mut state = self.state.lock().await;

            let payment = state
                .payments
                .get_mut(&id)
                .ok_or(PaymentError::PaymentNotFound(id))?;
            payment.verify()?;
            let payment = payment.clone();

            let order = state
                .orders
                .get_mut(&payment.order_id)
                .ok_or(PaymentError::OrderNotFound(payment.order_id))?;
            order.mark_paid(Some(&payment.transaction_reference))?;
            let order = order.clone();

            state.commissions.push(commission.clone());
            Ok(ApprovalOutcome {
                payment,
                order,
                commission,
            })
        }

        async fn settle_gateway_payment(
            &self,
            order_id: OrderId,
            reference: &str,
            commission: CommissionRecord,
        ) -> Result<Order, PaymentError> {
            let mut state = self.state.lock().await;

            let order = state
                .orders
                .get_mut(&order_id)
                .ok_or(PaymentError::OrderNotFound(order_id))?;
            if order.is_paid() {
                return Err(PaymentError::AlreadyProcessed(order_id.to_string()));
            }
            order.mark_paid(Some(reference))?;
            let order = order.clone();

            state.commissions.push(commission);
            Ok(order)
        }

        async fn list_commissions(
            &self,
            order_id: OrderId,
        ) -> Result<Vec<CommissionRecord>, PaymentError> {
            let state = self.state.lock().await;
            Ok(state
                .commissions
                .iter()
                .filter(|c| c.order_id == order_id)
                .cloned()
                .collect())
        }
    }
}
