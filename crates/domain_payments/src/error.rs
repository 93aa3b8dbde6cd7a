//! Payment domain errors
//!
//! One variant per entry in the reconciliation error taxonomy, so the API
//! layer can map each failure to a distinct machine-readable code.

use thiserror::Error;

use core_kernel::{LocalPaymentId, OrderId};
use domain_orders::{OrderError, OrderStatus};

/// Errors that can occur in the payment reconciliation workflow
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Order lookup miss
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// Local payment lookup miss
    #[error("Local payment not found: {0}")]
    PaymentNotFound(LocalPaymentId),

    /// The requested method is not one of the recognized literals
    #[error("Unsupported payment method: {0}")]
    UnsupportedMethod(String),

    /// The transaction reference is already held by another local payment
    #[error("Duplicate transaction reference: {0}")]
    DuplicateReference(String),

    /// The payment or order has already been settled
    #[error("Already processed: {0}")]
    AlreadyProcessed(String),

    /// BANKILY submission without a transaction reference
    #[error("A transaction reference is required for local payments")]
    MissingReference,

    /// The order is not in a state that allows this operation
    #[error("Invalid order status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// The external card gateway failed
    #[error("Payment gateway error: {0}")]
    Gateway(String),

    /// Underlying storage failure
    #[error("Reconciliation store error: {0}")]
    Store(String),
}

impl From<OrderError> for PaymentError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::InvalidStatusTransition { from, to } => {
                PaymentError::InvalidTransition { from, to }
            }
            other => PaymentError::Store(other.to_string()),
        }
    }
}

impl PaymentError {
    /// Returns true if this error indicates a lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PaymentError::OrderNotFound(_) | PaymentError::PaymentNotFound(_)
        )
    }
}
