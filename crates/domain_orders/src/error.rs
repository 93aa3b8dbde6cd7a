//! Order domain errors

use thiserror::Error;

use core_kernel::money::MoneyError;

use crate::order::OrderStatus;

/// Errors that can occur in the order domain
#[derive(Debug, Error)]
pub enum OrderError {
    /// The requested status change would move the order backward or skip a step
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

    /// A status string from storage or the wire was not recognized
    #[error("Unknown order status: {0}")]
    UnknownStatus(String),

    /// Checkout with no lines
    #[error("Order must contain at least one line")]
    EmptyOrder,

    /// Money arithmetic failure (mixed currencies across lines)
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Other validation failure
    #[error("Validation error: {0}")]
    Validation(String),
}
