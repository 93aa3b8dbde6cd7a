//! Local payment ledger entries
//!
//! A `LocalPayment` records a manually-submitted BANKILY transaction
//! reference awaiting human verification. Each entry is tied 1:1 to its
//! order and is mutated exactly once, when an administrator approves it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{LocalPaymentId, OrderId};

use crate::error::PaymentError;

/// A manually-submitted local payment awaiting verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalPayment {
    /// Unique identifier
    pub id: LocalPaymentId,
    /// The order this payment settles
    pub order_id: OrderId,
    /// Mobile-money transaction reference, unique across all local payments
    pub transaction_reference: String,
    /// False until an administrator approves the payment
    pub verified: bool,
    /// When the buyer submitted the reference
    pub submitted_at: DateTime<Utc>,
    /// When the administrator verified it
    pub verified_at: Option<DateTime<Utc>>,
}

impl LocalPayment {
    /// Creates an unverified ledger entry
    pub fn new(order_id: OrderId, transaction_reference: impl Into<String>) -> Result<Self, PaymentError> {
        let transaction_reference = transaction_reference.into().trim().to_string();
        if transaction_reference.is_empty() {
            return Err(PaymentError::MissingReference);
        }

        Ok(Self {
            id: LocalPaymentId::new_v7(),
            order_id,
            transaction_reference,
            verified: false,
            submitted_at: Utc::now(),
            verified_at: None,
        })
    }

    /// Marks the payment verified
    ///
    /// A verified entry never changes again; re-verification is rejected so
    /// commission can never be double-counted off this record.
    pub fn verify(&mut self) -> Result<(), PaymentError> {
        if self.verified {
            return Err(PaymentError::AlreadyProcessed(self.id.to_string()));
        }
        self.verified = true;
        self.verified_at = Some(Utc::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_payment_is_unverified() {
        let payment = LocalPayment::new(OrderId::new(), "TX123").unwrap();
        assert!(!payment.verified);
        assert!(payment.verified_at.is_none());
        assert_eq!(payment.transaction_reference, "TX123");
    }

    #[test]
    fn test_new_trims_reference() {
        let payment = LocalPayment::new(OrderId::new(), "  TX123  ").unwrap();
        assert_eq!(payment.transaction_reference, "TX123");
    }

    #[test]
    fn test_empty_reference_is_rejected() {
        let result = LocalPayment::new(OrderId::new(), "   ");
        assert!(matches!(result, Err(PaymentError::MissingReference)));
    }

    #[test]
    fn test_verify_sets_timestamp_once() {
        let mut payment = LocalPayment::new(OrderId::new(), "TX123").unwrap();
        payment.verify().unwrap();
        assert!(payment.verified);
        let first_verified_at = payment.verified_at;
        assert!(first_verified_at.is_some());

        let second = payment.verify();
        assert!(matches!(second, Err(PaymentError::AlreadyProcessed(_))));
        assert_eq!(payment.verified_at, first_verified_at);
    }
}
