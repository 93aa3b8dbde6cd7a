//! Platform commission
//!
//! The platform takes a percentage of every settled sale. The rate is
//! injected configuration, never a literal in the workflow, and every
//! computed commission is persisted as a `CommissionRecord` so the ledger
//! can be audited later.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{CommissionId, LocalPaymentId, Money, OrderId, Rate};

use crate::order::Order;

/// Commission policy applied to settled orders
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CommissionPolicy {
    rate: Rate,
}

impl CommissionPolicy {
    /// Creates a policy from a decimal rate (e.g., 0.05 for 5%)
    pub fn new(rate: Decimal) -> Self {
        Self {
            rate: Rate::new(rate),
        }
    }

    /// Returns the configured rate
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Computes the commission record for an order
    pub fn compute(&self, order: &Order) -> CommissionRecord {
        CommissionRecord {
            id: CommissionId::new_v7(),
            order_id: order.id,
            local_payment_id: None,
            rate: self.rate,
            amount: self.rate.apply(&order.total),
            computed_at: Utc::now(),
        }
    }
}

impl Default for CommissionPolicy {
    /// The platform's standard 5% cut
    fn default() -> Self {
        Self::new(dec!(0.05))
    }
}

/// A persisted commission entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionRecord {
    /// Unique identifier
    pub id: CommissionId,
    /// Order the commission was taken on
    pub order_id: OrderId,
    /// Local payment that triggered settlement, if any
    pub local_payment_id: Option<LocalPaymentId>,
    /// Rate applied
    pub rate: Rate,
    /// Commission amount
    pub amount: Money,
    /// When the commission was computed
    pub computed_at: DateTime<Utc>,
}

impl CommissionRecord {
    /// Links the record to the local payment that settled the order
    pub fn for_local_payment(mut self, payment_id: LocalPaymentId) -> Self {
        self.local_payment_id = Some(payment_id);
        self
    }
}
