//! Order aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{BuyerId, Money, OrderId, ProductId};

use crate::error::OrderError;

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Created at checkout, no payment yet
    Pending,
    /// Local payment submitted, waiting for admin verification
    AwaitingConfirmation,
    /// Payment settled
    Paid,
    /// Handed to fulfillment
    Shipped,
}

impl OrderStatus {
    /// Wire/storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::AwaitingConfirmation => "AWAITING_CONFIRMATION",
            OrderStatus::Paid => "PAID",
            OrderStatus::Shipped => "SHIPPED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "AWAITING_CONFIRMATION" => Ok(OrderStatus::AwaitingConfirmation),
            "PAID" => Ok(OrderStatus::Paid),
            "SHIPPED" => Ok(OrderStatus::Shipped),
            other => Err(OrderError::UnknownStatus(other.to_string())),
        }
    }
}

/// A priced line on an order
///
/// The unit price is captured from the catalog at checkout so later price
/// edits never change what the buyer owes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product being purchased
    pub product_id: ProductId,
    /// Title snapshot for display and audit
    pub title: String,
    /// Quantity purchased
    pub quantity: u32,
    /// Unit price at checkout time
    pub unit_price: Money,
}

impl OrderLine {
    pub fn new(
        product_id: ProductId,
        title: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Self {
        Self {
            product_id,
            title: title.into(),
            quantity,
            unit_price,
        }
    }

    /// Line total: unit price times quantity
    pub fn total(&self) -> Money {
        self.unit_price
            .multiply(rust_decimal::Decimal::from(self.quantity))
    }
}

/// An order placed by a buyer
///
/// Orders are never deleted - the row is the audit trail for the sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier
    pub id: OrderId,
    /// The buyer who checked out
    pub buyer_id: BuyerId,
    /// Lifecycle status
    pub status: OrderStatus,
    /// Order lines with captured prices
    pub lines: Vec<OrderLine>,
    /// Stored total across all lines
    pub total: Money,
    /// Settlement reference from the gateway or the local channel
    pub settlement_reference: Option<String>,
    /// When the order reached Paid
    pub paid_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a Pending order from checkout lines
    ///
    /// All lines must share one currency; the stored total is the sum of the
    /// line totals.
    pub fn checkout(buyer_id: BuyerId, lines: Vec<OrderLine>) -> Result<Self, OrderError> {
        let first = lines.first().ok_or(OrderError::EmptyOrder)?;
        if lines.iter().any(|l| l.quantity == 0) {
            return Err(OrderError::Validation(
                "line quantity must be at least 1".to_string(),
            ));
        }

        let mut total = Money::zero(first.unit_price.currency());
        for line in &lines {
            total = total.checked_add(&line.total())?;
        }

        let now = Utc::now();
        Ok(Self {
            id: OrderId::new_v7(),
            buyer_id,
            status: OrderStatus::Pending,
            lines,
            total,
            settlement_reference: None,
            paid_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Checks whether a transition is allowed
    ///
    /// The status machine is monotonic: once an order has advanced it can
    /// never return to an earlier state.
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self.status, target),
            (Pending, AwaitingConfirmation) | (Pending, Paid) | (AwaitingConfirmation, Paid) | (Paid, Shipped)
        )
    }

    /// Moves the order to a new status, rejecting invalid transitions
    pub fn transition(&mut self, target: OrderStatus) -> Result<(), OrderError> {
        if !self.can_transition_to(target) {
            return Err(OrderError::InvalidStatusTransition {
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Transitions to Paid and records the settlement reference
    pub fn mark_paid(&mut self, reference: Option<&str>) -> Result<(), OrderError> {
        self.transition(OrderStatus::Paid)?;
        self.settlement_reference = reference.map(str::to_string);
        self.paid_at = Some(Utc::now());
        Ok(())
    }

    /// Returns true once payment has settled
    pub fn is_paid(&self) -> bool {
        matches!(self.status, OrderStatus::Paid | OrderStatus::Shipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn line(price: Money, quantity: u32) -> OrderLine {
        OrderLine::new(ProductId::new(), "Rug", quantity, price)
    }

    fn pending_order(total: Money) -> Order {
        Order::checkout(BuyerId::new(), vec![line(total, 1)]).unwrap()
    }

    #[test]
    fn test_checkout_computes_total_across_lines() {
        let order = Order::checkout(
            BuyerId::new(),
            vec![
                line(Money::new(dec!(100.00), Currency::MRU), 2),
                line(Money::new(dec!(50.00), Currency::MRU), 1),
            ],
        )
        .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total.amount(), dec!(250.00));
    }

    #[test]
    fn test_checkout_rejects_empty_order() {
        assert!(matches!(
            Order::checkout(BuyerId::new(), vec![]),
            Err(OrderError::EmptyOrder)
        ));
    }

    #[test]
    fn test_checkout_rejects_mixed_currencies() {
        let result = Order::checkout(
            BuyerId::new(),
            vec![
                line(Money::new(dec!(100), Currency::MRU), 1),
                line(Money::new(dec!(10), Currency::USD), 1),
            ],
        );
        assert!(matches!(result, Err(OrderError::Money(_))));
    }

    #[test]
    fn test_checkout_rejects_zero_quantity() {
        let result = Order::checkout(
            BuyerId::new(),
            vec![line(Money::new(dec!(100), Currency::MRU), 0)],
        );
        assert!(matches!(result, Err(OrderError::Validation(_))));
    }

    #[test]
    fn test_local_path_transitions() {
        let mut order = pending_order(Money::new(dec!(2000), Currency::MRU));

        order.transition(OrderStatus::AwaitingConfirmation).unwrap();
        order.transition(OrderStatus::Paid).unwrap();
        order.transition(OrderStatus::Shipped).unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);
    }

    #[test]
    fn test_gateway_path_skips_confirmation() {
        let mut order = pending_order(Money::new(dec!(500), Currency::MRU));
        order.mark_paid(Some("pi_123")).unwrap();

        assert_eq!(order.status, OrderStatus::Paid);
        assert_eq!(order.settlement_reference.as_deref(), Some("pi_123"));
        assert!(order.paid_at.is_some());
    }

    #[test]
    fn test_no_backward_transitions() {
        let mut order = pending_order(Money::new(dec!(500), Currency::MRU));
        order.mark_paid(None).unwrap();

        let back = order.transition(OrderStatus::Pending);
        assert!(matches!(
            back,
            Err(OrderError::InvalidStatusTransition {
                from: OrderStatus::Paid,
                to: OrderStatus::Pending,
            })
        ));
        assert_eq!(order.status, OrderStatus::Paid);
    }

    #[test]
    fn test_status_string_round_trip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::AwaitingConfirmation,
            OrderStatus::Paid,
            OrderStatus::Shipped,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("CANCELLED".parse::<OrderStatus>().is_err());
    }
}
