//! Custom assertion helpers for domain types

use core_kernel::Money;
use domain_orders::{Order, OrderStatus};

/// Asserts two money values are equal after rounding to currency scale
pub fn assert_money_eq(actual: Money, expected: Money) {
    assert_eq!(
        actual.round_to_currency(),
        expected.round_to_currency(),
        "expected {expected}, got {actual}"
    );
}

/// Asserts an order holds the expected status
pub fn assert_order_status(order: &Order, expected: OrderStatus) {
    assert_eq!(
        order.status, expected,
        "order {} expected status {expected}, got {}",
        order.id, order.status
    );
}
