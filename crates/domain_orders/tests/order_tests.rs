//! Comprehensive tests for domain_orders
//!
//! Exercises the order lifecycle and commission calculation the way the
//! payment workflow drives them.

use core_kernel::{BuyerId, Currency, Money, ProductId};
use rust_decimal_macros::dec;

use domain_orders::{CommissionPolicy, Order, OrderError, OrderLine, OrderStatus};

fn checkout(total_minor: i64) -> Order {
    Order::checkout(
        BuyerId::new(),
        vec![OrderLine::new(
            ProductId::new(),
            "Woven rug",
            1,
            Money::from_minor(total_minor, Currency::MRU),
        )],
    )
    .unwrap()
}

mod lifecycle {
    use super::*;

    #[test]
    fn test_new_order_is_pending() {
        let order = checkout(100_000);
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(!order.is_paid());
        assert!(order.paid_at.is_none());
    }

    #[test]
    fn test_local_payment_path_reaches_paid_through_confirmation() {
        let mut order = checkout(200_000);

        order.transition(OrderStatus::AwaitingConfirmation).unwrap();
        assert!(!order.is_paid());

        order.mark_paid(Some("TX123")).unwrap();
        assert!(order.is_paid());
        assert_eq!(order.settlement_reference.as_deref(), Some("TX123"));
    }

    #[test]
    fn test_cannot_skip_from_awaiting_to_shipped() {
        let mut order = checkout(100_000);
        order.transition(OrderStatus::AwaitingConfirmation).unwrap();

        let result = order.transition(OrderStatus::Shipped);
        assert!(matches!(
            result,
            Err(OrderError::InvalidStatusTransition { .. })
        ));
        assert_eq!(order.status, OrderStatus::AwaitingConfirmation);
    }

    #[test]
    fn test_paid_cannot_revert_to_awaiting_confirmation() {
        let mut order = checkout(100_000);
        order.mark_paid(None).unwrap();

        assert!(order
            .transition(OrderStatus::AwaitingConfirmation)
            .is_err());
        assert_eq!(order.status, OrderStatus::Paid);
    }

    #[test]
    fn test_double_mark_paid_is_rejected() {
        let mut order = checkout(100_000);
        order.mark_paid(Some("pi_1")).unwrap();

        let second = order.mark_paid(Some("pi_2"));
        assert!(second.is_err());
        // The original settlement reference is untouched
        assert_eq!(order.settlement_reference.as_deref(), Some("pi_1"));
    }
}

mod totals {
    use super::*;

    #[test]
    fn test_multi_line_total() {
        let order = Order::checkout(
            BuyerId::new(),
            vec![
                OrderLine::new(
                    ProductId::new(),
                    "Rug",
                    3,
                    Money::new(dec!(120.50), Currency::MRU),
                ),
                OrderLine::new(
                    ProductId::new(),
                    "Teapot",
                    1,
                    Money::new(dec!(89.99), Currency::MRU),
                ),
            ],
        )
        .unwrap();

        assert_eq!(order.total.amount(), dec!(451.49));
    }

    #[test]
    fn test_line_total_multiplies_quantity() {
        let line = OrderLine::new(
            ProductId::new(),
            "Sandals",
            4,
            Money::new(dec!(25.00), Currency::MRU),
        );
        assert_eq!(line.total().amount(), dec!(100.00));
    }
}

mod commission {
    use super::*;

    #[test]
    fn test_reference_commission_totals() {
        let policy = CommissionPolicy::default();

        let order_1000 = checkout(100_000);
        assert_eq!(policy.compute(&order_1000).amount.amount(), dec!(50.00));

        let order_2000 = checkout(200_000);
        assert_eq!(policy.compute(&order_2000).amount.amount(), dec!(100.00));
    }

    #[test]
    fn test_commission_currency_follows_order() {
        let order = Order::checkout(
            BuyerId::new(),
            vec![OrderLine::new(
                ProductId::new(),
                "Imported lamp",
                1,
                Money::new(dec!(40.00), Currency::USD),
            )],
        )
        .unwrap();

        let record = CommissionPolicy::default().compute(&order);
        assert_eq!(record.amount.currency(), Currency::USD);
        assert_eq!(record.amount.amount(), dec!(2.00));
    }
}
