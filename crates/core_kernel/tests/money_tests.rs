//! Comprehensive unit tests for the Money module
//!
//! Tests cover money creation, arithmetic operations, currency handling,
//! rate application, and edge cases.

use core_kernel::{Currency, Money, MoneyError, Rate};
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_creates_money_with_correct_amount() {
        let m = Money::new(dec!(100.50), Currency::MRU);
        assert_eq!(m.amount(), dec!(100.50));
        assert_eq!(m.currency(), Currency::MRU);
    }

    #[test]
    fn test_new_rounds_to_four_decimal_places() {
        let m = Money::new(dec!(100.123456789), Currency::MRU);
        assert_eq!(m.amount(), dec!(100.1235));
    }

    #[test]
    fn test_from_minor_converts_cents_correctly() {
        let m = Money::from_minor(10050, Currency::USD);
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_from_minor_handles_xof_no_decimals() {
        let m = Money::from_minor(10000, Currency::XOF);
        assert_eq!(m.amount(), dec!(10000));
    }

    #[test]
    fn test_zero_creates_zero_amount() {
        let m = Money::zero(Currency::EUR);
        assert!(m.is_zero());
        assert_eq!(m.currency(), Currency::EUR);
    }
}

mod predicates {
    use super::*;

    #[test]
    fn test_is_zero_true_for_zero_amount() {
        assert!(Money::zero(Currency::MRU).is_zero());
    }

    #[test]
    fn test_is_positive() {
        assert!(Money::new(dec!(1), Currency::MRU).is_positive());
        assert!(!Money::zero(Currency::MRU).is_positive());
        assert!(!Money::new(dec!(-1), Currency::MRU).is_positive());
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_addition_same_currency() {
        let a = Money::new(dec!(100.25), Currency::MRU);
        let b = Money::new(dec!(50.75), Currency::MRU);
        assert_eq!((a + b).amount(), dec!(151.00));
    }

    #[test]
    fn test_subtraction_same_currency() {
        let a = Money::new(dec!(100.00), Currency::MRU);
        let b = Money::new(dec!(30.00), Currency::MRU);
        assert_eq!((a - b).amount(), dec!(70.00));
    }

    #[test]
    fn test_checked_add_rejects_currency_mismatch() {
        let mru = Money::new(dec!(100.00), Currency::MRU);
        let usd = Money::new(dec!(100.00), Currency::USD);
        assert!(matches!(
            mru.checked_add(&usd),
            Err(MoneyError::CurrencyMismatch(_, _))
        ));
    }

    #[test]
    fn test_checked_sub_rejects_currency_mismatch() {
        let mru = Money::new(dec!(100.00), Currency::MRU);
        let eur = Money::new(dec!(10.00), Currency::EUR);
        assert!(mru.checked_sub(&eur).is_err());
    }

    #[test]
    fn test_multiply_by_quantity() {
        let unit = Money::new(dec!(250.00), Currency::MRU);
        assert_eq!(unit.multiply(dec!(3)).amount(), dec!(750.00));
    }

    #[test]
    fn test_minor_units_round_trip() {
        let m = Money::new(dec!(1234.56), Currency::MRU);
        assert_eq!(m.minor_units(), 123456);
        assert_eq!(Money::from_minor(m.minor_units(), Currency::MRU), m.round_to_currency());
    }
}

mod rates {
    use super::*;

    #[test]
    fn test_rate_from_percentage() {
        let rate = Rate::from_percentage(dec!(5.0));
        assert_eq!(rate.as_decimal(), dec!(0.05));
        assert_eq!(rate.as_percentage(), dec!(5.0));
    }

    #[test]
    fn test_commission_rate_applied_to_order_total() {
        let rate = Rate::from_percentage(dec!(5.0));
        let total = Money::new(dec!(2000.00), Currency::MRU);
        assert_eq!(rate.apply(&total).amount(), dec!(100.00));
    }

    #[test]
    fn test_rate_display() {
        let rate = Rate::new(dec!(0.05));
        assert_eq!(rate.to_string(), "5.00%");
    }
}

mod serialization {
    use super::*;

    #[test]
    fn test_money_serde_round_trip() {
        let m = Money::new(dec!(99.95), Currency::MRU);
        let json = serde_json::to_string(&m).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }

    #[test]
    fn test_currency_serializes_uppercase() {
        let json = serde_json::to_string(&Currency::MRU).unwrap();
        assert_eq!(json, "\"MRU\"");
    }
}
