//! Randomized test data generators

use core_kernel::{Currency, Money};
use fake::faker::company::en::{Buzzword, CompanyName};
use fake::Fake;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Generates a random product title
pub fn random_product_title() -> String {
    let adjective: String = Buzzword().fake();
    let noun: String = CompanyName().fake();
    format!("{adjective} {noun}")
}

/// Generates a random shop name
pub fn random_shop_name() -> String {
    CompanyName().fake()
}

/// Generates a random positive MRU price below 10,000.00
pub fn random_price() -> Money {
    let minor: i64 = (1i64..1_000_000i64).fake();
    Money::from_minor(minor, Currency::MRU)
}

/// Generates a unique transaction reference
pub fn random_transaction_reference() -> String {
    format!("TX-{}", Uuid::new_v4().simple())
}

/// Proptest strategy helpers
pub mod strategies {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for order totals in minor units
    pub fn order_total_minor() -> impl Strategy<Value = i64> {
        1i64..100_000_000i64
    }

    /// Strategy for commission rates between 0 and 25%
    pub fn commission_rate() -> impl Strategy<Value = Decimal> {
        (0u32..=2500u32).prop_map(|basis_points| Decimal::new(basis_points as i64, 4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_price_is_positive() {
        for _ in 0..100 {
            assert!(random_price().is_positive());
        }
    }

    #[test]
    fn test_random_references_are_unique() {
        let a = random_transaction_reference();
        let b = random_transaction_reference();
        assert_ne!(a, b);
    }
}
