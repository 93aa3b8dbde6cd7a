//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for common entities across the marketplace.
//! Fixtures are consistent and predictable for unit tests.

use core_kernel::{Currency, Money};
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Standard order total used in the commission examples
    pub fn mru_1000() -> Money {
        Money::new(dec!(1000.00), Currency::MRU)
    }

    /// Larger order total, commission 100.00 at the default rate
    pub fn mru_2000() -> Money {
        Money::new(dec!(2000.00), Currency::MRU)
    }

    /// A typical product price
    pub fn mru_price() -> Money {
        Money::new(dec!(450.00), Currency::MRU)
    }

    /// Zero amount
    pub fn mru_zero() -> Money {
        Money::zero(Currency::MRU)
    }

    /// USD amount for currency mismatch tests
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }
}

/// Fixture for string test data
pub struct StringFixtures;

impl StringFixtures {
    /// A plausible mobile-money transaction reference
    pub fn transaction_reference() -> &'static str {
        "TX-20250114-0042"
    }

    /// A plausible gateway intent reference
    pub fn intent_reference() -> &'static str {
        "pi_3OaQbX2eZvKYlo2C"
    }

    /// A product title used across search tests
    pub fn product_title() -> &'static str {
        "Handwoven Saharan rug"
    }
}
