//! Payment methods
//!
//! The method set is closed: the buyer either pays through the international
//! card gateway or submits a BANKILY mobile-money reference for manual
//! confirmation. Unknown method strings are an explicit error, never a
//! silent fall-through.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PaymentError;

/// Supported payment methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    /// International card processing via the external gateway
    Stripe,
    /// Local mobile-money transfer, verified manually by an administrator
    Bankily,
}

impl PaymentMethod {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Stripe => "STRIPE",
            PaymentMethod::Bankily => "BANKILY",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STRIPE" => Ok(PaymentMethod::Stripe),
            "BANKILY" => Ok(PaymentMethod::Bankily),
            other => Err(PaymentError::UnsupportedMethod(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_methods_parse() {
        assert_eq!("STRIPE".parse::<PaymentMethod>().unwrap(), PaymentMethod::Stripe);
        assert_eq!("bankily".parse::<PaymentMethod>().unwrap(), PaymentMethod::Bankily);
    }

    #[test]
    fn test_unknown_method_is_explicit_error() {
        let err = "CASH".parse::<PaymentMethod>().unwrap_err();
        assert!(matches!(err, PaymentError::UnsupportedMethod(m) if m == "CASH"));
    }

    #[test]
    fn test_display_round_trip() {
        for method in [PaymentMethod::Stripe, PaymentMethod::Bankily] {
            assert_eq!(method.to_string().parse::<PaymentMethod>().unwrap(), method);
        }
    }
}
