//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::money::MoneyError;

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Invalid input");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Invalid input"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_invalid_state() {
    let error = CoreError::invalid_state("Cannot transition from Paid to Pending");

    match error {
        CoreError::InvalidStateTransition(msg) => assert!(msg.contains("Cannot transition")),
        _ => panic!("Expected InvalidStateTransition error"),
    }
}

#[test]
fn test_core_error_not_found() {
    let error = CoreError::not_found("Order not found");

    match error {
        CoreError::NotFound(msg) => assert_eq!(msg, "Order not found"),
        _ => panic!("Expected NotFound error"),
    }
}

#[test]
fn test_core_error_from_money_error() {
    let money_error = MoneyError::CurrencyMismatch("MRU".to_string(), "USD".to_string());
    let core_error: CoreError = money_error.into();

    match core_error {
        CoreError::Money(inner) => {
            assert!(matches!(inner, MoneyError::CurrencyMismatch(_, _)))
        }
        _ => panic!("Expected Money error"),
    }
}

#[test]
fn test_error_messages_are_descriptive() {
    let error = CoreError::not_found("LocalPayment LPM-123");
    assert!(error.to_string().contains("LPM-123"));
}
