//! Core Kernel - Foundational types and utilities for the marketplace
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Strongly-typed entity identifiers
//! - Port infrastructure for swappable adapters

pub mod money;
pub mod identifiers;
pub mod error;
pub mod ports;

pub use money::{Money, Currency, MoneyError, Rate};
pub use identifiers::{
    ShopId, ProductId, OrderId, BuyerId, SellerId,
    LocalPaymentId, CommissionId,
};
pub use error::CoreError;
pub use ports::{PortError, DomainPort, CircuitBreaker, CircuitBreakerConfig};
