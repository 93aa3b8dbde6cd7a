//! Order Domain - Order Lifecycle and Commission
//!
//! This crate owns the order aggregate and its status state machine:
//!
//! ```text
//!            Pending ──────────────► Paid ──► Shipped
//!               │                     ▲
//!               ▼                     │
//!        AwaitingConfirmation ────────┘
//! ```
//!
//! Transitions are monotonic - an order never moves backward. The direct
//! `Pending -> Paid` edge is the card-gateway confirmation path; the detour
//! through `AwaitingConfirmation` is the local mobile-money path, where an
//! administrator must verify the submitted transaction reference first.
//!
//! The platform commission is computed when an order reaches `Paid` and is
//! persisted as a `CommissionRecord` so settled sales stay auditable.

pub mod order;
pub mod commission;
pub mod error;

pub use order::{Order, OrderLine, OrderStatus};
pub use commission::{CommissionPolicy, CommissionRecord};
pub use error::OrderError;
