//! Payment Reconciliation Core
//!
//! This crate orchestrates how orders get paid:
//!
//! - **Dispatch**: a payment request names a method. `STRIPE` goes to the
//!   external card gateway and returns a client secret; `BANKILY` records a
//!   local mobile-money reference and parks the order in
//!   `AwaitingConfirmation`. Anything else is rejected - the method set is a
//!   closed enum with an explicit error branch.
//! - **Admin approval**: an administrator verifies a pending local payment.
//!   The store performs verify + order transition + commission insert as one
//!   atomic operation; a second approval attempt is rejected as
//!   `AlreadyProcessed`, never silently recomputed.
//! - **Gateway confirmation**: the card processor's confirmation callback
//!   moves a `Pending` order straight to `Paid`.
//!
//! Persistence sits behind the `ReconciliationStore` port (PostgreSQL in
//! `infra_db`, in-memory mock behind the `mock` feature); the card processor
//! sits behind the `PaymentGateway` port. Neither external call ever holds a
//! record lock.

pub mod method;
pub mod local_payment;
pub mod gateway;
pub mod store;
pub mod workflow;
pub mod error;

pub use method::PaymentMethod;
pub use local_payment::LocalPayment;
pub use gateway::{ExternalCardGateway, GatewayConfig, PaymentGateway, PaymentIntent};
pub use store::{ApprovalOutcome, ReconciliationStore};
pub use workflow::{PaymentOutcome, ReconciliationService};
pub use error::PaymentError;
