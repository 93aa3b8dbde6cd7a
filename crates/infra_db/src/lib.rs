//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL persistence for the marketplace,
//! implementing the domain port traits (`CatalogStore`,
//! `ReconciliationStore`) on top of SQLx.
//!
//! # Concurrency
//!
//! The reconciliation repository wraps every multi-step mutation in a
//! transaction and locks the rows it is about to check-and-write
//! (`SELECT ... FOR UPDATE`). Two concurrent approvals of the same local
//! payment therefore serialize; the second observes `is_verified = true`
//! and fails with `AlreadyProcessed` instead of double-counting commission.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, PgReconciliationStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/shinqit")).await?;
//! let store = PgReconciliationStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;

pub use pool::{DatabasePool, create_pool, create_pool_from_url, DatabaseConfig};
pub use error::DatabaseError;
pub use repositories::catalog::PgCatalogStore;
pub use repositories::reconciliation::PgReconciliationStore;

/// Embedded SQL migrations, applied at server startup
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
