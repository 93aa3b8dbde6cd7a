//! HTTP API Layer
//!
//! This crate provides the REST API for the marketplace core using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for catalog, orders, payments, and admin
//! - **Middleware**: Authentication, audit logging, tracing
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: One machine-readable code per failure class
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_catalog::{CatalogStore, DescriptionGenerator};
use domain_orders::CommissionPolicy;
use domain_payments::{PaymentGateway, ReconciliationService, ReconciliationStore};

use crate::config::ApiConfig;
use crate::handlers::{admin, catalog, health, orders, payments};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: ApiConfig,
    pub catalog: Arc<dyn CatalogStore>,
    pub descriptions: Arc<dyn DescriptionGenerator>,
    pub store: Arc<dyn ReconciliationStore>,
    pub reconciliation: Arc<ReconciliationService>,
}

impl AppState {
    /// Wires the application state from its adapters
    ///
    /// The commission rate comes from configuration; the reconciliation
    /// service is built over the same store the handlers read from.
    pub fn new(
        pool: PgPool,
        config: ApiConfig,
        catalog: Arc<dyn CatalogStore>,
        descriptions: Arc<dyn DescriptionGenerator>,
        store: Arc<dyn ReconciliationStore>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        let reconciliation = Arc::new(ReconciliationService::new(
            store.clone(),
            gateway,
            CommissionPolicy::new(config.commission_rate),
        ));

        Self {
            pool,
            config,
            catalog,
            descriptions,
            store,
            reconciliation,
        }
    }
}

/// Creates the main API router
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Catalog routes
    let catalog_routes = Router::new()
        .route("/shops", post(catalog::create_shop))
        .route(
            "/products",
            get(catalog::search_products).post(catalog::create_product),
        )
        .route("/products/:id", get(catalog::get_product));

    // Order and payment routes
    let order_routes = Router::new()
        .route("/orders", post(orders::checkout))
        .route("/orders/:id", get(orders::get_order))
        .route("/orders/:id/payments", post(payments::initiate_payment))
        .route(
            "/payments/gateway/confirmations",
            post(payments::confirm_gateway_payment),
        );

    // Admin reconciliation routes
    let admin_routes = Router::new()
        .route("/admin/local-payments", get(admin::list_local_payments))
        .route(
            "/admin/local-payments/:id/approve",
            post(admin::approve_local_payment),
        );

    // Protected API routes
    let api_routes = Router::new()
        .merge(catalog_routes)
        .merge(order_routes)
        .merge(admin_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
