//! Shinqit Market Core - API Server Binary
//!
//! This binary starts the HTTP API server for the marketplace core.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin shinqit-api
//!
//! # Run with environment variables
//! API_HOST=0.0.0.0 API_PORT=8080 DATABASE_URL=postgres://... cargo run --bin shinqit-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_JWT_SECRET` - JWT signing secret (required in production)
//! * `API_JWT_EXPIRATION_SECS` - JWT token expiration in seconds (default: 3600)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_COMMISSION_RATE` - Platform commission as a decimal (default: 0.05)
//! * `API_GATEWAY_BASE_URL` / `API_GATEWAY_API_KEY` - Card gateway settings
//! * `API_TEXTGEN_API_KEY` - Text-generation API key; template fallback when unset

use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::CircuitBreakerConfig;
use domain_catalog::{
    CatalogStore, DescriptionGenerator, ExternalTextGenConfig, ExternalTextGenerator,
    TemplateGenerator,
};
use domain_payments::{ExternalCardGateway, GatewayConfig, PaymentGateway, ReconciliationStore};
use infra_db::{PgCatalogStore, PgReconciliationStore};
use interface_api::{config::ApiConfig, create_router, AppState};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, establishes the database
/// connection, wires the adapters, and starts the HTTP server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    // Load configuration from environment
    let config = load_config();

    // Initialize tracing/logging
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Shinqit Market Core API Server"
    );

    // Create database connection pool
    let pool = create_database_pool(&config.database_url).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    infra_db::MIGRATOR.run(&pool).await?;
    tracing::info!("Database ready");

    // Wire adapters behind the domain ports
    let catalog: Arc<dyn CatalogStore> = Arc::new(PgCatalogStore::new(pool.clone()));
    let store: Arc<dyn ReconciliationStore> = Arc::new(PgReconciliationStore::new(pool.clone()));
    let gateway: Arc<dyn PaymentGateway> = Arc::new(ExternalCardGateway::new(GatewayConfig {
        base_url: config.gateway_base_url.clone(),
        api_key: config.gateway_api_key.clone(),
        timeout_secs: config.gateway_timeout_secs,
        circuit_breaker: Some(CircuitBreakerConfig::default()),
    }));
    let descriptions: Arc<dyn DescriptionGenerator> = match &config.textgen_api_key {
        Some(api_key) => Arc::new(ExternalTextGenerator::new(ExternalTextGenConfig {
            api_key: api_key.clone(),
            ..Default::default()
        })),
        None => {
            tracing::info!("No text-generation API key configured, using template generator");
            Arc::new(TemplateGenerator::new())
        }
    };

    let state = AppState::new(pool, config.clone(), catalog, descriptions, store, gateway);

    // Create the API router
    let app = create_router(state);

    // Parse server address
    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(%addr, "Server listening");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to default values if environment variables are not set.
fn load_config() -> ApiConfig {
    ApiConfig::from_env().unwrap_or_else(|_| {
        // Fall back to individual env vars or defaults
        let defaults = ApiConfig::default();
        ApiConfig {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            jwt_secret: std::env::var("API_JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_expiration_secs: std::env::var("API_JWT_EXPIRATION_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.jwt_expiration_secs),
            database_url: std::env::var("DATABASE_URL")
                .or_else(|_| std::env::var("API_DATABASE_URL"))
                .unwrap_or(defaults.database_url),
            log_level: std::env::var("API_LOG_LEVEL")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            commission_rate: std::env::var("API_COMMISSION_RATE")
                .ok()
                .and_then(|r| r.parse().ok())
                .unwrap_or(defaults.commission_rate),
            gateway_base_url: std::env::var("API_GATEWAY_BASE_URL")
                .unwrap_or(defaults.gateway_base_url),
            gateway_api_key: std::env::var("API_GATEWAY_API_KEY")
                .unwrap_or(defaults.gateway_api_key),
            gateway_timeout_secs: std::env::var("API_GATEWAY_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.gateway_timeout_secs),
            textgen_api_key: std::env::var("API_TEXTGEN_API_KEY").ok(),
        }
    })
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Creates a PostgreSQL connection pool.
async fn create_database_pool(database_url: &str) -> Result<sqlx::PgPool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(database_url)
        .await?;

    tracing::info!("Database connection established");
    Ok(pool)
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
