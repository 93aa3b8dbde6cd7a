//! API configuration
//!
//! Everything the workflow treats as policy - the commission rate, gateway
//! credentials, signing secrets - arrives here from the environment instead
//! of living in code.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Platform commission rate as a decimal (0.05 = 5%)
    pub commission_rate: Decimal,
    /// Card gateway API base URL
    pub gateway_base_url: String,
    /// Card gateway secret key
    pub gateway_api_key: String,
    /// Card gateway request timeout in seconds
    pub gateway_timeout_secs: u64,
    /// Text-generation API key; when unset the template generator is used
    pub textgen_api_key: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            database_url: "postgres://localhost/shinqit".to_string(),
            log_level: "info".to_string(),
            commission_rate: dec!(0.05),
            gateway_base_url: "https://api.stripe.com".to_string(),
            gateway_api_key: String::new(),
            gateway_timeout_secs: 30,
            textgen_api_key: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
