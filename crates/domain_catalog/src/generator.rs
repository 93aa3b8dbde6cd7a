//! Marketing description generation
//!
//! New products are listed with machine-written marketing copy. The
//! generation service is an external collaborator reached through the
//! `DescriptionGenerator` port; two adapters are provided:
//!
//! - `ExternalTextGenerator`: external completion-API adapter with timeout
//!   and circuit breaker configuration
//! - `TemplateGenerator`: deterministic fallback used when no API key is
//!   configured, and in tests

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use core_kernel::{CircuitBreaker, CircuitBreakerConfig, DomainPort, PortError};

/// Builds the generation prompt for a product title
///
/// The storefront serves the Mauritanian market; the prompt anchors the copy
/// to that audience the way the seller tooling expects.
pub fn marketing_prompt(title: &str) -> String {
    format!(
        "Write a short, persuasive marketing description for the product \"{}\" \
         aimed at shoppers in the Mauritanian market.",
        title
    )
}

/// Port for the external text-generation service
#[async_trait]
pub trait DescriptionGenerator: DomainPort {
    /// Generates marketing copy for a product title
    async fn generate(&self, title: &str) -> Result<String, PortError>;
}

/// Deterministic template-based generator
///
/// Used when the completion API is not configured. Produces serviceable copy
/// without an external call, so product creation never blocks on a
/// collaborator that may not be provisioned.
#[derive(Debug, Default)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl DomainPort for TemplateGenerator {}

#[async_trait]
impl DescriptionGenerator for TemplateGenerator {
    async fn generate(&self, title: &str) -> Result<String, PortError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(PortError::validation("title must not be empty"));
        }
        debug!(%title, "generating template description");
        Ok(format!(
            "{title} - hand-picked for the Shinqit marketplace. Quality you can \
             trust, delivered across Mauritania with fast local support.",
        ))
    }
}

/// Configuration for the external completion-API adapter
#[derive(Debug, Clone)]
pub struct ExternalTextGenConfig {
    /// Base URL of the completion API
    pub base_url: String,
    /// API key for authentication
    pub api_key: String,
    /// Model identifier requested from the service
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Circuit breaker configuration
    pub circuit_breaker: Option<CircuitBreakerConfig>,
}

impl Default for ExternalTextGenConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-3.5-turbo".to_string(),
            timeout_secs: 30,
            circuit_breaker: Some(CircuitBreakerConfig::default()),
        }
    }
}

/// Request body sent to the completion API
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: String,
}

/// External completion-API adapter
///
/// Translates the port call into a completion request against the configured
/// service. Failures are mapped to `PortError` variants; when the circuit is
/// open, calls are rejected without touching the network.
#[derive(Debug)]
pub struct ExternalTextGenerator {
    config: ExternalTextGenConfig,
    circuit_breaker: Option<CircuitBreaker>,
}

impl ExternalTextGenerator {
    /// Creates a new adapter with the given configuration
    pub fn new(config: ExternalTextGenConfig) -> Self {
        let circuit_breaker = config
            .circuit_breaker
            .clone()
            .map(CircuitBreaker::new);
        Self {
            config,
            circuit_breaker,
        }
    }

    /// Returns the base URL of the completion service
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn check_circuit(&self) -> Result<(), PortError> {
        if let Some(ref cb) = self.circuit_breaker {
            if !cb.is_available() {
                return Err(PortError::ServiceUnavailable {
                    service: "text-generation circuit breaker is open".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Makes a completion request against the external API
    ///
    /// This is a placeholder implementation. In a real adapter, this would
    /// use an HTTP client to POST the request body with the configured
    /// bearer token and timeout.
    async fn complete(&self, body: &CompletionRequest<'_>) -> Result<String, PortError> {
        self.check_circuit()?;

        // Placeholder: In a real implementation, make the HTTP request here
        // let url = format!("{}/completions", self.config.base_url);
        // let response = self.client.post(&url)
        //     .bearer_auth(&self.config.api_key)
        //     .timeout(Duration::from_secs(self.config.timeout_secs))
        //     .json(body)
        //     .send()
        //     .await?;

        if let Some(ref cb) = self.circuit_breaker {
            cb.record_failure();
        }
        Err(PortError::internal(format!(
            "text-generation adapter not implemented: POST /completions (model {})",
            body.model
        )))
    }
}

impl DomainPort for ExternalTextGenerator {}

#[async_trait]
impl DescriptionGenerator for ExternalTextGenerator {
    async fn generate(&self, title: &str) -> Result<String, PortError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(PortError::validation("title must not be empty"));
        }

        let request = CompletionRequest {
            model: &self.config.model,
            prompt: marketing_prompt(title),
        };
        self.complete(&request).await
    }
}
