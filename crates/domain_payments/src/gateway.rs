//! Card gateway port and adapters
//!
//! The international card processor is an external collaborator reached
//! through the `PaymentGateway` port. The intent amount is always taken from
//! the order's stored total and currency - the gateway never sees a
//! hardcoded figure.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use core_kernel::{CircuitBreaker, CircuitBreakerConfig, DomainPort, Money, OrderId, PortError};

/// A payment intent created with the card gateway
///
/// The `client_secret` goes back to the buyer's client to complete the card
/// flow; the `reference` identifies the intent in the gateway's system and
/// later in the confirmation callback.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentIntent {
    /// Gateway-side intent identifier
    pub reference: String,
    /// Secret handed to the client for completion
    pub client_secret: String,
    /// Amount the intent was created for
    pub amount: Money,
}

/// Port for the external card-payment gateway
#[async_trait]
pub trait PaymentGateway: DomainPort {
    /// Creates a payment intent for an order's total
    async fn create_intent(&self, order_id: OrderId, amount: Money)
        -> Result<PaymentIntent, PortError>;
}

/// Configuration for the external card gateway adapter
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the gateway API
    pub base_url: String,
    /// Secret API key
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Circuit breaker configuration
    pub circuit_breaker: Option<CircuitBreakerConfig>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.stripe.com".to_string(),
            api_key: String::new(),
            timeout_secs: 30,
            circuit_breaker: Some(CircuitBreakerConfig::default()),
        }
    }
}

/// Request body for intent creation
#[derive(Debug, Serialize)]
struct CreateIntentRequest {
    amount: i64,
    currency: String,
    metadata_order_id: String,
}

/// External card gateway adapter
///
/// Translates port calls into gateway API requests. Amounts are sent in the
/// currency's minor units, as card processors expect. When the circuit is
/// open, calls fail fast without touching the network.
#[derive(Debug)]
pub struct ExternalCardGateway {
    config: GatewayConfig,
    circuit_breaker: Option<CircuitBreaker>,
}

impl ExternalCardGateway {
    /// Creates a new adapter with the given configuration
    pub fn new(config: GatewayConfig) -> Self {
        let circuit_breaker = config.circuit_breaker.clone().map(CircuitBreaker::new);
        Self {
            config,
            circuit_breaker,
        }
    }

    /// Returns the gateway base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn check_circuit(&self) -> Result<(), PortError> {
        if let Some(ref cb) = self.circuit_breaker {
            if !cb.is_available() {
                return Err(PortError::ServiceUnavailable {
                    service: "card gateway circuit breaker is open".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Posts an intent-creation request to the gateway
    ///
    /// This is a placeholder implementation. In a real adapter, this would
    /// use an HTTP client to POST the form body with the secret key and the
    /// configured timeout.
    async fn post_intent(&self, body: &CreateIntentRequest) -> Result<PaymentIntent, PortError> {
        self.check_circuit()?;

        // Placeholder: In a real implementation, make the HTTP request here
        // let url = format!("{}/v1/payment_intents", self.config.base_url);
        // let response = self.client.post(&url)
        //     .basic_auth(&self.config.api_key, Option::<&str>::None)
        //     .timeout(Duration::from_secs(self.config.timeout_secs))
        //     .form(body)
        //     .send()
        //     .await?;

        if let Some(ref cb) = self.circuit_breaker {
            cb.record_failure();
        }
        Err(PortError::internal(format!(
            "card gateway adapter not implemented: POST /v1/payment_intents ({} {})",
            body.amount, body.currency
        )))
    }
}

impl DomainPort for ExternalCardGateway {}

#[async_trait]
impl PaymentGateway for ExternalCardGateway {
    async fn create_intent(
        &self,
        order_id: OrderId,
        amount: Money,
    ) -> Result<PaymentIntent, PortError> {
        if !amount.is_positive() {
            return Err(PortError::validation("intent amount must be positive"));
        }

        debug!(%order_id, %amount, "creating gateway payment intent");
        let request = CreateIntentRequest {
            amount: amount.minor_units(),
            currency: amount.currency().code().to_lowercase(),
            metadata_order_id: order_id.to_string(),
        };
        self.post_intent(&request).await
    }
}

/// In-memory mock gateway for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use uuid::Uuid;

    /// Mock gateway producing deterministic intents
    #[derive(Debug, Default)]
    pub struct MockCardGateway {
        fail_next: AtomicBool,
    }

    impl MockCardGateway {
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes every subsequent call fail, for error-path tests
        pub fn fail(&self) {
            self.fail_next.store(true, Ordering::Relaxed);
        }
    }

    impl DomainPort for MockCardGateway {}

    #[async_trait]
    impl PaymentGateway for MockCardGateway {
        async fn create_intent(
            &self,
            _order_id: OrderId,
            amount: Money,
        ) -> Result<PaymentIntent, PortError> {
            if self.fail_next.load(Ordering::Relaxed) {
                return Err(PortError::ServiceUnavailable {
                    service: "mock gateway forced failure".to_string(),
                });
            }
            if !amount.is_positive() {
                return Err(PortError::validation("intent amount must be positive"));
            }

            let reference = format!("pi_{}", Uuid::new_v4().simple());
            Ok(PaymentIntent {
                client_secret: format!("{reference}_secret_{}", Uuid::new_v4().simple()),
                reference,
                amount,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockCardGateway;
    use super::*;
    use core_kernel::Currency;

    #[tokio::test]
    async fn test_mock_gateway_returns_client_secret() {
        let gateway = MockCardGateway::new();
        let intent = gateway
            .create_intent(OrderId::new(), Money::from_minor(200_000, Currency::MRU))
            .await
            .unwrap();

        assert!(intent.reference.starts_with("pi_"));
        assert!(intent.client_secret.contains("_secret_"));
        assert_eq!(intent.amount.minor_units(), 200_000);
    }

    #[tokio::test]
    async fn test_mock_gateway_rejects_zero_amount() {
        let gateway = MockCardGateway::new();
        let result = gateway
            .create_intent(OrderId::new(), Money::zero(Currency::MRU))
            .await;
        assert!(matches!(result, Err(PortError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_external_adapter_fails_fast_once_circuit_opens() {
        let gateway = ExternalCardGateway::new(GatewayConfig {
            circuit_breaker: Some(CircuitBreakerConfig {
                failure_threshold: 1,
                reset_timeout_secs: 3600,
                success_threshold: 1,
            }),
            ..Default::default()
        });
        let amount = Money::from_minor(1000, Currency::MRU);

        assert!(gateway.create_intent(OrderId::new(), amount).await.is_err());
        let second = gateway.create_intent(OrderId::new(), amount).await;
        assert!(matches!(second, Err(PortError::ServiceUnavailable { .. })));
    }
}
