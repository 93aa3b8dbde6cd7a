//! API error handling
//!
//! Every failure in the taxonomy gets its own machine-readable code, so
//! clients can branch on `error` without parsing messages, and no domain
//! failure collapses into a generic 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::PortError;
use domain_catalog::CatalogError;
use domain_orders::OrderError;
use domain_payments::PaymentError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported payment method: {0}")]
    UnsupportedMethod(String),

    #[error("Duplicate transaction reference: {0}")]
    DuplicateReference(String),

    #[error("Already processed: {0}")]
    AlreadyProcessed(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg.clone())
            }
            ApiError::UnsupportedMethod(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "unsupported_method",
                format!("Unsupported payment method: {msg}"),
            ),
            ApiError::DuplicateReference(msg) => (
                StatusCode::CONFLICT,
                "duplicate_reference",
                format!("Duplicate transaction reference: {msg}"),
            ),
            ApiError::AlreadyProcessed(msg) => (
                StatusCode::CONFLICT,
                "already_processed",
                format!("Already processed: {msg}"),
            ),
            ApiError::InvalidState(msg) => (StatusCode::CONFLICT, "invalid_state", msg.clone()),
            ApiError::ExternalService(msg) => (
                StatusCode::BAD_GATEWAY,
                "external_service_error",
                msg.clone(),
            ),
            ApiError::Database(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                msg.clone(),
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                msg.clone(),
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::OrderNotFound(id) => ApiError::NotFound(format!("Order {id} not found")),
            PaymentError::PaymentNotFound(id) => {
                ApiError::NotFound(format!("Local payment {id} not found"))
            }
            PaymentError::UnsupportedMethod(method) => ApiError::UnsupportedMethod(method),
            PaymentError::DuplicateReference(reference) => {
                ApiError::DuplicateReference(reference)
            }
            PaymentError::AlreadyProcessed(entity) => ApiError::AlreadyProcessed(entity),
            PaymentError::MissingReference => {
                ApiError::Validation(PaymentError::MissingReference.to_string())
            }
            PaymentError::InvalidTransition { .. } => ApiError::InvalidState(err.to_string()),
            PaymentError::Gateway(msg) => ApiError::ExternalService(msg),
            PaymentError::Store(msg) => ApiError::Database(msg),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ShopNotFound(id) => ApiError::NotFound(format!("Shop {id} not found")),
            CatalogError::ProductNotFound(id) => {
                ApiError::NotFound(format!("Product {id} not found"))
            }
            CatalogError::Validation { .. } => ApiError::Validation(err.to_string()),
            CatalogError::Generation(msg) => ApiError::ExternalService(msg),
            CatalogError::Store(msg) => ApiError::Database(msg),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::InvalidStatusTransition { .. } => ApiError::InvalidState(err.to_string()),
            OrderError::UnknownStatus(_) => ApiError::Internal(err.to_string()),
            other => ApiError::Validation(other.to_string()),
        }
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            PortError::Validation { .. } => ApiError::Validation(err.to_string()),
            PortError::Conflict { .. } => ApiError::InvalidState(err.to_string()),
            PortError::Timeout { .. }
            | PortError::ServiceUnavailable { .. }
            | PortError::Internal { .. } => ApiError::ExternalService(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Database(err.to_string())
    }
}
