//! Typed error handling for the checkout backend
//!
//! Every failure is turned into a [`CheckoutError`] at the boundary nearest
//! to where it happened. The HTTP layer renders it as
//! `{ "code", "message", "details" }` with the status code of its category.
//!
//! # Error Categories
//!
//! - [`EntityError`]: missing records
//! - [`ValidationError`]: rejected input, including mixed-currency orders
//! - [`GatewayError`]: payment processor calls that failed
//! - [`ConfigError`]: configuration parsing and loading
//! - [`StorageError`]: persistence backend failures
//! - [`RequestError`]: malformed HTTP requests

use crate::core::money::Currency;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

/// The main error type for the checkout backend
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CheckoutError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CheckoutError::Entity(e) => e.status_code(),
            CheckoutError::Validation(_) => StatusCode::BAD_REQUEST,
            CheckoutError::Gateway(_) => StatusCode::BAD_REQUEST,
            CheckoutError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CheckoutError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CheckoutError::Request(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CheckoutError::Entity(e) => e.error_code(),
            CheckoutError::Validation(e) => e.error_code(),
            CheckoutError::Gateway(_) => "GATEWAY_ERROR",
            CheckoutError::Config(_) => "CONFIG_ERROR",
            CheckoutError::Storage(_) => "STORAGE_ERROR",
            CheckoutError::Request(e) => e.error_code(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            CheckoutError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id.to_string()
                }))
            }
            CheckoutError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            CheckoutError::Validation(ValidationError::MixedCurrency { currencies }) => {
                let codes: Vec<String> = currencies.iter().map(|c| c.to_string()).collect();
                Some(serde_json::json!({ "currencies": codes }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for CheckoutError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        } else {
            tracing::debug!(code = self.error_code(), "{}", self);
        }
        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity lookups and operations
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: Uuid },
}

impl EntityError {
    /// Shorthand for a missing entity of type `T`
    pub fn not_found<T: crate::core::Entity>(id: Uuid) -> Self {
        EntityError::NotFound {
            entity_type: T::resource_name_singular().to_string(),
            id,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Validation error for field '{field}': {message}")]
    FieldError { field: String, message: String },

    #[error("Validation errors: {}", format_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    /// Items priced in more than one currency were put in one order
    #[error("All items in an order must share one currency, found: {}", format_currencies(.currencies))]
    MixedCurrency { currencies: Vec<Currency> },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn format_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_currencies(currencies: &[Currency]) -> String {
    currencies
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MixedCurrency { .. } => "MIXED_CURRENCY",
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
            _ => "VALIDATION_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldValidationError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

// =============================================================================
// Gateway Errors
// =============================================================================

/// Errors returned by the payment gateway adapter
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    /// The request never got a usable HTTP response
    #[error("Payment gateway unreachable: {message}")]
    Transport { message: String },

    /// The processor answered with an error object
    #[error("Payment gateway rejected the request ({status}): {message}")]
    Api { status: u16, message: String },

    /// The processor answered 2xx but without the expected field
    #[error("Unexpected payment gateway response: {message}")]
    InvalidResponse { message: String },

    #[error("Amount {amount} cannot be charged")]
    InvalidAmount { amount: String },

    /// No secret key is configured for the account of this currency
    #[error("No payment gateway key configured for {currency}")]
    MissingKey { currency: Currency },
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport {
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config{}: {message}", format_file(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("IO error: {message}")]
    IoError { message: String },
}

fn format_file(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage backend error: {message}")]
    Backend { message: String },
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Invalid entity ID format: '{id}'")]
    InvalidEntityId { id: String },
}

impl RequestError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidEntityId { .. } => "INVALID_ENTITY_ID",
        }
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<std::io::Error> for CheckoutError {
    fn from(err: std::io::Error) -> Self {
        CheckoutError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for CheckoutError {
    fn from(err: serde_yaml::Error) -> Self {
        CheckoutError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

/// Storage services report through `anyhow`; surface them as storage failures
impl From<anyhow::Error> for CheckoutError {
    fn from(err: anyhow::Error) -> Self {
        CheckoutError::Storage(StorageError::Backend {
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;
