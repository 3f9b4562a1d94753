//! Error types for Sendcloud SDK operations.
//!
//! Each concern gets its own error enum: webhook intake, entity mapping,
//! API calls and configuration. API errors carry the vendor's own error
//! code and message so callers never have to re-parse a response body.

use thiserror::Error;

/// Errors raised while verifying or parsing an inbound webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The request is malformed: missing signature header, unparsable JSON,
    /// or a payload without an `action` field.
    #[error("Invalid webhook request: {message}")]
    InvalidRequest { message: String },

    /// The `Sendcloud-Signature` header does not match the payload.
    #[error("Webhook signature verification failed")]
    VerificationFailed,

    /// The HMAC could not be keyed with the configured secret.
    #[error("HMAC computation failed: {message}")]
    Hmac { message: String },

    /// The embedded parcel could not be mapped.
    #[error("Webhook payload mapping failed: {0}")]
    Mapping(#[from] MappingError),
}

impl WebhookError {
    /// Build an [`WebhookError::InvalidRequest`] from any message.
    pub(crate) fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }
}

/// Errors raised while converting between vendor JSON and domain records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    /// A required field is absent or null.
    #[error("Required field missing: {field}")]
    MissingField { field: String },

    /// A field is present but cannot be converted.
    #[error("Invalid value for {field}: {message}")]
    InvalidField { field: String, message: String },

    /// A caller supplied an argument of an unsupported shape.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl MappingError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

/// Errors during Sendcloud API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered with a non-success status.
    ///
    /// `code` and `vendor_message` are taken from the response body's
    /// `error.code` and `error.message` fields when present.
    #[error("Request failed with status {status}: {message}")]
    RequestFailed {
        status: u16,
        code: Option<i64>,
        message: String,
        vendor_message: Option<String>,
    },

    /// The request did not complete within the configured timeout.
    #[error("Request timeout")]
    Timeout,

    /// Network, TLS or other transport failure.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The response body is not valid JSON.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response JSON does not have the expected shape.
    #[error("Response mapping failed: {0}")]
    Mapping(#[from] MappingError),
}

impl ApiError {
    /// Check if this error represents a transient condition that may succeed if retried.
    ///
    /// Server errors (5xx), rate limiting (429), timeouts and transport
    /// failures are transient. Everything else is a caller or data problem.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RequestFailed { status, .. } => *status >= 500 || *status == 429,
            Self::Timeout => true,
            Self::HttpClient(_) => true,
            Self::Json(_) => false,
            Self::Mapping(_) => false,
        }
    }

    /// HTTP status of a failed request, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Vendor error code extracted from the response body.
    pub fn vendor_code(&self) -> Option<i64> {
        match self {
            Self::RequestFailed { code, .. } => *code,
            _ => None,
        }
    }

    /// Vendor error message extracted from the response body.
    pub fn vendor_message(&self) -> Option<&str> {
        match self {
            Self::RequestFailed { vendor_message, .. } => vendor_message.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::HttpClient(error)
        }
    }
}

/// Errors while loading or validating client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration source could not be read or deserialized.
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A setting holds an unusable value.
    #[error("Invalid configuration for {field}: {message}")]
    Invalid { field: String, message: String },

    /// The HTTP client could not be constructed from the configuration.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
