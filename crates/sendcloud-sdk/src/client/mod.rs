//! Async HTTP client for the Sendcloud REST API.
//!
//! Requests authenticate with HTTP basic auth using the account's API key
//! pair. Failed responses are turned into [`ApiError::RequestFailed`] with the
//! vendor's `error.code` and `error.message` attached. Successful responses
//! are mapped into [`crate::models`] entities.
//!
//! The client does not retry. Use [`ApiError::is_transient`] to decide
//! whether a failed call is worth repeating.
//!
//! # Examples
//!
//! ```no_run
//! use sendcloud_sdk::client::SendcloudClient;
//! use sendcloud_sdk::config::{ClientConfig, Credentials};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SendcloudClient::new(Credentials::from_env()?, ClientConfig::from_env()?)?;
//!
//! let parcel = client.get_parcel(3).await?;
//! println!("Parcel {} is {:?}", parcel.id(), parcel.status());
//! # Ok(())
//! # }
//! ```

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{ClientConfig, Credentials};
use crate::error::{ApiError, ConfigError, MappingError};
use crate::webhook::{SignatureValidator, WebhookParser};

mod parcels;
mod service_points;
mod shipping;

pub use shipping::ShippingMethodFilter;

/// Header identifying an integration partner.
pub const PARTNER_ID_HEADER: &str = "Sendcloud-Partner-Id";

/// Sendcloud API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct SendcloudClient {
    http_client: reqwest::Client,
    config: ClientConfig,
    credentials: Credentials,
}

impl SendcloudClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration is invalid or the HTTP
    /// client cannot be built.
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        if let Some(partner_id) = &config.partner_id {
            let value = HeaderValue::from_str(partner_id).map_err(|e| ConfigError::Invalid {
                field: "partner_id".to_string(),
                message: format!("not a valid header value: {}", e),
            })?;
            headers.insert(PARTNER_ID_HEADER, value);
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            http_client,
            config,
            credentials,
        })
    }

    /// Configuration the client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Webhook parser keyed with this account's secret key, which is the key
    /// Sendcloud signs webhooks with.
    pub fn webhook_parser(&self) -> WebhookParser {
        WebhookParser::with_validator(SignatureValidator::new(self.credentials.secret_key()))
    }

    // ========================================================================
    // Request plumbing
    // ========================================================================

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .basic_auth(
                self.credentials.public_key(),
                Some(self.credentials.secret_key()),
            )
    }

    /// Send `request` and return the response if its status is a success.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = request_failed(status, &body);
        warn!(
            status = status.as_u16(),
            vendor_code = ?error.vendor_code(),
            "Sendcloud API request failed"
        );
        Err(error)
    }

    /// Send `request` and decode the response body as JSON.
    async fn send_json(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let request = request.header(reqwest::header::ACCEPT, "application/json");
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        debug!(response_size = bytes.len(), "Received Sendcloud response");
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl std::fmt::Debug for SendcloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendcloudClient")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .finish()
    }
}

/// Build a [`ApiError::RequestFailed`] from a failed response.
///
/// Sendcloud reports failures as `{"error": {"code": 404, "message": "..."}}`.
/// Bodies that do not follow that shape leave the vendor fields empty.
fn request_failed(status: StatusCode, body: &str) -> ApiError {
    let error = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("error").cloned());

    let code = error.as_ref().and_then(|e| e.get("code")).and_then(|code| match code {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    });
    let vendor_message = error
        .as_ref()
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let message = match &vendor_message {
        Some(message) => message.clone(),
        None => status
            .canonical_reason()
            .unwrap_or("Unknown status")
            .to_string(),
    };

    ApiError::RequestFailed {
        status: status.as_u16(),
        code,
        message,
        vendor_message,
    }
}

/// Take the object stored under `key` in a response envelope.
fn unwrap_envelope<'a>(response: &'a Value, key: &str) -> Result<&'a Value, MappingError> {
    match response.get(key) {
        Some(value) if !value.is_null() => Ok(value),
        _ => Err(MappingError::missing(key)),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
