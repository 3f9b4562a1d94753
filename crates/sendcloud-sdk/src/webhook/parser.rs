//! Webhook decoding.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::{SignatureValidator, WebhookEvent, WebhookRequest};
use crate::error::WebhookError;
use crate::models::Parcel;

const ACTION_KEY: &str = "action";
const TIMESTAMP_KEY: &str = "timestamp";
const PARCEL_KEY: &str = "parcel";

/// Decodes webhook requests into [`WebhookEvent`]s.
///
/// When built with a secret the signature is verified before the body is
/// parsed. Without a secret, verification is skipped.
#[derive(Debug, Clone)]
pub struct WebhookParser {
    validator: Option<SignatureValidator>,
}

impl WebhookParser {
    /// Create a parser.
    ///
    /// # Arguments
    ///
    /// * `secret` - Key used to verify `Sendcloud-Signature`. `None` disables
    ///   verification; prefer [`WebhookParser::unverified`] to make that explicit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sendcloud_sdk::webhook::WebhookParser;
    ///
    /// assert!(WebhookParser::new(Some("secret")).verifies_signatures());
    /// assert!(!WebhookParser::new(None::<&str>).verifies_signatures());
    /// ```
    pub fn new(secret: Option<impl AsRef<[u8]>>) -> Self {
        Self {
            validator: secret.map(SignatureValidator::new),
        }
    }

    /// Parser that accepts unsigned requests.
    pub fn unverified() -> Self {
        Self { validator: None }
    }

    /// Parser that verifies every request with `validator`.
    ///
    /// See also [`crate::client::SendcloudClient::webhook_parser`], which keys the
    /// validator with the client's credentials.
    pub fn with_validator(validator: SignatureValidator) -> Self {
        Self {
            validator: Some(validator),
        }
    }

    /// Whether [`WebhookParser::parse`] checks signatures.
    pub fn verifies_signatures(&self) -> bool {
        self.validator.is_some()
    }

    /// Verify (when configured) and decode `request`.
    ///
    /// # Errors
    ///
    /// - Any [`SignatureValidator::verify`] error.
    /// - [`WebhookError::InvalidRequest`] when the body is not a JSON object,
    ///   has no string `action`, or has a non-integer `timestamp`.
    /// - [`WebhookError::Mapping`] when the embedded parcel cannot be mapped.
    #[instrument(skip(self, request), fields(payload_size = request.payload().len()))]
    pub fn parse(&self, request: &WebhookRequest) -> Result<WebhookEvent, WebhookError> {
        if let Some(validator) = &self.validator {
            validator.verify(request)?;
        }

        let mut payload: Map<String, Value> = serde_json::from_slice(request.payload())
            .map_err(|e| WebhookError::invalid_request(format!("body is not a JSON object: {}", e)))?;

        let event_type = match payload.remove(ACTION_KEY) {
            Some(Value::String(action)) => action,
            Some(_) => return Err(WebhookError::invalid_request("action must be a string")),
            None => return Err(WebhookError::invalid_request("missing action")),
        };

        let created = match payload.remove(TIMESTAMP_KEY) {
            None | Some(Value::Null) => None,
            Some(value) => Some(timestamp_from_millis(&value)?),
        };

        let parcel = match payload.get(PARCEL_KEY) {
            None | Some(Value::Null) => None,
            Some(parcel) => Some(Parcel::from_json(parcel)?),
        };

        debug!(event_type = %event_type, has_parcel = parcel.is_some(), "Parsed webhook");

        Ok(WebhookEvent {
            event_type,
            payload,
            created,
            parcel,
        })
    }
}

/// Convert a millisecond Unix timestamp into a UTC instant.
fn timestamp_from_millis(value: &Value) -> Result<DateTime<Utc>, WebhookError> {
    let millis = value
        .as_i64()
        .ok_or_else(|| WebhookError::invalid_request("timestamp must be an integer"))?;

    let seconds = millis.div_euclid(1000);
    let micros = millis.rem_euclid(1000) * 1000;
    // rem_euclid keeps this within 0..1_000_000 microseconds.
    let nanos = (micros * 1000) as u32;

    DateTime::from_timestamp(seconds, nanos)
        .ok_or_else(|| WebhookError::invalid_request(format!("timestamp {} is out of range", millis)))
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
