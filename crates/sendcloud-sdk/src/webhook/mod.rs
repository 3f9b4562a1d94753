//! Sendcloud webhook intake.
//!
//! Sendcloud signs every webhook with the account's API secret key. The
//! lowercase hex HMAC-SHA256 of the raw request body is sent in the
//! [`SIGNATURE_HEADER`] header.
//!
//! Processing runs in a fixed order:
//!
//! 1. [`SignatureValidator`] checks the signature against the raw body bytes.
//! 2. [`WebhookParser`] decodes the JSON and builds a [`WebhookEvent`],
//!    mapping an embedded parcel through [`crate::models::Parcel`].
//!
//! The body is never re-serialized before verification.
//!
//! # Examples
//!
//! ```rust
//! use sendcloud_sdk::webhook::{SignatureValidator, WebhookParser, WebhookRequest, SIGNATURE_HEADER};
//! use std::collections::HashMap;
//!
//! let body = br#"{"action":"integration_updated","timestamp":1525271885993}"#;
//! let signature = SignatureValidator::new("secret").compute_signature(body).unwrap();
//!
//! let mut headers = HashMap::new();
//! headers.insert(SIGNATURE_HEADER.to_string(), signature);
//! let request = WebhookRequest::new(headers, bytes::Bytes::from_static(body));
//!
//! let event = WebhookParser::new(Some("secret")).parse(&request).unwrap();
//! assert_eq!(event.event_type(), "integration_updated");
//! assert!(event.parcel().is_none());
//! ```

mod event;
mod parser;
mod request;
mod validation;

pub use event::WebhookEvent;
pub use parser::WebhookParser;
pub use request::WebhookRequest;
pub use validation::SignatureValidator;

/// Header carrying the lowercase hex HMAC-SHA256 of the body.
pub const SIGNATURE_HEADER: &str = "Sendcloud-Signature";

/// A parcel changed status. The payload carries the parcel.
pub const EVENT_PARCEL_STATUS_CHANGED: &str = "parcel_status_changed";

/// A shop integration was connected to the account.
pub const EVENT_INTEGRATION_CONNECTED: &str = "integration_connected";
/// The settings of a shop integration changed.
pub const EVENT_INTEGRATION_UPDATED: &str = "integration_updated";
/// A shop integration was removed.
pub const EVENT_INTEGRATION_DELETED: &str = "integration_deleted";
