//! # Sendcloud SDK
//!
//! Typed client for the Sendcloud shipping API.
//!
//! This SDK provides:
//! - Webhook signature verification and event parsing
//! - Mapping of the vendor's loosely typed JSON into parcels, addresses,
//!   line items and shipping methods, with exact unit conversion
//!   (kilograms to grams, prices to cents)
//! - Outbound parcel request bodies in the shape the vendor expects
//! - An async HTTP client for parcels, labels, shipping methods, sender
//!   addresses and service points
//!
//! # Examples
//!
//! ## Verifying a webhook
//!
//! ```rust
//! use sendcloud_sdk::webhook::{WebhookParser, WebhookRequest, SIGNATURE_HEADER};
//! use sendcloud_sdk::WebhookError;
//! use std::collections::HashMap;
//!
//! let mut headers = HashMap::new();
//! headers.insert(SIGNATURE_HEADER.to_string(), "0".repeat(64));
//! let request = WebhookRequest::new(headers, bytes::Bytes::from_static(br#"{"action":"x"}"#));
//!
//! let result = WebhookParser::new(Some("secret")).parse(&request);
//! assert!(matches!(result, Err(WebhookError::VerificationFailed)));
//! ```
//!
//! ## Building a parcel request
//!
//! ```rust
//! use sendcloud_sdk::mapping::ParcelRequest;
//! use sendcloud_sdk::models::Address;
//!
//! let address = Address::new("Jane Doe", "Stadhuisplein 10", "Eindhoven", "5611 EM", "NL", "jane@example.com");
//! let body = ParcelRequest::new(address)
//!     .with_shipping_method(8)
//!     .with_request_label(true)
//!     .to_request_body()?;
//!
//! assert_eq!(body["shipment"]["id"], 8);
//! assert_eq!(body["apply_shipping_rules"], false);
//! # Ok::<(), sendcloud_sdk::MappingError>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod mapping;
pub mod models;
pub mod units;
pub mod webhook;

pub use client::SendcloudClient;
pub use config::{ClientConfig, Credentials};
pub use error::{ApiError, ConfigError, MappingError, WebhookError};
