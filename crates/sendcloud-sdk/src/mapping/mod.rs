//! Conversion between vendor JSON and domain records.
//!
//! Inbound mapping lives on the models themselves (`Parcel::from_json` and
//! friends) and is built on [`json::JsonObject`]. Outbound request bodies are
//! assembled by [`ParcelRequest`].

pub(crate) mod json;
mod request;

pub use request::{ParcelRequest, SenderRef, ShippingMethodRef};
