//! Typed webhook events.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::Parcel;

/// A verified and decoded webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookEvent {
    pub(super) event_type: String,
    pub(super) payload: Map<String, Value>,
    pub(super) created: Option<DateTime<Utc>>,
    pub(super) parcel: Option<Parcel>,
}

impl WebhookEvent {
    /// The webhook's `action`, e.g. `parcel_status_changed`.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Every top-level key of the body except `action` and `timestamp`.
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// When the vendor emitted the event, with millisecond precision.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    /// The mapped `parcel` of the payload, if it carried one.
    pub fn parcel(&self) -> Option<&Parcel> {
        self.parcel.as_ref()
    }

    /// Whether this is a `parcel_status_changed` event.
    pub fn is_parcel_status_change(&self) -> bool {
        self.event_type == super::EVENT_PARCEL_STATUS_CHANGED
    }
}
