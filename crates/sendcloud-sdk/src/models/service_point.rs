//! Carrier service points (pickup and drop-off locations).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::units::grams_to_kilograms;

/// A carrier service point returned by the service points API.
///
/// This is a plain pass-through of the vendor shape; coordinates stay as the
/// decimal strings the vendor sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePoint {
    /// Unique service point identifier
    pub id: u64,

    /// Carrier-specific location code
    pub code: String,

    pub is_active: bool,

    /// Shop category, e.g. "servicepoint" or "locker"
    #[serde(default)]
    pub shop_type: Option<String>,

    pub name: String,
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
    pub city: String,

    /// Decimal latitude, e.g. "51.4408"
    pub latitude: String,

    /// Decimal longitude, e.g. "5.4778"
    pub longitude: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub homepage: Option<String>,

    /// Carrier code, e.g. "postnl"
    pub carrier: String,

    /// ISO-2 country code
    pub country: String,

    /// Opening hours keyed by weekday index ("0" is Monday)
    #[serde(default)]
    pub formatted_opening_times: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub open_tomorrow: bool,

    #[serde(default)]
    pub open_upcoming_week: bool,

    /// Distance in metres from the searched location
    #[serde(default)]
    pub distance: Option<u64>,
}

/// Search parameters for [`crate::client::SendcloudClient::search_service_points`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServicePointQuery {
    /// ISO-2 country code (required by the API)
    pub country: String,

    /// Free-text address to search around
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// Comma-separated carrier codes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,

    /// Search radius in metres
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<u32>,

    /// Parcel weight in grams, sent to the API as a kilogram string
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_grams_as_kilograms"
    )]
    pub weight: Option<u64>,
}

fn serialize_grams_as_kilograms<S>(weight: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match weight {
        Some(grams) => serializer.serialize_str(&grams_to_kilograms(*grams)),
        None => serializer.serialize_none(),
    }
}

impl ServicePointQuery {
    /// Search in `country` (ISO-2). Every other parameter is unset.
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            ..Self::default()
        }
    }

    /// Search around a free-text address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Only return service points of these carriers (comma-separated codes).
    pub fn with_carrier(mut self, carrier: impl Into<String>) -> Self {
        self.carrier = Some(carrier.into());
        self
    }

    /// Search radius in metres.
    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Only return service points that accept a parcel of `weight` grams.
    pub fn with_weight(mut self, weight: u64) -> Self {
        self.weight = Some(weight);
        self
    }
}
