//! Parcels and their vendor status, label and customs vocabularies.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MappingError;
use crate::mapping::json::JsonObject;
use crate::models::{Address, ParcelItem};
use crate::units::{json_kind, kilograms_to_grams};

/// Timestamp layout of the vendor's `date_created` field.
const VENDOR_DATE_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

// ============================================================================
// Label formats
// ============================================================================

/// Physical print layout of a shipping label.
///
/// A6 labels come from `label.label_printer`; the four A4 quadrants come
/// from `label.normal_printer[id - 2]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LabelFormat {
    A6,
    A4TopLeft,
    A4TopRight,
    A4BottomLeft,
    A4BottomRight,
}

impl LabelFormat {
    /// Every format, in vendor id order.
    pub const ALL: [LabelFormat; 5] = [
        Self::A6,
        Self::A4TopLeft,
        Self::A4TopRight,
        Self::A4BottomLeft,
        Self::A4BottomRight,
    ];

    /// Numeric format id used by the vendor (1..=5).
    pub fn id(self) -> u8 {
        match self {
            Self::A6 => 1,
            Self::A4TopLeft => 2,
            Self::A4TopRight => 3,
            Self::A4BottomLeft => 4,
            Self::A4BottomRight => 5,
        }
    }

    /// Format for a vendor format id, `None` outside 1..=5.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.id() == id)
    }

    /// Position in `label.normal_printer`, for A4 formats only.
    fn normal_printer_index(self) -> Option<usize> {
        match self {
            Self::A6 => None,
            other => Some(usize::from(other.id() - 2)),
        }
    }
}

// ============================================================================
// Parcel status
// ============================================================================

/// Known vendor parcel status codes.
///
/// The vendor adds codes over time; unknown ids are kept as [`ParcelStatus::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParcelStatus {
    Announced,
    EnRouteToSortingCenter,
    DeliveryDelayed,
    Sorted,
    NotSorted,
    BeingSorted,
    DeliveryAttemptFailed,
    Delivered,
    AwaitingCustomerPickup,
    AnnouncedNotCollected,
    ErrorCollecting,
    ShipmentPickedUpByDriver,
    UnableToDeliver,
    ParcelEnRoute,
    DriverEnRoute,
    ShipmentCollectedByCustomer,
    NoLabel,
    ReadyToSend,
    BeingAnnounced,
    AnnouncementFailed,
    UnknownStatus,
    CancelledUpstream,
    CancellationRequested,
    Cancelled,
    SubmittingCancellationRequest,
    Other(u32),
}

impl ParcelStatus {
    /// Status for a vendor status id. Unknown ids map to [`ParcelStatus::Other`].
    pub fn from_id(id: u32) -> Self {
        match id {
            1 => Self::Announced,
            3 => Self::EnRouteToSortingCenter,
            4 => Self::DeliveryDelayed,
            5 => Self::Sorted,
            6 => Self::NotSorted,
            7 => Self::BeingSorted,
            8 => Self::DeliveryAttemptFailed,
            11 => Self::Delivered,
            12 => Self::AwaitingCustomerPickup,
            13 => Self::AnnouncedNotCollected,
            15 => Self::ErrorCollecting,
            22 => Self::ShipmentPickedUpByDriver,
            80 => Self::UnableToDeliver,
            91 => Self::ParcelEnRoute,
            92 => Self::DriverEnRoute,
            93 => Self::ShipmentCollectedByCustomer,
            999 => Self::NoLabel,
            1000 => Self::ReadyToSend,
            1001 => Self::BeingAnnounced,
            1002 => Self::AnnouncementFailed,
            1337 => Self::UnknownStatus,
            1998 => Self::CancelledUpstream,
            1999 => Self::CancellationRequested,
            2000 => Self::Cancelled,
            2001 => Self::SubmittingCancellationRequest,
            other => Self::Other(other),
        }
    }

    /// Vendor status id.
    pub fn id(self) -> u32 {
        match self {
            Self::Announced => 1,
            Self::EnRouteToSortingCenter => 3,
            Self::DeliveryDelayed => 4,
            Self::Sorted => 5,
            Self::NotSorted => 6,
            Self::BeingSorted => 7,
            Self::DeliveryAttemptFailed => 8,
            Self::Delivered => 11,
            Self::AwaitingCustomerPickup => 12,
            Self::AnnouncedNotCollected => 13,
            Self::ErrorCollecting => 15,
            Self::ShipmentPickedUpByDriver => 22,
            Self::UnableToDeliver => 80,
            Self::ParcelEnRoute => 91,
            Self::DriverEnRoute => 92,
            Self::ShipmentCollectedByCustomer => 93,
            Self::NoLabel => 999,
            Self::ReadyToSend => 1000,
            Self::BeingAnnounced => 1001,
            Self::AnnouncementFailed => 1002,
            Self::UnknownStatus => 1337,
            Self::CancelledUpstream => 1998,
            Self::CancellationRequested => 1999,
            Self::Cancelled => 2000,
            Self::SubmittingCancellationRequest => 2001,
            Self::Other(id) => id,
        }
    }
}

// ============================================================================
// Customs shipment type
// ============================================================================

/// Customs declaration category for shipments leaving the EU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomsShipmentType {
    Gift,
    Documents,
    CommercialGoods,
    CommercialSample,
    ReturnedGoods,
}

impl CustomsShipmentType {
    /// Numeric code sent as `customs_shipment_type`.
    pub fn code(self) -> u8 {
        match self {
            Self::Gift => 0,
            Self::Documents => 1,
            Self::CommercialGoods => 2,
            Self::CommercialSample => 3,
            Self::ReturnedGoods => 4,
        }
    }
}

impl TryFrom<u64> for CustomsShipmentType {
    type Error = u64;

    fn try_from(code: u64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Gift),
            1 => Ok(Self::Documents),
            2 => Ok(Self::CommercialGoods),
            3 => Ok(Self::CommercialSample),
            4 => Ok(Self::ReturnedGoods),
            other => Err(other),
        }
    }
}

// ============================================================================
// Dimensions
// ============================================================================

/// Physical parcel dimensions in centimetres, as reported by the vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: Decimal,
    pub width: Decimal,
    pub height: Decimal,
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} x {} cm", self.length, self.width, self.height)
    }
}

// ============================================================================
// Parcel
// ============================================================================

/// A parcel as returned by the vendor's parcel endpoints and webhooks.
///
/// Weight is always whole grams, converted from the wire's decimal
/// kilogram string with midpoint-away-from-zero rounding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parcel {
    id: u64,
    status_id: u32,
    status_message: String,
    created: DateTime<Utc>,
    tracking_number: String,
    weight: u64,
    address: Address,
    label_urls: BTreeMap<LabelFormat, String>,
    tracking_url: Option<String>,
    carrier: Option<String>,
    order_number: Option<String>,
    shipping_method_id: Option<u64>,
    service_point_id: Option<u64>,
    customs_invoice_number: Option<String>,
    customs_shipment_type: Option<CustomsShipmentType>,
    items: Vec<ParcelItem>,
    errors: BTreeMap<String, Vec<String>>,
    dimensions: Option<Dimensions>,
}

impl Parcel {
    /// Map a vendor parcel object.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when a required field is missing or any
    /// field has an unexpected shape. Nothing is silently defaulted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sendcloud_sdk::models::Parcel;
    /// use serde_json::json;
    ///
    /// let parcel = Parcel::from_json(&json!({
    ///     "id": 3,
    ///     "status": { "id": 1000, "message": "Ready to send" },
    ///     "date_created": "01-05-2018 10:46:53",
    ///     "tracking_number": "3SYZXG132912330",
    ///     "weight": "2.486",
    ///     "name": "John Doe",
    ///     "address": "Stadhuisplein 10",
    ///     "city": "Eindhoven",
    ///     "postal_code": "5611 EM",
    ///     "country": { "iso_2": "NL" },
    ///     "email": "john@doe.com"
    /// }))?;
    ///
    /// assert_eq!(parcel.weight(), 2486);
    /// assert!(!parcel.has_label());
    /// # Ok::<(), sendcloud_sdk::MappingError>(())
    /// ```
    pub fn from_json(value: &Value) -> Result<Self, MappingError> {
        let parcel = JsonObject::new(value, "parcel")?;
        Self::from_object(&parcel)
    }

    pub(crate) fn from_object(parcel: &JsonObject<'_>) -> Result<Self, MappingError> {
        let status = parcel.object("status")?;
        let status_id = status.required_u64("id")?;
        let status_id = u32::try_from(status_id).map_err(|_| {
            MappingError::invalid(status.path_of("id"), format!("{} is out of range", status_id))
        })?;

        let weight = kilograms_to_grams(&parcel.path_of("weight"), parcel.required_decimal("weight")?)?;

        let carrier = match parcel.optional_object("carrier")? {
            Some(carrier) => carrier.optional_string("code")?,
            None => None,
        };
        let shipping_method_id = match parcel.optional_object("shipment")? {
            Some(shipment) => shipment.optional_u64("id")?,
            None => None,
        };

        let customs_shipment_type = match parcel.optional_u64("customs_shipment_type")? {
            Some(code) => Some(CustomsShipmentType::try_from(code).map_err(|code| {
                MappingError::invalid(
                    parcel.path_of("customs_shipment_type"),
                    format!("unknown customs shipment type {}", code),
                )
            })?),
            None => None,
        };

        Ok(Self {
            id: parcel.required_u64("id")?,
            status_id,
            status_message: status.required_string("message")?,
            created: parse_created(parcel)?,
            tracking_number: parcel.required_string("tracking_number")?,
            weight,
            address: Address::from_parcel_object(parcel)?,
            label_urls: label_urls(parcel)?,
            tracking_url: parcel.optional_string("tracking_url")?,
            carrier,
            order_number: parcel.optional_string("order_number")?,
            shipping_method_id,
            service_point_id: parcel.optional_u64("to_service_point")?,
            customs_invoice_number: parcel.optional_string("customs_invoice_nr")?,
            customs_shipment_type,
            items: items(parcel)?,
            errors: field_errors(parcel)?,
            dimensions: dimensions(parcel)?,
        })
    }

    /// Vendor parcel id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Raw vendor status id, also for statuses this crate does not know.
    pub fn status_id(&self) -> u32 {
        self.status_id
    }

    pub fn status(&self) -> ParcelStatus {
        ParcelStatus::from_id(self.status_id)
    }

    /// Human-readable status text from the vendor.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Creation time, read from `date_created` as UTC.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Carrier tracking number. Empty until a label has been created.
    pub fn tracking_number(&self) -> &str {
        &self.tracking_number
    }

    /// Weight in grams.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Recipient address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Download URL per label format the vendor provided.
    pub fn label_urls(&self) -> &BTreeMap<LabelFormat, String> {
        &self.label_urls
    }

    /// Label download URL for `format`, if the vendor provided one.
    pub fn label_url(&self, format: LabelFormat) -> Option<&str> {
        self.label_urls.get(&format).map(String::as_str)
    }

    /// Whether a label has been created for the parcel.
    pub fn has_label(&self) -> bool {
        !self.label_urls.is_empty()
    }

    /// Public tracking page URL.
    pub fn tracking_url(&self) -> Option<&str> {
        self.tracking_url.as_deref()
    }

    /// Carrier code, e.g. `postnl`.
    pub fn carrier(&self) -> Option<&str> {
        self.carrier.as_deref()
    }

    pub fn order_number(&self) -> Option<&str> {
        self.order_number.as_deref()
    }

    /// Id of the shipping method from the `shipment` object.
    pub fn shipping_method_id(&self) -> Option<u64> {
        self.shipping_method_id
    }

    /// Service point the parcel is delivered to, if any.
    pub fn service_point_id(&self) -> Option<u64> {
        self.service_point_id
    }

    pub fn customs_invoice_number(&self) -> Option<&str> {
        self.customs_invoice_number.as_deref()
    }

    pub fn customs_shipment_type(&self) -> Option<CustomsShipmentType> {
        self.customs_shipment_type
    }

    /// Line items, empty when the vendor sent none.
    pub fn items(&self) -> &[ParcelItem] {
        &self.items
    }

    /// Field validation errors echoed by the API, keyed by field name.
    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    /// Dimensions, when the vendor reported all three sides.
    pub fn dimensions(&self) -> Option<&Dimensions> {
        self.dimensions.as_ref()
    }
}

fn parse_created(parcel: &JsonObject<'_>) -> Result<DateTime<Utc>, MappingError> {
    let raw = parcel.required_string("date_created")?;

    if let Ok(naive) = NaiveDateTime::parse_from_str(&raw, VENDOR_DATE_FORMAT) {
        return Ok(naive.and_utc());
    }

    DateTime::parse_from_rfc3339(&raw)
        .map(|created| created.with_timezone(&Utc))
        .map_err(|_| {
            MappingError::invalid(
                parcel.path_of("date_created"),
                format!("'{}' is not a recognised timestamp", raw),
            )
        })
}

fn label_urls(parcel: &JsonObject<'_>) -> Result<BTreeMap<LabelFormat, String>, MappingError> {
    let mut urls = BTreeMap::new();
    let Some(label) = parcel.optional_object("label")? else {
        return Ok(urls);
    };

    if let Some(url) = label.optional_string("label_printer")? {
        urls.insert(LabelFormat::A6, url);
    }

    if let Some(printers) = label.optional_array("normal_printer")? {
        for format in LabelFormat::ALL {
            let Some(index) = format.normal_printer_index() else {
                continue;
            };
            match printers.get(index) {
                Some(Value::String(url)) if !url.is_empty() => {
                    urls.insert(format, url.clone());
                }
                None | Some(Value::Null) | Some(Value::String(_)) => {}
                Some(other) => {
                    return Err(MappingError::invalid(
                        format!("{}[{}]", label.path_of("normal_printer"), index),
                        format!("expected a URL string, got {}", json_kind(other)),
                    ))
                }
            }
        }
    }

    Ok(urls)
}

fn items(parcel: &JsonObject<'_>) -> Result<Vec<ParcelItem>, MappingError> {
    let Some(items) = parcel.optional_array("parcel_items")? else {
        return Ok(Vec::new());
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let path = format!("{}[{}]", parcel.path_of("parcel_items"), index);
            ParcelItem::from_object(&JsonObject::new(item, path)?)
        })
        .collect()
}

/// Normalizes `errors` to field → messages. The API sends either a single
/// message or a list per field, and `[]` when there are none.
fn field_errors(parcel: &JsonObject<'_>) -> Result<BTreeMap<String, Vec<String>>, MappingError> {
    let path = parcel.path_of("errors");
    let entries = match parcel.get("errors") {
        None => return Ok(BTreeMap::new()),
        Some(Value::Array(items)) if items.is_empty() => return Ok(BTreeMap::new()),
        Some(Value::Object(entries)) => entries,
        Some(other) => {
            return Err(MappingError::invalid(
                path,
                format!("expected an object, got {}", json_kind(other)),
            ))
        }
    };

    entries
        .iter()
        .map(|(field, messages)| {
            let messages = match messages {
                Value::String(message) => vec![message.clone()],
                Value::Array(list) => list
                    .iter()
                    .map(|message| match message {
                        Value::String(message) => Ok(message.clone()),
                        other => Err(MappingError::invalid(
                            format!("{}.{}", path, field),
                            format!("expected a message string, got {}", json_kind(other)),
                        )),
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                other => {
                    return Err(MappingError::invalid(
                        format!("{}.{}", path, field),
                        format!("expected a message or a list of messages, got {}", json_kind(other)),
                    ))
                }
            };
            Ok((field.clone(), messages))
        })
        .collect()
}

fn dimensions(parcel: &JsonObject<'_>) -> Result<Option<Dimensions>, MappingError> {
    let length = parcel.optional_decimal("length")?;
    let width = parcel.optional_decimal("width")?;
    let height = parcel.optional_decimal("height")?;

    match (length, width, height) {
        (Some(length), Some(width), Some(height)) => Ok(Some(Dimensions {
            length,
            width,
            height,
        })),
        (None, None, None) => Ok(None),
        (length, width, _) => {
            let missing = if length.is_none() {
                "length"
            } else if width.is_none() {
                "width"
            } else {
                "height"
            };
            Err(MappingError::invalid(
                parcel.path_of(missing),
                "length, width and height must be given together",
            ))
        }
    }
}

#[cfg(test)]
#[path = "parcel_tests.rs"]
mod tests;
