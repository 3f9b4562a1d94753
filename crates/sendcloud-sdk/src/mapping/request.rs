//! Outbound parcel request bodies.
//!
//! The vendor expects the address keys of a parcel request to be present even
//! when empty, so absent optional address fields are sent as `""`. Every
//! other optional field is left out of the body entirely.

use rust_decimal::prelude::ToPrimitive;
use serde_json::{json, Map, Number, Value};

use crate::error::MappingError;
use crate::models::{Address, CustomsShipmentType, ParcelItem, SenderAddress, ShippingMethod};
use crate::units::{grams_to_kilograms, json_kind};

// ============================================================================
// References
// ============================================================================

/// A shipping method given either by id or as a fetched [`ShippingMethod`].
#[derive(Debug, Clone, PartialEq)]
pub enum ShippingMethodRef {
    Id(u64),
    Method(ShippingMethod),
}

impl ShippingMethodRef {
    /// Id sent to the vendor.
    pub fn id(&self) -> u64 {
        match self {
            Self::Id(id) => *id,
            Self::Method(method) => method.id(),
        }
    }
}

impl From<u64> for ShippingMethodRef {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<ShippingMethod> for ShippingMethodRef {
    fn from(method: ShippingMethod) -> Self {
        Self::Method(method)
    }
}

impl TryFrom<&Value> for ShippingMethodRef {
    type Error = MappingError;

    /// Accepts a numeric id or an object with an `id`.
    ///
    /// A complete shipping method object is kept as [`Self::Method`]; any
    /// other object is reduced to its id.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let id = reference_id(value, "shipping method")?;
        if has_fields_besides_id(value) {
            if let Ok(method) = ShippingMethod::from_json(value) {
                return Ok(Self::Method(method));
            }
        }
        Ok(Self::Id(id))
    }
}

/// The sender of a parcel.
///
/// A stored sender address is referenced by id. A full [`Address`] is sent
/// inline through the `from_*` fields instead.
#[derive(Debug, Clone, PartialEq)]
pub enum SenderRef {
    Id(u64),
    SenderAddress(SenderAddress),
    Address(Address),
}

impl From<u64> for SenderRef {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<SenderAddress> for SenderRef {
    fn from(sender: SenderAddress) -> Self {
        Self::SenderAddress(sender)
    }
}

impl From<Address> for SenderRef {
    fn from(address: Address) -> Self {
        Self::Address(address)
    }
}

impl TryFrom<&Value> for SenderRef {
    type Error = MappingError;

    /// Accepts a numeric id or an object with an `id`.
    ///
    /// A complete sender address object is kept as [`Self::SenderAddress`];
    /// any other object is reduced to its id.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let id = reference_id(value, "sender address")?;
        if has_fields_besides_id(value) {
            if let Ok(sender) = SenderAddress::from_json(value) {
                return Ok(Self::SenderAddress(sender));
            }
        }
        Ok(Self::Id(id))
    }
}

/// The id of a reference given as a number or as an object with an `id`.
fn reference_id(value: &Value, what: &str) -> Result<u64, MappingError> {
    match value {
        Value::Number(n) => positive_id(n, what),
        Value::Object(object) => match object.get("id") {
            Some(Value::Number(n)) => positive_id(n, what),
            Some(other) => Err(MappingError::invalid_argument(format!(
                "{} id must be a positive integer, got {}",
                what,
                json_kind(other)
            ))),
            None => Err(MappingError::invalid_argument(format!(
                "{} object has no id",
                what
            ))),
        },
        other => Err(MappingError::invalid_argument(format!(
            "{} must be an id or an object, got {}",
            what,
            json_kind(other)
        ))),
    }
}

fn positive_id(n: &Number, what: &str) -> Result<u64, MappingError> {
    n.as_u64().filter(|id| *id > 0).ok_or_else(|| {
        MappingError::invalid_argument(format!("{} id must be a positive integer, got {}", what, n))
    })
}

fn has_fields_besides_id(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.keys().any(|key| key != "id"))
}

// ============================================================================
// Parcel request
// ============================================================================

/// Request body for creating or updating a parcel.
///
/// # Examples
///
/// ```rust
/// use sendcloud_sdk::mapping::ParcelRequest;
/// use sendcloud_sdk::models::Address;
///
/// let address = Address::new("Jane Doe", "Stadhuisplein 10", "Eindhoven", "5611 EM", "NL", "jane@example.com");
/// let body = ParcelRequest::new(address)
///     .with_order_number("1042")
///     .with_weight(2486)
///     .to_request_body()
///     .unwrap();
///
/// assert_eq!(body["weight"], "2.486");
/// assert_eq!(body["company_name"], "");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelRequest {
    parcel_id: Option<u64>,
    address: Address,
    service_point_id: Option<u64>,
    post_number: Option<String>,
    order_number: Option<String>,
    weight: Option<u64>,
    request_label: bool,
    shipping_method: Option<ShippingMethodRef>,
    sender: Option<SenderRef>,
    customs_invoice_number: Option<String>,
    customs_shipment_type: Option<CustomsShipmentType>,
    items: Vec<ParcelItem>,
}

impl ParcelRequest {
    /// Start a request for a parcel delivered to `address`. Nothing else is set.
    pub fn new(address: Address) -> Self {
        Self {
            parcel_id: None,
            address,
            service_point_id: None,
            post_number: None,
            order_number: None,
            weight: None,
            request_label: false,
            shipping_method: None,
            sender: None,
            customs_invoice_number: None,
            customs_shipment_type: None,
            items: Vec::new(),
        }
    }

    /// Target an existing parcel (used for updates).
    pub fn with_parcel_id(mut self, parcel_id: u64) -> Self {
        self.parcel_id = Some(parcel_id);
        self
    }

    /// Deliver to a carrier service point instead of the address.
    pub fn with_service_point(mut self, service_point_id: u64) -> Self {
        self.service_point_id = Some(service_point_id);
        self
    }

    /// Recipient's post number, required by some carriers for locker delivery.
    pub fn with_post_number(mut self, post_number: impl Into<String>) -> Self {
        self.post_number = Some(post_number.into()).filter(|n| !n.is_empty());
        self
    }

    /// Shop order number shown in the vendor panel. Empty is treated as unset.
    pub fn with_order_number(mut self, order_number: impl Into<String>) -> Self {
        self.order_number = Some(order_number.into()).filter(|n| !n.is_empty());
        self
    }

    /// Parcel weight in grams. Zero is treated as unset.
    pub fn with_weight(mut self, weight: u64) -> Self {
        self.weight = Some(weight).filter(|w| *w > 0);
        self
    }

    /// Ask the vendor to announce the parcel and create a label.
    pub fn with_request_label(mut self, request_label: bool) -> Self {
        self.request_label = request_label;
        self
    }

    /// Ship with a shipping method, given by id or as a [`ShippingMethod`].
    ///
    /// Only the id is sent.
    pub fn with_shipping_method(mut self, shipping_method: impl Into<ShippingMethodRef>) -> Self {
        self.shipping_method = Some(shipping_method.into());
        self
    }

    /// Set the sender. See [`SenderRef`] for how each form is sent.
    pub fn with_sender(mut self, sender: impl Into<SenderRef>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Invoice number for the customs declaration.
    pub fn with_customs_invoice_number(mut self, invoice_number: impl Into<String>) -> Self {
        self.customs_invoice_number = Some(invoice_number.into()).filter(|n| !n.is_empty());
        self
    }

    /// Customs category of the shipment.
    pub fn with_customs_shipment_type(mut self, shipment_type: CustomsShipmentType) -> Self {
        self.customs_shipment_type = Some(shipment_type);
        self
    }

    /// Line items, replacing any set before. Required by customs outside the EU.
    pub fn with_items(mut self, items: Vec<ParcelItem>) -> Self {
        self.items = items;
        self
    }

    /// Recipient address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn items(&self) -> &[ParcelItem] {
        &self.items
    }

    /// Assemble the vendor-shaped `parcel` object.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidArgument`] when a label is requested
    /// without a shipping method, and [`MappingError::InvalidField`] when an
    /// item value cannot be represented as a JSON number.
    pub fn to_request_body(&self) -> Result<Value, MappingError> {
        let mut body = address_fields(&self.address);

        if let Some(id) = self.parcel_id {
            body.insert("id".into(), json!(id));
        }
        if let Some(id) = self.service_point_id {
            body.insert("to_service_point".into(), json!(id));
        }
        if let Some(post_number) = &self.post_number {
            body.insert("to_post_number".into(), json!(post_number));
        }
        if let Some(order_number) = &self.order_number {
            body.insert("order_number".into(), json!(order_number));
        }
        if let Some(weight) = self.weight {
            body.insert("weight".into(), json!(grams_to_kilograms(weight)));
        }
        if let Some(method) = &self.shipping_method {
            body.insert("shipment".into(), json!({ "id": method.id() }));
        }

        if self.request_label {
            if self.shipping_method.is_none() {
                return Err(MappingError::invalid_argument(
                    "a shipping method is required to request a label",
                ));
            }
            body.insert("request_label".into(), json!(true));
            body.insert("apply_shipping_rules".into(), json!(false));
        }

        match &self.sender {
            Some(SenderRef::Id(id)) => {
                body.insert("sender_address".into(), json!(id));
            }
            Some(SenderRef::SenderAddress(sender)) => {
                body.insert("sender_address".into(), json!(sender.id()));
            }
            Some(SenderRef::Address(address)) => body.extend(sender_fields(address)),
            None => {}
        }

        if let Some(invoice) = &self.customs_invoice_number {
            body.insert("customs_invoice_nr".into(), json!(invoice));
        }
        if let Some(shipment_type) = self.customs_shipment_type {
            body.insert("customs_shipment_type".into(), json!(shipment_type.code()));
        }

        if !self.items.is_empty() {
            let items = self
                .items
                .iter()
                .enumerate()
                .map(|(index, item)| item_fields(index, item))
                .collect::<Result<Vec<_>, _>>()?;
            body.insert("parcel_items".into(), Value::Array(items));
        }

        Ok(Value::Object(body))
    }
}

fn address_fields(address: &Address) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("name".into(), json!(address.name()));
    fields.insert("company_name".into(), json!(address.company_name().unwrap_or("")));
    fields.insert("address".into(), json!(address.address_line_1()));
    fields.insert("address_2".into(), json!(address.address_line_2().unwrap_or("")));
    fields.insert("house_number".into(), json!(address.house_number().unwrap_or("")));
    fields.insert("city".into(), json!(address.city()));
    fields.insert("postal_code".into(), json!(address.postal_code()));
    fields.insert("country".into(), json!(address.country_code()));
    fields.insert("email".into(), json!(address.email()));
    fields.insert("telephone".into(), json!(address.phone_number().unwrap_or("")));
    fields.insert("country_state".into(), json!(address.country_state_code().unwrap_or("")));
    fields
}

fn sender_fields(address: &Address) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("from_name".into(), json!(address.name()));
    fields.insert("from_company_name".into(), json!(address.company_name().unwrap_or("")));
    fields.insert("from_address_1".into(), json!(address.address_line_1()));
    fields.insert("from_address_2".into(), json!(address.address_line_2().unwrap_or("")));
    fields.insert("from_house_number".into(), json!(address.house_number().unwrap_or("")));
    fields.insert("from_city".into(), json!(address.city()));
    fields.insert("from_postal_code".into(), json!(address.postal_code()));
    fields.insert("from_country".into(), json!(address.country_code()));
    fields.insert("from_telephone".into(), json!(address.phone_number().unwrap_or("")));
    fields.insert("from_email".into(), json!(address.email()));
    fields
}

fn item_fields(index: usize, item: &ParcelItem) -> Result<Value, MappingError> {
    let value = item
        .value()
        .to_f64()
        .and_then(Number::from_f64)
        .ok_or_else(|| {
            MappingError::invalid(
                format!("parcel_items[{}].value", index),
                format!("{} cannot be sent as a number", item.value()),
            )
        })?;

    let mut fields = Map::new();
    fields.insert("description".into(), json!(item.description()));
    fields.insert("quantity".into(), json!(item.quantity()));
    fields.insert("weight".into(), json!(grams_to_kilograms(item.weight())));
    fields.insert("value".into(), Value::Number(value));

    if let Some(hs_code) = item.hs_code() {
        fields.insert("hs_code".into(), json!(hs_code));
    }
    if let Some(country) = item.origin_country_code() {
        fields.insert("origin_country".into(), json!(country));
    }
    if let Some(sku) = item.sku() {
        fields.insert("sku".into(), json!(sku));
    }
    if let Some(product_id) = item.product_id() {
        fields.insert("product_id".into(), json!(product_id));
    }
    if let Some(properties) = item.properties() {
        fields.insert("properties".into(), Value::Object(properties.clone()));
    }

    Ok(Value::Object(fields))
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
