//! Line items of a parcel, used for customs declarations.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::MappingError;
use crate::mapping::json::JsonObject;
use crate::units::{kilograms_to_grams, round_to_cents};

/// One line item of a parcel.
///
/// Weight is in grams; value is rounded to two decimal places on construction.
///
/// # Examples
///
/// ```rust
/// use sendcloud_sdk::models::ParcelItem;
/// use rust_decimal::Decimal;
///
/// let item = ParcelItem::new("Green tea", 2, 150, Decimal::new(12999, 3))
///     .with_hs_code("090210")
///     .with_origin_country_code("CN");
///
/// assert_eq!(item.value(), Decimal::new(1300, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParcelItem {
    description: String,
    quantity: u32,
    weight: u64,
    value: Decimal,
    hs_code: Option<String>,
    origin_country_code: Option<String>,
    sku: Option<String>,
    product_id: Option<String>,
    properties: Option<Map<String, Value>>,
}

impl ParcelItem {
    /// Create an item. `weight` is in grams.
    pub fn new(description: impl Into<String>, quantity: u32, weight: u64, value: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            weight,
            value: round_to_cents(value),
            hs_code: None,
            origin_country_code: None,
            sku: None,
            product_id: None,
            properties: None,
        }
    }

    /// Set the harmonized system code.
    pub fn with_hs_code(mut self, hs_code: impl Into<String>) -> Self {
        self.hs_code = Some(hs_code.into()).filter(|code| !code.is_empty());
        self
    }

    /// Set the ISO-2 country the goods were produced in.
    pub fn with_origin_country_code(mut self, country_code: impl Into<String>) -> Self {
        self.origin_country_code = Some(country_code.into()).filter(|code| !code.is_empty());
        self
    }

    /// Set the stock keeping unit.
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into()).filter(|sku| !sku.is_empty());
        self
    }

    /// Set the shop-side product id.
    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into()).filter(|id| !id.is_empty());
        self
    }

    /// Attach free-form product properties, e.g. size or colour.
    ///
    /// An empty map counts as no properties.
    pub fn with_properties(mut self, properties: Map<String, Value>) -> Self {
        self.properties = Some(properties).filter(|properties| !properties.is_empty());
        self
    }

    /// Map a vendor `parcel_items[]` entry.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when `description`, `quantity`, `weight` or
    /// `value` is missing or malformed.
    pub fn from_json(value: &Value) -> Result<Self, MappingError> {
        Self::from_object(&JsonObject::new(value, "parcel_item")?)
    }

    pub(crate) fn from_object(item: &JsonObject<'_>) -> Result<Self, MappingError> {
        let quantity = item.required_u64("quantity")?;
        let quantity = u32::try_from(quantity).map_err(|_| {
            MappingError::invalid(item.path_of("quantity"), format!("{} is out of range", quantity))
        })?;

        let properties = match item.optional_object("properties")? {
            Some(properties) if !properties.map().is_empty() => Some(properties.map().clone()),
            _ => None,
        };

        Ok(Self {
            description: item.required_string("description")?,
            quantity,
            weight: kilograms_to_grams(&item.path_of("weight"), item.required_decimal("weight")?)?,
            value: round_to_cents(item.required_decimal("value")?),
            hs_code: item.optional_string("hs_code")?,
            origin_country_code: item.optional_string("origin_country")?,
            sku: item.optional_string("sku")?,
            product_id: item.optional_string("product_id")?,
            properties,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Number of units.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Weight of a single unit in grams.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Value of a single unit, rounded to two decimals.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Harmonized system code for customs.
    pub fn hs_code(&self) -> Option<&str> {
        self.hs_code.as_deref()
    }

    /// ISO-2 country of origin.
    pub fn origin_country_code(&self) -> Option<&str> {
        self.origin_country_code.as_deref()
    }

    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }

    pub fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    /// Free-form product properties, `None` when the vendor sent none.
    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.properties.as_ref()
    }
}
