//! Postal address of a parcel recipient or sender.

use serde::Serialize;
use serde_json::Value;

use crate::error::MappingError;
use crate::mapping::json::JsonObject;

/// Immutable postal address.
///
/// `address_line_1` may embed the house number. When the address comes from
/// parcel data, `house_number` and `street` are taken from the vendor's
/// pre-divided `address_divided` object and are never parsed out of line 1.
///
/// # Examples
///
/// ```rust
/// use sendcloud_sdk::models::Address;
///
/// let address = Address::new("Jane Doe", "Stadhuisplein 10", "Eindhoven", "5611 EM", "NL", "jane@example.com")
///     .with_company_name("Acme")
///     .with_house_number("10");
///
/// assert_eq!(address.company_name(), Some("Acme"));
/// assert_eq!(address.phone_number(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    name: String,
    company_name: Option<String>,
    address_line_1: String,
    address_line_2: Option<String>,
    house_number: Option<String>,
    city: String,
    postal_code: String,
    country_code: String,
    email: String,
    phone_number: Option<String>,
    country_state_code: Option<String>,
    street: Option<String>,
}

impl Address {
    /// Create an address from its required fields.
    pub fn new(
        name: impl Into<String>,
        address_line_1: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
        country_code: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            company_name: None,
            address_line_1: address_line_1.into(),
            address_line_2: None,
            house_number: None,
            city: city.into(),
            postal_code: postal_code.into(),
            country_code: country_code.into(),
            email: email.into(),
            phone_number: None,
            country_state_code: None,
            street: None,
        }
    }

    /// Set the company name. An empty string clears it.
    pub fn with_company_name(mut self, company_name: impl Into<String>) -> Self {
        self.company_name = non_empty(company_name.into());
        self
    }

    /// Set the second address line. An empty string clears it.
    pub fn with_address_line_2(mut self, address_line_2: impl Into<String>) -> Self {
        self.address_line_2 = non_empty(address_line_2.into());
        self
    }

    /// Set the house number.
    ///
    /// `address_line_1` is left unchanged; the vendor receives both.
    pub fn with_house_number(mut self, house_number: impl Into<String>) -> Self {
        self.house_number = non_empty(house_number.into());
        self
    }

    /// Set the phone number, preferably in international format.
    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = non_empty(phone_number.into());
        self
    }

    /// Set the ISO 3166-2 subdivision code (required by the vendor for some countries).
    pub fn with_country_state_code(mut self, country_state_code: impl Into<String>) -> Self {
        self.country_state_code = non_empty(country_state_code.into());
        self
    }

    /// Set the street name without the house number.
    pub fn with_street(mut self, street: impl Into<String>) -> Self {
        self.street = non_empty(street.into());
        self
    }

    /// Build an address from the flat address fields of a parcel object.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when a required field (`name`, `address`,
    /// `city`, `postal_code`, `country`, `email`) is missing or malformed.
    pub fn from_parcel_json(parcel: &Value) -> Result<Self, MappingError> {
        let parcel = JsonObject::new(parcel, "parcel")?;
        Self::from_parcel_object(&parcel)
    }

    pub(crate) fn from_parcel_object(parcel: &JsonObject<'_>) -> Result<Self, MappingError> {
        let (street, house_number) = match parcel.optional_object("address_divided")? {
            Some(divided) => (
                divided.optional_string("street")?,
                divided.optional_string("house_number")?,
            ),
            None => (None, None),
        };

        Ok(Self {
            name: parcel.required_string("name")?,
            company_name: parcel.optional_string("company_name")?,
            address_line_1: parcel.required_string("address")?,
            address_line_2: parcel.optional_string("address_2")?,
            house_number,
            city: parcel.required_string("city")?,
            postal_code: parcel.required_string("postal_code")?,
            country_code: country_code(parcel)?,
            email: parcel.required_string("email")?,
            phone_number: parcel.optional_string("telephone")?,
            country_state_code: parcel.optional_string("country_state")?,
            street,
        })
    }

    /// Recipient name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Company name, `None` when the vendor sent it empty.
    pub fn company_name(&self) -> Option<&str> {
        self.company_name.as_deref()
    }

    /// First address line, possibly including the house number.
    pub fn address_line_1(&self) -> &str {
        &self.address_line_1
    }

    pub fn address_line_2(&self) -> Option<&str> {
        self.address_line_2.as_deref()
    }

    /// House number from `address_divided`, never parsed out of line 1.
    pub fn house_number(&self) -> Option<&str> {
        self.house_number.as_deref()
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    /// ISO 3166-1 alpha-2 country code.
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Email address. May be empty.
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    /// ISO 3166-2 subdivision code, e.g. `US-CA`.
    pub fn country_state_code(&self) -> Option<&str> {
        self.country_state_code.as_deref()
    }

    /// Street name as divided by the vendor.
    pub fn street(&self) -> Option<&str> {
        self.street.as_deref()
    }
}

/// The vendor nests the country as `{"iso_2": "NL", ...}`; older payloads
/// send the bare code.
fn country_code(parcel: &JsonObject<'_>) -> Result<String, MappingError> {
    match parcel.get("country") {
        Some(Value::String(code)) => Ok(code.clone()),
        _ => parcel.object("country")?.required_string("iso_2"),
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
#[path = "address_tests.rs"]
mod tests;
