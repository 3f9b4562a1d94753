//! Sender addresses configured in the vendor account.

use serde::Serialize;
use serde_json::Value;

use crate::error::MappingError;
use crate::mapping::json::JsonObject;

/// A sender address stored in the Sendcloud account.
///
/// Parcels refer to it by id through the `sender_address` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SenderAddress {
    id: u64,
    company_name: Option<String>,
    contact_name: Option<String>,
    email: Option<String>,
    telephone: Option<String>,
    street: String,
    house_number: Option<String>,
    postal_box: Option<String>,
    postal_code: String,
    city: String,
    country_code: String,
}

impl SenderAddress {
    /// Map a vendor sender address object.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when `id`, `street`, `postal_code`, `city` or
    /// `country` is missing, or when any field has the wrong type.
    pub fn from_json(value: &Value) -> Result<Self, MappingError> {
        let address = JsonObject::new(value, "sender_address")?;

        Ok(Self {
            id: address.required_u64("id")?,
            company_name: address.optional_string("company_name")?,
            contact_name: address.optional_string("contact_name")?,
            email: address.optional_string("email")?,
            telephone: address.optional_string("telephone")?,
            street: address.required_string("street")?,
            house_number: address.optional_string("house_number")?,
            postal_box: address.optional_string("postal_box")?,
            postal_code: address.required_string("postal_code")?,
            city: address.required_string("city")?,
            country_code: address.required_string("country")?,
        })
    }

    /// Id used as `sender_address` in parcel requests.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn company_name(&self) -> Option<&str> {
        self.company_name.as_deref()
    }

    /// Name of the contact person at this address.
    pub fn contact_name(&self) -> Option<&str> {
        self.contact_name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn telephone(&self) -> Option<&str> {
        self.telephone.as_deref()
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn house_number(&self) -> Option<&str> {
        self.house_number.as_deref()
    }

    /// Post office box, for addresses that use one.
    pub fn postal_box(&self) -> Option<&str> {
        self.postal_box.as_deref()
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// ISO-2 country code, from the vendor's `country` field.
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Single-line rendering, e.g. `ACME, Stadhuisplein 10, 5611 EM Eindhoven, NL`.
    pub fn display_line(&self) -> String {
        let mut parts = Vec::new();
        if let Some(name) = self.company_name.as_deref().or(self.contact_name.as_deref()) {
            parts.push(name.to_string());
        }
        match &self.house_number {
            Some(number) => parts.push(format!("{} {}", self.street, number)),
            None => parts.push(self.street.clone()),
        }
        parts.push(format!("{} {}", self.postal_code, self.city));
        parts.push(self.country_code.clone());
        parts.join(", ")
    }
}

#[cfg(test)]
#[path = "sender_address_tests.rs"]
mod tests;
