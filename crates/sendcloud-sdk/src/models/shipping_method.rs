//! Carrier shipping methods and their per-country prices.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::MappingError;
use crate::mapping::json::JsonObject;
use crate::units::{kilograms_to_grams, major_to_minor};

/// A shipping method offered by a carrier.
///
/// Weight bounds are whole grams; prices are integer minor currency units
/// (cents) keyed by ISO-2 destination country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingMethod {
    id: u64,
    name: String,
    minimum_weight: u64,
    maximum_weight: u64,
    carrier: String,
    prices: BTreeMap<String, i64>,
    supports_service_points: bool,
}

impl ShippingMethod {
    /// Map a vendor shipping method object.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when a required field is missing or any price
    /// or weight is not a decimal number.
    pub fn from_json(value: &Value) -> Result<Self, MappingError> {
        let method = JsonObject::new(value, "shipping_method")?;

        let mut prices = BTreeMap::new();
        if let Some(countries) = method.optional_array("countries")? {
            for (index, country) in countries.iter().enumerate() {
                let country = JsonObject::new(
                    country,
                    format!("{}[{}]", method.path_of("countries"), index),
                )?;
                let price = major_to_minor(&country.path_of("price"), country.required_decimal("price")?)?;
                prices.insert(country.required_string("iso_2")?, price);
            }
        }

        // "none" means the method cannot deliver to a service point.
        let supports_service_points = method
            .optional_string("service_point_input")?
            .is_some_and(|input| input != "none");

        Ok(Self {
            id: method.required_u64("id")?,
            name: method.required_string("name")?,
            minimum_weight: kilograms_to_grams(
                &method.path_of("min_weight"),
                method.required_decimal("min_weight")?,
            )?,
            maximum_weight: kilograms_to_grams(
                &method.path_of("max_weight"),
                method.required_decimal("max_weight")?,
            )?,
            carrier: method.required_string("carrier")?,
            prices,
            supports_service_points,
        })
    }

    /// Id used to reference the method in parcel requests.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Minimum parcel weight in grams.
    pub fn minimum_weight(&self) -> u64 {
        self.minimum_weight
    }

    /// Maximum parcel weight in grams.
    pub fn maximum_weight(&self) -> u64 {
        self.maximum_weight
    }

    /// Carrier code, e.g. `postnl`.
    pub fn carrier(&self) -> &str {
        &self.carrier
    }

    /// Price in cents per ISO-2 destination country.
    pub fn prices(&self) -> &BTreeMap<String, i64> {
        &self.prices
    }

    /// Price in cents for shipping to `country_code`, if the method serves it.
    pub fn price_for_country(&self, country_code: &str) -> Option<i64> {
        self.prices.get(country_code).copied()
    }

    /// Whether parcels with this method can go to a service point.
    pub fn supports_service_points(&self) -> bool {
        self.supports_service_points
    }

    /// Whether a parcel of `weight` grams fits within this method's bounds.
    pub fn accepts_weight(&self, weight: u64) -> bool {
        (self.minimum_weight..=self.maximum_weight).contains(&weight)
    }
}

#[cfg(test)]
#[path = "shipping_method_tests.rs"]
mod tests;
