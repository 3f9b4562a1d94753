//! Shipping method and sender address operations.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use super::{unwrap_envelope, SendcloudClient};
use crate::error::{ApiError, MappingError};
use crate::models::{SenderAddress, ShippingMethod};

/// Narrows the shipping methods returned by
/// [`SendcloudClient::get_shipping_methods`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShippingMethodFilter {
    /// Only methods available from this sender address
    #[serde(rename = "sender_address", skip_serializing_if = "Option::is_none")]
    pub sender_address_id: Option<u64>,

    /// Only methods that deliver to this service point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_point_id: Option<u64>,

    /// Return methods instead of outbound ones
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_return: bool,
}

impl ShippingMethodFilter {
    /// Only methods available from the sender address with this id.
    pub fn with_sender_address(mut self, sender_address_id: u64) -> Self {
        self.sender_address_id = Some(sender_address_id);
        self
    }

    /// Only methods that can deliver to this service point.
    pub fn with_service_point(mut self, service_point_id: u64) -> Self {
        self.service_point_id = Some(service_point_id);
        self
    }

    /// Ask for return shipping methods.
    pub fn returns(mut self) -> Self {
        self.is_return = true;
        self
    }
}

impl SendcloudClient {
    /// List the shipping methods enabled for the account.
    #[instrument(skip(self))]
    pub async fn get_shipping_methods(
        &self,
        filter: &ShippingMethodFilter,
    ) -> Result<Vec<ShippingMethod>, ApiError> {
        let url = self.config.api_endpoint("shipping_methods");
        let response = self
            .send_json(self.request(Method::GET, &url).query(filter))
            .await?;

        map_list(&response, "shipping_methods", ShippingMethod::from_json)
    }

    #[instrument(skip(self))]
    pub async fn get_shipping_method(&self, shipping_method_id: u64) -> Result<ShippingMethod, ApiError> {
        let url = self
            .config
            .api_endpoint(&format!("shipping_methods/{}", shipping_method_id));
        let response = self.send_json(self.request(Method::GET, &url)).await?;

        Ok(ShippingMethod::from_json(unwrap_envelope(&response, "shipping_method")?)?)
    }

    /// List the sender addresses configured in the account.
    #[instrument(skip(self))]
    pub async fn get_sender_addresses(&self) -> Result<Vec<SenderAddress>, ApiError> {
        let url = self.config.api_endpoint("user/addresses/sender");
        let response = self.send_json(self.request(Method::GET, &url)).await?;

        map_list(&response, "sender_addresses", SenderAddress::from_json)
    }
}

fn map_list<T>(
    response: &Value,
    key: &str,
    map: impl Fn(&Value) -> Result<T, MappingError>,
) -> Result<Vec<T>, ApiError> {
    let items = unwrap_envelope(response, key)?
        .as_array()
        .ok_or_else(|| MappingError::invalid(key, "expected an array"))?;

    Ok(items.iter().map(map).collect::<Result<Vec<_>, _>>()?)
}

#[cfg(test)]
#[path = "shipping_tests.rs"]
mod tests;
