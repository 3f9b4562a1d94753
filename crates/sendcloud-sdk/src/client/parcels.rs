//! Parcel operations.

use bytes::Bytes;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::{unwrap_envelope, SendcloudClient};
use crate::error::{ApiError, MappingError};
use crate::mapping::ParcelRequest;
use crate::models::{Address, LabelFormat, Parcel};

impl SendcloudClient {
    /// Fetch a parcel by id.
    #[instrument(skip(self))]
    pub async fn get_parcel(&self, parcel_id: u64) -> Result<Parcel, ApiError> {
        let url = self.config.api_endpoint(&format!("parcels/{}", parcel_id));
        let response = self.send_json(self.request(Method::GET, &url)).await?;

        Ok(Parcel::from_json(unwrap_envelope(&response, "parcel")?)?)
    }

    /// Create a parcel. When the request asks for a label the parcel is
    /// announced to the carrier straight away.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Mapping`] with [`MappingError::InvalidArgument`]
    /// when the request cannot be assembled, before anything is sent.
    #[instrument(skip(self, request))]
    pub async fn create_parcel(&self, request: &ParcelRequest) -> Result<Parcel, ApiError> {
        let body = json!({ "parcel": request.to_request_body()? });
        let url = self.config.api_endpoint("parcels");

        let response = self
            .send_json(self.request(Method::POST, &url).json(&body))
            .await?;
        let parcel = Parcel::from_json(unwrap_envelope(&response, "parcel")?)?;

        info!(parcel_id = parcel.id(), "Created parcel");
        Ok(parcel)
    }

    /// Replace the recipient address of an existing parcel.
    #[instrument(skip(self, address))]
    pub async fn update_parcel(&self, parcel_id: u64, address: Address) -> Result<Parcel, ApiError> {
        let request = ParcelRequest::new(address).with_parcel_id(parcel_id);
        let body = json!({ "parcel": request.to_request_body()? });
        let url = self.config.api_endpoint("parcels");

        let response = self
            .send_json(self.request(Method::PUT, &url).json(&body))
            .await?;

        Ok(Parcel::from_json(unwrap_envelope(&response, "parcel")?)?)
    }

    /// Cancel a parcel, or delete it when it has no label yet.
    ///
    /// Returns `false` when Sendcloud refuses the cancellation (status 400 or
    /// 410), e.g. because the parcel has already been handed to the carrier.
    #[instrument(skip(self))]
    pub async fn cancel_parcel(&self, parcel_id: u64) -> Result<bool, ApiError> {
        let url = self.config.api_endpoint(&format!("parcels/{}/cancel", parcel_id));

        match self.send(self.request(Method::POST, &url)).await {
            Ok(_) => Ok(true),
            Err(ApiError::RequestFailed { status: 400 | 410, message, .. }) => {
                debug!(message = %message, "Parcel cancellation refused");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Download the PDF label of `parcel` in `format`.
    ///
    /// The label URL comes from the parcel data, so the API credentials are
    /// only sent when it points at the configured API host.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Mapping`] with [`MappingError::InvalidArgument`]
    /// when the parcel has no label in that format, or when the label URL is
    /// not on the API host. Nothing is sent in either case.
    #[instrument(skip(self, parcel), fields(parcel_id = parcel.id()))]
    pub async fn get_label_pdf(&self, parcel: &Parcel, format: LabelFormat) -> Result<Bytes, ApiError> {
        let label_url = parcel.label_url(format).ok_or_else(|| {
            MappingError::invalid_argument(format!(
                "parcel {} has no {:?} label",
                parcel.id(),
                format
            ))
        })?;

        let url = Url::parse(label_url).map_err(|e| {
            MappingError::invalid_argument(format!("label URL '{}' is invalid: {}", label_url, e))
        })?;
        if !self.config.is_api_origin(&url) {
            warn!(host = ?url.host_str(), "Refusing to send credentials to a foreign label host");
            return Err(MappingError::invalid_argument(format!(
                "label URL '{}' is not on the API host",
                label_url
            ))
            .into());
        }

        let response = self
            .send(
                self.request(Method::GET, url.as_str())
                    .header(reqwest::header::ACCEPT, "application/pdf"),
            )
            .await?;

        Ok(response.bytes().await?)
    }

    /// URL of the return portal for a parcel, or `None` when the account has
    /// no return portal for it.
    #[instrument(skip(self))]
    pub async fn get_return_portal_url(&self, parcel_id: u64) -> Result<Option<String>, ApiError> {
        let url = self
            .config
            .api_endpoint(&format!("parcels/{}/return_portal_url", parcel_id));

        let response = match self.send_json(self.request(Method::GET, &url)).await {
            Ok(response) => response,
            Err(ApiError::RequestFailed { status: 404, .. }) => return Ok(None),
            Err(e) => return Err(e),
        };

        match response.get("url") {
            Some(Value::String(url)) if !url.is_empty() => Ok(Some(url.clone())),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
#[path = "parcels_tests.rs"]
mod tests;
