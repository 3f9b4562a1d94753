//! Service point lookups.
//!
//! These go to the separate service points API and return its JSON shape
//! unchanged.

use reqwest::Method;
use tracing::{debug, instrument};

use super::SendcloudClient;
use crate::error::ApiError;
use crate::models::{ServicePoint, ServicePointQuery};

impl SendcloudClient {
    /// Search for service points near a location.
    #[instrument(skip(self), fields(country = %query.country))]
    pub async fn search_service_points(
        &self,
        query: &ServicePointQuery,
    ) -> Result<Vec<ServicePoint>, ApiError> {
        let url = self.config.service_points_endpoint("service-points");
        let response = self
            .send_json(self.request(Method::GET, &url).query(query))
            .await?;

        let points: Vec<ServicePoint> = serde_json::from_value(response)?;
        debug!(count = points.len(), "Found service points");
        Ok(points)
    }

    #[instrument(skip(self))]
    pub async fn get_service_point(&self, service_point_id: u64) -> Result<ServicePoint, ApiError> {
        let url = self
            .config
            .service_points_endpoint(&format!("service-points/{}", service_point_id));
        let response = self.send_json(self.request(Method::GET, &url)).await?;

        Ok(serde_json::from_value(response)?)
    }
}

#[cfg(test)]
#[path = "service_points_tests.rs"]
mod tests;
