//! HTTP implementation of the Genesis backend client.

use crate::error::{ApiError, Result};
use crate::types::*;
use crate::GenesisBackend;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP backend client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the Genesis backend, e.g. "http://localhost:8001".
    pub base_url: String,

    /// Bearer token sent in the `Authorization` header.
    pub auth_token: String,

    /// Request timeout duration.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(base_url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: auth_token.into(),
            timeout: default_timeout(),
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

/// Genesis backend client over HTTP with bearer-token auth.
#[derive(Clone)]
pub struct HttpBackend {
    config: BackendConfig,
    client: Client,
}

impl HttpBackend {
    /// Create a new HTTP backend client.
    pub fn new(mut config: BackendConfig) -> Self {
        while config.base_url.ends_with('/') {
            config.base_url.pop();
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Perform a GET request and deserialize the response body.
    ///
    /// Non-2xx statuses map to `ApiError::Status`; bodies that fail schema
    /// deserialization map to `ApiError::MalformedPayload`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .bearer_auth(&self.config.auth_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::MalformedPayload(e.to_string()))
    }
}

/// Serialize a timestamp the way the backend expects: ISO-8601 seconds
/// precision with a literal trailing `Z`.
pub fn report_timestamp(t: NaiveDateTime) -> String {
    format!("{}Z", t.format("%Y-%m-%dT%H:%M:%S"))
}

#[async_trait]
impl GenesisBackend for HttpBackend {
    async fn find_sensors(&self, sensor_type: &str, location: &str) -> Result<Vec<SensorHit>> {
        self.get_json(
            "/genesis/query/sensor/find",
            &[
                ("sensor_type", sensor_type.to_string()),
                ("location", location.to_string()),
            ],
        )
        .await
    }

    async fn sensor_status(&self, sensor_id: SensorId) -> Result<HealthState> {
        let envelope: SensorStatusEnvelope = self
            .get_json(
                "/genesis/query/sensor_status",
                &[("sensor_id", sensor_id.to_string())],
            )
            .await?;
        Ok(envelope.sensor_status.sensor_health.code_name)
    }

    async fn sensor_report(
        &self,
        sensor_id: SensorId,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<serde_json::Value>> {
        let envelope: ReportEnvelope = self
            .get_json(
                "/genesis/data/report/interactive",
                &[
                    ("sensor_id", sensor_id.to_string()),
                    ("timestamp_from", report_timestamp(from)),
                    ("timestamp_to", report_timestamp(to)),
                ],
            )
            .await?;
        Ok(envelope.data)
    }

    async fn list_sensors(&self) -> Result<Vec<SensorHit>> {
        self.get_json("/genesis/query/sensor/list", &[]).await
    }

    async fn find_units(&self, unit_name: &str) -> Result<Vec<UnitHit>> {
        self.get_json(
            "/genesis/query/unit/find",
            &[("unit_name", unit_name.to_string())],
        )
        .await
    }

    async fn unit_status(&self, unit_id: UnitId) -> Result<HealthState> {
        let envelope: UnitStatusEnvelope = self
            .get_json(
                "/genesis/query/unit_status",
                &[("unit_id", unit_id.to_string())],
            )
            .await?;
        Ok(envelope.unit_status.unit_health.code_name)
    }

    async fn list_locations(&self) -> Result<Vec<LocationInfo>> {
        self.get_json("/locations", &[]).await
    }

    async fn location_summary(&self, location_id: LocationId) -> Result<LocationSummary> {
        self.get_json(&format!("/locations/{}/summary", location_id), &[])
            .await
    }

    async fn warehouse_metrics(&self, location_id: LocationId) -> Result<WarehouseMetrics> {
        self.get_json(&format!("/metrics/warehouse/{}", location_id), &[])
            .await
    }

    async fn unit_metrics(&self, location_id: LocationId, unit_id: UnitId) -> Result<UnitMetrics> {
        self.get_json(
            &format!("/metrics/warehouse/{}/unit/{}", location_id, unit_id),
            &[],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_report_timestamp_format() {
        let t = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(report_timestamp(t), "2024-03-09T00:00:00Z");
    }

    #[test]
    fn test_config_timeout_override() {
        let config = BackendConfig::new("http://localhost:8001", "t")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let backend = HttpBackend::new(BackendConfig::new("http://localhost:8001/", "t"));
        assert_eq!(backend.config.base_url, "http://localhost:8001");
    }
}
