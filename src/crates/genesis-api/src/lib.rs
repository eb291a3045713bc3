//! Typed REST client for the Genesis IoT monitoring backend.
//!
//! The backend exposes a fixed set of JSON-over-HTTP endpoints covering the
//! location → unit → sensor hierarchy (lookups, health states, metric
//! tables, time-ranged reports). This crate deserializes every response into
//! explicit schemas at the boundary; untyped JSON never flows past it.
//!
//! The `GenesisBackend` trait is the seam: `HttpBackend` is the production
//! implementation (bearer-token auth over `reqwest`), while tests substitute
//! an in-memory fake.
//!
//! # Example
//!
//! ```rust,ignore
//! use genesis_api::{BackendConfig, GenesisBackend, HttpBackend};
//!
//! let backend = HttpBackend::new(BackendConfig::new("http://localhost:8001", "token"));
//! let sensors = backend.find_sensors("Temperature", "VER_W1_%").await?;
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::{BackendConfig, HttpBackend};
pub use error::{ApiError, Result};
pub use types::{
    HealthState, LocationId, LocationInfo, LocationSummary, MetricRow, SensorHit, SensorId,
    SummaryBlock, UnitHit, UnitId, UnitMetrics, UnitSummaryRow, WarehouseMetrics,
};

use async_trait::async_trait;
use chrono::NaiveDateTime;

/// The fixed Genesis backend endpoint set.
///
/// One method per REST endpoint; see each method for the path it wraps.
/// Implementations must be `Send + Sync`; share them as
/// `Arc<dyn GenesisBackend>`.
#[async_trait]
pub trait GenesisBackend: Send + Sync {
    /// `GET /genesis/query/sensor/find?sensor_type=&location=`
    ///
    /// Either filter may be empty; `location` is a SQL-LIKE pattern matched
    /// by the backend.
    async fn find_sensors(&self, sensor_type: &str, location: &str) -> Result<Vec<SensorHit>>;

    /// `GET /genesis/query/sensor_status?sensor_id=`
    async fn sensor_status(&self, sensor_id: SensorId) -> Result<HealthState>;

    /// `GET /genesis/data/report/interactive?sensor_id=&timestamp_from=&timestamp_to=`
    ///
    /// Timestamps are serialized as ISO-8601 with a literal trailing `Z`.
    /// Returns the report's data points.
    async fn sensor_report(
        &self,
        sensor_id: SensorId,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<serde_json::Value>>;

    /// `GET /genesis/query/sensor/list`
    async fn list_sensors(&self) -> Result<Vec<SensorHit>>;

    /// `GET /genesis/query/unit/find?unit_name=`
    async fn find_units(&self, unit_name: &str) -> Result<Vec<UnitHit>>;

    /// `GET /genesis/query/unit_status?unit_id=`
    async fn unit_status(&self, unit_id: UnitId) -> Result<HealthState>;

    /// `GET /locations`
    async fn list_locations(&self) -> Result<Vec<LocationInfo>>;

    /// `GET /locations/{id}/summary`
    async fn location_summary(&self, location_id: LocationId) -> Result<LocationSummary>;

    /// `GET /metrics/warehouse/{id}`
    async fn warehouse_metrics(&self, location_id: LocationId) -> Result<WarehouseMetrics>;

    /// `GET /metrics/warehouse/{id}/unit/{unit_id}`
    async fn unit_metrics(&self, location_id: LocationId, unit_id: UnitId) -> Result<UnitMetrics>;
}
