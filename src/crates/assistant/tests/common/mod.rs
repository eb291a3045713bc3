//! In-memory Genesis backend for pipeline tests.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use genesis_api::{
    ApiError, GenesisBackend, HealthState, LocationId, LocationInfo, LocationSummary, MetricRow,
    Result, SensorHit, SensorId, UnitHit, UnitId, UnitMetrics, UnitSummaryRow, WarehouseMetrics,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// One fake sensor: its find-row plus the type and location the backend
/// would match filters against.
pub struct FakeSensor {
    pub hit: SensorHit,
    pub sensor_type: String,
    pub location: String,
    pub state: HealthState,
}

pub fn sensor(id: i64, urn: &str, sensor_type: &str, location: &str, state: HealthState) -> FakeSensor {
    FakeSensor {
        hit: SensorHit {
            sensor_id: SensorId(id),
            sensor_urn: urn.to_string(),
        },
        sensor_type: sensor_type.to_string(),
        location: location.to_string(),
        state,
    }
}

pub fn metric_row(
    id: i64,
    name: &str,
    metric_type: &str,
    subtype: &str,
    value: &str,
    unit: Option<&str>,
    state: HealthState,
) -> MetricRow {
    MetricRow {
        sensor_id: SensorId(id),
        sensor_name: name.to_string(),
        metric_type: metric_type.to_string(),
        metric_subtype: subtype.to_string(),
        value: Some(value.to_string()),
        unit: unit.map(str::to_string),
        duration_minutes: None,
        state,
        unit_name: None,
        unit_alias: None,
    }
}

/// Match a SQL-LIKE pattern (`%` wildcard only) case-insensitively.
fn like_match(pattern: &str, value: &str) -> bool {
    let pattern = regex::escape(&pattern.to_uppercase()).replace("%", ".*");
    regex::Regex::new(&format!("^{}$", pattern))
        .map(|re| re.is_match(&value.to_uppercase()))
        .unwrap_or(false)
}

#[derive(Default)]
pub struct FakeBackend {
    pub sensors: Vec<FakeSensor>,
    pub units: Vec<(UnitHit, String, HealthState)>,
    pub locations: Vec<LocationInfo>,
    pub summaries: HashMap<i64, LocationSummary>,
    pub warehouse: HashMap<i64, WarehouseMetrics>,
    pub unit_metrics: HashMap<(i64, i64), Vec<MetricRow>>,
    pub report_points: Vec<serde_json::Value>,
    /// When set, every call fails with this HTTP status.
    pub fail_status: Option<u16>,
    /// Time ranges `sensor_report` was called with.
    pub report_calls: Mutex<Vec<(SensorId, NaiveDateTime, NaiveDateTime)>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, id: i64, name: &str) -> Self {
        self.locations.push(LocationInfo {
            id: LocationId(id),
            name: name.to_string(),
            state: HealthState::Normal,
            latitude: None,
            longitude: None,
        });
        self
    }

    pub fn with_unit(mut self, id: i64, urn: &str, state: HealthState) -> Self {
        self.units.push((
            UnitHit {
                unit_id: UnitId(id),
                unit_urn: urn.to_string(),
            },
            urn.to_string(),
            state,
        ));
        self
    }

    fn check(&self) -> Result<()> {
        match self.fail_status {
            Some(code) => Err(ApiError::Status(code)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl GenesisBackend for FakeBackend {
    async fn find_sensors(&self, sensor_type: &str, location: &str) -> Result<Vec<SensorHit>> {
        self.check()?;
        Ok(self
            .sensors
            .iter()
            .filter(|s| sensor_type.is_empty() || s.sensor_type.eq_ignore_ascii_case(sensor_type))
            .filter(|s| location.is_empty() || like_match(location, &s.location))
            .map(|s| s.hit.clone())
            .collect())
    }

    async fn sensor_status(&self, sensor_id: SensorId) -> Result<HealthState> {
        self.check()?;
        self.sensors
            .iter()
            .find(|s| s.hit.sensor_id == sensor_id)
            .map(|s| s.state.clone())
            .ok_or(ApiError::Status(404))
    }

    async fn sensor_report(
        &self,
        sensor_id: SensorId,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<serde_json::Value>> {
        self.check()?;
        self.report_calls.lock().unwrap().push((sensor_id, from, to));
        Ok(self.report_points.clone())
    }

    async fn list_sensors(&self) -> Result<Vec<SensorHit>> {
        self.check()?;
        Ok(self.sensors.iter().map(|s| s.hit.clone()).collect())
    }

    async fn find_units(&self, unit_name: &str) -> Result<Vec<UnitHit>> {
        self.check()?;
        Ok(self
            .units
            .iter()
            .filter(|(_, location, _)| unit_name.is_empty() || like_match(unit_name, location))
            .map(|(hit, _, _)| hit.clone())
            .collect())
    }

    async fn unit_status(&self, unit_id: UnitId) -> Result<HealthState> {
        self.check()?;
        self.units
            .iter()
            .find(|(hit, _, _)| hit.unit_id == unit_id)
            .map(|(_, _, state)| state.clone())
            .ok_or(ApiError::Status(404))
    }

    async fn list_locations(&self) -> Result<Vec<LocationInfo>> {
        self.check()?;
        Ok(self.locations.clone())
    }

    async fn location_summary(&self, location_id: LocationId) -> Result<LocationSummary> {
        self.check()?;
        self.summaries
            .get(&location_id.0)
            .cloned()
            .ok_or(ApiError::Status(404))
    }

    async fn warehouse_metrics(&self, location_id: LocationId) -> Result<WarehouseMetrics> {
        self.check()?;
        self.warehouse
            .get(&location_id.0)
            .cloned()
            .ok_or(ApiError::Status(404))
    }

    async fn unit_metrics(&self, location_id: LocationId, unit_id: UnitId) -> Result<UnitMetrics> {
        self.check()?;
        self.unit_metrics
            .get(&(location_id.0, unit_id.0))
            .map(|rows| UnitMetrics {
                uv_unit_metrics: rows.clone(),
            })
            .ok_or(ApiError::Status(404))
    }
}

pub fn unit_summary_row(id: i64, name: &str, alias: Option<&str>, count: &str, state: HealthState) -> UnitSummaryRow {
    UnitSummaryRow {
        unit_id: UnitId(id),
        unit_name: Some(name.to_string()),
        unit_alias: alias.map(str::to_string),
        value: Some(count.to_string()),
        state,
    }
}
