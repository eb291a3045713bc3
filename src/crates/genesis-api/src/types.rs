//! Response schemas for the Genesis backend.
//!
//! Field names mirror the backend's wire format, including its spaced column
//! names for metric tables (`"Sensor Id"`, `"Metric Sub-Type"`, ...). Numeric
//! columns that the backend sometimes sends as strings are tolerated by a
//! custom deserializer; structurally wrong payloads fail deserialization and
//! surface as `ApiError::MalformedPayload`.

use serde::de::{Deserializer, Error as DeError};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Backend-assigned location/warehouse identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationId(pub i64);

/// Backend-assigned unit identifier. Only meaningful within the scope of the
/// location it was returned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub i64);

/// Backend-assigned sensor identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SensorId(pub i64);

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Health state attached to sensors, units and locations.
///
/// The backend defines NORMAL, OUT_OF_RANGE and INACTIVE; any other value is
/// passed through unchanged via `Other`, never rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthState {
    Normal,
    OutOfRange,
    Inactive,
    Other(String),
}

impl HealthState {
    /// The wire representation of this state.
    pub fn as_str(&self) -> &str {
        match self {
            HealthState::Normal => "NORMAL",
            HealthState::OutOfRange => "OUT_OF_RANGE",
            HealthState::Inactive => "INACTIVE",
            HealthState::Other(s) => s,
        }
    }
}

impl From<&str> for HealthState {
    fn from(s: &str) -> Self {
        match s {
            "NORMAL" => HealthState::Normal,
            "OUT_OF_RANGE" => HealthState::OutOfRange,
            "INACTIVE" => HealthState::Inactive,
            other => HealthState::Other(other.to_string()),
        }
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for HealthState {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HealthState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(HealthState::from(s.as_str()))
    }
}

/// One row of a sensor `find`/`list` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorHit {
    pub sensor_id: SensorId,
    pub sensor_urn: String,
}

/// One row of a unit `find` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitHit {
    pub unit_id: UnitId,
    pub unit_urn: String,
}

/// One row of the `/locations` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationInfo {
    pub id: LocationId,
    pub name: String,
    pub state: HealthState,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// One block of a `/locations/{id}/summary` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryBlock {
    #[serde(default, deserialize_with = "de_opt_display")]
    pub value: Option<String>,
    pub state: HealthState,
    #[serde(default)]
    pub unit: Option<String>,
}

/// `/locations/{id}/summary` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSummary {
    pub metrics: SummaryBlock,
    pub power: SummaryBlock,
    pub attendance: SummaryBlock,
    pub emergencies: SummaryBlock,
}

/// One data row of a warehouse/unit metrics table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricRow {
    #[serde(rename = "Sensor Id")]
    pub sensor_id: SensorId,
    #[serde(rename = "Sensor Name")]
    pub sensor_name: String,
    #[serde(rename = "Metric Type")]
    pub metric_type: String,
    #[serde(rename = "Metric Sub-Type")]
    pub metric_subtype: String,
    #[serde(rename = "Value", default, deserialize_with = "de_opt_display")]
    pub value: Option<String>,
    #[serde(rename = "Unit", default)]
    pub unit: Option<String>,
    #[serde(
        rename = "Value Duration Minutes",
        default,
        deserialize_with = "de_opt_display"
    )]
    pub duration_minutes: Option<String>,
    #[serde(rename = "State")]
    pub state: HealthState,
    #[serde(rename = "Unit Name", default)]
    pub unit_name: Option<String>,
    #[serde(rename = "Unit Alias", default)]
    pub unit_alias: Option<String>,
}

/// One row of the warehouse unit summary table. `value` is the count of
/// out-of-range sensors in that unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitSummaryRow {
    #[serde(rename = "Unit Id")]
    pub unit_id: UnitId,
    #[serde(rename = "Unit Name", default)]
    pub unit_name: Option<String>,
    #[serde(rename = "Unit Alias", default)]
    pub unit_alias: Option<String>,
    #[serde(rename = "Value", default, deserialize_with = "de_opt_display")]
    pub value: Option<String>,
    #[serde(rename = "State")]
    pub state: HealthState,
}

/// `/metrics/warehouse/{id}` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseMetrics {
    pub wv_warehouse_metrics: Vec<MetricRow>,
    pub wv_unit_summary: Vec<UnitSummaryRow>,
}

/// `/metrics/warehouse/{id}/unit/{unit_id}` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitMetrics {
    pub uv_unit_metrics: Vec<MetricRow>,
}

/// Envelope of `/genesis/query/sensor_status`.
#[derive(Debug, Deserialize)]
pub struct SensorStatusEnvelope {
    pub sensor_status: SensorStatusBody,
}

#[derive(Debug, Deserialize)]
pub struct SensorStatusBody {
    pub sensor_health: HealthCode,
}

/// Envelope of `/genesis/query/unit_status`.
#[derive(Debug, Deserialize)]
pub struct UnitStatusEnvelope {
    pub unit_status: UnitStatusBody,
}

#[derive(Debug, Deserialize)]
pub struct UnitStatusBody {
    pub unit_health: HealthCode,
}

/// Health code carried inside the status envelopes.
#[derive(Debug, Deserialize)]
pub struct HealthCode {
    pub code_name: HealthState,
}

/// Envelope of `/genesis/data/report/interactive`.
#[derive(Debug, Deserialize)]
pub struct ReportEnvelope {
    pub data: Vec<serde_json::Value>,
}

/// Deserialize a scalar (string, number or bool) into its display string.
///
/// The metric tables carry values the backend renders as either JSON strings
/// or numbers; both map to the same text for report output. Null maps to
/// `None`.
fn de_opt_display<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(serde_json::Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected scalar value, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_state_round_trip() {
        assert_eq!(HealthState::from("NORMAL"), HealthState::Normal);
        assert_eq!(HealthState::from("OUT_OF_RANGE"), HealthState::OutOfRange);
        assert_eq!(HealthState::from("INACTIVE"), HealthState::Inactive);
        assert_eq!(HealthState::Normal.to_string(), "NORMAL");
    }

    #[test]
    fn test_health_state_unknown_passes_through() {
        let state = HealthState::from("DEGRADED");
        assert_eq!(state, HealthState::Other("DEGRADED".to_string()));
        assert_eq!(state.to_string(), "DEGRADED");
    }

    #[test]
    fn test_metric_row_spaced_columns() {
        let json = r#"{
            "Sensor Id": 42,
            "Sensor Name": "GF-B Temp 1",
            "Metric Type": "Temperature",
            "Metric Sub-Type": "Ambient",
            "Value": 23.5,
            "Unit": "°C",
            "Value Duration Minutes": 15,
            "State": "NORMAL"
        }"#;
        let row: MetricRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.sensor_id, SensorId(42));
        assert_eq!(row.metric_subtype, "Ambient");
        assert_eq!(row.value.as_deref(), Some("23.5"));
        assert_eq!(row.duration_minutes.as_deref(), Some("15"));
        assert_eq!(row.state, HealthState::Normal);
        assert!(row.unit_name.is_none());
    }

    #[test]
    fn test_metric_row_null_value() {
        let json = r#"{
            "Sensor Id": 7,
            "Sensor Name": "Door",
            "Metric Type": "Motion",
            "Metric Sub-Type": "Entry",
            "Value": null,
            "Unit": null,
            "Value Duration Minutes": null,
            "State": "INACTIVE"
        }"#;
        let row: MetricRow = serde_json::from_str(json).unwrap();
        assert!(row.value.is_none());
        assert!(row.unit.is_none());
        assert!(row.duration_minutes.is_none());
    }

    #[test]
    fn test_sensor_status_envelope() {
        let json = r#"{"sensor_status":{"sensor_health":{"code_name":"NORMAL"}}}"#;
        let env: SensorStatusEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(env.sensor_status.sensor_health.code_name, HealthState::Normal);
    }

    #[test]
    fn test_sensor_status_envelope_missing_key_fails() {
        let json = r#"{"unexpected":{}}"#;
        let env: Result<SensorStatusEnvelope, _> = serde_json::from_str(json);
        assert!(env.is_err());
    }

    #[test]
    fn test_unit_summary_row() {
        let json = r#"{
            "Unit Id": 1001,
            "Unit Name": "B2 Basement",
            "Unit Alias": "Cipla",
            "Value": 3,
            "State": "OUT_OF_RANGE"
        }"#;
        let row: UnitSummaryRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.unit_id, UnitId(1001));
        assert_eq!(row.unit_alias.as_deref(), Some("Cipla"));
        assert_eq!(row.value.as_deref(), Some("3"));
    }

    #[test]
    fn test_location_summary_blocks() {
        let json = r#"{
            "metrics": {"value": 12, "state": "NORMAL"},
            "power": {"value": "450", "state": "NORMAL", "unit": "KWH"},
            "attendance": {"value": 27, "state": "NORMAL"},
            "emergencies": {"value": 0, "state": "NORMAL"}
        }"#;
        let summary: LocationSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.power.value.as_deref(), Some("450"));
        assert_eq!(summary.power.unit.as_deref(), Some("KWH"));
        assert!(summary.metrics.unit.is_none());
    }
}
