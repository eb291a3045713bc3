//! Operation registry and per-request orchestration.
//!
//! Each request runs one sequential pass: extract entities, resolve
//! identifiers, invoke the backend, format the response. A failure at any
//! stage short-circuits to a terminal user-facing string; errors never
//! escape `run` and no state survives a request.

use crate::extract::Extractor;
use crate::location::LocationCode;
use crate::report;
use crate::resolve::{self, Resolution};
use chrono::NaiveDateTime;
use genesis_api::{ApiError, GenesisBackend, LocationId, SensorId, UnitId};
use llm::LlmError;
use std::sync::Arc;
use tracing::{error, info};

pub const SENSOR_NOT_FOUND: &str = "Sensor Not Found";
pub const UNIT_NOT_FOUND: &str = "Unit Not Found";
pub const LOCATION_NOT_FOUND: &str = "Location Not Found";
pub const NO_DATA: &str = "No Data";

/// Everything the assistant can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SensorStatus,
    SensorReport,
    SensorList,
    UnitStatus,
    LocationList,
    LocationSummary,
    WarehouseSensors,
    WarehouseUnits,
    UnitSensors,
}

/// One registry row: the stable operation name the router selects by, and
/// the description rendered into the selection prompt.
#[derive(Debug, Clone, Copy)]
pub struct OperationSpec {
    pub operation: Operation,
    pub name: &'static str,
    pub description: &'static str,
}

/// The complete operation registry. The router offers exactly this table;
/// there is no free-text tool matching.
pub const OPERATIONS: &[OperationSpec] = &[
    OperationSpec {
        operation: Operation::SensorStatus,
        name: "sensor_status",
        description: "Current health status of one sensor, looked up by sensor type and location.",
    },
    OperationSpec {
        operation: Operation::SensorReport,
        name: "sensor_report",
        description: "Historical readings of one sensor over a time range.",
    },
    OperationSpec {
        operation: Operation::SensorList,
        name: "sensor_list",
        description: "List every known sensor.",
    },
    OperationSpec {
        operation: Operation::UnitStatus,
        name: "unit_status",
        description: "Current health status of one storage unit, looked up by location.",
    },
    OperationSpec {
        operation: Operation::LocationList,
        name: "location_list",
        description: "List every warehouse location with its overall status.",
    },
    OperationSpec {
        operation: Operation::LocationSummary,
        name: "location_summary",
        description: "High-level summary of one warehouse: metrics, power, attendance, emergencies.",
    },
    OperationSpec {
        operation: Operation::WarehouseSensors,
        name: "warehouse_sensors",
        description: "Detailed report of every sensor in one warehouse, grouped by type.",
    },
    OperationSpec {
        operation: Operation::WarehouseUnits,
        name: "warehouse_units",
        description: "Per-unit out-of-range summary for one warehouse.",
    },
    OperationSpec {
        operation: Operation::UnitSensors,
        name: "unit_sensors",
        description: "Detailed report of every sensor in one storage unit.",
    },
];

impl Operation {
    /// Stable registry name.
    pub fn name(&self) -> &'static str {
        OPERATIONS
            .iter()
            .find(|spec| spec.operation == *self)
            .map(|spec| spec.name)
            .unwrap_or("unknown")
    }

    /// Look an operation up by its registry name.
    pub fn from_name(name: &str) -> Option<Operation> {
        let name = name.trim().to_lowercase();
        OPERATIONS
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.operation)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Terminal message for a failed backend call.
fn request_failed(err: &ApiError) -> String {
    error!(error = %err, "backend request failed");
    match err.status() {
        Some(code) => format!("request failed with status code: {}", code),
        None => "request failed".to_string(),
    }
}

/// Terminal message for a failed completion-model call.
fn model_failed(err: &LlmError) -> String {
    error!(error = %err, "completion model request failed");
    format!("request failed: {}", err)
}

pub fn ambiguous_sensors(candidates: &[String]) -> String {
    format!(
        "Found {} No. of sensor here is list {:?}",
        candidates.len(),
        candidates
    )
}

pub fn ambiguous_units(candidates: &[String]) -> String {
    format!(
        "Found {} No. of Unit here is list {:?}",
        candidates.len(),
        candidates
    )
}

fn ambiguous_locations(candidates: &[String]) -> String {
    format!(
        "Found {} No. of Location here is list {:?}",
        candidates.len(),
        candidates
    )
}

/// Runs one operation per request against the backend.
#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn GenesisBackend>,
    extractor: Extractor,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn GenesisBackend>, extractor: Extractor) -> Self {
        Self { backend, extractor }
    }

    /// Execute `operation` for the user's `text`. Relative time references
    /// are resolved against `now`. Always returns a user-facing string.
    pub async fn run(&self, operation: Operation, text: &str, now: NaiveDateTime) -> String {
        info!(operation = %operation, "dispatching");
        match operation {
            Operation::SensorStatus => self.sensor_status(text).await,
            Operation::SensorReport => self.sensor_report(text, now).await,
            Operation::SensorList => self.sensor_list().await,
            Operation::UnitStatus => self.unit_status(text).await,
            Operation::LocationList => self.location_list().await,
            Operation::LocationSummary => self.location_summary(text).await,
            Operation::WarehouseSensors => self.warehouse_sensors(text).await,
            Operation::WarehouseUnits => self.warehouse_units(text).await,
            Operation::UnitSensors => self.unit_sensors(text).await,
        }
    }

    async fn extract_sensor_target(
        &self,
        text: &str,
    ) -> Result<(Option<crate::sensor::SensorType>, Option<LocationCode>), String> {
        let sensor_type = self.extractor.sensor_type(text).await.map_err(|e| model_failed(&e))?;
        let location = self.extractor.location(text).await.map_err(|e| model_failed(&e))?;
        Ok((sensor_type, location))
    }

    async fn sensor_status(&self, text: &str) -> String {
        let (sensor_type, location) = match self.extract_sensor_target(text).await {
            Ok(pair) => pair,
            Err(msg) => return msg,
        };
        let id = match resolve::sensor(self.backend.as_ref(), sensor_type.as_ref(), location.as_ref()).await
        {
            Resolution::Found(id) => id,
            Resolution::Ambiguous(candidates) => return ambiguous_sensors(&candidates),
            Resolution::NotFound { .. } => return SENSOR_NOT_FOUND.to_string(),
        };
        match self.backend.sensor_status(SensorId(id)).await {
            Ok(state) => format!("Status: {}", state),
            Err(e) => request_failed(&e),
        }
    }

    async fn sensor_report(&self, text: &str, now: NaiveDateTime) -> String {
        let (sensor_type, location) = match self.extract_sensor_target(text).await {
            Ok(pair) => pair,
            Err(msg) => return msg,
        };
        let (from, to) = match self.extractor.time_range(text, now).await {
            Ok(range) => range,
            Err(e) => return model_failed(&e),
        };
        // An inverted range is a phrasing artifact, not an error.
        let (from, to) = if from > to { (to, from) } else { (from, to) };

        let id = match resolve::sensor(self.backend.as_ref(), sensor_type.as_ref(), location.as_ref()).await
        {
            Resolution::Found(id) => id,
            Resolution::Ambiguous(candidates) => return ambiguous_sensors(&candidates),
            Resolution::NotFound { .. } => return SENSOR_NOT_FOUND.to_string(),
        };
        match self.backend.sensor_report(SensorId(id), from, to).await {
            Ok(points) => points
                .first()
                .map(|p| p.to_string())
                .unwrap_or_else(|| NO_DATA.to_string()),
            Err(e) => request_failed(&e),
        }
    }

    async fn sensor_list(&self) -> String {
        match self.backend.list_sensors().await {
            Ok(hits) if hits.is_empty() => SENSOR_NOT_FOUND.to_string(),
            Ok(hits) => hits
                .iter()
                .map(|h| h.sensor_urn.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
            Err(e) => request_failed(&e),
        }
    }

    async fn unit_status(&self, text: &str) -> String {
        let location = match self.extractor.location(text).await {
            Ok(code) => code,
            Err(e) => return model_failed(&e),
        };
        let pattern = location.map(|l| l.query_pattern()).unwrap_or_default();
        let id = match resolve::unit(self.backend.as_ref(), &pattern).await {
            Resolution::Found(id) => id,
            Resolution::Ambiguous(candidates) => return ambiguous_units(&candidates),
            Resolution::NotFound { .. } => return UNIT_NOT_FOUND.to_string(),
        };
        match self.backend.unit_status(UnitId(id)).await {
            Ok(state) => format!("Status: {}", state),
            Err(e) => request_failed(&e),
        }
    }

    async fn location_list(&self) -> String {
        match self.backend.list_locations().await {
            Ok(rows) if rows.is_empty() => LOCATION_NOT_FOUND.to_string(),
            Ok(rows) => rows
                .iter()
                .map(|r| format!("{} // {} // {}", r.id, r.name, r.state))
                .collect::<Vec<_>>()
                .join("\n"),
            Err(e) => request_failed(&e),
        }
    }

    /// Extract a location code and resolve its warehouse to a backend ID.
    async fn resolve_warehouse(&self, text: &str) -> Result<LocationId, String> {
        let code = match self.extractor.location(text).await {
            Ok(Some(code)) => code,
            Ok(None) => return Err(LOCATION_NOT_FOUND.to_string()),
            Err(e) => return Err(model_failed(&e)),
        };
        match resolve::location(self.backend.as_ref(), &code.warehouse_prefix()).await {
            Resolution::Found(id) => Ok(LocationId(id)),
            Resolution::Ambiguous(candidates) => Err(ambiguous_locations(&candidates)),
            Resolution::NotFound { .. } => Err(LOCATION_NOT_FOUND.to_string()),
        }
    }

    async fn location_summary(&self, text: &str) -> String {
        let location_id = match self.resolve_warehouse(text).await {
            Ok(id) => id,
            Err(msg) => return msg,
        };
        match self.backend.location_summary(location_id).await {
            Ok(summary) => report::location_summary_report(&summary),
            Err(e) => request_failed(&e),
        }
    }

    async fn warehouse_sensors(&self, text: &str) -> String {
        let location_id = match self.resolve_warehouse(text).await {
            Ok(id) => id,
            Err(msg) => return msg,
        };
        match self.backend.warehouse_metrics(location_id).await {
            Ok(metrics) => report::warehouse_sensor_report(&metrics.wv_warehouse_metrics),
            Err(e) => request_failed(&e),
        }
    }

    async fn warehouse_units(&self, text: &str) -> String {
        let location_id = match self.resolve_warehouse(text).await {
            Ok(id) => id,
            Err(msg) => return msg,
        };
        match self.backend.warehouse_metrics(location_id).await {
            Ok(metrics) => report::warehouse_unit_report(&metrics.wv_unit_summary),
            Err(e) => request_failed(&e),
        }
    }

    async fn unit_sensors(&self, text: &str) -> String {
        // Top-down: the warehouse scopes the unit ID.
        let code = match self.extractor.location(text).await {
            Ok(Some(code)) => code,
            Ok(None) => return LOCATION_NOT_FOUND.to_string(),
            Err(e) => return model_failed(&e),
        };
        let location_id =
            match resolve::location(self.backend.as_ref(), &code.warehouse_prefix()).await {
                Resolution::Found(id) => LocationId(id),
                Resolution::Ambiguous(candidates) => return ambiguous_locations(&candidates),
                Resolution::NotFound { .. } => return LOCATION_NOT_FOUND.to_string(),
            };
        if code.is_warehouse_level() {
            info!("targeting the warehouse-level synthetic unit");
        }
        let unit_id = match resolve::unit(self.backend.as_ref(), &code.query_pattern()).await {
            Resolution::Found(id) => UnitId(id),
            Resolution::Ambiguous(candidates) => return ambiguous_units(&candidates),
            Resolution::NotFound { .. } => return UNIT_NOT_FOUND.to_string(),
        };
        match self.backend.unit_metrics(location_id, unit_id).await {
            Ok(metrics) => report::unit_sensor_report(&metrics.uv_unit_metrics),
            Err(e) => request_failed(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names_round_trip() {
        for spec in OPERATIONS {
            assert_eq!(Operation::from_name(spec.name), Some(spec.operation));
            assert_eq!(spec.operation.name(), spec.name);
        }
        assert_eq!(Operation::from_name("  Sensor_Status "), Some(Operation::SensorStatus));
        assert_eq!(Operation::from_name("make_coffee"), None);
    }

    #[test]
    fn test_registry_names_are_unique() {
        let mut names: Vec<&str> = OPERATIONS.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), OPERATIONS.len());
    }

    #[test]
    fn test_ambiguous_messages() {
        let candidates = vec!["VER_W1_B2_GF_A_temp".to_string(), "VER_W1_B2_GF_B_temp".to_string()];
        assert_eq!(
            ambiguous_sensors(&candidates),
            "Found 2 No. of sensor here is list [\"VER_W1_B2_GF_A_temp\", \"VER_W1_B2_GF_B_temp\"]"
        );
        assert_eq!(
            ambiguous_units(&candidates[..1].to_vec()),
            "Found 1 No. of Unit here is list [\"VER_W1_B2_GF_A_temp\"]"
        );
    }

    #[test]
    fn test_request_failed_messages() {
        assert_eq!(
            request_failed(&ApiError::Status(503)),
            "request failed with status code: 503"
        );
        assert_eq!(
            request_failed(&ApiError::MalformedPayload("missing field".to_string())),
            "request failed"
        );
    }
}
