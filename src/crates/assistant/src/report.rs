//! Metric report formatting.
//!
//! Pure functions from the typed metrics rows to the text the user reads.
//! Groups and rows are emitted in the order the backend returned them; the
//! backend's ordering is authoritative and is never re-sorted here.

use genesis_api::{LocationSummary, MetricRow, SummaryBlock, UnitSummaryRow};

pub const EMPTY_WAREHOUSE: &str = "No sensors are present in this warehouse";
pub const EMPTY_UNIT: &str = "No metrics are present in this unit";
pub const NO_UNITS: &str = "No units are present in this warehouse";

/// Render one metric value: the raw value (empty when missing), the unit
/// with a single leading space, and the sampling duration as `(for N)`.
fn render_value(row: &MetricRow) -> String {
    let mut out = row.value.clone().unwrap_or_default();
    if let Some(unit) = &row.unit {
        out.push(' ');
        out.push_str(unit);
    }
    if let Some(minutes) = &row.duration_minutes {
        out.push_str(&format!("(for {})", minutes));
    }
    out
}

/// Group rows by `(metric_type, metric_subtype)` into `##` / `###` headings
/// with one `id // name // value // state` line per sensor.
fn grouped_sensor_lines(rows: &[MetricRow]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_type: Option<&str> = None;
    let mut current_subtype: Option<&str> = None;

    for row in rows {
        if current_type != Some(row.metric_type.as_str()) {
            current_type = Some(row.metric_type.as_str());
            current_subtype = None;
            lines.push(format!("## {}", row.metric_type));
        }
        if current_subtype != Some(row.metric_subtype.as_str()) {
            current_subtype = Some(row.metric_subtype.as_str());
            lines.push(format!("### {}", row.metric_subtype));
        }
        lines.push(format!(
            "{} // {} // {} // {}",
            row.sensor_id,
            row.sensor_name,
            render_value(row),
            row.state
        ));
    }
    lines
}

/// Warehouse-level sensor report over `wv_warehouse_metrics` rows.
pub fn warehouse_sensor_report(rows: &[MetricRow]) -> String {
    if rows.is_empty() {
        return EMPTY_WAREHOUSE.to_string();
    }
    let mut lines = vec![
        "# Warehouse level sensors".to_string(),
        "Level info: ## is Sensor type, ### is Sensor subtype".to_string(),
        "Sensor data format: Sensor ID // Name // Value // Status".to_string(),
    ];
    lines.extend(grouped_sensor_lines(rows));
    lines.join("\n")
}

/// Unit-level sensor report over `uv_unit_metrics` rows.
pub fn unit_sensor_report(rows: &[MetricRow]) -> String {
    if rows.is_empty() {
        return EMPTY_UNIT.to_string();
    }
    let mut lines = vec![
        "# Unit-level sensors".to_string(),
        "Level info: ## is Sensor type, ### is Sensor subtype".to_string(),
        "Sensor data format: Sensor ID // Name // Value // Status".to_string(),
    ];
    lines.extend(grouped_sensor_lines(rows));
    lines.join("\n")
}

/// Flat unit summary over `wv_unit_summary` rows. `value` is the number of
/// out-of-range sensors in that unit.
pub fn warehouse_unit_report(rows: &[UnitSummaryRow]) -> String {
    if rows.is_empty() {
        return NO_UNITS.to_string();
    }
    let mut lines = vec![
        "# Warehouse-level units".to_string(),
        "> Data format: Unit ID // Name (alias) // Number of out_of_range sensors // Status"
            .to_string(),
    ];
    for row in rows {
        let name = row.unit_name.clone().unwrap_or_default();
        let name = match &row.unit_alias {
            Some(alias) if !alias.is_empty() => format!("{}({})", name, alias),
            _ => name,
        };
        lines.push(format!(
            "{} // {} // {} // {}",
            row.unit_id,
            name,
            row.value.clone().unwrap_or_default(),
            row.state
        ));
    }
    lines.join("\n")
}

fn summary_line(label: &str, block: &SummaryBlock) -> String {
    let mut value = block.value.clone().unwrap_or_default();
    if let Some(unit) = &block.unit {
        value.push(' ');
        value.push_str(unit);
    }
    format!("{} // {} // {}", label, value, block.state)
}

/// Warehouse landing summary: one line per block.
pub fn location_summary_report(summary: &LocationSummary) -> String {
    [
        "# Warehouse summary".to_string(),
        "> Data format: Section // Value // Status".to_string(),
        summary_line("Metrics", &summary.metrics),
        summary_line("Power", &summary.power),
        summary_line("Attendance", &summary.attendance),
        summary_line("Emergencies", &summary.emergencies),
    ]
    .join("\n")
}
