//! Name/pattern to identifier resolution.
//!
//! Every lookup funnels through the same disambiguation policy: exactly one
//! backend match yields the ID, several matches yield the full candidate
//! list for the caller to surface (never an automatic pick), zero matches or
//! a backend failure yield not-found. IDs are only ever taken from backend
//! responses, and resolution always runs top-down: location, then unit, then
//! sensor, because child IDs are only meaningful within their parent scope.

use crate::location::LocationCode;
use crate::sensor::SensorType;
use genesis_api::{ApiError, GenesisBackend};
use regex::Regex;
use tracing::warn;

/// Outcome of a resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one match.
    Found(i64),
    /// Several matches; the untruncated list of display names.
    Ambiguous(Vec<String>),
    /// No match, or the backend call failed. The raw HTTP status is kept
    /// for diagnostics when there was one.
    NotFound { status: Option<u16> },
}

impl Resolution {
    fn not_found() -> Self {
        Resolution::NotFound { status: None }
    }

    fn from_error(context: &str, err: &ApiError) -> Self {
        warn!(context, error = %err, "resolution request failed");
        Resolution::NotFound {
            status: err.status(),
        }
    }
}

/// Apply the disambiguation policy to a list of backend hits.
fn classify<T>(
    hits: Vec<T>,
    id: impl Fn(&T) -> i64,
    name: impl Fn(&T) -> String,
) -> Resolution {
    match hits.len() {
        0 => Resolution::not_found(),
        1 => Resolution::Found(id(&hits[0])),
        _ => Resolution::Ambiguous(hits.iter().map(name).collect()),
    }
}

/// Resolve a `(sensor type, location)` pair to a sensor ID via the sensor
/// `find` endpoint. Either filter may be absent; absent filters are sent
/// empty.
pub async fn sensor(
    backend: &dyn GenesisBackend,
    sensor_type: Option<&SensorType>,
    location: Option<&LocationCode>,
) -> Resolution {
    let type_filter = sensor_type.map(|t| t.to_string()).unwrap_or_default();
    let pattern = location.map(|l| l.query_pattern()).unwrap_or_default();

    match backend.find_sensors(&type_filter, &pattern).await {
        Ok(hits) => classify(hits, |h| h.sensor_id.0, |h| h.sensor_urn.clone()),
        Err(e) => Resolution::from_error("sensor find", &e),
    }
}

/// Resolve a location pattern to a unit ID via the unit `find` endpoint.
///
/// A warehouse-level code (`WARLVL` triple) is passed through like any other
/// pattern; the backend holds exactly one synthetic warehouse-level unit per
/// warehouse, so a correct code resolves to exactly one row. An empty
/// pattern matches everything, which surfaces as ambiguity.
pub async fn unit(backend: &dyn GenesisBackend, pattern: &str) -> Resolution {
    match backend.find_units(pattern).await {
        Ok(hits) => classify(hits, |h| h.unit_id.0, |h| h.unit_urn.clone()),
        Err(e) => Resolution::from_error("unit find", &e),
    }
}

/// Compile a warehouse-name query into a LIKE matcher. `%` matches any run
/// of characters; everything else is literal. Anchored at both ends for the
/// exact tier, at the start only for the prefix tier. The input is escaped,
/// so the compiled expression is always valid.
fn like_matcher(query: &str, full: bool) -> Regex {
    let mut pattern = format!("^{}", regex::escape(query).replace('%', ".*"));
    if full {
        pattern.push('$');
    }
    Regex::new(&pattern).expect("valid regex")
}

/// Resolve a warehouse name to a location ID by filtering the locations
/// list. Exact (case-insensitive) name matches win; otherwise prefix
/// matches are considered, so "VER" finds every Verna warehouse and is
/// reported as ambiguous. `%` in the query keeps its LIKE meaning: a code
/// with a wildcarded warehouse segment yields the prefix "VER_W%", which
/// still surfaces every matching warehouse instead of matching none.
pub async fn location(backend: &dyn GenesisBackend, name: &str) -> Resolution {
    let rows = match backend.list_locations().await {
        Ok(rows) => rows,
        Err(e) => return Resolution::from_error("locations list", &e),
    };

    let query = name.trim().to_uppercase();
    if query.is_empty() {
        return Resolution::not_found();
    }

    let exact = like_matcher(&query, true);
    let exact_rows: Vec<_> = rows
        .iter()
        .filter(|r| exact.is_match(&r.name.to_uppercase()))
        .collect();
    let matches: Vec<_> = if exact_rows.is_empty() {
        let prefix = like_matcher(&query, false);
        rows.iter()
            .filter(|r| prefix.is_match(&r.name.to_uppercase()))
            .collect()
    } else {
        exact_rows
    };

    classify(matches, |r| r.id.0, |r| r.name.clone())
}
