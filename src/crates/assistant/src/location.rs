//! Warehouse location-code grammar.
//!
//! Genesis identifies places with a 5-segment hierarchical code
//! `{SITE}_{WAREHOUSE}_{BUILDING}_{FLOOR}_{ZONE}`, e.g. `VER_W1_B2_GF_B`.
//! Any segment except SITE may be the SQL-LIKE wildcard `%` meaning
//! "unspecified"; segments may also embed `%` for partial patterns
//! (`VER_W%_B2_GF`). `WARLVL` in all of BUILDING, FLOOR and ZONE denotes the
//! warehouse-level synthetic unit, which is not a wildcard: it matches
//! exactly one row.
//!
//! This module handles only the strict canonical form; mapping natural
//! aliases ("Verna Ground floor B") to codes is the extractor's job.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The wildcard token accepted by the backend's LIKE matching.
pub const WILDCARD: &str = "%";

/// Segment value marking the warehouse-level synthetic unit.
pub const WAREHOUSE_LEVEL: &str = "WARLVL";

/// Errors from parsing a canonical location code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationParseError {
    /// Input was empty or whitespace.
    #[error("location code is empty")]
    Empty,

    /// First segment missing, wildcarded, or not a plain identifier.
    #[error("location code has no valid site segment: {0:?}")]
    MissingSite(String),

    /// More than five segments.
    #[error("location code has too many segments: {0}")]
    TooManySegments(usize),

    /// A segment contained characters outside `[A-Za-z0-9%]`.
    #[error("invalid location segment: {0:?}")]
    InvalidSegment(String),
}

/// One non-site segment of a location code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A concrete (possibly partial-pattern) segment like `W1` or `W%`.
    Named(String),
    /// The bare `%` wildcard: segment entirely unspecified.
    Wildcard,
}

impl Segment {
    fn parse(raw: &str) -> Result<Self, LocationParseError> {
        if raw == WILDCARD {
            return Ok(Segment::Wildcard);
        }
        if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '%') {
            return Err(LocationParseError::InvalidSegment(raw.to_string()));
        }
        Ok(Segment::Named(raw.to_string()))
    }

    /// The pattern text of this segment.
    pub fn as_pattern(&self) -> &str {
        match self {
            Segment::Named(s) => s,
            Segment::Wildcard => WILDCARD,
        }
    }

    fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Wildcard)
    }

    fn is_warehouse_level(&self) -> bool {
        matches!(self, Segment::Named(s) if s == WAREHOUSE_LEVEL)
    }
}

/// A parsed location code. Immutable value type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationCode {
    site: String,
    warehouse: Segment,
    building: Segment,
    floor: Segment,
    zone: Segment,
}

impl LocationCode {
    /// Parse a canonical location code.
    ///
    /// Accepts one to five `_`-separated segments; missing trailing segments
    /// are treated as unspecified (wildcard). The SITE segment is mandatory
    /// and may never be wildcarded.
    pub fn parse(text: &str) -> Result<Self, LocationParseError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(LocationParseError::Empty);
        }

        let parts: Vec<&str> = trimmed.split('_').collect();
        if parts.len() > 5 {
            return Err(LocationParseError::TooManySegments(parts.len()));
        }

        let site = parts[0];
        if site.is_empty() || !site.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(LocationParseError::MissingSite(site.to_string()));
        }

        let mut segments = [
            Segment::Wildcard,
            Segment::Wildcard,
            Segment::Wildcard,
            Segment::Wildcard,
        ];
        for (slot, raw) in segments.iter_mut().zip(parts.iter().skip(1)) {
            *slot = Segment::parse(raw)?;
        }
        let [warehouse, building, floor, zone] = segments;

        Ok(Self {
            site: site.to_uppercase(),
            warehouse,
            building,
            floor,
            zone,
        })
    }

    /// The site segment, never wildcarded.
    pub fn site(&self) -> &str {
        &self.site
    }

    /// True when BUILDING, FLOOR and ZONE are all `WARLVL`: the code names
    /// the warehouse-level synthetic unit rather than a finer location.
    pub fn is_warehouse_level(&self) -> bool {
        self.building.is_warehouse_level()
            && self.floor.is_warehouse_level()
            && self.zone.is_warehouse_level()
    }

    /// The `SITE_WAREHOUSE` prefix used to match warehouse names in the
    /// locations list (`VER_W1`); bare site when the warehouse segment is
    /// unspecified.
    pub fn warehouse_prefix(&self) -> String {
        match &self.warehouse {
            Segment::Named(w) => format!("{}_{}", self.site, w),
            Segment::Wildcard => self.site.clone(),
        }
    }

    /// Render the SQL-LIKE pattern passed verbatim to the backend's `find`
    /// endpoints. A run of two or more trailing wildcard segments collapses
    /// to a single trailing `%`; fully specified codes render unchanged.
    pub fn query_pattern(&self) -> String {
        let mut parts = vec![
            self.site.as_str(),
            self.warehouse.as_pattern(),
            self.building.as_pattern(),
            self.floor.as_pattern(),
            self.zone.as_pattern(),
        ];
        while parts.len() > 2
            && parts[parts.len() - 1] == WILDCARD
            && parts[parts.len() - 2] == WILDCARD
        {
            parts.pop();
        }
        parts.join("_")
    }
}

impl fmt::Display for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query_pattern())
    }
}

impl FromStr for LocationCode {
    type Err = LocationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LocationCode::parse(s)
    }
}
