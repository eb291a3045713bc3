//! Entity extraction from free text.
//!
//! Backed by a generative completion model, so every output is treated as
//! potentially noisy: replies are validated against the expected shape and
//! degrade to "not mentioned" / "now" instead of failing the request. Only a
//! transport-level model failure propagates as an error.

pub mod prompts;

use crate::location::LocationCode;
use crate::sensor::SensorType;
use chrono::{NaiveDate, NaiveDateTime};
use llm::{CompletionModel, Result};
use regex::Regex;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Placeholder the location prompt instructs the model to return when the
/// text mentions no location.
pub const NO_LOCATION: &str = "No location found.";

/// Which end of a day a bare date should resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayBound {
    Start,
    End,
}

/// Extracts structured entities (sensor type, location code, time range)
/// from unstructured text via a completion model.
#[derive(Clone)]
pub struct Extractor {
    model: Arc<dyn CompletionModel>,
}

impl Extractor {
    /// Create an extractor over the given completion model.
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }

    /// Extract the sensor type mentioned in the text.
    ///
    /// `None` means "not mentioned", never an error.
    pub async fn sensor_type(&self, text: &str) -> Result<Option<SensorType>> {
        let raw = self.model.complete(&prompts::sensor_type(text)).await?;
        let sensor_type = SensorType::normalize(&raw);
        debug!(?sensor_type, "extracted sensor type");
        Ok(sensor_type)
    }

    /// Extract a location code (canonical or alias-mapped) from the text.
    ///
    /// The model reply is scanned for the first code-shaped token and parsed
    /// through the grammar; the "No location found." placeholder, noise and
    /// unparseable codes all map to `None`.
    pub async fn location(&self, text: &str) -> Result<Option<LocationCode>> {
        let raw = self.model.complete(&prompts::location(text)).await?;
        let trimmed = raw.trim().trim_matches(|c| c == '\'' || c == '"');

        if trimmed.is_empty() || trimmed.contains(NO_LOCATION.trim_end_matches('.')) {
            debug!("no location extracted");
            return Ok(None);
        }

        let code = LocationCode::parse(trimmed).ok().or_else(|| {
            location_token_regex()
                .find(trimmed)
                .and_then(|m| LocationCode::parse(m.as_str()).ok())
        });
        debug!(?code, "extracted location");
        Ok(code)
    }

    /// Extract the `(from, to)` time range referenced by the text.
    ///
    /// Relative references are resolved against the injected `now`. Missing
    /// or unparseable timestamps default to `now`. The pair is returned as
    /// extracted; callers swap an inverted range rather than failing.
    pub async fn time_range(
        &self,
        text: &str,
        now: NaiveDateTime,
    ) -> Result<(NaiveDateTime, NaiveDateTime)> {
        let from_raw = self.model.complete(&prompts::time_from(text, now)).await?;
        let to_raw = self.model.complete(&prompts::time_to(text, now)).await?;

        let from = parse_timestamp(&from_raw, DayBound::Start).unwrap_or(now);
        let to = parse_timestamp(&to_raw, DayBound::End).unwrap_or(now);
        debug!(%from, %to, "extracted time range");
        Ok((from, to))
    }
}

fn location_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[A-Za-z][A-Za-z0-9%]*(?:_[A-Za-z0-9%]+)+").expect("valid regex")
    })
}

fn timestamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\d{4}-\d{2}-\d{2}(?:[T ]\d{2}:\d{2}:\d{2})?").expect("valid regex")
    })
}

/// Pull the first timestamp out of a model reply.
///
/// Accepts full `YYYY-MM-DDTHH:MM:SS` values or bare dates, which resolve to
/// the start or end of that day depending on `bound`.
fn parse_timestamp(raw: &str, bound: DayBound) -> Option<NaiveDateTime> {
    let token = timestamp_regex().find(raw)?.as_str().replace(' ', "T");

    if token.contains('T') {
        return NaiveDateTime::parse_from_str(&token, "%Y-%m-%dT%H:%M:%S").ok();
    }

    let date = NaiveDate::parse_from_str(&token, "%Y-%m-%d").ok()?;
    match bound {
        DayBound::Start => date.and_hms_opt(0, 0, 0),
        DayBound::End => date.and_hms_opt(23, 59, 59),
    }
}
