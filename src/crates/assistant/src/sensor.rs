//! Sensor type vocabulary.
//!
//! The backend understands a fixed set of title-cased sensor types; users
//! say things like "temp" or "energy meter". The extractor's model output is
//! normalized through the synonym table here before it ever reaches a query
//! parameter.

use std::fmt;

/// Canonical sensor types known to the platform.
///
/// Anything outside the fixed vocabulary is carried through `Other` in title
/// case rather than rejected, so new backend types keep working.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorType {
    Temperature,
    Humidity,
    Motion,
    Light,
    Proximity,
    Accelerometer,
    Power,
    Other(String),
}

impl SensorType {
    /// The title-cased string the backend expects.
    pub fn as_str(&self) -> &str {
        match self {
            SensorType::Temperature => "Temperature",
            SensorType::Humidity => "Humidity",
            SensorType::Motion => "Motion",
            SensorType::Light => "Light",
            SensorType::Proximity => "Proximity",
            SensorType::Accelerometer => "Accelerometer",
            SensorType::Power => "Power",
            SensorType::Other(s) => s,
        }
    }

    /// Normalize free text to a canonical sensor type.
    ///
    /// Returns `None` for empty input, which means "no sensor type
    /// mentioned" and is never an error.
    pub fn normalize(text: &str) -> Option<SensorType> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let sensor_type = match trimmed.to_ascii_lowercase().as_str() {
            "temperature" | "temp" | "thermal" => SensorType::Temperature,
            "humidity" | "moisture" | "rh" => SensorType::Humidity,
            "motion" | "movement" | "pir" => SensorType::Motion,
            "light" | "lux" | "illumination" => SensorType::Light,
            "proximity" | "distance" => SensorType::Proximity,
            "accelerometer" | "acceleration" | "vibration" => SensorType::Accelerometer,
            "power" | "energy" | "electricity" => SensorType::Power,
            _ => SensorType::Other(title_case(trimmed)),
        };
        Some(sensor_type)
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Title-case each whitespace-separated word.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
