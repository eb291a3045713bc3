//! Environment variable loading utilities
//!
//! Helper functions for loading and parsing environment variables with proper
//! error handling.

use crate::{Result, ToolingError};
use std::env;
use std::str::FromStr;

/// Load an environment variable as a string
///
/// # Returns
///
/// * `Ok(Some(value))` if variable exists
/// * `Ok(None)` if variable doesn't exist
/// * `Err` if variable exists but has invalid UTF-8
pub fn get_env(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ToolingError::General(format!(
            "Environment variable {} contains invalid UTF-8",
            key
        ))),
    }
}

/// Load and parse an environment variable
///
/// # Returns
///
/// * `Ok(Some(value))` if variable exists and parses successfully
/// * `Ok(None)` if variable doesn't exist
/// * `Err` if variable exists but fails to parse
pub fn get_env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get_env(key)? {
        Some(val) => {
            let parsed = val.parse::<T>().map_err(|e| {
                ToolingError::General(format!(
                    "Failed to parse environment variable {}: {}",
                    key, e
                ))
            })?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

/// Load an environment variable with a default value
pub fn get_env_or(key: &str, default: impl Into<String>) -> Result<String> {
    Ok(get_env(key)?.unwrap_or_else(|| default.into()))
}

/// Load an environment variable as a boolean
///
/// Accepts "1", "true", "yes", "on" (case-insensitive) as true and
/// "0", "false", "no", "off" as false.
pub fn get_env_bool(key: &str) -> Result<Option<bool>> {
    match get_env(key)? {
        Some(val) => match val.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            other => Err(ToolingError::General(format!(
                "Environment variable {} is not a boolean: {}",
                key, other
            ))),
        },
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_missing() {
        assert_eq!(get_env("TOOLING_TEST_DOES_NOT_EXIST").unwrap(), None);
    }

    #[test]
    fn test_get_env_or_default() {
        let val = get_env_or("TOOLING_TEST_DOES_NOT_EXIST", "fallback").unwrap();
        assert_eq!(val, "fallback");
    }

    #[test]
    fn test_get_env_parse() {
        std::env::set_var("TOOLING_TEST_PORT", "8080");
        let port: Option<u16> = get_env_parse("TOOLING_TEST_PORT").unwrap();
        assert_eq!(port, Some(8080));
        std::env::remove_var("TOOLING_TEST_PORT");
    }

    #[test]
    fn test_get_env_parse_invalid() {
        std::env::set_var("TOOLING_TEST_BAD_PORT", "not-a-number");
        let result: Result<Option<u16>> = get_env_parse("TOOLING_TEST_BAD_PORT");
        assert!(result.is_err());
        std::env::remove_var("TOOLING_TEST_BAD_PORT");
    }

    #[test]
    fn test_get_env_bool() {
        std::env::set_var("TOOLING_TEST_FLAG", "yes");
        assert_eq!(get_env_bool("TOOLING_TEST_FLAG").unwrap(), Some(true));
        std::env::set_var("TOOLING_TEST_FLAG", "off");
        assert_eq!(get_env_bool("TOOLING_TEST_FLAG").unwrap(), Some(false));
        std::env::remove_var("TOOLING_TEST_FLAG");
    }
}
