//! Configuration builder trait
//!
//! A common trait for configuration structures, enabling consistent patterns
//! for validation, environment variable loading, and merging across the
//! workspace.

use crate::Result;

/// Trait for configuration structures that support building, validation, and merging
///
/// # Example
///
/// ```rust,ignore
/// use tooling::config::{ConfigBuilder, get_env_or};
///
/// #[derive(Clone, Default)]
/// struct MyConfig {
///     pub host: String,
/// }
///
/// impl ConfigBuilder for MyConfig {
///     fn from_env(prefix: &str) -> tooling::Result<Self> {
///         Ok(Self {
///             host: get_env_or(&format!("{}HOST", prefix), "localhost")?,
///         })
///     }
///
///     fn merge(&mut self, other: Self) -> &mut Self {
///         if self.host.is_empty() {
///             self.host = other.host;
///         }
///         self
///     }
/// }
/// ```
pub trait ConfigBuilder: Default + Clone {
    /// Validate the configuration
    ///
    /// Returns an error if the configuration is invalid. Should check for
    /// required fields being set and values being within valid ranges.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Load configuration from environment variables
    ///
    /// Environment variables follow the pattern `{PREFIX}{FIELD_NAME}` where
    /// FIELD_NAME is the uppercased field name.
    fn from_env(prefix: &str) -> Result<Self>;

    /// Merge another configuration into this one
    ///
    /// Fields not set on `self` take their value from `other`. Returns self
    /// for chaining.
    fn merge(&mut self, other: Self) -> &mut Self;

    /// Load from environment, merge defaults, and validate
    fn from_env_with_defaults(prefix: &str) -> Result<Self> {
        let mut config = Self::from_env(prefix)?;
        let defaults = Self::default();
        config.merge(defaults);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToolingError;

    #[derive(Debug, Clone, PartialEq)]
    struct TestConfig {
        name: String,
        retries: u32,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                name: "default".to_string(),
                retries: 3,
            }
        }
    }

    impl ConfigBuilder for TestConfig {
        fn validate(&self) -> Result<()> {
            if self.retries == 0 {
                return Err(ToolingError::General("retries must be non-zero".into()));
            }
            Ok(())
        }

        fn from_env(_prefix: &str) -> Result<Self> {
            Ok(Self {
                name: String::new(),
                retries: 0,
            })
        }

        fn merge(&mut self, other: Self) -> &mut Self {
            if self.name.is_empty() {
                self.name = other.name;
            }
            if self.retries == 0 {
                self.retries = other.retries;
            }
            self
        }
    }

    #[test]
    fn test_from_env_with_defaults_fills_gaps() {
        let config = TestConfig::from_env_with_defaults("TEST_").unwrap();
        assert_eq!(config.name, "default");
        assert_eq!(config.retries, 3);
    }

    #[test]
    fn test_validate_rejects_invalid() {
        let config = TestConfig {
            name: "x".into(),
            retries: 0,
        };
        assert!(config.validate().is_err());
    }
}
