//! Error types for Genesis backend calls.

use thiserror::Error;

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur when calling the Genesis backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failure (connection refused, timeout, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status code.
    #[error("request failed with status code: {0}")]
    Status(u16),

    /// Response body did not match the expected schema.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl ApiError {
    /// HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status(code) => Some(*code),
            ApiError::Http(err) => err.status().map(|s| s.as_u16()),
            ApiError::MalformedPayload(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_extraction() {
        assert_eq!(ApiError::Status(502).status(), Some(502));
        assert_eq!(ApiError::MalformedPayload("x".into()).status(), None);
    }

    #[test]
    fn test_status_display_matches_user_facing_format() {
        let err = ApiError::Status(404);
        assert_eq!(err.to_string(), "request failed with status code: 404");
    }
}
