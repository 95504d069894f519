//! Error type for the public data sources.
//!
//! Pipeline and application code stays on `anyhow`; only the HTTP clients
//! report typed errors so callers can decide whether to fall back.

use thiserror::Error;

pub type SourceResult<T> = std::result::Result<T, SourceError>;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("missing field '{0}' in response")]
    MissingField(&'static str),

    #[error("image decode error: {0}")]
    Image(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(err.to_string())
    }
}

impl From<image::ImageError> for SourceError {
    fn from(err: image::ImageError) -> Self {
        SourceError::Image(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = SourceError::Api {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "API error (status 503): unavailable");
    }

    #[test]
    fn test_missing_field_display() {
        let err = SourceError::MissingField("properties.forecast");
        assert!(err.to_string().contains("properties.forecast"));
    }

    #[test]
    fn test_from_json_error() {
        let parsed: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        if let Err(json_err) = parsed {
            let err: SourceError = json_err.into();
            assert!(matches!(err, SourceError::Parse(_)));
        }
    }
}
