//! Structured error types for configuration loading and path access.

use serde::Serialize;
use std::fmt;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Source errors
    FileNotFound,
    ReadFailed,
    ParseFailed,
    UnsupportedFormat,

    // Lookup errors
    SectionNotFound,
    InvalidPath,

    // Conversion errors
    DecodeFailed,
    InternalError,
}

/// Errors raised by [`crate::path::set`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The path has no segments.
    #[error("path is empty")]
    EmptyPath,
    /// A segment along the path holds a scalar or array, not an object.
    #[error("value at '{path}' is not a mapping")]
    NotAMapping { path: String },
}

/// Structured error for configuration operations.
#[derive(Debug, Serialize)]
pub struct ConfigError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ConfigError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
            details: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors

    pub fn file_not_found(file: &str) -> Self {
        Self::new(
            ErrorCode::FileNotFound,
            format!("Config file not found: {}", file),
        )
        .with_path(file)
    }

    pub fn read_failed(file: &str, err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::ReadFailed, format!("Failed reading {}", file))
            .with_path(file)
            .with_details(err.to_string())
    }

    pub fn parse_failed(file: &str, err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::ParseFailed, format!("Failed parsing {}", file))
            .with_path(file)
            .with_details(err.to_string())
    }

    pub fn unsupported_format(file: &str, ext: &str) -> Self {
        Self::new(
            ErrorCode::UnsupportedFormat,
            format!("Unsupported config extension '.{}'", ext),
        )
        .with_path(file)
    }

    pub fn section_not_found(section: &str) -> Self {
        Self::new(
            ErrorCode::SectionNotFound,
            format!("Config section not found: {}", section),
        )
        .with_path(section)
    }

    pub fn decode(path: &str, err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::DecodeFailed, err.to_string()).with_path(path)
    }

    pub fn internal(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InternalError, err.to_string())
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ConfigError {}

impl From<PathError> for ConfigError {
    fn from(err: PathError) -> Self {
        let path = match &err {
            PathError::EmptyPath => String::new(),
            PathError::NotAMapping { path } => path.clone(),
        };
        ConfigError::new(ErrorCode::InvalidPath, err.to_string()).with_path(path)
    }
}

// Allow using ? with anyhow errors by converting them
impl From<anyhow::Error> for ConfigError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ConfigError>() {
            Ok(config_err) => config_err,
            Err(err) => ConfigError::internal(err),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serializes_code() {
        let err = ConfigError::section_not_found("database");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "SECTION_NOT_FOUND");
        assert_eq!(json["path"], "database");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_path_error_converts() {
        let err: ConfigError = PathError::NotAMapping {
            path: "a.b".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidPath);
        assert_eq!(err.path.as_deref(), Some("a.b"));
        assert_eq!(err.to_string(), "value at 'a.b' is not a mapping");
    }

    #[test]
    fn test_anyhow_roundtrip_keeps_code() {
        let original = anyhow::Error::new(ConfigError::file_not_found("app.yaml"));
        let err: ConfigError = original.into();
        assert_eq!(err.code, ErrorCode::FileNotFound);

        let other: ConfigError = anyhow::anyhow!("boom").into();
        assert_eq!(other.code, ErrorCode::InternalError);
    }
}
