//! Error types for the tripshot CLI

use std::time::Duration;
use thiserror::Error;

/// Result type alias for tripshot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Photo provider API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed. Run `tripshot init` to set up your Pexels API key.")]
    Unauthorized,

    #[error("Access denied. Your API key does not permit this request.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to photo provider".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Cache storage errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Could not determine cache directory")]
    NoHome,

    #[error("Cache I/O error: {0}")]
    Io(String),

    #[error("Cache storage quota exceeded")]
    QuotaExceeded,

    #[error("Cache database error: {0}")]
    Sqlite(String),
}

impl From<rusqlite::Error> for CacheError {
    fn from(err: rusqlite::Error) -> Self {
        // Storage exhaustion gets its own variant so writers can compact and retry
        if let rusqlite::Error::SqliteFailure(e, _) = &err
            && e.code == rusqlite::ErrorCode::DiskFull
        {
            return CacheError::QuotaExceeded;
        }
        CacheError::Sqlite(err.to_string())
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `tripshot init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("API key not configured. Run `tripshot init` to set up your Pexels API key.")]
    MissingApiKey,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_unauthorized_message() {
        let err = ApiError::Unauthorized;
        assert!(err.to_string().contains("tripshot init"));
    }

    #[test]
    fn test_api_error_rate_limit() {
        let err = ApiError::RateLimit(Duration::from_secs(30));
        let msg = err.to_string();
        assert!(msg.contains("Rate limit"));
        assert!(msg.contains("30"));
    }

    #[test]
    fn test_api_error_server_error() {
        let err = ApiError::ServerError("Internal error".to_string());
        assert!(err.to_string().contains("Internal error"));
    }

    #[test]
    fn test_api_error_invalid_response() {
        let err = ApiError::InvalidResponse("missing field `photos`".to_string());
        assert!(err.to_string().contains("photos"));
    }

    #[test]
    fn test_cache_error_from_sqlite_disk_full() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_FULL),
            Some("database or disk is full".to_string()),
        );
        let cache_err: CacheError = err.into();
        assert!(matches!(cache_err, CacheError::QuotaExceeded));
    }

    #[test]
    fn test_cache_error_from_sqlite_other() {
        let err = rusqlite::Error::InvalidQuery;
        let cache_err: CacheError = err.into();
        assert!(matches!(cache_err, CacheError::Sqlite(_)));
    }

    #[test]
    fn test_config_error_missing_api_key() {
        let err = ConfigError::MissingApiKey;
        assert!(err.to_string().contains("tripshot init"));
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_str = "invalid: [yaml: content";
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }

    #[test]
    fn test_error_from_api_error() {
        let api_err = ApiError::Unauthorized;
        let err: Error = api_err.into();

        match err {
            Error::Api(ApiError::Unauthorized) => (),
            _ => panic!("Expected Error::Api(ApiError::Unauthorized)"),
        }
    }
}
