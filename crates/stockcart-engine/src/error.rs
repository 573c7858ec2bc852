//! # Engine Error Types
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Engine Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐  │
//! │  │  Configuration  │  │     Store       │  │     Startup             │  │
//! │  │                 │  │                 │  │                         │  │
//! │  │  InvalidConfig  │  │  Backend        │  │  Database               │  │
//! │  │  LoadFailed     │  │  Closed         │  │  HttpClient             │  │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘  │
//! │                                                                         │
//! │  Cart operations never return these: rejected operations surface as    │
//! │  stockcart_core::CartError, turned into notices by the engine.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use stockcart_db::DbError;
use thiserror::Error;

// =============================================================================
// Store Errors
// =============================================================================

/// Failure of the Persistent Store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected the read or write.
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// The backend has been shut down.
    #[error("Storage is closed")]
    Closed,
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(_) => StoreError::Closed,
            other => StoreError::Backend(other.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Configuration Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting has an unusable value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load config: {0}")]
    LoadFailed(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Startup Errors
// =============================================================================

/// Failures while wiring an engine from configuration.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        EngineError::HttpClient(err.to_string())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_errors_map_to_store_errors() {
        let closed: StoreError = DbError::ConnectionFailed("Pool is closed".into()).into();
        assert!(matches!(closed, StoreError::Closed));

        let other: StoreError = DbError::QueryFailed("disk I/O error".into()).into();
        assert_eq!(
            other.to_string(),
            "Storage backend error: Query failed: disk I/O error"
        );
    }

    #[test]
    fn test_toml_error_is_load_failure() {
        let err = toml::from_str::<toml::Value>("[storage").unwrap_err();
        assert!(matches!(ConfigError::from(err), ConfigError::LoadFailed(_)));
    }
}
