//! # CLI Error Types
//!
//! Errors that stop a command before it reaches the cart. Cart rejections
//! (out of stock, failed lookups) are not errors here: they arrive as
//! notices and only change the exit code.
//!
//! ## Output
//! Printed to stderr as JSON:
//! ```json
//! {
//!   "code": "CONFIG_ERROR",
//!   "message": "Invalid configuration: catalog.api_url is required for the http catalog"
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

use stockcart_engine::{ConfigError, EngineError};

#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct CliError {
    /// Machine-readable error code for scripts
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Configuration file or environment is unusable
    ConfigError,

    /// Database could not be opened or migrated
    DatabaseError,

    /// Catalog client could not be created
    CatalogError,

    /// Output could not be produced
    Internal,
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }

    /// JSON form for stderr. Falls back to the plain message.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.message.clone())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<EngineError> for CliError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Config(e) => e.into(),
            EngineError::Database(e) => {
                tracing::error!("Database error: {}", e);
                CliError::new(ErrorCode::DatabaseError, e.to_string())
            }
            EngineError::HttpClient(e) => CliError::new(ErrorCode::CatalogError, e),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::internal(format!("Failed to render output: {}", err))
    }
}

pub type CliResult<T> = Result<T, CliError>;
