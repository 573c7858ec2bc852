//! # Cart Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     STOCKCART_STORE=memory                                              │
//! │     STOCKCART_API_URL=http://localhost:3333                             │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/stockcart/stockcart.toml (Linux)                          │
//! │     ~/Library/Application Support/com.stockcart.stockcart/... (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     SQLite store + SQLite catalog, session "default"                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! backend = "sqlite"            # sqlite | memory
//! database_path = "./stockcart.db"
//! session_id = "default"
//! key = "stockcart:cart"
//!
//! [catalog]
//! source = "http"               # sqlite | http
//! api_url = "http://localhost:3333"
//! timeout_secs = 10
//!
//! [messages]
//! stock_exceeded = "Quantidade solicitada fora de estoque"
//! ```
//!
//! ## Environment Variables
//! | Variable | Setting |
//! |---|---|
//! | `STOCKCART_STORE` | `storage.backend` |
//! | `STOCKCART_DB_PATH` | `storage.database_path` |
//! | `STOCKCART_SESSION_ID` | `storage.session_id` |
//! | `STOCKCART_STORAGE_KEY` | `storage.key` |
//! | `STOCKCART_CATALOG` | `catalog.source` |
//! | `STOCKCART_API_URL` | `catalog.api_url` |
//! | `STOCKCART_API_TIMEOUT_SECS` | `catalog.timeout_secs` |

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};
use stockcart_core::{NoticeMessages, DEFAULT_CART_KEY};

// =============================================================================
// Storage Settings
// =============================================================================

/// Where the cart snapshot is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// `session_storage` table in the SQLite database.
    #[default]
    Sqlite,

    /// Process memory; the cart is lost on exit.
    Memory,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Sqlite => write!(f, "sqlite"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" | "db" => Ok(StoreBackend::Sqlite),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::InvalidConfig(format!(
                "Unknown store backend: '{}'. Valid options: sqlite, memory",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StoreBackend,

    /// SQLite file. Defaults to the platform data directory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Scopes stored values; one cart per session.
    #[serde(default = "default_session_id")]
    pub session_id: String,

    /// Key the cart snapshot is stored under.
    #[serde(default = "default_key")]
    pub key: String,
}

fn default_session_id() -> String {
    "default".to_string()
}

fn default_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            backend: StoreBackend::default(),
            database_path: None,
            session_id: default_session_id(),
            key: default_key(),
        }
    }
}

// =============================================================================
// Catalog Settings
// =============================================================================

/// Where product and stock lookups are answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    /// `products` / `stock` tables in the SQLite database.
    #[default]
    Sqlite,

    /// JSON catalog API at `api_url`.
    Http,
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Sqlite => write!(f, "sqlite"),
            CatalogSource::Http => write!(f, "http"),
        }
    }
}

impl std::str::FromStr for CatalogSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" | "db" => Ok(CatalogSource::Sqlite),
            "http" | "api" => Ok(CatalogSource::Http),
            other => Err(ConfigError::InvalidConfig(format!(
                "Unknown catalog source: '{}'. Valid options: sqlite, http",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    #[serde(default)]
    pub source: CatalogSource,

    /// Base URL of the catalog API. Required for the `http` source.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    10
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            source: CatalogSource::default(),
            api_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl CatalogSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    /// User-visible notice texts.
    #[serde(default)]
    pub messages: NoticeMessages,
}

impl CartConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, or the platform default)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist. A missing file at the platform
    /// default location just means defaults.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::LoadFailed(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                config = Self::read_file(&path)?;
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => config = Self::read_file(&path)?,
                Some(path) => debug!(?path, "Config file not found, using defaults"),
                None => debug!("No platform config directory, using defaults"),
            },
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load cart config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn read_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading cart config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.storage.session_id.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "storage.session_id must not be empty".into(),
            ));
        }

        if self.storage.key.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "storage.key must not be empty".into(),
            ));
        }

        if self.catalog.source == CatalogSource::Http {
            match self.catalog.api_url.as_deref() {
                Some(url) if url.starts_with("http://") || url.starts_with("https://") => {}
                Some(url) => {
                    return Err(ConfigError::InvalidConfig(format!(
                        "catalog.api_url must start with http:// or https://, got: {}",
                        url
                    )))
                }
                None => {
                    return Err(ConfigError::InvalidConfig(
                        "catalog.api_url is required for the http catalog".into(),
                    ))
                }
            }
        }

        if self.catalog.timeout_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "catalog.timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `STOCKCART_*` environment variables.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from any variable source.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(backend) = var("STOCKCART_STORE") {
            match backend.parse() {
                Ok(parsed) => {
                    debug!(backend = %backend, "Overriding store backend from environment");
                    self.storage.backend = parsed;
                }
                Err(e) => warn!(error = %e, "Ignoring STOCKCART_STORE"),
            }
        }

        if let Some(path) = var("STOCKCART_DB_PATH") {
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(id) = var("STOCKCART_SESSION_ID") {
            debug!(session_id = %id, "Overriding session id from environment");
            self.storage.session_id = id;
        }

        if let Some(key) = var("STOCKCART_STORAGE_KEY") {
            self.storage.key = key;
        }

        if let Some(source) = var("STOCKCART_CATALOG") {
            match source.parse() {
                Ok(parsed) => {
                    debug!(source = %source, "Overriding catalog source from environment");
                    self.catalog.source = parsed;
                }
                Err(e) => warn!(error = %e, "Ignoring STOCKCART_CATALOG"),
            }
        }

        if let Some(url) = var("STOCKCART_API_URL") {
            debug!(url = %url, "Overriding catalog API URL from environment");
            self.catalog.api_url = Some(url);
        }

        if let Some(timeout) = var("STOCKCART_API_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.catalog.timeout_secs = secs,
                Err(e) => warn!(value = %timeout, error = %e, "Ignoring STOCKCART_API_TIMEOUT_SECS"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("stockcart.toml"))
    }

    /// Database file to open: the configured path, or `stockcart.db` in the
    /// platform data directory, or the working directory as a last resort.
    pub fn database_path(&self) -> PathBuf {
        if let Some(path) = &self.storage.database_path {
            return path.clone();
        }

        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join("stockcart.db"))
            .unwrap_or_else(|| PathBuf::from("stockcart.db"))
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "stockcart", "stockcart")
    }

    /// Whether any part of the setup needs the SQLite database.
    pub fn needs_database(&self) -> bool {
        self.storage.backend == StoreBackend::Sqlite || self.catalog.source == CatalogSource::Sqlite
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = CartConfig::default();
        assert_eq!(config.storage.backend, StoreBackend::Sqlite);
        assert_eq!(config.storage.session_id, "default");
        assert_eq!(config.storage.key, "stockcart:cart");
        assert_eq!(config.catalog.source, CatalogSource::Sqlite);
        assert_eq!(config.catalog.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
        assert!(config.needs_database());
    }

    #[test]
    fn test_parsing_modes() {
        assert_eq!("memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert_eq!("SQLite".parse::<StoreBackend>().unwrap(), StoreBackend::Sqlite);
        assert!("redis".parse::<StoreBackend>().is_err());

        assert_eq!("api".parse::<CatalogSource>().unwrap(), CatalogSource::Http);
        assert!("ftp".parse::<CatalogSource>().is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = CartConfig::default();

        config.storage.session_id = " ".to_string();
        assert!(config.validate().is_err());
        config.storage.session_id = "s1".to_string();

        config.storage.key = String::new();
        assert!(config.validate().is_err());
        config.storage.key = "cart".to_string();

        config.catalog.source = CatalogSource::Http;
        assert!(config.validate().is_err());

        config.catalog.api_url = Some("ws://localhost".to_string());
        assert!(config.validate().is_err());

        config.catalog.api_url = Some("https://api.example.com".to_string());
        assert!(config.validate().is_ok());

        config.catalog.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config: CartConfig = toml::from_str(
            r#"
            [catalog]
            source = "http"
            api_url = "http://localhost:3333"

            [messages]
            stock_exceeded = "Quantidade solicitada fora de estoque"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage, StorageSettings::default());
        assert_eq!(config.catalog.source, CatalogSource::Http);
        assert_eq!(config.catalog.timeout_secs, 10);
        assert_eq!(
            config.messages.stock_exceeded,
            "Quantidade solicitada fora de estoque"
        );
        assert_eq!(config.messages.add_failed, "Failed to add product");
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("STOCKCART_STORE", "memory"),
            ("STOCKCART_DB_PATH", "/tmp/cart.db"),
            ("STOCKCART_SESSION_ID", "kiosk-2"),
            ("STOCKCART_CATALOG", "http"),
            ("STOCKCART_API_URL", "http://localhost:3333"),
            ("STOCKCART_API_TIMEOUT_SECS", "3"),
        ]
        .into_iter()
        .collect();

        let mut config = CartConfig::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.storage.backend, StoreBackend::Memory);
        assert_eq!(config.database_path(), PathBuf::from("/tmp/cart.db"));
        assert_eq!(config.storage.session_id, "kiosk-2");
        assert_eq!(config.storage.key, "stockcart:cart");
        assert_eq!(config.catalog.source, CatalogSource::Http);
        assert_eq!(config.catalog.api_url.as_deref(), Some("http://localhost:3333"));
        assert_eq!(config.catalog.timeout_secs, 3);
        assert!(!config.needs_database());
    }

    #[test]
    fn test_invalid_override_is_ignored() {
        let mut config = CartConfig::default();
        config.apply_overrides(|name| (name == "STOCKCART_STORE").then(|| "redis".to_string()));
        assert_eq!(config.storage.backend, StoreBackend::Sqlite);
    }

    #[test]
    fn test_invalid_timeout_override_is_ignored() {
        let mut config = CartConfig::default();
        config.apply_overrides(|name| {
            (name == "STOCKCART_API_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert_eq!(config.catalog.timeout_secs, 10);
    }

    #[test]
    fn test_load_from_explicit_file() {
        let path = std::env::temp_dir().join(format!("stockcart-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "[storage]\nsession_id = \"register-9\"\n\n[catalog]\ntimeout_secs = 4\n",
        )
        .unwrap();

        let loaded = CartConfig::load(Some(path.clone()));
        std::fs::remove_file(&path).unwrap();

        let loaded = loaded.unwrap();
        assert_eq!(loaded.catalog.timeout_secs, 4);
        assert_eq!(loaded.catalog.source, CatalogSource::Sqlite);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let path = std::env::temp_dir().join(format!("stockcart-{}.toml", uuid::Uuid::new_v4()));

        let err = CartConfig::load(Some(path)).unwrap_err();

        assert!(matches!(err, ConfigError::LoadFailed(_)));
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn test_malformed_explicit_file_fails() {
        let path = std::env::temp_dir().join(format!("stockcart-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[storage\nbackend = ").unwrap();

        let result = CartConfig::load(Some(path.clone()));
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ConfigError::LoadFailed(_))));
    }
}
