//! # Session Wiring
//!
//! Builds a ready [`CartEngine`] from a [`CartConfig`].
//!
//! ```text
//! CartConfig
//!   ├── storage.backend = sqlite ──► SqliteStore(session_id)  ┐
//!   │                   = memory ──► MemoryStore              │ share one
//!   ├── catalog.source  = sqlite ──► SqliteCatalog            │ Database
//!   │                   = http   ──► ApiClient(api_url)       ┘ when needed
//!   └── messages ──────────────────► notice texts
//! ```

use std::sync::Arc;

use tracing::info;

use crate::adapters::{ApiClient, MemoryStore, SqliteCatalog, SqliteStore};
use crate::config::{CartConfig, CatalogSource, StoreBackend};
use crate::engine::CartEngine;
use crate::error::{ConfigError, EngineError, EngineResult};
use crate::ports::{NotificationSink, PersistentStore, ProductLookup, StockLookup};
use stockcart_db::{Database, DbConfig, DbError};

/// An engine plus the resources it was built on.
pub struct Session {
    engine: Arc<CartEngine>,
    database: Option<Database>,
}

impl Session {
    /// Opens the configured backends and loads the stored cart.
    pub async fn open(
        config: &CartConfig,
        notifier: Arc<dyn NotificationSink>,
    ) -> EngineResult<Self> {
        config.validate()?;

        let database = if config.needs_database() {
            let path = config.database_path();
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;
            }
            Some(Database::new(DbConfig::new(path)).await?)
        } else {
            None
        };

        let store: Arc<dyn PersistentStore> = match config.storage.backend {
            StoreBackend::Sqlite => Arc::new(SqliteStore::new(
                require(&database)?,
                config.storage.session_id.clone(),
            )),
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
        };

        let (products, stock): (Arc<dyn ProductLookup>, Arc<dyn StockLookup>) =
            match config.catalog.source {
                CatalogSource::Sqlite => {
                    let catalog = Arc::new(SqliteCatalog::new(require(&database)?));
                    (catalog.clone(), catalog)
                }
                CatalogSource::Http => {
                    let url = config.catalog.api_url.clone().ok_or_else(|| {
                        ConfigError::InvalidConfig("catalog.api_url is required".into())
                    })?;
                    let client = Arc::new(ApiClient::new(url, config.catalog.timeout())?);
                    (client.clone(), client)
                }
            };

        info!(
            store = %config.storage.backend,
            catalog = %config.catalog.source,
            session_id = %config.storage.session_id,
            "Opening cart session"
        );

        let engine = CartEngine::builder(products, stock, store, notifier)
            .messages(config.messages.clone())
            .key(config.storage.key.clone())
            .build()
            .await;

        Ok(Session {
            engine: Arc::new(engine),
            database,
        })
    }

    pub fn engine(&self) -> &Arc<CartEngine> {
        &self.engine
    }

    /// The SQLite database, when the configuration uses one.
    pub fn database(&self) -> Option<&Database> {
        self.database.as_ref()
    }

    /// Releases the database pool.
    pub async fn close(self) {
        if let Some(db) = self.database {
            db.close().await;
        }
    }
}

fn require(database: &Option<Database>) -> EngineResult<&Database> {
    database.as_ref().ok_or_else(|| {
        EngineError::Config(ConfigError::InvalidConfig(
            "configuration needs a database that was not opened".into(),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::CollectingNotifier;
    use stockcart_core::{Money, Product, ProductId};

    fn temp_db_path() -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("stockcart-{}", uuid::Uuid::new_v4()))
            .join("cart.db")
    }

    #[tokio::test]
    async fn test_memory_store_with_http_catalog_needs_no_database() {
        let mut config = CartConfig::default();
        config.storage.backend = StoreBackend::Memory;
        config.catalog.source = CatalogSource::Http;
        config.catalog.api_url = Some("http://localhost:3333".to_string());

        let session = Session::open(&config, Arc::new(CollectingNotifier::new()))
            .await
            .unwrap();

        assert!(session.database().is_none());
        assert!(session.engine().cart().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let mut config = CartConfig::default();
        config.catalog.source = CatalogSource::Http;

        let result = Session::open(&config, Arc::new(CollectingNotifier::new())).await;
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[tokio::test]
    async fn test_sqlite_session_survives_restart() {
        let path = temp_db_path();
        let mut config = CartConfig::default();
        config.storage.database_path = Some(path.clone());
        config.storage.session_id = "register-1".to_string();

        let shoe = Product {
            id: ProductId::new(42),
            title: "Shoe".to_string(),
            image: String::new(),
            price: Money::from_cents(17990),
        };

        let session = Session::open(&config, Arc::new(CollectingNotifier::new()))
            .await
            .unwrap();
        let catalog = session.database().unwrap().catalog();
        catalog.upsert_product(&shoe).await.unwrap();
        catalog.set_stock(shoe.id, 5).await.unwrap();

        session.engine().add_product(shoe.id).await;
        session.engine().add_product(shoe.id).await;
        let before = session.engine().snapshot();
        session.close().await;

        let reopened = Session::open(&config, Arc::new(CollectingNotifier::new()))
            .await
            .unwrap();
        assert_eq!(reopened.engine().snapshot(), before);
        assert_eq!(before.get(shoe.id).unwrap().amount, 2);
        reopened.close().await;

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}
