//! SQLite-backed store and catalog, on top of `stockcart-db` repositories.

use async_trait::async_trait;
use tracing::debug;

use crate::error::StoreResult;
use crate::ports::{PersistentStore, ProductLookup, StockLookup};
use stockcart_core::{LookupError, Product, ProductId, StockInfo};
use stockcart_db::{CatalogRepository, Database, DbError, StorageRepository};

// =============================================================================
// Store
// =============================================================================

/// Session storage scoped to one session id.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    repo: StorageRepository,
    session_id: String,
}

impl SqliteStore {
    pub fn new(db: &Database, session_id: impl Into<String>) -> Self {
        SqliteStore {
            repo: db.storage(),
            session_id: session_id.into(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

#[async_trait]
impl PersistentStore for SqliteStore {
    async fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.repo.read(&self.session_id, key).await?)
    }

    async fn write(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        Ok(self.repo.write(&self.session_id, key, value).await?)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Product and stock lookups against the local catalog tables.
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    repo: CatalogRepository,
}

impl SqliteCatalog {
    pub fn new(db: &Database) -> Self {
        SqliteCatalog { repo: db.catalog() }
    }
}

fn unavailable(err: DbError) -> LookupError {
    LookupError::Unavailable(err.to_string())
}

#[async_trait]
impl ProductLookup for SqliteCatalog {
    async fn product(&self, id: ProductId) -> Result<Product, LookupError> {
        let product = self.repo.get_product(id).await.map_err(unavailable)?;
        debug!(product_id = %id, found = product.is_some(), "Catalog product lookup");
        product.ok_or_else(|| LookupError::product_not_found(id))
    }
}

#[async_trait]
impl StockLookup for SqliteCatalog {
    async fn stock(&self, id: ProductId) -> Result<StockInfo, LookupError> {
        let stock = self.repo.get_stock(id).await.map_err(unavailable)?;
        debug!(product_id = %id, found = stock.is_some(), "Catalog stock lookup");
        stock.ok_or_else(|| LookupError::stock_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockcart_core::Money;
    use stockcart_db::DbConfig;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_store_is_session_scoped() {
        let db = db().await;
        let alice = SqliteStore::new(&db, "alice");
        let bob = SqliteStore::new(&db, "bob");

        alice.write("stockcart:cart", b"[]").await.unwrap();

        assert_eq!(alice.read("stockcart:cart").await.unwrap(), Some(b"[]".to_vec()));
        assert_eq!(bob.read("stockcart:cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_catalog_lookups() {
        let db = db().await;
        let id = ProductId::new(42);
        let shoe = Product {
            id,
            title: "Shoe".to_string(),
            image: String::new(),
            price: Money::from_cents(17990),
        };
        db.catalog().upsert_product(&shoe).await.unwrap();

        let catalog = SqliteCatalog::new(&db);
        assert_eq!(catalog.product(id).await.unwrap(), shoe);
        assert!(matches!(
            catalog.stock(id).await,
            Err(LookupError::NotFound { resource: "Stock", .. })
        ));

        db.catalog().set_stock(id, 3).await.unwrap();
        assert_eq!(catalog.stock(id).await.unwrap().amount, 3);
    }

    #[tokio::test]
    async fn test_closed_database_is_unavailable() {
        let db = db().await;
        let catalog = SqliteCatalog::new(&db);
        db.close().await;

        assert!(matches!(
            catalog.product(ProductId::new(1)).await,
            Err(LookupError::Unavailable(_))
        ));
    }
}
