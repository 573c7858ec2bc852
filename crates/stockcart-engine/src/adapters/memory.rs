//! In-memory store and catalog, for tests and offline runs.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreResult;
use crate::ports::{PersistentStore, ProductLookup, StockLookup};
use stockcart_core::{LookupError, Product, ProductId, StockInfo};

// =============================================================================
// Store
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl PersistentStore for MemoryStore {
    async fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Products and stock levels held in maps.
///
/// A product without a stock entry answers `stock()` with `NotFound`.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: RwLock<HashMap<ProductId, Product>>,
    stock: RwLock<HashMap<ProductId, i64>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a product together with its stock level.
    pub async fn insert(&self, product: Product, stock: i64) {
        let id = product.id;
        self.products.write().await.insert(id, product);
        self.stock.write().await.insert(id, stock);
    }

    pub async fn set_stock(&self, id: ProductId, amount: i64) {
        self.stock.write().await.insert(id, amount);
    }

    /// Drops the product and its stock, as if it left the catalog.
    pub async fn remove(&self, id: ProductId) {
        self.products.write().await.remove(&id);
        self.stock.write().await.remove(&id);
    }
}

#[async_trait]
impl ProductLookup for MemoryCatalog {
    async fn product(&self, id: ProductId) -> Result<Product, LookupError> {
        self.products
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| LookupError::product_not_found(id))
    }
}

#[async_trait]
impl StockLookup for MemoryCatalog {
    async fn stock(&self, id: ProductId) -> Result<StockInfo, LookupError> {
        self.stock
            .read()
            .await
            .get(&id)
            .map(|amount| StockInfo::new(id, *amount))
            .ok_or_else(|| LookupError::stock_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockcart_core::Money;

    #[tokio::test]
    async fn test_catalog_lookups() {
        let catalog = MemoryCatalog::new();
        let id = ProductId::new(42);
        let shoe = Product {
            id,
            title: "Shoe".to_string(),
            image: String::new(),
            price: Money::from_cents(100),
        };

        catalog.insert(shoe.clone(), 5).await;
        assert_eq!(catalog.product(id).await.unwrap(), shoe);
        assert_eq!(catalog.stock(id).await.unwrap(), StockInfo::new(id, 5));

        catalog.remove(id).await;
        assert!(matches!(
            catalog.product(id).await,
            Err(LookupError::NotFound { resource: "Product", .. })
        ));
        assert!(matches!(
            catalog.stock(id).await,
            Err(LookupError::NotFound { resource: "Stock", .. })
        ));
    }

    #[tokio::test]
    async fn test_store_overwrites() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        store.write("k", b"1").await.unwrap();
        store.write("k", b"2").await.unwrap();
        assert_eq!(store.read("k").await.unwrap(), Some(b"2".to_vec()));
        assert_eq!(store.len().await, 1);
    }
}
