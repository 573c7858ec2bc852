//! # Collaborator Ports
//!
//! The four services the cart engine talks to. Adapters for SQLite, HTTP and
//! memory live in [`crate::adapters`]; tests plug in their own doubles.
//!
//! ```text
//! ┌──────────────────┐   product(id)    ┌──────────────────┐
//! │                  │ ───────────────► │  ProductLookup   │
//! │                  │   stock(id)      ├──────────────────┤
//! │    CartEngine    │ ───────────────► │  StockLookup     │
//! │                  │   read / write   ├──────────────────┤
//! │                  │ ───────────────► │  PersistentStore │
//! │                  │   warn(message)  ├──────────────────┤
//! │                  │ ───────────────► │  NotificationSink│
//! └──────────────────┘                  └──────────────────┘
//! ```

use async_trait::async_trait;

use crate::error::StoreResult;
use stockcart_core::{LookupError, Product, ProductId, StockInfo};

/// Authoritative product details by id.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    async fn product(&self, id: ProductId) -> Result<Product, LookupError>;
}

/// Currently available units by product id.
#[async_trait]
pub trait StockLookup: Send + Sync {
    async fn stock(&self, id: ProductId) -> Result<StockInfo, LookupError>;
}

/// Durable key/value storage for the serialized cart.
///
/// Implementations are already scoped to one session; `key` names the slot
/// inside it.
#[async_trait]
pub trait PersistentStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored under `key`.
    async fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    async fn write(&self, key: &str, value: &[u8]) -> StoreResult<()>;
}

/// Displays a transient warning to the user. Fire-and-forget.
pub trait NotificationSink: Send + Sync {
    fn warn(&self, message: &str);
}
