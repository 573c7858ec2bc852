//! # Adapters
//!
//! Implementations of the [`crate::ports`] traits.
//!
//! | Adapter | Implements | Backed by |
//! |---|---|---|
//! | [`sqlite::SqliteStore`] | `PersistentStore` | `session_storage` table |
//! | [`sqlite::SqliteCatalog`] | `ProductLookup`, `StockLookup` | `products` / `stock` tables |
//! | [`http::ApiClient`] | `ProductLookup`, `StockLookup` | JSON catalog API |
//! | [`memory::MemoryStore`] | `PersistentStore` | `HashMap` |
//! | [`memory::MemoryCatalog`] | `ProductLookup`, `StockLookup` | `HashMap` |
//! | [`notify::TracingNotifier`] | `NotificationSink` | `tracing` at warn |
//! | [`notify::ConsoleNotifier`] | `NotificationSink` | stderr |
//! | [`notify::CollectingNotifier`] | `NotificationSink` | `Vec<String>` |

pub mod http;
pub mod memory;
pub mod notify;
pub mod sqlite;

pub use http::ApiClient;
pub use memory::{MemoryCatalog, MemoryStore};
pub use notify::{CollectingNotifier, ConsoleNotifier, TracingNotifier};
pub use sqlite::{SqliteCatalog, SqliteStore};
