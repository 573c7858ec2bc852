//! # stockcart-db: Database Layer for Stockcart
//!
//! SQLite storage for the cart engine, built on sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockcart Data Flow                              │
//! │                                                                         │
//! │  CartEngine (stockcart-engine)                                          │
//! │       │ store.read / store.write        product(id) / stock(id)         │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                   stockcart-db (THIS CRATE)                     │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐   │    │
//! │  │   │   Database    │    │   Repositories     │  │ Migrations │   │    │
//! │  │   │   (pool.rs)   │    │                    │  │ (embedded) │   │    │
//! │  │   │               │    │ StorageRepository  │  │            │   │    │
//! │  │   │ SqlitePool    │◄───│ CatalogRepository  │  │ 001_*.sql  │   │    │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘   │    │
//! │  │                                                                 │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (e.g. ~/.local/share/stockcart/stockcart.db)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Session storage and catalog repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockcart_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("stockcart.db")).await?;
//!
//! db.storage().write("session-1", "stockcart:cart", b"[]").await?;
//! let shoe = db.catalog().get_product(ProductId::new(42)).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::catalog::CatalogRepository;
pub use repository::storage::StorageRepository;
