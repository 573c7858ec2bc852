//! # stockcart-engine: Cart Orchestration
//!
//! Runs the cart operations against live collaborators: product and stock
//! lookups, a persistent store, and a notification sink.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Stockcart Architecture                             │
//! │                                                                         │
//! │  apps/cli (stockcart)                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                 stockcart-engine (THIS CRATE)                   │    │
//! │  │                                                                 │    │
//! │  │  Session ──► CartEngine ──► ports ◄── adapters                  │    │
//! │  │                 │                     ├── sqlite (stockcart-db) │    │
//! │  │                 │                     ├── http (reqwest)        │    │
//! │  │                 ▼                     ├── memory                │    │
//! │  │             EventBus                  └── notify                │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  stockcart-core (Cart rules, Money, errors, notices)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`engine`] - `CartEngine` and its builder
//! - [`ports`] - Collaborator traits
//! - [`adapters`] - SQLite, HTTP, in-memory and notification implementations
//! - [`events`] - `CartChange` broadcast
//! - [`snapshot`] - Stored cart format
//! - [`config`] - Layered configuration
//! - [`session`] - Wiring an engine from configuration
//! - [`error`] - Store, config and startup errors
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockcart_engine::{CartConfig, Session, adapters::TracingNotifier};
//!
//! let config = CartConfig::load_or_default(None);
//! let session = Session::open(&config, Arc::new(TracingNotifier)).await?;
//!
//! session.engine().add_product(ProductId::new(42)).await;
//! println!("{:?}", session.engine().cart());
//! ```

pub mod adapters;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod ports;
pub mod session;
pub mod snapshot;

pub use config::{CartConfig, CatalogSource, StoreBackend};
pub use engine::{CartEngine, CartEngineBuilder};
pub use error::{ConfigError, EngineError, EngineResult, StoreError, StoreResult};
pub use events::{CartChange, EventBus};
pub use ports::{NotificationSink, PersistentStore, ProductLookup, StockLookup};
pub use session::Session;
