//! # Repository Module
//!
//! Database repositories for Stockcart.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartEngine                                                             │
//! │       │                                                                 │
//! │       │  store.write(key, bytes)          product(id), stock(id)        │
//! │       ▼                                          ▼                      │
//! │  StorageRepository                         CatalogRepository            │
//! │  ├── read(session, key)                    ├── get_product(id)          │
//! │  └── write(session, key, value)            ├── get_stock(id)            │
//! │       │                                    ├── upsert_product(product)  │
//! │       │                                    ├── set_stock(id, amount)    │
//! │       │                                    └── count()                  │
//! │       ▼                                          ▼                      │
//! │  session_storage                           products, stock              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`StorageRepository`](storage::StorageRepository) - Session-scoped key/value blobs
//! - [`CatalogRepository`](catalog::CatalogRepository) - Products and stock levels

pub mod catalog;
pub mod storage;
