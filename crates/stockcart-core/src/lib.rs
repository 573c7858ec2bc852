//! # stockcart-core: Pure Cart Rules for Stockcart
//!
//! This crate is the **heart** of Stockcart. It decides whether a cart
//! mutation is allowed under the available stock, and computes the resulting
//! cart snapshot, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockcart Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront UI / stockcart CLI                   │   │
//! │  │        add product ──► change amount ──► remove product         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           stockcart-engine (CartEngine + adapters)              │   │
//! │  │   lookups in parallel, single-writer lock, write-through store  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockcart-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  lookups  │  │   │
//! │  │   │ StockInfo │  │  parsing  │  │  rules    │  │  payloads │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductId, Product, StockInfo, CartItem)
//! - [`money`] - Money type with integer minor units (no floating point!)
//! - [`cart`] - Cart snapshots and the stock constraint rules
//! - [`error`] - Cart error taxonomy
//! - [`notice`] - User-visible notices derived from errors
//! - [`validation`] - Checks applied to looked-up catalog data
//!
//! ## Example Usage
//!
//! ```rust
//! use stockcart_core::{Cart, Money, Product, ProductId, StockInfo};
//!
//! let shoe = Product {
//!     id: ProductId::new(42),
//!     title: "Shoe".to_string(),
//!     image: "https://cdn.example.com/shoe.jpg".to_string(),
//!     price: Money::from_cents(17990),
//! };
//! let stock = StockInfo::new(ProductId::new(42), 5);
//!
//! let (cart, _) = Cart::new().with_added(&shoe, &stock).unwrap();
//! assert_eq!(cart.items()[0].amount, 1);
//! assert_eq!(cart.total(), Money::from_cents(17990));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod notice;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartTotals, ChangeKind};
pub use error::{CartError, CoreResult, LookupError, Operation, ValidationError};
pub use money::Money;
pub use notice::{Notice, NoticeMessages};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default key under which the cart snapshot is stored for a session.
pub const DEFAULT_CART_KEY: &str = "stockcart:cart";

/// Amount given to a product the first time it is added to the cart.
pub const INITIAL_AMOUNT: i64 = 1;
