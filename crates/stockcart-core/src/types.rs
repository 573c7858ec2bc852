//! # Domain Types
//!
//! Core domain types shared by the engine, the database layer and the UI.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │   StockInfo     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  id    (frozen) │   │  id             │       │
//! │  │  title          │   │  title (frozen) │   │  amount (≥ 0)   │       │
//! │  │  image          │   │  image (frozen) │   │                 │       │
//! │  │  price          │   │  price (frozen) │   │  transient,     │       │
//! │  └─────────────────┘   │  amount (≥ 1)   │   │  never stored   │       │
//! │   catalog-sourced      └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The JSON shape of these types is the catalog API's and the persisted
//! snapshot's: `{"id", "title", "image", "price", "amount"}`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product ID
// =============================================================================

/// Catalog identifier of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(#[ts(type = "number")] u64);

impl ProductId {
    #[inline]
    pub const fn new(id: u64) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(ProductId)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "product id".to_string(),
                reason: format!("'{}' is not a non-negative integer", s.trim()),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as returned by the catalog. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: ProductId,

    /// Display title.
    pub title: String,

    /// Image URI.
    pub image: String,

    /// Unit price in minor currency units.
    pub price: Money,
}

// =============================================================================
// Stock
// =============================================================================

/// Units of a product currently available for purchase.
///
/// Fetched fresh for every mutating cart operation and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockInfo {
    #[serde(rename = "id")]
    pub product_id: ProductId,

    #[ts(type = "number")]
    pub amount: i64,
}

impl StockInfo {
    pub const fn new(product_id: ProductId, amount: i64) -> Self {
        StockInfo { product_id, amount }
    }

    /// Whether `requested` units fit in the available stock.
    #[inline]
    pub const fn covers(&self, requested: i64) -> bool {
        requested <= self.amount
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A product paired with the quantity the shopper intends to buy.
///
/// ## Design Notes
/// The product fields are a frozen copy taken when the product was first
/// added, so the cart keeps displaying the same title/price even if the
/// catalog changes before checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub price: Money,

    /// Units in the cart, always ≥ 1.
    #[ts(type = "number")]
    pub amount: i64,
}

impl CartItem {
    /// Creates a cart item from a product snapshot.
    pub fn from_product(product: &Product, amount: i64) -> Self {
        CartItem {
            id: product.id,
            title: product.title.clone(),
            image: product.image.clone(),
            price: product.price,
            amount,
        }
    }

    /// Line subtotal (unit price × amount).
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.price.multiply_quantity(self.amount)
    }

    /// Returns a copy of this item with a different amount.
    pub fn with_amount(&self, amount: i64) -> Self {
        CartItem {
            amount,
            ..self.clone()
        }
    }
}

// =============================================================================
// Operation Inputs
// =============================================================================

/// Request to set the amount of a product already in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn shoe() -> Product {
        Product {
            id: ProductId::new(42),
            title: "Shoe".to_string(),
            image: "https://cdn.example.com/shoe.jpg".to_string(),
            price: Money::from_cents(17990),
        }
    }

    #[test]
    fn test_product_id_parsing() {
        assert_eq!("42".parse::<ProductId>().unwrap(), ProductId::new(42));
        assert_eq!(" 7 ".parse::<ProductId>().unwrap(), ProductId::new(7));
        assert!("-1".parse::<ProductId>().is_err());
        assert!("shoe".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_cart_item_freezes_product() {
        let item = CartItem::from_product(&shoe(), 3);
        assert_eq!(item.id, ProductId::new(42));
        assert_eq!(item.title, "Shoe");
        assert_eq!(item.subtotal().cents(), 53970);
    }

    #[test]
    fn test_stock_covers() {
        let stock = StockInfo::new(ProductId::new(42), 2);
        assert!(stock.covers(2));
        assert!(!stock.covers(3));
    }

    #[test]
    fn test_cart_item_json_shape() {
        let item = CartItem::from_product(&shoe(), 1);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 42,
                "title": "Shoe",
                "image": "https://cdn.example.com/shoe.jpg",
                "price": 17990,
                "amount": 1
            })
        );
    }

    #[test]
    fn test_stock_json_uses_id_field() {
        let stock: StockInfo = serde_json::from_str(r#"{"id": 3, "amount": 5}"#).unwrap();
        assert_eq!(stock, StockInfo::new(ProductId::new(3), 5));
    }
}
