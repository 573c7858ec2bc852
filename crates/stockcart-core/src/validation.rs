//! # Validation Module
//!
//! Checks applied to catalog data before the cart trusts it.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Validation Happens                           │
//! │                                                                         │
//! │  Catalog answer (HTTP JSON / SQLite row)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Deserialization (types, shapes)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  THIS MODULE: business checks                                           │
//! │  ├── answer is for the product that was asked for                       │
//! │  ├── title present, price not negative                                  │
//! │  └── stock not negative                                                 │
//! │       │                                                                 │
//! │       ├── failure ──► LookupError::Malformed ──► "failed to ..." notice │
//! │       ▼                                                                 │
//! │  Cart rules (cart.rs)                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockcart_core::validation::validate_stock;
//! use stockcart_core::{ProductId, StockInfo};
//!
//! let id = ProductId::new(42);
//! assert!(validate_stock(&StockInfo::new(id, 3), id).is_ok());
//! assert!(validate_stock(&StockInfo::new(id, -1), id).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Product, ProductId, StockInfo};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product title.
///
/// ## Rules
/// - Must not be empty or whitespace
pub fn validate_title(title: &str) -> ValidationResult<()> {
    if title.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
            value: price.cents(),
        });
    }

    Ok(())
}

/// Validates that an answer refers to the product that was requested.
pub fn validate_same_product(
    field: &str,
    expected: ProductId,
    actual: ProductId,
) -> ValidationResult<()> {
    if expected != actual {
        return Err(ValidationError::Mismatch {
            field: field.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }

    Ok(())
}

/// Validates a product returned by the Product Lookup.
pub fn validate_product(product: &Product, requested: ProductId) -> ValidationResult<()> {
    validate_same_product("product id", requested, product.id)?;
    validate_title(&product.title)?;
    validate_price(product.price)?;
    Ok(())
}

/// Validates stock returned by the Stock Lookup.
///
/// ## Rules
/// - Refers to the requested product
/// - Amount is ≥ 0
pub fn validate_stock(stock: &StockInfo, requested: ProductId) -> ValidationResult<()> {
    validate_same_product("stock product id", requested, stock.product_id)?;

    if stock.amount < 0 {
        return Err(ValidationError::Negative {
            field: "stock amount".to_string(),
            value: stock.amount,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, title: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            image: String::new(),
            price: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_validate_product() {
        let id = ProductId::new(1);
        assert!(validate_product(&product(1, "Shoe", 100), id).is_ok());
        assert!(validate_product(&product(1, "Free sample", 0), id).is_ok());

        assert!(validate_product(&product(1, "  ", 100), id).is_err());
        assert!(validate_product(&product(1, "Shoe", -1), id).is_err());
        assert!(validate_product(&product(2, "Shoe", 100), id).is_err());
    }

    #[test]
    fn test_validate_stock() {
        let id = ProductId::new(5);
        assert!(validate_stock(&StockInfo::new(id, 0), id).is_ok());
        assert!(validate_stock(&StockInfo::new(id, 10), id).is_ok());
        assert!(validate_stock(&StockInfo::new(id, -2), id).is_err());
        assert!(validate_stock(&StockInfo::new(ProductId::new(6), 1), id).is_err());
    }

    #[test]
    fn test_mismatch_message() {
        let err = validate_same_product("product id", ProductId::new(1), ProductId::new(2))
            .unwrap_err();
        assert_eq!(err.to_string(), "product id mismatch: expected 1, got 2");
    }
}
