//! # Error Types
//!
//! Domain error types for stockcart-core.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Errors                                     │
//! │                                                                         │
//! │  Variant          Cause                         Handling                │
//! │  ───────────────  ────────────────────────────  ─────────────────────   │
//! │  StockExceeded    requested > available stock   notify (stock message)  │
//! │  Lookup           product/stock lookup failed   notify (per operation)  │
//! │  FloorGuard       amount would drop below 1     silent no-op            │
//! │  AbsentItem       update for item not in cart   silent no-op            │
//! │                                                                         │
//! │  Every variant leaves the cart exactly as it was.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, amounts)
//! 3. Errors are enum variants, never String
//! 4. Mapping to user-visible text lives in [`crate::notice`]

use std::fmt;

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Operation
// =============================================================================

/// The cart operation an error happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Remove,
    Update,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add => write!(f, "add product"),
            Operation::Remove => write!(f, "remove product"),
            Operation::Update => write!(f, "update product amount"),
        }
    }
}

// =============================================================================
// Cart Error
// =============================================================================

/// Reasons a cart operation did not change the cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested amount does not fit in the available stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart: Shoe x1, stock says 1 available
    ///      │
    ///      ▼
    /// add_product(shoe) → wants 2
    ///      │
    ///      ▼
    /// StockExceeded { requested: 2, available: 1 }
    ///      │
    ///      ▼
    /// UI shows: "Requested quantity is out of stock"
    /// ```
    #[error("Requested {requested} of product {product_id}, only {available} in stock")]
    StockExceeded {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// A product or stock lookup failed.
    #[error("Failed to {operation} {product_id}: {source}")]
    Lookup {
        operation: Operation,
        product_id: ProductId,
        #[source]
        source: LookupError,
    },

    /// The update would take a single-unit item, or any item, below one unit.
    #[error("Amount {requested} for product {product_id} is below the floor of 1")]
    FloorGuard { product_id: ProductId, requested: i64 },

    /// The update targets a product that is not in the cart.
    #[error("Product {product_id} is not in the cart")]
    AbsentItem { product_id: ProductId },
}

impl CartError {
    /// Wraps a lookup failure with the operation it interrupted.
    pub fn lookup(operation: Operation, product_id: ProductId, source: LookupError) -> Self {
        CartError::Lookup {
            operation,
            product_id,
            source,
        }
    }

    /// Whether this outcome is absorbed silently (no user notification).
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            CartError::FloorGuard { .. } | CartError::AbsentItem { .. }
        )
    }
}

// =============================================================================
// Lookup Error
// =============================================================================

/// Failure of a Product or Stock lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The catalog has no such product (or no stock record for it).
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: ProductId },

    /// The catalog could not be reached or answered with an error.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    /// The catalog answered with data that fails validation.
    #[error("Malformed catalog response: {0}")]
    Malformed(String),
}

impl LookupError {
    pub fn product_not_found(id: ProductId) -> Self {
        LookupError::NotFound {
            resource: "Product",
            id,
        }
    }

    pub fn stock_not_found(id: ProductId) -> Self {
        LookupError::NotFound {
            resource: "Stock",
            id,
        }
    }
}

impl From<ValidationError> for LookupError {
    fn from(err: ValidationError) -> Self {
        LookupError::Malformed(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: String, value: i64 },

    /// Invalid format (e.g., non-numeric id, unparseable price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// The catalog answered for a different product than the one requested.
    #[error("{field} mismatch: expected {expected}, got {actual}")]
    Mismatch {
        field: String,
        expected: String,
        actual: String,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CoreResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CartError::StockExceeded {
            product_id: ProductId::new(42),
            requested: 2,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "Requested 2 of product 42, only 1 in stock"
        );

        let err = CartError::lookup(
            Operation::Add,
            ProductId::new(99),
            LookupError::Unavailable("connection refused".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "Failed to add product 99: Catalog unavailable: connection refused"
        );
    }

    #[test]
    fn test_silent_variants() {
        let id = ProductId::new(1);
        assert!(CartError::FloorGuard { product_id: id, requested: 0 }.is_silent());
        assert!(CartError::AbsentItem { product_id: id }.is_silent());
        assert!(!CartError::StockExceeded {
            product_id: id,
            requested: 2,
            available: 1
        }
        .is_silent());
    }

    #[test]
    fn test_validation_converts_to_malformed_lookup() {
        let err: LookupError = ValidationError::Required {
            field: "title".to_string(),
        }
        .into();
        assert!(matches!(err, LookupError::Malformed(msg) if msg == "title is required"));
    }
}
