//! # Cart
//!
//! Cart snapshots and the rules that reconcile quantities against stock.
//!
//! ## Snapshot Semantics
//! Every rule takes `&self` and returns a brand new `Cart`. The snapshot the
//! caller holds is never touched, so a rejected operation cannot leave a
//! half-applied change behind.
//!
//! ## Item State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Per-Item Transitions                                 │
//! │                                                                         │
//! │             with_added                with_added (n + 1 ≤ stock)        │
//! │   absent ─────────────► present(1) ────────────────► present(n + 1)     │
//! │     ▲       (1 ≤ stock)     │                                           │
//! │     │                       │ with_amount(m)                            │
//! │     │ without               ▼   m ≥ 1, m ≤ stock                        │
//! │     └──────────────── present(m)    (n = 1 and m ≤ 1 → FloorGuard)      │
//! │                                                                         │
//! │  No transition ever produces amount ≤ 0.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CartError, CoreResult};
use crate::money::Money;
use crate::types::{CartItem, Product, ProductId, StockInfo};
use crate::INITIAL_AMOUNT;

/// What a successful mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// A product entered the cart with amount 1.
    Added,
    /// An existing item's amount went up by one.
    Incremented,
    /// An existing item's amount was set explicitly.
    AmountUpdated,
    /// An item left the cart.
    Removed,
}

/// The shopping cart: ordered items, unique by product id.
///
/// ## Invariants
/// - Items are unique by `id` (adding the same product increments it)
/// - `amount ≥ 1` for every item
/// - Insertion order is display order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from stored items, restoring the invariants.
    ///
    /// ## Corrections
    /// - A repeated product id keeps its first occurrence
    /// - Items with `amount < 1` are dropped
    /// - Items whose subtotal does not fit in `Money` are dropped
    ///
    /// Returns the cart and the items that were discarded.
    pub fn normalized(items: Vec<CartItem>) -> (Cart, Vec<CartItem>) {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(items.len());
        let mut dropped = Vec::new();

        for item in items {
            let unusable = item.amount < INITIAL_AMOUNT
                || item.price.checked_multiply_quantity(item.amount).is_none();
            if unusable || !seen.insert(item.id) {
                dropped.push(item);
            } else {
                kept.push(item);
            }
        }

        (Cart { items: kept }, dropped)
    }

    /// Items in display order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    /// Finds the item for a product.
    pub fn get(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Number of distinct products (the header badge count).
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all amounts, saturating at `i64::MAX`.
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, i| total.saturating_add(i.amount))
    }

    /// Sum of all line subtotals.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }

    // =========================================================================
    // Rules
    // =========================================================================

    /// Adds one unit of `product`, bounded by `stock`.
    ///
    /// ## Behavior
    /// - Not in cart: appended with amount 1, if `1 ≤ stock`
    /// - In cart: amount + 1, if `amount < stock`
    /// - Otherwise `StockExceeded` (including an amount already at `i64::MAX`)
    pub fn with_added(&self, product: &Product, stock: &StockInfo) -> CoreResult<(Cart, ChangeKind)> {
        let Some(current) = self.get(product.id) else {
            if !stock.covers(INITIAL_AMOUNT) {
                return Err(CartError::StockExceeded {
                    product_id: product.id,
                    requested: INITIAL_AMOUNT,
                    available: stock.amount,
                });
            }

            let mut items = self.items.clone();
            items.push(CartItem::from_product(product, INITIAL_AMOUNT));
            return Ok((Cart { items }, ChangeKind::Added));
        };

        let Some(requested) = current.amount.checked_add(1) else {
            return Err(CartError::StockExceeded {
                product_id: product.id,
                requested: i64::MAX,
                available: stock.amount,
            });
        };
        if !stock.covers(requested) {
            return Err(CartError::StockExceeded {
                product_id: product.id,
                requested,
                available: stock.amount,
            });
        }

        Ok((self.replace_amount(product.id, requested), ChangeKind::Incremented))
    }

    /// Sets the amount of an item already in the cart, bounded by `stock`.
    ///
    /// ## Behavior
    /// - Not in cart: `AbsentItem`
    /// - `amount < 1`, or the item holds 1 and `amount ≤ 1`: `FloorGuard`
    /// - `amount > stock`: `StockExceeded`
    pub fn with_amount(
        &self,
        product_id: ProductId,
        amount: i64,
        stock: &StockInfo,
    ) -> CoreResult<Cart> {
        let current = self
            .get(product_id)
            .ok_or(CartError::AbsentItem { product_id })?;

        let at_floor = current.amount == INITIAL_AMOUNT && amount <= current.amount;
        if amount < INITIAL_AMOUNT || at_floor {
            return Err(CartError::FloorGuard {
                product_id,
                requested: amount,
            });
        }

        if !stock.covers(amount) {
            return Err(CartError::StockExceeded {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        Ok(self.replace_amount(product_id, amount))
    }

    /// Removes the item for `product_id`. `None` when it is not in the cart.
    pub fn without(&self, product_id: ProductId) -> Option<Cart> {
        if !self.contains(product_id) {
            return None;
        }

        let items = self
            .items
            .iter()
            .filter(|i| i.id != product_id)
            .cloned()
            .collect();
        Some(Cart { items })
    }

    fn replace_amount(&self, product_id: ProductId, amount: i64) -> Cart {
        let items = self
            .items
            .iter()
            .map(|i| {
                if i.id == product_id {
                    i.with_amount(amount)
                } else {
                    i.clone()
                }
            })
            .collect();
        Cart { items }
    }
}

/// Cart totals summary for the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub item_count: usize,
    #[ts(type = "number")]
    pub total_quantity: i64,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, price_cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {}", id),
            image: format!("https://cdn.example.com/{}.jpg", id),
            price: Money::from_cents(price_cents),
        }
    }

    fn stock(id: u64, amount: i64) -> StockInfo {
        StockInfo::new(ProductId::new(id), amount)
    }

    fn cart_with(id: u64, amount: i64) -> Cart {
        Cart {
            items: vec![CartItem::from_product(&product(id, 100), amount)],
        }
    }

    #[test]
    fn test_add_new_product() {
        let (cart, kind) = Cart::new()
            .with_added(&product(42, 100), &stock(42, 5))
            .unwrap();

        assert_eq!(kind, ChangeKind::Added);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items()[0].amount, 1);
        assert_eq!(cart.items()[0].price, Money::from_cents(100));
    }

    #[test]
    fn test_add_new_product_without_stock() {
        let err = Cart::new()
            .with_added(&product(42, 100), &stock(42, 0))
            .unwrap_err();

        assert!(matches!(
            err,
            CartError::StockExceeded { requested: 1, available: 0, .. }
        ));
    }

    #[test]
    fn test_add_existing_product_increments() {
        let (cart, kind) = cart_with(42, 2)
            .with_added(&product(42, 100), &stock(42, 3))
            .unwrap();

        assert_eq!(kind, ChangeKind::Incremented);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.get(ProductId::new(42)).unwrap().amount, 3);
    }

    #[test]
    fn test_add_existing_product_at_stock_limit() {
        let before = cart_with(42, 1);
        let err = before
            .with_added(&product(42, 100), &stock(42, 1))
            .unwrap_err();

        assert!(matches!(
            err,
            CartError::StockExceeded { requested: 2, available: 1, .. }
        ));
        // The original snapshot is untouched
        assert_eq!(before.get(ProductId::new(42)).unwrap().amount, 1);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let (cart, _) = Cart::new().with_added(&product(1, 100), &stock(1, 9)).unwrap();
        let (cart, _) = cart.with_added(&product(2, 100), &stock(2, 9)).unwrap();
        let (cart, _) = cart.with_added(&product(1, 100), &stock(1, 9)).unwrap();

        let ids: Vec<u64> = cart.items().iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_update_amount_within_stock() {
        let cart = cart_with(42, 3)
            .with_amount(ProductId::new(42), 4, &stock(42, 10))
            .unwrap();
        assert_eq!(cart.get(ProductId::new(42)).unwrap().amount, 4);

        let cart = cart
            .with_amount(ProductId::new(42), 2, &stock(42, 10))
            .unwrap();
        assert_eq!(cart.get(ProductId::new(42)).unwrap().amount, 2);
    }

    #[test]
    fn test_update_amount_up_to_stock() {
        let cart = cart_with(42, 3)
            .with_amount(ProductId::new(42), 10, &stock(42, 10))
            .unwrap();
        assert_eq!(cart.get(ProductId::new(42)).unwrap().amount, 10);
    }

    #[test]
    fn test_update_amount_floor_guard() {
        let err = cart_with(42, 1)
            .with_amount(ProductId::new(42), 0, &stock(42, 10))
            .unwrap_err();
        assert!(matches!(err, CartError::FloorGuard { requested: 0, .. }));

        let err = cart_with(42, 1)
            .with_amount(ProductId::new(42), 1, &stock(42, 10))
            .unwrap_err();
        assert!(matches!(err, CartError::FloorGuard { .. }));

        // Never below one unit, whatever the current amount
        let err = cart_with(42, 3)
            .with_amount(ProductId::new(42), 0, &stock(42, 10))
            .unwrap_err();
        assert!(matches!(err, CartError::FloorGuard { .. }));
    }

    #[test]
    fn test_update_amount_over_stock() {
        let err = cart_with(42, 3)
            .with_amount(ProductId::new(42), 11, &stock(42, 10))
            .unwrap_err();
        assert!(matches!(
            err,
            CartError::StockExceeded { requested: 11, available: 10, .. }
        ));
    }

    #[test]
    fn test_update_absent_item() {
        let err = Cart::new()
            .with_amount(ProductId::new(42), 2, &stock(42, 10))
            .unwrap_err();
        assert!(matches!(err, CartError::AbsentItem { .. }));
    }

    #[test]
    fn test_without() {
        let cart = cart_with(42, 2);
        assert!(cart.without(ProductId::new(42)).unwrap().is_empty());
        assert_eq!(cart.without(ProductId::new(7)), None);
    }

    #[test]
    fn test_normalized_restores_invariants() {
        let items = vec![
            CartItem::from_product(&product(1, 100), 2),
            CartItem::from_product(&product(2, 100), 0),
            CartItem::from_product(&product(1, 100), 5),
            CartItem::from_product(&product(3, 100), 1),
        ];

        let (cart, dropped) = Cart::normalized(items);

        let ids: Vec<u64> = cart.items().iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().amount, 2);
        assert_eq!(dropped.len(), 2);
    }

    #[test]
    fn test_normalized_drops_overflowing_lines() {
        let items = vec![
            CartItem::from_product(&product(1, 17990), 1_000_000_000_000_000),
            CartItem::from_product(&product(2, 1), i64::MAX),
        ];

        let (cart, dropped) = Cart::normalized(items);

        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].id, ProductId::new(1));
        assert_eq!(cart.get(ProductId::new(2)).unwrap().amount, i64::MAX);
    }

    #[test]
    fn test_add_at_largest_amount_is_rejected() {
        let (cart, _) = Cart::normalized(vec![CartItem::from_product(&product(42, 1), i64::MAX)]);

        for available in [5, i64::MAX] {
            let err = cart
                .with_added(&product(42, 1), &stock(42, available))
                .unwrap_err();
            assert!(matches!(
                err,
                CartError::StockExceeded { requested: i64::MAX, .. }
            ));
        }
        assert_eq!(cart.get(ProductId::new(42)).unwrap().amount, i64::MAX);
    }

    #[test]
    fn test_totals_saturate() {
        let cart = Cart {
            items: vec![
                CartItem::from_product(&product(1, 1), i64::MAX),
                CartItem::from_product(&product(2, 1), i64::MAX),
            ],
        };

        let totals = cart.totals();
        assert_eq!(totals.total_quantity, i64::MAX);
        assert_eq!(totals.total, Money::MAX);
    }

    #[test]
    fn test_totals() {
        let (cart, _) = Cart::new().with_added(&product(1, 17990), &stock(1, 9)).unwrap();
        let (cart, _) = cart.with_added(&product(2, 500), &stock(2, 9)).unwrap();
        let cart = cart.with_amount(ProductId::new(1), 3, &stock(1, 9)).unwrap();

        let totals = cart.totals();
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 4);
        assert_eq!(totals.total, Money::from_cents(17990 * 3 + 500));
    }

    #[test]
    fn test_serializes_as_item_array() {
        let cart = cart_with(42, 2);
        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.starts_with('['));

        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }
}
