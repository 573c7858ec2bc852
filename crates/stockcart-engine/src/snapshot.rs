//! # Cart Snapshots
//!
//! Serialized form of the cart held by the Persistent Store.
//!
//! ```json
//! [
//!   {"id": 42, "title": "Shoe", "image": "https://...", "price": 17990, "amount": 2}
//! ]
//! ```
//! `price` is integer cents. Order is display order.

use tracing::{debug, warn};

use crate::ports::PersistentStore;
use stockcart_core::{Cart, CartItem};

/// Serializes a cart for storage.
pub fn encode(cart: &Cart) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(cart)
}

/// Parses stored bytes into items, without checking cart invariants.
pub fn decode(bytes: &[u8]) -> serde_json::Result<Vec<CartItem>> {
    serde_json::from_slice(bytes)
}

/// Reads the cart stored under `key`.
///
/// Never fails: a missing, unreadable or unparseable payload gives an empty
/// cart. Stored items that break the cart invariants are dropped.
pub async fn load(store: &dyn PersistentStore, key: &str) -> Cart {
    let bytes = match store.read(key).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            debug!(key = %key, "No stored cart, starting empty");
            return Cart::new();
        }
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to read stored cart, starting empty");
            return Cart::new();
        }
    };

    let items = match decode(&bytes) {
        Ok(items) => items,
        Err(e) => {
            warn!(key = %key, error = %e, "Stored cart is unreadable, starting empty");
            return Cart::new();
        }
    };

    let (cart, dropped) = Cart::normalized(items);
    for item in &dropped {
        warn!(
            product_id = %item.id,
            amount = item.amount,
            "Dropped invalid or duplicate stored cart item"
        );
    }

    debug!(key = %key, items = cart.item_count(), "Loaded stored cart");
    cart
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use stockcart_core::{Money, Product, ProductId};

    fn item(id: u64, amount: i64) -> CartItem {
        let product = Product {
            id: ProductId::new(id),
            title: "Shoe".to_string(),
            image: "shoe.jpg".to_string(),
            price: Money::from_cents(17990),
        };
        CartItem::from_product(&product, amount)
    }

    #[test]
    fn test_encoded_shape() {
        let (cart, _) = Cart::normalized(vec![item(42, 2)]);
        let json: serde_json::Value = serde_json::from_slice(&encode(&cart).unwrap()).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                {"id": 42, "title": "Shoe", "image": "shoe.jpg", "price": 17990, "amount": 2}
            ])
        );
    }

    #[tokio::test]
    async fn test_load_round_trip() {
        let (cart, _) = Cart::normalized(vec![item(1, 2), item(2, 1)]);
        let store = MemoryStore::new();
        store.write("cart", &encode(&cart).unwrap()).await.unwrap();

        assert_eq!(load(&store, "cart").await, cart);
    }

    #[tokio::test]
    async fn test_load_missing_and_unreadable() {
        let store = MemoryStore::new();
        assert!(load(&store, "cart").await.is_empty());

        store.write("cart", b"{not json").await.unwrap();
        assert!(load(&store, "cart").await.is_empty());

        store.write("cart", br#"{"id": 1}"#).await.unwrap();
        assert!(load(&store, "cart").await.is_empty());
    }

    #[tokio::test]
    async fn test_load_normalizes() {
        let stored = vec![item(1, 2), item(1, 3), item(2, 0)];
        let store = MemoryStore::new();
        store
            .write("cart", &serde_json::to_vec(&stored).unwrap())
            .await
            .unwrap();

        let cart = load(&store, "cart").await;
        assert_eq!(cart.items(), &[item(1, 2)]);
    }
}
