//! # Change Events
//!
//! Every successful cart mutation is published on a broadcast channel so
//! views can re-render without polling.
//!
//! ```text
//! add_product(42) ──► cart updated ──► snapshot written ──► CartChange
//!                                                            │
//!                        ┌───────────────────────────────────┼──────────┐
//!                        ▼                                   ▼          ▼
//!                   header badge                         cart page    logs
//! ```
//!
//! Rejected operations and no-ops publish nothing. A receiver that falls
//! more than [`EVENT_CAPACITY`] events behind gets `RecvError::Lagged` and
//! should re-read the cart.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::trace;

use stockcart_core::{CartItem, ChangeKind, ProductId};

/// Buffered events per receiver before it lags.
pub const EVENT_CAPACITY: usize = 64;

/// A committed cart mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartChange {
    pub kind: ChangeKind,
    pub product_id: ProductId,

    /// The item after the change; for `Removed`, the item that left.
    pub item: CartItem,

    pub at: DateTime<Utc>,
}

/// Sender side of the change channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<CartChange>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        EventBus { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CartChange> {
        self.tx.subscribe()
    }

    /// Publishes to current subscribers. Having none is not an error.
    pub fn publish(&self, change: CartChange) {
        let receivers = self.tx.send(change).unwrap_or(0);
        trace!(receivers = receivers, "Published cart change");
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockcart_core::{Money, Product};

    fn change(kind: ChangeKind) -> CartChange {
        let product = Product {
            id: ProductId::new(1),
            title: "Shoe".to_string(),
            image: String::new(),
            price: Money::from_cents(100),
        };
        CartChange {
            kind,
            product_id: product.id,
            item: CartItem::from_product(&product, 1),
            at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_publish_without_subscribers() {
        EventBus::new().publish(change(ChangeKind::Added));
    }

    #[tokio::test]
    async fn test_lagging_receiver() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        for _ in 0..EVENT_CAPACITY + 1 {
            bus.publish(change(ChangeKind::Incremented));
        }

        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Lagged(1))
        ));
        assert_eq!(rx.recv().await.unwrap().kind, ChangeKind::Incremented);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(change(ChangeKind::Added)).unwrap();
        assert_eq!(json["kind"], "added");
        assert_eq!(json["productId"], 1);
        assert_eq!(json["item"]["amount"], 1);
    }
}
