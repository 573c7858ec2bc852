//! # Cart Commands
//!
//! ## Output
//! ```text
//! $ stockcart add 1
//! {
//!   "items": [
//!     { "id": 1, "title": "Tênis de Caminhada Leve Confortável",
//!       "image": "https://...", "price": 17990, "amount": 1 }
//!   ],
//!   "totals": { "itemCount": 1, "totalQuantity": 1, "total": 17990 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::AppState;
use stockcart_core::{Cart, CartItem, CartTotals, ProductId, UpdateProductAmount};

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: cart.totals(),
        }
    }
}

fn current(state: &AppState) -> CartResponse {
    CartResponse::from(&state.engine().snapshot())
}

pub fn show(state: &AppState) -> CartResponse {
    debug!("show command");
    current(state)
}

pub async fn add(state: &AppState, product_id: ProductId) -> CartResponse {
    debug!(product_id = %product_id, "add command");
    state.engine().add_product(product_id).await;
    current(state)
}

pub async fn remove(state: &AppState, product_id: ProductId) -> CartResponse {
    debug!(product_id = %product_id, "remove command");
    state.engine().remove_product(product_id).await;
    current(state)
}

pub async fn update(state: &AppState, product_id: ProductId, amount: i64) -> CartResponse {
    debug!(product_id = %product_id, amount = amount, "update command");
    state
        .engine()
        .update_product_amount(UpdateProductAmount { product_id, amount })
        .await;
    current(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockcart_core::{Money, Product};
    use stockcart_engine::{CartConfig, StoreBackend};

    async fn state_with_catalog() -> (AppState, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!("stockcart-cli-{}", uuid::Uuid::new_v4()));
        let mut config = CartConfig::default();
        config.storage.backend = StoreBackend::Memory;
        config.storage.database_path = Some(dir.join("catalog.db"));

        let state = AppState::from_config(&config).await.unwrap();
        let catalog = state.session().database().unwrap().catalog();
        for (id, stock) in [(1u64, 2i64), (2, 0)] {
            let product = Product {
                id: ProductId::new(id),
                title: format!("Shoe {}", id),
                image: String::new(),
                price: Money::from_cents(17990),
            };
            catalog.upsert_product(&product).await.unwrap();
            catalog.set_stock(product.id, stock).await.unwrap();
        }

        (state, dir)
    }

    #[tokio::test]
    async fn test_commands() {
        let (state, dir) = state_with_catalog().await;
        let id = ProductId::new(1);

        assert!(show(&state).items.is_empty());

        let response = add(&state, id).await;
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.totals.total, Money::from_cents(17990));

        let response = update(&state, id, 2).await;
        assert_eq!(response.totals.total_quantity, 2);
        assert_eq!(response.totals.total, Money::from_cents(35980));
        assert!(state.notices().is_empty());

        let response = remove(&state, id).await;
        assert!(response.items.is_empty());

        state.close().await;
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_rejection_is_reported_as_notice() {
        let (state, dir) = state_with_catalog().await;

        let response = add(&state, ProductId::new(2)).await;

        assert!(response.items.is_empty());
        assert_eq!(state.notices(), vec!["Requested quantity is out of stock"]);

        state.close().await;
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_response_shape() {
        let json = serde_json::to_value(CartResponse::from(&Cart::new())).unwrap();
        assert_eq!(json["items"], serde_json::json!([]));
        assert_eq!(json["totals"]["itemCount"], 0);
        assert_eq!(json["totals"]["total"], 0);
    }
}
