//! # Cart Engine
//!
//! Owns the in-memory cart and runs every operation against it.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Cart Operation                                   │
//! │                                                                         │
//! │  add_product(42)                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lock cart ◄──────────── other operations wait here                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  try_join!(product(42), stock(42))      lookups run concurrently        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Cart::with_added(...)                  pure rule, new snapshot         │
//! │       │                                                                 │
//! │       ├── Err(StockExceeded) ──► notice "out of stock"                  │
//! │       ├── Err(Lookup)        ──► notice "failed to add product"         │
//! │       ├── Err(FloorGuard / AbsentItem) ──► nothing                      │
//! │       ▼                                                                 │
//! │  swap in new snapshot, store.write(key, json)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  publish snapshot (watch) + CartChange, unlock                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency
//! - The lock is held from the first lookup to the store write, so two
//!   operations never decide against the same pre-mutation snapshot.
//! - Rejections never touch the cart or the store.
//! - A failed store write is logged; the in-memory cart stays authoritative.
//! - Reads (`cart`, `snapshot`, `totals`, `watch`) go through a
//!   `watch` channel holding the last committed cart. They never wait for
//!   the lock, so a slow lookup cannot stall them.
//! - A committed cart becomes visible to readers after its store write.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{broadcast, watch, Mutex};
use tracing::{debug, error, info, warn};

use crate::events::{CartChange, EventBus};
use crate::ports::{NotificationSink, PersistentStore, ProductLookup, StockLookup};
use crate::snapshot;
use stockcart_core::validation::{validate_product, validate_stock};
use stockcart_core::{
    Cart, CartError, CartItem, CartTotals, ChangeKind, CoreResult, LookupError, Notice,
    NoticeMessages, Operation, Product, ProductId, StockInfo, UpdateProductAmount,
    DEFAULT_CART_KEY,
};

/// A decided mutation, or `None` for a no-op.
type Decision = CoreResult<Option<(Cart, ChangeKind)>>;

// =============================================================================
// Builder
// =============================================================================

/// Collects collaborators and settings, then loads the stored cart.
///
/// ## Example
/// ```rust,ignore
/// let catalog = Arc::new(MemoryCatalog::new());
/// let engine = CartEngine::builder(
///     catalog.clone(),
///     catalog,
///     Arc::new(MemoryStore::new()),
///     Arc::new(TracingNotifier),
/// )
/// .key("shop:cart")
/// .build()
/// .await;
/// ```
pub struct CartEngineBuilder {
    products: Arc<dyn ProductLookup>,
    stock: Arc<dyn StockLookup>,
    store: Arc<dyn PersistentStore>,
    notifier: Arc<dyn NotificationSink>,
    messages: NoticeMessages,
    key: String,
}

impl CartEngineBuilder {
    /// Notice texts (defaults to English).
    pub fn messages(mut self, messages: NoticeMessages) -> Self {
        self.messages = messages;
        self
    }

    /// Storage key for the cart snapshot (defaults to `stockcart:cart`).
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Reads the stored cart and returns a ready engine. Never fails: an
    /// absent or unreadable snapshot starts an empty cart.
    pub async fn build(self) -> CartEngine {
        let cart = snapshot::load(self.store.as_ref(), &self.key).await;

        info!(
            key = %self.key,
            items = cart.item_count(),
            "Cart engine ready"
        );

        let (committed, _) = watch::channel(cart.clone());

        CartEngine {
            products: self.products,
            stock: self.stock,
            store: self.store,
            notifier: self.notifier,
            messages: self.messages,
            key: self.key,
            cart: Mutex::new(cart),
            committed,
            events: EventBus::new(),
        }
    }
}

// =============================================================================
// Engine
// =============================================================================

/// The cart, its collaborators, and the operations that change it.
///
/// Share it between tasks with `Arc<CartEngine>`; operations are serialised
/// internally.
pub struct CartEngine {
    products: Arc<dyn ProductLookup>,
    stock: Arc<dyn StockLookup>,
    store: Arc<dyn PersistentStore>,
    notifier: Arc<dyn NotificationSink>,
    messages: NoticeMessages,
    key: String,

    /// Single writer: held for the whole of each operation.
    cart: Mutex<Cart>,
    /// Last committed cart, for readers.
    committed: watch::Sender<Cart>,
    events: EventBus,
}

impl CartEngine {
    pub fn builder(
        products: Arc<dyn ProductLookup>,
        stock: Arc<dyn StockLookup>,
        store: Arc<dyn PersistentStore>,
        notifier: Arc<dyn NotificationSink>,
    ) -> CartEngineBuilder {
        CartEngineBuilder {
            products,
            stock,
            store,
            notifier,
            messages: NoticeMessages::default(),
            key: DEFAULT_CART_KEY.to_string(),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current items, in display order.
    pub fn cart(&self) -> Vec<CartItem> {
        self.committed.borrow().items().to_vec()
    }

    /// Current cart snapshot.
    pub fn snapshot(&self) -> Cart {
        self.committed.borrow().clone()
    }

    pub fn totals(&self) -> CartTotals {
        self.committed.borrow().totals()
    }

    /// Receives every committed cart; `borrow()` is always the latest.
    pub fn watch(&self) -> watch::Receiver<Cart> {
        self.committed.subscribe()
    }

    /// Receives a [`CartChange`] for every successful mutation from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<CartChange> {
        self.events.subscribe()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Adds one unit of a product, bounded by its current stock.
    pub async fn add_product(&self, product_id: ProductId) {
        debug!(product_id = %product_id, "add_product");

        let mut cart = self.cart.lock().await;
        let decision = self.decide_add(&cart, product_id).await;
        self.settle(&mut cart, Operation::Add, product_id, decision)
            .await;
    }

    /// Removes a product from the cart once the catalog confirms it exists.
    pub async fn remove_product(&self, product_id: ProductId) {
        debug!(product_id = %product_id, "remove_product");

        let mut cart = self.cart.lock().await;
        let decision = self.decide_remove(&cart, product_id).await;
        self.settle(&mut cart, Operation::Remove, product_id, decision)
            .await;
    }

    /// Sets the amount of a product already in the cart.
    pub async fn update_product_amount(&self, request: UpdateProductAmount) {
        let UpdateProductAmount { product_id, amount } = request;
        debug!(product_id = %product_id, amount = amount, "update_product_amount");

        let mut cart = self.cart.lock().await;
        let decision = self.decide_update(&cart, product_id, amount).await;
        self.settle(&mut cart, Operation::Update, product_id, decision)
            .await;
    }

    // =========================================================================
    // Decisions
    // =========================================================================

    async fn decide_add(&self, cart: &Cart, product_id: ProductId) -> Decision {
        let (product, stock) = tokio::try_join!(
            self.fetch_product(product_id),
            self.fetch_stock(product_id)
        )
        .map_err(|e| CartError::lookup(Operation::Add, product_id, e))?;

        cart.with_added(&product, &stock).map(Some)
    }

    async fn decide_remove(&self, cart: &Cart, product_id: ProductId) -> Decision {
        self.fetch_product(product_id)
            .await
            .map_err(|e| CartError::lookup(Operation::Remove, product_id, e))?;

        Ok(cart
            .without(product_id)
            .map(|next| (next, ChangeKind::Removed)))
    }

    async fn decide_update(&self, cart: &Cart, product_id: ProductId, amount: i64) -> Decision {
        let lookup = |e: LookupError| CartError::lookup(Operation::Update, product_id, e);

        self.fetch_product(product_id).await.map_err(lookup)?;
        let stock = self.fetch_stock(product_id).await.map_err(lookup)?;

        cart.with_amount(product_id, amount, &stock)
            .map(|next| Some((next, ChangeKind::AmountUpdated)))
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Product, LookupError> {
        let product = self.products.product(id).await?;
        validate_product(&product, id)?;
        Ok(product)
    }

    async fn fetch_stock(&self, id: ProductId) -> Result<StockInfo, LookupError> {
        let stock = self.stock.stock(id).await?;
        validate_stock(&stock, id)?;
        Ok(stock)
    }

    // =========================================================================
    // Commit
    // =========================================================================

    /// Applies a decision: commit + persist + publish, or report.
    async fn settle(
        &self,
        cart: &mut Cart,
        operation: Operation,
        product_id: ProductId,
        decision: Decision,
    ) {
        let (next, kind) = match decision {
            Ok(Some(change)) => change,
            Ok(None) => {
                debug!(product_id = %product_id, %operation, "Nothing to change");
                return;
            }
            Err(err) if err.is_silent() => {
                debug!(error = %err, %operation, "Ignored");
                return;
            }
            Err(err) => {
                warn!(error = %err, %operation, "Cart operation rejected");
                if let Some(notice) = Notice::for_error(&err) {
                    self.notifier.warn(self.messages.text(notice));
                }
                return;
            }
        };

        let item = match kind {
            ChangeKind::Removed => cart.get(product_id).cloned(),
            _ => next.get(product_id).cloned(),
        };

        *cart = next;
        info!(
            product_id = %product_id,
            ?kind,
            amount = item.as_ref().map(|i| i.amount),
            items = cart.item_count(),
            "Cart updated"
        );

        self.persist(cart).await;
        self.committed.send_replace(cart.clone());

        if let Some(item) = item {
            self.events.publish(CartChange {
                kind,
                product_id,
                item,
                at: Utc::now(),
            });
        }
    }

    async fn persist(&self, cart: &Cart) {
        let bytes = match snapshot::encode(cart) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(error = %e, "Failed to encode cart snapshot");
                return;
            }
        };

        if let Err(e) = self.store.write(&self.key, &bytes).await {
            error!(key = %self.key, error = %e, "Failed to persist cart");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
