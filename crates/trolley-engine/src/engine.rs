//! # Cart Engine
//!
//! The three mutation operations and their commit discipline.
//!
//! ## Commit Discipline
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                    One Mutation, Start to Finish                     │
//! │                                                                      │
//! │  lock ──► fetch (suspends) ──► read CURRENT cart ──► compute copy    │
//! │                                                          │           │
//! │                                     ┌────────────────────┘           │
//! │                                     ▼                                │
//! │                          snapshot.save(new)  ── fails? ──► no-op,    │
//! │                                     │                      notify    │
//! │                                     ▼                                │
//! │                          store.replace(new)  (same value)            │
//! │                                     │                                │
//! │                                     ▼                                │
//! │                          notify success ──► unlock                   │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Holding the mutation lock across the fetch serializes operations into a
//! command queue: the cart an operation commits against is always the cart
//! as of its own commit, so an interleaved operation can never be silently
//! overwritten by a stale base (the lost-update race). The snapshot is
//! written before the store is replaced, with the same value, so the two
//! can only ever agree: a failed write aborts the whole commit.
//!
//! ## Error Policy
//! No failure escapes the public operations. Service outages, not-in-cart,
//! insufficient stock, invalid amounts, and snapshot write failures are all
//! translated into one notification each, and the operation leaves both the
//! store and the snapshot exactly as they were.

use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use trolley_core::{Cart, CartError, CartItem, ProductId};
use trolley_storage::SnapshotStore;

use crate::catalog::CatalogService;
use crate::error::EngineError;
use crate::notify::Notifier;
use crate::store::CartStore;

/// User-facing notification messages.
///
/// Public so host applications can match or localize them.
pub mod messages {
    pub const PRODUCT_ADDED: &str = "Product added to cart";
    pub const PRODUCT_REMOVED: &str = "Product removed from cart";
    pub const AMOUNT_UPDATED: &str = "Product quantity updated";
    pub const ADD_FAILED: &str = "Could not add the product to the cart";
    pub const REMOVE_FAILED: &str = "Could not remove the product from the cart";
    pub const UPDATE_FAILED: &str = "Could not update the product quantity";
    pub const NOT_IN_CART: &str = "Product is not in the cart";
    pub const OUT_OF_STOCK: &str = "Requested quantity is out of stock";
    pub const INVALID_AMOUNT: &str = "Requested quantity must be greater than zero";
}

/// Arguments for [`CartEngine::update_product_amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    /// Product whose cart entry is being updated.
    pub product_id: ProductId,

    /// Requested tentative quantity, validated against stock. The engine
    /// only ever adds one unit per call; see `update_product_amount`.
    pub amount: i64,
}

/// The cart mutation engine: single authoritative owner of cart state.
///
/// ## Usage
/// ```rust,ignore
/// let engine = CartEngine::initialize(catalog, snapshots, notifier).await;
///
/// engine.add_product(ProductId(1)).await;
/// engine.update_product_amount(UpdateProductAmount { product_id: ProductId(1), amount: 2 }).await;
///
/// let cart = engine.cart();                // read-only snapshot
/// let mut changes = engine.subscribe();    // change feed for the UI
/// ```
pub struct CartEngine<C, S, N> {
    catalog: C,
    snapshots: S,
    notifier: N,
    store: CartStore,

    /// Serializes mutations end to end, network fetches included, so each
    /// operation commits against the freshest cart.
    mutation_lock: Mutex<()>,
}

impl<C, S, N> CartEngine<C, S, N>
where
    C: CatalogService,
    S: SnapshotStore,
    N: Notifier,
{
    /// Starts a cart session: loads the persisted snapshot (empty on a
    /// first run or a corrupt snapshot) and seeds the store with it.
    pub async fn initialize(catalog: C, snapshots: S, notifier: N) -> Self {
        let cart = snapshots.load().await;
        info!(entries = cart.len(), "Cart session initialized");

        CartEngine {
            catalog,
            snapshots,
            notifier,
            store: CartStore::new(cart),
            mutation_lock: Mutex::new(()),
        }
    }

    /// Returns a read-only snapshot of the current cart.
    pub fn cart(&self) -> Cart {
        self.store.cart()
    }

    /// Subscribes to cart changes (one wakeup per committed mutation).
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.store.subscribe()
    }

    /// Adds one unit of `product_id` to the cart.
    ///
    /// ## Behavior
    /// - Product fetch fails or returns no usable data: error notification,
    ///   cart unchanged.
    /// - Product already in cart: becomes a one-unit quantity update, with
    ///   the update path's own stock gate, commit, and notifications.
    /// - Otherwise: the fetched record enters the cart at amount 1,
    ///   appended to a copy of the current cart, committed atomically.
    pub async fn add_product(&self, product_id: ProductId) {
        debug!(%product_id, "add_product");
        let _guard = self.mutation_lock.lock().await;

        let record = match self.catalog.fetch_product(product_id).await {
            Ok(record) => record,
            Err(err) => {
                warn!(%product_id, %err, "Product fetch failed");
                self.notifier.error(messages::ADD_FAILED);
                return;
            }
        };

        let current = self.store.cart();
        if let Some(item) = current.item(product_id) {
            let requested = item.amount + 1;
            let outcome = self.apply_update(product_id, requested).await;
            self.report_update(outcome);
            return;
        }

        let next = current.appending(CartItem::from_record(record));
        match self.commit(next).await {
            Ok(()) => self.notifier.success(messages::PRODUCT_ADDED),
            Err(err) => {
                warn!(%product_id, %err, "Product addition failed");
                self.notifier.error(messages::ADD_FAILED);
            }
        }
    }

    /// Removes the entry for `product_id` from the cart.
    ///
    /// Removing an absent id reports not-in-cart and never corrupts state;
    /// the failure is idempotent. Survivors keep their relative order.
    pub async fn remove_product(&self, product_id: ProductId) {
        debug!(%product_id, "remove_product");
        let _guard = self.mutation_lock.lock().await;

        let outcome = match self.store.cart().removing(product_id) {
            Ok(next) => self.commit(next).await,
            Err(err) => Err(EngineError::from(err)),
        };

        match outcome {
            Ok(()) => self.notifier.success(messages::PRODUCT_REMOVED),
            Err(EngineError::Cart(CartError::NotInCart { .. })) => {
                debug!(%product_id, "Removal target not in cart");
                self.notifier.error(messages::NOT_IN_CART);
            }
            Err(err) => {
                warn!(%product_id, %err, "Product removal failed");
                self.notifier.error(messages::REMOVE_FAILED);
            }
        }
    }

    /// Requests a quantity change for a product already in the cart.
    ///
    /// ## Increment-with-Stock-Gate Semantics
    /// `amount` is the requested tentative quantity, used as the stock
    /// threshold to validate against; the committed value is always the
    /// entry's current amount plus one. Every added unit is re-validated
    /// against a fresh stock read — a bulk assignment could skip per-unit
    /// validation against stale stock, so there is none.
    ///
    /// The call succeeds only when the reported stock covers both the
    /// requested amount and the incremented amount; at the stock limit
    /// (entry amount equals stock) one more unit is rejected.
    pub async fn update_product_amount(&self, request: UpdateProductAmount) {
        debug!(
            product_id = %request.product_id,
            amount = request.amount,
            "update_product_amount"
        );
        let _guard = self.mutation_lock.lock().await;

        let outcome = self.apply_update(request.product_id, request.amount).await;
        self.report_update(outcome);
    }

    /// The update path shared by `update_product_amount` and the
    /// already-in-cart branch of `add_product`. Caller holds the lock.
    async fn apply_update(&self, product_id: ProductId, requested: i64) -> Result<(), EngineError> {
        let stock = self.catalog.fetch_stock(product_id).await?;

        if requested <= 0 {
            return Err(CartError::InvalidAmount { requested }.into());
        }

        let current = self.store.cart();
        let item = current
            .item(product_id)
            .ok_or(CartError::NotInCart { product_id })?;

        // One unit per call. The gate covers both the caller's requested
        // amount and the value actually committed, so an entry can never
        // exceed the stock observed at call time.
        let new_amount = item.amount + 1;
        if stock.amount < requested || stock.amount < new_amount {
            return Err(CartError::InsufficientStock {
                product_id,
                available: stock.amount,
                requested,
            }
            .into());
        }

        self.commit(current.incrementing(product_id)?).await
    }

    /// Translates an update outcome into its notification.
    fn report_update(&self, outcome: Result<(), EngineError>) {
        match outcome {
            Ok(()) => self.notifier.success(messages::AMOUNT_UPDATED),
            Err(EngineError::Cart(CartError::InsufficientStock {
                product_id,
                available,
                requested,
            })) => {
                debug!(%product_id, available, requested, "Stock gate rejected update");
                self.notifier.error(messages::OUT_OF_STOCK);
            }
            Err(EngineError::Cart(CartError::InvalidAmount { requested })) => {
                debug!(requested, "Non-positive amount rejected");
                self.notifier.error(messages::INVALID_AMOUNT);
            }
            Err(EngineError::Cart(CartError::NotInCart { product_id })) => {
                debug!(%product_id, "Update target not in cart");
                self.notifier.error(messages::NOT_IN_CART);
            }
            Err(err) => {
                warn!(%err, "Quantity update failed");
                self.notifier.error(messages::UPDATE_FAILED);
            }
        }
    }

    /// Commits a new cart value: snapshot first, then the in-memory store,
    /// both with the same value. A failed snapshot write aborts the commit
    /// before the store is touched, so the two sides always agree.
    async fn commit(&self, next: Cart) -> Result<(), EngineError> {
        self.snapshots.save(&next).await?;
        self.store.replace(next);
        Ok(())
    }
}
