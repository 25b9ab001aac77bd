//! # Cart Store
//!
//! Reactive in-memory container for the current cart: the single source of
//! truth for what a presentation layer shows.
//!
//! ## Whole-Value Replacement Only
//! The store exposes no partial mutations. The engine computes a complete
//! new cart and swaps it in with [`CartStore::replace`]; readers either see
//! the old value or the new one. This is what keeps the store and the
//! persisted snapshot from ever diverging: both are written with the same
//! value in one logical commit step.

use tokio::sync::watch;

use trolley_core::Cart;

/// Reactive state container holding the current cart.
///
/// Built on a `watch` channel: `replace` publishes the latest cart and
/// wakes every subscriber, which is exactly the "notify the presentation
/// layer of the new snapshot" contract. Slow subscribers only ever observe
/// the most recent value, never a backlog.
#[derive(Debug)]
pub struct CartStore {
    tx: watch::Sender<Cart>,
}

impl CartStore {
    /// Creates a store holding `initial` (typically the loaded snapshot).
    pub fn new(initial: Cart) -> Self {
        let (tx, _rx) = watch::channel(initial);
        CartStore { tx }
    }

    /// Returns a clone of the current cart.
    ///
    /// Reads are snapshots by value; holding one never blocks a commit.
    pub fn cart(&self) -> Cart {
        self.tx.borrow().clone()
    }

    /// Atomically swaps in the new cart and wakes subscribers.
    pub fn replace(&self, next: Cart) {
        self.tx.send_replace(next);
    }

    /// Subscribes to cart changes.
    ///
    /// The receiver immediately holds the current value and is marked
    /// changed on every replace.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.tx.subscribe()
    }
}

impl Default for CartStore {
    fn default() -> Self {
        CartStore::new(Cart::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trolley_core::{CartItem, ProductRecord};

    fn one_item_cart(id: u64) -> Cart {
        std::iter::once(CartItem::from_record(ProductRecord::bare(id))).collect()
    }

    #[tokio::test]
    async fn test_replace_swaps_whole_value() {
        let store = CartStore::default();
        assert!(store.cart().is_empty());

        store.replace(one_item_cart(1));
        assert_eq!(store.cart(), one_item_cart(1));
    }

    #[tokio::test]
    async fn test_subscribers_wake_on_replace() {
        let store = CartStore::default();
        let mut rx = store.subscribe();

        store.replace(one_item_cart(2));

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), one_item_cart(2));
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_current_value() {
        let store = CartStore::new(one_item_cart(3));
        let rx = store.subscribe();
        assert_eq!(*rx.borrow(), one_item_cart(3));
    }
}
