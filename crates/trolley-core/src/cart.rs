//! # Cart
//!
//! The ordered line-item collection and its pure operations.
//!
//! ## Copy-and-Replace, Never Mutate-in-Place
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                     Cart Value Discipline                            │
//! │                                                                      │
//! │  current cart ──► appending / removing / incrementing ──► NEW cart   │
//! │       ▲                                                      │       │
//! │       │                                                      ▼       │
//! │       │             engine commits the whole new value               │
//! │       └──── (snapshot save + store replace, one logical step) ◄──┘   │
//! │                                                                      │
//! │  The current cart is never edited while readers can observe it, so   │
//! │  a failed commit leaves no half-applied state behind.                │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Entries are unique by product id
//! - Every entry amount is >= 1 (zero-amount entries are removals)
//! - New entries append at the end; updates preserve relative order

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CartError, CartResult};
use crate::types::{ProductId, ProductRecord};

/// A line item in the shopping cart.
///
/// Carries the product identity, the quantity currently in the cart, and
/// the opaque display fields the product service sent when the entry was
/// created. Display fields are frozen at add time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identity.
    pub id: ProductId,

    /// Quantity in cart. Always >= 1 in a well-formed cart.
    pub amount: i64,

    /// Opaque display fields, passed through from the product service.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl CartItem {
    /// Creates a cart line from a service record, at quantity 1.
    ///
    /// A product always enters the cart at one unit; further units go
    /// through the stock-gated update path, one per call.
    pub fn from_record(record: ProductRecord) -> Self {
        CartItem {
            id: record.id,
            amount: 1,
            details: record.details,
        }
    }
}

/// The shopping cart: an ordered sequence of [`CartItem`], unique by id.
///
/// Serializes transparently as a JSON array of items, which is exactly the
/// persisted snapshot format.
///
/// All operations below are pure: they borrow `self` and produce a new
/// `Cart`, leaving the original untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Returns the entry for `id`, if present.
    pub fn item(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns true if the cart holds an entry for `id`.
    pub fn contains(&self, id: ProductId) -> bool {
        self.item(id).is_some()
    }

    /// The line items, in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart has no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all entries.
    pub fn total_units(&self) -> i64 {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// Returns a copy of the cart with `item` appended at the end.
    ///
    /// The caller is responsible for only appending ids that are absent;
    /// the engine checks presence (and delegates to the increment path)
    /// before calling this.
    pub fn appending(&self, item: CartItem) -> Cart {
        debug_assert!(
            !self.contains(item.id),
            "appending would duplicate product {}",
            item.id
        );
        let mut items = self.items.clone();
        items.push(item);
        Cart { items }
    }

    /// Returns a copy of the cart without the entry for `id`.
    ///
    /// ## Errors
    /// [`CartError::NotInCart`] when no entry matched — detected the same
    /// way the removal is performed, by comparing filtered length against
    /// the original. Failing removals are idempotent: the cart is never
    /// touched.
    pub fn removing(&self, id: ProductId) -> CartResult<Cart> {
        let items: Vec<CartItem> = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();

        if items.len() == self.items.len() {
            return Err(CartError::NotInCart { product_id: id });
        }

        Ok(Cart { items })
    }

    /// Returns a copy of the cart with the entry for `id` raised by
    /// exactly one unit, order preserved.
    ///
    /// ## Errors
    /// [`CartError::NotInCart`] when the entry is absent.
    pub fn incrementing(&self, id: ProductId) -> CartResult<Cart> {
        if !self.contains(id) {
            return Err(CartError::NotInCart { product_id: id });
        }

        let items = self
            .items
            .iter()
            .map(|item| {
                if item.id == id {
                    CartItem {
                        amount: item.amount + 1,
                        ..item.clone()
                    }
                } else {
                    item.clone()
                }
            })
            .collect();

        Ok(Cart { items })
    }

    /// Checks the structural invariants: unique ids, all amounts >= 1.
    ///
    /// Used by the snapshot loader to reject persisted data that parses
    /// but does not describe a valid cart (the loader falls back to an
    /// empty cart rather than trusting it).
    pub fn is_well_formed(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.items
            .iter()
            .all(|item| item.amount >= 1 && seen.insert(item.id))
    }
}

impl FromIterator<CartItem> for Cart {
    fn from_iter<I: IntoIterator<Item = CartItem>>(iter: I) -> Self {
        Cart {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: u64, title: &str) -> ProductRecord {
        ProductRecord::bare(id).with_detail("title", title)
    }

    fn cart_of(entries: &[(u64, i64)]) -> Cart {
        entries
            .iter()
            .map(|&(id, amount)| CartItem {
                id: ProductId(id),
                amount,
                details: Map::new(),
            })
            .collect()
    }

    #[test]
    fn test_from_record_enters_at_one_unit() {
        let item = CartItem::from_record(record(1, "Shoe"));
        assert_eq!(item.id, ProductId(1));
        assert_eq!(item.amount, 1);
        assert_eq!(item.details.get("title"), Some(&json!("Shoe")));
    }

    #[test]
    fn test_appending_leaves_original_untouched() {
        let cart = cart_of(&[(1, 1)]);
        let next = cart.appending(CartItem::from_record(record(2, "Cap")));

        assert_eq!(cart.len(), 1);
        assert_eq!(next.len(), 2);
        // New entries land at the end.
        assert_eq!(next.items()[1].id, ProductId(2));
    }

    #[test]
    fn test_removing_present_id_drops_only_that_entry() {
        let cart = cart_of(&[(1, 1), (2, 3), (3, 2)]);
        let next = cart.removing(ProductId(2)).unwrap();

        assert_eq!(next.len(), 2);
        // Survivors keep their relative order.
        assert_eq!(next.items()[0].id, ProductId(1));
        assert_eq!(next.items()[1].id, ProductId(3));
        assert_eq!(cart.len(), 3);
    }

    #[test]
    fn test_removing_absent_id_is_not_in_cart() {
        let cart = cart_of(&[(1, 1)]);
        let err = cart.removing(ProductId(2)).unwrap_err();
        assert_eq!(
            err,
            CartError::NotInCart {
                product_id: ProductId(2)
            }
        );
        assert_eq!(cart, cart_of(&[(1, 1)]));
    }

    #[test]
    fn test_incrementing_raises_by_exactly_one() {
        let cart = cart_of(&[(1, 1), (2, 4)]);
        let next = cart.incrementing(ProductId(2)).unwrap();

        assert_eq!(next.item(ProductId(2)).unwrap().amount, 5);
        assert_eq!(next.item(ProductId(1)).unwrap().amount, 1);
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn test_incrementing_absent_id_is_not_in_cart() {
        let cart = Cart::new();
        assert_eq!(
            cart.incrementing(ProductId(1)).unwrap_err(),
            CartError::NotInCart {
                product_id: ProductId(1)
            }
        );
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let cart = cart_of(&[(1, 2)]);
        let value = serde_json::to_value(&cart).unwrap();
        assert_eq!(value, json!([{ "id": 1, "amount": 2 }]));
    }

    #[test]
    fn test_well_formed_rejects_duplicates_and_zero_amounts() {
        assert!(cart_of(&[(1, 1), (2, 5)]).is_well_formed());
        assert!(!cart_of(&[(1, 1), (1, 2)]).is_well_formed());
        assert!(!cart_of(&[(1, 0)]).is_well_formed());
        assert!(Cart::new().is_well_formed());
    }

    #[test]
    fn test_total_units_sums_amounts() {
        assert_eq!(cart_of(&[(1, 2), (2, 3)]).total_units(), 5);
        assert_eq!(Cart::new().total_units(), 0);
    }
}
