//! # Error Types
//!
//! Domain error taxonomy for cart mutations.
//!
//! ## Error Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                       Error Propagation                              │
//! │                                                                      │
//! │  CartError (this module)  ← cart math rejections                     │
//! │       │                                                              │
//! │       ▼                                                              │
//! │  EngineError (trolley-engine) ← adds catalog + storage failures      │
//! │       │                                                              │
//! │       ▼                                                              │
//! │  Notification sink ← severity + human message, never an exception    │
//! │                                                                      │
//! │  No cart error is ever fatal: every failed mutation is a no-op on    │
//! │  both the in-memory cart and the persisted snapshot.                 │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

/// Cart mutation rejections.
///
/// These are business-rule failures, not I/O failures; service and storage
/// errors live in their own crates and join this taxonomy at the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The target product has no entry in the cart.
    ///
    /// ## When This Occurs
    /// - Removing an id that was never added (or already removed)
    /// - Updating the quantity of an id not currently in the cart
    #[error("Product {product_id} is not in the cart")]
    NotInCart { product_id: ProductId },

    /// Adding one more unit would exceed the stock the service reported.
    ///
    /// ## When This Occurs
    /// ```text
    /// Cart entry: amount = 5
    ///      │
    ///      ▼
    /// Stock check: available = 5
    ///      │
    ///      ▼
    /// One more unit would reach 6 > 5
    ///      │
    ///      ▼
    /// InsufficientStock { available: 5, requested: 5 }
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: ProductId,
        available: i64,
        requested: i64,
    },

    /// A non-positive quantity was requested.
    ///
    /// Quantity decreases to zero never go through the update path; they
    /// are an explicit removal.
    #[error("Requested amount {requested} must be greater than zero")]
    InvalidAmount { requested: i64 },
}

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CartError::InsufficientStock {
            product_id: ProductId(3),
            available: 5,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 3: available 5, requested 5"
        );

        let err = CartError::NotInCart {
            product_id: ProductId(9),
        };
        assert_eq!(err.to_string(), "Product 9 is not in the cart");

        let err = CartError::InvalidAmount { requested: 0 };
        assert_eq!(err.to_string(), "Requested amount 0 must be greater than zero");
    }
}
