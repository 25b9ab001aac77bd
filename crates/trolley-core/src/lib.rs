//! # trolley-core: Pure Cart Domain for Trolley
//!
//! This crate is the **heart** of Trolley. It contains the cart data model
//! and all cart math as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                       Trolley Architecture                           │
//! │                                                                      │
//! │  ┌────────────────────────────────────────────────────────────────┐ │
//! │  │                 Presentation Layer (external)                  │ │
//! │  │        reads cart snapshots, renders, fires user intents       │ │
//! │  └───────────────────────────────┬────────────────────────────────┘ │
//! │                                  │                                   │
//! │  ┌───────────────────────────────▼────────────────────────────────┐ │
//! │  │                 trolley-engine (Mutation Engine)                │ │
//! │  │     add_product / remove_product / update_product_amount        │ │
//! │  └───────────────────────────────┬────────────────────────────────┘ │
//! │                                  │                                   │
//! │  ┌───────────────────────────────▼────────────────────────────────┐ │
//! │  │              ★ trolley-core (THIS CRATE) ★                      │ │
//! │  │                                                                 │ │
//! │  │   ┌───────────┐   ┌───────────────┐   ┌─────────────────────┐  │ │
//! │  │   │   types   │   │     cart      │   │       error         │  │ │
//! │  │   │ ProductId │   │  Cart math:   │   │  NotInCart          │  │ │
//! │  │   │  Record   │   │  appending    │   │  InsufficientStock  │  │ │
//! │  │   │  Stock    │   │  removing     │   │  InvalidAmount      │  │ │
//! │  │   └───────────┘   │  incrementing │   └─────────────────────┘  │ │
//! │  │                   └───────────────┘                             │ │
//! │  │   NO I/O • NO NETWORK • NO FILESYSTEM • PURE FUNCTIONS          │ │
//! │  └────────────────────────────────────────────────────────────────┘ │
//! │                                  │                                   │
//! │  ┌───────────────────────────────▼────────────────────────────────┐ │
//! │  │               trolley-storage (Persistence Adapter)             │ │
//! │  │             serialized snapshot, load/save, fail-soft           │ │
//! │  └────────────────────────────────────────────────────────────────┘ │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductId, ProductRecord, Stock)
//! - [`cart`] - Cart and CartItem with pure copy-producing operations
//! - [`error`] - Domain error taxonomy
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every cart operation returns a NEW cart value;
//!    nothing here mutates shared state
//! 2. **No I/O**: network, file system, and async code are FORBIDDEN here
//! 3. **Explicit Errors**: all errors are typed enum variants, never strings
//! 4. **Snapshot = Cart**: the cart serializes as a plain JSON array, which
//!    is exactly the persisted snapshot format

pub mod cart;
pub mod error;
pub mod types;

// Re-exports for convenience: `use trolley_core::Cart` instead of
// `use trolley_core::cart::Cart`.
pub use cart::{Cart, CartItem};
pub use error::{CartError, CartResult};
pub use types::{ProductId, ProductRecord, Stock};
