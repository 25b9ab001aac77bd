//! # trolley-engine: Cart Mutation Engine
//!
//! The single authoritative owner of the shopping cart. Presentation layers
//! read snapshots and subscribe to changes; every write goes through the
//! engine's three operations.
//!
//! ## Control Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                      Mutation Control Flow                           │
//! │                                                                      │
//! │  caller ──► add_product / remove_product / update_product_amount     │
//! │                │                                                     │
//! │                ▼                                                     │
//! │  ┌──────────────────────────────────────────────────────────────┐   │
//! │  │  1. Acquire the mutation lock (whole operation, fetch incl.) │   │
//! │  │  2. Fetch product/stock from the CatalogService (may fail)   │   │
//! │  │  3. Compute the new cart from the CURRENT store value        │   │
//! │  │  4. Commit: snapshot save, then store replace (same value)   │   │
//! │  │  5. Report success/error to the Notifier                     │   │
//! │  └──────────────────────────────────────────────────────────────┘   │
//! │                │                                                     │
//! │                ▼                                                     │
//! │  subscribers wake with the new cart snapshot                         │
//! │                                                                      │
//! │  Every failure (service down, not in cart, out of stock, invalid     │
//! │  amount, snapshot write) is recovered here: a notification fires     │
//! │  and neither the store nor the snapshot changes.                     │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! ```text
//! trolley_engine/
//! ├── lib.rs       ◄─── You are here (exports)
//! ├── engine.rs    ◄─── CartEngine: the three mutation operations
//! ├── store.rs     ◄─── CartStore: reactive whole-value state container
//! ├── catalog.rs   ◄─── CatalogService seam + in-memory implementation
//! ├── notify.rs    ◄─── Notifier seam + tracing/recording implementations
//! └── error.rs     ◄─── EngineError: unified internal error type
//! ```

pub mod catalog;
pub mod engine;
pub mod error;
pub mod notify;
pub mod store;

pub use catalog::{CatalogError, CatalogService, InMemoryCatalog};
pub use engine::{messages, CartEngine, UpdateProductAmount};
pub use error::EngineError;
pub use notify::{Notifier, RecordingNotifier, Severity, TracingNotifier};
pub use store::CartStore;
