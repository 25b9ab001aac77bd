//! # trolley-storage: Snapshot Persistence
//!
//! Durable local storage for the cart: a single fixed-key slot holding the
//! serialized cart, read once at session start and rewritten in full on
//! every successful mutation.
//!
//! ## Snapshot Lifecycle
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                       Snapshot Lifecycle                             │
//! │                                                                      │
//! │  Session start ──► load() ──► Cart (or empty on missing/corrupt)     │
//! │                                                                      │
//! │  Every successful mutation:                                          │
//! │      engine commit ──► save(new cart) ──► whole snapshot replaced    │
//! │                                                                      │
//! │  The snapshot outlives the session; it is only ever equal to a cart  │
//! │  value that was fully committed in memory (no partial writes).       │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fail-Soft Loads
//! A missing, unreadable, unparseable, or structurally invalid snapshot
//! must never crash initialization: [`SnapshotStore::load`] logs the
//! problem and returns an empty cart instead.

pub mod error;
pub mod snapshot;

pub use error::{StorageError, StorageResult};
pub use snapshot::{JsonSnapshotStore, MemorySnapshotStore, SnapshotStore, SNAPSHOT_FILE};
