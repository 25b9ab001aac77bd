//! # Snapshot Store
//!
//! The persistence adapter: load/save of the serialized cart.
//!
//! ## Implementations
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                      SnapshotStore (trait)                           │
//! │                                                                      │
//! │   load() -> Cart                 fail-soft: missing/corrupt → empty  │
//! │   save(&Cart) -> Result          whole-snapshot replace              │
//! │             │                                                        │
//! │     ┌───────┴────────────┐                                           │
//! │     ▼                    ▼                                           │
//! │  JsonSnapshotStore    MemorySnapshotStore                            │
//! │  one JSON file,       in-memory slot with an                         │
//! │  temp + rename        injectable save failure                        │
//! │  (crash-safe)         (engine tests)                                 │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Validation on Load
//! Deserialization is typed, and the parsed cart must additionally pass
//! [`Cart::is_well_formed`] (unique ids, amounts >= 1). Anything else is
//! treated as corruption: logged at WARN, replaced with an empty cart.
//! Persisted bytes are never trusted as-is.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use directories::ProjectDirs;
use tracing::{debug, warn};

use trolley_core::Cart;

use crate::error::{StorageError, StorageResult};

/// Fixed storage key: the snapshot file name inside the store directory.
pub const SNAPSHOT_FILE: &str = "cart.json";

/// Persistence adapter for the cart snapshot.
///
/// `save` is always invoked together with the in-memory replace carrying
/// the same cart value; the adapter itself never mutates carts.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Loads the persisted cart.
    ///
    /// Fails soft: a missing, unreadable, unparseable, or structurally
    /// invalid snapshot yields an empty cart. Never errors, never panics.
    async fn load(&self) -> Cart;

    /// Serializes `cart` and replaces the entire snapshot with it.
    async fn save(&self, cart: &Cart) -> StorageResult<()>;
}

// =============================================================================
// JSON File Store
// =============================================================================

/// File-backed snapshot store: one JSON document at a fixed path.
///
/// ## Crash Safety
/// `save` writes to a sibling temp file and renames it over the snapshot.
/// The rename is atomic on the platforms we target, so readers observe
/// either the old snapshot or the new one, never a torn write.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    /// Creates a store keeping the snapshot under `dir`, at the fixed
    /// [`SNAPSHOT_FILE`] name.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        JsonSnapshotStore {
            path: dir.as_ref().join(SNAPSHOT_FILE),
        }
    }

    /// Creates a store at the platform data directory.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.trolley.cart/cart.json`
    /// - **Windows**: `%APPDATA%\trolley\cart\data\cart.json`
    /// - **Linux**: `~/.local/share/trolley-cart/cart.json`
    ///
    /// ## Development Override
    /// Set `TROLLEY_DATA_DIR` to use a custom directory.
    pub fn at_default_location() -> StorageResult<Self> {
        if let Ok(dir) = std::env::var("TROLLEY_DATA_DIR") {
            return Ok(JsonSnapshotStore::new(dir));
        }

        let dirs = ProjectDirs::from("com", "trolley", "cart").ok_or(StorageError::NoDataDir)?;
        Ok(JsonSnapshotStore::new(dirs.data_dir()))
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotStore for JsonSnapshotStore {
    async fn load(&self) -> Cart {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No snapshot yet, starting empty");
                return Cart::new();
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "Snapshot unreadable, starting empty");
                return Cart::new();
            }
        };

        match serde_json::from_slice::<Cart>(&bytes) {
            Ok(cart) if cart.is_well_formed() => {
                debug!(entries = cart.len(), "Snapshot loaded");
                cart
            }
            Ok(_) => {
                warn!(
                    path = %self.path.display(),
                    "Snapshot violates cart invariants, starting empty"
                );
                Cart::new()
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "Snapshot unparseable, starting empty");
                Cart::new()
            }
        }
    }

    async fn save(&self, cart: &Cart) -> StorageResult<()> {
        let bytes = serde_json::to_vec(cart)?;

        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        // Write-then-rename so a crash mid-write never leaves a torn
        // snapshot at the fixed key.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(entries = cart.len(), path = %self.path.display(), "Snapshot saved");
        Ok(())
    }
}

// =============================================================================
// In-Memory Store
// =============================================================================

#[derive(Debug, Default)]
struct MemorySlot {
    cart: Option<Cart>,
    fail_on_save: bool,
}

/// In-memory snapshot store for tests.
///
/// Holds the last saved cart in a slot and can be told to reject the next
/// saves, which is how the engine's no-partial-commit behavior is
/// exercised.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    slot: Arc<Mutex<MemorySlot>>,
}

impl MemorySnapshotStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a snapshot, as if a previous
    /// session had saved it.
    pub fn seeded(cart: Cart) -> Self {
        let store = Self::new();
        store.slot.lock().unwrap().cart = Some(cart);
        store
    }

    /// Configures whether save calls fail.
    pub fn set_fail_on_save(&self, fail: bool) {
        self.slot.lock().unwrap().fail_on_save = fail;
    }

    /// Returns the currently persisted cart, if any save succeeded.
    pub fn persisted(&self) -> Option<Cart> {
        self.slot.lock().unwrap().cart.clone()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self) -> Cart {
        self.slot.lock().unwrap().cart.clone().unwrap_or_default()
    }

    async fn save(&self, cart: &Cart) -> StorageResult<()> {
        let mut slot = self.slot.lock().unwrap();
        if slot.fail_on_save {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "injected save failure",
            )));
        }
        slot.cart = Some(cart.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trolley_core::{CartItem, ProductRecord};

    fn cart_with(ids: &[u64]) -> Cart {
        ids.iter()
            .map(|&id| CartItem::from_record(ProductRecord::bare(id)))
            .collect()
    }

    #[tokio::test]
    async fn test_load_missing_snapshot_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path());

        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path());
        let cart = cart_with(&[1, 2]);

        store.save(&cart).await.unwrap();
        assert_eq!(store.load().await, cart);
    }

    #[tokio::test]
    async fn test_save_replaces_prior_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path());

        store.save(&cart_with(&[1, 2])).await.unwrap();
        store.save(&cart_with(&[3])).await.unwrap();

        assert_eq!(store.load().await, cart_with(&[3]));
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path());

        tokio::fs::write(store.path(), b"{not json").await.unwrap();
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_shape_snapshot_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path());

        // Parses as JSON but not as a cart.
        tokio::fs::write(store.path(), br#"{"cart": []}"#).await.unwrap();
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_invariant_violating_snapshot_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path());

        // Duplicate ids parse fine but are not a valid cart.
        tokio::fs::write(
            store.path(),
            br#"[{"id":1,"amount":1},{"id":1,"amount":2}]"#,
        )
        .await
        .unwrap();
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_save_failure_keeps_prior_snapshot() {
        let store = MemorySnapshotStore::new();
        store.save(&cart_with(&[1])).await.unwrap();

        store.set_fail_on_save(true);
        assert!(store.save(&cart_with(&[1, 2])).await.is_err());

        assert_eq!(store.persisted(), Some(cart_with(&[1])));
    }

    #[tokio::test]
    async fn test_memory_store_seeded_loads_seed() {
        let store = MemorySnapshotStore::seeded(cart_with(&[7]));
        assert_eq!(store.load().await, cart_with(&[7]));
    }
}
