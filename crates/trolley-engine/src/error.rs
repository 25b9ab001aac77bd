//! Unified engine error.
//!
//! Internal only: public mutation operations never return errors. Each
//! failure is translated into a notification and the operation becomes a
//! no-op on cart state. This type exists so the internal paths can use `?`
//! across the three layers and the reporting code can match on the kind.

use thiserror::Error;

use trolley_core::CartError;
use trolley_storage::StorageError;

use crate::catalog::CatalogError;

/// Any failure a mutation operation can hit.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Cart rule rejection (not in cart, out of stock, invalid amount).
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Product/stock service failure or unusable response.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Snapshot write failure; the commit was aborted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
