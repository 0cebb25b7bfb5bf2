//! # Inbound Ports (Driving Ports)
//!
//! The primary API for the Bundle Store subsystem.

use crate::domain::errors::BundleStoreError;
use shared_types::{Address, BundleId, StorageItem, Tag};

/// Primary API for the Bundle Store subsystem.
///
/// All operations are single-shot asynchronous network calls; suspension
/// points are exactly the awaited ledger calls. No operation defines a
/// timeout — callers impose deadlines around each call.
#[async_trait::async_trait]
pub trait BundleStoreApi: Send + Sync {
    /// Persist a payload as one bundle of fragments at `address` under `tag`.
    ///
    /// Side effect: one ledger write.
    ///
    /// ## Errors
    ///
    /// - `Validation`: empty payload (raised before any ledger call)
    /// - `Ledger`: submission failure, passed through unmodified
    async fn save(
        &self,
        address: &Address,
        payload: &str,
        tag: &Tag,
    ) -> Result<StorageItem, BundleStoreError>;

    /// Resolve and reconstruct the bundles with the given ids.
    ///
    /// An empty id set is a silent no-op returning an empty list. Ids the
    /// ledger cannot resolve are simply absent from the result.
    ///
    /// ## Errors
    ///
    /// - `Ledger`: lookup failure, passed through unmodified
    /// - `Decode`: a reconstructed payload could not be decoded
    async fn load(&self, ids: &[BundleId]) -> Result<Vec<StorageItem>, BundleStoreError>;

    /// Scan all fragments at `address`, keep exact `tag` matches, and
    /// reconstruct each bundle.
    ///
    /// ## Ordering
    ///
    /// Bundles are returned oldest-first by ledger attachment timestamp.
    /// This ordering is what lets index resolution treat "last in scan
    /// order" as "most recent".
    ///
    /// ## Errors
    ///
    /// - `Ledger`: lookup failure, passed through unmodified
    /// - `Decode`: a reconstructed payload could not be decoded
    async fn load_all_with_tag(
        &self,
        address: &Address,
        tag: &Tag,
    ) -> Result<Vec<StorageItem>, BundleStoreError>;
}
