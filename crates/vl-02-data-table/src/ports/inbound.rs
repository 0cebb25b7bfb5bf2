//! # Inbound Ports (Driving Ports)
//!
//! The common table API implemented by both index variants.

use crate::domain::errors::TableError;
use shared_types::{BundleId, FragmentId, Tag};

/// Result of a write against the config-driven signed table.
///
/// Writes return the ledger identifiers they produced instead of annotating
/// the caller's payload in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreReceipt {
    /// Bundle id of the stored value.
    pub bundle_id: BundleId,
    /// Fragment ids the bundle was split into.
    pub fragment_ids: Vec<FragmentId>,
}

/// The common indexed-table API.
///
/// Two implementations exist: the chain-variant table (index record with a
/// `bundles` list, resolved by tag scan) and the config-driven signed table
/// (flat id list reached through an external configuration pointer). Both
/// compose the envelope codec and the bundle store; neither inherits state
/// from the other.
#[async_trait::async_trait]
pub trait IndexedTable<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Store a payload and link it into the index.
    ///
    /// Two sequential ledger writes (data, then index) with no atomicity
    /// between them: a crash in between leaves an orphaned, unindexed data
    /// bundle — unreachable, not corrupt.
    ///
    /// ## Errors
    ///
    /// - `Validation`: malformed payload or tag, before any I/O
    /// - `IndexConflict`: checked write observed a moved index
    /// - collaborator errors, passed through unmodified
    async fn store(&self, payload: &T, tag: Option<Tag>) -> Result<BundleId, TableError>;

    /// Retrieve a single payload by bundle id.
    ///
    /// Returns `Ok(None)` when the ledger cannot resolve the id — a silent
    /// miss, not an error.
    ///
    /// ## Errors
    ///
    /// - `SignatureInvalid`: the envelope failed validation against its own
    ///   ledger attachment timestamp (carries the id)
    async fn retrieve(&self, id: &BundleId) -> Result<Option<T>, TableError>;

    /// Retrieve every payload currently linked in the index.
    ///
    /// An absent index is an empty table, not an error. The first envelope
    /// that fails validation aborts the whole call; there are no partial
    /// results.
    async fn retrieve_all(&self) -> Result<Vec<T>, TableError>;

    /// Unlink a bundle id from the index.
    ///
    /// Removing an absent id is a silent no-op that publishes nothing. The
    /// underlying data bundle is never deleted — the ledger is append-only;
    /// removal only unlinks.
    async fn remove(&self, id: &BundleId) -> Result<(), TableError>;
}
