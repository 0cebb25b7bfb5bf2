//! # Outbound Ports (Driven Ports)
//!
//! Capabilities required by the Bundle Store subsystem. The ledger's
//! internal consensus and networking are out of scope; it is consumed
//! through `LedgerClient` only.

use shared_types::{Address, BundleId, Fragment, FragmentId, LedgerError, Tag, Timestamp};

/// An unattached fragment slice, ready for submission.
///
/// Identifiers and the attachment timestamp do not exist yet; the ledger
/// assigns them at confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentDraft {
    /// Encoded payload slice, exactly one fragment capacity long.
    pub payload: String,
    /// Position of this slice within the bundle (0-based).
    pub current_index: u32,
}

/// The ledger's confirmation of a submitted bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedBundle {
    /// Ledger-assigned bundle identifier.
    pub bundle_id: BundleId,
    /// Ledger-assigned fragment identifiers, in submission order.
    pub fragment_ids: Vec<FragmentId>,
    /// Ledger-assigned confirmation time in milliseconds.
    pub attachment_timestamp: Timestamp,
}

/// Abstract interface for the ledger transaction collaborator.
///
/// The ledger is append-only and eventually consistent: nothing is ever
/// overwritten or deleted, confirmation order is not guaranteed to match
/// write order, and multiple confirmed bundles may exist for what callers
/// consider one logical record.
#[async_trait::async_trait]
pub trait LedgerClient: Send + Sync {
    /// Submit one bundle of fragments at `address` under `tag`.
    async fn submit(
        &self,
        address: &Address,
        tag: &Tag,
        fragments: Vec<FragmentDraft>,
    ) -> Result<ConfirmedBundle, LedgerError>;

    /// Resolve the fragments underlying the given bundle ids.
    async fn find_by_bundle_ids(&self, ids: &[BundleId]) -> Result<Vec<Fragment>, LedgerError>;

    /// Return all fragments written at `address` under `tag`.
    async fn find_by_address_and_tag(
        &self,
        address: &Address,
        tag: &Tag,
    ) -> Result<Vec<Fragment>, LedgerError>;
}

#[async_trait::async_trait]
impl<L: LedgerClient + ?Sized> LedgerClient for std::sync::Arc<L> {
    async fn submit(
        &self,
        address: &Address,
        tag: &Tag,
        fragments: Vec<FragmentDraft>,
    ) -> Result<ConfirmedBundle, LedgerError> {
        (**self).submit(address, tag, fragments).await
    }

    async fn find_by_bundle_ids(&self, ids: &[BundleId]) -> Result<Vec<Fragment>, LedgerError> {
        (**self).find_by_bundle_ids(ids).await
    }

    async fn find_by_address_and_tag(
        &self,
        address: &Address,
        tag: &Tag,
    ) -> Result<Vec<Fragment>, LedgerError> {
        (**self).find_by_address_and_tag(address, tag).await
    }
}

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Get current timestamp in milliseconds since epoch.
    fn now_ms(&self) -> Timestamp;
}

/// Default time source using system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_ms(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as Timestamp)
            .unwrap_or(0)
    }
}
