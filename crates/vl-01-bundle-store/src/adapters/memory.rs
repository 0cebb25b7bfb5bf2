//! # In-Memory Ledger
//!
//! A `LedgerClient` implementation over a plain fragment vector.
//!
//! Faithful to the ledger model where it matters for the subsystems above
//! it: append-only (nothing is ever overwritten), attachment timestamps are
//! assigned by the ledger at confirmation, and scans return fragments in
//! confirmation order. The clock is controllable so tests can stage replay
//! windows and confirmation orderings deterministically.

use crate::ports::outbound::{ConfirmedBundle, FragmentDraft, LedgerClient};
use shared_types::{Address, BundleId, Fragment, FragmentId, LedgerError, Tag, Timestamp};
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Mutex;

/// Milliseconds the internal clock advances per confirmed submission.
const SUBMIT_TICK_MS: Timestamp = 1_000;

/// In-memory ledger for tests and local wiring.
pub struct InMemoryLedger {
    fragments: Mutex<Vec<Fragment>>,
    clock: AtomicI64,
    submissions: AtomicU64,
}

impl InMemoryLedger {
    /// Create a ledger whose clock starts at an arbitrary fixed epoch.
    pub fn new() -> Self {
        Self::with_start_time(1_600_000_000_000)
    }

    /// Create a ledger whose clock starts at `start_ms`.
    pub fn with_start_time(start_ms: Timestamp) -> Self {
        Self {
            fragments: Mutex::new(Vec::new()),
            clock: AtomicI64::new(start_ms),
            submissions: AtomicU64::new(0),
        }
    }

    /// Advance the confirmation clock by `delta_ms`.
    pub fn advance_clock(&self, delta_ms: Timestamp) {
        self.clock.fetch_add(delta_ms, Ordering::SeqCst);
    }

    /// Current confirmation clock reading.
    pub fn now_ms(&self) -> Timestamp {
        self.clock.load(Ordering::SeqCst)
    }

    /// Number of successful submissions so far.
    pub fn submission_count(&self) -> u64 {
        self.submissions.load(Ordering::SeqCst)
    }

    /// Append a raw fragment, bypassing submission.
    ///
    /// Test hook for staging crafted fragment sets (out-of-order positions,
    /// foreign tags, hand-built bundles).
    pub fn inject_fragment(&self, fragment: Fragment) {
        self.fragments
            .lock()
            .expect("fragment store poisoned")
            .push(fragment);
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LedgerClient for InMemoryLedger {
    async fn submit(
        &self,
        address: &Address,
        tag: &Tag,
        fragments: Vec<FragmentDraft>,
    ) -> Result<ConfirmedBundle, LedgerError> {
        if fragments.is_empty() {
            return Err(LedgerError::Submission("empty fragment set".to_string()));
        }

        let attachment_timestamp = self.clock.fetch_add(SUBMIT_TICK_MS, Ordering::SeqCst);
        let bundle_id = BundleId::new(uuid::Uuid::new_v4().simple().to_string());

        let mut confirmed_ids = Vec::with_capacity(fragments.len());
        let mut store = self
            .fragments
            .lock()
            .map_err(|e| LedgerError::Submission(e.to_string()))?;

        for draft in fragments {
            let fragment_id = FragmentId::new(uuid::Uuid::new_v4().simple().to_string());
            confirmed_ids.push(fragment_id.clone());
            store.push(Fragment {
                fragment_id,
                bundle_id: bundle_id.clone(),
                address: address.clone(),
                tag: tag.clone(),
                payload: draft.payload,
                current_index: draft.current_index,
                attachment_timestamp,
            });
        }

        self.submissions.fetch_add(1, Ordering::SeqCst);

        Ok(ConfirmedBundle {
            bundle_id,
            fragment_ids: confirmed_ids,
            attachment_timestamp,
        })
    }

    async fn find_by_bundle_ids(&self, ids: &[BundleId]) -> Result<Vec<Fragment>, LedgerError> {
        let store = self
            .fragments
            .lock()
            .map_err(|e| LedgerError::Lookup(e.to_string()))?;

        Ok(store
            .iter()
            .filter(|f| ids.contains(&f.bundle_id))
            .cloned()
            .collect())
    }

    async fn find_by_address_and_tag(
        &self,
        address: &Address,
        tag: &Tag,
    ) -> Result<Vec<Fragment>, LedgerError> {
        let store = self
            .fragments
            .lock()
            .map_err(|e| LedgerError::Lookup(e.to_string()))?;

        Ok(store
            .iter()
            .filter(|f| &f.address == address && &f.tag == tag)
            .cloned()
            .collect())
    }
}
