//! # Index Resolution Policy
//!
//! Because the ledger never overwrites and confirmation order is not
//! guaranteed to match write order, several confirmed index bundles can be
//! outstanding at one address simultaneously (concurrent writers, retries).
//! The resolution policy decides which candidate to trust.
//!
//! This is a heuristic, not a serializable-consistency guarantee: it picks
//! a survivor among divergent versions, it does not reconcile them.

use crate::domain::index::ChainIndex;
use shared_types::{BundleId, SignedEnvelope, Timestamp};

/// One confirmed index version found during the tag scan.
#[derive(Debug, Clone)]
pub struct IndexCandidate {
    /// Bundle id the candidate was stored under.
    pub bundle_id: BundleId,
    /// Ledger attachment time of the candidate's bundle.
    pub attachment_timestamp: Timestamp,
    /// The candidate's unwrapped envelope.
    pub envelope: SignedEnvelope<ChainIndex>,
}

/// Policy for picking the trusted index among scan candidates.
///
/// Candidates arrive oldest-first by ledger attachment timestamp (the scan
/// order of the bundle store). `is_valid` is the envelope validity
/// predicate supplied by the table; the policy decides order and selection,
/// not validity.
pub trait IndexResolution: Send + Sync {
    /// Return the position of the candidate to trust, or `None` if no
    /// candidate is acceptable (an empty table is valid state, not an
    /// error).
    fn resolve(
        &self,
        candidates: &[IndexCandidate],
        is_valid: &dyn Fn(&IndexCandidate) -> bool,
    ) -> Option<usize>;
}

/// Default policy: walk candidates newest-first and trust the first valid
/// one, even when newer invalid candidates exist above it.
#[derive(Debug, Default, Clone, Copy)]
pub struct NewestValidResolution;

impl IndexResolution for NewestValidResolution {
    fn resolve(
        &self,
        candidates: &[IndexCandidate],
        is_valid: &dyn Fn(&IndexCandidate) -> bool,
    ) -> Option<usize> {
        (0..candidates.len()).rev().find(|&i| is_valid(&candidates[i]))
    }
}
