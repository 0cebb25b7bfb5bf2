//! # Bundle Store Service
//!
//! The application service implementing `BundleStoreApi`.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Validates inputs before any network I/O
//! - Delegates encoding and reconstruction to the domain layer
//! - Uses the outbound `LedgerClient` port for all ledger access

use crate::domain::encoding::{encode_payload, fragment_payload};
use crate::domain::errors::BundleStoreError;
use crate::domain::reconstruction::reassemble;
use crate::ports::inbound::BundleStoreApi;
use crate::ports::outbound::{FragmentDraft, LedgerClient};
use shared_types::{Address, BundleId, Fragment, StorageItem, Tag, ValidationError};
use tracing::debug;

/// The Bundle Store Service.
///
/// Generic over the ledger collaborator; owns no other state.
pub struct BundleStoreService<L: LedgerClient> {
    ledger: L,
}

impl<L: LedgerClient> BundleStoreService<L> {
    /// Create a new bundle store over the given ledger collaborator.
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    /// Access the underlying ledger collaborator.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Group fragments by bundle id, preserving first-seen scan order both
    /// across groups and within each group.
    fn group_by_bundle(fragments: Vec<Fragment>) -> Vec<Vec<Fragment>> {
        let mut order: Vec<BundleId> = Vec::new();
        let mut groups: Vec<Vec<Fragment>> = Vec::new();

        for fragment in fragments {
            match order.iter().position(|id| *id == fragment.bundle_id) {
                Some(i) => groups[i].push(fragment),
                None => {
                    order.push(fragment.bundle_id.clone());
                    groups.push(vec![fragment]);
                }
            }
        }

        groups
    }
}

#[async_trait::async_trait]
impl<L: LedgerClient> BundleStoreApi for BundleStoreService<L> {
    async fn save(
        &self,
        address: &Address,
        payload: &str,
        tag: &Tag,
    ) -> Result<StorageItem, BundleStoreError> {
        if payload.is_empty() {
            return Err(ValidationError::EmptyPayload.into());
        }

        let encoded = encode_payload(payload);
        let drafts: Vec<FragmentDraft> = fragment_payload(&encoded)
            .into_iter()
            .enumerate()
            .map(|(i, slice)| FragmentDraft {
                payload: slice,
                current_index: i as u32,
            })
            .collect();

        debug!(
            address = %address,
            tag = %tag,
            fragment_count = drafts.len(),
            "submitting bundle"
        );

        let confirmed = self.ledger.submit(address, tag, drafts).await?;

        Ok(StorageItem {
            bundle_id: confirmed.bundle_id,
            payload: payload.to_string(),
            tag: tag.clone(),
            attachment_timestamp: confirmed.attachment_timestamp,
            fragment_ids: confirmed.fragment_ids,
        })
    }

    async fn load(&self, ids: &[BundleId]) -> Result<Vec<StorageItem>, BundleStoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let fragments = self.ledger.find_by_bundle_ids(ids).await?;
        debug!(
            requested = ids.len(),
            fragment_count = fragments.len(),
            "loading bundles by id"
        );

        Self::group_by_bundle(fragments)
            .iter()
            .map(|group| reassemble(group))
            .collect()
    }

    async fn load_all_with_tag(
        &self,
        address: &Address,
        tag: &Tag,
    ) -> Result<Vec<StorageItem>, BundleStoreError> {
        let fragments = self.ledger.find_by_address_and_tag(address, tag).await?;

        // The collaborator already routes on (address, tag); the exact-match
        // filter stands on its own so a loosely-matching client cannot leak
        // foreign bundles into the scan.
        let matching: Vec<Fragment> = fragments
            .into_iter()
            .filter(|f| &f.tag == tag)
            .collect();

        let mut groups = Self::group_by_bundle(matching);
        groups.sort_by_key(|group| group[0].attachment_timestamp);

        debug!(
            address = %address,
            tag = %tag,
            bundle_count = groups.len(),
            "scanned address by tag"
        );

        groups.iter().map(|group| reassemble(group)).collect()
    }
}
