//! # Chain-Variant Data Table
//!
//! Maintains an index record of shape `{bundles, last_idx}` at a fixed,
//! well-known index address. Every store appends the new bundle id and
//! publishes a fresh index version; every removal filters one id out. The
//! current index is found by scanning the index address for the reserved
//! tag and letting the resolution policy pick among the confirmed versions.
//!
//! Store is two sequential ledger writes (data, then index) with no
//! atomicity between them. A crash in between leaves an orphaned data
//! bundle that is unreachable, not corrupt.

use crate::domain::codec;
use crate::domain::errors::TableError;
use crate::domain::index::ChainIndex;
use crate::domain::value_objects::{ChainTableConfig, WritePolicy, DEFAULT_DATA_TAG, INDEX_TAG};
use crate::ports::inbound::IndexedTable;
use crate::ports::outbound::{Signer, Verifier};
use crate::service::resolver::{IndexCandidate, IndexResolution};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{BundleId, SignedEnvelope, StorageItem, Tag};
use std::collections::HashMap;
use std::marker::PhantomData;
use tracing::{debug, info, warn};
use vl_01_bundle_store::{BundleStoreApi, TimeSource};

/// The chain-variant indexed table.
///
/// Generic over the stored payload type and over every collaborator, so
/// tests can substitute any of them.
pub struct ChainDataTable<T, B, S, V, P, C>
where
    B: BundleStoreApi,
    S: Signer,
    V: Verifier,
    P: IndexResolution,
    C: TimeSource,
{
    bundle_store: B,
    signer: S,
    verifier: V,
    resolution: P,
    clock: C,
    config: ChainTableConfig,
    _payload: PhantomData<fn() -> T>,
}

impl<T, B, S, V, P, C> ChainDataTable<T, B, S, V, P, C>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
    B: BundleStoreApi,
    S: Signer,
    V: Verifier,
    P: IndexResolution,
    C: TimeSource,
{
    /// Create a table over the given collaborators.
    pub fn new(
        bundle_store: B,
        signer: S,
        verifier: V,
        resolution: P,
        clock: C,
        config: ChainTableConfig,
    ) -> Self {
        Self {
            bundle_store,
            signer,
            verifier,
            resolution,
            clock,
            config,
            _payload: PhantomData,
        }
    }

    /// The table's configuration.
    pub fn config(&self) -> &ChainTableConfig {
        &self.config
    }

    /// Locate the current, valid index version at the index address.
    ///
    /// Returns the index payload together with the bundle id it was read
    /// from, or `None` when no candidate validates — an empty table is
    /// valid state, not an error.
    pub async fn get_index(&self) -> Result<Option<(ChainIndex, BundleId)>, TableError> {
        let index_tag = Tag::new(INDEX_TAG)?;
        let items = self
            .bundle_store
            .load_all_with_tag(&self.config.index_address, &index_tag)
            .await?;

        let mut candidates: Vec<IndexCandidate> = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::from_str::<SignedEnvelope<ChainIndex>>(&item.payload) {
                Ok(envelope) => candidates.push(IndexCandidate {
                    bundle_id: item.bundle_id,
                    attachment_timestamp: item.attachment_timestamp,
                    envelope,
                }),
                Err(e) => {
                    warn!(
                        bundle_id = %item.bundle_id,
                        error = %e,
                        "skipping undecodable index candidate"
                    );
                }
            }
        }

        let window = self.config.replay_window_ms;
        let verifier = &self.verifier;
        let is_valid = |c: &IndexCandidate| {
            codec::validate(&c.envelope, c.attachment_timestamp, verifier, window)
        };

        let picked = self.resolution.resolve(&candidates, &is_valid);
        debug!(
            candidate_count = candidates.len(),
            resolved = picked.is_some(),
            "resolved index candidates"
        );

        match picked {
            Some(i) => {
                let chosen = candidates.swap_remove(i);
                Ok(Some((chosen.envelope.data, chosen.bundle_id)))
            }
            None => Ok(None),
        }
    }

    /// Wrap and persist a new index version; returns its bundle id.
    pub async fn set_index(&self, index: &ChainIndex) -> Result<BundleId, TableError> {
        let item = self.save_envelope(&self.config.index_address, index, &Tag::new(INDEX_TAG)?)
            .await?;
        Ok(item.bundle_id)
    }

    /// Persist a new index version only if the current one still matches
    /// `expected_prior`.
    ///
    /// ## Errors
    ///
    /// - `IndexConflict`: another writer published a newer valid index
    ///   between the caller's read and this write
    pub async fn set_index_checked(
        &self,
        index: &ChainIndex,
        expected_prior: Option<&BundleId>,
    ) -> Result<BundleId, TableError> {
        let observed = self.get_index().await?.map(|(_, id)| id);
        if observed.as_ref() != expected_prior {
            return Err(TableError::IndexConflict {
                expected: expected_prior.map(|id| id.to_string()),
                found: observed.map(|id| id.to_string()),
            });
        }
        self.set_index(index).await
    }

    async fn publish_index(
        &self,
        index: &ChainIndex,
        prior: Option<&BundleId>,
    ) -> Result<BundleId, TableError> {
        match self.config.write_policy {
            WritePolicy::LastWriterWins => self.set_index(index).await,
            WritePolicy::CompareAndSwap => self.set_index_checked(index, prior).await,
        }
    }

    async fn save_envelope<D: Serialize + ?Sized>(
        &self,
        address: &shared_types::Address,
        data: &D,
        tag: &Tag,
    ) -> Result<StorageItem, TableError> {
        let envelope = codec::wrap(data, &self.signer, &self.clock)?;
        let json = serde_json::to_string(&envelope)
            .map_err(|e| TableError::Serialization(e.to_string()))?;
        Ok(self.bundle_store.save(address, &json, tag).await?)
    }
}

#[async_trait::async_trait]
impl<T, B, S, V, P, C> IndexedTable<T> for ChainDataTable<T, B, S, V, P, C>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
    B: BundleStoreApi,
    S: Signer,
    V: Verifier,
    P: IndexResolution,
    C: TimeSource,
{
    async fn store(&self, payload: &T, tag: Option<Tag>) -> Result<BundleId, TableError> {
        let tag = match tag {
            Some(tag) => tag,
            None => Tag::new(DEFAULT_DATA_TAG)?,
        };

        let item = self
            .save_envelope(&self.config.data_address, payload, &tag)
            .await?;

        let (mut index, prior) = match self.get_index().await? {
            Some((index, source)) => (index, Some(source)),
            None => (ChainIndex::default(), None),
        };
        index.append(&item.bundle_id);
        index.last_idx = prior.as_ref().map(|id| id.to_string());

        self.publish_index(&index, prior.as_ref()).await?;
        info!(
            bundle_id = %item.bundle_id,
            linked = index.bundles.len(),
            "stored payload and published index"
        );
        Ok(item.bundle_id)
    }

    async fn retrieve(&self, id: &BundleId) -> Result<Option<T>, TableError> {
        let items = self.bundle_store.load(std::slice::from_ref(id)).await?;
        let Some(item) = items.into_iter().next() else {
            return Ok(None);
        };

        let envelope: SignedEnvelope<T> = serde_json::from_str(&item.payload)
            .map_err(|e| TableError::Serialization(e.to_string()))?;

        if !codec::validate(
            &envelope,
            item.attachment_timestamp,
            &self.verifier,
            self.config.replay_window_ms,
        ) {
            return Err(TableError::SignatureInvalid {
                bundle_id: id.to_string(),
            });
        }

        Ok(Some(envelope.data))
    }

    async fn retrieve_all(&self) -> Result<Vec<T>, TableError> {
        let Some((index, _)) = self.get_index().await? else {
            return Ok(Vec::new());
        };

        let ids: Vec<BundleId> = index.bundles.iter().map(BundleId::new).collect();
        let items = self.bundle_store.load(&ids).await?;
        let mut by_id: HashMap<String, StorageItem> = items
            .into_iter()
            .map(|item| (item.bundle_id.to_string(), item))
            .collect();

        let mut payloads = Vec::with_capacity(index.bundles.len());
        for id in &index.bundles {
            // Ids the ledger cannot resolve yet are skipped; eventual
            // consistency means a freshly linked bundle may lag the index.
            let Some(item) = by_id.remove(id) else {
                continue;
            };

            let envelope: SignedEnvelope<T> = serde_json::from_str(&item.payload)
                .map_err(|e| TableError::Serialization(e.to_string()))?;

            if !codec::validate(
                &envelope,
                item.attachment_timestamp,
                &self.verifier,
                self.config.replay_window_ms,
            ) {
                return Err(TableError::SignatureInvalid {
                    bundle_id: id.clone(),
                });
            }

            payloads.push(envelope.data);
        }

        Ok(payloads)
    }

    async fn remove(&self, id: &BundleId) -> Result<(), TableError> {
        let Some((mut index, source)) = self.get_index().await? else {
            debug!(id = %id, "remove on a table with no index is a no-op");
            return Ok(());
        };

        if !index.remove(id) {
            debug!(id = %id, "id not linked in index; nothing to remove");
            return Ok(());
        }

        index.last_idx = Some(source.to_string());
        self.publish_index(&index, Some(&source)).await?;
        info!(id = %id, remaining = index.bundles.len(), "unlinked bundle from index");
        Ok(())
    }
}
