//! # Config-Driven Signed Table
//!
//! The flat-list variant. Addresses are not constructor parameters; they
//! are resolved once, lazily, from the external configuration record keyed
//! by table name and cached for the instance's lifetime. The index is a
//! bare ordered list of bundle-id strings, reached through the record's
//! `index_bundle_hash` pointer instead of a tag scan — the configuration
//! record is the only durable pointer to the current index, and losing it
//! orphans the table's data.
//!
//! Adds `update` (positional replace, append on miss) to the common table
//! operations. Writes return a [`StoreReceipt`] with the ledger identifiers
//! they produced.

use crate::domain::codec;
use crate::domain::errors::TableError;
use crate::domain::value_objects::{SignedTableConfig, DEFAULT_DATA_TAG, INDEX_TAG};
use crate::ports::inbound::{IndexedTable, StoreReceipt};
use crate::ports::outbound::{ConfigProvider, Signer, TableConfigRecord, Verifier};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{Address, BundleId, SignedEnvelope, StorageItem, Tag};
use std::collections::HashMap;
use std::marker::PhantomData;
use tracing::{debug, info, warn};
use vl_01_bundle_store::{BundleStoreApi, TimeSource};

/// Addresses and index pointer resolved from the configuration record.
struct ResolvedConfig {
    data_address: Address,
    index_address: Address,
    index_bundle_hash: Option<BundleId>,
}

/// The config-driven signed table.
pub struct SignedDataTable<T, B, S, V, CP, C>
where
    B: BundleStoreApi,
    S: Signer,
    V: Verifier,
    CP: ConfigProvider,
    C: TimeSource,
{
    bundle_store: B,
    signer: S,
    verifier: V,
    config_provider: CP,
    clock: C,
    config: SignedTableConfig,
    cached: tokio::sync::Mutex<Option<TableConfigRecord>>,
    _payload: PhantomData<fn() -> T>,
}

impl<T, B, S, V, CP, C> SignedDataTable<T, B, S, V, CP, C>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
    B: BundleStoreApi,
    S: Signer,
    V: Verifier,
    CP: ConfigProvider,
    C: TimeSource,
{
    /// Create a table over the given collaborators.
    pub fn new(
        bundle_store: B,
        signer: S,
        verifier: V,
        config_provider: CP,
        clock: C,
        config: SignedTableConfig,
    ) -> Self {
        Self {
            bundle_store,
            signer,
            verifier,
            config_provider,
            clock,
            config,
            cached: tokio::sync::Mutex::new(None),
            _payload: PhantomData,
        }
    }

    /// The table's configuration.
    pub fn config(&self) -> &SignedTableConfig {
        &self.config
    }

    /// Resolve the configuration record, loading and caching it on first
    /// use. A record that exists is cached for the instance's lifetime; a
    /// missing record is not cached, so configuration created later is
    /// picked up.
    async fn resolved_config(&self) -> Result<ResolvedConfig, TableError> {
        let mut cached = self.cached.lock().await;
        let record = match cached.as_ref() {
            Some(record) => record.clone(),
            None => {
                let Some(record) = self.config_provider.load(&self.config.table_name).await?
                else {
                    return Err(TableError::MissingConfigField {
                        table: self.config.table_name.clone(),
                        field: "data_address",
                    });
                };
                debug!(table = %self.config.table_name, "loaded and cached config record");
                *cached = Some(record.clone());
                record
            }
        };
        drop(cached);

        self.resolve_record(&record)
    }

    fn resolve_record(&self, record: &TableConfigRecord) -> Result<ResolvedConfig, TableError> {
        let data_address = record
            .data_address
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| TableError::MissingConfigField {
                table: self.config.table_name.clone(),
                field: "data_address",
            })?;
        let index_address = record
            .index_address
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| TableError::MissingConfigField {
                table: self.config.table_name.clone(),
                field: "index_address",
            })?;

        Ok(ResolvedConfig {
            data_address: Address::new(data_address)?,
            index_address: Address::new(index_address)?,
            index_bundle_hash: record
                .index_bundle_hash
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(BundleId::new),
        })
    }

    /// Point the configuration record at a freshly published index bundle
    /// and persist it through the config collaborator.
    async fn update_pointer(&self, new_index_bundle: &BundleId) -> Result<(), TableError> {
        let mut cached = self.cached.lock().await;
        let mut record = cached.clone().unwrap_or_default();
        record.index_bundle_hash = Some(new_index_bundle.to_string());
        self.config_provider
            .save(&self.config.table_name, &record)
            .await?;
        *cached = Some(record);
        Ok(())
    }

    /// The current flat index: the ordered list of live bundle-id strings.
    ///
    /// An empty or absent `index_bundle_hash` means the table has no index
    /// yet; so does a pointer the ledger cannot resolve (the index bundle
    /// may lag behind the configuration on an eventually-consistent
    /// ledger).
    pub async fn index(&self) -> Result<Vec<String>, TableError> {
        let resolved = self.resolved_config().await?;
        let Some(pointer) = resolved.index_bundle_hash else {
            return Ok(Vec::new());
        };

        let items = self.bundle_store.load(std::slice::from_ref(&pointer)).await?;
        let Some(item) = items.into_iter().next() else {
            warn!(pointer = %pointer, "index pointer does not resolve yet");
            return Ok(Vec::new());
        };

        let envelope: SignedEnvelope<Vec<String>> = serde_json::from_str(&item.payload)
            .map_err(|e| TableError::Serialization(e.to_string()))?;

        if !codec::validate(
            &envelope,
            item.attachment_timestamp,
            &self.verifier,
            self.config.replay_window_ms,
        ) {
            return Err(TableError::SignatureInvalid {
                bundle_id: pointer.to_string(),
            });
        }

        Ok(envelope.data)
    }

    /// Store a payload and append it to the flat index.
    pub async fn store_entry(
        &self,
        payload: &T,
        tag: Option<Tag>,
    ) -> Result<StoreReceipt, TableError> {
        let resolved = self.resolved_config().await?;
        let tag = match tag {
            Some(tag) => tag,
            None => Tag::new(DEFAULT_DATA_TAG)?,
        };

        let item = self
            .save_envelope(&resolved.data_address, payload, &tag)
            .await?;

        let mut index = self.index().await?;
        index.push(item.bundle_id.to_string());
        self.persist_index(&resolved, &index).await?;

        info!(
            table = %self.config.table_name,
            bundle_id = %item.bundle_id,
            linked = index.len(),
            "stored entry and published index"
        );

        Ok(StoreReceipt {
            bundle_id: item.bundle_id,
            fragment_ids: item.fragment_ids,
        })
    }

    /// Store a payload and let it take over `original_id`'s position in the
    /// flat index. Appends instead if `original_id` is not linked.
    pub async fn update(
        &self,
        original_id: &BundleId,
        payload: &T,
        tag: Option<Tag>,
    ) -> Result<StoreReceipt, TableError> {
        let resolved = self.resolved_config().await?;
        let tag = match tag {
            Some(tag) => tag,
            None => Tag::new(DEFAULT_DATA_TAG)?,
        };

        let item = self
            .save_envelope(&resolved.data_address, payload, &tag)
            .await?;

        let mut index = self.index().await?;
        match index.iter().position(|id| id == original_id.as_str()) {
            Some(position) => index[position] = item.bundle_id.to_string(),
            None => index.push(item.bundle_id.to_string()),
        }
        self.persist_index(&resolved, &index).await?;

        info!(
            table = %self.config.table_name,
            original = %original_id,
            replacement = %item.bundle_id,
            "updated entry in place"
        );

        Ok(StoreReceipt {
            bundle_id: item.bundle_id,
            fragment_ids: item.fragment_ids,
        })
    }

    async fn persist_index(
        &self,
        resolved: &ResolvedConfig,
        index: &[String],
    ) -> Result<BundleId, TableError> {
        let item = self
            .save_envelope(&resolved.index_address, index, &Tag::new(INDEX_TAG)?)
            .await?;
        self.update_pointer(&item.bundle_id).await?;
        Ok(item.bundle_id)
    }

    async fn save_envelope<D: Serialize + ?Sized>(
        &self,
        address: &Address,
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
impl<T, B, S, V, CP, C> IndexedTable<T> for SignedDataTable<T, B, S, V, CP, C>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
    B: BundleStoreApi,
    S: Signer,
    V: Verifier,
    CP: ConfigProvider,
    C: TimeSource,
{
    async fn store(&self, payload: &T, tag: Option<Tag>) -> Result<BundleId, TableError> {
        Ok(self.store_entry(payload, tag).await?.bundle_id)
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
        let index = self.index().await?;
        if index.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<BundleId> = index.iter().map(BundleId::new).collect();
        let items = self.bundle_store.load(&ids).await?;
        let mut by_id: HashMap<String, StorageItem> = items
            .into_iter()
            .map(|item| (item.bundle_id.to_string(), item))
            .collect();

        let mut payloads = Vec::with_capacity(index.len());
        for id in &index {
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
        let resolved = self.resolved_config().await?;
        let mut index = self.index().await?;
        let before = index.len();
        index.retain(|linked| linked != id.as_str());

        if index.len() == before {
            debug!(id = %id, "id not linked in index; nothing to remove");
            return Ok(());
        }

        self.persist_index(&resolved, &index).await?;
        info!(id = %id, remaining = index.len(), "unlinked bundle from index");
        Ok(())
    }
}
