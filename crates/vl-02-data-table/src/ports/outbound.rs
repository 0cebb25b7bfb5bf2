//! # Outbound Ports (Driven Ports)
//!
//! Capabilities the table variants require from the host. Cryptographic
//! primitives and the cloud configuration store are consumed through these
//! interfaces only; their internals are out of scope here.

use serde::{Deserialize, Serialize};
use shared_types::ConfigError;

/// Abstract signing capability.
///
/// Must be deterministic and must not leak the signing key.
pub trait Signer: Send + Sync {
    /// Sign the canonical signature material.
    fn sign(&self, material: &str) -> String;
}

/// Abstract verification capability, the counterpart of [`Signer`].
pub trait Verifier: Send + Sync {
    /// Check a signature over the canonical signature material.
    fn verify(&self, material: &str, signature: &str) -> bool;
}

/// External configuration record for one named signed table.
///
/// This record is the only durable pointer to the table's current index
/// bundle; losing it orphans all of the table's data. Fields are optional
/// at the storage layer — the table treats a missing address as a fatal
/// configuration error at resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableConfigRecord {
    /// Address where the table's data bundles are written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_address: Option<String>,
    /// Address where the table's index bundles are written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_address: Option<String>,
    /// Bundle id of the current index version; empty or absent means the
    /// table has no index yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_bundle_hash: Option<String>,
}

/// Abstract interface for the external configuration collaborator.
#[async_trait::async_trait]
pub trait ConfigProvider: Send + Sync {
    /// Load the configuration record for a table, if one exists.
    async fn load(&self, table_name: &str) -> Result<Option<TableConfigRecord>, ConfigError>;

    /// Persist the configuration record for a table.
    async fn save(&self, table_name: &str, record: &TableConfigRecord)
        -> Result<(), ConfigError>;
}

#[async_trait::async_trait]
impl<P: ConfigProvider + ?Sized> ConfigProvider for std::sync::Arc<P> {
    async fn load(&self, table_name: &str) -> Result<Option<TableConfigRecord>, ConfigError> {
        (**self).load(table_name).await
    }

    async fn save(
        &self,
        table_name: &str,
        record: &TableConfigRecord,
    ) -> Result<(), ConfigError> {
        (**self).save(table_name, record).await
    }
}
