//! # Domain Errors
//!
//! Error taxonomy for the table variants.
//!
//! Every public operation either resolves with a value (including "no
//! index" / empty list as valid values) or fails with exactly one of these;
//! there is no partial-success return shape. Collaborator failures pass
//! through unmodified — retries belong at the collaborator boundary, not in
//! table logic.

use shared_types::{ConfigError, LedgerError, ValidationError};
use thiserror::Error;
use vl_01_bundle_store::BundleStoreError;

/// Errors surfaced by the table variants.
#[derive(Debug, Error)]
pub enum TableError {
    /// Malformed input to a public operation; raised before any I/O.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An envelope failed validation during retrieve/retrieve_all.
    /// Fatal to the whole call; no skip-and-continue.
    #[error("Signature not valid for bundle {bundle_id}")]
    SignatureInvalid { bundle_id: String },

    /// A required field is absent from the external configuration record.
    /// Fatal configuration error for the config-driven table.
    #[error("Config record for table {table:?} is missing {field}")]
    MissingConfigField { table: String, field: &'static str },

    /// A checked index write observed a different current version than the
    /// one the operation started from.
    #[error("Index conflict: expected {expected:?}, found {found:?}")]
    IndexConflict {
        expected: Option<String>,
        found: Option<String>,
    },

    /// An envelope or index document could not be serialized/deserialized.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Ledger collaborator failure, passed through unmodified.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Config collaborator failure, passed through unmodified.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Bundle store failure, passed through unmodified.
    #[error(transparent)]
    BundleStore(#[from] BundleStoreError),
}
