//! # Domain Errors
//!
//! Error types for the Bundle Store subsystem.

use shared_types::{LedgerError, ValidationError};
use thiserror::Error;

/// Errors that can occur during bundle store operations.
#[derive(Debug, Error)]
pub enum BundleStoreError {
    /// Malformed input, rejected before any ledger call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Failure reported by the ledger collaborator, passed through unmodified.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A reconstructed payload could not be decoded.
    #[error("Undecodable payload in bundle {bundle_id}: {message}")]
    Decode { bundle_id: String, message: String },
}
