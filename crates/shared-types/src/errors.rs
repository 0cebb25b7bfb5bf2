//! # Error Types
//!
//! Defines error types used across subsystems.
//!
//! ## Design Principles
//!
//! - `ValidationError` is raised before any network I/O is attempted and is
//!   never retried.
//! - Collaborator errors (`LedgerError`, `ConfigError`) are passed through
//!   to callers unmodified; no retries or backoff happen inside this
//!   library.

use thiserror::Error;

/// Malformed input to a public operation.
///
/// Always fatal to the call; raised before any network I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Address is empty, too long, or contains characters outside `[A-Z0-9]`.
    #[error("Malformed address: {value:?}")]
    AddressFormat { value: String },

    /// Tag is empty, too long, or contains characters outside `[A-Z0-9]`.
    #[error("Malformed tag: {value:?}")]
    TagFormat { value: String },

    /// Payload is empty; there is nothing to store.
    #[error("Empty payload")]
    EmptyPayload,
}

/// Failure reported by the ledger collaborator.
///
/// Submission, confirmation, and lookup are consumed through a capability
/// interface; whatever it reports surfaces here unmodified.
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// The ledger rejected or failed a submission.
    #[error("Ledger submission failed: {0}")]
    Submission(String),

    /// A lookup against the ledger failed.
    #[error("Ledger lookup failed: {0}")]
    Lookup(String),
}

/// Failure reported by the configuration collaborator.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Loading a configuration record failed.
    #[error("Config load failed: {0}")]
    Load(String),

    /// Saving a configuration record failed.
    #[error("Config save failed: {0}")]
    Save(String),
}
