//! # `SignedEnvelope` Wrapper
//!
//! The universal wrapper for every value persisted to the ledger, including
//! the index records themselves.
//!
//! ## Security Properties
//!
//! - **Authenticity**: `signature` covers the canonical serialization of
//!   `(data, timestamp)` and is produced by the signer capability.
//! - **Time-Bounded Replay Prevention**: an envelope is only accepted while
//!   the ledger's attachment clock is within the replay window of the
//!   envelope's self-declared `timestamp`. The attachment clock is assigned
//!   by the ledger and cannot be forged by the writer, so a captured
//!   `(data, timestamp, signature)` triple cannot be replayed arbitrarily
//!   far in the future.

use crate::entities::Timestamp;
use serde::{Deserialize, Serialize};

/// A signed, timestamped wrapper around a persisted value.
///
/// Created at write time, never mutated once constructed, and discarded
/// after verification. The `signature` field must always be the output of
/// the signer capability over the canonical serialization of
/// `(data, timestamp)`; envelopes are never hand-constructed outside the
/// codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedEnvelope<T> {
    /// The wrapped value.
    pub data: T,
    /// Writer-declared creation time in milliseconds since the epoch.
    pub timestamp: Timestamp,
    /// Signature over the canonical serialization of `(data, timestamp)`.
    pub signature: String,
}

impl<T> SignedEnvelope<T> {
    /// Default replay window for chain-variant index records (90 seconds).
    pub const CHAIN_INDEX_REPLAY_WINDOW_MS: Timestamp = 90_000;

    /// Default replay window for signed-table entries (one minute).
    pub const ENTRY_REPLAY_WINDOW_MS: Timestamp = 60_000;
}
