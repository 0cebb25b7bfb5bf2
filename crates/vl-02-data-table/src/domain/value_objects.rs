//! # Value Objects
//!
//! Reserved tags, write policies, and table configuration.

use shared_types::{Address, SignedEnvelope, Timestamp};

/// Reserved tag under which index bundles are written.
pub const INDEX_TAG: &str = "INDEX9TAG";

/// Default tag for user data bundles when the caller does not supply one.
pub const DEFAULT_DATA_TAG: &str = "DATA9TAG";

/// How index mutations are published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Publish unconditionally. Two concurrent writers can both read the
    /// same index version and each publish a divergent successor; the
    /// resolution policy decides which one future readers see, and the
    /// other mutation is lost. This is the documented baseline behavior.
    #[default]
    LastWriterWins,

    /// Re-read the current index immediately before publishing and fail
    /// with `IndexConflict` if it no longer matches the version the
    /// operation started from.
    CompareAndSwap,
}

/// Configuration for the chain-variant data table.
#[derive(Debug, Clone)]
pub struct ChainTableConfig {
    /// Address where data bundles are written.
    pub data_address: Address,
    /// Address where index bundles are written and scanned.
    pub index_address: Address,
    /// Replay window: maximum allowed difference between the ledger
    /// attachment time and an envelope's self-declared timestamp.
    pub replay_window_ms: Timestamp,
    /// Index publication policy.
    pub write_policy: WritePolicy,
}

impl ChainTableConfig {
    /// Create a config with the default replay window and write policy.
    pub fn new(data_address: Address, index_address: Address) -> Self {
        Self {
            data_address,
            index_address,
            replay_window_ms: SignedEnvelope::<()>::CHAIN_INDEX_REPLAY_WINDOW_MS,
            write_policy: WritePolicy::default(),
        }
    }

    /// Override the replay window.
    #[must_use]
    pub fn with_replay_window(mut self, window_ms: Timestamp) -> Self {
        self.replay_window_ms = window_ms;
        self
    }

    /// Override the write policy.
    #[must_use]
    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = policy;
        self
    }
}

/// Configuration for the config-driven signed table.
///
/// Addresses are not part of this config; they are resolved lazily from the
/// external configuration record keyed by `table_name`.
#[derive(Debug, Clone)]
pub struct SignedTableConfig {
    /// Key of the external configuration record.
    pub table_name: String,
    /// Replay window for entry and index envelopes.
    pub replay_window_ms: Timestamp,
}

impl SignedTableConfig {
    /// Create a config with the default one-minute replay window.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            replay_window_ms: SignedEnvelope::<()>::ENTRY_REPLAY_WINDOW_MS,
        }
    }

    /// Override the replay window.
    #[must_use]
    pub fn with_replay_window(mut self, window_ms: Timestamp) -> Self {
        self.replay_window_ms = window_ms;
        self
    }
}
