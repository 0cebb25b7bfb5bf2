//! # Data Table Subsystem (vl-02)
//!
//! Layers mutable-looking table semantics (store / retrieve / update /
//! remove, "get current value") over the append-only ledger by combining
//! the signed-envelope codec, the bundle store, and a self-referential
//! index record that is itself persisted through the same envelope
//! mechanism.
//!
//! ## Responsibilities
//!
//! - Wrap every stored value (including index records) in a
//!   `SignedEnvelope` and validate envelopes against the ledger's
//!   authoritative attachment clock within a configurable replay window
//! - Resolve the current index among multiple confirmed index versions
//!   (the ledger never overwrites) via a pluggable resolution policy
//! - Maintain the chain-variant index `{bundles, last_idx}` and the
//!   config-driven flat-list index, as two implementations of one
//!   `IndexedTable<T>` port
//!
//! ## Concurrency Model
//!
//! All operations are single-shot asynchronous calls; the caller controls
//! concurrency. Index read-modify-write is a documented lost-update race
//! under the default `LastWriterWins` policy; the opt-in `CompareAndSwap`
//! policy and `set_index_checked` reject writes when the observed index
//! version has moved. One table instance owns its config cache exclusively
//! and is not meant to be shared across uncoordinated writers.
//!
//! ## Hexagonal Architecture
//!
//! - **Domain Layer** (`domain/`): envelope codec, index structures,
//!   table configuration
//! - **Ports Layer** (`ports/`): inbound `IndexedTable<T>` trait, outbound
//!   `Signer`/`Verifier`/`ConfigProvider` traits
//! - **Adapters Layer** (`adapters/`): HMAC-SHA256 signer/verifier, an
//!   in-memory config provider
//! - **Service Layer** (`service/`): the resolution policy and the two
//!   table variants

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export main types for convenience
pub use domain::{
    codec, ChainIndex, ChainTableConfig, SignedTableConfig, TableError, WritePolicy,
    DEFAULT_DATA_TAG, INDEX_TAG,
};

pub use ports::{
    ConfigProvider, IndexedTable, Signer, StoreReceipt, TableConfigRecord, Verifier,
};

pub use adapters::{HmacSigner, HmacVerifier, InMemoryConfigProvider};

pub use service::{
    ChainDataTable, IndexCandidate, IndexResolution, NewestValidResolution, SignedDataTable,
};
