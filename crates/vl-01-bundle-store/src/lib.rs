//! # Bundle Store Subsystem (vl-01)
//!
//! The Bundle Store converts a payload string plus an address and a
//! classification tag into one or more fixed-capacity ledger fragments (a
//! "bundle"), submits them through the ledger collaborator, and later
//! reconstructs the payload from a set of fragments belonging to the same
//! bundle.
//!
//! ## Responsibilities
//!
//! - Encode payloads into the even-length fragment alphabet and split them
//!   into fixed-capacity slices, padding the final slice with the reserved
//!   filler character
//! - Submit fragment bundles to the ledger and capture the confirmed bundle
//!   and fragment identifiers
//! - Reconstruct payloads from fragment groups: position sort, filler strip,
//!   even-length restoration
//! - Scan an address by tag and return bundles oldest-first by ledger
//!   attachment time, which is what lets callers treat "last in scan order"
//!   as "most recent"
//!
//! ## Hexagonal Architecture
//!
//! - **Domain Layer** (`domain/`): pure encoding and reconstruction logic,
//!   no I/O dependencies
//! - **Ports Layer** (`ports/`): inbound `BundleStoreApi` trait, outbound
//!   `LedgerClient` and `TimeSource` traits
//! - **Adapters Layer** (`adapters/`): in-memory ledger for tests and local
//!   wiring
//! - **Service** (`service.rs`): the `BundleStoreService` implementing the
//!   inbound port

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export main types for convenience
pub use domain::{
    decode_payload, encode_payload, fragment_payload, reassemble, BundleStoreError,
    FRAGMENT_CAPACITY, PAD_CHAR,
};

pub use ports::{
    BundleStoreApi, ConfirmedBundle, FragmentDraft, LedgerClient, SystemTimeSource, TimeSource,
};

pub use adapters::InMemoryLedger;

pub use service::BundleStoreService;
