//! # Adapters Layer
//!
//! Concrete implementations of the outbound ports.
//!
//! Production deployments implement `LedgerClient` against a real ledger
//! node; the in-memory adapter here backs unit and integration tests and
//! local wiring.

pub mod memory;

pub use memory::InMemoryLedger;
