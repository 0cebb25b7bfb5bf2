//! # Integration Flows
//!
//! Cross-subsystem tests wiring the bundle store, the envelope codec, and
//! the table variants over one shared in-memory ledger.

pub mod flows;
pub mod races;
pub mod resolution;
