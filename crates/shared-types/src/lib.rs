//! # Shared Types Crate
//!
//! This crate contains all domain value types shared across the Vaultledger
//! subsystems, together with the `SignedEnvelope<T>` wrapper applied to every
//! stored value.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Validate at Construction**: `Address` and `Tag` cannot exist in an
//!   ill-formed state; constructors return `ValidationError` before any I/O
//!   is ever attempted with them.
//! - **Envelope Integrity**: The `SignedEnvelope<T>` is the sole wrapper for
//!   persisted values. Its `signature` field is always produced by a signer
//!   capability, never hand-constructed.

pub mod entities;
pub mod envelope;
pub mod errors;

pub use entities::*;
pub use envelope::SignedEnvelope;
pub use errors::*;
