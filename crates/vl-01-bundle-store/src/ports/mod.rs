//! # Ports Layer
//!
//! - `inbound`: the API this library exposes to callers
//! - `outbound`: the capabilities it requires the host to provide

pub mod inbound;
pub mod outbound;

pub use inbound::BundleStoreApi;
pub use outbound::{ConfirmedBundle, FragmentDraft, LedgerClient, SystemTimeSource, TimeSource};
