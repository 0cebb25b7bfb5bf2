//! # Vaultledger Test Suite
//!
//! Unified test crate for cross-subsystem flows.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── support.rs        # Shared fixtures (clocks, table builders)
//! └── integration/      # Cross-subsystem flows
//!     ├── flows.rs      # Store/retrieve/remove round trips
//!     ├── resolution.rs # Index resolution under divergent versions
//!     └── races.rs      # Lost-update race and checked writes
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p vl-tests
//!
//! # By category
//! cargo test -p vl-tests integration::
//! ```

#![allow(dead_code)]

pub mod integration;
pub mod support;

/// Opt-in log capture for debugging a failing flow:
/// `VL_TEST_LOG=debug cargo test -p vl-tests`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("VL_TEST_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
