//! # Domain Layer
//!
//! Pure encoding and reconstruction logic. No I/O, no clocks.

pub mod encoding;
pub mod errors;
pub mod reconstruction;

pub use encoding::{decode_payload, encode_payload, fragment_payload, FRAGMENT_CAPACITY, PAD_CHAR};
pub use errors::BundleStoreError;
pub use reconstruction::reassemble;
