//! # Service Layer
//!
//! The index resolution policy and the two table variants.

pub mod chain_table;
pub mod resolver;
pub mod signed_table;

pub use chain_table::ChainDataTable;
pub use resolver::{IndexCandidate, IndexResolution, NewestValidResolution};
pub use signed_table::SignedDataTable;
