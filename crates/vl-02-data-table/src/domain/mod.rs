//! # Domain Layer
//!
//! Envelope codec, index structures, and table configuration. No I/O.

pub mod codec;
pub mod errors;
pub mod index;
pub mod value_objects;

pub use errors::TableError;
pub use index::ChainIndex;
pub use value_objects::{
    ChainTableConfig, SignedTableConfig, WritePolicy, DEFAULT_DATA_TAG, INDEX_TAG,
};
