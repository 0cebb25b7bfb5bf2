//! # Ports Layer
//!
//! - `inbound`: the table API exposed to callers
//! - `outbound`: capabilities the tables require from the host

pub mod inbound;
pub mod outbound;

pub use inbound::{IndexedTable, StoreReceipt};
pub use outbound::{ConfigProvider, Signer, TableConfigRecord, Verifier};
