//! # Index Structures
//!
//! The chain-variant index record. The flat-list variant needs no wrapper
//! type of its own: its index is a bare ordered list of bundle-id strings.

use serde::{Deserialize, Serialize};
use shared_types::BundleId;

/// The chain-variant index record.
///
/// Tracks which bundle ids are currently live at one table's data address.
/// `last_idx` links each published index version to the bundle id of the
/// version it superseded, forming a chain back through history. Owned
/// exclusively by one table's logical address; never shared across tables.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChainIndex {
    /// Ordered list of live bundle ids, oldest first.
    pub bundles: Vec<String>,
    /// Bundle id of the index version this one replaced, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_idx: Option<String>,
}

impl ChainIndex {
    /// Append a bundle id in its canonical string form.
    pub fn append(&mut self, id: &BundleId) {
        self.bundles.push(id.to_string());
    }

    /// Remove a bundle id if present; returns whether a removal occurred.
    pub fn remove(&mut self, id: &BundleId) -> bool {
        let before = self.bundles.len();
        self.bundles.retain(|b| b != id.as_str());
        self.bundles.len() != before
    }

    /// Whether the index currently lists this bundle id.
    #[must_use]
    pub fn contains(&self, id: &BundleId) -> bool {
        self.bundles.iter().any(|b| b == id.as_str())
    }
}
