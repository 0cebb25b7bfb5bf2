//! # Core Domain Entities
//!
//! Defines the value types that cross the subsystem boundary.
//!
//! ## Clusters
//!
//! - **Routing**: `Address`, `Tag`
//! - **Ledger**: `BundleId`, `FragmentId`, `Fragment`
//! - **Results**: `StorageItem`

use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Milliseconds since the Unix epoch.
///
/// Signed so that timestamp deltas can be computed without underflow
/// gymnastics; negative values never validate.
pub type Timestamp = i64;

/// Maximum length of an [`Address`] in encoded characters.
pub const MAX_ADDRESS_LEN: usize = 81;

/// Maximum length of a [`Tag`] in encoded characters.
pub const MAX_TAG_LEN: usize = 27;

fn is_routing_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit()
}

// =============================================================================
// CLUSTER A: ROUTING
// =============================================================================

/// A ledger routing key under which bundles are written and searched.
///
/// Addresses are 1..=81 characters drawn from `[A-Z0-9]`. The constructor is
/// the only way to obtain one, so an `Address` in hand is always well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Create a validated address.
    ///
    /// ## Errors
    ///
    /// - `AddressFormat`: empty, longer than 81 chars, or outside `[A-Z0-9]`
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty()
            || value.len() > MAX_ADDRESS_LEN
            || !value.chars().all(is_routing_char)
        {
            return Err(ValidationError::AddressFormat { value });
        }
        Ok(Self(value))
    }

    /// The address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A classification label attached to every fragment at write time.
///
/// Tags are 1..=27 characters drawn from `[A-Z0-9]`. Scans filter on exact
/// tag equality, so tags partition the bundles at one address into classes
/// (user data vs. index records).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Create a validated tag.
    ///
    /// ## Errors
    ///
    /// - `TagFormat`: empty, longer than 27 chars, or outside `[A-Z0-9]`
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() || value.len() > MAX_TAG_LEN || !value.chars().all(is_routing_char) {
            return Err(ValidationError::TagFormat { value });
        }
        Ok(Self(value))
    }

    /// The tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// CLUSTER B: LEDGER IDENTIFIERS & FRAGMENTS
// =============================================================================

/// Identifier shared by all fragments of one logical stored value.
///
/// Assigned by the ledger at confirmation time; opaque to this library.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BundleId(String);

impl BundleId {
    /// Wrap a ledger-assigned bundle identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BundleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a single ledger fragment (one transaction-sized chunk).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FragmentId(String);

impl FragmentId {
    /// Wrap a ledger-assigned fragment identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One ledger-transaction-sized chunk of an encoded payload.
///
/// Fragments belonging to one logical value share exactly one `bundle_id`
/// and are reassembled in strictly increasing `current_index` order. The
/// `attachment_timestamp` is assigned by the ledger at confirmation and is
/// authoritative; it is distinct from any timestamp a writer declares inside
/// the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Ledger-assigned fragment identifier.
    pub fragment_id: FragmentId,
    /// Bundle this fragment belongs to.
    pub bundle_id: BundleId,
    /// Address the fragment was written under.
    pub address: Address,
    /// Classification tag the fragment was written under.
    pub tag: Tag,
    /// Encoded payload slice carried by this fragment.
    pub payload: String,
    /// Position of this fragment within its bundle (0-based).
    pub current_index: u32,
    /// Ledger-assigned confirmation time in milliseconds (authoritative).
    pub attachment_timestamp: Timestamp,
}

// =============================================================================
// CLUSTER C: RESULTS
// =============================================================================

/// The reconstructed result of a successful save or load.
///
/// Read-only and value-like; owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageItem {
    /// Bundle identifier of the stored value.
    pub bundle_id: BundleId,
    /// The reconstructed payload.
    pub payload: String,
    /// Classification tag of the bundle.
    pub tag: Tag,
    /// Ledger attachment time of the bundle's representative fragment.
    pub attachment_timestamp: Timestamp,
    /// Identifiers of the fragments that made up the bundle.
    pub fragment_ids: Vec<FragmentId>,
}
