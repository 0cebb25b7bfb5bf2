//! # Payload Encoding
//!
//! Payloads are hex-encoded (lowercase) before fragmentation, so every
//! well-formed encoded payload has even length (two chars per byte). The
//! final fragment of a bundle is padded to capacity with the reserved filler
//! character.
//!
//! The filler `'9'` is itself a member of the encoded alphabet, so stripping
//! a trailing filler run on reconstruction can consume characters that
//! belonged to the payload. The even-length invariant is what detects this:
//! an odd post-strip length means exactly one payload character was eaten,
//! and it can only have been a `'9'`.

use crate::domain::errors::BundleStoreError;
use shared_types::BundleId;

/// Reserved filler character used to pad the final fragment of a bundle.
pub const PAD_CHAR: char = '9';

/// Capacity of a single ledger fragment in encoded characters.
pub const FRAGMENT_CAPACITY: usize = 2187;

/// Hex-encode a payload string for fragmentation.
#[must_use]
pub fn encode_payload(payload: &str) -> String {
    hex::encode(payload.as_bytes())
}

/// Decode an encoded payload back to its original string form.
///
/// ## Errors
///
/// - `Decode`: the encoded text is not valid hex or the decoded bytes are
///   not valid UTF-8 (possible when filler stripping consumed payload
///   characters)
pub fn decode_payload(encoded: &str, bundle_id: &BundleId) -> Result<String, BundleStoreError> {
    let bytes = hex::decode(encoded).map_err(|e| BundleStoreError::Decode {
        bundle_id: bundle_id.to_string(),
        message: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| BundleStoreError::Decode {
        bundle_id: bundle_id.to_string(),
        message: e.to_string(),
    })
}

/// Split an encoded payload into fragment-sized slices.
///
/// Every slice is exactly [`FRAGMENT_CAPACITY`] characters; the final slice
/// is padded with [`PAD_CHAR`]. The input must be non-empty (enforced by the
/// service before encoding).
#[must_use]
pub fn fragment_payload(encoded: &str) -> Vec<String> {
    let mut slices: Vec<String> = encoded
        .as_bytes()
        .chunks(FRAGMENT_CAPACITY)
        .map(|chunk| {
            // Encoded text is pure ASCII hex, so byte chunking is char-safe.
            String::from_utf8(chunk.to_vec()).unwrap_or_default()
        })
        .collect();

    if let Some(last) = slices.last_mut() {
        while last.len() < FRAGMENT_CAPACITY {
            last.push(PAD_CHAR);
        }
    }

    slices
}

/// Normalize a concatenated fragment payload after reassembly.
///
/// Strips the trailing run of [`PAD_CHAR`], then restores even length by
/// re-appending exactly one filler character if the strip consumed a
/// trailing payload character.
#[must_use]
pub fn normalize_encoded(concatenated: &str) -> String {
    let mut normalized: String = concatenated
        .trim_end_matches(PAD_CHAR)
        .to_string();

    if normalized.len() % 2 != 0 {
        normalized.push(PAD_CHAR);
    }

    normalized
}
