//! # Bundle Reconstruction
//!
//! Reassembles one logical payload from the fragments of a single bundle.
//!
//! ## Algorithm
//!
//! 1. Take the representative metadata (bundle id, tag, attachment
//!    timestamp, fragment id list) from the first fragment in original scan
//!    order
//! 2. Sort the group by `current_index` ascending
//! 3. Concatenate the payload slices in that order
//! 4. Strip the trailing filler run and restore even length
//! 5. Decode the normalized text back to the payload string

use crate::domain::encoding::{decode_payload, normalize_encoded};
use crate::domain::errors::BundleStoreError;
use shared_types::{Fragment, StorageItem};

/// Reassemble a group of fragments sharing one bundle id.
///
/// The caller guarantees the group is non-empty and homogeneous in
/// `bundle_id`; fragments arrive in original scan order.
pub fn reassemble(group: &[Fragment]) -> Result<StorageItem, BundleStoreError> {
    let representative = &group[0];

    let mut ordered: Vec<&Fragment> = group.iter().collect();
    ordered.sort_by_key(|f| f.current_index);

    let concatenated: String = ordered.iter().map(|f| f.payload.as_str()).collect();
    let normalized = normalize_encoded(&concatenated);
    let payload = decode_payload(&normalized, &representative.bundle_id)?;

    Ok(StorageItem {
        bundle_id: representative.bundle_id.clone(),
        payload,
        tag: representative.tag.clone(),
        attachment_timestamp: representative.attachment_timestamp,
        fragment_ids: group.iter().map(|f| f.fragment_id.clone()).collect(),
    })
}
