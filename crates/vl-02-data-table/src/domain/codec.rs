//! # Envelope Codec
//!
//! Wraps values in a [`SignedEnvelope`] and validates envelopes against the
//! ledger's authoritative attachment clock.
//!
//! ## Signature Material
//!
//! The signed material is the canonical JSON of the payload concatenated
//! with the decimal envelope timestamp. Both sides of the protocol derive
//! it from the same types through the same serializer, so it is
//! deterministic.

use crate::domain::errors::TableError;
use crate::ports::outbound::{Signer, Verifier};
use serde::Serialize;
use shared_types::{SignedEnvelope, Timestamp};
use vl_01_bundle_store::TimeSource;

/// Canonical signature material for `(data, timestamp)`.
pub fn signature_material<T: Serialize>(
    data: &T,
    timestamp: Timestamp,
) -> Result<String, TableError> {
    let json =
        serde_json::to_string(data).map_err(|e| TableError::Serialization(e.to_string()))?;
    Ok(format!("{json}{timestamp}"))
}

/// Wrap a payload in a signed envelope stamped with the current time.
///
/// ## Errors
///
/// - `Serialization`: the payload could not be canonically serialized
pub fn wrap<T: Serialize>(
    data: T,
    signer: &impl Signer,
    clock: &impl TimeSource,
) -> Result<SignedEnvelope<T>, TableError> {
    let timestamp = clock.now_ms();
    let material = signature_material(&data, timestamp)?;
    let signature = signer.sign(&material);

    Ok(SignedEnvelope {
        data,
        timestamp,
        signature,
    })
}

/// Validate an envelope against the ledger attachment clock.
///
/// Pure predicate; never errors. Returns true iff all of:
///
/// - `signature` is a non-empty string
/// - `attachment_timestamp` is positive
/// - `envelope.timestamp` is positive
/// - `attachment_timestamp - envelope.timestamp < replay_window_ms`
/// - the verifier accepts the signature over the canonical material
///
/// Any failing condition short-circuits to false, including a payload that
/// cannot be re-serialized.
pub fn validate<T: Serialize>(
    envelope: &SignedEnvelope<T>,
    attachment_timestamp: Timestamp,
    verifier: &impl Verifier,
    replay_window_ms: Timestamp,
) -> bool {
    if envelope.signature.is_empty() {
        return false;
    }
    if attachment_timestamp <= 0 {
        return false;
    }
    if envelope.timestamp <= 0 {
        return false;
    }
    if attachment_timestamp - envelope.timestamp >= replay_window_ms {
        return false;
    }

    let Ok(material) = signature_material(&envelope.data, envelope.timestamp) else {
        return false;
    };

    verifier.verify(&material, &envelope.signature)
}
