//! # HMAC Signer / Verifier
//!
//! Default implementation of the `Signer`/`Verifier` capability pair using
//! HMAC-SHA256 over the canonical signature material, with hex-encoded
//! signatures. Verification goes through the MAC's own comparison, which is
//! constant-time.

use crate::ports::outbound::{Signer, Verifier};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 signer over a shared secret.
pub struct HmacSigner {
    key: Vec<u8>,
}

impl HmacSigner {
    /// Create a signer over the given shared secret.
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }
}

impl Signer for HmacSigner {
    fn sign(&self, material: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC key size is always valid");
        mac.update(material.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

/// HMAC-SHA256 verifier over the same shared secret.
pub struct HmacVerifier {
    key: Vec<u8>,
}

impl HmacVerifier {
    /// Create a verifier over the given shared secret.
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }
}

impl Verifier for HmacVerifier {
    fn verify(&self, material: &str, signature: &str) -> bool {
        let Ok(expected) = hex::decode(signature) else {
            return false;
        };

        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC key size is always valid");
        mac.update(material.as_bytes());
        mac.verify_slice(&expected).is_ok()
    }
}
