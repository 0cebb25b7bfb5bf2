//! # Adapters Layer
//!
//! Concrete implementations of the outbound ports.

pub mod hmac;
pub mod memory_config;

pub use self::hmac::{HmacSigner, HmacVerifier};
pub use memory_config::InMemoryConfigProvider;
