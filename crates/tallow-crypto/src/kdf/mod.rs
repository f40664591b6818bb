//! Key derivation functions
//!
//! HKDF-SHA-256 is used to turn the raw PAKE shared secret into a
//! domain-separated 256-bit AEAD key.

pub mod hkdf;

pub use self::hkdf::{derive, derive_multiple};
