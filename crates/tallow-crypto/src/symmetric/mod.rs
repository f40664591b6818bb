//! Symmetric encryption primitives
//!
//! AES-256-GCM is the sole cipher suite. The relay never needs to
//! negotiate a suite since both parties derive identical key material
//! from the same PAKE session.

pub mod aes_gcm;

pub use aes_gcm::{decrypt, encrypt};

/// Key size in bytes for the symmetric cipher
pub const KEY_SIZE: usize = 32;

/// Nonce size in bytes
pub const NONCE_SIZE: usize = 12;

/// Authentication tag size in bytes
pub const TAG_SIZE: usize = 16;
