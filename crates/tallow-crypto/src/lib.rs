//! # Tallow Cryptography Library
//!
//! Cryptographic primitives for the Tallow secure rendezvous-and-transfer
//! engine: AES-256-GCM, HKDF-SHA-256, SHA-256, and a two-party
//! password-authenticated key exchange (PAKE) over P-256.
//!
//! ## Features
//!
//! - **Memory Safety**: automatic zeroization of sensitive data
//! - **Domain Separation**: HKDF `info` strings and PAKE transcript binding
//!   keep unrelated derivations from colliding

#![warn(missing_docs)]
// `mem::wipe` needs a handful of unsafe libc calls to disable core dumps
// and mlock key material; those are individually annotated and scoped.
#![deny(unsafe_code)]

pub mod error;
pub mod hash;
pub mod kdf;
pub mod mem;
pub mod pake;
pub mod symmetric;

pub use error::{CryptoError, Result};

/// Library version constant
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the cryptography library (e.g., prevent core dumps)
///
/// Should be called once at process startup by embedding applications.
pub fn init() -> Result<()> {
    mem::wipe::prevent_core_dumps()?;
    Ok(())
}
