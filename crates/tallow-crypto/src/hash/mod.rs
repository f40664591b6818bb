//! Cryptographic hash functions
//!
//! SHA-256 is the sole hash used by this crate: the relay never learns
//! a code phrase, only the SHA-256 of it, and persistent rooms are
//! addressed by a broker-minted UUID rather than a hash.

pub mod sha256;

pub use self::sha256::hash;
