//! Memory safety utilities for cryptographic operations
//!
//! Secure buffer wrapping, constant-time comparison, and protection
//! against core dumps for sensitive cryptographic material.

pub mod constant_time;
pub mod secure_buf;
pub mod wipe;

pub use constant_time::ct_eq;
pub use secure_buf::SecureBuf;
pub use wipe::prevent_core_dumps;
