//! Password-authenticated key exchange
//!
//! A two-party PAKE over the NIST P-256 curve: the code phrase is mapped
//! to a curve point via hash-to-curve, so neither party ever transmits
//! anything an eavesdropper or relay could use to mount an offline
//! dictionary attack against the phrase itself.

pub mod p256_pake;

pub use p256_pake::{PakeParticipantA, PakeParticipantB};
