//! Room model shared between the relay and the transfer client
//!
//! A room is a rendezvous slot for exactly two peers. The relay owns the
//! authoritative `Room` value and its lifecycle; this module defines the
//! vocabulary (kind, state) both ends agree on, plus the code-phrase
//! generator.

pub mod code;
pub mod model;

pub use code::generate_code_phrase;
pub use model::{RoomKind, RoomState};
