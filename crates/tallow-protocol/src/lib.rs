//! # Tallow Protocol
//!
//! The wire format, room model, safe-content wrapper, and code-phrase
//! generator shared between the relay and the transfer client.
//!
//! Nothing in this crate performs network I/O; it describes the shapes
//! that cross the wire and the rules both ends apply to them.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod room;
pub mod safe_content;
pub mod transfer;
pub mod wire;

pub use error::{ProtocolError, Result};
