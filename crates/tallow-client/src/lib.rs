//! # Tallow Transfer Client
//!
//! Drives one end of a passphrase-authenticated file transfer: dials
//! the relay, claims or joins a room, runs the PAKE exchange, and
//! seals or opens the one encrypted payload a transfer ever sends.
//!
//! Nothing here retries. Every failure, from a dropped socket to a
//! decrypt mismatch, surfaces as a [`ClientError`] to the caller, who
//! decides whether trying again with a new room makes sense.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod connection;
mod handshake;
mod receive;
mod safe_read;
mod send;
mod session;

pub mod error;

pub use error::{ClientError, Result};
pub use receive::{receive, receive_persistent};
pub use safe_read::safe_read;
pub use send::{send, send_persistent};
pub use session::{PakeSession, Role};

pub use tallow_protocol::room::generate_code_phrase;
pub use tallow_protocol::safe_content::SafeContent;

/// Default per-receive timeout applied to each blocking relay exchange
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// The relaxed per-receive timeout an interactive/CLI caller may prefer
pub const INTERACTIVE_TIMEOUT_SECS: u64 = 300;
