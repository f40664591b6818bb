//! Wire protocol: tagged envelopes over a self-describing text format
//!
//! Every message is wrapped in an [`Envelope`] carrying a type
//! discriminator, a routing `room_id`, and a send-time timestamp.
//! Byte-valued payload fields are base64-encoded so the whole envelope
//! can travel as a single WebSocket text frame.

pub mod codec;
pub mod messages;

pub use codec::{decode, encode};
pub use messages::{Envelope, ErrorCode, Message};
