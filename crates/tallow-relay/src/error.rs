//! Relay-layer error types

use thiserror::Error;

/// Result type alias using RelayError
pub type Result<T> = std::result::Result<T, RelayError>;

/// Errors the broker can raise while handling room traffic
#[derive(Error, Debug)]
pub enum RelayError {
    /// No room exists for the given code hash or room id
    #[error("room not found")]
    RoomNotFound,

    /// The room already has two members
    #[error("room is full")]
    RoomFull,

    /// A room id was reused against a room of the wrong kind
    #[error("code or room id mismatch")]
    CodeMismatch,

    /// The server has reached its configured room capacity
    #[error("relay is at room capacity")]
    TooManyRooms,

    /// A frame could not be decoded as a protocol envelope
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    /// A message arrived that the broker does not expect in the current state
    #[error("unexpected message: {0}")]
    UnexpectedMessage(String),

    /// The WebSocket transport failed
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<tallow_protocol::ProtocolError> for RelayError {
    fn from(e: tallow_protocol::ProtocolError) -> Self {
        RelayError::MalformedFrame(e.to_string())
    }
}
