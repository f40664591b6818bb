//! Protocol-layer error types

use thiserror::Error;

/// Result type alias using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Protocol-layer errors
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Message failed to parse or violated the wire format
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// A message was received in a state that does not expect it
    #[error("unexpected message type {0}")]
    UnexpectedMessage(String),

    /// Envelope failed to serialize
    #[error("encoding error: {0}")]
    EncodingError(String),

    /// Envelope failed to deserialize
    #[error("decoding error: {0}")]
    DecodingError(String),

    /// A state machine transition was attempted that the current state forbids
    #[error("invalid state transition: {from} -> {to}")]
    InvalidStateTransition {
        /// Originating state
        from: String,
        /// Attempted destination state
        to: String,
    },

    /// I/O error surfaced while building or consuming protocol data
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ProtocolError {
    fn from(e: std::io::Error) -> Self {
        ProtocolError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for ProtocolError {
    fn from(e: serde_json::Error) -> Self {
        ProtocolError::DecodingError(e.to_string())
    }
}
