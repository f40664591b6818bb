//! Client-facing error taxonomy
//!
//! Every operation in this crate returns up to its caller rather than
//! retrying internally; the caller decides whether a fresh attempt
//! (new room, new code phrase) makes sense.

use thiserror::Error;

/// Result type alias using [`ClientError`]
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors a transfer client operation can surface
#[derive(Error, Debug)]
pub enum ClientError {
    /// The relay was unreachable or the WebSocket handshake failed
    #[error("failed to connect to relay: {0}")]
    Connect(String),

    /// A message arrived that the current state didn't expect, or failed to decode
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    /// The relay has no room for the given code hash or room id
    #[error("room not found")]
    RoomNotFound,

    /// The room already has two members
    #[error("room is full")]
    RoomFull,

    /// A second claim on the room used a code hash that doesn't match
    #[error("code phrase mismatch")]
    CodeMismatch,

    /// The PAKE exchange did not produce a confirmed shared key
    #[error("key exchange failed")]
    PakeFailed,

    /// AES-256-GCM authentication failed on the filename or content
    #[error("decryption failed, content may be corrupted or the passphrase was wrong")]
    DecryptionFailed,

    /// A blocking operation exceeded its deadline
    #[error("operation timed out")]
    Timeout,

    /// Local file I/O failed
    #[error("I/O error: {0}")]
    Io(String),

    /// Caller supplied a key of the wrong shape (internal misuse)
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// A ciphertext blob was too short or otherwise structurally invalid
    #[error("invalid ciphertext: {0}")]
    InvalidCiphertext(String),
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::Io(e.to_string())
    }
}

impl From<tallow_protocol::ProtocolError> for ClientError {
    fn from(e: tallow_protocol::ProtocolError) -> Self {
        ClientError::ProtocolViolation(e.to_string())
    }
}

impl From<tallow_crypto::CryptoError> for ClientError {
    fn from(e: tallow_crypto::CryptoError) -> Self {
        use tallow_crypto::CryptoError::*;
        match e {
            DecryptionFailed => ClientError::DecryptionFailed,
            InvalidKey(msg) => ClientError::InvalidKey(msg),
            InvalidCiphertext(msg) => ClientError::InvalidCiphertext(msg),
            InvalidMessage(_) | KeyExchangeFailed | KeyGeneration(_) => ClientError::PakeFailed,
            Encryption(msg) => ClientError::InvalidCiphertext(msg),
            Io(msg) => ClientError::Io(msg),
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for ClientError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        ClientError::Connect(e.to_string())
    }
}

impl From<tallow_protocol::wire::messages::ErrorCode> for ClientError {
    fn from(code: tallow_protocol::wire::messages::ErrorCode) -> Self {
        use tallow_protocol::wire::messages::ErrorCode::*;
        match code {
            RoomNotFound => ClientError::RoomNotFound,
            RoomFull => ClientError::RoomFull,
            CodeMismatch => ClientError::CodeMismatch,
            PakeFailed => ClientError::PakeFailed,
            TransferFailed => ClientError::ProtocolViolation("peer transfer failed".into()),
            Timeout => ClientError::Timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tallow_crypto::CryptoError;
    use tallow_protocol::wire::messages::ErrorCode;

    #[test]
    fn test_relay_error_codes_map_to_matching_variants() {
        assert!(matches!(ClientError::from(ErrorCode::RoomNotFound), ClientError::RoomNotFound));
        assert!(matches!(ClientError::from(ErrorCode::RoomFull), ClientError::RoomFull));
        assert!(matches!(ClientError::from(ErrorCode::CodeMismatch), ClientError::CodeMismatch));
        assert!(matches!(ClientError::from(ErrorCode::PakeFailed), ClientError::PakeFailed));
        assert!(matches!(ClientError::from(ErrorCode::Timeout), ClientError::Timeout));
    }

    #[test]
    fn test_crypto_decryption_failure_maps_to_decryption_failed() {
        assert!(matches!(
            ClientError::from(CryptoError::DecryptionFailed),
            ClientError::DecryptionFailed
        ));
    }

    #[test]
    fn test_crypto_key_exchange_failure_maps_to_pake_failed() {
        assert!(matches!(ClientError::from(CryptoError::KeyExchangeFailed), ClientError::PakeFailed));
    }
}
