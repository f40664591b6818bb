//! Error types for cryptographic operations

use thiserror::Error;

/// Result type alias using CryptoError
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Errors that can occur during cryptographic operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// AEAD decryption failed (wrong key or tampered ciphertext)
    #[error("decryption failed")]
    DecryptionFailed,

    /// AEAD encryption failed
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Key material has the wrong length or is otherwise malformed
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Ciphertext is too short to contain a nonce
    #[error("invalid ciphertext: {0}")]
    InvalidCiphertext(String),

    /// PAKE message failed to parse or decode
    #[error("invalid PAKE message: {0}")]
    InvalidMessage(String),

    /// PAKE key exchange did not complete successfully
    #[error("key exchange failed")]
    KeyExchangeFailed,

    /// Key derivation failed
    #[error("key derivation failed: {0}")]
    KeyGeneration(String),

    /// I/O error during a cryptographic operation (e.g. core-dump guard)
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for CryptoError {
    fn from(e: std::io::Error) -> Self {
        CryptoError::Io(e.to_string())
    }
}
