//! AES-256-GCM encryption
//!
//! Unlike a transport cipher that manages its own nonce sequence across
//! many messages, each call here is a self-contained sealed blob: a
//! fresh random nonce is drawn per call and prepended to the output, so
//! the caller never has to track nonce state between the two messages a
//! transfer ever sends (encrypted filename, encrypted content).

use aes_gcm::{
    aead::{Aead, KeyInit, OsRng, Payload},
    AeadCore, Aes256Gcm, Nonce,
};

use crate::error::{CryptoError, Result};
use crate::symmetric::NONCE_SIZE;

/// Encrypt `plaintext` under `key`, returning `nonce || ciphertext || tag`.
///
/// A fresh 96-bit nonce is generated internally for every call, so the
/// same key may be reused across both messages of a transfer without
/// the caller having to coordinate nonce state.
pub fn encrypt(key: &[u8; 32], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new(key.into());
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, Payload { msg: plaintext, aad: &[] })
        .map_err(|e| CryptoError::Encryption(format!("AES-GCM encryption failed: {e}")))?;

    let mut out = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypt a blob produced by [`encrypt`]: `nonce || ciphertext || tag`.
pub fn decrypt(key: &[u8; 32], blob: &[u8]) -> Result<Vec<u8>> {
    if blob.len() < NONCE_SIZE {
        return Err(CryptoError::InvalidCiphertext(
            "ciphertext shorter than nonce".into(),
        ));
    }

    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_SIZE);
    let cipher = Aes256Gcm::new(key.into());
    let nonce = Nonce::from_slice(nonce_bytes);

    cipher
        .decrypt(nonce, Payload { msg: ciphertext, aad: &[] })
        .map_err(|_| CryptoError::DecryptionFailed)
}
