//! HKDF (HMAC-based Key Derivation Function) implementation

use crate::error::{CryptoError, Result};
use hkdf::Hkdf;
use sha2::Sha256;

/// Derive key material using HKDF-SHA256
///
/// # Arguments
///
/// * `salt` - Optional salt value (use empty slice for no salt)
/// * `ikm` - Input key material
/// * `info` - Application-specific context information, used for domain
///   separation between unrelated derivations sharing the same `ikm`
/// * `len` - Length of output key material in bytes
pub fn derive(salt: &[u8], ikm: &[u8], info: &[u8], len: usize) -> Result<Vec<u8>> {
    let hk = Hkdf::<Sha256>::new(Some(salt), ikm);

    let mut okm = vec![0u8; len];
    hk.expand(info, &mut okm)
        .map_err(|e| CryptoError::KeyGeneration(format!("HKDF expansion failed: {e}")))?;

    Ok(okm)
}

/// Derive multiple domain-separated keys from a single input
///
/// Used when a single PAKE shared secret needs to yield more than one
/// subkey (e.g. distinct keys for filename and content).
pub fn derive_multiple(
    salt: &[u8],
    ikm: &[u8],
    contexts: &[(&[u8], usize)],
) -> Result<Vec<Vec<u8>>> {
    let hk = Hkdf::<Sha256>::new(Some(salt), ikm);

    let mut outputs = Vec::with_capacity(contexts.len());
    for (info, len) in contexts {
        let mut okm = vec![0u8; *len];
        hk.expand(info, &mut okm)
            .map_err(|e| CryptoError::KeyGeneration(format!("HKDF expansion failed: {e}")))?;
        outputs.push(okm);
    }

    Ok(outputs)
}
