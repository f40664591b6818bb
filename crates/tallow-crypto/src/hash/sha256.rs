//! SHA-256 hash function

use sha2::{Digest, Sha256};

/// Hash data using SHA-256
///
/// Used to turn a code phrase into the room identifier sent to the
/// relay, so the relay itself never observes the phrase.
pub fn hash(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}
