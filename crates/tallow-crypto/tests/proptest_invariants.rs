//! Property-based invariants for the crypto primitives.
//!
//! Run with: cargo test --test proptest_invariants

use proptest::prelude::*;
use tallow_crypto::hash::sha256;
use tallow_crypto::pake::{PakeParticipantA, PakeParticipantB};
use tallow_crypto::symmetric::{decrypt, encrypt};

proptest! {
    /// Any plaintext survives an encrypt/decrypt round trip under the same key.
    #[test]
    fn aes_gcm_roundtrip_any_plaintext(
        key in prop::array::uniform32(any::<u8>()),
        plaintext in prop::collection::vec(any::<u8>(), 0..8192),
    ) {
        let blob = encrypt(&key, &plaintext).expect("encrypt should not fail");
        let recovered = decrypt(&key, &blob).expect("decrypt with correct key should succeed");
        prop_assert_eq!(recovered, plaintext);
    }

    /// Flipping any single byte of a sealed blob breaks authentication.
    #[test]
    fn aes_gcm_tamper_detected(
        key in prop::array::uniform32(any::<u8>()),
        plaintext in prop::collection::vec(any::<u8>(), 1..2048),
        flip_index in 0usize..2048,
    ) {
        let mut blob = encrypt(&key, &plaintext).unwrap();
        let idx = flip_index % blob.len();
        blob[idx] ^= 0x01;
        prop_assert!(decrypt(&key, &blob).is_err());
    }

    /// Two encryptions of the same plaintext under the same key never reuse a nonce.
    #[test]
    fn aes_gcm_nonce_uniqueness(
        key in prop::array::uniform32(any::<u8>()),
        plaintext in prop::collection::vec(any::<u8>(), 0..4096),
    ) {
        let a = encrypt(&key, &plaintext).unwrap();
        let b = encrypt(&key, &plaintext).unwrap();
        prop_assert_ne!(&a[..12], &b[..12]);
    }

    /// SHA-256 of a code phrase is stable across repeated calls.
    #[test]
    fn code_hash_is_stable(phrase in "[a-z]{3,12}-[a-z]{3,12}-[a-z]{3,12}-[0-9]{1,2}") {
        prop_assert_eq!(sha256::hash(phrase.as_bytes()), sha256::hash(phrase.as_bytes()));
    }

    /// Two parties that start from the same code phrase and session id
    /// always agree on a shared key.
    #[test]
    fn pake_agrees_on_matching_phrase(
        phrase in "[a-z]{4,10}-[a-z]{4,10}-[a-z]{4,10}-[0-9]{1,2}",
        session_id in prop::collection::vec(any::<u8>(), 4..32),
    ) {
        let a = PakeParticipantA::new(&phrase, &session_id).unwrap();
        let b = PakeParticipantB::new(&phrase, &session_id).unwrap();

        let key_a = a.finish(b.public_message()).unwrap();
        let key_b = b.finish(a.public_message()).unwrap();

        prop_assert_eq!(key_a, key_b);
    }

    /// Two parties with different code phrases (but the same session id)
    /// derive different keys with overwhelming probability.
    #[test]
    fn pake_disagrees_on_mismatched_phrase(
        phrase_a in "[a-z]{4,10}-[a-z]{4,10}-[a-z]{4,10}-[0-9]{1,2}",
        phrase_b in "[a-z]{4,10}-[a-z]{4,10}-[a-z]{4,10}-[0-9]{1,2}",
        session_id in prop::collection::vec(any::<u8>(), 4..32),
    ) {
        prop_assume!(phrase_a != phrase_b);

        let a = PakeParticipantA::new(&phrase_a, &session_id).unwrap();
        let b = PakeParticipantB::new(&phrase_b, &session_id).unwrap();

        let key_a = a.finish(b.public_message()).unwrap();
        let key_b = b.finish(a.public_message()).unwrap();

        prop_assert_ne!(key_a, key_b);
    }
}
