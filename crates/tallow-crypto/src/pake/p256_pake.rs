//! PAKE over P-256
//!
//! Structurally this mirrors a CPace-style exchange: the code phrase is
//! hashed to a generator point on the curve, each side contributes a
//! random scalar multiple of that generator, and the session key is
//! derived from the resulting shared point with the full transcript
//! bound in via HKDF. Party A's message always precedes party B's, so
//! the transcript order is fixed rather than chosen per role.

use elliptic_curve::hash2curve::{ExpandMsgXmd, GroupDigest};
use elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use elliptic_curve::Field;
use p256::{AffinePoint, EncodedPoint, NistP256, ProjectivePoint, Scalar};
use rand_core::OsRng;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::error::{CryptoError, Result};
use crate::hash::sha256;
use crate::kdf::hkdf;

const PAKE_DOMAIN: &str = "tallow-pake-p256-v1";
const HASH_TO_CURVE_DST: &[u8] = b"tallow-pake-p256-v1-hash2curve";
const SESSION_KEY_INFO: &[u8] = b"tallow-pake-p256-v1-session-key";

fn derive_generator(code_phrase: &str, session_id: &[u8]) -> Result<ProjectivePoint> {
    let mut msg = Vec::new();
    msg.extend_from_slice(PAKE_DOMAIN.as_bytes());
    msg.push(0x00);
    msg.extend_from_slice(code_phrase.as_bytes());
    msg.push(0x00);
    msg.extend_from_slice(session_id);

    NistP256::hash_from_bytes::<ExpandMsgXmd<Sha256>>(&[&msg], &[HASH_TO_CURVE_DST])
        .map_err(|e| CryptoError::KeyGeneration(format!("hash-to-curve failed: {e}")))
}

fn decode_point(bytes: &[u8]) -> Result<ProjectivePoint> {
    let encoded = EncodedPoint::from_bytes(bytes)
        .map_err(|_| CryptoError::InvalidMessage("malformed PAKE point encoding".into()))?;

    let affine = AffinePoint::from_encoded_point(&encoded);
    if affine.is_none().into() {
        return Err(CryptoError::InvalidMessage(
            "PAKE point is not on the curve".into(),
        ));
    }
    let affine = Option::from(affine).expect("checked is_none above");
    Ok(ProjectivePoint::from(affine))
}

fn finish(
    own_scalar: &Scalar,
    their_public: &[u8],
    a_public: &[u8],
    b_public: &[u8],
) -> Result<[u8; 32]> {
    let their_point = decode_point(their_public)?;
    let shared = their_point * own_scalar;

    if bool::from(shared.is_identity()) {
        return Err(CryptoError::KeyExchangeFailed);
    }

    let shared_bytes = shared.to_affine().to_encoded_point(true).as_bytes().to_vec();

    let mut transcript = Vec::new();
    transcript.extend_from_slice(PAKE_DOMAIN.as_bytes());
    transcript.extend_from_slice(a_public);
    transcript.extend_from_slice(b_public);
    transcript.extend_from_slice(&shared_bytes);

    let okm = hkdf::derive(&[], &transcript, SESSION_KEY_INFO, 32)
        .map_err(|_| CryptoError::KeyExchangeFailed)?;

    let mut key = [0u8; 32];
    key.copy_from_slice(&okm);
    Ok(key)
}

/// The first party to act in the exchange (the room creator)
pub struct PakeParticipantA {
    scalar: Scalar,
    public: Vec<u8>,
    code_hash: [u8; 32],
}

impl Drop for PakeParticipantA {
    fn drop(&mut self) {
        self.scalar.zeroize();
        self.code_hash.zeroize();
    }
}

impl PakeParticipantA {
    /// Start the exchange from a code phrase and a channel-binding session id
    pub fn new(code_phrase: &str, session_id: &[u8]) -> Result<Self> {
        let generator = derive_generator(code_phrase, session_id)?;
        let scalar = Scalar::random(&mut OsRng);
        let public = (generator * scalar)
            .to_affine()
            .to_encoded_point(true)
            .as_bytes()
            .to_vec();
        let code_hash = sha256::hash(code_phrase.as_bytes());

        Ok(Self {
            scalar,
            public,
            code_hash,
        })
    }

    /// SHA-256 of the code phrase, sent to the relay in place of the phrase itself
    pub fn code_hash(&self) -> [u8; 32] {
        self.code_hash
    }

    /// The compressed point to send to party B as `PAKE_A`
    pub fn public_message(&self) -> &[u8] {
        &self.public
    }

    /// Consume party B's `PAKE_B` message and derive the shared session key
    pub fn finish(&self, b_public: &[u8]) -> Result<[u8; 32]> {
        finish(&self.scalar, b_public, &self.public, b_public)
    }
}

/// The second party to act in the exchange (the joiner)
pub struct PakeParticipantB {
    scalar: Scalar,
    public: Vec<u8>,
    code_hash: [u8; 32],
}

impl Drop for PakeParticipantB {
    fn drop(&mut self) {
        self.scalar.zeroize();
        self.code_hash.zeroize();
    }
}

impl PakeParticipantB {
    /// Start the exchange from a code phrase and a channel-binding session id
    pub fn new(code_phrase: &str, session_id: &[u8]) -> Result<Self> {
        let generator = derive_generator(code_phrase, session_id)?;
        let scalar = Scalar::random(&mut OsRng);
        let public = (generator * scalar)
            .to_affine()
            .to_encoded_point(true)
            .as_bytes()
            .to_vec();
        let code_hash = sha256::hash(code_phrase.as_bytes());

        Ok(Self {
            scalar,
            public,
            code_hash,
        })
    }

    /// SHA-256 of the code phrase, checked against party A's before joining
    pub fn code_hash(&self) -> [u8; 32] {
        self.code_hash
    }

    /// The compressed point to send to party A as `PAKE_B`
    pub fn public_message(&self) -> &[u8] {
        &self.public
    }

    /// Consume party A's `PAKE_A` message and derive the shared session key
    pub fn finish(&self, a_public: &[u8]) -> Result<[u8; 32]> {
        finish(&self.scalar, a_public, a_public, &self.public)
    }
}
