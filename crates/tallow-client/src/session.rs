//! Per-transfer PAKE session
//!
//! Wraps the two-party P-256 exchange from `tallow_crypto::pake` and
//! holds the derived shared key for no longer than the transfer needs
//! it. The session id binding the transcript is the room id both sides
//! learn from `ROOM_READY`, not the code hash, so the same passphrase
//! reused across persistent rooms never collapses to the same key.

use tallow_crypto::mem::SecureBuf;
use tallow_crypto::pake::{PakeParticipantA, PakeParticipantB};

use crate::error::Result;

/// Which side of the exchange this session plays
///
/// The sender is always the room creator and always speaks first
/// (`PAKE_A`); the receiver is always the joiner and replies (`PAKE_B`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Room creator, sends `PAKE_A`
    Sender,
    /// Joiner, sends `PAKE_B`
    Receiver,
}

enum Participant {
    A(PakeParticipantA),
    B(PakeParticipantB),
}

/// One transfer's PAKE state, from code phrase to derived shared key
pub struct PakeSession {
    participant: Participant,
}

impl PakeSession {
    /// Start a session for `role`, bound to `session_id` (the room id)
    pub fn new(role: Role, code_phrase: &str, session_id: &[u8]) -> Result<Self> {
        let participant = match role {
            Role::Sender => Participant::A(PakeParticipantA::new(code_phrase, session_id)?),
            Role::Receiver => Participant::B(PakeParticipantB::new(code_phrase, session_id)?),
        };
        Ok(Self { participant })
    }

    /// SHA-256 of the code phrase, sent to the relay as `code_hash`
    pub fn code_hash(&self) -> [u8; 32] {
        match &self.participant {
            Participant::A(p) => p.code_hash(),
            Participant::B(p) => p.code_hash(),
        }
    }

    /// This side's outbound PAKE public value
    pub fn public_message(&self) -> &[u8] {
        match &self.participant {
            Participant::A(p) => p.public_message(),
            Participant::B(p) => p.public_message(),
        }
    }

    /// Consume the peer's public value and derive the shared key
    pub fn finish(self, peer_public: &[u8]) -> Result<SecureBuf<[u8; 32]>> {
        let key = match &self.participant {
            Participant::A(p) => p.finish(peer_public)?,
            Participant::B(p) => p.finish(peer_public)?,
        };
        Ok(SecureBuf::new(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_and_receiver_agree_on_key() {
        let sender = PakeSession::new(Role::Sender, "correct-horse-battery-staple", b"room-1").unwrap();
        let receiver = PakeSession::new(Role::Receiver, "correct-horse-battery-staple", b"room-1").unwrap();

        let sender_public = sender.public_message().to_vec();
        let receiver_public = receiver.public_message().to_vec();

        let sender_key = sender.finish(&receiver_public).unwrap();
        let receiver_key = receiver.finish(&sender_public).unwrap();

        assert_eq!(sender_key.expose_secret(), receiver_key.expose_secret());
    }

    #[test]
    fn test_mismatched_passphrase_yields_different_key() {
        let sender = PakeSession::new(Role::Sender, "right-phrase", b"room-1").unwrap();
        let receiver = PakeSession::new(Role::Receiver, "wrong-phrase", b"room-1").unwrap();

        let sender_public = sender.public_message().to_vec();
        let receiver_public = receiver.public_message().to_vec();

        let sender_key = sender.finish(&receiver_public).unwrap();
        let receiver_key = receiver.finish(&sender_public).unwrap();

        assert_ne!(sender_key.expose_secret(), receiver_key.expose_secret());
    }

    #[test]
    fn test_same_passphrase_different_rooms_yields_different_key() {
        let sender_a = PakeSession::new(Role::Sender, "same-phrase", b"room-a").unwrap();
        let receiver_a = PakeSession::new(Role::Receiver, "same-phrase", b"room-a").unwrap();
        let key_a = sender_a
            .finish(receiver_a.public_message())
            .unwrap();

        let sender_b = PakeSession::new(Role::Sender, "same-phrase", b"room-b").unwrap();
        let receiver_b = PakeSession::new(Role::Receiver, "same-phrase", b"room-b").unwrap();
        let key_b = sender_b
            .finish(receiver_b.public_message())
            .unwrap();

        assert_ne!(key_a.expose_secret(), key_b.expose_secret());
    }
}
