//! Codec for encoding/decoding Tallow protocol envelopes
//!
//! The wire format is JSON; byte-valued payload fields are base64
//! (standard alphabet, no padding) rather than raw bytes so an
//! envelope can travel as one WebSocket text frame.

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;

use super::Envelope;
use crate::error::{ProtocolError, Result};

/// Encode an envelope as a JSON text frame
pub fn encode(envelope: &Envelope) -> Result<String> {
    serde_json::to_string(envelope).map_err(|e| ProtocolError::EncodingError(e.to_string()))
}

/// Decode a JSON text frame into an envelope
pub fn decode(frame: &str) -> Result<Envelope> {
    serde_json::from_str(frame).map_err(|e| ProtocolError::DecodingError(e.to_string()))
}

/// base64-encode raw bytes for a payload field
pub fn encode_bytes(data: &[u8]) -> String {
    STANDARD_NO_PAD.encode(data)
}

/// base64-decode a payload field back to raw bytes
pub fn decode_bytes(field: &str) -> Result<Vec<u8>> {
    STANDARD_NO_PAD
        .decode(field)
        .map_err(|e| ProtocolError::InvalidMessage(format!("malformed base64 field: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::messages::{ErrorCode, Message};

    #[test]
    fn test_bytes_roundtrip() {
        let data = b"some binary payload \x00\x01\xff";
        let encoded = encode_bytes(data);
        let decoded = decode_bytes(&encoded).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_envelope_roundtrip_create_room() {
        let envelope = Envelope::without_room(
            Message::CreateRoom {
                code_hash: encode_bytes(&[1u8; 32]),
            },
            1_700_000_000_000,
        );

        let frame = encode(&envelope).unwrap();
        let decoded = decode(&frame).unwrap();

        match decoded.message {
            Message::CreateRoom { code_hash } => {
                assert_eq!(decode_bytes(&code_hash).unwrap(), vec![1u8; 32]);
            }
            other => panic!("unexpected message: {other:?}"),
        }
        assert_eq!(decoded.timestamp_ms, 1_700_000_000_000);
        assert!(decoded.room_id.is_empty());
    }

    #[test]
    fn test_envelope_roundtrip_room_joined_with_id() {
        let envelope = Envelope::new(
            Message::RoomJoined {
                room_id: Some("room-123".to_string()),
            },
            "room-123",
            42,
        );

        let frame = encode(&envelope).unwrap();
        let decoded = decode(&frame).unwrap();

        match decoded.message {
            Message::RoomJoined { room_id } => assert_eq!(room_id.as_deref(), Some("room-123")),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_envelope_roundtrip_error() {
        let envelope = Envelope::new(
            Message::Error {
                code: ErrorCode::RoomFull,
                message: "room already has two members".to_string(),
            },
            "room-abc",
            7,
        );

        let frame = encode(&envelope).unwrap();
        assert!(frame.contains("ROOM_FULL"));

        let decoded = decode(&frame).unwrap();
        match decoded.message {
            Message::Error { code, .. } => assert_eq!(code, ErrorCode::RoomFull),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_decode_garbage_is_decoding_error() {
        assert!(matches!(decode("not json"), Err(ProtocolError::DecodingError(_))));
    }

    #[test]
    fn test_decode_unknown_type_is_decoding_error() {
        let frame = r#"{"type":"NOT_A_REAL_TYPE","room_id":"","timestamp_ms":0}"#;
        assert!(decode(frame).is_err());
    }
}
