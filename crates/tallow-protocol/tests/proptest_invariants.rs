//! Property-based invariants for the wire codec and safe-content wrapper.

use proptest::prelude::*;
use tallow_protocol::safe_content::wrap;
use tallow_protocol::wire::messages::{ErrorCode, Message};
use tallow_protocol::wire::{decode, encode, Envelope};

fn arb_message() -> impl Strategy<Value = Message> {
    prop_oneof![
        "[A-Za-z0-9+/]{8,44}".prop_map(|code_hash| Message::CreateRoom { code_hash }),
        "[A-Za-z0-9+/]{8,44}".prop_map(|code_hash| Message::JoinRoom { code_hash }),
        (-1i64..=168i64).prop_map(|ttl_hours| Message::CreatePersistent { ttl_hours }),
        "[a-f0-9-]{8,36}".prop_map(|room_id| Message::JoinById { room_id }),
        prop::option::of("[a-f0-9-]{8,36}").prop_map(|room_id| Message::RoomJoined { room_id }),
        Just(Message::RoomReady),
        "[A-Za-z0-9+/]{4,64}".prop_map(|data| Message::PakeA { data }),
        "[A-Za-z0-9+/]{4,64}".prop_map(|data| Message::PakeB { data }),
        (
            "[A-Za-z0-9+/]{4,64}",
            "[A-Za-z0-9+/]{4,256}",
        )
            .prop_map(|(filename, data)| Message::Encrypted {
                filename,
                data,
                total_parts: 1,
                part_num: 0,
            }),
        Just(Message::Ack),
        (0u8..6u8, ".*").prop_map(|(code_idx, message)| {
            let code = match code_idx {
                0 => ErrorCode::RoomNotFound,
                1 => ErrorCode::RoomFull,
                2 => ErrorCode::CodeMismatch,
                3 => ErrorCode::PakeFailed,
                4 => ErrorCode::TransferFailed,
                _ => ErrorCode::Timeout,
            };
            Message::Error { code, message }
        }),
        Just(Message::Close),
    ]
}

proptest! {
    /// decode(encode(m)) == m for every message type and a range of payloads.
    #[test]
    fn wire_roundtrip(message in arb_message(), room_id in "[a-zA-Z0-9-]{0,36}", ts in 0u64..4_000_000_000_000) {
        let envelope = Envelope::new(message.clone(), room_id.clone(), ts);
        let frame = encode(&envelope).unwrap();
        let decoded = decode(&frame).unwrap();

        prop_assert_eq!(decoded.message, message);
        prop_assert_eq!(decoded.room_id, room_id);
        prop_assert_eq!(decoded.timestamp_ms, ts);
    }

    /// The BEGIN/END delimited region of wrap(bytes) equals bytes verbatim
    /// for any valid UTF-8 input (the wrapper's scanning and rendering
    /// operate on decoded text; see wrapper.rs for the lossy-decode note
    /// on genuinely invalid byte sequences).
    #[test]
    fn wrapper_never_alters_content(text in "[\\PC&&[^\0]]{0,512}") {
        let content = wrap("f.txt", text.as_bytes());
        prop_assert_eq!(content.delimited_region(), text.as_str());
        prop_assert_eq!(content.raw, text.as_bytes());
    }
}
