//! Protocol message types

use serde::{Deserialize, Serialize};

/// Relay-reported error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No room exists for the given code hash or room id
    RoomNotFound,
    /// The room already has two members
    RoomFull,
    /// A second `CREATE_ROOM`/`JOIN_ROOM` used a code hash that doesn't match
    CodeMismatch,
    /// The PAKE exchange did not produce a confirmed shared key
    PakeFailed,
    /// The peer-to-peer transfer failed after pairing
    TransferFailed,
    /// A blocking operation exceeded its deadline
    Timeout,
}

/// Wire protocol messages
///
/// Byte-valued fields (`code_hash`, `data`, `filename`) are base64
/// strings on the wire; see [`super::codec`] for the encode/decode
/// helpers that handle the conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Message {
    /// Claim a fresh ephemeral room keyed by the code hash
    #[serde(rename = "CREATE_ROOM")]
    CreateRoom {
        /// base64 SHA-256 of the code phrase
        code_hash: String,
    },
    /// Join an existing ephemeral room by its code hash
    #[serde(rename = "JOIN_ROOM")]
    JoinRoom {
        /// base64 SHA-256 of the code phrase
        code_hash: String,
    },
    /// Claim a fresh persistent room with the given TTL
    #[serde(rename = "CREATE_PERSISTENT")]
    CreatePersistent {
        /// Hours until expiry; -1 means no expiry
        ttl_hours: i64,
    },
    /// Join an existing persistent room by its broker-minted id
    #[serde(rename = "JOIN_BY_ID")]
    JoinById {
        /// Broker-minted room identifier
        room_id: String,
    },
    /// Relay confirms a room was claimed or joined
    #[serde(rename = "ROOM_JOINED")]
    RoomJoined {
        /// Present for persistent-room creation so the creator learns the id
        #[serde(skip_serializing_if = "Option::is_none")]
        room_id: Option<String>,
    },
    /// Relay signals both members are present and forwarding has begun
    #[serde(rename = "ROOM_READY")]
    RoomReady,
    /// First PAKE message, sent by the room creator
    #[serde(rename = "PAKE_A")]
    PakeA {
        /// base64 PAKE public value
        data: String,
    },
    /// Second PAKE message, sent by the joiner
    #[serde(rename = "PAKE_B")]
    PakeB {
        /// base64 PAKE public value
        data: String,
    },
    /// Encrypted filename and content
    #[serde(rename = "ENCRYPTED")]
    Encrypted {
        /// base64 AES-256-GCM sealed filename
        filename: String,
        /// base64 AES-256-GCM sealed content
        data: String,
        /// Total number of parts in this transfer (always 1 today)
        total_parts: u32,
        /// Index of this part (always 0 today)
        part_num: u32,
    },
    /// Transfer acknowledgment
    #[serde(rename = "ACK")]
    Ack,
    /// Relay-reported error
    #[serde(rename = "ERROR")]
    Error {
        /// Machine-readable error code
        code: ErrorCode,
        /// Human-readable detail
        message: String,
    },
    /// Either party ending the connection cleanly
    #[serde(rename = "CLOSE")]
    Close,
}

/// The on-the-wire unit: a [`Message`] plus routing and timing metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// The typed payload; flattened so `type` sits alongside `room_id`
    #[serde(flatten)]
    pub message: Message,
    /// Routing identifier; empty for room-creation requests
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub room_id: String,
    /// Milliseconds since the Unix epoch, populated by the sender at send time
    pub timestamp_ms: u64,
}

impl Envelope {
    /// Wrap a message with a room id and the current timestamp
    pub fn new(message: Message, room_id: impl Into<String>, timestamp_ms: u64) -> Self {
        Self {
            message,
            room_id: room_id.into(),
            timestamp_ms,
        }
    }

    /// Wrap a message with no room id (used for room-creation requests)
    pub fn without_room(message: Message, timestamp_ms: u64) -> Self {
        Self::new(message, String::new(), timestamp_ms)
    }
}
