//! Room-claim handshake shared by the sender and receiver flows

use std::time::Duration;

use tallow_protocol::wire::Message;

use crate::connection::RelayConnection;
use crate::error::{ClientError, Result};

/// Loop on room-claim replies until `ROOM_READY`, returning the room id
/// both sides now share.
///
/// `ROOM_JOINED` carries a room id only for a freshly-created persistent
/// room; `on_room_id` fires exactly once, the single time that happens.
/// The pure-creator branch of an ephemeral room never sees `ROOM_JOINED`
/// at all (the relay only sends it to the second party to arrive) and
/// this loop handles that by simply falling straight through to
/// `ROOM_READY`.
pub async fn wait_for_room_ready(
    conn: &mut RelayConnection,
    timeout: Duration,
    mut on_room_id: impl FnMut(String),
) -> Result<String> {
    loop {
        let envelope = conn.recv(timeout).await?;
        match envelope.message {
            Message::RoomJoined { room_id } => {
                if let Some(id) = room_id {
                    on_room_id(id);
                }
            }
            Message::RoomReady => return Ok(envelope.room_id),
            Message::Error { code, .. } => return Err(code.into()),
            other => {
                return Err(ClientError::ProtocolViolation(format!(
                    "unexpected {other:?} while waiting for ROOM_READY"
                )))
            }
        }
    }
}
