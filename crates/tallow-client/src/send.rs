//! Sender-side transfer flow
//!
//! Mirrors spec.md's ordering exactly: `CREATE_ROOM`/`CREATE_PERSISTENT`,
//! wait for `ROOM_READY`, `PAKE_A` then consume `PAKE_B`, encrypt and
//! send, wait for `ACK`.

use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tallow_crypto::hash::hash as sha256;
use tallow_crypto::symmetric::encrypt;
use tallow_protocol::wire::codec::{decode_bytes, encode_bytes};
use tallow_protocol::wire::{Envelope, Message};

use crate::connection::RelayConnection;
use crate::error::{ClientError, Result};
use crate::handshake::wait_for_room_ready;
use crate::session::{PakeSession, Role};

fn now_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64
}

/// Send `file_path` to a peer who joins an ephemeral room keyed by `code_phrase`
pub async fn send(file_path: &Path, code_phrase: &str, relay_url: &str, deadline: Duration) -> Result<()> {
    let mut conn = RelayConnection::connect(relay_url).await?;

    let code_hash = encode_bytes(&sha256(code_phrase.as_bytes()));
    conn.send(&Envelope::without_room(Message::CreateRoom { code_hash }, now_ms())).await?;
    let room_id = wait_for_room_ready(&mut conn, deadline, |_| {}).await?;

    run_sender_transfer(&mut conn, file_path, code_phrase, &room_id, deadline).await
}

/// Send `file_path` into a fresh persistent room
///
/// `on_room_id` fires exactly once, with the broker-minted id, before
/// this function waits for a peer to join.
pub async fn send_persistent(
    file_path: &Path,
    code_phrase: &str,
    ttl_hours: i64,
    relay_url: &str,
    deadline: Duration,
    mut on_room_id: impl FnMut(String),
) -> Result<()> {
    let mut conn = RelayConnection::connect(relay_url).await?;

    conn.send(&Envelope::without_room(Message::CreatePersistent { ttl_hours }, now_ms())).await?;
    let room_id = wait_for_room_ready(&mut conn, deadline, &mut on_room_id).await?;

    run_sender_transfer(&mut conn, file_path, code_phrase, &room_id, deadline).await
}

async fn run_sender_transfer(
    conn: &mut RelayConnection,
    file_path: &Path,
    code_phrase: &str,
    room_id: &str,
    deadline: Duration,
) -> Result<()> {
    let file_bytes = tokio::fs::read(file_path).await?;
    let filename = file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ClientError::Io("source path has no file name".into()))?;

    let session = PakeSession::new(Role::Sender, code_phrase, room_id.as_bytes())?;
    conn.send(&Envelope::new(
        Message::PakeA { data: encode_bytes(session.public_message()) },
        room_id,
        now_ms(),
    ))
    .await?;

    let peer_public = match conn.recv(deadline).await?.message {
        Message::PakeB { data } => decode_bytes(&data)?,
        Message::Error { code, .. } => return Err(code.into()),
        other => {
            return Err(ClientError::ProtocolViolation(format!(
                "expected PAKE_B, got {other:?}"
            )))
        }
    };
    let key = session.finish(&peer_public)?;

    let enc_name = encrypt(key.expose_secret(), filename.as_bytes())?;
    let enc_data = encrypt(key.expose_secret(), &file_bytes)?;

    conn.send(&Envelope::new(
        Message::Encrypted {
            filename: encode_bytes(&enc_name),
            data: encode_bytes(&enc_data),
            total_parts: 1,
            part_num: 0,
        },
        room_id,
        now_ms(),
    ))
    .await?;

    match conn.recv(deadline).await?.message {
        Message::Ack => {
            conn.close().await?;
            Ok(())
        }
        Message::Error { code, .. } => Err(code.into()),
        other => Err(ClientError::ProtocolViolation(format!("expected ACK, got {other:?}"))),
    }
}
