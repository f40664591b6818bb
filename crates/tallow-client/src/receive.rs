//! Receiver-side transfer flow
//!
//! Mirrors spec.md's ordering: `JOIN_ROOM`/`JOIN_BY_ID`, wait for
//! `ROOM_READY`, consume `PAKE_A` then reply `PAKE_B`, wait for
//! `ENCRYPTED`, decrypt, write to disk, reply `ACK`. A decrypt failure
//! on either field is fatal; no partial file is ever written.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tallow_crypto::hash::hash as sha256;
use tallow_crypto::symmetric::decrypt;
use tallow_protocol::wire::codec::{decode_bytes, encode_bytes};
use tallow_protocol::wire::{Envelope, Message};

use crate::connection::RelayConnection;
use crate::error::{ClientError, Result};
use crate::handshake::wait_for_room_ready;
use crate::session::{PakeSession, Role};

fn now_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64
}

/// Join the ephemeral room keyed by `code_phrase` and receive the file
/// a sender offers there, storing it under `output_dir`
pub async fn receive(code_phrase: &str, output_dir: &Path, relay_url: &str, deadline: Duration) -> Result<PathBuf> {
    let mut conn = RelayConnection::connect(relay_url).await?;

    let code_hash = encode_bytes(&sha256(code_phrase.as_bytes()));
    conn.send(&Envelope::without_room(Message::JoinRoom { code_hash }, now_ms())).await?;
    let room_id = wait_for_room_ready(&mut conn, deadline, |_| {}).await?;

    run_receiver_transfer(&mut conn, code_phrase, &room_id, output_dir, deadline).await
}

/// Join a persistent room by its broker-minted id and receive the file
/// a sender offers there, storing it under `output_dir`
pub async fn receive_persistent(
    room_id: &str,
    code_phrase: &str,
    output_dir: &Path,
    relay_url: &str,
    deadline: Duration,
) -> Result<PathBuf> {
    let mut conn = RelayConnection::connect(relay_url).await?;

    conn.send(&Envelope::without_room(
        Message::JoinById { room_id: room_id.to_string() },
        now_ms(),
    ))
    .await?;
    let confirmed_room_id = wait_for_room_ready(&mut conn, deadline, |_| {}).await?;

    run_receiver_transfer(&mut conn, code_phrase, &confirmed_room_id, output_dir, deadline).await
}

async fn run_receiver_transfer(
    conn: &mut RelayConnection,
    code_phrase: &str,
    room_id: &str,
    output_dir: &Path,
    deadline: Duration,
) -> Result<PathBuf> {
    let peer_public = match conn.recv(deadline).await?.message {
        Message::PakeA { data } => decode_bytes(&data)?,
        Message::Error { code, .. } => return Err(code.into()),
        other => {
            return Err(ClientError::ProtocolViolation(format!(
                "expected PAKE_A, got {other:?}"
            )))
        }
    };

    let session = PakeSession::new(Role::Receiver, code_phrase, room_id.as_bytes())?;
    let reply = Envelope::new(
        Message::PakeB { data: encode_bytes(session.public_message()) },
        room_id,
        now_ms(),
    );
    let key = session.finish(&peer_public)?;
    conn.send(&reply).await?;

    let (enc_name, enc_data) = match conn.recv(deadline).await?.message {
        Message::Encrypted { filename, data, .. } => (decode_bytes(&filename)?, decode_bytes(&data)?),
        Message::Error { code, .. } => return Err(code.into()),
        other => {
            return Err(ClientError::ProtocolViolation(format!(
                "expected ENCRYPTED, got {other:?}"
            )))
        }
    };

    let filename_bytes = decrypt(key.expose_secret(), &enc_name)?;
    let content = decrypt(key.expose_secret(), &enc_data)?;
    let filename = String::from_utf8(filename_bytes)
        .map_err(|_| ClientError::DecryptionFailed)?;

    let safe_name = Path::new(&filename)
        .file_name()
        .ok_or(ClientError::DecryptionFailed)?;
    let stored_path = output_dir.join(safe_name);
    tokio::fs::write(&stored_path, &content).await?;

    conn.send(&Envelope::new(Message::Ack, room_id, now_ms())).await?;
    conn.close().await?;

    Ok(stored_path)
}
