//! WebSocket transport
//!
//! Each connection speaks one JSON text frame per [`tallow_protocol::wire::Envelope`].
//! The first frame must be a room-claiming message (`CREATE_ROOM`, `JOIN_ROOM`,
//! `CREATE_PERSISTENT`, or `JOIN_BY_ID`); everything after that is either a
//! control frame the broker itself emits (`ROOM_JOINED`, `ROOM_READY`, `ERROR`)
//! or an opaque peer frame (`PAKE_A`, `PAKE_B`, `ENCRYPTED`, `ACK`, `CLOSE`)
//! forwarded verbatim to the other side once the room is `Ready`.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::extract::connect_info::ConnectInfo;
use axum::extract::ws::{Message as WsMsg, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures::{SinkExt, StreamExt};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, warn};

use tallow_protocol::room::RoomKind;
use tallow_protocol::wire::messages::ErrorCode;
use tallow_protocol::wire::{decode, encode, Envelope, Message};

use crate::config::RelayConfig;
use crate::room::{JoinOutcome, RoomManager, Side};

const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared state handed to every connection task
pub struct WsState {
    /// The room table
    pub room_manager: Arc<RoomManager>,
    /// Server configuration (bind address, timeouts, frame size limit)
    pub config: RelayConfig,
}

/// Build the axum router: `GET /ws` for the relay protocol, `GET /health`
/// for liveness checks. CORS is wide open: the relay forwards opaque
/// ciphertext, so origin checking adds no confidentiality.
pub fn router(state: Arc<WsState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<WsState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> impl IntoResponse {
    let max_size = state.config.max_message_bytes;
    ws.max_message_size(max_size)
        .on_upgrade(move |socket| handle_connection(socket, state, addr.ip()))
}

async fn handle_connection(socket: WebSocket, state: Arc<WsState>, ip: IpAddr) {
    if let Err(e) = handle_connection_inner(socket, &state, ip).await {
        debug!("relay connection ended: {e}");
    }
}

fn now_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64
}

fn is_forwardable(message: &Message) -> bool {
    matches!(
        message,
        Message::PakeA { .. } | Message::PakeB { .. } | Message::Encrypted { .. } | Message::Ack | Message::Close
    )
}

async fn handle_connection_inner(
    socket: WebSocket,
    state: &Arc<WsState>,
    ip: IpAddr,
) -> Result<(), crate::error::RelayError> {
    use crate::error::RelayError;

    let (mut sink, mut stream) = socket.split();

    let first = tokio::time::timeout(HANDSHAKE_TIMEOUT, read_text_frame(&mut stream))
        .await
        .map_err(|_| RelayError::Transport("handshake timed out".into()))??;

    let envelope = decode(&first)?;

    let (kind, room_key, side, mut my_rx) = match envelope.message {
        Message::CreateRoom { code_hash } => {
            match state.room_manager.create_or_join_ephemeral(code_hash.clone(), true, Some(ip)) {
                Ok(JoinOutcome::Waiting { my_rx }) => (RoomKind::Ephemeral, code_hash, Side::Creator, my_rx),
                Ok(JoinOutcome::Paired { my_rx, peer_tx }) => {
                    complete_pairing(&mut sink, &peer_tx, &code_hash).await?;
                    (RoomKind::Ephemeral, code_hash, Side::Joiner, my_rx)
                }
                Err(e) => return reply_error(&mut sink, &code_hash, e).await,
            }
        }
        Message::JoinRoom { code_hash } => {
            match state.room_manager.create_or_join_ephemeral(code_hash.clone(), false, Some(ip)) {
                Ok(JoinOutcome::Waiting { my_rx }) => (RoomKind::Ephemeral, code_hash, Side::Creator, my_rx),
                Ok(JoinOutcome::Paired { my_rx, peer_tx }) => {
                    complete_pairing(&mut sink, &peer_tx, &code_hash).await?;
                    (RoomKind::Ephemeral, code_hash, Side::Joiner, my_rx)
                }
                Err(e) => return reply_error(&mut sink, &code_hash, e).await,
            }
        }
        Message::CreatePersistent { ttl_hours } => match state.room_manager.create_persistent(ttl_hours, Some(ip)) {
            Ok((room_id, my_rx)) => {
                let reply = Envelope::new(
                    Message::RoomJoined { room_id: Some(room_id.clone()) },
                    room_id.clone(),
                    now_ms(),
                );
                send_direct(&mut sink, &reply).await?;
                (RoomKind::Persistent, room_id, Side::Creator, my_rx)
            }
            Err(e) => return reply_error(&mut sink, "", e).await,
        },
        Message::JoinById { room_id } => match state.room_manager.join_persistent(&room_id) {
            Ok(JoinOutcome::Waiting { my_rx }) => (RoomKind::Persistent, room_id, Side::Creator, my_rx),
            Ok(JoinOutcome::Paired { my_rx, peer_tx }) => {
                complete_pairing(&mut sink, &peer_tx, &room_id).await?;
                (RoomKind::Persistent, room_id, Side::Joiner, my_rx)
            }
            Err(e) => return reply_error(&mut sink, &room_id, e).await,
        },
        other => {
            return reply_error(
                &mut sink,
                "",
                RelayError::UnexpectedMessage(format!("{other:?} is not a room-claiming message")),
            )
            .await
        }
    };

    info!(kind = ?kind, side = ?side, "peer joined room");

    loop {
        tokio::select! {
            maybe_frame = my_rx.recv() => {
                match maybe_frame {
                    Some(frame) => {
                        if sink.send(WsMsg::text(frame)).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
            maybe_msg = stream.next() => {
                match maybe_msg {
                    Some(Ok(WsMsg::Text(text))) => {
                        handle_peer_frame(state, &kind, &room_key, side, &text, &mut sink).await;
                    }
                    Some(Ok(WsMsg::Ping(_))) | Some(Ok(WsMsg::Pong(_))) => continue,
                    Some(Ok(WsMsg::Close(_))) | None => break,
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        warn!("websocket transport error: {e}");
                        break;
                    }
                }
            }
        }
    }

    state.room_manager.disconnect(kind, &room_key, side, Some(ip));
    Ok(())
}

async fn handle_peer_frame(
    state: &Arc<WsState>,
    kind: &RoomKind,
    room_key: &str,
    side: Side,
    text: &str,
    sink: &mut futures::stream::SplitSink<WebSocket, WsMsg>,
) {
    let envelope = match decode(text) {
        Ok(e) => e,
        Err(_) => return,
    };

    if !is_forwardable(&envelope.message) {
        return;
    }

    if !state.room_manager.allows_forwarding(*kind, room_key) {
        let _ = reply_error(sink, room_key, crate::error::RelayError::RoomNotFound).await;
        return;
    }

    if let Some(peer) = state.room_manager.peer_sender(*kind, room_key, side) {
        let _ = peer.send(text.to_string()).await;
        state.room_manager.touch(*kind, room_key);
    }
}

/// Send `ROOM_JOINED` and `ROOM_READY` to the joiner, and push `ROOM_READY`
/// through the creator's channel so their receive loop sees it too.
async fn complete_pairing(
    sink: &mut futures::stream::SplitSink<WebSocket, WsMsg>,
    peer_tx: &crate::room::PeerSender,
    room_key: &str,
) -> Result<(), crate::error::RelayError> {
    let joined = Envelope::new(Message::RoomJoined { room_id: None }, room_key, now_ms());
    send_direct(sink, &joined).await?;

    let ready = Envelope::new(Message::RoomReady, room_key, now_ms());
    let ready_frame = encode(&ready)?;
    send_direct(sink, &ready).await?;
    let _ = peer_tx.send(ready_frame).await;
    Ok(())
}

async fn send_direct(
    sink: &mut futures::stream::SplitSink<WebSocket, WsMsg>,
    envelope: &Envelope,
) -> Result<(), crate::error::RelayError> {
    let frame = encode(envelope)?;
    sink.send(WsMsg::text(frame))
        .await
        .map_err(|e| crate::error::RelayError::Transport(e.to_string()))
}

async fn reply_error(
    sink: &mut futures::stream::SplitSink<WebSocket, WsMsg>,
    room_key: &str,
    err: crate::error::RelayError,
) -> Result<(), crate::error::RelayError> {
    use crate::error::RelayError;
    let code = match err {
        RelayError::RoomNotFound => ErrorCode::RoomNotFound,
        RelayError::RoomFull | RelayError::TooManyRooms => ErrorCode::RoomFull,
        RelayError::CodeMismatch => ErrorCode::CodeMismatch,
        _ => ErrorCode::RoomNotFound,
    };
    let envelope = Envelope::new(
        Message::Error { code, message: err.to_string() },
        room_key,
        now_ms(),
    );
    let _ = send_direct(sink, &envelope).await;
    Err(err)
}

async fn read_text_frame(
    stream: &mut futures::stream::SplitStream<WebSocket>,
) -> Result<String, crate::error::RelayError> {
    use crate::error::RelayError;
    while let Some(msg) = stream.next().await {
        match msg {
            Ok(WsMsg::Text(text)) => return Ok(text.to_string()),
            Ok(WsMsg::Ping(_)) | Ok(WsMsg::Pong(_)) => continue,
            Ok(WsMsg::Close(_)) => return Err(RelayError::Transport("closed during handshake".into())),
            Ok(_) => return Err(RelayError::MalformedFrame("expected a text frame".into())),
            Err(e) => return Err(RelayError::Transport(e.to_string())),
        }
    }
    Err(RelayError::Transport("closed during handshake".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> Arc<WsState> {
        Arc::new(WsState {
            room_manager: Arc::new(RoomManager::new(100)),
            config: RelayConfig::default(),
        })
    }

    #[test]
    fn test_router_builds() {
        let _router = router(test_state());
    }

    #[tokio::test]
    async fn test_health_endpoint_returns_200() {
        use axum::body::Body;
        use axum::http::{Request, StatusCode};
        use tower::ServiceExt;

        let app = router(test_state());
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_headers_present() {
        use axum::body::Body;
        use axum::http::Request;
        use tower::ServiceExt;

        let app = router(test_state());
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/health")
            .header("Origin", "http://example.com")
            .header("Access-Control-Request-Method", "GET")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let cors_header = response
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap_or(""));
        assert_eq!(cors_header, Some("*"));
    }

    #[test]
    fn test_is_forwardable_classifies_message_kinds() {
        assert!(is_forwardable(&Message::PakeA { data: String::new() }));
        assert!(is_forwardable(&Message::Ack));
        assert!(is_forwardable(&Message::Close));
        assert!(!is_forwardable(&Message::RoomReady));
        assert!(!is_forwardable(&Message::CreateRoom { code_hash: String::new() }));
    }
}
