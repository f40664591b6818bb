//! Relay connection: WebSocket dial plus envelope send/recv
//!
//! One JSON text frame per [`Envelope`]. The relay forwards opaque peer
//! frames verbatim, so everything this type sends or receives after
//! the initial room claim is an envelope this crate itself produced or
//! consumes — never something requiring a distinct framing layer.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use tallow_protocol::wire::{decode, encode, Envelope};

use crate::error::{ClientError, Result};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A dialed connection to the relay
pub struct RelayConnection {
    stream: WsStream,
}

impl RelayConnection {
    /// Dial `relay_url` (e.g. `wss://relay.example.org/ws`)
    pub async fn connect(relay_url: &str) -> Result<Self> {
        let (stream, _response) = connect_async(relay_url)
            .await
            .map_err(|e| ClientError::Connect(e.to_string()))?;
        Ok(Self { stream })
    }

    /// Send one envelope as a text frame
    pub async fn send(&mut self, envelope: &Envelope) -> Result<()> {
        let frame = encode(envelope)?;
        self.stream
            .send(WsMessage::Text(frame.into()))
            .await
            .map_err(|e| ClientError::Connect(e.to_string()))
    }

    /// Receive and decode the next envelope, failing with `Timeout` if none
    /// arrives within `timeout`
    pub async fn recv(&mut self, timeout: Duration) -> Result<Envelope> {
        let frame = tokio::time::timeout(timeout, self.read_text_frame())
            .await
            .map_err(|_| ClientError::Timeout)??;
        Ok(decode(&frame)?)
    }

    async fn read_text_frame(&mut self) -> Result<String> {
        loop {
            match self.stream.next().await {
                Some(Ok(WsMessage::Text(text))) => return Ok(text.to_string()),
                Some(Ok(WsMessage::Ping(_))) | Some(Ok(WsMessage::Pong(_))) => continue,
                Some(Ok(WsMessage::Close(_))) | None => {
                    return Err(ClientError::Connect("relay closed the connection".into()))
                }
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(ClientError::Connect(e.to_string())),
            }
        }
    }

    /// Send `CLOSE` and close the underlying socket
    pub async fn close(&mut self) -> Result<()> {
        let _ = self.stream.close(None).await;
        Ok(())
    }
}
