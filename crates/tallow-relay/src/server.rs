//! Relay server: binds the HTTP/WebSocket listener and runs the idle sweeper

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::RelayConfig;
use crate::room::RoomManager;
use crate::websocket::{router, WsState};

/// The running relay server
pub struct RelayServer {
    config: RelayConfig,
    room_manager: Arc<RoomManager>,
}

impl RelayServer {
    /// Build a server from a validated configuration
    pub fn new(config: RelayConfig) -> Self {
        let room_manager = Arc::new(RoomManager::new(config.max_rooms));
        Self { config, room_manager }
    }

    /// Bind and serve until the process is signalled to stop
    pub async fn run(self) -> Result<()> {
        let addr: SocketAddr = self.config.bind_addr.parse().context("invalid bind address")?;

        let sweeper_manager = Arc::clone(&self.room_manager);
        let ephemeral_join_timeout = Duration::from_secs(self.config.ephemeral_join_timeout_secs);
        let room_idle_timeout = Duration::from_secs(self.config.room_idle_timeout_secs);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(30));
            loop {
                interval.tick().await;
                let removed = sweeper_manager.sweep(ephemeral_join_timeout, room_idle_timeout);
                if removed > 0 {
                    tracing::debug!(removed, "swept stale rooms");
                }
            }
        });

        let state = Arc::new(WsState {
            room_manager: Arc::clone(&self.room_manager),
            config: self.config.clone(),
        });
        let app = router(state);

        info!(%addr, "relay listening");
        let listener = tokio::net::TcpListener::bind(addr).await.context("failed to bind relay address")?;
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .context("relay server error")?;
        Ok(())
    }
}
