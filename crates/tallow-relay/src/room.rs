//! Room table and peer pairing
//!
//! A room pairs exactly two peers. The broker never inspects `PAKE_A`,
//! `PAKE_B`, `ENCRYPTED`, `ACK`, or `CLOSE` payloads; it only decides,
//! from room state, whether a frame may be forwarded at all. Control
//! frames the broker itself produces (`ROOM_JOINED`, `ROOM_READY`,
//! `ERROR`) travel over the same per-connection channel as forwarded
//! peer frames, so a connection's task only ever needs one receive loop.

use std::net::IpAddr;
use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

use tallow_protocol::room::{RoomKind, RoomState};

use crate::error::{RelayError, Result};

/// Sender half of a connection's inbound channel; frames pushed here are
/// written verbatim to that connection's WebSocket
pub type PeerSender = mpsc::Sender<String>;
/// Receiver half owned by the connection task
pub type PeerReceiver = mpsc::Receiver<String>;

const CHANNEL_CAPACITY: usize = 64;

/// Which slot a connection occupies in its room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The first peer to claim the room
    Creator,
    /// The second peer, who completes pairing
    Joiner,
}

struct RoomEntry {
    kind: RoomKind,
    state: RoomState,
    creator: Option<PeerSender>,
    joiner: Option<PeerSender>,
    created_at: Instant,
    last_activity: Instant,
    /// `None` means no expiry (persistent room created with a negative TTL)
    expires_at: Option<Instant>,
}

impl RoomEntry {
    fn new_open(kind: RoomKind, creator: PeerSender, expires_at: Option<Instant>) -> Self {
        let now = Instant::now();
        Self {
            kind,
            state: RoomState::Open,
            creator: Some(creator),
            joiner: None,
            created_at: now,
            last_activity: now,
            expires_at,
        }
    }

    fn is_empty(&self) -> bool {
        self.creator.is_none() && self.joiner.is_none()
    }

    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}

/// Outcome of claiming or joining a room
pub enum JoinOutcome {
    /// First peer in the room; waiting for a second to arrive
    Waiting {
        /// This connection's inbound channel
        my_rx: PeerReceiver,
    },
    /// Second peer in the room; pairing is immediate
    Paired {
        /// This connection's inbound channel
        my_rx: PeerReceiver,
        /// The other peer's inbound channel, to notify them of `ROOM_READY`
        peer_tx: PeerSender,
    },
}

/// Pairs peers into rooms and tracks their lifecycle
pub struct RoomManager {
    ephemeral: DashMap<String, RoomEntry>,
    persistent: DashMap<String, RoomEntry>,
    max_rooms: usize,
    ip_room_counts: DashMap<IpAddr, usize>,
    max_rooms_per_ip: usize,
}

impl RoomManager {
    /// Create a room manager bounded at `max_rooms` total rooms
    pub fn new(max_rooms: usize) -> Self {
        Self {
            ephemeral: DashMap::new(),
            persistent: DashMap::new(),
            max_rooms,
            ip_room_counts: DashMap::new(),
            max_rooms_per_ip: 100,
        }
    }

    fn total_rooms(&self) -> usize {
        self.ephemeral.len() + self.persistent.len()
    }

    fn check_room_budget(&self, ip: Option<IpAddr>, key_exists: bool) -> Result<()> {
        if let Some(ip) = ip {
            let count = self.ip_room_counts.get(&ip).map(|v| *v).unwrap_or(0);
            if count >= self.max_rooms_per_ip && !key_exists {
                return Err(RelayError::TooManyRooms);
            }
        }
        // Checked outside any DashMap entry lock: entry() holds a shard
        // write lock and len() needs to read-lock every shard, so calling
        // len() while inside entry() deadlocks. The TOCTOU gap this opens
        // allows at most one room over budget, which is acceptable here.
        if self.total_rooms() >= self.max_rooms && !key_exists {
            return Err(RelayError::TooManyRooms);
        }
        Ok(())
    }

    /// `CREATE_ROOM` or `JOIN_ROOM` against the ephemeral table, keyed by
    /// the base64 code hash
    pub fn create_or_join_ephemeral(&self, code_hash: String, creating: bool, ip: Option<IpAddr>) -> Result<JoinOutcome> {
        self.check_room_budget(ip, self.ephemeral.contains_key(&code_hash))?;
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

        match self.ephemeral.entry(code_hash) {
            Entry::Occupied(mut entry) => {
                let room = entry.get_mut();
                match room.state {
                    RoomState::Open if room.joiner.is_none() => {
                        let creator_tx = room.creator.clone().ok_or(RelayError::RoomFull)?;
                        room.joiner = Some(tx);
                        room.state = RoomState::Ready;
                        room.touch();
                        Ok(JoinOutcome::Paired { my_rx: rx, peer_tx: creator_tx })
                    }
                    RoomState::Open | RoomState::Ready => Err(RelayError::RoomFull),
                    RoomState::Closed => Err(RelayError::RoomNotFound),
                }
            }
            Entry::Vacant(entry) => {
                if !creating {
                    return Err(RelayError::RoomNotFound);
                }
                entry.insert(RoomEntry::new_open(RoomKind::Ephemeral, tx, None));
                if let Some(ip) = ip {
                    *self.ip_room_counts.entry(ip).or_insert(0) += 1;
                }
                Ok(JoinOutcome::Waiting { my_rx: rx })
            }
        }
    }

    /// `CREATE_PERSISTENT`: mint a fresh room id and claim it
    ///
    /// A negative `ttl_hours` means the room never expires on its own.
    pub fn create_persistent(&self, ttl_hours: i64, ip: Option<IpAddr>) -> Result<(String, PeerReceiver)> {
        self.check_room_budget(ip, false)?;
        let room_id = Uuid::new_v4().to_string();
        let expires_at = if ttl_hours < 0 {
            None
        } else {
            Some(Instant::now() + Duration::from_secs(ttl_hours as u64 * 3600))
        };
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        self.persistent
            .insert(room_id.clone(), RoomEntry::new_open(RoomKind::Persistent, tx, expires_at));
        if let Some(ip) = ip {
            *self.ip_room_counts.entry(ip).or_insert(0) += 1;
        }
        Ok((room_id, rx))
    }

    /// `JOIN_BY_ID`: join a persistent room created earlier
    pub fn join_persistent(&self, room_id: &str) -> Result<JoinOutcome> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let mut entry = self.persistent.get_mut(room_id).ok_or(RelayError::RoomNotFound)?;

        if let Some(expires_at) = entry.expires_at {
            if Instant::now() >= expires_at {
                return Err(RelayError::RoomNotFound);
            }
        }

        match entry.state {
            RoomState::Open if entry.joiner.is_none() => {
                let creator_tx = entry.creator.clone().ok_or(RelayError::RoomFull)?;
                entry.joiner = Some(tx);
                entry.state = RoomState::Ready;
                entry.touch();
                Ok(JoinOutcome::Paired { my_rx: rx, peer_tx: creator_tx })
            }
            RoomState::Open | RoomState::Ready => Err(RelayError::RoomFull),
            RoomState::Closed => Err(RelayError::RoomNotFound),
        }
    }

    fn table(&self, kind: RoomKind) -> &DashMap<String, RoomEntry> {
        match kind {
            RoomKind::Ephemeral => &self.ephemeral,
            RoomKind::Persistent => &self.persistent,
        }
    }

    /// Whether a room currently allows peer-to-peer forwarding
    pub fn allows_forwarding(&self, kind: RoomKind, room_key: &str) -> bool {
        self.table(kind)
            .get(room_key)
            .map(|r| r.state.allows_forwarding())
            .unwrap_or(false)
    }

    /// The other side's sender, for forwarding a frame after pairing
    pub fn peer_sender(&self, kind: RoomKind, room_key: &str, my_side: Side) -> Option<PeerSender> {
        self.table(kind).get(room_key).and_then(|r| match my_side {
            Side::Creator => r.joiner.clone(),
            Side::Joiner => r.creator.clone(),
        })
    }

    /// Mark activity so the idle sweeper doesn't reclaim a busy room
    pub fn touch(&self, kind: RoomKind, room_key: &str) {
        if let Some(mut room) = self.table(kind).get_mut(room_key) {
            room.touch();
        }
    }

    /// Remove a connection from its room; drops the whole room once empty
    pub fn disconnect(&self, kind: RoomKind, room_key: &str, side: Side, ip: Option<IpAddr>) {
        let should_remove = if let Some(mut room) = self.table(kind).get_mut(room_key) {
            match side {
                Side::Creator => room.creator = None,
                Side::Joiner => room.joiner = None,
            }
            room.is_empty()
        } else {
            false
        };

        if should_remove {
            self.table(kind).remove(room_key);
        }

        if let Some(ip) = ip {
            if let Some(mut count) = self.ip_room_counts.get_mut(&ip) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    drop(count);
                    self.ip_room_counts.remove(&ip);
                }
            }
        }
    }

    /// Background sweep: removes expired persistent rooms, ephemeral rooms
    /// that sat `Open` past `ephemeral_join_timeout`, and any `Ready` room
    /// idle past `room_idle_timeout`. Returns the number of rooms removed.
    pub fn sweep(&self, ephemeral_join_timeout: Duration, room_idle_timeout: Duration) -> usize {
        let now = Instant::now();
        let mut removed = 0;

        self.ephemeral.retain(|_key, room| {
            let stale_open = room.state == RoomState::Open && now.duration_since(room.created_at) > ephemeral_join_timeout;
            let stale_ready = room.state == RoomState::Ready && now.duration_since(room.last_activity) > room_idle_timeout;
            let keep = !room.is_empty() && !stale_open && !stale_ready;
            if !keep {
                removed += 1;
            }
            keep
        });

        self.persistent.retain(|_key, room| {
            let expired = room.expires_at.map(|e| now >= e).unwrap_or(false);
            let stale_ready = room.state == RoomState::Ready && now.duration_since(room.last_activity) > room_idle_timeout;
            let keep = !room.is_empty() && !expired && !stale_ready;
            if !keep {
                removed += 1;
            }
            keep
        });

        self.ip_room_counts.retain(|_ip, count| *count > 0);
        removed
    }

    /// Number of rooms currently tracked, for tests and metrics
    #[cfg(test)]
    pub fn room_count(&self) -> usize {
        self.ephemeral.len() + self.persistent.len()
    }
}
