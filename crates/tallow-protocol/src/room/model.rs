//! Room kind and state vocabulary
//!
//! The relay owns the full `Room` type (members, timestamps, per-room
//! lock); these enums are the part of that model the wire protocol and
//! client also need to reason about.

/// Whether a room is keyed by a code-phrase hash or a broker-minted id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomKind {
    /// Keyed by the URL-safe base64 SHA-256 of the code phrase; discarded
    /// after one transfer
    Ephemeral,
    /// Keyed by a broker-minted opaque identifier; usable across multiple
    /// joins until its TTL elapses
    Persistent,
}

/// A room's lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomState {
    /// Exactly one member present; accepting a second
    Open,
    /// Both members present; the broker forwards peer messages
    Ready,
    /// Room has been torn down; further traffic gets `ROOM_NOT_FOUND`
    Closed,
}

impl RoomState {
    /// Whether the broker may forward a peer-to-peer message in this state
    ///
    /// Only `Ready` permits forwarding — a room that only has its creator
    /// present must never relay anything, even if the message frame looks
    /// like valid peer traffic.
    pub fn allows_forwarding(&self) -> bool {
        matches!(self, RoomState::Ready)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_ready_allows_forwarding() {
        assert!(!RoomState::Open.allows_forwarding());
        assert!(RoomState::Ready.allows_forwarding());
        assert!(!RoomState::Closed.allows_forwarding());
    }
}
