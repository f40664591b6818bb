//! Transfer client state machine
//!
//! Models the ordering spec.md §4.5 requires: `PAKE_A` only after
//! `ROOM_READY`, `PAKE_B` only after consuming `PAKE_A`, and any message
//! arriving in a state that doesn't expect it is a fatal protocol
//! violation rather than a state the machine will accept.

use crate::error::{ProtocolError, Result};

/// Transfer client states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferState {
    /// No connection yet
    Idle,
    /// Dialing the relay
    Connecting,
    /// Room claimed or joined; waiting for the peer
    RoomJoined,
    /// Both peers present; the relay is forwarding
    RoomReady,
    /// Exchanging `PAKE_A`/`PAKE_B`
    PakeExchanging,
    /// Shared key derived; sending or receiving the encrypted payload
    Transferring,
    /// Transfer finished and acknowledged
    Completed,
    /// Transfer aborted
    Failed,
}

/// Drives a single transfer's state forward, rejecting out-of-order steps
#[derive(Debug)]
pub struct TransferStateMachine {
    state: TransferState,
}

impl TransferStateMachine {
    /// Start a new state machine in `Idle`
    pub fn new() -> Self {
        Self {
            state: TransferState::Idle,
        }
    }

    /// The current state
    pub fn state(&self) -> TransferState {
        self.state
    }

    /// Attempt to move to `new_state`, rejecting transitions spec.md §4.5
    /// doesn't allow
    pub fn transition(&mut self, new_state: TransferState) -> Result<()> {
        use TransferState::*;

        let valid = match (self.state, new_state) {
            (Idle, Connecting) => true,
            (Connecting, RoomJoined) => true,
            (RoomJoined, RoomReady) => true,
            (RoomReady, PakeExchanging) => true,
            (PakeExchanging, Transferring) => true,
            (Transferring, Completed) => true,
            (_, Failed) => true,
            _ => false,
        };

        if !valid {
            return Err(ProtocolError::InvalidStateTransition {
                from: format!("{:?}", self.state),
                to: format!("{new_state:?}"),
            });
        }

        self.state = new_state;
        Ok(())
    }
}

impl Default for TransferStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TransferState::*;

    #[test]
    fn test_happy_path_sequence() {
        let mut sm = TransferStateMachine::new();
        for next in [Connecting, RoomJoined, RoomReady, PakeExchanging, Transferring, Completed] {
            sm.transition(next).unwrap();
        }
        assert_eq!(sm.state(), Completed);
    }

    #[test]
    fn test_cannot_skip_room_ready() {
        let mut sm = TransferStateMachine::new();
        sm.transition(Connecting).unwrap();
        sm.transition(RoomJoined).unwrap();
        assert!(sm.transition(PakeExchanging).is_err());
    }

    #[test]
    fn test_failed_reachable_from_any_state() {
        for state in [Idle, Connecting, RoomJoined, RoomReady, PakeExchanging, Transferring] {
            let mut sm = TransferStateMachine { state };
            assert!(sm.transition(Failed).is_ok());
        }
    }

    #[test]
    fn test_completed_is_terminal() {
        let mut sm = TransferStateMachine { state: Completed };
        assert!(sm.transition(Connecting).is_err());
    }
}
