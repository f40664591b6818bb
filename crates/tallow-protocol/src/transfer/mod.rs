//! Transfer payload shape and client-side state machine
//!
//! Everything here is shared vocabulary; the actual network-driving
//! logic lives in `tallow-client`.

pub mod payload;
pub mod state_machine;

pub use payload::EncryptedPayload;
pub use state_machine::{TransferState, TransferStateMachine};
