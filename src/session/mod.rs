//! Room-session lifecycle
//!
//! The [`SessionController`] drives the whole session: client
//! initialization, room join/leave, and remote membership tracking. Its
//! state machine lives in [`state`]; the controller enforces the guards and
//! does the adapter wiring.

pub mod controller;
pub mod state;

pub use controller::{SessionController, SessionEvent};
pub use state::{ConnectionStatus, SessionPhase, SessionSnapshot, SessionState};
