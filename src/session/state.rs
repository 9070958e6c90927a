//! Session state machine
//!
//! Tracks one room session from client initialization through join and
//! teardown:
//!
//! ```text
//! Idle -> Initializing -> {Ready, InitFailed}
//! Ready | JoinFailed -> Joining -> {Joined, JoinFailed}
//! Joined -> Leaving -> Idle
//! ```
//!
//! Transition methods are guarded: called from the wrong phase they do
//! nothing. The controller rejects invalid operations before ever reaching
//! them, so a guard firing means a provider callback arrived out of order.

use std::time::Instant;

use crate::client::StreamId;
use crate::stats::SessionStats;

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No client activity yet (or fully torn down)
    Idle,
    /// Client initialization in flight
    Initializing,
    /// Client initialized, not in a room
    Ready,
    /// Client initialization failed
    InitFailed,
    /// Room join in flight
    Joining,
    /// In a room with a local identity
    Joined,
    /// Last join attempt failed; retry allowed
    JoinFailed,
    /// Leaving the room
    Leaving,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Initializing => "initializing",
            SessionPhase::Ready => "ready",
            SessionPhase::InitFailed => "init-failed",
            SessionPhase::Joining => "joining",
            SessionPhase::Joined => "joined",
            SessionPhase::JoinFailed => "join-failed",
            SessionPhase::Leaving => "leaving",
        };
        f.write_str(name)
    }
}

/// Connection status as shown to the presentation layer
///
/// Derived from the phase: `Pending` while initialization has not resolved,
/// then `Connected` or `Failed` for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Initialization still in flight
    Pending,
    /// Client initialized successfully
    Connected,
    /// Client initialization failed
    Failed,
}

/// Complete session state
#[derive(Debug)]
pub struct SessionState {
    phase: SessionPhase,
    local_identity: Option<String>,
    room: Option<String>,
    started_at: Instant,
    joined_at: Option<Instant>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Create a new idle session state
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            local_identity: None,
            room: None,
            started_at: Instant::now(),
            joined_at: None,
        }
    }

    /// Current phase
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Derived presentation status
    pub fn status(&self) -> ConnectionStatus {
        match self.phase {
            SessionPhase::Idle | SessionPhase::Initializing => ConnectionStatus::Pending,
            SessionPhase::InitFailed => ConnectionStatus::Failed,
            _ => ConnectionStatus::Connected,
        }
    }

    /// Provider-assigned local identity, once joined
    pub fn local_identity(&self) -> Option<&str> {
        self.local_identity.as_deref()
    }

    /// Name of the room currently joined
    pub fn room(&self) -> Option<&str> {
        self.room.as_deref()
    }

    /// Whether a join may be issued from the current phase
    pub fn can_join(&self) -> bool {
        matches!(self.phase, SessionPhase::Ready | SessionPhase::JoinFailed)
    }

    /// Whether the session is in a room
    pub fn is_joined(&self) -> bool {
        self.phase == SessionPhase::Joined
    }

    /// Transition to initializing
    pub fn begin_initialize(&mut self) {
        if self.phase == SessionPhase::Idle {
            self.phase = SessionPhase::Initializing;
        }
    }

    /// Initialization succeeded
    pub fn complete_initialize(&mut self) {
        if self.phase == SessionPhase::Initializing {
            self.phase = SessionPhase::Ready;
        }
    }

    /// Initialization failed
    pub fn fail_initialize(&mut self) {
        if self.phase == SessionPhase::Initializing {
            self.phase = SessionPhase::InitFailed;
        }
    }

    /// Transition to joining
    pub fn begin_join(&mut self) {
        if self.can_join() {
            self.phase = SessionPhase::Joining;
        }
    }

    /// Join succeeded: record identity and room
    pub fn complete_join(&mut self, identity: String, room: String) {
        if self.phase == SessionPhase::Joining {
            self.phase = SessionPhase::Joined;
            self.local_identity = Some(identity);
            self.room = Some(room);
            self.joined_at = Some(Instant::now());
        }
    }

    /// Join failed
    pub fn fail_join(&mut self) {
        if self.phase == SessionPhase::Joining {
            self.phase = SessionPhase::JoinFailed;
        }
    }

    /// Transition to leaving
    pub fn begin_leave(&mut self) {
        if self.phase == SessionPhase::Joined {
            self.phase = SessionPhase::Leaving;
        }
    }

    /// Return to idle, clearing all room membership
    pub fn reset(&mut self) {
        self.phase = SessionPhase::Idle;
        self.local_identity = None;
        self.room = None;
        self.joined_at = None;
    }

    /// Time since the session state was created
    pub fn session_duration(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }

    /// Time spent in the current room, if joined
    pub fn time_in_room(&self) -> Option<std::time::Duration> {
        self.joined_at.map(|t| t.elapsed())
    }
}

/// Immutable view of the session handed to the presentation layer
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// Derived connection status
    pub status: ConnectionStatus,

    /// Exact lifecycle phase
    pub phase: SessionPhase,

    /// Local identity, once joined
    pub local_identity: Option<String>,

    /// Remote stream ids in insertion order (stable rendering keys)
    pub remote_ids: Vec<StreamId>,

    /// Session counters
    pub stats: SessionStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let mut state = SessionState::new();
        assert_eq!(state.phase(), SessionPhase::Idle);
        assert_eq!(state.status(), ConnectionStatus::Pending);

        state.begin_initialize();
        assert_eq!(state.phase(), SessionPhase::Initializing);
        assert_eq!(state.status(), ConnectionStatus::Pending);

        state.complete_initialize();
        assert_eq!(state.phase(), SessionPhase::Ready);
        assert_eq!(state.status(), ConnectionStatus::Connected);
        assert!(state.can_join());

        state.begin_join();
        assert_eq!(state.phase(), SessionPhase::Joining);
        assert!(!state.can_join());

        state.complete_join("u7".into(), "root".into());
        assert!(state.is_joined());
        assert_eq!(state.local_identity(), Some("u7"));
        assert_eq!(state.room(), Some("root"));
        assert!(state.time_in_room().is_some());

        state.begin_leave();
        assert_eq!(state.phase(), SessionPhase::Leaving);

        state.reset();
        assert_eq!(state.phase(), SessionPhase::Idle);
        assert_eq!(state.local_identity(), None);
        assert_eq!(state.room(), None);
    }

    #[test]
    fn test_init_failure_is_terminal() {
        let mut state = SessionState::new();

        state.begin_initialize();
        state.fail_initialize();

        assert_eq!(state.phase(), SessionPhase::InitFailed);
        assert_eq!(state.status(), ConnectionStatus::Failed);
        assert!(!state.can_join());

        // Guards ignore out-of-phase transitions.
        state.begin_join();
        assert_eq!(state.phase(), SessionPhase::InitFailed);
    }

    #[test]
    fn test_join_retry_after_failure() {
        let mut state = SessionState::new();

        state.begin_initialize();
        state.complete_initialize();
        state.begin_join();
        state.fail_join();

        assert_eq!(state.phase(), SessionPhase::JoinFailed);
        assert_eq!(state.status(), ConnectionStatus::Connected);
        assert!(state.can_join());

        state.begin_join();
        state.complete_join("u2".into(), "retry".into());
        assert!(state.is_joined());
    }

    #[test]
    fn test_out_of_order_callbacks_ignored() {
        let mut state = SessionState::new();

        // A join callback with no join in flight must not corrupt the phase.
        state.complete_join("ghost".into(), "nowhere".into());
        assert_eq!(state.phase(), SessionPhase::Idle);
        assert_eq!(state.local_identity(), None);

        state.complete_initialize();
        assert_eq!(state.phase(), SessionPhase::Idle);
    }
}
