//! Crate error types
//!
//! Initialization and join failures are terminal for the current attempt.
//! Publish and subscribe failures are non-fatal: they are logged and counted,
//! but never change the session phase.

use crate::session::SessionPhase;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for session and adapter operations
#[derive(Debug, Clone)]
pub enum Error {
    /// Client initialization failed
    Initialization(String),
    /// Room join failed (e.g., name collision, network failure)
    Join(String),
    /// Publishing the local stream failed (non-fatal)
    Publish(String),
    /// Subscribing to a remote stream failed (non-fatal)
    Subscribe(String),
    /// Operation not valid in the current session phase
    InvalidState {
        /// The attempted operation
        action: &'static str,
        /// The phase the session was in
        phase: SessionPhase,
    },
}

impl Error {
    /// Whether this error terminates the current attempt
    ///
    /// Publish and subscribe failures leave the session usable; the affected
    /// stream is simply absent.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Initialization(_) | Error::Join(_) | Error::InvalidState { .. }
        )
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Initialization(msg) => write!(f, "Client initialization failed: {}", msg),
            Error::Join(msg) => write!(f, "Room join failed: {}", msg),
            Error::Publish(msg) => write!(f, "Stream publish failed: {}", msg),
            Error::Subscribe(msg) => write!(f, "Stream subscribe failed: {}", msg),
            Error::InvalidState { action, phase } => {
                write!(f, "Cannot {} while session is {}", action, phase)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatality() {
        assert!(Error::Initialization("boom".into()).is_fatal());
        assert!(Error::Join("collision".into()).is_fatal());
        assert!(!Error::Publish("capture failed".into()).is_fatal());
        assert!(!Error::Subscribe("no media".into()).is_fatal());
    }

    #[test]
    fn test_display() {
        let err = Error::InvalidState {
            action: "join",
            phase: SessionPhase::InitFailed,
        };
        assert_eq!(err.to_string(), "Cannot join while session is init-failed");
    }
}
