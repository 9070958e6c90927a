//! RTC provider capability surface
//!
//! Everything the session layer needs from the external provider is expressed
//! through the [`RtcClient`] trait: initialize, join, leave, publish,
//! subscribe, and event subscription. The provider's media engine, signaling,
//! and transport stay entirely behind this boundary.

use bytes::Bytes;
use tokio::sync::mpsc;

use crate::error::Result;

use super::config::{ClientConfig, LocalStreamSpec};

/// Provider-assigned stream identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StreamId(String);

impl StreamId {
    /// Create a new stream id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StreamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StreamId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for StreamId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Opaque handle to a provider-managed media stream
///
/// The `raw` payload is a provider token this crate never interprets. Cheap
/// to clone: `Bytes` is reference counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHandle {
    id: StreamId,
    is_local: bool,
    raw: Bytes,
}

impl StreamHandle {
    /// Handle for a remote peer's stream
    pub fn remote(id: impl Into<StreamId>, raw: Bytes) -> Self {
        Self {
            id: id.into(),
            is_local: false,
            raw,
        }
    }

    /// Handle for a locally originated stream
    pub fn local(id: impl Into<StreamId>, raw: Bytes) -> Self {
        Self {
            id: id.into(),
            is_local: true,
            raw,
        }
    }

    /// The stream identifier
    pub fn id(&self) -> &StreamId {
        &self.id
    }

    /// Whether the provider marked this stream as locally originated
    pub fn is_local(&self) -> bool {
        self.is_local
    }

    /// The opaque provider payload
    pub fn raw(&self) -> &Bytes {
        &self.raw
    }
}

/// Stream lifecycle event emitted by the provider
///
/// Per stream id, `StreamAdded` precedes the corresponding `StreamSubscribed`
/// and `StreamRemoved`. There is no global ordering across kinds, and
/// delivery is not exactly-once.
#[derive(Debug, Clone)]
pub enum RtcEvent {
    /// A stream was advertised in the room
    StreamAdded(StreamHandle),
    /// A previously requested subscription is ready
    StreamSubscribed(StreamHandle),
    /// A stream was withdrawn
    StreamRemoved(StreamHandle),
    /// The owning peer departed the room
    PeerLeft(StreamHandle),
}

impl RtcEvent {
    /// The stream handle carried by this event
    pub fn stream(&self) -> &StreamHandle {
        match self {
            RtcEvent::StreamAdded(h)
            | RtcEvent::StreamSubscribed(h)
            | RtcEvent::StreamRemoved(h)
            | RtcEvent::PeerLeft(h) => h,
        }
    }
}

/// Capability interface over an external RTC provider client
///
/// The session controller owns exactly one implementor per session and is
/// the only caller. Implementations do not need to guard against re-entrant
/// `join`; the controller's state machine never issues one.
///
/// Futures returned by these methods are awaited inline by the controller,
/// never spawned, so no `Send` bound is required.
#[allow(async_fn_in_trait)]
pub trait RtcClient {
    /// Initialize the client against the configured application credential.
    ///
    /// Must complete successfully before any other operation.
    async fn initialize(&mut self, config: &ClientConfig) -> Result<()>;

    /// Join a room, returning the provider-assigned local identity.
    async fn join(&mut self, room: &str) -> Result<String>;

    /// Leave the current room. Best-effort; must be a no-op when not joined.
    fn leave(&mut self);

    /// Capture a local stream described by `spec`.
    async fn create_stream(&mut self, spec: &LocalStreamSpec) -> Result<StreamHandle>;

    /// Publish a locally captured stream into the room.
    async fn publish(&mut self, stream: &StreamHandle) -> Result<()>;

    /// Request media for a remote stream advertised by the provider.
    async fn subscribe(&mut self, stream: &StreamHandle) -> Result<()>;

    /// Attach the event listener, returning the receiving end.
    ///
    /// Events emitted before attachment are dropped by the provider, so the
    /// controller only calls this once a join has resolved.
    fn take_events(&mut self) -> mpsc::Receiver<RtcEvent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_id_display() {
        let id = StreamId::new("s1");
        assert_eq!(id.to_string(), "s1");
        assert_eq!(id, StreamId::from("s1"));
    }

    #[test]
    fn test_handle_locality() {
        let remote = StreamHandle::remote("s1", Bytes::new());
        let local = StreamHandle::local("u1", Bytes::new());

        assert!(!remote.is_local());
        assert!(local.is_local());
        assert_eq!(remote.id().as_str(), "s1");
    }

    #[test]
    fn test_event_stream_accessor() {
        let handle = StreamHandle::remote("s9", Bytes::new());
        let event = RtcEvent::PeerLeft(handle.clone());
        assert_eq!(event.stream(), &handle);
    }
}
