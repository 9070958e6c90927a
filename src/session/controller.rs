//! Session controller
//!
//! Orchestrates the adapter lifecycle and wires provider events into the
//! stream registry. Owns the client handle and the registry exclusively; the
//! presentation layer only sees immutable snapshots and the notification
//! channel.

use tokio::sync::mpsc;

use crate::client::{
    ClientConfig, LocalStreamSpec, RtcClient, RtcEvent, StreamHandle, StreamId,
};
use crate::error::{Error, Result};
use crate::registry::StreamRegistry;
use crate::stats::SessionStats;

use super::state::{ConnectionStatus, SessionPhase, SessionSnapshot, SessionState};

const NOTIFY_CHANNEL_CAPACITY: usize = 256;

/// Notifications surfaced to the presentation layer
///
/// Every adapter failure reaches this channel or the log; nothing is
/// suppressed silently.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Client initialized, ready to join
    Initialized,

    /// Client initialization failed
    InitFailed(String),

    /// Joined a room
    Joined {
        /// Room name
        room: String,
        /// Provider-assigned local identity
        identity: String,
    },

    /// Join attempt failed; retry by re-issuing `join`
    JoinFailed(String),

    /// Publishing the local stream failed (session unaffected)
    PublishFailed(String),

    /// A remote stream became available
    StreamUp(StreamId),

    /// A remote stream went away
    StreamDown(StreamId),

    /// Left the room
    Left,
}

/// Room-session lifecycle controller
///
/// Generic over the provider client. All methods run on one logical thread;
/// suspension happens only at adapter call boundaries.
///
/// # Example
/// ```
/// use rtc_room::{ClientConfig, LoopbackClient, SessionController};
///
/// # tokio_test::block_on(async {
/// let client = LoopbackClient::new();
/// let (mut session, _notifications) =
///     SessionController::new(client, ClientConfig::new("my-app-id"));
///
/// session.init().await.unwrap();
/// let identity = session.join("root").await.unwrap();
/// assert_eq!(identity, "u1");
/// # });
/// ```
pub struct SessionController<C: RtcClient> {
    client: C,
    config: ClientConfig,
    state: SessionState,
    registry: StreamRegistry,
    stats: SessionStats,
    events: Option<mpsc::Receiver<RtcEvent>>,
    local_stream: Option<StreamHandle>,
    notify_tx: mpsc::Sender<SessionEvent>,
}

impl<C: RtcClient> SessionController<C> {
    /// Create a controller owning `client`
    ///
    /// Returns the controller and the receiver for presentation
    /// notifications. The session starts idle; call [`init`](Self::init).
    pub fn new(client: C, config: ClientConfig) -> (Self, mpsc::Receiver<SessionEvent>) {
        let (tx, rx) = mpsc::channel(NOTIFY_CHANNEL_CAPACITY);

        let controller = Self {
            client,
            config,
            state: SessionState::new(),
            registry: StreamRegistry::new(),
            stats: SessionStats::default(),
            events: None,
            local_stream: None,
            notify_tx: tx,
        };

        (controller, rx)
    }

    /// Initialize the provider client
    ///
    /// At most one initialization per session; the phase guard rejects
    /// re-entry. Lands in `Ready` or `InitFailed`.
    pub async fn init(&mut self) -> Result<()> {
        if self.state.phase() != SessionPhase::Idle {
            return Err(Error::InvalidState {
                action: "initialize",
                phase: self.state.phase(),
            });
        }

        self.state.begin_initialize();

        match self.client.initialize(&self.config).await {
            Ok(()) => {
                self.state.complete_initialize();
                tracing::info!(app_id = %self.config.app_id, "RTC client initialized");
                self.notify(SessionEvent::Initialized);
                Ok(())
            }
            Err(e) => {
                self.state.fail_initialize();
                tracing::error!(error = %e, "RTC client initialization failed");
                self.notify(SessionEvent::InitFailed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Join a room, returning the provider-assigned local identity
    ///
    /// Valid from `Ready` or `JoinFailed` (retry). The event listener is
    /// attached only after the join resolves, so no stream event can touch
    /// the registry before membership exists.
    pub async fn join(&mut self, room: &str) -> Result<String> {
        if !self.state.can_join() {
            return Err(Error::InvalidState {
                action: "join",
                phase: self.state.phase(),
            });
        }

        self.state.begin_join();
        self.stats.join_attempts += 1;

        match self.client.join(room).await {
            Ok(identity) => {
                self.state.complete_join(identity.clone(), room.to_owned());
                self.events = Some(self.client.take_events());

                tracing::info!(room = %room, identity = %identity, "Joined room");
                self.notify(SessionEvent::Joined {
                    room: room.to_owned(),
                    identity: identity.clone(),
                });
                Ok(identity)
            }
            Err(e) => {
                self.state.fail_join();
                tracing::error!(room = %room, error = %e, "Room join failed");
                self.notify(SessionEvent::JoinFailed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Capture and publish the local stream
    ///
    /// Requires `Joined`. Failure is non-fatal: it is logged, counted, and
    /// surfaced, but the session stays in the room.
    pub async fn publish_local(&mut self, spec: &LocalStreamSpec) -> Result<()> {
        if !self.state.is_joined() {
            return Err(Error::InvalidState {
                action: "publish",
                phase: self.state.phase(),
            });
        }

        let stream = match self.client.create_stream(spec).await {
            Ok(stream) => stream,
            Err(e) => {
                self.stats.publish_failures += 1;
                tracing::warn!(error = %e, "Local stream capture failed");
                self.notify(SessionEvent::PublishFailed(e.to_string()));
                return Err(e);
            }
        };

        match self.client.publish(&stream).await {
            Ok(()) => {
                tracing::info!(stream = %stream.id(), "Local stream published");
                self.local_stream = Some(stream);
                Ok(())
            }
            Err(e) => {
                self.stats.publish_failures += 1;
                tracing::warn!(stream = %stream.id(), error = %e, "Local stream publish failed");
                self.notify(SessionEvent::PublishFailed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Drain and dispatch all pending provider events
    ///
    /// Returns the number of events handled. No-op before join: the receiver
    /// does not exist yet.
    pub async fn pump_events(&mut self) -> usize {
        let mut drained = Vec::new();
        if let Some(rx) = self.events.as_mut() {
            while let Ok(event) = rx.try_recv() {
                drained.push(event);
            }
        }

        let handled = drained.len();
        for event in drained {
            self.handle_event(event).await;
        }
        handled
    }

    async fn handle_event(&mut self, event: RtcEvent) {
        match event {
            RtcEvent::StreamAdded(stream) => {
                if self.is_own_stream(&stream) {
                    tracing::debug!(stream = %stream.id(), "Ignoring local stream announcement");
                    return;
                }
                if self.registry.contains(stream.id()) {
                    tracing::debug!(stream = %stream.id(), "Stream already registered");
                    return;
                }

                // Fire-and-forget: the entry is only added once the provider
                // confirms with StreamSubscribed.
                if let Err(e) = self.client.subscribe(&stream).await {
                    self.stats.subscribe_failures += 1;
                    tracing::warn!(stream = %stream.id(), error = %e, "Subscribe request failed");
                }
            }
            RtcEvent::StreamSubscribed(stream) => {
                if self.is_own_stream(&stream) {
                    tracing::debug!(stream = %stream.id(), "Ignoring local stream subscription");
                    return;
                }

                let id = stream.id().clone();
                self.registry.insert(stream);
                self.stats.streams_added += 1;
                self.notify(SessionEvent::StreamUp(id));
            }
            RtcEvent::StreamRemoved(stream) | RtcEvent::PeerLeft(stream) => {
                if self.registry.remove(stream.id()).is_some() {
                    self.stats.streams_removed += 1;
                    self.notify(SessionEvent::StreamDown(stream.id().clone()));
                }
            }
        }
    }

    fn is_own_stream(&self, stream: &StreamHandle) -> bool {
        stream.is_local()
            || self
                .state
                .local_identity()
                .is_some_and(|uid| uid == stream.id().as_str())
    }

    /// Leave the room and tear down membership state
    ///
    /// Safe from any phase, including before any join; repeat calls are
    /// no-ops. The adapter's `leave` is best-effort and synchronous.
    pub fn leave(&mut self) {
        let was_joined = self.state.is_joined();

        self.state.begin_leave();
        self.client.leave();
        self.events = None;
        self.local_stream = None;

        let dropped = self.registry.len();
        self.registry.clear();
        self.state.reset();

        if was_joined {
            tracing::info!(streams_dropped = dropped, "Left room");
            self.notify(SessionEvent::Left);
        }
    }

    /// Current connection status
    pub fn status(&self) -> ConnectionStatus {
        self.state.status()
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    /// Local identity, once joined
    pub fn local_identity(&self) -> Option<&str> {
        self.state.local_identity()
    }

    /// Remote stream ids in insertion order
    pub fn remote_ids(&self) -> Vec<StreamId> {
        self.registry.ids()
    }

    /// Read access to the stream registry
    pub fn registry(&self) -> &StreamRegistry {
        &self.registry
    }

    /// Session counters
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Immutable snapshot for the presentation layer
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.state.status(),
            phase: self.state.phase(),
            local_identity: self.state.local_identity().map(str::to_owned),
            remote_ids: self.registry.ids(),
            stats: self.stats,
        }
    }

    fn notify(&self, event: SessionEvent) {
        if self.notify_tx.try_send(event).is_err() {
            tracing::trace!("Notification receiver full or dropped");
        }
    }
}

impl<C: RtcClient> Drop for SessionController<C> {
    fn drop(&mut self) {
        // The adapter connection is guaranteed a leave on every exit path.
        self.client.leave();
    }
}
