//! In-process provider for demos and tests
//!
//! [`LoopbackClient`] implements [`RtcClient`] without any network or media
//! engine. A cloneable [`LoopbackRoom`] handle plays the role of the remote
//! side: it injects stream lifecycle events and records what the client
//! published and subscribed to.
//!
//! Listener-attach semantics match a real provider SDK: events emitted while
//! no listener is attached are dropped, not buffered.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use tokio::sync::mpsc;

use crate::error::{Error, Result};

use super::adapter::{RtcClient, RtcEvent, StreamHandle, StreamId};
use super::config::{ClientConfig, LocalStreamSpec};

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Default)]
struct RoomInner {
    listener: Option<mpsc::Sender<RtcEvent>>,
    published: Vec<StreamHandle>,
    subscriptions: Vec<StreamId>,
}

/// Remote side of a [`LoopbackClient`]
///
/// Clone freely; all clones share the same room.
#[derive(Clone, Default)]
pub struct LoopbackRoom {
    inner: Arc<Mutex<RoomInner>>,
}

impl LoopbackRoom {
    fn lock(&self) -> MutexGuard<'_, RoomInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn attach(&self) -> mpsc::Receiver<RtcEvent> {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        self.lock().listener = Some(tx);
        rx
    }

    fn detach(&self) {
        self.lock().listener = None;
    }

    fn record_publish(&self, stream: StreamHandle) {
        self.lock().published.push(stream);
    }

    fn record_subscription(&self, id: StreamId) {
        self.lock().subscriptions.push(id);
    }

    /// Deliver an event to the client's listener, if one is attached
    pub fn emit(&self, event: RtcEvent) {
        let inner = self.lock();
        match &inner.listener {
            Some(tx) => {
                if tx.try_send(event).is_err() {
                    tracing::warn!("Loopback event channel full, dropping event");
                }
            }
            None => {
                tracing::trace!("No event listener attached, dropping event");
            }
        }
    }

    /// Streams the client has published
    pub fn published(&self) -> Vec<StreamHandle> {
        self.lock().published.clone()
    }

    /// Stream ids the client has requested media for
    pub fn subscriptions(&self) -> Vec<StreamId> {
        self.lock().subscriptions.clone()
    }
}

/// In-process [`RtcClient`] implementation
///
/// Outcomes are scripted through the builder setters; by default everything
/// succeeds and join hands out identities `u1`, `u2`, ...
pub struct LoopbackClient {
    initialized: bool,
    current: Option<String>,
    fixed_identity: Option<String>,
    next_uid: u32,
    fail_init: Option<String>,
    fail_join: Option<String>,
    fail_subscribe: Option<String>,
    room: LoopbackRoom,
}

impl Default for LoopbackClient {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopbackClient {
    /// Create a client where every operation succeeds
    pub fn new() -> Self {
        Self {
            initialized: false,
            current: None,
            fixed_identity: None,
            next_uid: 1,
            fail_init: None,
            fail_join: None,
            fail_subscribe: None,
            room: LoopbackRoom::default(),
        }
    }

    /// Hand out a fixed identity on join instead of `u1`, `u2`, ...
    pub fn identity(mut self, id: impl Into<String>) -> Self {
        self.fixed_identity = Some(id.into());
        self
    }

    /// Make `initialize` fail with the given message
    pub fn fail_initialize(mut self, msg: impl Into<String>) -> Self {
        self.fail_init = Some(msg.into());
        self
    }

    /// Make `join` fail with the given message
    pub fn fail_join(mut self, msg: impl Into<String>) -> Self {
        self.fail_join = Some(msg.into());
        self
    }

    /// Make `subscribe` fail with the given message
    pub fn fail_subscribe(mut self, msg: impl Into<String>) -> Self {
        self.fail_subscribe = Some(msg.into());
        self
    }

    /// The remote-side handle for injecting events and inspecting traffic
    pub fn room(&self) -> LoopbackRoom {
        self.room.clone()
    }
}

impl RtcClient for LoopbackClient {
    async fn initialize(&mut self, config: &ClientConfig) -> Result<()> {
        if let Some(msg) = &self.fail_init {
            return Err(Error::Initialization(msg.clone()));
        }

        self.initialized = true;
        tracing::debug!(app_id = %config.app_id, "Loopback client initialized");
        Ok(())
    }

    async fn join(&mut self, room: &str) -> Result<String> {
        if !self.initialized {
            return Err(Error::Join("client not initialized".into()));
        }
        if self.current.is_some() {
            return Err(Error::Join("already in a room".into()));
        }
        if let Some(msg) = &self.fail_join {
            return Err(Error::Join(msg.clone()));
        }

        let identity = self.fixed_identity.clone().unwrap_or_else(|| {
            let n = self.next_uid;
            self.next_uid += 1;
            format!("u{}", n)
        });
        self.current = Some(identity.clone());

        tracing::debug!(room = %room, identity = %identity, "Loopback join");
        Ok(identity)
    }

    fn leave(&mut self) {
        if self.current.take().is_some() {
            tracing::debug!("Loopback leave");
        }
        self.room.detach();
    }

    async fn create_stream(&mut self, spec: &LocalStreamSpec) -> Result<StreamHandle> {
        let identity = self
            .current
            .clone()
            .ok_or_else(|| Error::Publish("not in a room".into()))?;

        tracing::debug!(
            audio = spec.audio,
            video = spec.video,
            screen = spec.screen,
            "Loopback local stream created"
        );
        Ok(StreamHandle::local(identity, Bytes::new()))
    }

    async fn publish(&mut self, stream: &StreamHandle) -> Result<()> {
        if self.current.is_none() {
            return Err(Error::Publish("not in a room".into()));
        }

        self.room.record_publish(stream.clone());
        Ok(())
    }

    async fn subscribe(&mut self, stream: &StreamHandle) -> Result<()> {
        if let Some(msg) = &self.fail_subscribe {
            return Err(Error::Subscribe(msg.clone()));
        }

        self.room.record_subscription(stream.id().clone());
        Ok(())
    }

    fn take_events(&mut self) -> mpsc::Receiver<RtcEvent> {
        self.room.attach()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_join_requires_initialize() {
        let mut client = LoopbackClient::new();

        let result = client.join("root").await;
        assert!(matches!(result, Err(Error::Join(_))));

        client.initialize(&ClientConfig::new("app")).await.unwrap();
        let identity = client.join("root").await.unwrap();
        assert_eq!(identity, "u1");
    }

    #[tokio::test]
    async fn test_scripted_failures() {
        let mut client = LoopbackClient::new().fail_initialize("no credential");

        let result = client.initialize(&ClientConfig::new("app")).await;
        assert!(matches!(result, Err(Error::Initialization(_))));
    }

    #[tokio::test]
    async fn test_events_dropped_without_listener() {
        let mut client = LoopbackClient::new();
        let room = client.room();

        // No listener attached yet: this event must not be buffered.
        room.emit(RtcEvent::StreamAdded(StreamHandle::remote(
            "s1",
            Bytes::new(),
        )));

        let mut rx = client.take_events();
        assert!(rx.try_recv().is_err());

        room.emit(RtcEvent::StreamAdded(StreamHandle::remote(
            "s2",
            Bytes::new(),
        )));
        let event = rx.try_recv().unwrap();
        assert_eq!(event.stream().id().as_str(), "s2");
    }

    #[tokio::test]
    async fn test_leave_detaches_listener() {
        let mut client = LoopbackClient::new();
        client.initialize(&ClientConfig::new("app")).await.unwrap();
        client.join("root").await.unwrap();

        let mut rx = client.take_events();
        client.leave();

        let room = client.room();
        room.emit(RtcEvent::StreamAdded(StreamHandle::remote(
            "s1",
            Bytes::new(),
        )));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_publish_recorded() {
        let mut client = LoopbackClient::new();
        client.initialize(&ClientConfig::new("app")).await.unwrap();
        client.join("root").await.unwrap();

        let stream = client
            .create_stream(&LocalStreamSpec::audio_only())
            .await
            .unwrap();
        assert!(stream.is_local());

        client.publish(&stream).await.unwrap();
        assert_eq!(client.room().published().len(), 1);
    }
}
