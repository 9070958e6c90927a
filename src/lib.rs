//! Room-session lifecycle for real-time audio/video rooms
//!
//! This crate drives one RTC room membership end to end: client
//! initialization, room join, remote stream tracking, and clean teardown.
//! The provider SDK stays behind the [`RtcClient`] capability trait; nothing
//! here touches codecs, signaling, or transport.
//!
//! # Architecture
//!
//! ```text
//!  [Presentation]              [SessionController]              [Provider]
//!  join("room") ─────────────► phase machine ───initialize────► RtcClient
//!  snapshot() ◄──────────────  StreamRegistry ◄────events─────  (opaque)
//!  SessionEvent rx ◄─────────  (ordered ids)  ───subscribe────►
//! ```
//!
//! The controller owns the client handle and the registry exclusively. The
//! presentation layer reads derived, immutable [`SessionSnapshot`]s and a
//! [`SessionEvent`] channel; it never mutates session state directly.
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use rtc_room::{
//!     ClientConfig, LoopbackClient, RtcEvent, SessionController, StreamHandle,
//! };
//!
//! # tokio_test::block_on(async {
//! let client = LoopbackClient::new();
//! let room = client.room();
//! let (mut session, _notifications) =
//!     SessionController::new(client, ClientConfig::new("my-app-id"));
//!
//! session.init().await.unwrap();
//! session.join("root").await.unwrap();
//!
//! // The provider announces a remote stream and confirms the subscription.
//! let handle = StreamHandle::remote("s1", Bytes::new());
//! room.emit(RtcEvent::StreamAdded(handle.clone()));
//! room.emit(RtcEvent::StreamSubscribed(handle));
//! session.pump_events().await;
//!
//! assert_eq!(session.remote_ids().len(), 1);
//! session.leave();
//! # });
//! ```

pub mod client;
pub mod error;
pub mod registry;
pub mod session;
pub mod stats;

pub use client::{
    ChannelMode, ClientConfig, LocalStreamSpec, LoopbackClient, LoopbackRoom, RtcClient,
    RtcEvent, StreamHandle, StreamId, VideoCodec,
};
pub use error::{Error, Result};
pub use registry::StreamRegistry;
pub use session::{
    ConnectionStatus, SessionController, SessionEvent, SessionPhase, SessionSnapshot,
};
pub use stats::SessionStats;
