//! RTC client adapter
//!
//! Isolates all direct interaction with the external RTC provider behind the
//! [`RtcClient`] capability trait:
//! - initialize / join / leave for the connection lifecycle
//! - publish / subscribe for media requests
//! - an event channel for stream lifecycle notifications
//!
//! The [`LoopbackClient`] is a provider that lives entirely in-process, used
//! by the demos and the session tests.

pub mod adapter;
pub mod config;
pub mod loopback;

pub use adapter::{RtcClient, RtcEvent, StreamHandle, StreamId};
pub use config::{ChannelMode, ClientConfig, LocalStreamSpec, VideoCodec};
pub use loopback::{LoopbackClient, LoopbackRoom};
