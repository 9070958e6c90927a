//! Joins a loopback room, publishes a local audio stream, and tracks remote
//! peers arriving and leaving.
//!
//! Run with: `cargo run --example join_room`

use bytes::Bytes;
use rtc_room::{
    ClientConfig, LocalStreamSpec, LoopbackClient, RtcEvent, SessionController, StreamHandle,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rtc_room=debug".parse()?)
                .add_directive("join_room=info".parse()?),
        )
        .init();

    let client = LoopbackClient::new();
    let room = client.room();
    let (mut session, mut notifications) =
        SessionController::new(client, ClientConfig::new("demo-app-id"));

    session.init().await?;
    let identity = session.join("root").await?;
    tracing::info!(identity = %identity, "joined room");

    session.publish_local(&LocalStreamSpec::audio_only()).await?;

    // Two remote peers show up.
    for id in ["s1", "s2"] {
        let handle = StreamHandle::remote(id, Bytes::new());
        room.emit(RtcEvent::StreamAdded(handle.clone()));
        room.emit(RtcEvent::StreamSubscribed(handle));
    }
    session.pump_events().await;
    tracing::info!(participants = ?session.remote_ids(), "after arrivals");

    // One of them leaves.
    room.emit(RtcEvent::PeerLeft(StreamHandle::remote("s1", Bytes::new())));
    session.pump_events().await;
    tracing::info!(participants = ?session.remote_ids(), "after departure");

    while let Ok(event) = notifications.try_recv() {
        tracing::debug!(event = ?event, "notification");
    }

    session.leave();
    Ok(())
}
