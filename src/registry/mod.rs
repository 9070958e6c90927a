//! Stream registry
//!
//! In-memory table of the remote streams currently subscribed to, mutated
//! only in reaction to provider events. Iteration order is insertion order,
//! which the presentation layer relies on for stable rendering keys.
//!
//! ```text
//!   [Provider events]          [SessionController]         [StreamRegistry]
//!   StreamAdded ──────────────► subscribe request
//!   StreamSubscribed ─────────► insert ──────────────────► (id -> handle)
//!   StreamRemoved / PeerLeft ─► remove ──────────────────► entry purged
//! ```

pub mod store;

pub use store::StreamRegistry;
