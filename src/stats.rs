//! Session counters

/// Counters for one session, updated by the controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Join attempts issued (including failed ones)
    pub join_attempts: u32,
    /// Remote streams that reached the registry
    pub streams_added: u64,
    /// Remote streams removed from the registry
    pub streams_removed: u64,
    /// Non-fatal publish failures
    pub publish_failures: u64,
    /// Non-fatal subscribe failures
    pub subscribe_failures: u64,
}

impl SessionStats {
    /// Streams currently expected in the registry
    pub fn active_streams(&self) -> u64 {
        self.streams_added.saturating_sub(self.streams_removed)
    }
}
