//! Stream registry implementation
//!
//! Provider event delivery is not exactly-once, so every mutation here is
//! tolerant: duplicate removals, removals of unknown ids, and re-insertions
//! are silent no-ops or in-place replacements, never errors.

use std::collections::HashMap;

use crate::client::{StreamHandle, StreamId};

/// Ordered map of remote stream id to stream handle
///
/// Owned and mutated exclusively by the session controller; readers only see
/// cloned snapshots of the id list.
#[derive(Debug, Default)]
pub struct StreamRegistry {
    entries: HashMap<StreamId, StreamHandle>,
    order: Vec<StreamId>,
}

impl StreamRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for a stream
    ///
    /// Idempotent: re-inserting an id replaces the stored handle without
    /// changing its insertion position.
    pub fn insert(&mut self, handle: StreamHandle) {
        let id = handle.id().clone();

        if self.entries.insert(id.clone(), handle).is_none() {
            self.order.push(id.clone());
            tracing::debug!(stream = %id, total = self.order.len(), "Remote stream registered");
        } else {
            tracing::debug!(stream = %id, "Remote stream handle replaced");
        }
    }

    /// Remove the entry for a stream, if present
    pub fn remove(&mut self, id: &StreamId) -> Option<StreamHandle> {
        let removed = self.entries.remove(id);

        if removed.is_some() {
            self.order.retain(|k| k != id);
            tracing::debug!(stream = %id, total = self.order.len(), "Remote stream removed");
        }

        removed
    }

    /// Whether an entry exists for this id
    pub fn contains(&self, id: &StreamId) -> bool {
        self.entries.contains_key(id)
    }

    /// Get the handle for a stream
    pub fn get(&self, id: &StreamId) -> Option<&StreamHandle> {
        self.entries.get(id)
    }

    /// Current stream ids in insertion order
    pub fn ids(&self) -> Vec<StreamId> {
        self.order.clone()
    }

    /// Iterate over handles in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &StreamHandle> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    /// Number of registered streams
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
