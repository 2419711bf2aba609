// Copyright 2026 Namewatch Contributors
// SPDX-License-Identifier: Apache-2.0

//! Namewatch event bus — typed events from the tracker.
//!
//! A `tokio::sync::broadcast` channel carrying [`WatchEvent`] values.
//! Any consumer — the serve command's alert logger, a future webhook
//! sender, tests — can subscribe independently. When no subscribers
//! exist, events are silently dropped.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Every event the tracker emits. Serialized to JSON for downstream
/// delivery mechanisms.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WatchEvent {
    /// The tracker loop has started.
    TrackerStarted {
        username: String,
        interval_secs: u64,
    },
    /// A check completed and the shared snapshot was replaced.
    SnapshotUpdated {
        username: String,
        display_name: String,
        checked_at: String,
    },
    /// The display name differs from the previously seen value.
    NameChanged {
        username: String,
        previous: String,
        current: String,
        at: String,
    },
    /// An upstream check failed; the snapshot was left unchanged.
    UpstreamFailed { username: String, error: String },
}

/// The central event bus.
pub struct EventBus {
    sender: broadcast::Sender<WatchEvent>,
}

impl EventBus {
    /// Create a new event bus with the given buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Emit an event to all subscribers. Silently ignores if no subscribers.
    pub fn emit(&self, event: WatchEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to receive all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<WatchEvent> {
        self.sender.subscribe()
    }
}
