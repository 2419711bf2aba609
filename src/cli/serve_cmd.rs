//! Run the tracker and serve its snapshot on `/api/user-data`.

use crate::config;
use crate::events::{EventBus, WatchEvent};
use crate::model::UserSnapshot;
use crate::server;
use crate::tracker::{SharedSnapshot, Tracker, TrackerConfig};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

/// Start the tracker loop and the user-data API over shared state.
pub async fn run(port: u16, username: &str, interval_secs: u64, api_base: &str) -> Result<()> {
    let bearer_token = config::bearer_token()?;

    let state: SharedSnapshot = Arc::new(RwLock::new(UserSnapshot::default()));
    let bus = Arc::new(EventBus::new(64));

    let mut tracker_config = TrackerConfig::new(username, bearer_token, api_base);
    tracker_config.interval = Duration::from_secs(interval_secs);
    let tracker = Tracker::new(tracker_config);

    // Alert subscriber: name changes get a dedicated log line. Other
    // delivery mechanisms (webhooks, mail) would subscribe the same way.
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = rx.recv().await {
            if let WatchEvent::NameChanged {
                username,
                previous,
                current,
                at,
            } = event
            {
                info!(
                    username = %username,
                    previous = %previous,
                    current = %current,
                    at = %at,
                    "name change alert"
                );
            }
        }
    });

    let tracker_state = Arc::clone(&state);
    let tracker_bus = Arc::clone(&bus);
    tokio::spawn(async move {
        tracker.run(tracker_state, tracker_bus).await;
    });

    server::start(port, state).await
}
