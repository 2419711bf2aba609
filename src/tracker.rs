//! Upstream profile tracker — polls the profile API, detects display-name
//! changes, and publishes the latest snapshot into shared state.

use crate::error::FetchError;
use crate::events::{EventBus, WatchEvent};
use crate::model::UserSnapshot;
use chrono::Local;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Snapshot shared between the tracker (writer) and the API server (readers).
pub type SharedSnapshot = Arc<RwLock<UserSnapshot>>;

/// Default time between upstream checks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(600);

/// Ceiling on how long a rate-limit reset can make us wait.
const MAX_RATE_LIMIT_WAIT: Duration = Duration::from_secs(900);

/// Tracker configuration.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Handle of the profile to track.
    pub username: String,
    /// Bearer token for the upstream API.
    pub bearer_token: String,
    /// Upstream API base URL, e.g. `https://api.twitter.com`.
    pub api_base: String,
    /// Time between checks.
    pub interval: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl TrackerConfig {
    pub fn new(
        username: impl Into<String>,
        bearer_token: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            bearer_token: bearer_token.into(),
            api_base: api_base.into(),
            interval: DEFAULT_INTERVAL,
            timeout: Duration::from_secs(15),
        }
    }
}

/// Upstream response envelope: `{"data": {"name": ..., "username": ...}}`.
#[derive(Debug, serde::Deserialize)]
struct ProfileEnvelope {
    data: ProfileData,
}

#[derive(Debug, serde::Deserialize)]
struct ProfileData {
    name: String,
    username: String,
}

/// Polls the upstream profile API and detects display-name changes.
pub struct Tracker {
    client: reqwest::Client,
    config: TrackerConfig,
    previous_name: Option<String>,
}

impl Tracker {
    pub fn new(config: TrackerConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            config,
            previous_name: None,
        }
    }

    /// Run the tracker loop: one check immediately, then one per interval.
    ///
    /// A failed check is logged and skipped; the shared snapshot keeps
    /// its previous value until the next successful check.
    pub async fn run(mut self, state: SharedSnapshot, bus: Arc<EventBus>) {
        bus.emit(WatchEvent::TrackerStarted {
            username: self.config.username.clone(),
            interval_secs: self.config.interval.as_secs(),
        });

        let mut interval = tokio::time::interval(self.config.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            info!(username = %self.config.username, "checking for profile updates");
            if let Err(e) = self.poll_once(&state, &bus).await {
                warn!(username = %self.config.username, error = %e, "upstream check failed, skipping");
                bus.emit(WatchEvent::UpstreamFailed {
                    username: self.config.username.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    /// One check: fetch the profile, detect a name change, publish.
    pub async fn poll_once(
        &mut self,
        state: &SharedSnapshot,
        bus: &EventBus,
    ) -> Result<(), FetchError> {
        let profile = self.fetch_profile().await?;
        let checked_at = Local::now().format("%I:%M:%S %p").to_string();

        let changed = matches!(&self.previous_name, Some(prev) if *prev != profile.name);
        if changed {
            let previous = self.previous_name.clone().unwrap_or_default();
            info!(
                username = %profile.username,
                previous = %previous,
                current = %profile.name,
                at = %checked_at,
                "display name changed"
            );
            bus.emit(WatchEvent::NameChanged {
                username: profile.username.clone(),
                previous,
                current: profile.name.clone(),
                at: checked_at.clone(),
            });
        } else {
            debug!(username = %profile.username, "no display-name change since last check");
        }

        let snapshot = UserSnapshot {
            current_name: Some(profile.name.clone()),
            current_username: Some(profile.username.clone()),
            last_change_time: Some(checked_at.clone()),
            name_changed: changed,
        };
        *state.write().await = snapshot;

        bus.emit(WatchEvent::SnapshotUpdated {
            username: profile.username,
            display_name: profile.name.clone(),
            checked_at,
        });
        self.previous_name = Some(profile.name);
        Ok(())
    }

    /// GET the profile, honoring one rate-limit reset before giving up.
    async fn fetch_profile(&self) -> Result<ProfileData, FetchError> {
        let url = format!(
            "{}/2/users/by/username/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.username
        );

        let mut waited_for_reset = false;
        loop {
            let resp = self
                .client
                .get(&url)
                .bearer_auth(&self.config.bearer_token)
                .send()
                .await?;

            let status = resp.status();
            if status.as_u16() == 429 && !waited_for_reset {
                waited_for_reset = true;
                let wait = rate_limit_wait(resp.headers());
                warn!(
                    username = %self.config.username,
                    wait_secs = wait.as_secs(),
                    "rate limited by upstream, waiting for reset"
                );
                tokio::time::sleep(wait).await;
                continue;
            }
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }

            let body = resp.text().await?;
            let envelope: ProfileEnvelope = serde_json::from_str(&body)?;
            return Ok(envelope.data);
        }
    }
}

/// How long to sleep after a 429, from the `x-rate-limit-reset` header
/// (epoch seconds). Adds a small buffer past the reset; capped so a bad
/// header cannot stall the tracker indefinitely.
fn rate_limit_wait(headers: &reqwest::header::HeaderMap) -> Duration {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let reset = headers
        .get("x-rate-limit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(now);
    let wait = Duration::from_secs(reset.saturating_sub(now) + 5);
    wait.min(MAX_RATE_LIMIT_WAIT)
}
