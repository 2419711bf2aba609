//! The poller — periodic reads of the user-data endpoint into a render
//! surface.
//!
//! Each tick is stateless: fetch, render, done. Failures never escape a
//! tick; the next tick retries the same request unconditionally.

use crate::error::FetchError;
use crate::model::UserSnapshot;
use crate::render::RenderSurface;
use std::time::Duration;
use tracing::{debug, warn};

/// Default refresh period.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(5000);

/// Default per-request timeout, kept under the period so a dead
/// endpoint costs at most one tick.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(4);

/// Explicit poller configuration (no ambient globals).
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// URL of the user-data JSON resource.
    pub endpoint: String,
    /// Time between ticks.
    pub period: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl PollerConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            period: DEFAULT_PERIOD,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Polls a single JSON resource and writes the result into a surface.
pub struct Poller {
    client: reqwest::Client,
    config: PollerConfig,
}

impl Poller {
    pub fn new(config: PollerConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();
        Self { client, config }
    }

    /// Run forever: one immediate tick, then one per period.
    ///
    /// Ticks are strictly sequential — a slow response delays the next
    /// tick instead of overlapping it, and a missed deadline shifts the
    /// schedule rather than bursting.
    pub async fn run(&self, surface: &mut dyn RenderSurface) {
        let mut interval = tokio::time::interval(self.config.period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            self.tick(surface).await;
        }
    }

    /// One tick: fetch and render. All failures are contained here.
    pub async fn tick(&self, surface: &mut dyn RenderSurface) {
        match self.fetch().await {
            Ok(snapshot) => {
                debug!(
                    endpoint = %self.config.endpoint,
                    name = snapshot.name_display(),
                    "rendered user data"
                );
                surface.apply(&snapshot);
            }
            Err(e) => {
                warn!(endpoint = %self.config.endpoint, error = %e, "failed to fetch user data");
                surface.show_error();
            }
        }
    }

    async fn fetch(&self) -> Result<UserSnapshot, FetchError> {
        let resp = self.client.get(&self.config.endpoint).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = resp.text().await?;
        let snapshot = serde_json::from_str(&body)?;
        Ok(snapshot)
    }
}
