//! Watch a user-data endpoint and render updates in the terminal.

use crate::poller::{Poller, PollerConfig};
use crate::render::ConsoleSurface;
use anyhow::Result;
use std::time::Duration;
use tracing::info;

/// Poll `endpoint` every `period_ms` milliseconds until interrupted.
pub async fn run(endpoint: &str, period_ms: u64) -> Result<()> {
    let mut config = PollerConfig::new(endpoint);
    config.period = Duration::from_millis(period_ms);

    info!(endpoint, period_ms, "watching user data");

    let poller = Poller::new(config);
    let mut surface = ConsoleSurface::new();
    poller.run(&mut surface).await;
    Ok(())
}
