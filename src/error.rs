//! Error types for the polling client.

use thiserror::Error;

/// Everything that can go wrong in one poll of the user-data endpoint.
///
/// The poller's policy collapses all variants into the same outcome
/// (contained inside the tick, logged, rendered as the fixed error
/// fragment); the variants exist so the log line can say which stage
/// failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered outside the 2xx range.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The body was not a valid snapshot document.
    #[error("invalid response body: {0}")]
    Parse(#[from] serde_json::Error),
}
