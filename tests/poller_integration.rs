//! Poller behavior against a stubbed user-data endpoint.
//!
//! Ticks are driven directly (no timer) so each case exercises exactly
//! the fetch-and-render path.

use namewatch::model::UserSnapshot;
use namewatch::poller::{Poller, PollerConfig};
use namewatch::render::{Page, RenderSurface, ERROR_FRAGMENT};
use serde_json::json;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::timeout;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn poller_for(server: &MockServer) -> Poller {
    Poller::new(PollerConfig::new(format!("{}/api/user-data", server.uri())))
}

/// Surface that timestamps every render so the loop schedule can be
/// observed from outside the running task.
struct RecordingSurface {
    tx: mpsc::UnboundedSender<(Instant, String)>,
}

impl RenderSurface for RecordingSurface {
    fn apply(&mut self, snapshot: &UserSnapshot) {
        let _ = self
            .tx
            .send((Instant::now(), snapshot.name_display().to_string()));
    }

    fn show_error(&mut self) {
        let _ = self.tx.send((Instant::now(), "error".to_string()));
    }
}

#[tokio::test]
async fn test_full_response_renders_all_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_name": "Ada Lovelace",
            "current_username": "ada",
            "last_change_time": "09:30:00 AM",
            "name_changed": true,
        })))
        .mount(&server)
        .await;

    let mut page = Page::default();
    poller_for(&server).tick(&mut page).await;

    assert_eq!(page.current_name, "Ada Lovelace");
    assert_eq!(page.current_username, "ada");
    assert_eq!(page.last_change_time, "09:30:00 AM");
    assert_eq!(page.name_changed, "Yes");
    assert!(page.user_info.contains("Ada Lovelace"));
    assert!(page.user_info.contains("@ada"));
    assert!(page.user_info.contains("09:30:00 AM"));
    assert!(page.user_info.contains("Yes"));
}

#[tokio::test]
async fn test_missing_fields_render_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_username": "ada",
        })))
        .mount(&server)
        .await;

    let mut page = Page::default();
    poller_for(&server).tick(&mut page).await;

    assert_eq!(page.current_name, "N/A");
    assert_eq!(page.current_username, "ada");
    assert_eq!(page.last_change_time, "N/A");
    assert_eq!(page.name_changed, "No");
}

#[tokio::test]
async fn test_name_changed_false_renders_no() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_name": "Ada Lovelace",
            "current_username": "ada",
            "last_change_time": "09:30:00 AM",
            "name_changed": false,
        })))
        .mount(&server)
        .await;

    let mut page = Page::default();
    poller_for(&server).tick(&mut page).await;

    assert_eq!(page.name_changed, "No");
    assert!(page.user_info.contains("<p><strong>Name Changed:</strong> No</p>"));
}

#[tokio::test]
async fn test_server_error_shows_error_fragment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user-data"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut page = Page::default();
    poller_for(&server).tick(&mut page).await;

    assert_eq!(page.user_info, ERROR_FRAGMENT);
    // Text slots were never written
    assert_eq!(page.current_name, "");
    assert_eq!(page.current_username, "");
}

#[tokio::test]
async fn test_malformed_body_shows_error_fragment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user-data"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let mut page = Page::default();
    poller_for(&server).tick(&mut page).await;

    assert_eq!(page.user_info, ERROR_FRAGMENT);
}

#[tokio::test]
async fn test_success_then_failure_keeps_stale_fields() {
    let server = MockServer::start().await;
    // First tick gets data, every later tick gets a 500
    Mock::given(method("GET"))
        .and(path("/api/user-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_name": "Ada Lovelace",
            "current_username": "ada",
            "last_change_time": "09:30:00 AM",
            "name_changed": true,
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/user-data"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let poller = poller_for(&server);
    let mut page = Page::default();

    poller.tick(&mut page).await;
    assert_eq!(page.current_name, "Ada Lovelace");
    assert!(page.user_info.contains("Ada Lovelace"));

    poller.tick(&mut page).await;
    assert_eq!(page.user_info, ERROR_FRAGMENT);
    // Discrete fields still show the first tick's values
    assert_eq!(page.current_name, "Ada Lovelace");
    assert_eq!(page.current_username, "ada");
    assert_eq!(page.last_change_time, "09:30:00 AM");
    assert_eq!(page.name_changed, "Yes");
}

#[tokio::test]
async fn test_run_ticks_immediately_then_periodically() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_name": "Ada Lovelace",
            "current_username": "ada",
        })))
        .mount(&server)
        .await;

    let mut config = PollerConfig::new(format!("{}/api/user-data", server.uri()));
    config.period = Duration::from_millis(100);
    let poller = Poller::new(config);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let started = Instant::now();
    let handle = tokio::spawn(async move {
        let mut surface = RecordingSurface { tx };
        poller.run(&mut surface).await;
    });

    let (first_at, first) = timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first, "Ada Lovelace");
    // First tick fires on start, not one period later
    assert!(
        first_at.duration_since(started) < Duration::from_millis(500),
        "first tick should be immediate"
    );

    let (second_at, second) = timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second, "Ada Lovelace");
    assert!(second_at > first_at);

    handle.abort();
}

#[tokio::test]
async fn test_run_slow_response_delays_next_tick() {
    let server = MockServer::start().await;
    // Each response takes three periods to arrive
    Mock::given(method("GET"))
        .and(path("/api/user-data"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "current_name": "Ada Lovelace",
                    "current_username": "ada",
                }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let mut config = PollerConfig::new(format!("{}/api/user-data", server.uri()));
    config.period = Duration::from_millis(100);
    let poller = Poller::new(config);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(async move {
        let mut surface = RecordingSurface { tx };
        poller.run(&mut surface).await;
    });

    let mut render_times = Vec::new();
    for _ in 0..3 {
        let (at, _) = timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        render_times.push(at);
    }
    handle.abort();

    // Sequential ticks: each render waits out the slow response, so the
    // gap tracks the response delay, never the shorter period
    for pair in render_times.windows(2) {
        let gap = pair[1].duration_since(pair[0]);
        assert!(
            gap >= Duration::from_millis(200),
            "ticks overlapped: renders only {gap:?} apart"
        );
    }
}

#[tokio::test]
async fn test_failure_then_success_recovers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user-data"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/user-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_name": "Ada Lovelace",
            "current_username": "ada",
        })))
        .mount(&server)
        .await;

    let poller = poller_for(&server);
    let mut page = Page::default();

    poller.tick(&mut page).await;
    assert_eq!(page.user_info, ERROR_FRAGMENT);

    poller.tick(&mut page).await;
    assert_eq!(page.current_name, "Ada Lovelace");
    assert!(page.user_info.contains("@ada"));
}
