// Copyright 2026 Namewatch Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP API serving the tracker's latest snapshot.
//!
//! One data endpoint, `GET /api/user-data`, read straight out of the
//! [`SharedSnapshot`] the tracker writes into, plus a health probe.
//! CORS is wide open: the display polling this endpoint may be served
//! from anywhere.

use crate::model::UserSnapshot;
use crate::tracker::SharedSnapshot;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};

/// Build the axum Router with all endpoints.
pub fn router(state: SharedSnapshot) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/user-data", get(user_data))
        .layer(cors)
        .with_state(state)
}

/// Start the API server on the given port.
///
/// Runs until the listener fails or the task is dropped.
pub async fn start(port: u16, state: SharedSnapshot) -> anyhow::Result<()> {
    let app = router(state);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!("user-data API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn user_data(State(state): State<SharedSnapshot>) -> Json<UserSnapshot> {
    Json(state.read().await.clone())
}
