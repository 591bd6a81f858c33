//! Health Routes
//!
//! - GET /health/live - Liveness probe
//! - GET /health - Status with uptime and entry count

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::server::state::ServerState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub entries: usize,
    pub uptime_seconds: u64,
    pub version: String,
}

/// GET /health/live
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Reports "degraded" when the provider cannot list its entries.
pub async fn full_health(State(state): State<Arc<ServerState>>) -> Json<HealthResponse> {
    let (status, entries) = match state.provider.list_entries().await {
        Ok(entries) => ("healthy", entries.len()),
        Err(e) => {
            tracing::warn!("Provider health check failed: {}", e);
            ("degraded", 0)
        }
    };

    Json(HealthResponse {
        status: status.to_string(),
        entries,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
