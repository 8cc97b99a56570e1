//! Health and stats endpoints.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Liveness probe kept for existing load balancer checks
//! - `/stats` - Outcome counters per endpoint

use axum::{extract::State, http::StatusCode, Json};

use crate::{state::AppState, stats::StatsSnapshot};

/// GET /livez - Basic liveness probe.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Plain-text liveness probe.
pub async fn healthz() -> &'static str {
    "lock and load.."
}

/// GET /stats - Snapshot of the outcome counters.
pub async fn stats(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.stats.snapshot())
}
