use axum::{routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::extract::Negotiated;
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves requests.
    pub status: &'static str,
    /// Localized welcome message.
    pub message: String,
    /// Server time, RFC 3339 with milliseconds.
    pub timestamp: String,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// GET /health -- liveness probe, always JSON.
async fn health_check(ctx: Negotiated) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: ctx.translate("welcome"),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Mount health check routes (root-level, outside the versioned prefixes).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
