// src/routes/analytics.rs
use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use chrono::Duration;
use tracing::{debug, error, info};

use super::{window_start, AppState, ErrorBody};
use crate::analyze_trend;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/api/sensor/analytics", get(handler))
}

async fn handler(State(state): State<AppState>) -> impl IntoResponse {
    // ---
    let days = state.config.analytics_window_days;
    info!("GET /api/sensor/analytics - last {} days", days);

    let lower_bound = window_start(Duration::days(i64::from(days)));

    let window = match state.store.since(lower_bound).await {
        Ok(window) => window,
        Err(e) => {
            error!("Analytics error: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    message: "Error generating analytics",
                }),
            )
                .into_response();
        }
    };

    debug!("Analyzing {} snapshots", window.len());
    let report = analyze_trend(&window);
    info!(
        "Analytics complete: trend={:?}, {} alerts, {} predictions",
        report.trend,
        report.alerts.len(),
        report.predictions.len()
    );

    (StatusCode::OK, Json(report)).into_response()
}
