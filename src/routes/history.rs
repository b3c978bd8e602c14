// src/routes/history.rs
use axum::{
    extract::Query, extract::State, http::StatusCode, response::IntoResponse, routing::get, Json,
    Router,
};
use chrono::Duration;
use serde::Deserialize;
use tracing::{error, info};

use super::{window_start, AppState, ErrorBody};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/api/sensor/history", get(handler))
}

/// Query parameters for the history window.
#[derive(Debug, Deserialize)]
struct HistoryQuery {
    /// Trailing window in hours; the configured default when absent.
    hours: Option<u32>,
}

async fn handler(
    Query(params): Query<HistoryQuery>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    // ---
    let hours = params.hours.unwrap_or(state.config.history_default_hours);
    info!("GET /api/sensor/history - last {} hours", hours);

    let lower_bound = window_start(Duration::hours(i64::from(hours)));

    match state.store.since(lower_bound).await {
        Ok(history) => {
            info!("Returning {} snapshots", history.len());
            (StatusCode::OK, Json(history)).into_response()
        }
        Err(e) => {
            error!("History fetch error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    message: "Error fetching history data",
                }),
            )
                .into_response()
        }
    }
}
