// src/routes/current.rs
use axum::{
    extract::Query, extract::State, http::StatusCode, response::IntoResponse, routing::get, Json,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::AppState;
use crate::engine::GENERAL_TAG;
use crate::{derive_snapshot, SafetyStatus, Snapshot};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/api/sensor/current", get(handler))
}

#[derive(Debug, Deserialize)]
struct CurrentQuery {
    #[serde(default = "default_purpose")]
    purpose: String,
}

fn default_purpose() -> String {
    GENERAL_TAG.to_string()
}

/// Stand-in reading returned with a failed poll so dashboards keep rendering.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MockReading {
    // ---
    #[serde(rename = "pH")]
    ph: f64,
    tds: f64,
    temperature: f64,
    vitality_index: f64,
    status: SafetyStatus,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PollFailure {
    message: &'static str,
    mock_data: MockReading,
}

impl PollFailure {
    fn at(timestamp: DateTime<Utc>) -> Self {
        // ---
        PollFailure {
            message: "Error fetching sensor data",
            mock_data: MockReading {
                ph: 7.2,
                tds: 280.0,
                temperature: 24.0,
                vitality_index: 75.8,
                status: SafetyStatus::Safe,
                timestamp,
            },
        }
    }
}

async fn handler(
    Query(params): Query<CurrentQuery>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    // ---
    info!("GET /api/sensor/current - purpose={}", params.purpose);

    match poll(&state, &params.purpose).await {
        Ok(snapshot) => {
            info!(
                "Snapshot stored: vitality={} status={}",
                snapshot.vitality_index, snapshot.status
            );
            (StatusCode::OK, Json(snapshot)).into_response()
        }
        Err(e) => {
            error!("Sensor poll failed: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PollFailure::at(Utc::now())),
            )
                .into_response()
        }
    }
}

/// Fetch the latest reading, derive its snapshot and append it to storage.
async fn poll(state: &AppState, purpose: &str) -> anyhow::Result<Snapshot> {
    // ---
    debug!("GET /api/sensor/current - Step 1: fetch");
    let raw = state.telemetry.fetch_latest().await?;

    debug!("GET /api/sensor/current - Step 2: derive");
    let snapshot = derive_snapshot(&raw, purpose, Utc::now());

    debug!("GET /api/sensor/current - Step 3: store");
    state.store.append(&snapshot).await?;

    Ok(snapshot)
}
