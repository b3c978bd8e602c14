//! Route gateway: merges every endpoint's subrouter into one [`Router`].
//!
//! Each sibling module exports a `router()` and keeps its handlers and
//! request/response types private (EMBP).

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::store::SnapshotStore;
use crate::telemetry::TelemetrySource;
use crate::Config;

mod analytics;
mod current;
mod health;
mod history;

// ---

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    // ---
    pub store: Arc<dyn SnapshotStore>,
    pub telemetry: Arc<dyn TelemetrySource>,
    pub config: Config,
}

/// JSON body returned alongside a 500.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: &'static str,
}

/// Lower bound of a trailing window ending now.
///
/// Spans reaching past chrono's representable range clamp to the earliest
/// instant, so an oversized window simply returns everything.
fn window_start(span: Duration) -> DateTime<Utc> {
    // ---
    Utc::now()
        .checked_sub_signed(span)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

pub fn router(state: AppState) -> Router {
    // ---
    Router::new()
        .merge(current::router())
        .merge(history::router())
        .merge(analytics::router())
        .merge(health::router())
        .with_state(state)
}
