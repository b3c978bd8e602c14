//! Telemetry source: where the latest raw sensor reading comes from.
//!
//! The device publishes its most recent measurement as a single JSON document
//! (`{"pH": .., "TDS": .., "Temperature": ..}`) on a real-time database.
//! [`HttpTelemetry`] fetches that document; tests substitute their own
//! [`TelemetrySource`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::models::RawReading;

// ---

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("telemetry request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("telemetry source answered with HTTP {0}")]
    Status(StatusCode),

    #[error("telemetry source unavailable: {0}")]
    Unavailable(String),
}

/// Anything that can hand out the most recent raw reading.
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    async fn fetch_latest(&self) -> Result<RawReading, TelemetryError>;
}

/// Fetches the latest-reading document over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTelemetry {
    client: reqwest::Client,
    url: String,
}

impl HttpTelemetry {
    /// Build a client for `url` with a per-request `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, TelemetryError> {
        // ---
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl TelemetrySource for HttpTelemetry {
    async fn fetch_latest(&self) -> Result<RawReading, TelemetryError> {
        // ---
        tracing::debug!("Fetching latest reading from: {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TelemetryError::Status(status));
        }

        // A document that was never written comes back as JSON `null`
        let raw: Option<RawReading> = response.json().await?;
        let raw = raw.unwrap_or_default();

        tracing::debug!("Latest raw reading: {:?}", raw);
        Ok(raw)
    }
}
