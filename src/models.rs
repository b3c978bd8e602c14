//! Simple data models for the water-quality pipeline.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::purpose::PurposeVerdict;

// ---

/// pH assumed when the telemetry document omits it (neutral water).
pub const DEFAULT_PH: f64 = 7.0;

/// TDS (ppm) assumed when the telemetry document omits it.
pub const DEFAULT_TDS: f64 = 200.0;

/// Temperature (°C) assumed when the telemetry document omits it.
pub const DEFAULT_TEMPERATURE: f64 = 25.0;

/// Raw sensor data from the telemetry source.
///
/// Every field is optional; the device publishes whatever it measured last.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReading {
    // ---
    #[serde(rename = "pH", default)]
    pub ph: Option<f64>,

    #[serde(rename = "TDS", default)]
    pub tds: Option<f64>,

    #[serde(rename = "Temperature", default)]
    pub temperature: Option<f64>,
}

/// Canonical reading with all three measurements populated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    // ---
    #[serde(rename = "pH")]
    pub ph: f64,

    /// Total dissolved solids in parts per million.
    pub tds: f64,

    /// Water temperature in °C.
    pub temperature: f64,
}

/// Coarse safety class of a single reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyStatus {
    Safe,
    Moderate,
    Unsafe,
}

impl SafetyStatus {
    pub fn as_str(&self) -> &'static str {
        // ---
        match self {
            SafetyStatus::Safe => "safe",
            SafetyStatus::Moderate => "moderate",
            SafetyStatus::Unsafe => "unsafe",
        }
    }
}

impl fmt::Display for SafetyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SafetyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // ---
        match s {
            "safe" => Ok(SafetyStatus::Safe),
            "moderate" => Ok(SafetyStatus::Moderate),
            "unsafe" => Ok(SafetyStatus::Unsafe),
            other => Err(format!("unknown safety status '{other}'")),
        }
    }
}

/// One fully-derived record, appended to storage once per poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    // ---
    #[serde(rename = "pH")]
    pub ph: f64,
    pub tds: f64,
    pub temperature: f64,
    pub vitality_index: f64,
    pub status: SafetyStatus,

    /// Purpose tag exactly as the caller supplied it.
    pub purpose: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose_analysis: Option<PurposeVerdict>,

    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_raw_reading_uses_telemetry_keys() {
        // ---
        let raw: RawReading =
            serde_json::from_str(r#"{"pH": 6.9, "TDS": 310.0, "Temperature": 21.5}"#).unwrap();

        assert_eq!(raw.ph, Some(6.9));
        assert_eq!(raw.tds, Some(310.0));
        assert_eq!(raw.temperature, Some(21.5));
    }

    #[test]
    fn test_raw_reading_tolerates_missing_fields() {
        // ---
        let raw: RawReading = serde_json::from_str(r#"{"TDS": 120}"#).unwrap();

        assert_eq!(raw.ph, None);
        assert_eq!(raw.tds, Some(120.0));
        assert_eq!(raw.temperature, None);
    }

    #[test]
    fn test_safety_status_text_round_trip() {
        // ---
        for status in [SafetyStatus::Safe, SafetyStatus::Moderate, SafetyStatus::Unsafe] {
            assert_eq!(status.as_str().parse::<SafetyStatus>().unwrap(), status);
        }
        assert!("dangerous".parse::<SafetyStatus>().is_err());
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        // ---
        let snapshot = Snapshot {
            ph: 7.0,
            tds: 100.0,
            temperature: 20.0,
            vitality_index: 90.0,
            status: SafetyStatus::Safe,
            purpose: "general".to_string(),
            purpose_analysis: None,
            timestamp: DateTime::from_timestamp(0, 0).unwrap(),
        };

        let value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(value["pH"], 7.0);
        assert_eq!(value["vitalityIndex"], 90.0);
        assert_eq!(value["status"], "safe");
        assert!(value.get("purposeAnalysis").is_none());
    }
}
