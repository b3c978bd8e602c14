//! Derivation engine: pure functions from sensor readings to assessments.
//!
//! Nothing in here performs I/O or holds state. Callers hand in a raw reading
//! (or a window of stored snapshots) and get back a fully derived record.
//! Two entry points are exposed to the rest of the service:
//!
//! - [`derive_snapshot`] – raw reading + purpose tag → [`Snapshot`]
//! - [`analyze_trend`] – time-ordered snapshots → [`AnalyticsReport`]
//!
//! The sibling modules each own one step and are usable on their own.

use chrono::{DateTime, Utc};

use crate::models::{RawReading, Snapshot};

pub mod normalize;
pub mod purpose;
pub mod safety;
pub mod trend;
pub mod vitality;

pub use purpose::{analyze_purpose, Purpose, PurposeVerdict, Thresholds, VerdictStatus};
pub use safety::classify;
pub use trend::{analyze_trend, Alert, AlertKind, AnalyticsReport, Severity, ThermalStatus, Trend};
pub use vitality::vitality_index;

// ---

/// Tag under which no purpose analysis is attached.
pub const GENERAL_TAG: &str = "general";

/// Derive a complete snapshot from one telemetry reading.
///
/// The reading is normalized first, then scored and classified. Any tag other
/// than an empty one or `"general"` also gets a purpose verdict; unknown tags
/// receive the general verdict. `at` becomes the snapshot timestamp so the
/// function stays deterministic.
pub fn derive_snapshot(raw: &RawReading, purpose_tag: &str, at: DateTime<Utc>) -> Snapshot {
    // ---
    let reading = raw.normalize();

    let purpose_analysis = match purpose_tag {
        "" | GENERAL_TAG => None,
        tag => Some(analyze_purpose(&reading, Purpose::from_tag(tag))),
    };

    Snapshot {
        ph: reading.ph,
        tds: reading.tds,
        temperature: reading.temperature,
        vitality_index: vitality_index(reading.ph, reading.tds),
        status: classify(reading.ph, reading.tds),
        purpose: purpose_tag.to_string(),
        purpose_analysis,
        timestamp: at,
    }
}

/// Round to `places` decimals with halves going toward positive infinity.
///
/// Negative halves therefore round up (`-2.25` → `-2.2` at one decimal).
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    // ---
    let factor = 10f64.powi(places);
    (value * factor + 0.5).floor() / factor
}
