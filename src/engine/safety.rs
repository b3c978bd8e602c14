//! Three-tier safety classification from pH and TDS.

use crate::models::SafetyStatus;

/// A band is admitted when pH lies in the inclusive range and TDS is
/// strictly below the ceiling.
struct Band {
    status: SafetyStatus,
    ph: (f64, f64),
    tds_below: f64,
}

/// Checked in order; the first admitting band wins.
const BANDS: &[Band] = &[
    Band {
        status: SafetyStatus::Safe,
        ph: (6.8, 8.2),
        tds_below: 350.0,
    },
    Band {
        status: SafetyStatus::Moderate,
        ph: (6.5, 8.5),
        tds_below: 500.0,
    },
];

/// Classify a reading as safe, moderate or unsafe.
pub fn classify(ph: f64, tds: f64) -> SafetyStatus {
    // ---
    BANDS
        .iter()
        .find(|band| ph >= band.ph.0 && ph <= band.ph.1 && tds < band.tds_below)
        .map(|band| band.status)
        .unwrap_or(SafetyStatus::Unsafe)
}
