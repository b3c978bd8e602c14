//! Vitality index: a single 0–100 health score for a reading.

use super::round_to;

/// Points lost per pH unit away from neutral.
const PH_PENALTY_PER_UNIT: f64 = 10.0;

/// TDS divisor; 1000 ppm costs the full 100 points.
const TDS_PENALTY_DIVISOR: f64 = 10.0;

/// Compute the vitality index from pH and TDS.
///
/// `100 − (|pH − 7| × 10 + tds / 10)`, clamped to `[0, 100]` and rounded to
/// one decimal. Temperature plays no part in the score.
pub fn vitality_index(ph: f64, tds: f64) -> f64 {
    // ---
    let ph_penalty = (ph - 7.0).abs() * PH_PENALTY_PER_UNIT;
    let tds_penalty = tds / TDS_PENALTY_DIVISOR;
    let index = (100.0 - (ph_penalty + tds_penalty)).clamp(0.0, 100.0);

    round_to(index, 1)
}
