//! Purpose-specific suitability analysis.
//!
//! Each declared use of the water (drinking, irrigation, river ecology,
//! industrial process) has one static [`Policy`] record: the acceptable
//! ranges, the verdict texts and an ordered list of recommendation rules.
//! [`analyze_purpose`] runs the same evaluation over whichever policy the
//! purpose selects; `general` has no policy and is always reported safe.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Reading;

// ---

/// Declared intended use of the monitored water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    Drinking,
    Agricultural,
    River,
    Industrial,
    General,
}

impl Purpose {
    /// Resolve a caller-supplied tag, matched exactly. Anything else,
    /// including differently-cased tags, falls back to `General`.
    pub fn from_tag(tag: &str) -> Self {
        // ---
        match tag {
            "drinking" => Purpose::Drinking,
            "agricultural" => Purpose::Agricultural,
            "river" => Purpose::River,
            "industrial" => Purpose::Industrial,
            _ => Purpose::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        // ---
        match self {
            Purpose::Drinking => "drinking",
            Purpose::Agricultural => "agricultural",
            Purpose::River => "river",
            Purpose::Industrial => "industrial",
            Purpose::General => "general",
        }
    }

    fn policy(&self) -> Option<&'static Policy> {
        // ---
        match self {
            Purpose::Drinking => Some(&DRINKING),
            Purpose::Agricultural => Some(&AGRICULTURAL),
            Purpose::River => Some(&RIVER),
            Purpose::Industrial => Some(&INDUSTRIAL),
            Purpose::General => None,
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a purpose analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Safe,
    Caution,
    Unsafe,
}

/// Acceptable `[min, max]` ranges for a purpose. All empty for `general`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    // ---
    #[serde(rename = "pH", default, skip_serializing_if = "Option::is_none")]
    pub ph: Option<[f64; 2]>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tds: Option<[f64; 2]>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp: Option<[f64; 2]>,
}

/// Suitability verdict for one reading under one purpose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurposeVerdict {
    // ---
    pub purpose: Purpose,
    pub suitability: String,
    pub status: VerdictStatus,
    pub thresholds: Thresholds,
    pub recommendations: Vec<String>,
}

// ---

struct Policy {
    ph: [f64; 2],
    tds: [f64; 2],
    temp: [f64; 2],

    /// Maximum temperature for a safe verdict, when temperature gates at all.
    temp_gate: Option<f64>,

    suitable: &'static str,
    unsuitable: &'static str,
    failure_status: VerdictStatus,
    rules: &'static [Rule],
}

/// A recommendation appended when `applies` holds for the reading.
struct Rule {
    applies: fn(&Reading) -> bool,
    message: &'static str,

    /// Forces the verdict to `unsafe` regardless of the base evaluation.
    escalates: bool,
}

const fn advise(applies: fn(&Reading) -> bool, message: &'static str) -> Rule {
    Rule {
        applies,
        message,
        escalates: false,
    }
}

const fn escalate(applies: fn(&Reading) -> bool, message: &'static str) -> Rule {
    Rule {
        applies,
        message,
        escalates: true,
    }
}

static DRINKING: Policy = Policy {
    ph: [6.5, 8.5],
    tds: [0.0, 500.0],
    temp: [5.0, 25.0],
    temp_gate: None,
    suitable: "Suitable for drinking",
    unsuitable: "Not suitable for drinking without treatment",
    failure_status: VerdictStatus::Unsafe,
    rules: &[
        advise(|r| r.ph < 6.5, "pH too acidic. Neutralization required."),
        advise(|r| r.ph > 8.5, "pH too alkaline. Treatment needed."),
        advise(
            |r| r.tds > 500.0,
            "TDS exceeds WHO limit (500 ppm). Reverse osmosis recommended.",
        ),
        advise(
            |r| r.temperature > 15.0,
            "Water temperature high. Cool storage recommended.",
        ),
    ],
};

static AGRICULTURAL: Policy = Policy {
    ph: [5.5, 9.0],
    tds: [0.0, 2000.0],
    temp: [10.0, 30.0],
    temp_gate: None,
    suitable: "Suitable for irrigation",
    unsuitable: "May affect crop growth",
    failure_status: VerdictStatus::Caution,
    rules: &[
        advise(|r| r.ph < 5.5, "Acidic pH may harm sensitive crops. Add lime."),
        advise(
            |r| r.ph > 9.0,
            "High pH may reduce nutrient availability. Add sulfur.",
        ),
        advise(
            |r| r.tds > 2000.0,
            "High salinity. Use salt-tolerant crops or improve drainage.",
        ),
        advise(
            |r| r.tds > 1000.0 && r.tds <= 2000.0,
            "Moderate salinity. Monitor soil salinity levels.",
        ),
    ],
};

static RIVER: Policy = Policy {
    ph: [6.5, 8.5],
    tds: [0.0, 1000.0],
    temp: [15.0, 28.0],
    temp_gate: Some(28.0),
    suitable: "Healthy aquatic ecosystem",
    unsuitable: "Ecosystem under stress",
    failure_status: VerdictStatus::Caution,
    rules: &[
        advise(
            |r| r.ph < 6.5 || r.ph > 8.5,
            "pH outside normal range for aquatic life.",
        ),
        advise(
            |r| r.tds > 1000.0,
            "High TDS may affect aquatic biodiversity.",
        ),
        advise(
            |r| r.temperature > 28.0,
            "Thermal pollution detected. Harmful to fish and aquatic life.",
        ),
        escalate(
            |r| r.temperature > 30.0,
            "Critical thermal pollution! Immediate investigation needed.",
        ),
    ],
};

static INDUSTRIAL: Policy = Policy {
    ph: [6.0, 9.0],
    tds: [0.0, 3000.0],
    temp: [10.0, 40.0],
    temp_gate: None,
    suitable: "Acceptable for industrial use",
    unsuitable: "May cause equipment corrosion or scaling",
    failure_status: VerdictStatus::Caution,
    rules: &[
        advise(
            |r| r.ph < 6.0,
            "Acidic water may corrode equipment. Neutralize before use.",
        ),
        advise(
            |r| r.ph > 9.0,
            "Alkaline water may cause scaling. Pre-treatment needed.",
        ),
        advise(
            |r| r.tds > 3000.0,
            "Very high TDS. May require demineralization for cooling systems.",
        ),
        escalate(
            |r| r.tds > 5000.0,
            "TDS too high for most industrial applications.",
        ),
    ],
};

fn within(range: [f64; 2], value: f64) -> bool {
    value >= range[0] && value <= range[1]
}

impl Policy {
    fn admits(&self, reading: &Reading) -> bool {
        // ---
        within(self.ph, reading.ph)
            && within(self.tds, reading.tds)
            && self.temp_gate.map_or(true, |max| reading.temperature <= max)
    }

    fn thresholds(&self) -> Thresholds {
        Thresholds {
            ph: Some(self.ph),
            tds: Some(self.tds),
            temp: Some(self.temp),
        }
    }

    fn evaluate(&self, purpose: Purpose, reading: &Reading) -> PurposeVerdict {
        // ---
        let (suitability, mut status) = if self.admits(reading) {
            (self.suitable, VerdictStatus::Safe)
        } else {
            (self.unsuitable, self.failure_status)
        };

        let mut recommendations = Vec::new();
        for rule in self.rules.iter().filter(|rule| (rule.applies)(reading)) {
            if rule.escalates {
                status = VerdictStatus::Unsafe;
            }
            recommendations.push(rule.message.to_string());
        }

        PurposeVerdict {
            purpose,
            suitability: suitability.to_string(),
            status,
            thresholds: self.thresholds(),
            recommendations,
        }
    }
}

/// Judge a reading against the policy of `purpose`.
pub fn analyze_purpose(reading: &Reading, purpose: Purpose) -> PurposeVerdict {
    // ---
    match purpose.policy() {
        Some(policy) => policy.evaluate(purpose, reading),
        None => PurposeVerdict {
            purpose: Purpose::General,
            suitability: "General monitoring".to_string(),
            status: VerdictStatus::Safe,
            thresholds: Thresholds::default(),
            recommendations: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn reading(ph: f64, tds: f64, temperature: f64) -> Reading {
        Reading {
            ph,
            tds,
            temperature,
        }
    }

    #[test]
    fn test_purpose_tags() {
        // ---
        assert_eq!(Purpose::from_tag("drinking"), Purpose::Drinking);
        assert_eq!(Purpose::from_tag("agricultural"), Purpose::Agricultural);
        assert_eq!(Purpose::from_tag("river"), Purpose::River);
        assert_eq!(Purpose::from_tag("Drinking "), Purpose::General);
        assert_eq!(Purpose::from_tag(" river"), Purpose::General);
        assert_eq!(Purpose::from_tag("industrial"), Purpose::Industrial);
        assert_eq!(Purpose::from_tag("general"), Purpose::General);
        assert_eq!(Purpose::from_tag("swimming"), Purpose::General);
        assert_eq!(Purpose::from_tag(""), Purpose::General);
    }

    #[test]
    fn test_drinking_safe() {
        // ---
        let verdict = analyze_purpose(&reading(7.0, 400.0, 10.0), Purpose::Drinking);

        assert_eq!(verdict.status, VerdictStatus::Safe);
        assert_eq!(verdict.suitability, "Suitable for drinking");
        assert!(verdict.recommendations.is_empty());
        assert_eq!(verdict.thresholds.ph, Some([6.5, 8.5]));
        assert_eq!(verdict.thresholds.tds, Some([0.0, 500.0]));
        assert_eq!(verdict.thresholds.temp, Some([5.0, 25.0]));
    }

    #[test]
    fn test_drinking_warm_water_still_safe_but_advised() {
        // ---
        let verdict = analyze_purpose(&reading(7.0, 100.0, 20.0), Purpose::Drinking);

        assert_eq!(verdict.status, VerdictStatus::Safe);
        assert_eq!(
            verdict.recommendations,
            vec!["Water temperature high. Cool storage recommended."]
        );
    }

    #[test]
    fn test_drinking_failures_collect_in_order() {
        // ---
        let verdict = analyze_purpose(&reading(6.0, 800.0, 22.0), Purpose::Drinking);

        assert_eq!(verdict.status, VerdictStatus::Unsafe);
        assert_eq!(
            verdict.suitability,
            "Not suitable for drinking without treatment"
        );
        assert_eq!(
            verdict.recommendations,
            vec![
                "pH too acidic. Neutralization required.",
                "TDS exceeds WHO limit (500 ppm). Reverse osmosis recommended.",
                "Water temperature high. Cool storage recommended.",
            ]
        );

        let alkaline = analyze_purpose(&reading(9.0, 100.0, 10.0), Purpose::Drinking);
        assert_eq!(alkaline.recommendations, vec!["pH too alkaline. Treatment needed."]);
    }

    #[test]
    fn test_drinking_boundaries_inclusive() {
        // ---
        let verdict = analyze_purpose(&reading(8.5, 500.0, 15.0), Purpose::Drinking);
        assert_eq!(verdict.status, VerdictStatus::Safe);
        assert!(verdict.recommendations.is_empty());
    }

    #[test]
    fn test_agricultural_moderate_salinity_on_safe_reading() {
        // ---
        let verdict = analyze_purpose(&reading(7.0, 1500.0, 20.0), Purpose::Agricultural);

        assert_eq!(verdict.status, VerdictStatus::Safe);
        assert_eq!(verdict.suitability, "Suitable for irrigation");
        assert_eq!(
            verdict.recommendations,
            vec!["Moderate salinity. Monitor soil salinity levels."]
        );
    }

    #[test]
    fn test_agricultural_caution() {
        // ---
        let verdict = analyze_purpose(&reading(5.0, 2500.0, 20.0), Purpose::Agricultural);

        assert_eq!(verdict.status, VerdictStatus::Caution);
        assert_eq!(verdict.suitability, "May affect crop growth");
        assert_eq!(
            verdict.recommendations,
            vec![
                "Acidic pH may harm sensitive crops. Add lime.",
                "High salinity. Use salt-tolerant crops or improve drainage.",
            ]
        );

        let alkaline = analyze_purpose(&reading(9.5, 100.0, 20.0), Purpose::Agricultural);
        assert_eq!(
            alkaline.recommendations,
            vec!["High pH may reduce nutrient availability. Add sulfur."]
        );
    }

    #[test]
    fn test_river_temperature_gates_safe_verdict() {
        // ---
        let healthy = analyze_purpose(&reading(7.5, 600.0, 28.0), Purpose::River);
        assert_eq!(healthy.status, VerdictStatus::Safe);
        assert_eq!(healthy.suitability, "Healthy aquatic ecosystem");

        let warm = analyze_purpose(&reading(7.5, 600.0, 29.0), Purpose::River);
        assert_eq!(warm.status, VerdictStatus::Caution);
        assert_eq!(warm.suitability, "Ecosystem under stress");
        assert_eq!(
            warm.recommendations,
            vec!["Thermal pollution detected. Harmful to fish and aquatic life."]
        );
    }

    #[test]
    fn test_river_critical_heat_escalates() {
        // ---
        let verdict = analyze_purpose(&reading(6.0, 1200.0, 31.0), Purpose::River);

        assert_eq!(verdict.status, VerdictStatus::Unsafe);
        assert_eq!(
            verdict.recommendations,
            vec![
                "pH outside normal range for aquatic life.",
                "High TDS may affect aquatic biodiversity.",
                "Thermal pollution detected. Harmful to fish and aquatic life.",
                "Critical thermal pollution! Immediate investigation needed.",
            ]
        );
    }

    #[test]
    fn test_industrial_escalation() {
        // ---
        let verdict = analyze_purpose(&reading(5.0, 6000.0, 20.0), Purpose::Industrial);

        assert_eq!(verdict.status, VerdictStatus::Unsafe);
        assert!(verdict
            .recommendations
            .contains(&"Acidic water may corrode equipment. Neutralize before use.".to_string()));
        assert!(verdict
            .recommendations
            .contains(&"TDS too high for most industrial applications.".to_string()));
        assert_eq!(verdict.recommendations.len(), 3);
    }

    #[test]
    fn test_industrial_caution_without_escalation() {
        // ---
        let verdict = analyze_purpose(&reading(9.5, 4000.0, 20.0), Purpose::Industrial);

        assert_eq!(verdict.status, VerdictStatus::Caution);
        assert_eq!(
            verdict.suitability,
            "May cause equipment corrosion or scaling"
        );
        assert_eq!(
            verdict.recommendations,
            vec![
                "Alkaline water may cause scaling. Pre-treatment needed.",
                "Very high TDS. May require demineralization for cooling systems.",
            ]
        );
    }

    #[test]
    fn test_general_never_judges() {
        // ---
        let verdict = analyze_purpose(&reading(2.0, 9000.0, 45.0), Purpose::General);

        assert_eq!(verdict.purpose, Purpose::General);
        assert_eq!(verdict.status, VerdictStatus::Safe);
        assert_eq!(verdict.suitability, "General monitoring");
        assert!(verdict.recommendations.is_empty());
        assert_eq!(verdict.thresholds, Thresholds::default());

        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["thresholds"], serde_json::json!({}));
    }

    #[test]
    fn test_verdict_serialization_shape() {
        // ---
        let verdict = analyze_purpose(&reading(7.0, 100.0, 10.0), Purpose::River);
        let json = serde_json::to_value(&verdict).unwrap();

        assert_eq!(json["purpose"], "river");
        assert_eq!(json["status"], "safe");
        assert_eq!(json["thresholds"]["pH"], serde_json::json!([6.5, 8.5]));
        assert_eq!(json["thresholds"]["temp"], serde_json::json!([15.0, 28.0]));
    }
}
