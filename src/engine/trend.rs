//! Rolling-window analytics over stored snapshots.
//!
//! The analyzer reduces a window to a handful of means and then runs three
//! independent rule tables over them: insights, alerts and predictions. Every
//! rule whose predicate holds contributes, in table order. Adding a rule
//! never changes what the existing ones emit.

use serde::{Deserialize, Serialize};

use super::round_to;
use crate::models::Snapshot;

// ---

/// Average temperature above which the window counts as thermally polluted.
const THERMAL_CRITICAL_C: f64 = 30.0;

/// Average temperature above which thermal stress is flagged.
const THERMAL_WARNING_C: f64 = 28.0;

/// Index distance used for the recent temperature change.
const TEMP_LOOKBACK: usize = 5;

/// Absolute temperature change that counts as a rapid fluctuation.
const TEMP_FLUCTUATION_C: f64 = 3.0;

const PH_SAFE: (f64, f64) = (6.5, 8.5);
const TDS_SAFE_BELOW: f64 = 300.0;
const TDS_CAUTION_MAX: f64 = 500.0;

const INSUFFICIENT_DATA: &str = "Insufficient data for analysis";

/// Direction the window's water quality is heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

impl Trend {
    fn from_vitality(avg_vitality: f64) -> Self {
        // ---
        if avg_vitality > 70.0 {
            Trend::Improving
        } else if avg_vitality > 50.0 {
            Trend::Stable
        } else {
            Trend::Declining
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    ThermalPollution,
    ThermalWarning,
    TemperatureFluctuation,
    TdsCaution,
    TdsContamination,
    PhAcidic,
    PhAlkaline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    // ---
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: Severity,
    pub message: String,
    pub recommendation: String,
}

/// Thermal band of the window average; shares its limits with the thermal alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThermalStatus {
    Normal,
    Warning,
    Critical,
}

impl ThermalStatus {
    fn from_average(avg_temp: f64) -> Self {
        // ---
        if avg_temp > THERMAL_CRITICAL_C {
            ThermalStatus::Critical
        } else if avg_temp > THERMAL_WARNING_C {
            ThermalStatus::Warning
        } else {
            ThermalStatus::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Averages {
    // ---
    #[serde(rename = "pH")]
    pub ph: f64,
    pub tds: f64,
    pub temperature: f64,
    pub vitality_index: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuitabilitySummary {
    pub tds: String,
    pub ph: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThermalAnalysis {
    // ---
    pub avg_temperature: f64,
    pub recent_change: f64,
    pub status: ThermalStatus,
}

/// Derived analytics for a window of snapshots.
///
/// An empty window yields the degenerate report, which carries no
/// `averages`, `suitability` or `thermalAnalysis`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    // ---
    pub trend: Trend,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub averages: Option<Averages>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suitability: Option<SuitabilitySummary>,

    pub insights: Vec<String>,
    pub predictions: Vec<String>,

    #[serde(default)]
    pub alerts: Vec<Alert>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thermal_analysis: Option<ThermalAnalysis>,
}

impl AnalyticsReport {
    fn insufficient_data() -> Self {
        // ---
        AnalyticsReport {
            trend: Trend::Stable,
            averages: None,
            suitability: None,
            insights: vec![INSUFFICIENT_DATA.to_string()],
            predictions: Vec::new(),
            alerts: Vec::new(),
            thermal_analysis: None,
        }
    }
}

// ---

/// Unrounded window means plus the index-based temperature change.
#[derive(Debug, Clone, Copy)]
struct WindowStats {
    avg_ph: f64,
    avg_tds: f64,
    avg_temp: f64,
    avg_vitality: f64,
    temp_change: f64,
}

impl WindowStats {
    fn from_snapshots(snapshots: &[Snapshot]) -> Option<Self> {
        // ---
        let latest = snapshots.last()?;
        let n = snapshots.len() as f64;
        let mean = |field: fn(&Snapshot) -> f64| snapshots.iter().map(field).sum::<f64>() / n;

        let temp_change = if snapshots.len() > TEMP_LOOKBACK {
            latest.temperature - snapshots[snapshots.len() - TEMP_LOOKBACK].temperature
        } else {
            0.0
        };

        Some(WindowStats {
            avg_ph: mean(|s| s.ph),
            avg_tds: mean(|s| s.tds),
            avg_temp: mean(|s| s.temperature),
            avg_vitality: mean(|s| s.vitality_index),
            temp_change,
        })
    }

    fn ph_in_range(&self) -> bool {
        self.avg_ph >= PH_SAFE.0 && self.avg_ph <= PH_SAFE.1
    }
}

struct InsightRule {
    applies: fn(&WindowStats) -> bool,
    text: &'static str,
}

/// The first three entries are mutually exclusive quality bands.
const INSIGHT_RULES: &[InsightRule] = &[
    InsightRule {
        applies: |w| w.avg_vitality > 80.0,
        text: "Water quality is excellent in the last 7 days.",
    },
    InsightRule {
        applies: |w| w.avg_vitality > 60.0 && w.avg_vitality <= 80.0,
        text: "Water quality is good but can be improved.",
    },
    InsightRule {
        applies: |w| w.avg_vitality <= 60.0,
        text: "Water quality needs immediate attention.",
    },
    InsightRule {
        applies: |w| w.avg_tds < TDS_SAFE_BELOW,
        text: "✅ TDS levels are safe (<300 ppm).",
    },
    InsightRule {
        applies: |w| w.ph_in_range(),
        text: "✅ pH levels are within normal range (6.5-8.5).",
    },
];

struct AlertRule {
    kind: AlertKind,
    severity: Severity,
    applies: fn(&WindowStats) -> bool,
    message: fn(&WindowStats) -> String,
    recommendation: &'static str,
}

const ALERT_RULES: &[AlertRule] = &[
    AlertRule {
        kind: AlertKind::ThermalPollution,
        severity: Severity::High,
        applies: |w| w.avg_temp > THERMAL_CRITICAL_C,
        message: |_| "Thermal pollution detected! Average temperature exceeds 30°C.".to_string(),
        recommendation: "Check for industrial discharge or shallow water depth.",
    },
    AlertRule {
        kind: AlertKind::ThermalWarning,
        severity: Severity::Medium,
        applies: |w| w.avg_temp > THERMAL_WARNING_C && w.avg_temp <= THERMAL_CRITICAL_C,
        message: |_| "Temperature slightly elevated. Monitor for thermal stress.".to_string(),
        recommendation: "Investigate heat sources near water body.",
    },
    AlertRule {
        kind: AlertKind::TemperatureFluctuation,
        severity: Severity::Medium,
        applies: |w| w.temp_change.abs() > TEMP_FLUCTUATION_C,
        message: |w| {
            format!(
                "Rapid temperature change detected ({:.1}°C).",
                round_to(w.temp_change, 1)
            )
        },
        recommendation: "Monitor for sudden environmental changes.",
    },
    AlertRule {
        kind: AlertKind::TdsCaution,
        severity: Severity::Medium,
        applies: |w| w.avg_tds >= TDS_SAFE_BELOW && w.avg_tds <= TDS_CAUTION_MAX,
        message: |_| "TDS in caution range (300-500 ppm).".to_string(),
        recommendation: "Regular monitoring required. May need filtration for drinking.",
    },
    AlertRule {
        kind: AlertKind::TdsContamination,
        severity: Severity::High,
        applies: |w| w.avg_tds > TDS_CAUTION_MAX,
        message: |_| "TDS exceeds safe limits (>500 ppm). Water contaminated.".to_string(),
        recommendation: "Immediate action required. Do not use for drinking without treatment.",
    },
    AlertRule {
        kind: AlertKind::PhAcidic,
        severity: Severity::High,
        applies: |w| w.avg_ph < PH_SAFE.0,
        message: |w| format!("pH is too acidic ({:.2}). Below safe range.", round_to(w.avg_ph, 2)),
        recommendation: "Check for acid rain, industrial discharge, or organic decay.",
    },
    AlertRule {
        kind: AlertKind::PhAlkaline,
        severity: Severity::High,
        applies: |w| w.avg_ph > PH_SAFE.1,
        message: |w| format!("pH is too alkaline ({:.2}). Above safe range.", round_to(w.avg_ph, 2)),
        recommendation: "Check for mineral deposits, algal blooms, or chemical contamination.",
    },
];

struct PredictionRule {
    applies: fn(&WindowStats) -> bool,
    text: &'static str,
}

/// Rules three and six overlap above 600 ppm with alkaline water; both fire.
const PREDICTION_RULES: &[PredictionRule] = &[
    PredictionRule {
        applies: |w| w.avg_temp > THERMAL_CRITICAL_C,
        text: "Possible thermal pollution from industrial discharge or climate warming.",
    },
    PredictionRule {
        applies: |w| w.avg_ph < PH_SAFE.0,
        text: "Acidic pH may indicate organic pollution or industrial chemical discharge.",
    },
    PredictionRule {
        applies: |w| w.avg_ph > PH_SAFE.1,
        text: "Alkaline pH may indicate mineral deposits or algal activity.",
    },
    PredictionRule {
        applies: |w| w.avg_tds > 500.0 && w.avg_ph > 7.5,
        text: "🔬 Likely saline intrusion or mineral contamination (high TDS + alkaline pH).",
    },
    PredictionRule {
        applies: |w| w.avg_tds > 400.0 && w.avg_ph < 6.5,
        text: "🏭 Possible industrial chemical pollution (high TDS + acidic pH).",
    },
    PredictionRule {
        applies: |w| w.avg_ph < 6.5 && w.avg_temp > 25.0,
        text: "🌿 Probable organic pollution or decomposition (acidic pH + warm water).",
    },
    PredictionRule {
        applies: |w| w.avg_tds > 600.0,
        text: "🌊 Strong indication of saline intrusion (very high TDS).",
    },
];

fn tds_suitability(avg_tds: f64) -> &'static str {
    // ---
    if avg_tds < TDS_SAFE_BELOW {
        "Safe for drinking and irrigation"
    } else if avg_tds <= TDS_CAUTION_MAX {
        "Caution - Acceptable but monitor closely"
    } else {
        "Contaminated - Not suitable for drinking"
    }
}

fn ph_suitability(stats: &WindowStats) -> &'static str {
    // ---
    if stats.ph_in_range() {
        "Normal - Safe for most uses"
    } else if stats.avg_ph < PH_SAFE.0 {
        "Acidic - Alert"
    } else {
        "Alkaline - Alert"
    }
}

/// Analyze a time-ordered window of snapshots (oldest first).
///
/// The window length is the caller's choice; this function only looks at
/// what it is given. An empty window produces a report with a `stable` trend
/// and an "insufficient data" insight.
pub fn analyze_trend(snapshots: &[Snapshot]) -> AnalyticsReport {
    // ---
    let Some(stats) = WindowStats::from_snapshots(snapshots) else {
        return AnalyticsReport::insufficient_data();
    };

    let insights = INSIGHT_RULES
        .iter()
        .filter(|rule| (rule.applies)(&stats))
        .map(|rule| rule.text.to_string())
        .collect();

    let alerts = ALERT_RULES
        .iter()
        .filter(|rule| (rule.applies)(&stats))
        .map(|rule| Alert {
            kind: rule.kind,
            severity: rule.severity,
            message: (rule.message)(&stats),
            recommendation: rule.recommendation.to_string(),
        })
        .collect();

    let predictions = PREDICTION_RULES
        .iter()
        .filter(|rule| (rule.applies)(&stats))
        .map(|rule| rule.text.to_string())
        .collect();

    AnalyticsReport {
        trend: Trend::from_vitality(stats.avg_vitality),
        averages: Some(Averages {
            ph: round_to(stats.avg_ph, 2),
            tds: round_to(stats.avg_tds, 0),
            temperature: round_to(stats.avg_temp, 1),
            vitality_index: round_to(stats.avg_vitality, 1),
        }),
        suitability: Some(SuitabilitySummary {
            tds: tds_suitability(stats.avg_tds).to_string(),
            ph: ph_suitability(&stats).to_string(),
        }),
        insights,
        predictions,
        alerts,
        thermal_analysis: Some(ThermalAnalysis {
            avg_temperature: round_to(stats.avg_temp, 1),
            recent_change: round_to(stats.temp_change, 1),
            status: ThermalStatus::from_average(stats.avg_temp),
        }),
    }
}
