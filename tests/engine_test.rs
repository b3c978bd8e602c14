//! Behavioural checks of the derivation engine through the public API.

use chrono::{DateTime, Duration, TimeZone, Utc};

use biolink_water::engine::{
    analyze_purpose, classify, vitality_index, AlertKind, Severity, ThermalStatus, Trend,
    VerdictStatus,
};
use biolink_water::{analyze_trend, derive_snapshot, Purpose, RawReading, Reading, SafetyStatus};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 20, 6, 0, 0).unwrap()
}

fn raw(ph: f64, tds: f64, temperature: f64) -> RawReading {
    RawReading {
        ph: Some(ph),
        tds: Some(tds),
        temperature: Some(temperature),
    }
}

#[test]
fn vitality_bounds() {
    // ---
    assert_eq!(vitality_index(7.0, 0.0), 100.0);

    for ph_step in -20..=160 {
        for tds_step in -5..=30 {
            let score = vitality_index(ph_step as f64 * 0.1, tds_step as f64 * 50.0);
            assert!((0.0..=100.0).contains(&score), "score {score} out of range");
        }
    }
}

#[test]
fn safety_boundaries() {
    // ---
    assert_eq!(classify(6.8, 349.9), SafetyStatus::Safe);
    assert_eq!(classify(6.8, 350.0), SafetyStatus::Moderate);
    assert_eq!(classify(6.5, 499.0), SafetyStatus::Moderate);
    assert_eq!(classify(6.4, 0.0), SafetyStatus::Unsafe);
    assert_eq!(classify(6.4, 10_000.0), SafetyStatus::Unsafe);
}

#[test]
fn drinking_reference_reading() {
    // ---
    let reading = Reading {
        ph: 7.0,
        tds: 400.0,
        temperature: 10.0,
    };
    let verdict = analyze_purpose(&reading, Purpose::Drinking);

    assert_eq!(verdict.status, VerdictStatus::Safe);
    assert_eq!(verdict.suitability, "Suitable for drinking");
    assert!(verdict.recommendations.is_empty());
}

#[test]
fn industrial_escalates_to_unsafe() {
    // ---
    let reading = Reading {
        ph: 5.0,
        tds: 6000.0,
        temperature: 20.0,
    };
    let verdict = analyze_purpose(&reading, Purpose::Industrial);

    assert_eq!(verdict.status, VerdictStatus::Unsafe);
    assert!(verdict
        .recommendations
        .iter()
        .any(|r| r.contains("corrode equipment")));
    assert!(verdict
        .recommendations
        .iter()
        .any(|r| r == "TDS too high for most industrial applications."));
}

#[test]
fn snapshot_pipeline_end_to_end() {
    // ---
    let snapshot = derive_snapshot(&raw(8.8, 1100.0, 31.5), "river", start());

    assert_eq!(snapshot.vitality_index, 0.0);
    assert_eq!(snapshot.status, SafetyStatus::Unsafe);

    let verdict = snapshot.purpose_analysis.as_ref().unwrap();
    assert_eq!(verdict.purpose, Purpose::River);
    assert_eq!(verdict.status, VerdictStatus::Unsafe);
    assert_eq!(verdict.recommendations.len(), 4);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["purposeAnalysis"]["status"], "unsafe");
    assert_eq!(json["status"], "unsafe");
}

#[test]
fn empty_trend_window() {
    // ---
    let report = analyze_trend(&[]);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["trend"], "stable");
    assert_eq!(
        json["insights"],
        serde_json::json!(["Insufficient data for analysis"])
    );
    assert_eq!(json["predictions"], serde_json::json!([]));
}

#[test]
fn hot_week_is_critical() {
    // ---
    let window: Vec<_> = (0..7)
        .map(|day| derive_snapshot(&raw(7.1, 120.0, 32.0), "river", start() + Duration::days(day)))
        .collect();

    let report = analyze_trend(&window);

    assert!(report
        .alerts
        .iter()
        .any(|a| a.kind == AlertKind::ThermalPollution && a.severity == Severity::High));
    assert_eq!(
        report.thermal_analysis.unwrap().status,
        ThermalStatus::Critical
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["alerts"][0]["type"], "thermal_pollution");
    assert_eq!(json["thermalAnalysis"]["status"], "Critical");
}

#[test]
fn saline_rules_both_fire() {
    // ---
    let window: Vec<_> = (0..5)
        .map(|hour| derive_snapshot(&raw(8.0, 650.0, 18.0), "general", start() + Duration::hours(hour)))
        .collect();

    let report = analyze_trend(&window);

    assert_eq!(report.trend, Trend::Declining);
    assert!(report.predictions.iter().any(|p| p.contains("mineral contamination")));
    assert!(report
        .predictions
        .iter()
        .any(|p| p.contains("Strong indication of saline intrusion")));
}

#[test]
fn derivations_are_idempotent() {
    // ---
    let input = raw(6.3, 720.0, 29.0);
    for tag in ["drinking", "agricultural", "river", "industrial", "general"] {
        assert_eq!(
            derive_snapshot(&input, tag, start()),
            derive_snapshot(&input, tag, start())
        );
    }

    let window: Vec<_> = (0..8)
        .map(|i| derive_snapshot(&raw(6.3 + i as f64 * 0.2, 720.0, 29.0), "river", start()))
        .collect();
    assert_eq!(analyze_trend(&window), analyze_trend(&window));
}
