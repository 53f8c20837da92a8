//! Risk Scenario Tests
//!
//! End-to-end checks of feature building and prediction through the public
//! API: the shipped forest over the sample history, hand-built artifacts,
//! and the degenerate single-class models.

use chrono::{DateTime, Duration, TimeZone, Utc};
use smart_maintenance::config::MaintenanceConfig;
use smart_maintenance::dashboard::risk_readout;
use smart_maintenance::data::Dataset;
use smart_maintenance::risk::{
    build_features, ClassLayout, Classifier, DecisionTree, ModelArtifact, RiskError,
    RiskPredictor, MODEL_FORMAT_VERSION,
};
use smart_maintenance::types::{MaintenanceEvent, RiskThresholds, RiskTier, FEATURE_NAMES};
use std::path::PathBuf;

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn sample() -> (Dataset, RiskPredictor) {
    let dataset = Dataset::load(
        data_path("kpis_summary.csv"),
        data_path("maintenance_events.csv"),
    )
    .expect("sample data should load");
    let predictor = RiskPredictor::load(data_path("rf_model_maintenance.json"), RiskThresholds::default())
        .expect("sample model should load");
    (dataset, predictor)
}

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap() + Duration::days(n)
}

fn event(machine: &str, n: i64, downtime: f64, cost: f64, scrap: f64) -> MaintenanceEvent {
    MaintenanceEvent {
        machine: machine.to_string(),
        failure_date: day(n),
        downtime_h: downtime,
        cost_eur: cost,
        scrap_units: scrap,
    }
}

/// Single-leaf forest with the given leaf counts.
fn constant_forest(classes: Vec<i64>, counts: Vec<f64>) -> ModelArtifact {
    ModelArtifact {
        version: MODEL_FORMAT_VERSION,
        classes,
        feature_names: FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect(),
        model: Classifier::RandomForest {
            trees: vec![DecisionTree {
                children_left: vec![-1],
                children_right: vec![-1],
                feature: vec![-2],
                threshold: vec![-2.0],
                value: vec![counts],
            }],
        },
    }
}

#[test]
fn test_sample_history_readouts() {
    let (dataset, predictor) = sample();
    let defaults = MaintenanceConfig::default();
    let window = defaults.risk.window_days;
    let horizon = defaults.risk.horizon_days;

    // Two earlier failures inside the window, the newest 1 day 18h before the latest
    let cnc = risk_readout(dataset.events(), "CNC-01", &predictor, window, horizon).unwrap();
    assert!((cnc.features.avg_downtime_7d - 3.25).abs() < 1e-9);
    assert!((cnc.features.avg_cost_7d - 420.0).abs() < 1e-9);
    assert!((cnc.features.avg_scrap_7d - 10.0).abs() < 1e-9);
    assert_eq!(cnc.features.days_since_last, 1);
    assert!((cnc.percent - 55.0).abs() < 1e-9);
    assert_eq!(cnc.tier, RiskTier::Medium);
    assert_eq!(cnc.color, "orange");

    // Nothing in the window: fallback features
    let laser = risk_readout(dataset.events(), "Laser-01", &predictor, window, horizon).unwrap();
    assert_eq!(laser.features.days_since_last, window);
    assert!(laser.features.avg_cost_7d.abs() < f64::EPSILON);
    assert!((laser.percent - 21.37).abs() < 1e-9);
    assert_eq!(laser.tier, RiskTier::Low);

    // A lone event produces the same fallback readout
    let weld = risk_readout(dataset.events(), "Weld-03", &predictor, window, horizon).unwrap();
    assert_eq!(weld.features, laser.features);
    assert!((weld.percent - laser.percent).abs() < f64::EPSILON);

    let err = risk_readout(dataset.events(), "Paint-04", &predictor, window, horizon).unwrap_err();
    assert_eq!(
        err,
        RiskError::InsufficientHistory {
            machine: "Paint-04".to_string()
        }
    );
}

#[test]
fn test_seventy_percent_is_high_risk() {
    let events = vec![
        event("M1", 0, 2.0, 100.0, 1.0),
        event("M1", 3, 4.0, 200.0, 2.0),
        event("M1", 10, 6.0, 300.0, 3.0),
    ];
    let features = build_features(&events, "M1", 7).unwrap();
    assert!((features.avg_downtime_7d - 4.0).abs() < 1e-12);
    assert!((features.avg_cost_7d - 200.0).abs() < 1e-12);
    assert!((features.avg_scrap_7d - 2.0).abs() < 1e-12);
    assert_eq!(features.days_since_last, 7);

    let predictor =
        RiskPredictor::new(constant_forest(vec![0, 1], vec![3.0, 7.0]), RiskThresholds::default()).unwrap();
    let prediction = predictor.predict(&features).unwrap();
    assert!((prediction.percent - 70.0).abs() < 1e-9);
    assert_eq!(prediction.tier, RiskTier::High);
    assert_eq!(prediction.tier.color(), "red");
}

#[test]
fn test_reversed_class_order_reads_failure_column() {
    let predictor =
        RiskPredictor::new(constant_forest(vec![1, 0], vec![1.0, 3.0]), RiskThresholds::default()).unwrap();
    assert_eq!(predictor.layout(), ClassLayout::TwoClass { failure_index: 0 });

    let features = build_features(&[event("M2", 0, 1.0, 50.0, 0.0)], "M2", 7).unwrap();
    let prediction = predictor.predict(&features).unwrap();
    assert!((prediction.percent - 25.0).abs() < 1e-9);
    assert_eq!(prediction.tier, RiskTier::Low);
}

#[test]
fn test_single_class_models_are_certain() {
    let features = build_features(&[event("M2", 0, 1.0, 50.0, 0.0)], "M2", 7).unwrap();

    let always_fails =
        RiskPredictor::new(constant_forest(vec![1], vec![5.0]), RiskThresholds::default()).unwrap();
    let p = always_fails.predict(&features).unwrap();
    assert!((p.percent - 100.0).abs() < f64::EPSILON);
    assert_eq!(p.tier, RiskTier::High);

    let never_fails =
        RiskPredictor::new(constant_forest(vec![0], vec![5.0]), RiskThresholds::default()).unwrap();
    let p = never_fails.predict(&features).unwrap();
    assert!(p.percent.abs() < f64::EPSILON);
    assert_eq!(p.tier, RiskTier::Low);
}

#[test]
fn test_custom_thresholds_shift_tiers() {
    let thresholds = RiskThresholds {
        medium_pct: 10.0,
        high_pct: 20.0,
    };
    let predictor = RiskPredictor::new(constant_forest(vec![0, 1], vec![17.0, 3.0]), thresholds).unwrap();
    let features = build_features(&[event("M3", 0, 1.0, 1.0, 1.0)], "M3", 7).unwrap();
    let prediction = predictor.predict(&features).unwrap();
    assert!((prediction.percent - 15.0).abs() < 1e-9);
    assert_eq!(prediction.tier, RiskTier::Medium);
}

#[test]
fn test_logistic_regression_artifact() {
    let artifact = ModelArtifact {
        version: MODEL_FORMAT_VERSION,
        classes: vec![0, 1],
        feature_names: FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect(),
        model: Classifier::LogisticRegression {
            coef: vec![0.0, 0.0, 0.0, 0.0],
            intercept: 0.0,
        },
    };
    let predictor = RiskPredictor::new(artifact, RiskThresholds::default()).unwrap();
    let features = build_features(&[event("M4", 0, 1.0, 1.0, 1.0)], "M4", 7).unwrap();
    let prediction = predictor.predict(&features).unwrap();
    assert!((prediction.percent - 50.0).abs() < 1e-9);
    assert_eq!(prediction.tier, RiskTier::Medium);
}
