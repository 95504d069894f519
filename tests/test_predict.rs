//! Integration tests for the prediction formulas and port insights.

mod common;

use skywatch::core::insights::{self, ActivityLevel};
use skywatch::core::predict::{
    self, AnomalyKind, CongestionTrend, MAX_ETA_CONFIDENCE, eta_confidence,
};

use common::*;

#[test]
fn test_eta_hours_and_confidence_ranges() {
    let mut rng = seeded_rng(42);

    for speed in 0..30 {
        let ship = make_ship("367000001", speed, NavStatus::Underway);
        let eta = predict::predict_eta(&mut rng, &ship, NOW);

        let factor = (speed as f64 / 20.0).max(0.5);
        assert!(eta.hours >= 2.0 * factor * 0.8, "speed {} hours {}", speed, eta.hours);
        assert!(eta.hours <= 48.0 * factor * 1.2, "speed {} hours {}", speed, eta.hours);
        assert!(eta.confidence <= MAX_ETA_CONFIDENCE);
        assert!(eta.arrival > NOW);
        assert_eq!(eta.mmsi, "367000001");
    }
}

#[test]
fn test_eta_confidence_caps_at_95() {
    assert_eq!(eta_confidence(0), 80.0);
    assert_eq!(eta_confidence(10), 85.0);
    assert_eq!(eta_confidence(30), 95.0);
    assert_eq!(eta_confidence(40), 95.0);
}

#[test]
fn test_congestion_level_in_unit_interval() {
    let mut rng = seeded_rng(9);

    for round in 0..50 {
        for hour in 0..24u8 {
            let forecast = predict::predict_congestion(&mut rng, hour);
            assert!(
                (0.0..=1.0).contains(&forecast.level),
                "round {} hour {} level {}",
                round,
                hour,
                forecast.level
            );
            let expected = if forecast.level > 0.6 {
                CongestionTrend::Rising
            } else {
                CongestionTrend::Stable
            };
            assert_eq!(forecast.trend, expected);
        }
    }
}

#[test]
fn test_congestion_follows_daily_cycle_bounds() {
    let mut rng = seeded_rng(1);
    // sin peaks at hour 6 and bottoms out at hour 18
    for _ in 0..100 {
        let peak = predict::predict_congestion(&mut rng, 6);
        assert!(peak.level >= 0.3 * 1.2 - 1e-9);
        let trough = predict::predict_congestion(&mut rng, 18);
        assert!(trough.level <= 0.9 * 0.4 + 1e-9);
        assert_eq!(trough.trend, CongestionTrend::Stable);
    }
}

#[test]
fn test_anomaly_detector_flags_every_fast_ship() {
    let ships = vec![
        make_ship("A", 26, NavStatus::Underway),
        make_ship("B", 30, NavStatus::Moored),
        make_ship("C", 25, NavStatus::Underway),
        make_ship("D", 12, NavStatus::Anchored),
    ];

    let anomalies = predict::detect_anomalies(&ships);

    let flagged: Vec<&str> = anomalies.iter().map(|a| a.mmsi.as_str()).collect();
    assert_eq!(flagged, vec!["A", "B"]);
    assert!(anomalies.iter().all(|a| a.kind == AnomalyKind::HighSpeed));
}

#[test]
fn test_anomaly_detector_flags_drifting_underway_ships() {
    let ships = vec![
        make_ship("A", 0, NavStatus::Underway),
        make_ship("B", 1, NavStatus::Underway),
        make_ship("C", 2, NavStatus::Underway),
        make_ship("D", 0, NavStatus::Anchored),
        make_ship("E", 1, NavStatus::Docked),
    ];

    let anomalies = predict::detect_anomalies(&ships);

    assert_eq!(anomalies.len(), 2);
    assert_eq!(anomalies[0].mmsi, "A");
    assert_eq!(anomalies[1].mmsi, "B");
    assert_eq!(anomalies[0].kind, AnomalyKind::Drifting);
    assert_eq!(anomalies[0].kind.label(), "DRIFTING");
}

#[test]
fn test_insights_thresholds_and_values() {
    let small = insights::analyze(["Container", "Tanker"]);
    assert_eq!(small.total_ships, 2);
    assert_eq!(small.port_congestion, ActivityLevel::Low);
    assert_eq!(small.trade_volume, ActivityLevel::Medium);
    assert_eq!(small.estimated_value_usd, 130_000_000);

    let medium = insights::analyze(["Container", "Container", "Tanker", "Cargo", "Cargo"]);
    assert_eq!(medium.port_congestion, ActivityLevel::Medium);
    assert_eq!(medium.trade_volume, ActivityLevel::Medium);
    assert_eq!(medium.ship_types.get("Container"), Some(&2));
    assert_eq!(medium.estimated_value_usd, 240_000_000);

    let busy = insights::analyze(std::iter::repeat_n("Ro-Ro", 9));
    assert_eq!(busy.port_congestion, ActivityLevel::High);
    assert_eq!(busy.trade_volume, ActivityLevel::High);
    assert_eq!(busy.estimated_value_usd, 9 * 25_000_000);
}

#[test]
fn test_insights_empty() {
    let report = insights::analyze(std::iter::empty());
    assert_eq!(report.total_ships, 0);
    assert_eq!(report.estimated_value_usd, 0);
    assert_eq!(report.port_congestion, ActivityLevel::Low);
}
