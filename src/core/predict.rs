//! ETA, congestion and anomaly "predictions".
//!
//! These are closed-form draws over uniform noise, not models. The random
//! source is injected so callers (and tests) control it.

use std::f64::consts::PI;

use rand::Rng;
use serde::Serialize;
use time::{Duration, OffsetDateTime};

use crate::core::fleet::{NavStatus, ShipRecord};

pub const MAX_ETA_CONFIDENCE: f64 = 95.0;
pub const CONGESTION_RISING_THRESHOLD: f64 = 0.6;
pub const HIGH_SPEED_KNOTS: u32 = 25;
pub const DRIFT_SPEED_KNOTS: u32 = 2;

#[derive(Debug, Clone, Serialize)]
pub struct EtaPrediction {
    pub mmsi: String,
    pub hours: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub arrival: OffsetDateTime,
    /// Percent.
    pub confidence: f64,
}

pub fn predict_eta<R: Rng>(
    rng: &mut R,
    ship: &ShipRecord,
    now: OffsetDateTime,
) -> EtaPrediction {
    let speed = ship.speed as f64;
    let base = rng.gen_range(2.0..48.0);
    let noise = rng.gen_range(0.8..1.2);
    let hours = base * (speed / 20.0).max(0.5) * noise;

    EtaPrediction {
        mmsi: ship.mmsi.clone(),
        hours,
        arrival: now + Duration::seconds_f64(hours * 3600.0),
        confidence: eta_confidence(ship.speed),
    }
}

pub fn eta_confidence(speed: u32) -> f64 {
    (80.0 + speed as f64 * 0.5).min(MAX_ETA_CONFIDENCE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CongestionTrend {
    Rising,
    Stable,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CongestionForecast {
    /// 0.0 (empty) to 1.0 (saturated).
    pub level: f64,
    pub trend: CongestionTrend,
    /// Port wall-clock hour the cycle was evaluated at.
    pub local_hour: u8,
}

/// Daily cycle over the port's local `hour` (0..24) scaled by uniform noise.
pub fn predict_congestion<R: Rng>(rng: &mut R, hour: u8) -> CongestionForecast {
    let base = rng.gen_range(0.3..0.9);
    let cycle = 0.8 + 0.4 * (hour as f64 / 24.0 * 2.0 * PI).sin();
    let level = (base * cycle).clamp(0.0, 1.0);

    let trend = if level > CONGESTION_RISING_THRESHOLD {
        CongestionTrend::Rising
    } else {
        CongestionTrend::Stable
    };

    CongestionForecast {
        level,
        trend,
        local_hour: hour,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnomalyKind {
    HighSpeed,
    Drifting,
}

impl AnomalyKind {
    pub fn label(&self) -> &'static str {
        match self {
            AnomalyKind::HighSpeed => "HIGH_SPEED",
            AnomalyKind::Drifting => "DRIFTING",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Anomaly {
    pub mmsi: String,
    pub name: String,
    pub kind: AnomalyKind,
    pub speed: u32,
}

pub fn classify(ship: &ShipRecord) -> Option<AnomalyKind> {
    if ship.speed > HIGH_SPEED_KNOTS {
        Some(AnomalyKind::HighSpeed)
    } else if ship.status == NavStatus::Underway && ship.speed < DRIFT_SPEED_KNOTS {
        Some(AnomalyKind::Drifting)
    } else {
        None
    }
}

/// One entry per flagged ship, in input order.
pub fn detect_anomalies(ships: &[ShipRecord]) -> Vec<Anomaly> {
    ships
        .iter()
        .filter_map(|ship| {
            classify(ship).map(|kind| Anomaly {
                mmsi: ship.mmsi.clone(),
                name: ship.name.clone(),
                kind,
                speed: ship.speed,
            })
        })
        .collect()
}
