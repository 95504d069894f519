use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivityLevel {
    Low,
    Medium,
    High,
}

impl ActivityLevel {
    pub fn from_ship_count(total: usize) -> Self {
        if total > 8 {
            ActivityLevel::High
        } else if total > 4 {
            ActivityLevel::Medium
        } else {
            ActivityLevel::Low
        }
    }
}

/// Port activity report built from ship type labels.
#[derive(Debug, Clone, Serialize)]
pub struct PortInsights {
    pub total_ships: usize,
    pub ship_types: BTreeMap<String, usize>,
    pub port_congestion: ActivityLevel,
    pub trade_volume: ActivityLevel,
    pub estimated_value_usd: u64,
}

/// Flat per-hull cargo estimate, USD.
pub fn value_per_ship(label: &str) -> u64 {
    match label {
        "Container" => 50_000_000,
        "Tanker" => 80_000_000,
        "Cargo" => 30_000_000,
        _ => 25_000_000,
    }
}

/// Labels may come from fleet records (`ShipType::label`) or from image
/// detections, which carry no type and count at the default rate.
pub fn analyze<'a, I>(labels: I) -> PortInsights
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ship_types: BTreeMap<String, usize> = BTreeMap::new();
    let mut estimated_value_usd = 0u64;

    for label in labels {
        *ship_types.entry(label.to_string()).or_insert(0) += 1;
        estimated_value_usd += value_per_ship(label);
    }

    let total_ships = ship_types.values().sum();
    // trade volume bottoms out at Medium
    let trade_volume = match ActivityLevel::from_ship_count(total_ships) {
        ActivityLevel::High => ActivityLevel::High,
        _ => ActivityLevel::Medium,
    };

    PortInsights {
        total_ships,
        ship_types,
        port_congestion: ActivityLevel::from_ship_count(total_ships),
        trade_volume,
        estimated_value_usd,
    }
}
