use serde::Serialize;
use time::{OffsetDateTime, UtcOffset};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrafficTier {
    Low,
    Medium,
    High,
    VeryHigh,
}

/// A port of call. Entries live in [`PORTS`] and are never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Port {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub country: &'static str,
    pub region: &'static str,
    pub traffic: TrafficTier,
    /// Standard-time offset from UTC in whole hours. Daylight saving is not
    /// modelled.
    pub utc_offset_hours: i8,
}

impl Port {
    /// Wall-clock hour at the port for the instant `now`.
    pub fn local_hour(&self, now: OffsetDateTime) -> u8 {
        let utc_hour = now.to_offset(UtcOffset::UTC).hour() as i16;
        (utc_hour + self.utc_offset_hours as i16).rem_euclid(24) as u8
    }
}

const fn port(
    name: &'static str,
    latitude: f64,
    longitude: f64,
    country: &'static str,
    region: &'static str,
    traffic: TrafficTier,
    utc_offset_hours: i8,
) -> Port {
    Port {
        name,
        latitude,
        longitude,
        country,
        region,
        traffic,
        utc_offset_hours,
    }
}

#[rustfmt::skip]
pub const PORTS: &[Port] = &[
    port("New York/New Jersey", 40.68, -74.02, "USA", "North America", TrafficTier::High, -5),
    port("Los Angeles", 33.74, -118.27, "USA", "North America", TrafficTier::VeryHigh, -8),
    port("Houston", 29.73, -95.27, "USA", "North America", TrafficTier::High, -6),
    port("Savannah", 32.08, -81.09, "USA", "North America", TrafficTier::Medium, -5),
    port("Shanghai", 31.23, 121.49, "China", "Asia", TrafficTier::VeryHigh, 8),
    port("Singapore", 1.26, 103.84, "Singapore", "Asia", TrafficTier::VeryHigh, 8),
    port("Busan", 35.10, 129.04, "South Korea", "Asia", TrafficTier::High, 9),
    port("Rotterdam", 51.95, 4.14, "Netherlands", "Europe", TrafficTier::VeryHigh, 1),
    port("Hamburg", 53.54, 9.97, "Germany", "Europe", TrafficTier::High, 1),
    port("Antwerp", 51.26, 4.40, "Belgium", "Europe", TrafficTier::High, 1),
    port("Jebel Ali", 25.01, 55.06, "UAE", "Middle East", TrafficTier::High, 4),
    port("Santos", -23.96, -46.30, "Brazil", "South America", TrafficTier::Medium, -3),
];

pub fn all_ports() -> &'static [Port] {
    PORTS
}

/// The harbour every script in the original dashboard was pinned to.
pub fn default_port() -> &'static Port {
    &PORTS[0]
}

/// Case-insensitive lookup by port name.
pub fn find_port(name: &str) -> Option<&'static Port> {
    let name = name.trim();
    PORTS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
