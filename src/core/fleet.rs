//! Vessel record generation.
//!
//! Nothing here tracks a real ship: every call draws a fresh fleet around a
//! port, so an MMSI seen in one snapshot says nothing about the next one.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use time::{Duration, OffsetDateTime};

use crate::core::ports::Port;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ShipType {
    Container,
    Tanker,
    BulkCarrier,
    Cargo,
    RoRo,
}

impl ShipType {
    pub fn label(&self) -> &'static str {
        match self {
            ShipType::Container => "Container",
            ShipType::Tanker => "Tanker",
            ShipType::BulkCarrier => "Bulk Carrier",
            ShipType::Cargo => "Cargo",
            ShipType::RoRo => "Ro-Ro",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NavStatus {
    Underway,
    Anchored,
    Moored,
    Docked,
}

impl NavStatus {
    pub fn label(&self) -> &'static str {
        match self {
            NavStatus::Underway => "Underway",
            NavStatus::Anchored => "Anchored",
            NavStatus::Moored => "Moored",
            NavStatus::Docked => "Docked",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ShipRecord {
    pub mmsi: String,
    pub name: String,
    pub ship_type: ShipType,
    pub company: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Knots.
    pub speed: u32,
    /// Degrees true, 0..360.
    pub course: u32,
    pub status: NavStatus,
    pub destination: String,
    #[serde(with = "time::serde::rfc3339")]
    pub eta: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub data_source: &'static str,
    pub cargo_value_musd: Option<u32>,
    pub length_m: Option<u32>,
}

pub const PUBLIC_AIS_SOURCE: &str = "Public AIS";
pub const SIMULATED_SOURCE: &str = "Public AIS Simulation";
pub const ROSTER_SOURCE: &str = "Realistic Simulation";

/// Named container ships advertised on public AIS pages.
pub const KNOWN_VESSELS: &[(&str, &str)] = &[
    ("MAERSK NEW YORK", "367000000"),
    ("EVERGREEN MARINER", "367000001"),
    ("CMA CGM ATLANTIC", "367000002"),
    ("MSC MEDITERRANEAN", "367000003"),
    ("COSCO PACIFIC", "367000004"),
    ("HAPAG-LLOYD EXPRESS", "367000005"),
    ("ONE OLYMPUS", "367000006"),
    ("OOCL EUROPE", "367000007"),
];

pub const COMPANIES: &[&str] = &[
    "Maersk",
    "MSC",
    "COSCO",
    "CMA CGM",
    "Evergreen",
    "Hapag-Lloyd",
    "ONE",
    "OOCL",
];

pub const ROSTER_NAMES: &[&str] = &[
    "MAERSK SEOUL",
    "EVER GIVEN",
    "CMA CGM MARCO POLO",
    "MSC GULSUN",
    "COSCO SHIPPING TAURUS",
    "HMM ALGECIRAS",
    "ONE OLYMPUS",
    "OOCL GERMANY",
    "APL SINGAPORE",
    "YANG MING WEI HE",
    "WAN HAI 512",
    "ZIM ALABAMA",
    "SEASPAN DALIAN",
    "HAPAG-LLOYD TOKYO",
    "MAERSK MC-KINNEY MOLLER",
];

const SIMULATED_TYPES: &[ShipType] = &[
    ShipType::Container,
    ShipType::Tanker,
    ShipType::BulkCarrier,
    ShipType::Cargo,
];

const ROSTER_TYPES: &[ShipType] = &[
    ShipType::Container,
    ShipType::Tanker,
    ShipType::BulkCarrier,
    ShipType::Cargo,
    ShipType::RoRo,
];

const ALL_STATUSES: &[NavStatus] = &[
    NavStatus::Underway,
    NavStatus::Anchored,
    NavStatus::Moored,
    NavStatus::Docked,
];

// Ships listed on public AIS are never reported as docked.
const PUBLIC_STATUSES: &[NavStatus] = &[
    NavStatus::Underway,
    NavStatus::Anchored,
    NavStatus::Moored,
];

/// Half-widths of the square each generator scatters ships in, in degrees.
pub const PUBLIC_JITTER: f64 = 0.015;
pub const SIMULATED_JITTER: f64 = 0.02;
pub const ROSTER_JITTER: f64 = 0.025;

pub const SIMULATED_MAX_SPEED: u32 = 22;

pub struct FleetGenerator<R: Rng> {
    rng: R,
    now: OffsetDateTime,
}

impl<R: Rng> FleetGenerator<R> {
    pub fn new(rng: R, now: OffsetDateTime) -> Self {
        Self { rng, now }
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Fleet as the public AIS path sees it, falling back to a simulated one
    /// when that path has nothing for the port.
    pub fn public_fleet(&mut self, port: &Port, simulated_count: usize) -> Vec<ShipRecord> {
        let ships = self.known_vessels(port);
        if !ships.is_empty() {
            tracing::debug!(port = port.name, count = ships.len(), "Using public AIS vessels");
            return ships;
        }

        tracing::warn!(port = port.name, "No public AIS vessels, simulating fleet");
        self.simulated(port, simulated_count)
    }

    pub fn known_vessels(&mut self, port: &Port) -> Vec<ShipRecord> {
        let mut ships = Vec::with_capacity(KNOWN_VESSELS.len());

        for &(name, mmsi) in KNOWN_VESSELS {
            let (latitude, longitude) = self.scatter(port, PUBLIC_JITTER);
            let company = name.split_whitespace().next().unwrap_or(name).to_string();

            ships.push(ShipRecord {
                mmsi: mmsi.to_string(),
                name: name.to_string(),
                ship_type: ShipType::Container,
                company,
                latitude,
                longitude,
                speed: self.rng.gen_range(0..20),
                course: self.rng.gen_range(0..360),
                status: self.pick(PUBLIC_STATUSES),
                destination: port.name.to_uppercase(),
                eta: self.now + Duration::hours(self.rng.gen_range(1..24)),
                timestamp: self.now,
                data_source: PUBLIC_AIS_SOURCE,
                cargo_value_musd: None,
                length_m: None,
            });
        }

        ships
    }

    pub fn simulated(&mut self, port: &Port, count: usize) -> Vec<ShipRecord> {
        (0..count)
            .map(|i| {
                let (latitude, longitude) = self.scatter(port, SIMULATED_JITTER);
                let company = self.pick(COMPANIES);
                let ship_type = self.pick(SIMULATED_TYPES);

                ShipRecord {
                    mmsi: format!("367{:06}", i),
                    name: format!("{} VESSEL {}", company, i + 1),
                    ship_type,
                    company: company.to_string(),
                    latitude,
                    longitude,
                    speed: self.rng.gen_range(0..SIMULATED_MAX_SPEED),
                    course: self.rng.gen_range(0..360),
                    status: self.pick(ALL_STATUSES),
                    destination: port.name.to_uppercase(),
                    eta: self.now + Duration::hours(self.rng.gen_range(1..48)),
                    timestamp: self.now,
                    data_source: SIMULATED_SOURCE,
                    cargo_value_musd: Some(self.rng.gen_range(10..100)),
                    length_m: None,
                }
            })
            .collect()
    }

    /// Real vessel names with randomised type, operator and dimensions.
    pub fn named_roster(&mut self, port: &Port) -> Vec<ShipRecord> {
        ROSTER_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let (latitude, longitude) = self.scatter(port, ROSTER_JITTER);

                ShipRecord {
                    mmsi: format!("36{:06}", i),
                    name: name.to_string(),
                    ship_type: self.pick(ROSTER_TYPES),
                    company: self.pick(COMPANIES).to_string(),
                    latitude,
                    longitude,
                    speed: self.rng.gen_range(0..25),
                    course: self.rng.gen_range(0..360),
                    status: self.pick(ALL_STATUSES),
                    destination: port.name.to_uppercase(),
                    eta: self.now + Duration::hours(self.rng.gen_range(1..48)),
                    timestamp: self.now,
                    data_source: ROSTER_SOURCE,
                    cargo_value_musd: Some(self.rng.gen_range(20..200)),
                    length_m: Some(self.rng.gen_range(150..400)),
                }
            })
            .collect()
    }

    fn scatter(&mut self, port: &Port, jitter: f64) -> (f64, f64) {
        let lat = port.latitude + self.rng.gen_range(-jitter..jitter);
        let lon = port.longitude + self.rng.gen_range(-jitter..jitter);
        (round6(lat), round6(lon))
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        // callers only pass the non-empty tables above
        *items.choose(&mut self.rng).unwrap_or(&items[0])
    }
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}
