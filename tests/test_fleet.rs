//! Integration tests for fleet generation.
//!
//! Tests cover:
//! - Public AIS roster contents and value ranges
//! - Simulated fleet templating and value ranges
//! - Named roster dimensions
//! - Port table lookups

mod common;

use skywatch::core::fleet::{
    KNOWN_VESSELS, PUBLIC_JITTER, ROSTER_JITTER, ROSTER_NAMES, SIMULATED_JITTER,
    SIMULATED_MAX_SPEED,
};

use common::*;

fn assert_near_port(ship: &ShipRecord, port: &Port, jitter: f64) {
    // positions are rounded to 6 decimals after jittering
    let tolerance = jitter + 1e-6;
    assert!(
        (ship.latitude - port.latitude).abs() <= tolerance,
        "{} latitude {} too far from {}",
        ship.mmsi,
        ship.latitude,
        port.latitude
    );
    assert!(
        (ship.longitude - port.longitude).abs() <= tolerance,
        "{} longitude {} too far from {}",
        ship.mmsi,
        ship.longitude,
        port.longitude
    );
}

#[test]
fn test_known_vessels_match_public_roster() {
    let port = ports::default_port();
    let mut fleet = FleetGenerator::new(seeded_rng(1), NOW);

    let ships = fleet.known_vessels(port);

    assert_eq!(ships.len(), KNOWN_VESSELS.len());
    for (ship, (name, mmsi)) in ships.iter().zip(KNOWN_VESSELS) {
        assert_eq!(ship.name, *name);
        assert_eq!(ship.mmsi, *mmsi);
        assert_eq!(ship.ship_type, ShipType::Container);
        assert!(name.starts_with(&ship.company));
        assert!(ship.speed < 20);
        assert!(ship.course < 360);
        assert_ne!(ship.status, NavStatus::Docked);
        assert!(ship.eta > NOW && ship.eta < NOW + time::Duration::hours(24));
        assert_near_port(ship, port, PUBLIC_JITTER);
    }
}

#[test]
fn test_simulated_fleet_ranges() {
    let port = ports::default_port();

    for seed in 0..20 {
        let mut fleet = FleetGenerator::new(seeded_rng(seed), NOW);
        let ships = fleet.simulated(port, 12);
        assert_eq!(ships.len(), 12);

        for (i, ship) in ships.iter().enumerate() {
            assert_eq!(ship.mmsi, format!("367{:06}", i));
            assert_eq!(ship.name, format!("{} VESSEL {}", ship.company, i + 1));
            assert!(ship.speed <= SIMULATED_MAX_SPEED);
            assert!(ship.course < 360);
            let cargo = ship.cargo_value_musd.expect("simulated ships carry cargo value");
            assert!((10..100).contains(&cargo));
            assert!(ship.eta > NOW && ship.eta < NOW + time::Duration::hours(48));
            assert_near_port(ship, port, SIMULATED_JITTER);
        }
    }
}

#[test]
fn test_simulated_mmsi_has_nine_digits() {
    let mut fleet = FleetGenerator::new(seeded_rng(7), NOW);
    let ships = fleet.simulated(ports::default_port(), 3);

    for ship in &ships {
        assert_eq!(ship.mmsi.len(), 9);
        assert!(ship.mmsi.chars().all(|c| c.is_ascii_digit()));
    }
}

#[test]
fn test_public_fleet_uses_known_vessels() {
    let mut fleet = FleetGenerator::new(seeded_rng(3), NOW);
    let ships = fleet.public_fleet(ports::default_port(), 12);
    assert_eq!(ships.len(), KNOWN_VESSELS.len());
    assert!(ships.iter().all(|s| s.data_source == "Public AIS"));
}

#[test]
fn test_named_roster_dimensions() {
    let port = ports::find_port("Rotterdam").expect("Rotterdam is in the port table");
    let mut fleet = FleetGenerator::new(seeded_rng(11), NOW);

    let ships = fleet.named_roster(port);

    assert_eq!(ships.len(), ROSTER_NAMES.len());
    for ship in &ships {
        assert!(ship.speed < 25);
        let length = ship.length_m.expect("roster ships have a length");
        assert!((150..400).contains(&length));
        let cargo = ship.cargo_value_musd.expect("roster ships carry cargo value");
        assert!((20..200).contains(&cargo));
        assert_eq!(ship.destination, "ROTTERDAM");
        assert_near_port(ship, port, ROSTER_JITTER);
    }
}

#[test]
fn test_fleet_is_regenerated_each_call() {
    let port = ports::default_port();
    let mut fleet = FleetGenerator::new(seeded_rng(5), NOW);

    let first = fleet.simulated(port, 12);
    let second = fleet.simulated(port, 12);

    // same identifiers, independently drawn positions
    assert_eq!(first[0].mmsi, second[0].mmsi);
    let moved = first
        .iter()
        .zip(&second)
        .any(|(a, b)| a.latitude != b.latitude || a.longitude != b.longitude);
    assert!(moved);
}

#[test]
fn test_find_port_is_case_insensitive() {
    let port = ports::find_port("  singapore ").expect("Singapore is in the port table");
    assert_eq!(port.name, "Singapore");
    assert!(ports::find_port("Atlantis").is_none());
}

#[test]
fn test_default_port_is_new_york() {
    let port = ports::default_port();
    assert_eq!(port.latitude, 40.68);
    assert_eq!(port.longitude, -74.02);
    assert!(ports::all_ports().len() >= 10);
}

#[test]
fn test_local_hour_follows_port_offset() {
    let singapore = ports::find_port("Singapore").expect("Singapore is in the port table");
    let santos = ports::find_port("Santos").expect("Santos is in the port table");

    assert_eq!(ports::default_port().local_hour(NOW), 7);
    assert_eq!(singapore.local_hour(NOW), 20);
    assert_eq!(santos.local_hour(NOW), 9);

    // wraps past midnight in both directions
    let late = time::macros::datetime!(2024-06-01 23:00 UTC);
    assert_eq!(singapore.local_hour(late), 7);
    let early = time::macros::datetime!(2024-06-01 02:00 UTC);
    assert_eq!(ports::default_port().local_hour(early), 21);
}
