#![allow(dead_code)]

use std::net::SocketAddr;

use axum::Router;
use rand::SeedableRng;
use rand::rngs::StdRng;
use skywatch::config::SourcesConfig;
use skywatch::core::{NavStatus, ShipRecord, ShipType};
use time::OffsetDateTime;
use time::macros::datetime;

/// Fixed clock so ETAs and timestamps are reproducible.
pub const NOW: OffsetDateTime = datetime!(2024-06-01 12:00 UTC);

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Serve `app` on an ephemeral localhost port for the rest of the test.
pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });
    addr
}

/// Sources pointed at `base`, with a short timeout.
pub fn sources_at(base: &str) -> SourcesConfig {
    SourcesConfig {
        weather_points_url: format!("{}/points/40.68,-74.02", base),
        user_agent: "SkyWatchAI/1.0".to_string(),
        world_bank_url: format!("{}/v2/country/USA/indicator/NY.GDP.MKTP.CD", base),
        satellite_snapshot_url: format!("{}/api/v1/snapshot", base),
        timeout_secs: 2,
    }
}

/// Nothing listens on the discard port, so connections are refused.
pub fn unreachable_sources() -> SourcesConfig {
    sources_at("http://127.0.0.1:9")
}

pub fn make_ship(mmsi: &str, speed: u32, status: NavStatus) -> ShipRecord {
    ShipRecord {
        mmsi: mmsi.to_string(),
        name: format!("TEST {}", mmsi),
        ship_type: ShipType::Cargo,
        company: "Test Line".to_string(),
        latitude: 40.68,
        longitude: -74.02,
        speed,
        course: 90,
        status,
        destination: "NEW YORK".to_string(),
        eta: NOW,
        timestamp: NOW,
        data_source: "Test",
        cargo_value_musd: None,
        length_m: None,
    }
}
