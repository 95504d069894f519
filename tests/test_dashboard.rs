//! Integration tests for login, sessions and dashboard refreshes.

mod common;

use skywatch::core::{Role, hash_password};
use skywatch::dashboard::{Dashboard, render_summary};
use skywatch::sources::DataSource;

use common::*;

fn offline_config() -> Config {
    let mut config = Config::default();
    config.sources = unreachable_sources();
    config
}

#[test]
fn test_hash_password_is_sha256_hex() {
    assert_eq!(
        hash_password("abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(hash_password("").len(), 64);
}

#[test]
fn test_authenticate_only_builtin_pairs() {
    let directory = UserDirectory::builtin();
    assert_eq!(directory.users().len(), 3);

    let admin = directory.authenticate("admin", "skywatch2024").expect("admin logs in");
    assert_eq!(admin.role, Role::Admin);
    assert!(directory.authenticate("analyst", "maritime123").is_some());
    assert!(directory.authenticate("demo", "demo").is_some());

    assert!(directory.authenticate("admin", "demo").is_none());
    assert!(directory.authenticate("Admin", "skywatch2024").is_none());
    assert!(directory.authenticate("root", "skywatch2024").is_none());
    assert!(directory.authenticate("demo", "").is_none());
}

#[test]
fn test_session_login_logout() -> anyhow::Result<()> {
    let directory = UserDirectory::builtin();
    let mut session = Session::new();
    assert!(!session.is_authenticated());
    assert!(session.require_user().is_err());

    let user = session.login(&directory, "analyst", "maritime123")?;
    assert_eq!(user.role, Role::Analyst);
    assert!(session.is_authenticated());

    session.logout();
    assert!(session.user().is_none());
    Ok(())
}

#[test]
fn test_failed_login_keeps_session_anonymous() {
    let mut session = Session::new();
    let result = session.login(&UserDirectory::builtin(), "admin", "wrong");
    assert!(result.is_err());
    assert!(!session.is_authenticated());
}

#[test]
fn test_sessions_are_independent() -> anyhow::Result<()> {
    let directory = UserDirectory::builtin();
    let mut first = Session::new();
    let second = Session::new();

    first.login(&directory, "demo", "demo")?;
    first.select_port("Hamburg")?;

    assert_ne!(first.id, second.id);
    assert!(!second.is_authenticated());
    assert_eq!(second.selected_port().name, "New York/New Jersey");
    Ok(())
}

#[test]
fn test_select_unknown_port_keeps_previous() -> anyhow::Result<()> {
    let mut session = Session::new();
    session.select_port("busan")?;
    assert!(session.select_port("Atlantis").is_err());
    assert_eq!(session.selected_port().name, "Busan");
    Ok(())
}

#[tokio::test]
async fn test_refresh_requires_login() -> anyhow::Result<()> {
    let dashboard = Dashboard::new(&offline_config())?;
    let session = Session::new();

    let result = dashboard.refresh(&session).await;

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("not logged in"));
    Ok(())
}

#[tokio::test]
async fn test_offline_refresh_builds_full_snapshot() -> anyhow::Result<()> {
    let dashboard = Dashboard::new(&offline_config())?;
    let mut session = Session::new();
    session.login(&UserDirectory::builtin(), "demo", "demo")?;
    session.select_port("Singapore")?;

    let snapshot = dashboard.refresh_with(&session, seeded_rng(21), NOW).await?;

    assert_eq!(snapshot.viewer, "demo");
    assert_eq!(snapshot.port.name, "Singapore");
    assert_eq!(snapshot.ships.len(), 8);
    assert_eq!(snapshot.etas.len(), snapshot.ships.len());
    for (ship, eta) in snapshot.ships.iter().zip(&snapshot.etas) {
        assert_eq!(ship.mmsi, eta.mmsi);
        assert_eq!(ship.destination, "SINGAPORE");
    }
    assert!((0.0..=1.0).contains(&snapshot.congestion.level));
    // 12:00 UTC is 20:00 in Singapore
    assert_eq!(snapshot.congestion.local_hour, 20);
    assert_eq!(snapshot.insights.total_ships, 8);
    assert_eq!(snapshot.insights.estimated_value_usd, 8 * 50_000_000);
    assert_eq!(snapshot.weather.source, DataSource::Simulated);
    assert_eq!(snapshot.economic.source, DataSource::Simulated);

    // public AIS ships never exceed 20 knots, so only drifting can be flagged
    for anomaly in &snapshot.anomalies {
        assert_eq!(anomaly.kind.label(), "DRIFTING");
    }
    Ok(())
}

#[tokio::test]
async fn test_snapshot_serializes_and_renders() -> anyhow::Result<()> {
    let dashboard = Dashboard::new(&offline_config())?;
    let mut session = Session::new();
    session.login(&UserDirectory::builtin(), "admin", "skywatch2024")?;

    let snapshot = dashboard.refresh_with(&session, seeded_rng(4), NOW).await?;

    let json = serde_json::to_value(&snapshot)?;
    assert_eq!(json["viewer"], "admin");
    assert_eq!(json["generated_at"], "2024-06-01T12:00:00Z");
    assert_eq!(json["ships"].as_array().map(Vec::len), Some(8));
    assert_eq!(json["weather"]["source"]["kind"], "Simulated");

    let text = render_summary(&snapshot);
    assert!(text.contains("SKYWATCH AI - New York/New Jersey"));
    assert!(text.contains("Viewer: admin"));
    assert!(text.contains("2024-06-01 12:00:00 UTC"));
    assert!(text.contains("MAERSK NEW YORK"));
    assert!(text.contains("Weather [Realistic Simulation]"));
    Ok(())
}
