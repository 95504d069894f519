//! The dashboard "page": one refresh pulls every feed and derives the
//! predictions shown next to the fleet.

use std::fmt::{self, Write};

use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use time::OffsetDateTime;
use time::macros::format_description;

use crate::config::Config;
use crate::core::fleet::{FleetGenerator, ShipRecord};
use crate::core::insights::{self, PortInsights};
use crate::core::ports::Port;
use crate::core::predict::{self, Anomaly, CongestionForecast, EtaPrediction};
use crate::core::session::Session;
use crate::sources::{EconomicClient, EconomicIndicators, WeatherClient, WeatherReport};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    pub viewer: String,
    pub port: Port,
    pub ships: Vec<ShipRecord>,
    pub etas: Vec<EtaPrediction>,
    pub congestion: CongestionForecast,
    pub anomalies: Vec<Anomaly>,
    pub insights: PortInsights,
    pub weather: WeatherReport,
    pub economic: EconomicIndicators,
}

pub struct Dashboard {
    weather: WeatherClient,
    economic: EconomicClient,
    simulated_count: usize,
}

impl Dashboard {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            weather: WeatherClient::new(&config.sources).context("Failed to build weather client")?,
            economic: EconomicClient::new(&config.sources)
                .context("Failed to build economic client")?,
            simulated_count: config.fleet.simulated_count,
        })
    }

    /// Rebuild the whole page for `session`. Fails only if nobody is logged in;
    /// unreachable feeds degrade to simulated data.
    pub async fn refresh(&self, session: &Session) -> anyhow::Result<DashboardSnapshot> {
        self.refresh_with(session, StdRng::from_entropy(), OffsetDateTime::now_utc())
            .await
    }

    pub async fn refresh_with(
        &self,
        session: &Session,
        mut rng: StdRng,
        now: OffsetDateTime,
    ) -> anyhow::Result<DashboardSnapshot> {
        let viewer = session.require_user()?.username.clone();
        let port = session.selected_port();
        tracing::info!(session = %session.id, port = port.name, "Refreshing dashboard");

        // the weather fallback needs its own rng; the fleet keeps `rng`
        let mut weather_rng = StdRng::from_rng(&mut rng).context("Failed to seed weather rng")?;
        let (weather, economic) = tokio::join!(
            self.weather.fetch_or_simulated(&mut weather_rng),
            self.economic.fetch_or_simulated(),
        );

        let mut fleet = FleetGenerator::new(rng, now);
        let ships = fleet.public_fleet(port, self.simulated_count);

        let rng = fleet.rng_mut();
        let etas = ships
            .iter()
            .map(|ship| predict::predict_eta(&mut *rng, ship, now))
            .collect();
        let congestion = predict::predict_congestion(rng, port.local_hour(now));
        let anomalies = predict::detect_anomalies(&ships);
        let insights = insights::analyze(ships.iter().map(|s| s.ship_type.label()));

        if !anomalies.is_empty() {
            tracing::warn!(count = anomalies.len(), "Anomalous vessels detected");
        }

        Ok(DashboardSnapshot {
            generated_at: now,
            viewer,
            port: port.clone(),
            ships,
            etas,
            congestion,
            anomalies,
            insights,
            weather,
            economic,
        })
    }
}

/// Plain-text rendering of a snapshot for terminals.
pub fn render_summary(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_summary(&mut out, snapshot);
    out
}

fn write_summary(w: &mut impl Write, snapshot: &DashboardSnapshot) -> fmt::Result {
    let stamp = format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");
    let clock = format_description!("[month]-[day] [hour]:[minute]");
    let generated = snapshot
        .generated_at
        .format(&stamp)
        .unwrap_or_else(|_| snapshot.generated_at.to_string());

    let port = &snapshot.port;
    writeln!(w, "SKYWATCH AI - {} ({}, {})", port.name, port.country, port.region)?;
    writeln!(w, "Viewer: {}   Updated: {}", snapshot.viewer, generated)?;
    writeln!(w)?;
    writeln!(
        w,
        "Ships: {}   Weather: {}   US GDP: ${:.2}T   Congestion: {:.0}% ({:?})",
        snapshot.ships.len(),
        snapshot.weather.conditions,
        snapshot.economic.gdp_usd_trillions,
        snapshot.congestion.level * 100.0,
        snapshot.congestion.trend,
    )?;
    writeln!(w)?;

    writeln!(
        w,
        "{:<10} {:<22} {:<13} {:>5} {:>4} {:<9} {:>12} {:>5}",
        "MMSI", "NAME", "TYPE", "KN", "CRS", "STATUS", "ETA", "CONF"
    )?;
    for (ship, eta) in snapshot.ships.iter().zip(&snapshot.etas) {
        let arrival = eta.arrival.format(&clock).unwrap_or_default();
        writeln!(
            w,
            "{:<10} {:<22} {:<13} {:>5} {:>4} {:<9} {:>12} {:>4.0}%",
            ship.mmsi,
            ship.name,
            ship.ship_type.label(),
            ship.speed,
            ship.course,
            ship.status.label(),
            arrival,
            eta.confidence,
        )?;
    }
    writeln!(w)?;

    let weather = &snapshot.weather;
    writeln!(
        w,
        "Weather [{}]: {}{} {}, wind {} {}",
        weather.source.label(),
        weather.temperature,
        weather.temperature_unit,
        weather.conditions,
        weather.wind_speed,
        weather.wind_direction,
    )?;

    let econ = &snapshot.economic;
    writeln!(
        w,
        "Economy [{}]: growth {}%, inflation {}%, unemployment {}%, trade balance ${}B",
        econ.source.label(),
        econ.gdp_growth_pct,
        econ.inflation_rate_pct,
        econ.unemployment_rate_pct,
        econ.trade_balance_busd,
    )?;

    let insights = &snapshot.insights;
    writeln!(
        w,
        "Port activity: congestion {:?}, trade volume {:?}, est. cargo ${}",
        insights.port_congestion, insights.trade_volume, insights.estimated_value_usd,
    )?;

    if snapshot.anomalies.is_empty() {
        return writeln!(w, "Anomalies: none");
    }
    writeln!(w, "Anomalies:")?;
    for a in &snapshot.anomalies {
        writeln!(w, "  {} {} ({} kn) {}", a.mmsi, a.name, a.speed, a.kind.label())?;
    }
    Ok(())
}
