use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::config::SourcesConfig;
use crate::error::{SourceError, SourceResult};
use crate::sources::{DataSource, build_http_client, get_json};

pub const NWS_PROVIDER: &str = "National Weather Service";

const CONDITIONS: &[&str] = &["Clear", "Partly Cloudy", "Cloudy", "Light Rain"];
const COMPASS: &[&str] = &["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub temperature: i64,
    /// "F" from the NWS forecast, "C" when simulated.
    pub temperature_unit: String,
    pub conditions: String,
    pub wind_speed: u32,
    pub wind_direction: String,
    pub visibility_km: Option<u32>,
    pub humidity: Option<u32>,
    pub source: DataSource,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Two-step NWS lookup: the points endpoint names the forecast URL, and the
/// first forecast period is taken as current conditions.
pub struct WeatherClient {
    client: reqwest::Client,
    points_url: String,
}

impl WeatherClient {
    pub fn new(config: &SourcesConfig) -> SourceResult<Self> {
        Ok(Self {
            client: build_http_client(&config.user_agent, config.timeout())?,
            points_url: config.weather_points_url.clone(),
        })
    }

    pub async fn fetch(&self) -> SourceResult<WeatherReport> {
        let points = get_json(&self.client, &self.points_url, &[]).await?;
        let forecast_url = parse_forecast_url(&points)?;
        tracing::debug!(%forecast_url, "Resolved NWS forecast");

        let forecast = get_json(&self.client, &forecast_url, &[]).await?;
        parse_current_period(&forecast, OffsetDateTime::now_utc())
    }

    pub async fn fetch_or_simulated<R: Rng>(&self, rng: &mut R) -> WeatherReport {
        match self.fetch().await {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(error = %e, "Weather API unavailable, using simulated weather");
                simulated_weather(rng, OffsetDateTime::now_utc())
            }
        }
    }
}

pub fn parse_forecast_url(points: &Value) -> SourceResult<String> {
    points
        .pointer("/properties/forecast")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(SourceError::MissingField("properties.forecast"))
}

pub fn parse_current_period(forecast: &Value, now: OffsetDateTime) -> SourceResult<WeatherReport> {
    let period = forecast
        .pointer("/properties/periods/0")
        .ok_or(SourceError::MissingField("properties.periods[0]"))?;

    let temperature = period
        .get("temperature")
        .and_then(Value::as_i64)
        .ok_or(SourceError::MissingField("temperature"))?;
    let conditions = period
        .get("shortForecast")
        .and_then(Value::as_str)
        .ok_or(SourceError::MissingField("shortForecast"))?;
    let wind_speed = period
        .get("windSpeed")
        .and_then(Value::as_str)
        .ok_or(SourceError::MissingField("windSpeed"))?;
    let wind_direction = period
        .get("windDirection")
        .and_then(Value::as_str)
        .ok_or(SourceError::MissingField("windDirection"))?;
    let unit = period
        .get("temperatureUnit")
        .and_then(Value::as_str)
        .unwrap_or("F");

    Ok(WeatherReport {
        temperature,
        temperature_unit: unit.to_string(),
        conditions: conditions.to_string(),
        wind_speed: parse_wind_speed(wind_speed)?,
        wind_direction: wind_direction.to_string(),
        visibility_km: None,
        humidity: None,
        source: DataSource::Live(NWS_PROVIDER),
        timestamp: now,
    })
}

/// "10 mph" and "10 to 15 mph" both read as 10.
pub fn parse_wind_speed(raw: &str) -> SourceResult<u32> {
    let first = raw
        .split_whitespace()
        .next()
        .ok_or_else(|| SourceError::Parse(format!("empty windSpeed '{}'", raw)))?;
    first
        .parse()
        .map_err(|_| SourceError::Parse(format!("non-numeric windSpeed '{}'", raw)))
}

pub fn simulated_weather<R: Rng>(rng: &mut R, now: OffsetDateTime) -> WeatherReport {
    WeatherReport {
        temperature: rng.gen_range(5..25),
        temperature_unit: "C".to_string(),
        conditions: CONDITIONS.choose(rng).unwrap_or(&CONDITIONS[0]).to_string(),
        wind_speed: rng.gen_range(0..15),
        wind_direction: COMPASS.choose(rng).unwrap_or(&COMPASS[0]).to_string(),
        visibility_km: Some(rng.gen_range(8..20)),
        humidity: Some(rng.gen_range(40..90)),
        source: DataSource::Simulated,
        timestamp: now,
    }
}
