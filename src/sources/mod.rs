//! Keyless public data feeds, each with a generated fallback.
//!
//! The `fetch*` methods report what went wrong; the `*_or_simulated` methods
//! never fail and tag their result with where it actually came from.

pub mod economic;
pub mod satellite;
pub mod weather;

use std::time::Duration;

use serde::Serialize;

use crate::error::{SourceError, SourceResult};

pub use economic::{EconomicClient, EconomicIndicators};
pub use satellite::SatelliteClient;
pub use weather::{WeatherClient, WeatherReport};

/// Where a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "provider")]
pub enum DataSource {
    Live(&'static str),
    Simulated,
}

impl DataSource {
    pub fn is_live(&self) -> bool {
        matches!(self, DataSource::Live(_))
    }

    pub fn label(&self) -> &'static str {
        match *self {
            DataSource::Live(provider) => provider,
            DataSource::Simulated => "Realistic Simulation",
        }
    }
}

pub(crate) fn build_http_client(
    user_agent: &str,
    timeout: Duration,
) -> SourceResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(SourceError::from)
}

/// GET `url` and return the raw body, mapping non-2xx to [`SourceError::Api`].
pub(crate) async fn get_bytes(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, &str)],
) -> SourceResult<Vec<u8>> {
    let resp = client.get(url).query(query).send().await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(SourceError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    Ok(resp.bytes().await?.to_vec())
}

pub(crate) async fn get_json(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, &str)],
) -> SourceResult<serde_json::Value> {
    let body = get_bytes(client, url, query).await?;
    Ok(serde_json::from_slice(&body)?)
}
