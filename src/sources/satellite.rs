use image::DynamicImage;

use crate::config::SourcesConfig;
use crate::error::SourceResult;
use crate::imagery;
use crate::sources::{DataSource, build_http_client, get_bytes};

pub const WORLDVIEW_PROVIDER: &str = "NASA Worldview";

/// MODIS true-colour snapshot of New York Harbor.
const SNAPSHOT_QUERY: &[(&str, &str)] = &[
    ("REQUEST", "GetSnapshot"),
    ("LAYERS", "MODIS_Terra_CorrectedReflectance_TrueColor"),
    ("CRS", "EPSG:4326"),
    ("TIME", "2024-12-01"),
    ("WRAP", "day"),
    ("BBOX", "40.5,-74.5,40.9,-73.7"),
    ("FORMAT", "image/jpeg"),
    ("WIDTH", "800"),
    ("HEIGHT", "600"),
];

pub struct SatelliteClient {
    client: reqwest::Client,
    snapshot_url: String,
}

impl SatelliteClient {
    pub fn new(config: &SourcesConfig) -> SourceResult<Self> {
        Ok(Self {
            client: build_http_client(&config.user_agent, config.timeout())?,
            snapshot_url: config.satellite_snapshot_url.clone(),
        })
    }

    pub async fn fetch_snapshot(&self) -> SourceResult<DynamicImage> {
        let bytes = get_bytes(&self.client, &self.snapshot_url, SNAPSHOT_QUERY).await?;
        let img = image::load_from_memory(&bytes)?;
        tracing::info!(
            width = img.width(),
            height = img.height(),
            "Downloaded satellite snapshot"
        );
        Ok(img)
    }

    /// Snapshot, or the synthetic harbour scene when the download fails.
    pub async fn fetch_or_synthesize(&self) -> (DynamicImage, DataSource) {
        match self.fetch_snapshot().await {
            Ok(img) => (img, DataSource::Live(WORLDVIEW_PROVIDER)),
            Err(e) => {
                tracing::warn!(error = %e, "Satellite download failed, synthesizing harbor scene");
                (
                    DynamicImage::ImageRgb8(imagery::harbor_scene()),
                    DataSource::Simulated,
                )
            }
        }
    }
}
