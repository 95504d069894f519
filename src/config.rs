//! Runtime configuration.
//!
//! Layers, lowest precedence first: built-in defaults, `skywatch.toml` (or the
//! file given with `--config`), then `SKYWATCH_*` environment variables with
//! `__` separating nested keys (`SKYWATCH_SOURCES__TIMEOUT_SECS=5`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "skywatch.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sources: SourcesConfig,
    pub fleet: FleetConfig,
    pub detection: DetectionConfig,
    pub port: PortConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// NWS points endpoint for the harbour; its response links the forecast.
    pub weather_points_url: String,
    /// api.weather.gov rejects requests without a User-Agent.
    pub user_agent: String,
    pub world_bank_url: String,
    pub satellite_snapshot_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    pub simulated_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub threshold: u8,
    pub min_area: u32,
    pub max_area: u32,
    /// Off by default: on water-dominated scenes equalisation pushes the sea
    /// itself above the threshold.
    pub equalize: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortConfig {
    pub default_port: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            weather_points_url: "https://api.weather.gov/points/40.68,-74.02".to_string(),
            user_agent: "SkyWatchAI/1.0".to_string(),
            world_bank_url: "https://api.worldbank.org/v2/country/USA/indicator/NY.GDP.MKTP.CD"
                .to_string(),
            satellite_snapshot_url: "https://wvs.earthdata.nasa.gov/api/v1/snapshot".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self { simulated_count: 12 }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            threshold: 200,
            min_area: 50,
            max_area: 5000,
            equalize: false,
        }
    }
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            default_port: "New York/New Jersey".to_string(),
        }
    }
}

impl SourcesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load from `path`, or from `skywatch.toml` in the working directory.
    /// A missing file is not an error; defaults and env still apply.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

        let config: Config = Self::figment(&file)
            .extract()
            .with_context(|| format!("Failed to load configuration from {}", file.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn figment(file: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed("SKYWATCH_").split("__"))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.sources.timeout_secs == 0 {
            anyhow::bail!("sources.timeout_secs must be greater than zero");
        }
        if self.detection.min_area >= self.detection.max_area {
            anyhow::bail!(
                "detection.min_area ({}) must be below detection.max_area ({})",
                self.detection.min_area,
                self.detection.max_area
            );
        }
        if self.fleet.simulated_count == 0 {
            anyhow::bail!("fleet.simulated_count must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.detection.threshold, 200);
        assert_eq!(config.fleet.simulated_count, 12);
        assert_eq!(config.sources.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = Config::default();
        config.sources.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_area_bounds() {
        let mut config = Config::default();
        config.detection.min_area = 6000;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("min_area"));
    }

    // Loading tests run inside a jail: it serialises them and scrubs the
    // environment variables the env-layer tests set.

    #[test]
    fn test_load_toml_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                "[fleet]\nsimulated_count = 4\n\n[detection]\nequalize = true\n",
            )?;

            let config = Config::load(Some(Path::new("custom.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.fleet.simulated_count, 4);
            assert!(config.detection.equalize);
            // untouched sections keep their defaults
            assert_eq!(config.sources.user_agent, "SkyWatchAI/1.0");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_toml_and_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE_NAME,
                "[sources]\ntimeout_secs = 30\n\n[fleet]\nsimulated_count = 4\n",
            )?;
            jail.set_env("SKYWATCH_SOURCES__TIMEOUT_SECS", "5");
            jail.set_env("SKYWATCH_PORT__DEFAULT_PORT", "Rotterdam");

            let config = Config::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.sources.timeout_secs, 5);
            assert_eq!(config.port.default_port, "Rotterdam");
            // keys the environment leaves alone still come from the file
            assert_eq!(config.fleet.simulated_count, 4);
            assert_eq!(config.detection.threshold, 200);
            Ok(())
        });
    }

    #[test]
    fn test_env_value_is_validated() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SKYWATCH_SOURCES__TIMEOUT_SECS", "0");

            let err = Config::load(None).err().ok_or("zero timeout was accepted")?;
            assert!(err.to_string().contains("timeout_secs"));
            Ok(())
        });
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load(Some(Path::new("absent.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.port.default_port, "New York/New Jersey");
            Ok(())
        });
    }
}
