use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::species::Species;

/// Largest accepted `grid_size`; a batch scores `grid_size²` cells per species.
pub const MAX_GRID_SIZE: u32 = 1_000;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

fn default_grid_size() -> u32 {
    10
}

fn default_sighting_window_days() -> f64 {
    30.0
}

fn default_weather_timeout_ms() -> u64 {
    5_000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Engine, weather, server and logging settings.
///
/// Every field has a default, so an empty YAML document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub weights: FactorWeights,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default = "default_grid_size")]
    pub grid_size: u32,
    #[serde(default = "default_sighting_window_days")]
    pub sighting_window_days: f64,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weights: FactorWeights::default(),
            thresholds: Thresholds::default(),
            grid_size: default_grid_size(),
            sighting_window_days: default_sighting_window_days(),
            weather: WeatherConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Linear blend of the six factor scores into a probability. The weights
/// must sum to 1 so the blend stays within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorWeights {
    pub weather: f64,
    pub time: f64,
    pub terrain: f64,
    pub seasonal: f64,
    pub food: f64,
    pub historical: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            weather: 0.2,
            time: 0.15,
            terrain: 0.2,
            seasonal: 0.2,
            food: 0.15,
            historical: 0.1,
        }
    }
}

impl FactorWeights {
    fn named(&self) -> [(&'static str, f64); 6] {
        [
            ("weather", self.weather),
            ("time", self.time),
            ("terrain", self.terrain),
            ("seasonal", self.seasonal),
            ("food", self.food),
            ("historical", self.historical),
        ]
    }

    pub fn total(&self) -> f64 {
        self.named().iter().map(|(_, weight)| weight).sum()
    }
}

/// A cell is reported only when its probability is strictly above the
/// species threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub elk: f64,
    pub mule_deer: f64,
    pub turkey: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            elk: 0.6,
            mule_deer: 0.6,
            turkey: 0.7,
        }
    }
}

impl Thresholds {
    pub fn for_species(&self, species: Species) -> f64 {
        match species {
            Species::Elk => self.elk,
            Species::MuleDeer => self.mule_deer,
            Species::Turkey => self.turkey,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_weather_timeout_ms")]
    pub timeout_ms: u64,
    /// JSON file holding an observation or an OpenWeatherMap response.
    /// Relative paths are taken from the config file's directory.
    #[serde(default)]
    pub source: Option<PathBuf>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_weather_timeout_ms(),
            source: None,
        }
    }
}

impl WeatherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("weight '{name}' must be non-negative, got {value}")]
    NegativeWeight { name: &'static str, value: f64 },
    #[error("factor weights must sum to 1, got {0}")]
    WeightSum(f64),
    #[error("threshold for {species} must be within [0, 1], got {value}")]
    ThresholdOutOfRange { species: Species, value: f64 },
    #[error("grid size must be at least 1")]
    EmptyGrid,
    #[error("grid size must be at most {MAX_GRID_SIZE}, got {0}")]
    GridTooLarge(u32),
    #[error("sighting window must be positive, got {0} days")]
    SightingWindow(f64),
}

impl Config {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(text).context("Failed to parse config YAML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.weights.named() {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::NegativeWeight { name, value });
            }
        }
        let total = self.weights.total();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum(total));
        }
        for species in Species::ALL {
            let value = self.thresholds.for_species(species);
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { species, value });
            }
        }
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge(self.grid_size));
        }
        if self.sighting_window_days.is_nan() || self.sighting_window_days <= 0.0 {
            return Err(ConfigError::SightingWindow(self.sighting_window_days));
        }
        Ok(())
    }

    /// Anchors relative file paths at `dir`.
    pub fn resolve_paths(&mut self, dir: &Path) {
        if let Some(source) = self.weather.source.as_mut() {
            if source.is_relative() {
                *source = dir.join(&*source);
            }
        }
    }
}

pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Config> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Config::from_yaml_str(&data)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        if let Some(dir) = path.parent() {
            config.resolve_paths(dir);
        }
        Ok(config)
    }

    /// Like [`ConfigLoader::load`], but falls back to defaults when no file is given.
    pub fn load_or_default(&self, file: Option<impl AsRef<Path>>) -> Result<Config> {
        match file {
            Some(file) => self.load(file),
            None => Ok(Config::default()),
        }
    }
}
