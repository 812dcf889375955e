//! Weather observations and the providers that supply them.

mod openweather;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::spatial::GeoPoint;

pub use openweather::{OpenWeatherResponse, HPA_TO_INHG};

/// A single point sample of current conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// °F
    pub temperature: f64,
    /// mph
    pub wind_speed: f64,
    /// inches per hour
    pub precipitation: f64,
    /// inHg
    pub pressure: f64,
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather unavailable: {0}")]
    Unavailable(String),
    #[error("weather fetch timed out after {0:?}")]
    Timeout(Duration),
    #[error("failed to read weather file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode weather payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of current conditions for a point.
pub trait WeatherProvider: Send + Sync {
    fn current_conditions(
        &self,
        point: GeoPoint,
    ) -> impl Future<Output = Result<WeatherObservation, WeatherError>> + Send;
}

/// Always answers with the same observation.
#[derive(Debug, Clone, Copy)]
pub struct StaticWeather(pub WeatherObservation);

impl WeatherProvider for StaticWeather {
    async fn current_conditions(
        &self,
        _point: GeoPoint,
    ) -> Result<WeatherObservation, WeatherError> {
        Ok(self.0)
    }
}

/// Provider used when no weather source is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWeather;

impl WeatherProvider for NoWeather {
    async fn current_conditions(
        &self,
        _point: GeoPoint,
    ) -> Result<WeatherObservation, WeatherError> {
        Err(WeatherError::Unavailable(
            "no weather source configured".to_string(),
        ))
    }
}

/// Reads conditions from a JSON file on every request.
///
/// The file may hold either a plain [`WeatherObservation`] or a raw
/// OpenWeatherMap `/weather` response fetched with imperial units.
#[derive(Debug, Clone)]
pub struct FileWeather {
    path: PathBuf,
}

impl FileWeather {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl WeatherProvider for FileWeather {
    async fn current_conditions(
        &self,
        _point: GeoPoint,
    ) -> Result<WeatherObservation, WeatherError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| WeatherError::Io {
                path: self.path.clone(),
                source,
            })?;
        decode(&text)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WeatherPayload {
    Observation(WeatherObservation),
    OpenWeather(OpenWeatherResponse),
}

/// Decodes either payload shape accepted by [`FileWeather`].
pub fn decode(text: &str) -> Result<WeatherObservation, WeatherError> {
    match serde_json::from_str::<WeatherPayload>(text) {
        Ok(WeatherPayload::Observation(observation)) => Ok(observation),
        Ok(WeatherPayload::OpenWeather(response)) => Ok(response.into_observation()),
        // re-parse as the plain shape for a readable error message
        Err(_) => serde_json::from_str::<WeatherObservation>(text).map_err(WeatherError::from),
    }
}

/// Either a configured provider or none at all.
#[derive(Debug, Clone)]
pub enum ConfiguredWeather {
    Static(StaticWeather),
    File(FileWeather),
    Disabled(NoWeather),
}

impl WeatherProvider for ConfiguredWeather {
    async fn current_conditions(
        &self,
        point: GeoPoint,
    ) -> Result<WeatherObservation, WeatherError> {
        match self {
            ConfiguredWeather::Static(provider) => provider.current_conditions(point).await,
            ConfiguredWeather::File(provider) => provider.current_conditions(point).await,
            ConfiguredWeather::Disabled(provider) => provider.current_conditions(point).await,
        }
    }
}
