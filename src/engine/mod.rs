mod outlook;

use std::time::{Duration, Instant};

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    config::{Config, FactorWeights, Thresholds},
    inputs::{HistoricalSighting, TerrainSample},
    scoring::{
        food_score, historical_score, recent_sightings, seasonal_score, terrain_score, time_score,
        weather_score,
    },
    spatial::{BoundingBox, GeoPoint},
    species::{Migration, ScoringError, Season, Species},
    weather::{WeatherError, WeatherObservation, WeatherProvider},
};

pub use outlook::{HourActivity, HourlyOutlook, OutlookRequest, OPTIMAL_ACTIVITY, OPTIMAL_HOURS};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    pub weights: FactorWeights,
    pub thresholds: Thresholds,
    pub grid_size: u32,
    pub sighting_window_days: f64,
}

impl EngineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            weights: config.weights,
            thresholds: config.thresholds,
            grid_size: config.grid_size,
            sighting_window_days: config.sighting_window_days,
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Everything the map layer sends for one bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub bounds: BoundingBox,
    pub terrain: TerrainSample,
    #[serde(default)]
    pub sightings: Vec<HistoricalSighting>,
    /// Restricts the batch to these species; all species when absent.
    #[serde(default)]
    pub species: Option<Vec<String>>,
    /// Local time to predict for; the current local time when absent.
    #[serde(default)]
    pub at: Option<NaiveDateTime>,
}

impl PredictionRequest {
    pub fn new(bounds: BoundingBox, terrain: TerrainSample) -> Self {
        Self {
            bounds,
            terrain,
            sightings: Vec::new(),
            species: None,
            at: None,
        }
    }
}

pub(crate) fn resolve_species(names: Option<&[String]>) -> Result<Vec<Species>, ScoringError> {
    match names {
        Some(names) => Species::parse_list(names),
        None => Ok(Species::ALL.to_vec()),
    }
}

pub(crate) fn resolve_time(at: Option<NaiveDateTime>) -> NaiveDateTime {
    at.unwrap_or_else(|| Local::now().naive_local())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorBreakdown {
    pub weather: f64,
    pub time: f64,
    pub terrain: f64,
    pub seasonal: f64,
    pub food: f64,
    pub historical: f64,
}

impl FactorBreakdown {
    pub fn blend(&self, weights: &FactorWeights) -> f64 {
        self.weather * weights.weather
            + self.time * weights.time
            + self.terrain * weights.terrain
            + self.seasonal * weights.seasonal
            + self.food * weights.food
            + self.historical * weights.historical
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub lat: f64,
    pub lon: f64,
    pub species: Species,
    pub probability: f64,
    pub factors: FactorBreakdown,
    pub season: Season,
    pub breeding: bool,
    pub migration: Migration,
    pub preferred_food: Vec<String>,
}

/// Legend entry for one requested species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesSummary {
    pub species: Species,
    pub threshold: f64,
    pub accepted_cells: usize,
    pub peak_probability: Option<f64>,
    pub breeding: bool,
    pub migration: Migration,
    pub preferred_food: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionBatch {
    pub generated_at: NaiveDateTime,
    pub season: Season,
    pub hour: u32,
    pub weather_available: bool,
    pub weather: Option<WeatherObservation>,
    /// Sorted by descending probability.
    pub predictions: Vec<Prediction>,
    pub summaries: Vec<SpeciesSummary>,
}

/// The scoring pipeline. Holds only read-only settings, so one engine can
/// serve any number of concurrent batches.
#[derive(Debug, Clone, Default)]
pub struct PredictionEngine {
    settings: EngineSettings,
}

impl PredictionEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Scores every grid cell for every requested species and returns the
    /// accepted cells ranked by probability.
    ///
    /// One weather sample covers the whole box; `None` scores the weather
    /// factor as 0 and marks the batch as degraded.
    pub fn predict(
        &self,
        request: &PredictionRequest,
        weather: Option<&WeatherObservation>,
    ) -> Result<PredictionBatch, ScoringError> {
        let species = resolve_species(request.species.as_deref())?;
        let now = resolve_time(request.at);
        let season = Season::from_date(now.date());
        let hour = now.hour();

        let mut predictions = Vec::new();
        let mut summaries = Vec::with_capacity(species.len());
        for animal in species {
            let start = Instant::now();
            let accepted = self.score_species(animal, request, weather, now, season, hour);
            debug!(
                species = %animal,
                accepted = accepted.len(),
                duration_ms = start.elapsed().as_secs_f64() * 1_000.0,
                "scored grid"
            );
            summaries.push(summarize(
                animal,
                season,
                self.settings.thresholds.for_species(animal),
                &accepted,
            ));
            predictions.extend(accepted);
        }
        predictions.sort_by(|a, b| b.probability.total_cmp(&a.probability));

        info!(
            predictions = predictions.len(),
            season = ?season,
            hour,
            weather_available = weather.is_some(),
            "prediction batch complete"
        );

        Ok(PredictionBatch {
            generated_at: now,
            season,
            hour,
            weather_available: weather.is_some(),
            weather: weather.copied(),
            predictions,
            summaries,
        })
    }

    fn score_species(
        &self,
        species: Species,
        request: &PredictionRequest,
        weather: Option<&WeatherObservation>,
        now: NaiveDateTime,
        season: Season,
        hour: u32,
    ) -> Vec<Prediction> {
        let profile = species.profile();
        let pattern = profile.season(season);
        let terrain = &request.terrain;
        let threshold = self.settings.thresholds.for_species(species);

        // position-independent factors
        let weather = weather_score(weather, profile);
        let time = time_score(hour, profile);
        let recent = recent_sightings(
            &request.sightings,
            species,
            now,
            self.settings.sighting_window_days,
        );
        let preferred_food: Vec<String> =
            pattern.food_sources.iter().map(|f| f.to_string()).collect();

        request
            .bounds
            .grid(self.settings.grid_size, terrain.elevation)
            .filter_map(|cell| {
                let location = cell.point();
                let factors = FactorBreakdown {
                    weather,
                    time,
                    terrain: terrain_score(&cell, terrain, profile),
                    seasonal: seasonal_score(cell.elevation, pattern),
                    food: food_score(location, &terrain.food_sources, pattern, season),
                    historical: historical_score(location, &recent),
                };
                let probability = factors.blend(&self.settings.weights);
                (probability > threshold).then(|| Prediction {
                    lat: cell.lat,
                    lon: cell.lon,
                    species,
                    probability,
                    factors,
                    season,
                    breeding: pattern.breeding,
                    migration: pattern.migration,
                    preferred_food: preferred_food.clone(),
                })
            })
            .collect()
    }
}

fn summarize(
    species: Species,
    season: Season,
    threshold: f64,
    accepted: &[Prediction],
) -> SpeciesSummary {
    let pattern = species.profile().season(season);
    SpeciesSummary {
        species,
        threshold,
        accepted_cells: accepted.len(),
        peak_probability: accepted
            .iter()
            .map(|prediction| prediction.probability)
            .max_by(f64::total_cmp),
        breeding: pattern.breeding,
        migration: pattern.migration,
        preferred_food: pattern.food_sources.iter().map(|f| f.to_string()).collect(),
    }
}

/// Pairs the engine with a weather source. The fetch is the only await point
/// and is bounded by `timeout`; any failure degrades to "no weather".
pub struct Forecaster<P> {
    engine: PredictionEngine,
    provider: P,
    timeout: Duration,
}

impl<P: WeatherProvider> Forecaster<P> {
    pub fn new(engine: PredictionEngine, provider: P, timeout: Duration) -> Self {
        Self {
            engine,
            provider,
            timeout,
        }
    }

    pub fn engine(&self) -> &PredictionEngine {
        &self.engine
    }

    pub async fn fetch_weather(&self, point: GeoPoint) -> Option<WeatherObservation> {
        let outcome = tokio::time::timeout(self.timeout, self.provider.current_conditions(point))
            .await
            .unwrap_or_else(|_| Err(WeatherError::Timeout(self.timeout)));
        match outcome {
            Ok(observation) => Some(observation),
            Err(err) => {
                warn!(error = %err, lat = point.lat, lon = point.lon, "scoring without weather");
                None
            }
        }
    }

    /// Fetches weather at the box centroid, then scores the box.
    pub async fn generate_predictions(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionBatch, ScoringError> {
        // validate before spending a network round trip
        resolve_species(request.species.as_deref())?;
        let weather = self.fetch_weather(request.bounds.centroid()).await;
        self.engine.predict(request, weather.as_ref())
    }

    pub async fn outlook(&self, request: &OutlookRequest) -> Result<Vec<HourlyOutlook>, ScoringError> {
        let species = resolve_species(request.species.as_deref())?;
        let weather = self
            .fetch_weather(GeoPoint::new(request.lat, request.lon))
            .await;
        let date = resolve_time(request.at).date();
        Ok(species
            .into_iter()
            .map(|animal| self.engine.hourly_outlook(animal, date, weather.as_ref()))
            .collect())
    }
}
