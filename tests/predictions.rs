use std::{path::PathBuf, time::Duration};

use huntcast::{
    config::ConfigLoader,
    engine::{EngineSettings, Forecaster, PredictionEngine, PredictionRequest},
    report::ReportWriter,
    species::{Season, Species},
    weather::{FileWeather, NoWeather, WeatherProvider},
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

fn front_range() -> PredictionRequest {
    let data = std::fs::read_to_string(fixture("front_range.json")).expect("fixture readable");
    serde_json::from_str(&data).expect("fixture parses")
}

fn forecaster<P: WeatherProvider>(provider: P) -> Forecaster<P> {
    let config = ConfigLoader::new(env!("CARGO_MANIFEST_DIR"))
        .load("fixtures/huntcast.yaml")
        .expect("config loads");
    Forecaster::new(
        PredictionEngine::new(EngineSettings::from_config(&config)),
        provider,
        config.weather.timeout(),
    )
}

#[test]
fn fixture_config_matches_defaults() {
    let config = ConfigLoader::new(env!("CARGO_MANIFEST_DIR"))
        .load("fixtures/huntcast.yaml")
        .unwrap();
    assert_eq!(
        EngineSettings::from_config(&config),
        EngineSettings::default()
    );
    assert_eq!(
        config.weather.source,
        Some(fixture("weather_openweather.json"))
    );
}

#[tokio::test]
async fn front_range_fall_dawn_ranks_elk() {
    let forecaster = forecaster(FileWeather::new(fixture("weather_openweather.json")));
    let batch = forecaster.generate_predictions(&front_range()).await.unwrap();

    assert!(batch.weather_available);
    assert_eq!(batch.season, Season::Fall);
    assert_eq!(batch.hour, 6);

    let elk: Vec<_> = batch
        .predictions
        .iter()
        .filter(|p| p.species == Species::Elk)
        .collect();
    assert!(!elk.is_empty(), "fall dawn elk habitat should score");
    assert!(elk.iter().all(|p| p.probability > 0.6));
    assert!(batch
        .predictions
        .iter()
        .filter(|p| p.species == Species::Turkey)
        .all(|p| p.probability > 0.7));
    assert!(batch
        .predictions
        .windows(2)
        .all(|pair| pair[0].probability >= pair[1].probability));
}

#[tokio::test]
async fn recent_sightings_lift_nearby_cells() {
    let forecaster = forecaster(FileWeather::new(fixture("weather_openweather.json")));
    let with_history = forecaster.generate_predictions(&front_range()).await.unwrap();

    let mut without = front_range();
    without.sightings.clear();
    let without_history = forecaster.generate_predictions(&without).await.unwrap();

    let peak = |batch: &huntcast::PredictionBatch| {
        batch
            .predictions
            .iter()
            .filter(|p| p.species == Species::Elk)
            .map(|p| p.probability)
            .fold(0.0, f64::max)
    };
    assert!(peak(&with_history) > peak(&without_history));
    assert!(without_history
        .predictions
        .iter()
        .all(|p| p.factors.historical == 0.0));
}

#[tokio::test]
async fn stale_sightings_are_ignored() {
    // the August sighting is 56 days old at prediction time
    let forecaster = forecaster(NoWeather);
    let mut request = front_range();
    request.sightings.retain(|s| s.timestamp.format("%m").to_string() == "08");
    request.species = Some(vec!["elk".into()]);
    let batch = forecaster.generate_predictions(&request).await.unwrap();
    assert!(batch.predictions.iter().all(|p| p.factors.historical == 0.0));
}

#[tokio::test]
async fn same_inputs_same_batch() {
    let forecaster = forecaster(FileWeather::new(fixture("weather_openweather.json")));
    let a = forecaster.generate_predictions(&front_range()).await.unwrap();
    let b = forecaster.generate_predictions(&front_range()).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn missing_weather_file_degrades() {
    let forecaster = Forecaster::new(
        PredictionEngine::default(),
        FileWeather::new(fixture("no_such_weather.json")),
        Duration::from_secs(1),
    );
    let batch = forecaster.generate_predictions(&front_range()).await.unwrap();
    assert!(!batch.weather_available);
    assert!(batch.predictions.iter().all(|p| p.factors.weather == 0.0));
}

#[tokio::test]
async fn unknown_species_is_an_error() {
    let forecaster = forecaster(NoWeather);
    let mut request = front_range();
    request.species = Some(vec!["bison".into()]);
    let err = forecaster.generate_predictions(&request).await.unwrap_err();
    assert!(err.to_string().contains("bison"));
}

#[tokio::test]
async fn report_round_trips_through_disk() {
    let forecaster = forecaster(FileWeather::new(fixture("weather_openweather.json")));
    let batch = forecaster.generate_predictions(&front_range()).await.unwrap();

    let temp = tempfile::tempdir().unwrap();
    let path = ReportWriter::new(temp.path()).write(&batch).unwrap();
    assert!(path.ends_with("predictions_20241015_0630.json"));

    let data = std::fs::read_to_string(path).unwrap();
    let back: huntcast::PredictionBatch = serde_json::from_str(&data).unwrap();
    assert_eq!(back.generated_at, batch.generated_at);
    assert_eq!(back.predictions.len(), batch.predictions.len());
    for (read, written) in back.predictions.iter().zip(&batch.predictions) {
        assert_eq!(read.species, written.species);
        approx::assert_relative_eq!(read.probability, written.probability, epsilon = 1e-12);
    }
}
