use super::{range_factor, WeightedAverage};
use crate::species::SpeciesProfile;
use crate::weather::WeatherObservation;

const WIND_WEIGHT: f64 = 0.6;
const PRECIPITATION_WEIGHT: f64 = 0.5;
/// inHg
const PRESSURE_BAND: (f64, f64) = (29.8, 30.2);

/// Suitability of current conditions for a species. Missing weather scores 0.
pub fn weather_score(observation: Option<&WeatherObservation>, profile: &SpeciesProfile) -> f64 {
    let Some(observation) = observation else {
        return 0.0;
    };
    let tolerance = &profile.weather_tolerance;
    let mut avg = WeightedAverage::default();

    avg.add(
        range_factor(
            observation.temperature,
            profile.temperature_optimal.min,
            profile.temperature_optimal.max,
        ),
        profile.temperature_weight,
    );
    avg.add(
        range_factor(observation.wind_speed, 0.0, tolerance.wind),
        WIND_WEIGHT,
    );
    avg.add(
        range_factor(observation.precipitation, 0.0, tolerance.rain),
        PRECIPITATION_WEIGHT,
    );
    avg.add(
        range_factor(observation.pressure, PRESSURE_BAND.0, PRESSURE_BAND.1),
        tolerance.pressure_sensitivity,
    );
    avg.value()
}
