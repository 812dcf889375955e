use serde::Deserialize;

use super::WeatherObservation;

/// hPa → inHg
pub const HPA_TO_INHG: f64 = 0.02953;

/// The subset of an OpenWeatherMap `/weather` response (imperial units) the
/// scorers need.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenWeatherResponse {
    pub main: Main,
    pub wind: Wind,
    #[serde(default)]
    pub rain: Option<Rain>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Main {
    /// °F
    pub temp: f64,
    /// hPa
    pub pressure: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    /// mph
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Rain {
    #[serde(rename = "1h", default)]
    pub one_hour: Option<f64>,
}

impl OpenWeatherResponse {
    pub fn into_observation(self) -> WeatherObservation {
        WeatherObservation {
            temperature: self.main.temp,
            wind_speed: self.wind.speed,
            precipitation: self.rain.and_then(|rain| rain.one_hour).unwrap_or(0.0),
            pressure: self.main.pressure * HPA_TO_INHG,
        }
    }
}
