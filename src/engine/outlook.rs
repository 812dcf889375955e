use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::PredictionEngine;
use crate::scoring::{time_score, weather_score};
use crate::species::{Species, TimeBucket};
use crate::weather::WeatherObservation;

/// Hours must beat this activity level to be recommended.
pub const OPTIMAL_ACTIVITY: f64 = 0.7;
/// At most this many hours are recommended.
pub const OPTIMAL_HOURS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlookRequest {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub species: Option<Vec<String>>,
    #[serde(default)]
    pub at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourActivity {
    pub hour: u32,
    pub bucket: TimeBucket,
    pub activity: f64,
}

/// Expected activity for each hour of one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyOutlook {
    pub species: Species,
    pub date: NaiveDate,
    pub weather_available: bool,
    pub hours: Vec<HourActivity>,
    /// Best hours first; ties go to the earlier hour.
    pub optimal_hours: Vec<HourActivity>,
}

impl PredictionEngine {
    /// Ranks the hours of `date` for `species`. Without weather the bare
    /// time-of-day weights are used.
    pub fn hourly_outlook(
        &self,
        species: Species,
        date: NaiveDate,
        weather: Option<&WeatherObservation>,
    ) -> HourlyOutlook {
        let profile = species.profile();
        let conditions = weather.map(|_| weather_score(weather, profile));

        let hours: Vec<HourActivity> = (0..24)
            .map(|hour| {
                let time = time_score(hour, profile);
                let activity = conditions.map_or(time, |factor| time * factor);
                HourActivity {
                    hour,
                    bucket: TimeBucket::from_hour(hour),
                    activity: activity.clamp(0.0, 1.0),
                }
            })
            .collect();

        let mut optimal_hours: Vec<HourActivity> = hours
            .iter()
            .filter(|slot| slot.activity > OPTIMAL_ACTIVITY)
            .copied()
            .collect();
        // stable sort keeps earlier hours ahead on ties
        optimal_hours.sort_by(|a, b| b.activity.total_cmp(&a.activity));
        optimal_hours.truncate(OPTIMAL_HOURS);

        HourlyOutlook {
            species,
            date,
            weather_available: weather.is_some(),
            hours,
            optimal_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 15).unwrap()
    }

    #[test]
    fn elk_outlook_without_weather_prefers_dawn_then_dusk() {
        let outlook = PredictionEngine::default().hourly_outlook(Species::Elk, date(), None);
        assert_eq!(outlook.hours.len(), 24);
        assert!(!outlook.weather_available);
        let best: Vec<u32> = outlook.optimal_hours.iter().map(|h| h.hour).collect();
        // dawn 5-6 and dusk 17-18 all score 1.0; earliest three win
        assert_eq!(best, vec![5, 6, 17]);
    }

    #[test]
    fn bad_weather_leaves_no_optimal_hours() {
        let storm = WeatherObservation {
            temperature: 5.0,
            wind_speed: 40.0,
            precipitation: 2.0,
            pressure: 28.9,
        };
        let outlook =
            PredictionEngine::default().hourly_outlook(Species::Turkey, date(), Some(&storm));
        assert!(outlook.weather_available);
        assert!(outlook.optimal_hours.is_empty());
        assert!(outlook.hours.iter().all(|h| h.activity == 0.0));
    }

    #[test]
    fn turkey_night_hours_are_inactive() {
        let outlook = PredictionEngine::default().hourly_outlook(Species::Turkey, date(), None);
        assert_eq!(outlook.hours[22].activity, 0.0);
        assert_eq!(outlook.hours[22].bucket, TimeBucket::Night);
    }
}
