use chrono::NaiveDateTime;

use super::proximity_factor;
use crate::inputs::HistoricalSighting;
use crate::spatial::GeoPoint;
use crate::species::Species;

/// Sightings farther than this contribute nothing.
pub const SIGHTING_REACH_M: f64 = 1000.0;
const DECAY_DAYS: f64 = 30.0;
const MS_PER_DAY: f64 = 86_400_000.0;

/// A sighting that survived the recency filter, with its age resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecentSighting {
    pub point: GeoPoint,
    pub days_ago: f64,
}

/// Keeps sightings of `species` at most `window_days` old at `now`.
///
/// Sightings stamped after `now` count as zero days old.
pub fn recent_sightings(
    sightings: &[HistoricalSighting],
    species: Species,
    now: NaiveDateTime,
    window_days: f64,
) -> Vec<RecentSighting> {
    sightings
        .iter()
        .filter(|sighting| sighting.species == species)
        .filter_map(|sighting| {
            let age_ms = (now - sighting.timestamp).num_milliseconds() as f64;
            let days_ago = (age_ms / MS_PER_DAY).max(0.0);
            (days_ago <= window_days).then(|| RecentSighting {
                point: sighting.point(),
                days_ago,
            })
        })
        .collect()
}

/// Strongest decayed, distance-weighted sighting near `location`.
pub fn historical_score(location: GeoPoint, recent: &[RecentSighting]) -> f64 {
    recent
        .iter()
        .map(|sighting| {
            let distance = location.distance_m(&sighting.point);
            proximity_factor(distance, SIGHTING_REACH_M) * (-sighting.days_ago / DECAY_DAYS).exp()
        })
        .fold(0.0, f64::max)
}
