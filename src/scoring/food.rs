use super::proximity_factor;
use crate::inputs::FoodSource;
use crate::spatial::GeoPoint;
use crate::species::{food_rating, Season, SeasonalPattern};

/// Food sources farther than this contribute nothing.
pub const FOOD_REACH_M: f64 = 1000.0;

/// Availability of this season's preferred food around `location`.
///
/// Normalised by the number of food types the species expects this season,
/// not by the number of sources found, then clamped to `[0, 1]`.
pub fn food_score(
    location: GeoPoint,
    sources: &[FoodSource],
    pattern: &SeasonalPattern,
    season: Season,
) -> f64 {
    if pattern.food_sources.is_empty() {
        return 0.0;
    }
    let total: f64 = sources
        .iter()
        .filter(|source| pattern.eats(&source.kind))
        .filter_map(|source| {
            let rating = food_rating(&source.kind, season)?;
            let distance = location.distance_m(&source.point());
            Some(rating * proximity_factor(distance, FOOD_REACH_M))
        })
        .sum();
    (total / pattern.food_sources.len() as f64).clamp(0.0, 1.0)
}
