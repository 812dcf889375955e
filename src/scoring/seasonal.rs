use super::{range_factor, WeightedAverage};
use crate::species::{Migration, SeasonalPattern};

const ELEVATION_WEIGHT: f64 = 0.4;
const MIGRATION_WEIGHT: f64 = 0.3;
const BREEDING_WEIGHT: f64 = 0.3;
const BREEDING_FACTOR: f64 = 0.8;

/// Seasonal fit of a cell: elevation band, plus migration and breeding terms
/// when they apply this season.
pub fn seasonal_score(elevation: f64, pattern: &SeasonalPattern) -> f64 {
    let mut avg = WeightedAverage::default();
    avg.add(
        range_factor(
            elevation,
            pattern.elevation_band.min,
            pattern.elevation_band.max,
        ),
        ELEVATION_WEIGHT,
    );
    if pattern.migration != Migration::Stable {
        avg.add(pattern.migration_factor, MIGRATION_WEIGHT);
    }
    if pattern.breeding {
        avg.add(BREEDING_FACTOR, BREEDING_WEIGHT);
    }
    avg.value()
}
