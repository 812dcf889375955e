use super::{proximity_factor, range_factor, WeightedAverage};
use crate::inputs::TerrainSample;
use crate::spatial::GridCell;
use crate::species::SpeciesProfile;

/// Habitat suitability of a cell: water proximity, elevation and cover.
///
/// Water is left out of the average entirely when the sample lists no water
/// sources, so missing data is not read as a missing resource.
pub fn terrain_score(cell: &GridCell, terrain: &TerrainSample, profile: &SpeciesProfile) -> f64 {
    let mut avg = WeightedAverage::default();

    let location = cell.point();
    let nearest_water = terrain
        .water_sources
        .iter()
        .map(|water| location.distance_m(water))
        .min_by(f64::total_cmp);
    if let Some(distance) = nearest_water {
        avg.add(
            proximity_factor(distance, profile.water_distance_optimal),
            profile.water_weight,
        );
    }

    avg.add(
        range_factor(
            cell.elevation,
            profile.elevation_optimal.min,
            profile.elevation_optimal.max,
        ),
        profile.elevation_weight,
    );

    avg.add(
        range_factor(
            terrain.cover_density,
            profile.cover_optimal * 0.8,
            profile.cover_optimal * 1.2,
        ),
        profile.cover_weight,
    );

    avg.value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::GeoPoint;
    use crate::species::Species;
    use approx::assert_relative_eq;

    fn cell() -> GridCell {
        GridCell {
            lat: 39.0,
            lon: -105.0,
            elevation: 7500.0,
        }
    }

    fn terrain(water: Vec<GeoPoint>) -> TerrainSample {
        TerrainSample {
            elevation: 7500.0,
            cover_density: 0.7,
            water_sources: water,
            food_sources: Vec::new(),
        }
    }

    #[test]
    fn no_water_data_is_excluded_not_zeroed() {
        let score = terrain_score(&cell(), &terrain(Vec::new()), Species::Elk.profile());
        assert_relative_eq!(score, 1.0);
    }

    #[test]
    fn water_on_the_cell_scores_full() {
        let score = terrain_score(
            &cell(),
            &terrain(vec![GeoPoint::new(39.0, -105.0)]),
            Species::Elk.profile(),
        );
        assert_relative_eq!(score, 1.0);
    }

    #[test]
    fn distant_water_pulls_the_average_down() {
        // ~11 km away, well past elk's 500 m optimum
        let score = terrain_score(
            &cell(),
            &terrain(vec![GeoPoint::new(39.1, -105.0)]),
            Species::Elk.profile(),
        );
        // water weight 0.8 scores 0, elevation 0.6 and cover 0.7 score 1
        assert_relative_eq!(score, 1.3 / 2.1, epsilon = 1e-12);
    }

    #[test]
    fn nearest_water_source_wins() {
        let near = terrain(vec![
            GeoPoint::new(39.1, -105.0),
            GeoPoint::new(39.0, -105.0),
        ]);
        assert_relative_eq!(terrain_score(&cell(), &near, Species::Elk.profile()), 1.0);
    }

    #[test]
    fn cover_band_is_twenty_percent_either_side() {
        let mut sample = terrain(Vec::new());
        sample.cover_density = 0.84;
        assert_relative_eq!(terrain_score(&cell(), &sample, Species::Elk.profile()), 1.0);
        sample.cover_density = 0.1;
        assert!(terrain_score(&cell(), &sample, Species::Elk.profile()) < 1.0);
    }
}
