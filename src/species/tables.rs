use super::{
    Migration, OptimalRange, Season, SeasonalPattern, SeasonalPatterns, SpeciesProfile,
    TimeWeights, WeatherTolerance,
};

pub(super) static ELK: SpeciesProfile = SpeciesProfile {
    elevation_optimal: OptimalRange::new(6000.0, 10000.0),
    elevation_weight: 0.6,
    cover_optimal: 0.7,
    cover_weight: 0.7,
    water_distance_optimal: 500.0,
    water_weight: 0.8,
    temperature_optimal: OptimalRange::new(45.0, 65.0),
    temperature_weight: 0.7,
    time_weights: TimeWeights {
        dawn: 1.0,
        morning: 0.8,
        midday: 0.3,
        afternoon: 0.5,
        dusk: 1.0,
        night: 0.4,
    },
    weather_tolerance: WeatherTolerance {
        wind: 15.0,
        rain: 0.3,
        pressure_sensitivity: 0.4,
    },
    seasonal_patterns: SeasonalPatterns {
        spring: SeasonalPattern {
            elevation_band: OptimalRange::new(5000.0, 8000.0),
            food_sources: &["grass", "forbs", "shrubs"],
            breeding: false,
            migration: Migration::Upward,
            migration_factor: 0.8,
        },
        summer: SeasonalPattern {
            elevation_band: OptimalRange::new(7000.0, 10000.0),
            food_sources: &["grass", "forbs", "leaves"],
            breeding: false,
            migration: Migration::Stable,
            migration_factor: 0.3,
        },
        fall: SeasonalPattern {
            elevation_band: OptimalRange::new(6000.0, 9000.0),
            food_sources: &["grass", "shrubs", "bark"],
            breeding: true,
            migration: Migration::Downward,
            migration_factor: 0.9,
        },
        winter: SeasonalPattern {
            elevation_band: OptimalRange::new(4000.0, 7000.0),
            food_sources: &["bark", "twigs", "dried grass"],
            breeding: false,
            migration: Migration::Stable,
            migration_factor: 0.4,
        },
    },
};

pub(super) static MULE_DEER: SpeciesProfile = SpeciesProfile {
    elevation_optimal: OptimalRange::new(4000.0, 8000.0),
    elevation_weight: 0.5,
    cover_optimal: 0.5,
    cover_weight: 0.8,
    water_distance_optimal: 800.0,
    water_weight: 0.7,
    temperature_optimal: OptimalRange::new(40.0, 70.0),
    temperature_weight: 0.6,
    time_weights: TimeWeights {
        dawn: 1.0,
        morning: 0.7,
        midday: 0.2,
        afternoon: 0.4,
        dusk: 1.0,
        night: 0.6,
    },
    weather_tolerance: WeatherTolerance {
        wind: 12.0,
        rain: 0.2,
        pressure_sensitivity: 0.5,
    },
    seasonal_patterns: SeasonalPatterns {
        spring: SeasonalPattern {
            elevation_band: OptimalRange::new(4000.0, 7000.0),
            food_sources: &["grass", "forbs", "new growth"],
            breeding: false,
            migration: Migration::Upward,
            migration_factor: 0.7,
        },
        summer: SeasonalPattern {
            elevation_band: OptimalRange::new(6000.0, 8000.0),
            food_sources: &["leaves", "forbs", "fruits"],
            breeding: false,
            migration: Migration::Stable,
            migration_factor: 0.3,
        },
        fall: SeasonalPattern {
            elevation_band: OptimalRange::new(5000.0, 7000.0),
            food_sources: &["shrubs", "acorns", "remaining fruits"],
            breeding: true,
            migration: Migration::Downward,
            migration_factor: 0.8,
        },
        winter: SeasonalPattern {
            elevation_band: OptimalRange::new(3000.0, 6000.0),
            food_sources: &["twigs", "bark", "evergreen leaves"],
            breeding: false,
            migration: Migration::Stable,
            migration_factor: 0.4,
        },
    },
};

pub(super) static TURKEY: SpeciesProfile = SpeciesProfile {
    elevation_optimal: OptimalRange::new(2000.0, 6000.0),
    elevation_weight: 0.4,
    cover_optimal: 0.6,
    cover_weight: 0.9,
    water_distance_optimal: 400.0,
    water_weight: 0.6,
    temperature_optimal: OptimalRange::new(50.0, 75.0),
    temperature_weight: 0.5,
    time_weights: TimeWeights {
        dawn: 1.0,
        morning: 0.9,
        midday: 0.5,
        afternoon: 0.4,
        dusk: 0.8,
        // roosting
        night: 0.0,
    },
    weather_tolerance: WeatherTolerance {
        wind: 8.0,
        rain: 0.1,
        pressure_sensitivity: 0.6,
    },
    seasonal_patterns: SeasonalPatterns {
        spring: SeasonalPattern {
            elevation_band: OptimalRange::new(2000.0, 5000.0),
            food_sources: &["insects", "seeds", "new growth"],
            breeding: true,
            migration: Migration::Upward,
            migration_factor: 0.5,
        },
        summer: SeasonalPattern {
            elevation_band: OptimalRange::new(2500.0, 6000.0),
            food_sources: &["insects", "berries", "seeds"],
            breeding: false,
            migration: Migration::Stable,
            migration_factor: 0.2,
        },
        fall: SeasonalPattern {
            elevation_band: OptimalRange::new(2000.0, 5000.0),
            food_sources: &["acorns", "nuts", "berries"],
            breeding: false,
            migration: Migration::Downward,
            migration_factor: 0.6,
        },
        winter: SeasonalPattern {
            elevation_band: OptimalRange::new(1500.0, 4000.0),
            food_sources: &["nuts", "dried berries", "buds"],
            breeding: false,
            migration: Migration::Stable,
            migration_factor: 0.3,
        },
    },
};

/// Seasonal nutritional rating of a food type, or `None` for unrated types.
pub fn food_rating(food: &str, season: Season) -> Option<f64> {
    // spring, summer, fall, winter
    let ratings: [f64; 4] = match food {
        "grass" => [0.9, 0.8, 0.6, 0.3],
        "forbs" => [0.9, 0.7, 0.4, 0.1],
        "shrubs" => [0.6, 0.7, 0.8, 0.5],
        "bark" => [0.3, 0.2, 0.4, 0.7],
        "leaves" => [0.8, 0.9, 0.5, 0.1],
        "acorns" => [0.1, 0.1, 0.9, 0.6],
        "insects" => [0.8, 0.9, 0.6, 0.1],
        "berries" => [0.2, 0.9, 0.7, 0.3],
        "nuts" => [0.2, 0.1, 0.9, 0.7],
        "seeds" => [0.7, 0.8, 0.9, 0.5],
        _ => return None,
    };
    let index = match season {
        Season::Spring => 0,
        Season::Summer => 1,
        Season::Fall => 2,
        Season::Winter => 3,
    };
    Some(ratings[index])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_stay_in_documented_band() {
        for food in [
            "grass", "forbs", "shrubs", "bark", "leaves", "acorns", "insects", "berries", "nuts",
            "seeds",
        ] {
            for season in [Season::Spring, Season::Summer, Season::Fall, Season::Winter] {
                let rating = food_rating(food, season).expect("rated food");
                assert!((0.1..=0.9).contains(&rating), "{food} {season:?} = {rating}");
            }
        }
    }

    #[test]
    fn unrated_food_has_no_rating() {
        assert_eq!(food_rating("twigs", Season::Winter), None);
        assert_eq!(food_rating("acorns", Season::Fall), Some(0.9));
    }
}
