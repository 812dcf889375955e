use crate::species::{SpeciesProfile, TimeBucket};

/// Activity multiplier for an hour of the day. Pure bucket lookup.
pub fn time_score(hour: u32, profile: &SpeciesProfile) -> f64 {
    profile.time_weights.weight(TimeBucket::from_hour(hour))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::Species;

    #[test]
    fn dawn_and_dusk_peak_for_elk() {
        let elk = Species::Elk.profile();
        assert_eq!(time_score(6, elk), 1.0);
        assert_eq!(time_score(18, elk), 1.0);
        assert_eq!(time_score(12, elk), 0.3);
        assert_eq!(time_score(2, elk), 0.4);
    }

    #[test]
    fn turkeys_roost_at_night() {
        let turkey = Species::Turkey.profile();
        assert_eq!(time_score(22, turkey), 0.0);
        assert_eq!(time_score(8, turkey), 0.9);
    }
}
