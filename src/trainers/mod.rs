//! Trainer data model, discovery filters, and the demo catalog.

pub mod catalog;
pub mod types;

pub use catalog::demo_trainers;
pub use types::{Coordinates, Filters, Review, Specialty, Trainer};

/// Apply discovery filters to a trainer list.
///
/// A trainer matches when it has at least one of the requested specialties
/// (or none were requested), its average rating meets the minimum, its
/// hourly rate does not exceed the maximum, its location contains the
/// requested fragment (case-insensitive), and it is online if only online
/// trainers were requested.
pub fn filter_trainers(trainers: &[Trainer], filters: &Filters) -> Vec<Trainer> {
    trainers
        .iter()
        .filter(|trainer| {
            let specialty_match = filters.specialties.is_empty()
                || filters
                    .specialties
                    .iter()
                    .any(|s| trainer.specialties.contains(s));
            let rating_match = trainer.average_rating() >= filters.min_rating;
            let price_match = trainer.hourly_rate <= filters.max_hourly_rate;
            let location_match = filters.location.is_empty()
                || trainer
                    .location
                    .to_lowercase()
                    .contains(&filters.location.to_lowercase());
            let online_match = !filters.online_only || trainer.is_online;

            specialty_match && rating_match && price_match && location_match && online_match
        })
        .cloned()
        .collect()
}
