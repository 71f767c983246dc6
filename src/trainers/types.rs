//! Core types for trainer discovery.

use serde::{Deserialize, Serialize};

/// Training specialty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Specialty {
    Yoga,
    Weightlifting,
    Cardio,
    Pilates,
    CrossFit,
    Boxing,
    Nutrition,
    Running,
}

impl Specialty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::Yoga => "Yoga",
            Specialty::Weightlifting => "Weightlifting",
            Specialty::Cardio => "Cardio",
            Specialty::Pilates => "Pilates",
            Specialty::CrossFit => "CrossFit",
            Specialty::Boxing => "Boxing",
            Specialty::Nutrition => "Nutrition",
            Specialty::Running => "Running",
        }
    }

    /// All specialties, in display order.
    pub fn all() -> &'static [Specialty] {
        &[
            Specialty::Yoga,
            Specialty::Weightlifting,
            Specialty::Cardio,
            Specialty::Pilates,
            Specialty::CrossFit,
            Specialty::Boxing,
            Specialty::Nutrition,
            Specialty::Running,
        ]
    }
}

impl std::fmt::Display for Specialty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A client review left on a trainer profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
    pub author: String,
    pub rating: f32,
    pub comment: String,
}

/// Map coordinates for the trainer's home location.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A trainer listed in discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trainer {
    pub id: u32,
    pub name: String,
    /// Email, used as the messaging identity.
    pub email: String,
    pub photo_url: String,
    pub reviews: Vec<Review>,
    pub specialties: Vec<Specialty>,
    pub hourly_rate: u32,
    pub location: String,
    pub is_online: bool,
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl Trainer {
    /// Average review rating, or 0 when there are no reviews.
    pub fn average_rating(&self) -> f32 {
        if self.reviews.is_empty() {
            return 0.0;
        }
        let total: f32 = self.reviews.iter().map(|r| r.rating).sum();
        total / self.reviews.len() as f32
    }

    /// Append a review to the profile.
    pub fn add_review(&mut self, review: Review) {
        self.reviews.push(review);
    }
}

/// Discovery filters.
#[derive(Debug, Clone)]
pub struct Filters {
    /// Match trainers with at least one of these specialties; empty matches all.
    pub specialties: Vec<Specialty>,
    /// Minimum average review rating.
    pub min_rating: f32,
    /// Maximum hourly rate.
    pub max_hourly_rate: u32,
    /// Case-insensitive location fragment; empty matches all.
    pub location: String,
    /// Only trainers currently available online.
    pub online_only: bool,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            specialties: Vec::new(),
            min_rating: 0.0,
            max_hourly_rate: 500,
            location: String::new(),
            online_only: false,
        }
    }
}
