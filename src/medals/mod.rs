//! Milestone medals earned for completed training sessions.

use serde::{Deserialize, Serialize};

/// A medal in the static catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medal {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Completed-session count that unlocks the medal.
    pub milestone: u32,
}

/// The medal catalog, in declared (display) order.
pub fn medal_catalog() -> Vec<Medal> {
    vec![
        Medal {
            id: "first_step".to_string(),
            name: "First Step".to_string(),
            description: "Awarded for completing your very first training session. \
                          The journey begins!"
                .to_string(),
            milestone: 1,
        },
        Medal {
            id: "consistent_contender".to_string(),
            name: "Consistent Contender".to_string(),
            description: "Awarded for completing 5 training sessions. You're building \
                          a habit!"
                .to_string(),
            milestone: 5,
        },
        Medal {
            id: "dedicated_warrior".to_string(),
            name: "Dedicated Warrior".to_string(),
            description: "Awarded for completing 10 training sessions. Your dedication \
                          is impressive!"
                .to_string(),
            milestone: 10,
        },
        Medal {
            id: "gym_veteran".to_string(),
            name: "Gym Veteran".to_string(),
            description: "Awarded for completing 25 training sessions. You're a regular!"
                .to_string(),
            milestone: 25,
        },
        Medal {
            id: "fitness_legend".to_string(),
            name: "Fitness Legend".to_string(),
            description: "Awarded for completing 50 training sessions. An inspiration \
                          to all!"
                .to_string(),
            milestone: 50,
        },
    ]
}

/// Newly earned medals for a session count, in catalog order.
///
/// Returns every catalog entry whose milestone is reached and whose id is
/// not already earned. The caller merges the returned ids into the earned
/// set and shows the first entry as the unlock notification when several
/// unlock at once.
pub fn evaluate(completed_sessions: u32, already_earned: &[String], catalog: &[Medal]) -> Vec<Medal> {
    catalog
        .iter()
        .filter(|medal| {
            completed_sessions >= medal.milestone
                && !already_earned.iter().any(|id| id == &medal.id)
        })
        .cloned()
        .collect()
}
