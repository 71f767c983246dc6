//! Booking record types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::SessionIdentity;
use crate::trainers::Trainer;

/// One confirmed booking. Records are append-only and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub trainer_id: u32,
    pub trainer_name: String,
    /// Email of the booking client.
    pub user_id: String,
    pub user_full_name: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Time of day, `HH:MM`.
    pub time: String,
    /// Free-form note from the client to the trainer.
    pub message: String,
}

impl Booking {
    /// Create a booking for the given client and trainer.
    pub fn new(user: &SessionIdentity, trainer: &Trainer, date: &str, time: &str, message: &str) -> Self {
        Self {
            id: format!("booking-{}", Uuid::new_v4()),
            trainer_id: trainer.id,
            trainer_name: trainer.name.clone(),
            user_id: user.email.clone(),
            user_full_name: user.full_name.clone(),
            date: date.to_string(),
            time: time.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_serializes_camel_case() {
        let booking = Booking {
            id: "booking-1".to_string(),
            trainer_id: 2,
            trainer_name: "Maya Peretz".to_string(),
            user_id: "dana@x.com".to_string(),
            user_full_name: "Dana Levi".to_string(),
            date: "2024-06-05".to_string(),
            time: "10:00".to_string(),
            message: String::new(),
        };
        let raw = serde_json::to_string(&booking).unwrap();
        assert!(raw.contains("\"trainerId\""));
        assert!(raw.contains("\"userFullName\""));
    }
}
