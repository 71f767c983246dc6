//! Account record types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::trainers::Specialty;

/// The full per-user account record, keyed by email in durable storage.
///
/// Records written by older versions of the application may be missing the
/// newer optional fields; every such field defaults at load time rather
/// than failing deserialization. The password is stored in plaintext, a
/// documented limitation of this client-only system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    /// Unique key and the only login identifier.
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub completed_sessions: u32,
    #[serde(default)]
    pub earned_medal_ids: Vec<String>,
    #[serde(default)]
    pub favorite_trainer_ids: Vec<u32>,
    /// Whether the sign-up verification code was confirmed.
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_code: Option<String>,
    /// Present only for trainer accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainer: Option<TrainerFields>,
}

impl AccountRecord {
    /// Create a fresh, unverified account record with a pending
    /// verification code.
    pub fn new(email: &str, username: &str, full_name: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            username: username.to_string(),
            full_name: full_name.to_string(),
            password: password.to_string(),
            photo_url: None,
            completed_sessions: 0,
            earned_medal_ids: Vec::new(),
            favorite_trainer_ids: Vec::new(),
            verified: false,
            verification_code: Some(generate_verification_code()),
            trainer: None,
        }
    }
}

/// Role-specific fields carried on trainer accounts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerFields {
    #[serde(default)]
    pub specialties: Vec<Specialty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// The profile-affecting fields merged onto a stored account record.
///
/// Deliberately excludes credentials and verification state, which survive
/// every profile update untouched.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub photo_url: String,
    pub completed_sessions: u32,
    pub earned_medal_ids: Vec<String>,
    pub favorite_trainer_ids: Vec<u32>,
}

/// A 6-digit sign-up verification code.
pub fn generate_verification_code() -> String {
    let bytes = Uuid::new_v4().into_bytes();
    let seed = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    format!("{:06}", 100_000 + seed % 900_000)
}
