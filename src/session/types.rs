//! Session identity types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::accounts::{AccountRecord, ProfileUpdate};
use crate::messaging::{Conversation, Participant};
use crate::store::Scope;

/// The non-secret projection of an account record representing "who is
/// currently logged in", plus the owner's conversations.
///
/// Lives in exactly one storage scope at a time; writing it to one scope
/// clears the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdentity {
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default)]
    pub completed_sessions: u32,
    #[serde(default)]
    pub earned_medal_ids: Vec<String>,
    #[serde(default)]
    pub conversations: Vec<Conversation>,
    #[serde(default)]
    pub favorite_trainer_ids: Vec<u32>,
}

impl SessionIdentity {
    /// Build an identity from an account record, defaulting any missing
    /// optional fields and attaching the owner's conversations.
    pub fn from_account(record: &AccountRecord, conversations: Vec<Conversation>) -> Self {
        Self {
            email: record.email.clone(),
            username: record.username.clone(),
            full_name: record.full_name.clone(),
            photo_url: record
                .photo_url
                .clone()
                .unwrap_or_else(|| placeholder_photo(&record.username)),
            completed_sessions: record.completed_sessions,
            earned_medal_ids: record.earned_medal_ids.clone(),
            conversations,
            favorite_trainer_ids: record.favorite_trainer_ids.clone(),
        }
    }

    /// The identity as a conversation participant.
    pub fn as_participant(&self) -> Participant {
        Participant {
            id: self.email.clone(),
            name: self.full_name.clone(),
            photo_url: self.photo_url.clone(),
        }
    }

    /// The profile-affecting fields to merge onto the stored account.
    pub fn profile_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            email: self.email.clone(),
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            photo_url: self.photo_url.clone(),
            completed_sessions: self.completed_sessions,
            earned_medal_ids: self.earned_medal_ids.clone(),
            favorite_trainer_ids: self.favorite_trainer_ids.clone(),
        }
    }
}

/// Deterministic placeholder avatar derived from the username.
pub fn placeholder_photo(username: &str) -> String {
    format!("https://picsum.photos/seed/{}/200/200", username)
}

/// Where the active session identity is persisted, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionLocation {
    /// No identity persisted in either scope.
    #[default]
    None,
    /// Persisted in the durable scope ("remember me").
    Durable,
    /// Persisted in the session-bound scope.
    SessionBound,
}

impl SessionLocation {
    /// The storage scope backing this location, if any.
    pub fn scope(&self) -> Option<Scope> {
        match self {
            SessionLocation::None => None,
            SessionLocation::Durable => Some(Scope::Durable),
            SessionLocation::SessionBound => Some(Scope::SessionBound),
        }
    }

    /// Location for a "remember me" choice.
    pub fn for_remember(remember: bool) -> Self {
        if remember {
            SessionLocation::Durable
        } else {
            SessionLocation::SessionBound
        }
    }
}

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    /// Transient, only while credentials are being verified.
    Authenticating,
    Authenticated,
}

/// Authentication and session errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Deliberately generic: never reveals whether the email or the
    /// password was wrong.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("no active session")]
    NotAuthenticated,

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<crate::store::StoreError> for AuthError {
    fn from(e: crate::store::StoreError) -> Self {
        AuthError::Storage(e.to_string())
    }
}

impl From<crate::accounts::AccountError> for AuthError {
    fn from(e: crate::accounts::AccountError) -> Self {
        AuthError::Storage(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_defaults_missing_photo() {
        let record = AccountRecord::new("dana@x.com", "dana", "Dana Levi", "pw");
        let identity = SessionIdentity::from_account(&record, Vec::new());
        assert_eq!(identity.photo_url, "https://picsum.photos/seed/dana/200/200");
        assert_eq!(identity.completed_sessions, 0);
        assert!(identity.earned_medal_ids.is_empty());
    }

    #[test]
    fn test_identity_never_carries_password() {
        let record = AccountRecord::new("dana@x.com", "dana", "Dana Levi", "hunter2");
        let identity = SessionIdentity::from_account(&record, Vec::new());
        let raw = serde_json::to_string(&identity).unwrap();
        assert!(!raw.contains("hunter2"));
        assert!(!raw.contains("password"));
    }

    #[test]
    fn test_location_for_remember() {
        assert_eq!(SessionLocation::for_remember(true), SessionLocation::Durable);
        assert_eq!(
            SessionLocation::for_remember(false),
            SessionLocation::SessionBound
        );
        assert!(SessionLocation::None.scope().is_none());
    }
}
