//! CRUD over per-user account records.

use std::sync::Arc;

use thiserror::Error;

use super::types::{AccountRecord, ProfileUpdate};
use crate::store::{keys, RecordStore, Scope, StoreError};

/// Repository over account records in the durable scope, keyed by email.
pub struct AccountRepository {
    store: Arc<dyn RecordStore>,
}

impl AccountRepository {
    /// Create a repository over the given store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Write a new account record.
    ///
    /// An existing record under the same email is overwritten silently;
    /// sign-up performs no duplicate check.
    pub fn create(&self, record: &AccountRecord) -> Result<(), AccountError> {
        self.write(record)
    }

    /// Look up an account by email.
    ///
    /// A corrupted record is removed from storage and treated as absent.
    pub fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>, AccountError> {
        let key = keys::account_key(email);
        let Some(raw) = self.store.get(Scope::Durable, &key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!(email, "discarding corrupted account record: {}", e);
                self.store.remove(Scope::Durable, &key)?;
                Ok(None)
            }
        }
    }

    /// Return the account only if the password matches exactly.
    ///
    /// An unknown email and a wrong password are indistinguishable to the
    /// caller.
    pub fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<AccountRecord>, AccountError> {
        Ok(self
            .find_by_email(email)?
            .filter(|record| record.password == password))
    }

    /// Merge profile-affecting fields onto the stored record.
    ///
    /// Credentials and verification state on the stored record are
    /// preserved. If no record exists under the update's email, one is
    /// created with empty credentials (the original record-less merge
    /// behavior, preserved as-is).
    pub fn update(&self, update: &ProfileUpdate) -> Result<AccountRecord, AccountError> {
        let mut record = self
            .find_by_email(&update.email)?
            .unwrap_or_else(|| AccountRecord {
                email: update.email.clone(),
                username: String::new(),
                full_name: String::new(),
                password: String::new(),
                photo_url: None,
                completed_sessions: 0,
                earned_medal_ids: Vec::new(),
                favorite_trainer_ids: Vec::new(),
                verified: false,
                verification_code: None,
                trainer: None,
            });

        record.username = update.username.clone();
        record.full_name = update.full_name.clone();
        record.photo_url = Some(update.photo_url.clone());
        record.completed_sessions = update.completed_sessions;
        record.earned_medal_ids = update.earned_medal_ids.clone();
        record.favorite_trainer_ids = update.favorite_trainer_ids.clone();

        self.write(&record)?;
        Ok(record)
    }

    /// Confirm a sign-up verification code, marking the account verified.
    pub fn verify_code(&self, email: &str, code: &str) -> Result<bool, AccountError> {
        let Some(mut record) = self.find_by_email(email)? else {
            return Ok(false);
        };

        if record.verification_code.as_deref() != Some(code) {
            return Ok(false);
        }

        record.verified = true;
        record.verification_code = None;
        self.write(&record)?;
        Ok(true)
    }

    fn write(&self, record: &AccountRecord) -> Result<(), AccountError> {
        let raw = serde_json::to_string(record)
            .map_err(|e| AccountError::Serialization(e.to_string()))?;
        self.store
            .set(Scope::Durable, &keys::account_key(&record.email), &raw)?;
        Ok(())
    }
}

/// Account repository errors.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialization(String),
}
