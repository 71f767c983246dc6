//! Session lifecycle management.
//!
//! Establishes and destroys the active logged-in identity, choosing the
//! durable or session-bound scope based on the "remember me" flag, and
//! reconciles a fresh identity from the stored account record on startup.

use std::sync::Arc;

use super::types::{AuthError, SessionIdentity, SessionLocation, SessionState};
use crate::accounts::{AccountRecord, AccountRepository};
use crate::messaging::ConversationLedger;
use crate::store::{keys, RecordStore, Scope};

/// Manages the zero-or-one active session per process.
pub struct SessionManager {
    store: Arc<dyn RecordStore>,
    accounts: AccountRepository,
    current: Option<SessionIdentity>,
    location: SessionLocation,
    state: SessionState,
}

impl SessionManager {
    /// Create a manager (and its account repository) over the given store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let accounts = AccountRepository::new(Arc::clone(&store));
        Self {
            store,
            accounts,
            current: None,
            location: SessionLocation::None,
            state: SessionState::Anonymous,
        }
    }

    /// The account repository backing this manager.
    pub fn accounts(&self) -> &AccountRepository {
        &self.accounts
    }

    /// The active identity, if any.
    pub fn current_user(&self) -> Option<&SessionIdentity> {
        self.current.as_ref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn location(&self) -> SessionLocation {
        self.location
    }

    /// Verify credentials and establish a session.
    ///
    /// On success the identity is persisted to the scope selected by
    /// `remember` and the other scope is cleared. On failure the caller
    /// gets a single generic error, whatever actually went wrong with the
    /// credentials.
    pub fn login(
        &mut self,
        email: &str,
        password: &str,
        remember: bool,
        ledger: &ConversationLedger,
    ) -> Result<SessionIdentity, AuthError> {
        self.state = SessionState::Authenticating;

        let record = match self.accounts.verify_credentials(email, password)? {
            Some(record) => record,
            None => {
                self.state = if self.current.is_some() {
                    SessionState::Authenticated
                } else {
                    SessionState::Anonymous
                };
                return Err(AuthError::InvalidCredentials);
            }
        };

        let identity = self.establish(&record, SessionLocation::for_remember(remember), ledger)?;
        Ok(identity)
    }

    /// Create the account and log straight in. New sign-ups are remembered
    /// by default.
    pub fn sign_up(
        &mut self,
        record: &AccountRecord,
        ledger: &ConversationLedger,
    ) -> Result<SessionIdentity, AuthError> {
        self.accounts.create(record)?;
        self.login(&record.email, &record.password, true, ledger)
    }

    /// Destroy the active session, clearing both storage scopes
    /// unconditionally.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.store.remove(Scope::Durable, keys::USER_SESSION)?;
        self.store.remove(Scope::SessionBound, keys::USER_SESSION)?;
        self.current = None;
        self.location = SessionLocation::None;
        self.state = SessionState::Anonymous;
        Ok(())
    }

    /// Restore a persisted session on process start.
    ///
    /// The durable scope is tried first, then the session-bound scope; the
    /// first valid identity wins. Corrupted entries are removed and never
    /// surfaced as user-facing errors.
    pub fn restore_on_startup(
        &mut self,
        ledger: &ConversationLedger,
    ) -> Result<Option<SessionIdentity>, AuthError> {
        for location in [SessionLocation::Durable, SessionLocation::SessionBound] {
            let scope = match location.scope() {
                Some(scope) => scope,
                None => continue,
            };
            let Some(raw) = self.store.get(scope, keys::USER_SESSION)? else {
                continue;
            };

            match serde_json::from_str::<SessionIdentity>(&raw) {
                Ok(identity) if !identity.email.is_empty() => {
                    // Re-derive the identity from the durable account record
                    // so defaults and conversations are fresh.
                    let record = self
                        .accounts
                        .find_by_email(&identity.email)?
                        .unwrap_or_else(|| stub_record(&identity));
                    let identity = self.establish(&record, location, ledger)?;
                    return Ok(Some(identity));
                }
                Ok(_) => {
                    tracing::warn!(scope = %scope, "discarding session identity without email");
                    self.store.remove(scope, keys::USER_SESSION)?;
                }
                Err(e) => {
                    tracing::warn!(scope = %scope, "discarding corrupted session identity: {}", e);
                    self.store.remove(scope, keys::USER_SESSION)?;
                }
            }
        }

        Ok(None)
    }

    /// Persist a profile-affecting change: merge onto the stored account
    /// record (credentials preserved) and rewrite the identity in whichever
    /// scope is active.
    pub fn persist_profile_change(&mut self, identity: SessionIdentity) -> Result<(), AuthError> {
        self.accounts.update(&identity.profile_update())?;

        if let Some(scope) = self.location.scope() {
            let raw = serde_json::to_string(&identity)
                .map_err(|e| AuthError::Storage(e.to_string()))?;
            self.store.set(scope, keys::USER_SESSION, &raw)?;
        }

        self.current = Some(identity);
        Ok(())
    }

    /// Record one more completed session. Monotonic, +1 per confirmed
    /// booking.
    pub fn record_completed_session(&mut self) -> Result<u32, AuthError> {
        let mut identity = self.require_current()?.clone();
        identity.completed_sessions += 1;
        let total = identity.completed_sessions;
        self.persist_profile_change(identity)?;
        Ok(total)
    }

    /// Add newly earned medals to the identity. Medals are never revoked;
    /// ids already present are not duplicated.
    pub fn grant_medals(&mut self, medal_ids: &[String]) -> Result<(), AuthError> {
        let mut identity = self.require_current()?.clone();
        for id in medal_ids {
            if !identity.earned_medal_ids.contains(id) {
                identity.earned_medal_ids.push(id.clone());
            }
        }
        self.persist_profile_change(identity)
    }

    /// Toggle a trainer in the favorites set.
    pub fn toggle_favorite(&mut self, trainer_id: u32) -> Result<bool, AuthError> {
        let mut identity = self.require_current()?.clone();
        let now_favorite = if identity.favorite_trainer_ids.contains(&trainer_id) {
            identity.favorite_trainer_ids.retain(|id| *id != trainer_id);
            false
        } else {
            identity.favorite_trainer_ids.push(trainer_id);
            true
        };
        self.persist_profile_change(identity)?;
        Ok(now_favorite)
    }

    fn require_current(&self) -> Result<&SessionIdentity, AuthError> {
        self.current.as_ref().ok_or(AuthError::NotAuthenticated)
    }

    /// Build the identity, persist it to the chosen scope, and clear the
    /// other scope.
    fn establish(
        &mut self,
        record: &AccountRecord,
        location: SessionLocation,
        ledger: &ConversationLedger,
    ) -> Result<SessionIdentity, AuthError> {
        let conversations = ledger.conversations_for(&record.email);
        let identity = SessionIdentity::from_account(record, conversations);

        let scope = location
            .scope()
            .ok_or_else(|| AuthError::Storage("no scope for session".to_string()))?;
        let raw =
            serde_json::to_string(&identity).map_err(|e| AuthError::Storage(e.to_string()))?;
        self.store.set(scope, keys::USER_SESSION, &raw)?;
        self.store.remove(scope.other(), keys::USER_SESSION)?;

        self.current = Some(identity.clone());
        self.location = location;
        self.state = SessionState::Authenticated;
        Ok(identity)
    }
}

/// Minimal account record for a restored identity whose durable account
/// record has gone missing.
fn stub_record(identity: &SessionIdentity) -> AccountRecord {
    AccountRecord {
        email: identity.email.clone(),
        username: identity.username.clone(),
        full_name: identity.full_name.clone(),
        password: String::new(),
        photo_url: Some(identity.photo_url.clone()),
        completed_sessions: identity.completed_sessions,
        earned_medal_ids: identity.earned_medal_ids.clone(),
        favorite_trainer_ids: identity.favorite_trainer_ids.clone(),
        verified: false,
        verification_code: None,
        trainer: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn setup() -> (Arc<dyn RecordStore>, SessionManager, ConversationLedger) {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
        let manager = SessionManager::new(Arc::clone(&store));
        let ledger = ConversationLedger::load(Arc::clone(&store)).unwrap();
        (store, manager, ledger)
    }

    fn create_account(manager: &SessionManager) -> AccountRecord {
        let record = AccountRecord::new("dana@x.com", "dana", "Dana Levi", "secret1");
        manager.accounts().create(&record).unwrap();
        record
    }

    #[test]
    fn test_login_remember_uses_durable_and_clears_session_scope() {
        let (store, mut manager, ledger) = setup();
        create_account(&manager);

        // Stale identity in the other scope from an earlier run.
        store
            .set(Scope::SessionBound, keys::USER_SESSION, "{\"email\":\"x\"}")
            .unwrap();

        manager.login("dana@x.com", "secret1", true, &ledger).unwrap();

        assert_eq!(manager.state(), SessionState::Authenticated);
        assert_eq!(manager.location(), SessionLocation::Durable);
        assert!(store.get(Scope::Durable, keys::USER_SESSION).unwrap().is_some());
        assert!(store
            .get(Scope::SessionBound, keys::USER_SESSION)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_login_without_remember_uses_session_scope() {
        let (store, mut manager, ledger) = setup();
        create_account(&manager);

        manager.login("dana@x.com", "secret1", false, &ledger).unwrap();

        assert_eq!(manager.location(), SessionLocation::SessionBound);
        assert!(store.get(Scope::Durable, keys::USER_SESSION).unwrap().is_none());
        assert!(store
            .get(Scope::SessionBound, keys::USER_SESSION)
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_login_failure_is_generic() {
        let (_store, mut manager, ledger) = setup();
        create_account(&manager);

        let wrong_password = manager.login("dana@x.com", "nope", true, &ledger);
        let unknown_user = manager.login("ghost@x.com", "secret1", true, &ledger);

        assert_eq!(
            wrong_password.unwrap_err().to_string(),
            unknown_user.unwrap_err().to_string()
        );
        assert_eq!(manager.state(), SessionState::Anonymous);
    }

    #[test]
    fn test_logout_clears_both_scopes() {
        let (store, mut manager, ledger) = setup();
        create_account(&manager);
        manager.login("dana@x.com", "secret1", true, &ledger).unwrap();

        manager.logout().unwrap();

        assert!(manager.current_user().is_none());
        assert_eq!(manager.state(), SessionState::Anonymous);
        assert!(store.get(Scope::Durable, keys::USER_SESSION).unwrap().is_none());
        assert!(store
            .get(Scope::SessionBound, keys::USER_SESSION)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_restore_prefers_durable_scope() {
        let (store, mut manager, ledger) = setup();
        create_account(&manager);
        manager.login("dana@x.com", "secret1", true, &ledger).unwrap();

        let mut fresh = SessionManager::new(Arc::clone(&store));
        let restored = fresh.restore_on_startup(&ledger).unwrap();

        assert_eq!(restored.unwrap().email, "dana@x.com");
        assert_eq!(fresh.location(), SessionLocation::Durable);
        assert_eq!(fresh.state(), SessionState::Authenticated);
    }

    #[test]
    fn test_restore_from_corrupted_identity_goes_anonymous() {
        let (store, mut manager, ledger) = setup();
        store
            .set(Scope::Durable, keys::USER_SESSION, "][ not json")
            .unwrap();

        let restored = manager.restore_on_startup(&ledger).unwrap();

        assert!(restored.is_none());
        assert_eq!(manager.state(), SessionState::Anonymous);
        // The corrupted key was removed.
        assert!(store.get(Scope::Durable, keys::USER_SESSION).unwrap().is_none());
    }

    #[test]
    fn test_restore_falls_back_to_session_scope() {
        let (store, mut manager, ledger) = setup();
        create_account(&manager);
        manager.login("dana@x.com", "secret1", false, &ledger).unwrap();
        store.set(Scope::Durable, keys::USER_SESSION, "garbage").unwrap();

        let mut fresh = SessionManager::new(Arc::clone(&store));
        let restored = fresh.restore_on_startup(&ledger).unwrap();

        assert_eq!(restored.unwrap().email, "dana@x.com");
        assert_eq!(fresh.location(), SessionLocation::SessionBound);
    }

    #[test]
    fn test_profile_change_preserves_password_and_rewrites_session() {
        let (store, mut manager, ledger) = setup();
        create_account(&manager);
        manager.login("dana@x.com", "secret1", true, &ledger).unwrap();

        manager.record_completed_session().unwrap();
        manager.grant_medals(&["first_step".to_string()]).unwrap();

        let account = manager.accounts().find_by_email("dana@x.com").unwrap().unwrap();
        assert_eq!(account.password, "secret1");
        assert_eq!(account.completed_sessions, 1);
        assert_eq!(account.earned_medal_ids, vec!["first_step".to_string()]);

        let raw = store.get(Scope::Durable, keys::USER_SESSION).unwrap().unwrap();
        let persisted: SessionIdentity = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted.completed_sessions, 1);
    }

    #[test]
    fn test_grant_medals_never_duplicates() {
        let (_store, mut manager, ledger) = setup();
        create_account(&manager);
        manager.login("dana@x.com", "secret1", true, &ledger).unwrap();

        manager.grant_medals(&["first_step".to_string()]).unwrap();
        manager.grant_medals(&["first_step".to_string()]).unwrap();

        assert_eq!(
            manager.current_user().unwrap().earned_medal_ids,
            vec!["first_step".to_string()]
        );
    }

    #[test]
    fn test_toggle_favorite_roundtrip() {
        let (_store, mut manager, ledger) = setup();
        create_account(&manager);
        manager.login("dana@x.com", "secret1", true, &ledger).unwrap();

        assert!(manager.toggle_favorite(7).unwrap());
        assert_eq!(manager.current_user().unwrap().favorite_trainer_ids, vec![7]);
        assert!(!manager.toggle_favorite(7).unwrap());
        assert!(manager.current_user().unwrap().favorite_trainer_ids.is_empty());
    }

    #[test]
    fn test_mutators_require_a_session() {
        let (_store, mut manager, _ledger) = setup();
        assert!(matches!(
            manager.record_completed_session(),
            Err(AuthError::NotAuthenticated)
        ));
    }
}
