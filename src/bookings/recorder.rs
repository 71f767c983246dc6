//! Booking confirmation.
//!
//! Appends the booking to the durable list (read-modify-write, last writer
//! wins across processes), then applies the downstream effects: one more
//! completed session on the active identity, any newly earned medals, and
//! a system message in the client-trainer conversation.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use super::types::Booking;
use crate::i18n::TranslationService;
use crate::medals::{self, Medal};
use crate::messaging::{ConversationLedger, LedgerError, Participant};
use crate::session::{AuthError, SessionManager};
use crate::store::{keys, RecordStore, Scope, StoreError};

/// Records confirmed bookings in the durable scope.
pub struct BookingRecorder {
    store: Arc<dyn RecordStore>,
}

/// Result of a confirmed booking.
#[derive(Debug, Clone)]
pub struct BookingOutcome {
    pub booking: Booking,
    /// Medals unlocked by this booking, in catalog order. The first entry
    /// is the one to show as the unlock notification.
    pub unlocked_medals: Vec<Medal>,
}

impl BookingRecorder {
    /// Create a recorder over the given store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// All recorded bookings.
    ///
    /// A corrupted booking list is removed and treated as empty.
    pub fn list(&self) -> Result<Vec<Booking>, BookingError> {
        let Some(raw) = self.store.get(Scope::Durable, keys::BOOKINGS)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(bookings) => Ok(bookings),
            Err(e) => {
                tracing::warn!("discarding corrupted booking list: {}", e);
                self.store.remove(Scope::Durable, keys::BOOKINGS)?;
                Ok(Vec::new())
            }
        }
    }

    /// Bookings made by the given user.
    pub fn bookings_for(&self, user_id: &str) -> Result<Vec<Booking>, BookingError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|b| b.user_id == user_id)
            .collect())
    }

    /// Confirm a booking after payment.
    ///
    /// Appends to the booking list, records the completed session, grants
    /// any medals whose milestone is now reached, and drops a localized
    /// confirmation message into the client-trainer conversation (created
    /// on first contact).
    pub fn confirm(
        &self,
        booking: Booking,
        trainer: &Participant,
        session: &mut SessionManager,
        ledger: &mut ConversationLedger,
        i18n: &TranslationService,
    ) -> Result<BookingOutcome, BookingError> {
        let user = session
            .current_user()
            .ok_or(AuthError::NotAuthenticated)?
            .clone();

        // Validate the date before anything is persisted.
        let date = format_booking_date(&booking.date)?;

        let mut bookings = self.list()?;
        bookings.push(booking.clone());
        let raw = serde_json::to_string(&bookings)
            .map_err(|e| BookingError::Serialization(e.to_string()))?;
        self.store.set(Scope::Durable, keys::BOOKINGS, &raw)?;

        let completed = session.record_completed_session()?;

        let catalog = medals::medal_catalog();
        let unlocked = medals::evaluate(completed, &user.earned_medal_ids, &catalog);
        if !unlocked.is_empty() {
            let ids: Vec<String> = unlocked.iter().map(|m| m.id.clone()).collect();
            session.grant_medals(&ids)?;
        }

        let conversation = ledger.find_or_create(&user.as_participant(), trainer)?;
        let content = i18n.translate_with_args(
            "messages_system_bookingConfirmed",
            &[("date", date.as_str()), ("time", booking.time.as_str())],
        );
        ledger.append_system_message(&conversation.id, &content)?;

        tracing::info!(
            booking_id = %booking.id,
            trainer = %booking.trainer_name,
            "booking confirmed"
        );

        Ok(BookingOutcome {
            booking,
            unlocked_medals: unlocked,
        })
    }
}

/// Format a `YYYY-MM-DD` booking date long-form: weekday, month name, day.
///
/// Works on the calendar date alone, so the rendered day never shifts with
/// the local timezone.
pub fn format_booking_date(date: &str) -> Result<String, BookingError> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| BookingError::InvalidDate(format!("{}: {}", date, e)))?;
    Ok(parsed.format("%A, %B %-d").to_string())
}

/// Booking errors.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("invalid booking date: {0}")]
    InvalidDate(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Session(#[from] AuthError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountRecord;
    use crate::session::SessionIdentity;
    use crate::store::MemoryStore;
    use crate::trainers::demo_trainers;

    struct Fixture {
        store: Arc<dyn RecordStore>,
        session: SessionManager,
        ledger: ConversationLedger,
        recorder: BookingRecorder,
        i18n: TranslationService,
    }

    fn fixture() -> Fixture {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
        let mut session = SessionManager::new(Arc::clone(&store));
        let ledger = ConversationLedger::load(Arc::clone(&store)).unwrap();

        let record = AccountRecord::new("dana@x.com", "dana", "Dana Levi", "pw");
        session.accounts().create(&record).unwrap();
        session.login("dana@x.com", "pw", true, &ledger).unwrap();

        Fixture {
            recorder: BookingRecorder::new(Arc::clone(&store)),
            store,
            session,
            ledger,
            i18n: TranslationService::new(),
        }
    }

    fn booking(user: &SessionIdentity) -> (Booking, Participant) {
        let trainer = &demo_trainers()[0];
        let booking = Booking::new(user, trainer, "2024-06-05", "10:00", "see you there");
        let participant = Participant {
            id: trainer.email.clone(),
            name: trainer.name.clone(),
            photo_url: trainer.photo_url.clone(),
        };
        (booking, participant)
    }

    #[test]
    fn test_format_booking_date_long_form() {
        assert_eq!(
            format_booking_date("2024-06-05").unwrap(),
            "Wednesday, June 5"
        );
        assert_eq!(
            format_booking_date("2026-01-01").unwrap(),
            "Thursday, January 1"
        );
        assert!(format_booking_date("06/05/2024").is_err());
    }

    #[test]
    fn test_confirm_appends_booking_and_session_count() {
        let mut fx = fixture();
        let user = fx.session.current_user().unwrap().clone();
        let (booking, trainer) = booking(&user);

        let outcome = fx
            .recorder
            .confirm(booking, &trainer, &mut fx.session, &mut fx.ledger, &fx.i18n)
            .unwrap();

        assert_eq!(fx.recorder.list().unwrap().len(), 1);
        assert_eq!(fx.session.current_user().unwrap().completed_sessions, 1);
        assert_eq!(outcome.unlocked_medals[0].id, "first_step");
    }

    #[test]
    fn test_fifth_session_unlocks_consistent_contender() {
        let mut fx = fixture();

        // Four sessions already on record, no medals yet.
        let mut identity = fx.session.current_user().unwrap().clone();
        identity.completed_sessions = 4;
        fx.session.persist_profile_change(identity).unwrap();

        let user = fx.session.current_user().unwrap().clone();
        let (booking, trainer) = booking(&user);
        let outcome = fx
            .recorder
            .confirm(booking, &trainer, &mut fx.session, &mut fx.ledger, &fx.i18n)
            .unwrap();

        assert_eq!(fx.session.current_user().unwrap().completed_sessions, 5);
        let ids: Vec<&str> = outcome.unlocked_medals.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["first_step", "consistent_contender"]);
        assert!(fx
            .session
            .current_user()
            .unwrap()
            .earned_medal_ids
            .contains(&"consistent_contender".to_string()));
    }

    #[test]
    fn test_confirm_emits_exactly_one_system_message() {
        let mut fx = fixture();
        let user = fx.session.current_user().unwrap().clone();
        let (booking, trainer) = booking(&user);

        fx.recorder
            .confirm(booking, &trainer, &mut fx.session, &mut fx.ledger, &fx.i18n)
            .unwrap();

        let conversations = fx.ledger.conversations_for("dana@x.com");
        assert_eq!(conversations.len(), 1);
        let messages = &conversations[0].messages;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender_id, crate::messaging::SYSTEM_SENDER);
        assert_eq!(
            messages[0].content,
            "Session confirmed for Wednesday, June 5 at 10:00."
        );
        assert!(!messages[0].read);
    }

    #[test]
    fn test_confirm_requires_a_session() {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
        let mut session = SessionManager::new(Arc::clone(&store));
        let mut ledger = ConversationLedger::load(Arc::clone(&store)).unwrap();
        let recorder = BookingRecorder::new(Arc::clone(&store));

        let trainer = Participant {
            id: "t@x.com".to_string(),
            name: "T".to_string(),
            photo_url: String::new(),
        };
        let booking = Booking {
            id: "booking-1".to_string(),
            trainer_id: 1,
            trainer_name: "T".to_string(),
            user_id: "dana@x.com".to_string(),
            user_full_name: "Dana".to_string(),
            date: "2024-06-05".to_string(),
            time: "10:00".to_string(),
            message: String::new(),
        };

        let err = recorder.confirm(
            booking,
            &trainer,
            &mut session,
            &mut ledger,
            &TranslationService::new(),
        );
        assert!(matches!(
            err,
            Err(BookingError::Session(AuthError::NotAuthenticated))
        ));
    }

    #[test]
    fn test_corrupted_booking_list_recovers_empty() {
        let fx = fixture();
        fx.store
            .set(Scope::Durable, keys::BOOKINGS, "not json at all")
            .unwrap();
        assert!(fx.recorder.list().unwrap().is_empty());
        assert!(fx
            .store
            .get(Scope::Durable, keys::BOOKINGS)
            .unwrap()
            .is_none());
    }
}
