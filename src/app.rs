//! Main application facade.
//!
//! Wires the record store, session manager, conversation ledger, booking
//! recorder, trainer catalog and translations into one entry point, and
//! runs the startup sequence (demo-data seed, then session restore).

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::accounts::{AccountError, AccountRecord};
use crate::bookings::{Booking, BookingError, BookingOutcome, BookingRecorder};
use crate::config::AppConfig;
use crate::i18n::{Language, TranslationService};
use crate::medals::{medal_catalog, Medal};
use crate::messaging::{Conversation, ConversationLedger, LedgerError, Message, Participant};
use crate::payment::SimulatedPayment;
use crate::seed::{initialize_demo_data, SeedError};
use crate::session::{AuthError, SessionIdentity, SessionManager};
use crate::store::{FileStore, MemoryStore, RecordStore, StoreError};
use crate::trainers::{demo_trainers, filter_trainers, Filters, Trainer};

/// The assembled application state.
pub struct FastaApp {
    config: AppConfig,
    session: SessionManager,
    ledger: ConversationLedger,
    recorder: BookingRecorder,
    trainers: Vec<Trainer>,
    i18n: TranslationService,
}

impl FastaApp {
    /// Open the application over on-disk storage at the configured data
    /// directory.
    pub fn open(config: AppConfig) -> Result<Self, AppError> {
        let store: Arc<dyn RecordStore> = Arc::new(FileStore::open(&config.data_dir)?);
        Self::with_store(store, config)
    }

    /// Open the application over in-memory storage. Nothing survives the
    /// process; used by tests and previews.
    pub fn in_memory(config: AppConfig) -> Result<Self, AppError> {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
        Self::with_store(store, config)
    }

    /// Assemble the application over the given store and run the startup
    /// sequence.
    pub fn with_store(store: Arc<dyn RecordStore>, config: AppConfig) -> Result<Self, AppError> {
        let mut session = SessionManager::new(Arc::clone(&store));
        let mut ledger = ConversationLedger::load(Arc::clone(&store))?;
        let recorder = BookingRecorder::new(Arc::clone(&store));

        initialize_demo_data(&store, session.accounts(), &mut ledger)?;
        session.restore_on_startup(&ledger)?;

        let mut i18n = TranslationService::new();
        if let Some(lang) = Language::from_id(&config.language) {
            i18n.set_language(lang);
        }

        Ok(Self {
            config,
            session,
            ledger,
            recorder,
            trainers: demo_trainers(),
            i18n,
        })
    }

    /// The active identity, if anyone is logged in.
    pub fn current_user(&self) -> Option<&SessionIdentity> {
        self.session.current_user()
    }

    pub fn translations(&self) -> &TranslationService {
        &self.i18n
    }

    /// Switch the UI language and remember the choice in the config.
    pub fn set_language(&mut self, lang: Language) {
        self.i18n.set_language(lang);
        self.config.language = lang.id().to_string();
    }

    /// Log in with credentials.
    pub fn login(
        &mut self,
        email: &str,
        password: &str,
        remember: bool,
    ) -> Result<SessionIdentity, AppError> {
        Ok(self.session.login(email, password, remember, &self.ledger)?)
    }

    /// Create an account and log straight in.
    pub fn sign_up(
        &mut self,
        email: &str,
        username: &str,
        full_name: &str,
        password: &str,
    ) -> Result<SessionIdentity, AppError> {
        let record = AccountRecord::new(email, username, full_name, password);
        Ok(self.session.sign_up(&record, &self.ledger)?)
    }

    /// Confirm the pending sign-up with the emailed verification code.
    pub fn verify_account(&mut self, email: &str, code: &str) -> Result<bool, AppError> {
        Ok(self.session.accounts().verify_code(email, code)?)
    }

    pub fn logout(&mut self) -> Result<(), AppError> {
        Ok(self.session.logout()?)
    }

    /// The full trainer catalog.
    pub fn trainers(&self) -> &[Trainer] {
        &self.trainers
    }

    pub fn trainer_by_id(&self, id: u32) -> Option<&Trainer> {
        self.trainers.iter().find(|t| t.id == id)
    }

    /// Trainers matching the discovery filters.
    pub fn search_trainers(&self, filters: &Filters) -> Vec<Trainer> {
        filter_trainers(&self.trainers, filters)
    }

    /// Toggle a trainer in the current user's favorites.
    pub fn toggle_favorite(&mut self, trainer_id: u32) -> Result<bool, AppError> {
        Ok(self.session.toggle_favorite(trainer_id)?)
    }

    /// Conversations of the current user, most of the inbox view.
    pub fn conversations(&self) -> Result<Vec<Conversation>, AppError> {
        let user = self.require_user()?;
        Ok(self.ledger.conversations_for(&user.email))
    }

    /// Unread-conversation count for the inbox badge.
    pub fn unread_count(&self) -> usize {
        match self.session.current_user() {
            Some(user) => self.ledger.unread_count_for(&user.email),
            None => 0,
        }
    }

    /// Open a conversation for viewing: marks foreign messages read.
    pub fn open_conversation(&mut self, conversation_id: &str) -> Result<Option<Conversation>, AppError> {
        let user = self.require_user()?.clone();
        self.ledger.mark_read(conversation_id, &user.email)?;
        Ok(self.ledger.get(conversation_id).cloned())
    }

    /// Start (or resume) a conversation with a trainer.
    pub fn message_trainer(&mut self, trainer_id: u32) -> Result<Conversation, AppError> {
        let user = self.require_user()?.clone();
        let trainer = self
            .trainer_by_id(trainer_id)
            .ok_or(AppError::TrainerNotFound(trainer_id))?;
        let counterpart = trainer_participant(trainer);
        Ok(self
            .ledger
            .find_or_create(&user.as_participant(), &counterpart)?)
    }

    /// Send a message from the current user.
    pub fn send_message(
        &mut self,
        conversation_id: &str,
        content: &str,
    ) -> Result<Message, AppError> {
        let user = self.require_user()?.clone();
        Ok(self
            .ledger
            .append_message(conversation_id, &user.email, content)?)
    }

    /// A simulated charge with the configured processing delay.
    pub fn start_payment(&self) -> SimulatedPayment {
        SimulatedPayment::new(Duration::from_millis(self.config.payment.processing_delay_ms))
    }

    /// Confirm a booking after an approved payment.
    pub fn confirm_booking(
        &mut self,
        trainer_id: u32,
        date: &str,
        time: &str,
        message: &str,
    ) -> Result<BookingOutcome, AppError> {
        let user = self.require_user()?.clone();
        let trainer = self
            .trainer_by_id(trainer_id)
            .ok_or(AppError::TrainerNotFound(trainer_id))?
            .clone();

        let booking = Booking::new(&user, &trainer, date, time, message);
        let outcome = self.recorder.confirm(
            booking,
            &trainer_participant(&trainer),
            &mut self.session,
            &mut self.ledger,
            &self.i18n,
        )?;
        Ok(outcome)
    }

    /// Bookings made by the current user.
    pub fn my_bookings(&self) -> Result<Vec<Booking>, AppError> {
        let user = self.require_user()?;
        Ok(self.recorder.bookings_for(&user.email)?)
    }

    /// Medals the current user has earned, in catalog order.
    pub fn earned_medals(&self) -> Vec<Medal> {
        let Some(user) = self.session.current_user() else {
            return Vec::new();
        };
        medal_catalog()
            .into_iter()
            .filter(|m| user.earned_medal_ids.contains(&m.id))
            .collect()
    }

    fn require_user(&self) -> Result<&SessionIdentity, AppError> {
        self.session
            .current_user()
            .ok_or(AppError::Auth(AuthError::NotAuthenticated))
    }
}

fn trainer_participant(trainer: &Trainer) -> Participant {
    Participant {
        id: trainer.email.clone(),
        name: trainer.name.clone(),
        photo_url: trainer.photo_url.clone(),
    }
}

/// Top-level application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("trainer not found: {0}")]
    TrainerNotFound(u32),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    Seed(#[from] SeedError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
