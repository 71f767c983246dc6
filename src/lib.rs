//! Fasta - Fitness Trainer Marketplace Client Core
//!
//! The state and persistence core of the Fasta fitness marketplace client.
//! Provides durable and session-bound record storage, account and session
//! management, trainer discovery, conversation threading, medal progression
//! and booking confirmation.

pub mod accounts;
pub mod app;
pub mod bookings;
pub mod config;
pub mod i18n;
pub mod medals;
pub mod messaging;
pub mod payment;
pub mod seed;
pub mod session;
pub mod store;
pub mod trainers;

// Re-export commonly used types
pub use app::FastaApp;
pub use bookings::BookingRecorder;
pub use messaging::ConversationLedger;
pub use session::SessionManager;
pub use store::RecordStore;
