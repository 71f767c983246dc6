//! Conversations between clients and trainers.

pub mod ledger;
pub mod types;

pub use ledger::{ConversationLedger, LedgerError};
pub use types::{Conversation, Message, Participant, SYSTEM_SENDER};
