//! First-run demo data.
//!
//! Seeds a demo client account and one starter conversation so a fresh
//! install has something to show. Guarded by a durable sentinel key: the
//! seed runs once per store and never overwrites data created afterwards.

use std::sync::Arc;

use thiserror::Error;

use crate::accounts::{AccountError, AccountRecord, AccountRepository};
use crate::messaging::{Conversation, ConversationLedger, LedgerError, Message, Participant};
use crate::store::{keys, RecordStore, Scope, StoreError};
use crate::trainers::demo_trainers;

/// Email of the seeded demo client. Logs in with `password123`.
pub const DEMO_EMAIL: &str = "demo@fasta.fit";
pub const DEMO_PASSWORD: &str = "password123";

/// Seed demo data unless the store was already initialized.
///
/// Returns `true` if the seed ran.
pub fn initialize_demo_data(
    store: &Arc<dyn RecordStore>,
    accounts: &AccountRepository,
    ledger: &mut ConversationLedger,
) -> Result<bool, SeedError> {
    if store
        .get(Scope::Durable, keys::CONVERSATIONS_INITIALIZED)?
        .is_some()
    {
        return Ok(false);
    }

    let demo = demo_account();
    accounts.create(&demo)?;

    let trainer = &demo_trainers()[0];
    let client = Participant {
        id: demo.email.clone(),
        name: demo.full_name.clone(),
        photo_url: demo.photo_url.clone().unwrap_or_default(),
    };
    let counterpart = Participant {
        id: trainer.email.clone(),
        name: trainer.name.clone(),
        photo_url: trainer.photo_url.clone(),
    };

    let mut conversation = Conversation::new(client, counterpart);
    let mut welcome = Message::new(
        &trainer.email,
        "Hi! Thanks for reaching out. When would you like to start?",
    );
    // Authored by the trainer, so the demo client sees it as new.
    welcome.read = false;
    conversation.messages.push(welcome);
    ledger.replace_all(vec![conversation])?;

    store.set(Scope::Durable, keys::CONVERSATIONS_INITIALIZED, "true")?;
    tracing::info!(email = DEMO_EMAIL, "seeded demo data");
    Ok(true)
}

fn demo_account() -> AccountRecord {
    AccountRecord {
        verified: true,
        verification_code: None,
        photo_url: Some("https://picsum.photos/seed/demo/200/200".to_string()),
        ..AccountRecord::new(DEMO_EMAIL, "demo", "Demo User", DEMO_PASSWORD)
    }
}

/// Seeding errors.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
