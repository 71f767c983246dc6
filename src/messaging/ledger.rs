//! The shared conversation ledger.
//!
//! All conversations live in one durable document, independent of any one
//! session. Every mutating operation persists the full ledger immediately;
//! a concurrent writer in another process replaces the whole collection
//! (last writer wins, accepted limitation).

use std::sync::Arc;

use thiserror::Error;

use super::types::{Conversation, Message, Participant};
use crate::store::{keys, RecordStore, Scope, StoreError};

/// In-memory view of the conversation ledger, backed by the record store.
pub struct ConversationLedger {
    store: Arc<dyn RecordStore>,
    conversations: Vec<Conversation>,
}

impl ConversationLedger {
    /// Load the ledger from the store.
    ///
    /// A corrupted ledger document is removed and replaced with an empty
    /// ledger rather than surfaced as an error.
    pub fn load(store: Arc<dyn RecordStore>) -> Result<Self, LedgerError> {
        let conversations = match store.get(Scope::Durable, keys::CONVERSATIONS)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(conversations) => conversations,
                Err(e) => {
                    tracing::warn!("discarding corrupted conversation ledger: {}", e);
                    store.remove(Scope::Durable, keys::CONVERSATIONS)?;
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Ok(Self {
            store,
            conversations,
        })
    }

    /// All conversations in the ledger.
    pub fn all(&self) -> &[Conversation] {
        &self.conversations
    }

    /// Conversations the given user participates in.
    pub fn conversations_for(&self, user_id: &str) -> Vec<Conversation> {
        self.conversations
            .iter()
            .filter(|c| c.has_participant(user_id))
            .cloned()
            .collect()
    }

    /// Look up a conversation by id.
    pub fn get(&self, conversation_id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == conversation_id)
    }

    /// Find the conversation between the two participants, creating it if
    /// absent. Identity is the unordered pair of participant ids, so
    /// `(a, b)` and `(b, a)` resolve to the same conversation.
    pub fn find_or_create(
        &mut self,
        a: &Participant,
        b: &Participant,
    ) -> Result<Conversation, LedgerError> {
        if let Some(existing) = self
            .conversations
            .iter()
            .find(|c| c.is_between(&a.id, &b.id))
        {
            return Ok(existing.clone());
        }

        let conversation = Conversation::new(a.clone(), b.clone());
        self.conversations.push(conversation.clone());
        self.persist()?;
        Ok(conversation)
    }

    /// Append a participant-authored message.
    pub fn append_message(
        &mut self,
        conversation_id: &str,
        sender_id: &str,
        content: &str,
    ) -> Result<Message, LedgerError> {
        let message = Message::new(sender_id, content);
        self.push_message(conversation_id, message)
    }

    /// Append a platform-emitted message. Unread until viewed.
    pub fn append_system_message(
        &mut self,
        conversation_id: &str,
        content: &str,
    ) -> Result<Message, LedgerError> {
        let message = Message::system(content);
        self.push_message(conversation_id, message)
    }

    fn push_message(
        &mut self,
        conversation_id: &str,
        message: Message,
    ) -> Result<Message, LedgerError> {
        let conversation = self
            .conversations
            .iter_mut()
            .find(|c| c.id == conversation_id)
            .ok_or_else(|| LedgerError::ConversationNotFound(conversation_id.to_string()))?;

        conversation.messages.push(message.clone());
        self.persist()?;
        Ok(message)
    }

    /// Mark every message not authored by the viewer as read. No-op if the
    /// conversation is absent.
    pub fn mark_read(&mut self, conversation_id: &str, viewer_id: &str) -> Result<(), LedgerError> {
        let Some(conversation) = self
            .conversations
            .iter_mut()
            .find(|c| c.id == conversation_id)
        else {
            return Ok(());
        };

        let mut changed = false;
        for message in &mut conversation.messages {
            if message.sender_id != viewer_id && !message.read {
                message.read = true;
                changed = true;
            }
        }

        if changed {
            self.persist()?;
        }
        Ok(())
    }

    /// Number of conversations holding at least one unread message not
    /// authored by the user. A conversation counts once regardless of how
    /// many unread messages it holds.
    pub fn unread_count_for(&self, user_id: &str) -> usize {
        self.conversations
            .iter()
            .filter(|c| c.has_participant(user_id) && c.has_unread_for(user_id))
            .count()
    }

    /// Replace the ledger contents wholesale (demo-data seeding).
    pub fn replace_all(&mut self, conversations: Vec<Conversation>) -> Result<(), LedgerError> {
        self.conversations = conversations;
        self.persist()
    }

    fn persist(&self) -> Result<(), LedgerError> {
        let raw = serde_json::to_string(&self.conversations)
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;
        self.store.set(Scope::Durable, keys::CONVERSATIONS, &raw)?;
        Ok(())
    }
}

/// Conversation ledger errors.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("conversation not found: {0}")]
    ConversationNotFound(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn participant(id: &str) -> Participant {
        Participant {
            id: id.to_string(),
            name: id.to_string(),
            photo_url: String::new(),
        }
    }

    fn ledger() -> ConversationLedger {
        ConversationLedger::load(Arc::new(MemoryStore::new())).unwrap()
    }

    #[test]
    fn test_find_or_create_is_idempotent_and_unordered() {
        let mut ledger = ledger();
        let a = participant("a@x.com");
        let b = participant("b@x.com");

        let first = ledger.find_or_create(&a, &b).unwrap();
        let second = ledger.find_or_create(&a, &b).unwrap();
        let swapped = ledger.find_or_create(&b, &a).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.id, swapped.id);
        assert_eq!(ledger.all().len(), 1);
    }

    #[test]
    fn test_append_to_unknown_conversation_fails() {
        let mut ledger = ledger();
        let err = ledger.append_message("conv-missing", "a@x.com", "hi");
        assert!(matches!(err, Err(LedgerError::ConversationNotFound(_))));
    }

    #[test]
    fn test_mark_read_flips_only_foreign_messages() {
        let mut ledger = ledger();
        let convo = ledger
            .find_or_create(&participant("a@x.com"), &participant("b@x.com"))
            .unwrap();

        ledger.append_message(&convo.id, "a@x.com", "hello").unwrap();
        ledger.append_system_message(&convo.id, "booked").unwrap();

        assert_eq!(ledger.unread_count_for("a@x.com"), 1);

        ledger.mark_read(&convo.id, "a@x.com").unwrap();
        let convo = ledger.get(&convo.id).unwrap();
        assert!(convo.messages.iter().all(|m| m.read));
        assert_eq!(ledger.unread_count_for("a@x.com"), 0);
    }

    #[test]
    fn test_mark_read_on_missing_conversation_is_noop() {
        let mut ledger = ledger();
        ledger.mark_read("conv-missing", "a@x.com").unwrap();
    }

    #[test]
    fn test_unread_count_counts_conversations_not_messages() {
        let mut ledger = ledger();
        let convo = ledger
            .find_or_create(&participant("a@x.com"), &participant("b@x.com"))
            .unwrap();

        for _ in 0..3 {
            ledger.append_system_message(&convo.id, "update").unwrap();
        }
        assert_eq!(ledger.unread_count_for("a@x.com"), 1);

        let other = ledger
            .find_or_create(&participant("a@x.com"), &participant("c@x.com"))
            .unwrap();
        ledger.append_system_message(&other.id, "update").unwrap();
        assert_eq!(ledger.unread_count_for("a@x.com"), 2);

        // Not a participant: nothing to count.
        assert_eq!(ledger.unread_count_for("z@x.com"), 0);
    }

    #[test]
    fn test_mutations_persist_and_reload() {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
        let mut ledger = ConversationLedger::load(Arc::clone(&store)).unwrap();
        let convo = ledger
            .find_or_create(&participant("a@x.com"), &participant("b@x.com"))
            .unwrap();
        ledger.append_message(&convo.id, "a@x.com", "hi").unwrap();

        let reloaded = ConversationLedger::load(store).unwrap();
        assert_eq!(reloaded.all().len(), 1);
        assert_eq!(reloaded.get(&convo.id).unwrap().messages.len(), 1);
    }

    #[test]
    fn test_corrupted_ledger_recovers_empty() {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
        store
            .set(Scope::Durable, keys::CONVERSATIONS, "{not json")
            .unwrap();

        let ledger = ConversationLedger::load(Arc::clone(&store)).unwrap();
        assert!(ledger.all().is_empty());
        // Corrupted key was removed.
        assert!(store
            .get(Scope::Durable, keys::CONVERSATIONS)
            .unwrap()
            .is_none());
    }
}
