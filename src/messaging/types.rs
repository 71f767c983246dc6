//! Core types for messaging.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sender id used for messages emitted by the platform itself.
pub const SYSTEM_SENDER: &str = "system";

/// One side of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Email of the participant.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub photo_url: String,
}

/// A single message in a conversation.
///
/// Immutable once created, except for the one-way `read` transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    /// Email of the sender, or [`SYSTEM_SENDER`].
    pub sender_id: String,
    pub content: String,
    /// ISO-8601 timestamp.
    pub timestamp: String,
    pub read: bool,
}

impl Message {
    /// Create a message from a participant. The sender always sees their
    /// own message as read.
    pub fn new(sender_id: &str, content: &str) -> Self {
        Self {
            id: format!("msg-{}", Uuid::new_v4()),
            sender_id: sender_id.to_string(),
            content: content.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            read: true,
        }
    }

    /// Create a platform-emitted message. Unread until viewed.
    pub fn system(content: &str) -> Self {
        Self {
            id: format!("msg-sys-{}", Uuid::new_v4()),
            sender_id: SYSTEM_SENDER.to_string(),
            content: content.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            read: false,
        }
    }
}

/// A conversation between exactly two participants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub participants: Vec<Participant>,
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Create an empty conversation with a fresh opaque id. Participants
    /// keep the supplied order.
    pub fn new(a: Participant, b: Participant) -> Self {
        Self {
            id: format!("conv-{}", Uuid::new_v4()),
            participants: vec![a, b],
            messages: Vec::new(),
        }
    }

    /// Whether the given id is one of the participants.
    pub fn has_participant(&self, id: &str) -> bool {
        self.participants.iter().any(|p| p.id == id)
    }

    /// Conversation identity is the unordered pair of participant ids.
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        self.has_participant(a) && self.has_participant(b)
    }

    /// The participant other than the given viewer, if any.
    pub fn counterpart(&self, viewer_id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id != viewer_id)
    }

    /// Whether the conversation holds a message the viewer has not read,
    /// authored by someone else.
    pub fn has_unread_for(&self, viewer_id: &str) -> bool {
        self.messages
            .iter()
            .any(|m| !m.read && m.sender_id != viewer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(id: &str) -> Participant {
        Participant {
            id: id.to_string(),
            name: id.to_string(),
            photo_url: String::new(),
        }
    }

    #[test]
    fn test_is_between_ignores_order() {
        let convo = Conversation::new(participant("a@x.com"), participant("b@x.com"));
        assert!(convo.is_between("a@x.com", "b@x.com"));
        assert!(convo.is_between("b@x.com", "a@x.com"));
        assert!(!convo.is_between("a@x.com", "c@x.com"));
    }

    #[test]
    fn test_system_message_starts_unread() {
        let msg = Message::system("hello");
        assert_eq!(msg.sender_id, SYSTEM_SENDER);
        assert!(!msg.read);
    }

    #[test]
    fn test_own_message_starts_read() {
        let msg = Message::new("a@x.com", "hi");
        assert!(msg.read);
    }

    #[test]
    fn test_unread_ignores_own_messages() {
        let mut convo = Conversation::new(participant("a@x.com"), participant("b@x.com"));
        convo.messages.push(Message::new("a@x.com", "hi"));
        assert!(!convo.has_unread_for("a@x.com"));
        assert!(!convo.has_unread_for("b@x.com")); // sender-read flag, not b's

        let mut foreign = Message::new("b@x.com", "hey");
        foreign.read = false;
        convo.messages.push(foreign);
        assert!(convo.has_unread_for("a@x.com"));
        assert!(!convo.has_unread_for("b@x.com"));
    }
}
