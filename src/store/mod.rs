//! Key-value persistence over two storage scopes.
//!
//! Every persisted collection in the application (account records, the
//! active session, the conversation ledger, the booking list) lives behind
//! this abstraction as a raw JSON string. The store performs no validation;
//! callers serialize and deserialize, and a parse failure on read is a
//! recoverable condition handled by the consuming component (log, remove
//! the corrupted key, fall back to a default value).

pub mod file;
pub mod keys;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Storage scope for a persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Survives restarts of the application.
    Durable,
    /// Cleared when the session ends.
    SessionBound,
}

impl Scope {
    /// The opposite scope.
    pub fn other(&self) -> Scope {
        match self {
            Scope::Durable => Scope::SessionBound,
            Scope::SessionBound => Scope::Durable,
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Durable => write!(f, "durable"),
            Scope::SessionBound => write!(f, "session"),
        }
    }
}

/// Raw key-value persistence over the two storage scopes.
pub trait RecordStore: Send + Sync {
    /// Read the raw value for a key, or `None` if absent.
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>, StoreError>;

    /// Write the raw value for a key, replacing any previous value.
    fn set(&self, scope: Scope, key: &str, raw: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, scope: Scope, key: &str) -> Result<(), StoreError>;
}

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(String),
}
