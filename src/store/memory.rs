//! In-memory record store (for testing).

use std::collections::HashMap;
use std::sync::Mutex;

use super::{RecordStore, Scope, StoreError};

/// Record store backed by in-memory maps, one per scope.
#[derive(Default)]
pub struct MemoryStore {
    durable: Mutex<HashMap<String, String>>,
    session: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, scope: Scope) -> &Mutex<HashMap<String, String>> {
        match scope {
            Scope::Durable => &self.durable,
            Scope::SessionBound => &self.session,
        }
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.map(scope).lock().unwrap().get(key).cloned())
    }

    fn set(&self, scope: Scope, key: &str, raw: &str) -> Result<(), StoreError> {
        self.map(scope)
            .lock()
            .unwrap()
            .insert(key.to_string(), raw.to_string());
        Ok(())
    }

    fn remove(&self, scope: Scope, key: &str) -> Result<(), StoreError> {
        self.map(scope).lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scopes_are_independent() {
        let store = MemoryStore::new();
        store.set(Scope::Durable, "k", "a").unwrap();
        store.set(Scope::SessionBound, "k", "b").unwrap();

        assert_eq!(store.get(Scope::Durable, "k").unwrap().as_deref(), Some("a"));
        assert_eq!(store.get(Scope::SessionBound, "k").unwrap().as_deref(), Some("b"));

        store.remove(Scope::Durable, "k").unwrap();
        assert!(store.get(Scope::Durable, "k").unwrap().is_none());
        assert_eq!(store.get(Scope::SessionBound, "k").unwrap().as_deref(), Some("b"));
    }
}
