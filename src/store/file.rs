//! File-backed record store.
//!
//! One file per key, under a `durable/` and a `session/` subdirectory of the
//! store root. The session directory is emptied when the store is opened,
//! giving session-bound keys the lifetime of a single process.

use std::path::{Path, PathBuf};

use super::{RecordStore, Scope, StoreError};

/// Record store persisting each key as a file on disk.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (or create) a store rooted at the given directory.
    ///
    /// Clears any leftover session-bound entries from a previous process.
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        let store = Self {
            root: root.to_path_buf(),
        };

        for scope in [Scope::Durable, Scope::SessionBound] {
            std::fs::create_dir_all(store.scope_dir(scope))
                .map_err(|e| StoreError::IoError(e.to_string()))?;
        }
        store.clear_scope(Scope::SessionBound)?;

        Ok(store)
    }

    fn scope_dir(&self, scope: Scope) -> PathBuf {
        self.root.join(scope.to_string())
    }

    fn key_path(&self, scope: Scope, key: &str) -> PathBuf {
        self.scope_dir(scope).join(sanitize_key(key))
    }

    fn clear_scope(&self, scope: Scope) -> Result<(), StoreError> {
        let dir = self.scope_dir(scope);
        let entries = std::fs::read_dir(&dir).map_err(|e| StoreError::IoError(e.to_string()))?;
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::IoError(e.to_string()))?;
            if entry.path().is_file() {
                std::fs::remove_file(entry.path())
                    .map_err(|e| StoreError::IoError(e.to_string()))?;
            }
        }
        Ok(())
    }
}

/// Map a storage key to a safe file name.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '@' | '+') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl RecordStore for FileStore {
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.key_path(scope, key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::IoError(e.to_string())),
        }
    }

    fn set(&self, scope: Scope, key: &str, raw: &str) -> Result<(), StoreError> {
        std::fs::write(self.key_path(scope, key), raw)
            .map_err(|e| StoreError::IoError(e.to_string()))
    }

    fn remove(&self, scope: Scope, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.key_path(scope, key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::IoError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert!(store.get(Scope::Durable, "k").unwrap().is_none());

        store.set(Scope::Durable, "k", "value").unwrap();
        assert_eq!(store.get(Scope::Durable, "k").unwrap().as_deref(), Some("value"));

        // Scopes are independent
        assert!(store.get(Scope::SessionBound, "k").unwrap().is_none());

        store.remove(Scope::Durable, "k").unwrap();
        assert!(store.get(Scope::Durable, "k").unwrap().is_none());

        // Removing an absent key is fine
        store.remove(Scope::Durable, "k").unwrap();
    }

    #[test]
    fn test_session_scope_cleared_on_open() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::open(dir.path()).unwrap();
            store.set(Scope::SessionBound, "s", "gone").unwrap();
            store.set(Scope::Durable, "d", "kept").unwrap();
        }

        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.get(Scope::SessionBound, "s").unwrap().is_none());
        assert_eq!(store.get(Scope::Durable, "d").unwrap().as_deref(), Some("kept"));
    }

    #[test]
    fn test_key_sanitization_allows_emails() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        let key = "fasta_user_dana@example.com";
        store.set(Scope::Durable, key, "{}").unwrap();
        assert_eq!(store.get(Scope::Durable, key).unwrap().as_deref(), Some("{}"));
    }
}
