//! In-memory storage implementation for testing.
//!
//! Provides [`MemoryDocumentStore`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::SystemTime;

use crate::store::{DocumentStore, StorageError, StoredDocument};

/// Backend identifier for error messages.
const BACKEND: &str = "Memory";

/// In-memory document store for testing.
///
/// Use the builder methods to seed the store with documents.
///
/// # Example
///
/// ```ignore
/// use std::time::SystemTime;
/// use fetch_storage::{DocumentStore, MemoryDocumentStore};
///
/// let store = MemoryDocumentStore::new()
///     .with_document("example.com", "<a href=\"/\">home</a>", SystemTime::UNIX_EPOCH);
///
/// let doc = store.get("example.com").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<String, StoredDocument>>,
}

impl MemoryDocumentStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document with an explicit modification time.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_document(
        self,
        key: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
        modified: SystemTime,
    ) -> Self {
        self.documents.write().unwrap().insert(
            key.into(),
            StoredDocument {
                bytes: bytes.into(),
                modified,
            },
        );
        self
    }

    /// Keys of all stored documents, sorted.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.documents.read().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// True if a document is stored under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.documents.read().unwrap().contains_key(key)
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.documents.write().unwrap().insert(
            key.to_owned(),
            StoredDocument {
                bytes: bytes.to_vec(),
                modified: SystemTime::now(),
            },
        );
        Ok(())
    }

    fn get(&self, key: &str) -> Result<StoredDocument, StorageError> {
        self.documents
            .read()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(BACKEND, key))
    }
}
