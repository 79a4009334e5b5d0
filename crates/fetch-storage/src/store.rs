//! Document store trait and error types.
//!
//! Provides the core [`DocumentStore`] trait for persisting documents under a
//! site key, along with [`StorageError`] for unified error handling across backends.
//!
//! # Key Convention
//!
//! All key parameters are **site keys**: the hostname a document was fetched
//! from (e.g. `"example.com"`). Backends map keys to their own storage layout.

use std::time::SystemTime;

/// A document read back from a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    /// Raw document bytes, exactly as written.
    pub bytes: Vec<u8>,
    /// Last modification time of the stored document at the moment of the read.
    pub modified: SystemTime,
}

/// What went wrong with a store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// No document is stored under the key.
    NotFound,
    /// The backend refused access.
    PermissionDenied,
    /// Key cannot be mapped to a storage location.
    InvalidKey,
    /// Any other I/O failure.
    Other,
}

impl std::fmt::Display for StorageErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::NotFound => "no document",
            Self::PermissionDenied => "permission denied",
            Self::InvalidKey => "invalid key",
            Self::Other => "I/O failure",
        })
    }
}

/// Failure of a [`DocumentStore`] operation on one key.
#[derive(Debug)]
pub struct StorageError {
    /// Failure category.
    pub kind: StorageErrorKind,
    /// Site key the operation was for.
    pub key: String,
    /// Backend that failed (`"Fs"`, `"Memory"`).
    pub backend: &'static str,
    source: Option<std::io::Error>,
}

impl StorageError {
    /// Create an error without an underlying cause.
    #[must_use]
    pub fn new(backend: &'static str, kind: StorageErrorKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
            backend,
            source: None,
        }
    }

    /// Nothing is stored under `key`.
    #[must_use]
    pub fn not_found(backend: &'static str, key: impl Into<String>) -> Self {
        Self::new(backend, StorageErrorKind::NotFound, key)
    }

    /// Classify an I/O failure on `key` and keep it as the cause.
    #[must_use]
    pub fn from_io(backend: &'static str, key: impl Into<String>, err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        Self {
            source: Some(err),
            ..Self::new(backend, kind, key)
        }
    }

    /// Underlying I/O error, if any.
    #[must_use]
    pub fn io_source(&self) -> Option<&std::io::Error> {
        self.source.as_ref()
    }

    /// True if the error means nothing is stored under the key.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // "Fs store: no document for example.com: No such file or directory (os error 2)"
        write!(f, "{} store: {} for {}", self.backend, self.kind, self.key)?;
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}

/// Key/value persistence for fetched documents.
///
/// At most one document exists per key. A `put` unconditionally replaces
/// whatever was stored before; there is no history.
///
/// Writes are not atomic. A crash mid-write may leave a partial document
/// behind, which a later `put` for the same key overwrites.
pub trait DocumentStore: Send + Sync {
    /// Store `bytes` under `key`, creating or truncating as needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the key is invalid or the write fails
    /// (permission denied, disk full).
    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Read the document stored under `key` and its modification time.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] with [`StorageErrorKind::NotFound`] if nothing
    /// is stored under `key`, or another kind if the read fails.
    fn get(&self, key: &str) -> Result<StoredDocument, StorageError>;
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::io;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_not_found_has_no_cause() {
        let err = StorageError::not_found("Memory", "example.com");

        assert!(err.is_not_found());
        assert_eq!(err.key, "example.com");
        assert!(err.io_source().is_none());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_from_io_classifies_kind() {
        let cases = [
            (io::ErrorKind::NotFound, StorageErrorKind::NotFound),
            (io::ErrorKind::PermissionDenied, StorageErrorKind::PermissionDenied),
            (io::ErrorKind::StorageFull, StorageErrorKind::Other),
        ];

        for (io_kind, expected) in cases {
            let err = StorageError::from_io("Fs", "example.com", io::Error::from(io_kind));
            assert_eq!(err.kind, expected, "{io_kind:?}");
        }
    }

    #[test]
    fn test_from_io_keeps_cause() {
        let err = StorageError::from_io("Fs", "example.com", io::Error::other("disk on fire"));

        assert_eq!(err.io_source().map(ToString::to_string).as_deref(), Some("disk on fire"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_display_without_cause() {
        let err = StorageError::new("Fs", StorageErrorKind::InvalidKey, "../etc");

        assert_eq!(err.to_string(), "Fs store: invalid key for ../etc");
    }

    #[test]
    fn test_display_with_cause() {
        let err = StorageError::from_io(
            "Fs",
            "example.com",
            io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        );

        assert_eq!(
            err.to_string(),
            "Fs store: permission denied for example.com: access denied"
        );
    }

    #[test]
    fn test_storage_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StorageError>();
    }
}
