//! Filesystem storage implementation.
//!
//! Provides [`FsDocumentStore`], which keeps one `<key>.html` file per site
//! inside a root directory.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::store::{DocumentStore, StorageError, StorageErrorKind, StoredDocument};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// File extension appended to every site key.
const EXTENSION: &str = "html";

/// Filesystem document store.
///
/// Directory layout:
/// ```text
/// {root}/
/// +-- example.com.html
/// +-- docs.rs.html
/// ```
///
/// Files are created with mode `0600` on Unix.
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    /// Create a store rooted at `root`. The directory is not created.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root directory of the store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the document for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::InvalidKey`] if the key is empty or would
    /// escape the root directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        Self::validate_key(key)?;
        Ok(self.root.join(format!("{key}.{EXTENSION}")))
    }

    fn validate_key(key: &str) -> Result<(), StorageError> {
        let invalid = key.is_empty()
            || key == "."
            || key == ".."
            || key.contains(['/', '\\', '\0']);

        if invalid {
            return Err(StorageError::new(BACKEND, StorageErrorKind::InvalidKey, key));
        }
        Ok(())
    }
}

impl DocumentStore for FsDocumentStore {
    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options
            .open(&path)
            .map_err(|e| StorageError::from_io(BACKEND, key, e))?;
        file.write_all(bytes)
            .map_err(|e| StorageError::from_io(BACKEND, key, e))?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "stored document");
        Ok(())
    }

    fn get(&self, key: &str) -> Result<StoredDocument, StorageError> {
        let path = self.path_for(key)?;

        let bytes = fs::read(&path).map_err(|e| StorageError::from_io(BACKEND, key, e))?;
        let modified = fs::metadata(&path)
            .and_then(|m| m.modified())
            .map_err(|e| StorageError::from_io(BACKEND, key, e))?;

        Ok(StoredDocument { bytes, modified })
    }
}
