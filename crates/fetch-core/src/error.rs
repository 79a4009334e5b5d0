//! Error types for fetch and metadata operations.

use fetch_storage::StorageError;

use crate::site::ParseError;
use crate::transport::TransportError;

/// Error from a fetch or metadata operation.
///
/// Every variant is terminal for the invocation that produced it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input is not a usable URL.
    #[error("invalid URL {url:?}: {source}")]
    Parse {
        /// URL as given.
        url: String,
        /// Underlying parse failure.
        source: ParseError,
    },

    /// Transport-level failure (DNS, connection refused, timeout, broken body).
    #[error("failed to fetch {url}: {source}")]
    Network {
        /// URL being fetched.
        url: String,
        /// Underlying transport failure.
        source: TransportError,
    },

    /// The fetched body could not be persisted.
    #[error("failed to store document for {site}: {source}")]
    StorageWrite {
        /// Site key the document was written under.
        site: String,
        /// Underlying storage failure.
        source: StorageError,
    },

    /// Metadata was requested for a site with no stored document.
    #[error("{site} has not been fetched yet: {source}")]
    NotFetched {
        /// Site key that was looked up.
        site: String,
        /// The store's not-found error.
        source: StorageError,
    },

    /// The stored document exists but could not be read.
    #[error("failed to read stored document for {site}: {source}")]
    StorageRead {
        /// Site key that was looked up.
        site: String,
        /// Underlying storage failure.
        source: StorageError,
    },

    /// Metadata could not be encoded as JSON.
    #[error("failed to encode metadata: {0}")]
    Encode(#[from] serde_json::Error),

    /// Metadata could not be written to the output.
    #[error("failed to write metadata: {0}")]
    Emit(#[from] std::io::Error),
}
