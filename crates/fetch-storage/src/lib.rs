//! Document storage abstraction for fetch.
//!
//! This crate provides a [`DocumentStore`] trait for persisting fetched documents
//! keyed by site. This enables:
//!
//! - **Unit testing** of fetch and metadata logic without touching the real filesystem
//! - **Clean separation** between traversal/fetch logic and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`DocumentStore`] trait with `put()` and `get()` methods
//! - [`FsDocumentStore`] implementation writing `<key>.html` files into a directory
//! - [`MemoryDocumentStore`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use fetch_storage::{DocumentStore, FsDocumentStore};
//!
//! let store = FsDocumentStore::new(PathBuf::from("."));
//! store.put("example.com", b"<html></html>")?;
//! let doc = store.get("example.com")?;
//! ```

mod fs;
#[cfg(feature = "mock")]
mod memory;
mod store;

pub use fs::FsDocumentStore;
#[cfg(feature = "mock")]
pub use memory::MemoryDocumentStore;
pub use store::{DocumentStore, StorageError, StorageErrorKind, StoredDocument};
