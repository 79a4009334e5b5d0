//! Fetch-and-store and metadata extraction for fetch.
//!
//! Fetched documents are persisted in a [`DocumentStore`](fetch_storage::DocumentStore)
//! keyed by the hostname of the URL they came from ([`SiteKey`]). Metadata mode
//! re-parses a stored document and counts its links and images.
//!
//! # Architecture
//!
//! - [`SiteKey`]: URL to storage key
//! - [`Transport`] / [`UreqTransport`]: one blocking HTTP GET
//! - [`Fetcher`]: GET a URL and store the body under its site key
//! - [`traverse`]: depth-first counting over an element tree
//! - [`MetadataExtractor`]: stored document to [`Metadata`]
//! - [`run`]: process an [`Invocation`] sequentially, stopping at the first error
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use fetch_core::{Invocation, Mode, TransportOptions, UreqTransport, run};
//! use fetch_storage::FsDocumentStore;
//!
//! let store = FsDocumentStore::new(PathBuf::from("."));
//! let transport = UreqTransport::new(&TransportOptions::default());
//! let invocation = Invocation::new(vec!["https://example.com".to_owned()], Mode::Fetch);
//! run(&invocation, &transport, &store, &mut std::io::stdout().lock())?;
//! ```

mod error;
mod fetcher;
mod invocation;
mod metadata;
mod site;
mod transport;
pub mod traverse;

pub use error::Error;
pub use fetcher::Fetcher;
pub use invocation::{Invocation, Mode, run};
pub use metadata::{Metadata, MetadataExtractor};
pub use site::{ParseError, SiteKey, parse_url};
pub use transport::{HttpResponse, Transport, TransportError, TransportOptions, UreqTransport};
