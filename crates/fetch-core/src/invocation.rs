//! Sequential processing of a list of URLs.

use std::io::Write;

use fetch_storage::DocumentStore;

use crate::error::Error;
use crate::fetcher::Fetcher;
use crate::metadata::MetadataExtractor;
use crate::transport::Transport;

/// What to do with each URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// GET the URL and store the body.
    #[default]
    Fetch,
    /// Load the stored document and emit its metadata as a JSON line.
    Metadata,
}

/// One invocation of the tool: URLs in input order plus the mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// URLs to process, in order.
    pub urls: Vec<String>,
    /// Processing mode.
    pub mode: Mode,
}

impl Invocation {
    /// Create an invocation.
    #[must_use]
    pub fn new(urls: Vec<String>, mode: Mode) -> Self {
        Self { urls, mode }
    }
}

/// Process every URL of `invocation` in order, stopping at the first error.
///
/// Fetch mode writes documents to `store`. Metadata mode writes one JSON line
/// per URL to `out`. URLs after a failing one are not processed.
///
/// # Errors
///
/// Returns the first [`Error`] encountered.
pub fn run(
    invocation: &Invocation,
    transport: &dyn Transport,
    store: &dyn DocumentStore,
    out: &mut dyn Write,
) -> Result<(), Error> {
    tracing::debug!("urls: {:?}", invocation.urls);

    match invocation.mode {
        Mode::Fetch => {
            let fetcher = Fetcher::new(transport, store);
            for url in &invocation.urls {
                fetcher.fetch(url)?;
            }
        }
        Mode::Metadata => {
            let extractor = MetadataExtractor::new(store);
            for url in &invocation.urls {
                extractor.extract(url)?.write_json_line(out)?;
            }
            out.flush()?;
        }
    }
    Ok(())
}
