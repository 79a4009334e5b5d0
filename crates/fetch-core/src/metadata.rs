//! Metadata derived from a stored document.

use std::io::Write;

use chrono::{DateTime, Utc};
use fetch_storage::DocumentStore;
use scraper::Html;
use serde::Serialize;

use crate::error::Error;
use crate::site::SiteKey;
use crate::traverse::{self, Predicate};

/// Description of a stored document. Computed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    /// Site key of the document.
    pub site: String,
    /// Number of `<a>` elements with an `href`.
    pub num_links: usize,
    /// Number of `<img>` elements with a `src`.
    pub images: usize,
    /// Modification time of the stored document.
    pub last_fetch: DateTime<Utc>,
}

impl Metadata {
    /// Write the record as one JSON line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] or [`Error::Emit`] if the record cannot be
    /// encoded or written.
    pub fn write_json_line(&self, out: &mut dyn Write) -> Result<(), Error> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        out.write_all(&line)?;
        Ok(())
    }
}

/// Builds [`Metadata`] from documents in a [`DocumentStore`].
pub struct MetadataExtractor<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> MetadataExtractor<'a> {
    /// Create an extractor reading from `store`.
    #[must_use]
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Extract metadata for the document previously fetched from `url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for an unusable URL, [`Error::NotFetched`] if
    /// the site has no stored document, and [`Error::StorageRead`] if the
    /// document cannot be read.
    pub fn extract(&self, url: &str) -> Result<Metadata, Error> {
        let site = SiteKey::resolve(url).map_err(|source| Error::Parse {
            url: url.to_owned(),
            source,
        })?;

        let document = self.store.get(site.as_str()).map_err(|source| {
            if source.is_not_found() {
                Error::NotFetched {
                    site: site.to_string(),
                    source,
                }
            } else {
                Error::StorageRead {
                    site: site.to_string(),
                    source,
                }
            }
        })?;

        let html = parse_document(&document.bytes);
        let root = html.tree.root();
        let num_links = traverse::count(root, &Predicate::LINKS);
        let images = traverse::count(root, &Predicate::IMAGES);

        Ok(Metadata {
            site: site.into_string(),
            num_links,
            images,
            last_fetch: document.modified.into(),
        })
    }
}

/// Parse stored bytes as HTML.
///
/// Invalid UTF-8 is replaced rather than rejected, and the parser recovers
/// from malformed markup, so parsing always produces a tree.
fn parse_document(bytes: &[u8]) -> Html {
    let html = Html::parse_document(&String::from_utf8_lossy(bytes));
    if !html.errors.is_empty() {
        tracing::debug!(errors = html.errors.len(), "recovered from HTML parse errors");
    }
    html
}
