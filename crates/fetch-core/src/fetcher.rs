//! Fetch a URL and store its body under the URL's site key.

use fetch_storage::DocumentStore;
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::site::{SiteKey, parse_url};
use crate::transport::Transport;

/// Fetches documents over a [`Transport`] into a [`DocumentStore`].
pub struct Fetcher<'a> {
    transport: &'a dyn Transport,
    store: &'a dyn DocumentStore,
}

impl<'a> Fetcher<'a> {
    /// Create a fetcher.
    #[must_use]
    pub fn new(transport: &'a dyn Transport, store: &'a dyn DocumentStore) -> Self {
        Self { transport, store }
    }

    /// GET `url` and store the unmodified body under its site key.
    ///
    /// The HTTP status is not validated: an error page is stored like any
    /// other body. Statuses of 400 and above are logged as warnings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for an unusable URL, [`Error::Network`] on
    /// transport failure, and [`Error::StorageWrite`] if the body cannot be stored.
    pub fn fetch(&self, url: &str) -> Result<SiteKey, Error> {
        debug!("url: {url}");
        let parse_error = |source| Error::Parse {
            url: url.to_owned(),
            source,
        };
        let parsed = parse_url(url).map_err(parse_error)?;
        let site = SiteKey::from_url(&parsed).map_err(parse_error)?;

        let response = self
            .transport
            .get(parsed.as_str())
            .map_err(|source| Error::Network {
                url: url.to_owned(),
                source,
            })?;

        if response.status >= 400 {
            warn!(
                status = response.status,
                "{url} returned an error status, storing the body anyway"
            );
        }

        self.store
            .put(site.as_str(), &response.body)
            .map_err(|source| Error::StorageWrite {
                site: site.to_string(),
                source,
            })?;

        info!(site = %site, bytes = response.body.len(), "fetched {url}");
        Ok(site)
    }
}
