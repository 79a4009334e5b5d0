//! URL to site key resolution.

use std::fmt;

use url::{Host, Url};

/// URL parse failure.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Not a syntactically valid absolute URL.
    #[error(transparent)]
    Url(#[from] url::ParseError),
    /// Valid URL without a host component (e.g. `mailto:`, `file:///`).
    #[error("URL has no host")]
    MissingHost,
}

/// Parse an absolute URL.
///
/// # Errors
///
/// Returns [`ParseError::Url`] if `input` is not a valid absolute URL.
pub fn parse_url(input: &str) -> Result<Url, ParseError> {
    Ok(Url::parse(input)?)
}

/// Storage key for a document: the hostname of the URL it was fetched from.
///
/// Derived only from the URL's host, so every URL on the same host maps to
/// the same key regardless of scheme, port, path, query, or fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SiteKey(String);

impl SiteKey {
    /// Resolve the site key of a URL string.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if `input` is not a valid URL or has no host.
    pub fn resolve(input: &str) -> Result<Self, ParseError> {
        Self::from_url(&parse_url(input)?)
    }

    /// Site key of an already parsed URL.
    ///
    /// IPv6 hosts are returned without brackets.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingHost`] if the URL has no host.
    pub fn from_url(url: &Url) -> Result<Self, ParseError> {
        let host = match url.host() {
            Some(Host::Domain(domain)) => domain.to_owned(),
            Some(Host::Ipv4(addr)) => addr.to_string(),
            Some(Host::Ipv6(addr)) => addr.to_string(),
            None => return Err(ParseError::MissingHost),
        };
        Ok(Self(host))
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the hostname.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for SiteKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
