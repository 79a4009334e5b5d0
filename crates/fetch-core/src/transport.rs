//! Blocking HTTP transport.
//!
//! [`Transport`] is the seam between the fetcher and the network so that
//! fetch logic can be tested with a stub. [`UreqTransport`] is the real client.

use std::time::Duration;

use ureq::Agent;

/// Boxed transport failure.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Fully buffered HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code. Never validated by the fetcher.
    pub status: u16,
    /// Complete response body.
    pub body: Vec<u8>,
}

/// One blocking HTTP GET.
pub trait Transport: Send + Sync {
    /// GET `url` and buffer the whole body.
    ///
    /// Non-2xx statuses are returned as responses, not errors.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on transport-level failure (DNS, connection
    /// refused, timeout, body read failure).
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// Options for [`UreqTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportOptions {
    /// Global per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: format!("fetch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// [`Transport`] backed by a `ureq` agent.
pub struct UreqTransport {
    agent: Agent,
    user_agent: String,
}

impl UreqTransport {
    /// Create a transport from options.
    #[must_use]
    pub fn new(options: &TransportOptions) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(options.timeout)
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            user_agent: options.user_agent.clone(),
        }
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self
            .agent
            .get(url)
            .header("User-Agent", &self.user_agent)
            .call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();
        let body = body_reader.with_config().limit(u64::MAX).read_to_vec()?;

        tracing::debug!(url, status, bytes = body.len(), "received response");
        Ok(HttpResponse { status, body })
    }
}
