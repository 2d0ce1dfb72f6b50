//! Outbound HTTP for the RFC handlers.
//!
//! Handlers talk to the network only through [`HttpFetcher`], so the
//! dispatcher can be exercised against an in-memory stub. The production
//! implementation, [`UreqFetcher`], builds a fresh agent for every call;
//! nothing is pooled or shared between requests.

use std::time::Duration;

use crate::errors::FetchError;

/// Timeout applied to every outbound request, connect through body read.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A single outbound GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    /// Query parameters, appended in order.
    pub query: Vec<(String, String)>,
    pub timeout: Duration,
}

impl FetchRequest {
    /// A GET of `url` with no query parameters and the default timeout.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Appends a query parameter.
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }
}

/// Blocking HTTP GET returning the response body as text.
///
/// Implementations map a 404 to [`FetchError::NotFound`], any other non-2xx
/// status to [`FetchError::Http`], and transport failures to
/// [`FetchError::Network`].
pub trait HttpFetcher: Send + Sync {
    fn get(&self, request: &FetchRequest) -> Result<String, FetchError>;
}

/// `HttpFetcher` backed by `ureq`.
#[derive(Debug, Clone)]
pub struct UreqFetcher {
    user_agent: String,
}

impl UreqFetcher {
    /// Creates a fetcher that identifies itself with `user_agent`.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }
}

impl HttpFetcher for UreqFetcher {
    fn get(&self, request: &FetchRequest) -> Result<String, FetchError> {
        // One agent per call; dropped on every exit path.
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(request.timeout))
            .build();
        let agent = ureq::Agent::new_with_config(config);

        let mut builder = agent
            .get(request.url.as_str())
            .header("User-Agent", self.user_agent.as_str());
        for (key, value) in &request.query {
            builder = builder.query(key, value);
        }

        let mut response = builder
            .call()
            .map_err(|e| map_ureq_error(&request.url, e))?;

        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| map_ureq_error(&request.url, e))?;
        Ok(decode_body(&bytes))
    }
}

/// Decodes a response body as UTF-8, replacing invalid sequences with
/// U+FFFD instead of failing.
pub fn decode_body(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn map_ureq_error(url: &str, err: ureq::Error) -> FetchError {
    match err {
        ureq::Error::StatusCode(404) => FetchError::NotFound {
            url: url.to_string(),
        },
        ureq::Error::StatusCode(status) => FetchError::Http {
            status,
            url: url.to_string(),
        },
        other => FetchError::Network {
            url: url.to_string(),
            message: other.to_string(),
        },
    }
}
