//! Remote JSON fetching.
//!
//! The widget never retries and never surfaces a failed request to the user;
//! a failed fetch just means its overlay is missing. [`FetchError`] exists so
//! that callers who opt in can still see what went wrong.

pub mod loader;
pub mod transport;

pub use loader::JsonFetcher;
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport, TransportError};

use async_trait::async_trait;
use fxhash::FxHashMap;
use std::cell::RefCell;

/// Why a fetch produced no value
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }
}

/// In-memory transport serving canned responses keyed by full URL.
///
/// Unknown URLs answer 404. Every request is recorded so callers can check
/// what was asked for. Useful for offline snapshots and tests.
#[derive(Debug, Default)]
pub struct StaticTransport {
    responses: FxHashMap<String, Result<HttpResponse, String>>,
    requests: RefCell<Vec<String>>,
}

impl StaticTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, url: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.insert(url, status, body);
        self
    }

    pub fn with_json(self, url: &str, value: &serde_json::Value) -> Self {
        self.with_response(url, 200, value.to_string())
    }

    /// Makes `url` fail before any response arrives
    pub fn with_failure(mut self, url: &str, message: &str) -> Self {
        self.responses
            .insert(url.to_string(), Err(message.to_string()));
        self
    }

    pub fn insert(&mut self, url: &str, status: u16, body: impl Into<Vec<u8>>) {
        self.responses
            .insert(url.to_string(), Ok(HttpResponse::new(status, body)));
    }

    /// URLs requested so far, in request order
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl HttpTransport for StaticTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(url.to_string());
        match self.responses.get(url) {
            Some(Ok(resp)) => Ok(resp.clone()),
            Some(Err(message)) => Err(message.clone().into()),
            None => Ok(HttpResponse::new(404, Vec::new())),
        }
    }
}
