use super::{transport::HttpTransport, FetchError};
use serde::de::DeserializeOwned;

/// Issues GET requests for JSON documents and decodes them.
///
/// Two entry points exist. [`JsonFetcher::get_json`] keeps the widget's
/// silent policy: the continuation runs once on a 200 with a decodable body
/// and is dropped otherwise. [`JsonFetcher::fetch`] returns the failure for
/// callers that want to observe it.
pub struct JsonFetcher<T> {
    transport: T,
    origin: Option<String>,
}

impl<T: HttpTransport> JsonFetcher<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            origin: None,
        }
    }

    /// Relative paths are resolved against this origin, e.g. `https://example.org`
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Turns a feed path into a request URL. Absolute URLs pass through.
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        match &self.origin {
            Some(origin) => format!(
                "{}/{}",
                origin.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
            None => path.to_string(),
        }
    }

    /// GETs `path` and decodes the body, reporting why nothing came back.
    pub async fn fetch<D: DeserializeOwned>(&self, path: &str) -> Result<D, FetchError> {
        let url = self.resolve(path);
        log::debug!("fetch {}", url);

        let resp = self
            .transport
            .get(&url)
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        if !resp.is_ok() {
            return Err(FetchError::Status {
                url,
                status: resp.status,
            });
        }

        let value = serde_json::from_slice(&resp.body)
            .map_err(|source| FetchError::Decode {
                url: url.clone(),
                source,
            })?;
        log::info!("loaded {} ({} bytes)", url, resp.body.len());
        Ok(value)
    }

    /// GETs `path` and hands the decoded body to `on_success`.
    ///
    /// Failures are logged at debug level and otherwise swallowed; the
    /// continuation is not called for them.
    pub async fn get_json<D, F>(&self, path: &str, on_success: F)
    where
        D: DeserializeOwned,
        F: FnOnce(D),
    {
        match self.fetch(path).await {
            Ok(value) => on_success(value),
            Err(e) => log::debug!("dropping response: {}", e),
        }
    }
}
