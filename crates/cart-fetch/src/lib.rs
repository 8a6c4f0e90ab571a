//! HTTP client utilities for the cart inventory API.
//!
//! Provides a small GET request builder over a pluggable [`Transport`] with
//! JSON response handling.
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_fetch::FetchClient;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Stock {
//!     id: u64,
//!     amount: u32,
//! }
//!
//! let client = FetchClient::new().with_base_url("http://localhost:3333");
//!
//! let stock: Stock = client
//!     .get("/stock/1")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod error;
mod request;
mod response;
mod transport;

use std::collections::HashMap;
use std::sync::Arc;

pub use error::FetchError;
pub use request::RequestBuilder;
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};

/// HTTP client for making outbound requests.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    transport: Arc<dyn Transport>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a new HTTP client on a default [`ReqwestTransport`].
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::new())
    }

    /// Create a client that sends through `transport`.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
            transport: Arc::new(transport),
        }
    }

    /// Create a client with a base URL that will be prepended to relative paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Create a GET request. Relative paths are joined onto the base URL.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !url.starts_with("http://") && !url.starts_with("https://") => {
                format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    url.trim_start_matches('/')
                )
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            builder,
            transport: Arc::clone(&self.transport),
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        tracing::debug!(url = %self.builder.url, "sending GET request");
        let response = self.transport.send(self.builder).await?;
        tracing::debug!(status = response.status, "received response");
        Ok(response)
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Response, Transport};
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every request and answers with a fixed body.
    #[derive(Default)]
    struct Recorder {
        seen: Arc<Mutex<Vec<RequestBuilder>>>,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
            self.seen.lock().unwrap().push(request);
            Ok(Response::new(200, HashMap::new(), br#"{"amount":2}"#.to_vec()))
        }
    }

    fn client() -> (FetchClient, Arc<Mutex<Vec<RequestBuilder>>>) {
        let recorder = Recorder::default();
        let seen = Arc::clone(&recorder.seen);
        (FetchClient::with_transport(recorder), seen)
    }

    #[tokio::test]
    async fn test_base_url_joins_relative_paths() {
        let (client, seen) = client();
        let client = client.with_base_url("http://localhost:3333/");

        client.get("/stock/7").send().await.unwrap();
        client.get("products/7").send().await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].url(), "http://localhost:3333/stock/7");
        assert_eq!(seen[1].url(), "http://localhost:3333/products/7");
    }

    #[tokio::test]
    async fn test_absolute_url_bypasses_base() {
        let (client, seen) = client();
        let client = client.with_base_url("http://localhost:3333");

        client.get("https://cdn.example.com/stock/1").send().await.unwrap();

        assert_eq!(seen.lock().unwrap()[0].url(), "https://cdn.example.com/stock/1");
    }

    #[tokio::test]
    async fn test_default_headers_are_applied() {
        let (client, seen) = client();
        let client = client.with_default_header("Authorization", "Bearer abc");

        let response = client.get("http://api/stock/1").send().await.unwrap();
        assert!(response.is_success());

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].headers()["Authorization"], "Bearer abc");
    }
}
