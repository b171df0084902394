//! `fetch`-backed page fetcher.

use gloo_net::http::Request;
use pagefeed_core::{EndpointTemplate, FetchError, Fragment, PageFetcher, PageResult};
use web_sys::{RequestCredentials, RequestMode};

/// Fetches page fragments from a same-origin endpoint.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    endpoint: EndpointTemplate,
}

impl HttpFetcher {
    /// Create a fetcher for an endpoint.
    pub fn new(endpoint: EndpointTemplate) -> Self {
        Self { endpoint }
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, page: u32) -> PageResult {
        let url = self.endpoint.url_for(page);

        let response = Request::get(&url)
            .mode(RequestMode::SameOrigin)
            .credentials(RequestCredentials::SameOrigin)
            .send()
            .await
            .map_err(|e| FetchError::network(e.to_string()))?;

        if !response.ok() {
            return Err(FetchError::HttpStatus(response.status()));
        }

        let markup = response
            .text()
            .await
            .map_err(|e| FetchError::decode(e.to_string()))?;

        Ok(Fragment::new(markup))
    }
}
