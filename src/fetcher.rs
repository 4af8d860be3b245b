//! Page fetcher abstraction for retrieving HTML content.

use async_trait::async_trait;

use crate::Result;

/// Trait for fetching the full HTML content of a URL.
///
/// All configuration (user-agent, timeout) is set at construction time;
/// `fetch` is a simple URL-in, HTML-out interface. A non-success HTTP
/// status is reported as an error, never returned as page content.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the HTML content of the given URL.
    async fn fetch(&self, url: &str) -> Result<String>;
}
