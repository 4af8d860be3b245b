//! Paginated search request generation.

use serde::{Deserialize, Serialize};

/// Search endpoint queried for image result pages.
pub const SEARCH_ENDPOINT: &str = "https://www.google.co.jp/search";

/// A single result-page request for one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// The search keyword.
    pub keyword: String,
    /// Page index, starting at 0.
    pub page: u32,
    endpoint: String,
}

impl PageRequest {
    /// Renders the full GET URL for this page.
    pub fn url(&self) -> String {
        format!(
            "{}?q={}&tbm=isch&ijn={}",
            self.endpoint,
            urlencoding::encode(&self.keyword),
            self.page
        )
    }
}

/// Infinite generator of page requests for one keyword.
///
/// Implements `Iterator` and never yields `None`; deciding when to stop is
/// the consumer's job. A fresh source always starts again at page 0.
#[derive(Debug, Clone)]
pub struct PageQuerySource {
    keyword: String,
    endpoint: String,
    next_page: u32,
}

impl PageQuerySource {
    /// Creates a source for the given keyword, starting at page 0.
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            endpoint: SEARCH_ENDPOINT.to_string(),
            next_page: 0,
        }
    }

    /// Overrides the search endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Iterator for PageQuerySource {
    type Item = PageRequest;

    fn next(&mut self) -> Option<PageRequest> {
        let request = PageRequest {
            keyword: self.keyword.clone(),
            page: self.next_page,
            endpoint: self.endpoint.clone(),
        };
        self.next_page += 1;
        Some(request)
    }
}
