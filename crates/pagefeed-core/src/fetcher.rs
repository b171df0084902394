//! Page fetching.

use std::rc::Rc;

use crate::error::FetchError;

/// A page's worth of markup, handed to the appender untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    /// Wrap a markup string.
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// The raw markup.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the fragment holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for Fragment {
    fn from(markup: String) -> Self {
        Self(markup)
    }
}

impl From<&str> for Fragment {
    fn from(markup: &str) -> Self {
        Self(markup.to_string())
    }
}

/// Result of fetching one page.
pub type PageResult = std::result::Result<Fragment, FetchError>;

/// Fetches page fragments.
///
/// Implementations issue one request per call and have no side effects
/// beyond it; calling twice with the same page re-issues an equivalent
/// request.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// Fetch the fragment for `page`.
    async fn fetch_page(&self, page: u32) -> PageResult;
}

impl<F: PageFetcher> PageFetcher for Rc<F> {
    async fn fetch_page(&self, page: u32) -> PageResult {
        (**self).fetch_page(page).await
    }
}
