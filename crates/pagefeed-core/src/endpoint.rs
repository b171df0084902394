//! Page URL construction.

/// Placeholder replaced by the page number in templated endpoints.
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// A page request derived from the loader state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number being requested, starting at 1.
    pub page: u32,

    /// Loader epoch captured when the request was issued.
    pub epoch: u64,
}

/// Endpoint that yields one URL per page number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointTemplate {
    /// Endpoint containing one or more `{page}` placeholders.
    Placeholder(String),

    /// Base URL that gets `?param=N` or `&param=N` appended.
    Query { base: String, param: String },
}

impl EndpointTemplate {
    /// Interpret an endpoint string.
    pub fn parse(endpoint: &str, page_param: &str) -> Self {
        if endpoint.contains(PAGE_PLACEHOLDER) {
            Self::Placeholder(endpoint.to_string())
        } else {
            Self::Query {
                base: endpoint.to_string(),
                param: page_param.to_string(),
            }
        }
    }

    /// URL for a given page.
    pub fn url_for(&self, page: u32) -> String {
        match self {
            EndpointTemplate::Placeholder(template) => {
                template.replace(PAGE_PLACEHOLDER, &page.to_string())
            }
            EndpointTemplate::Query { base, param } => {
                let separator = if base.ends_with('?') || base.ends_with('&') {
                    ""
                } else if base.contains('?') {
                    "&"
                } else {
                    "?"
                };
                format!("{base}{separator}{param}={page}")
            }
        }
    }
}
