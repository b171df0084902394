//! Loader configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    endpoint::EndpointTemplate,
    error::{FeedError, Result},
};

/// Configuration for one pagination feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Fragment endpoint, either a base URL or a template containing `{page}`.
    pub endpoint: String,

    /// Query parameter carrying the page number.
    #[serde(default = "default_page_param")]
    pub page_param: String,

    /// Selector of the list the fragments are appended to.
    #[serde(default = "default_container_selector")]
    pub container_selector: String,

    /// Selector of the element whose visibility triggers loading.
    #[serde(default = "default_sentinel_selector")]
    pub sentinel_selector: String,

    /// What happens to the page counter when a fetch fails.
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Visibility observer options.
    #[serde(default)]
    pub observer: ObserverConfig,

    /// Counter value before the first increment. The first request asks for
    /// `start_page + 1`.
    #[serde(default)]
    pub start_page: u32,
}

/// Page counter policy after a failed fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Keep the optimistic increment: the failed page is skipped.
    #[default]
    SkipPage,
    /// Roll the counter back so the next trigger asks for the same page.
    RetrySamePage,
}

/// Intersection observer options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserverConfig {
    /// Margin around the viewport, CSS syntax.
    #[serde(default = "default_root_margin")]
    pub root_margin: String,

    /// Visible ratio that counts as intersecting.
    #[serde(default)]
    pub threshold: f64,
}

fn default_page_param() -> String {
    "p".to_string()
}

fn default_container_selector() -> String {
    "ol.picture-list".to_string()
}

fn default_sentinel_selector() -> String {
    ".pagination".to_string()
}

fn default_root_margin() -> String {
    "0px".to_string()
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            root_margin: default_root_margin(),
            threshold: 0.0,
        }
    }
}

impl FeedConfig {
    /// Create a configuration for an endpoint with all other settings at
    /// their defaults.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            page_param: default_page_param(),
            container_selector: default_container_selector(),
            sentinel_selector: default_sentinel_selector(),
            failure_policy: FailurePolicy::default(),
            observer: ObserverConfig::default(),
            start_page: 0,
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FeedError::ConfigNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            FeedError::Toml(source) => FeedError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                source,
            ),
            other => other,
        })
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: FeedConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(FeedError::config("endpoint cannot be empty"));
        }

        if self.page_param.trim().is_empty() {
            return Err(FeedError::config("page_param cannot be empty"));
        }

        if !(0.0..=1.0).contains(&self.observer.threshold) {
            return Err(FeedError::config(format!(
                "observer.threshold must be within 0.0..=1.0, got {}",
                self.observer.threshold
            )));
        }

        if self.start_page == u32::MAX {
            return Err(FeedError::config("start_page leaves no page to load"));
        }

        Ok(())
    }

    /// Build the endpoint template for this configuration.
    pub fn endpoint_template(&self) -> EndpointTemplate {
        EndpointTemplate::parse(&self.endpoint, &self.page_param)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn create_test_config() -> String {
        r##"
endpoint = "/pictures/scrolling"
page_param = "page"
container_selector = "ul.gallery"
sentinel_selector = "#more"
failure_policy = "retry_same_page"
start_page = 2

[observer]
root_margin = "200px"
threshold = 0.5
"##
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("pagefeed.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = FeedConfig::load(&config_path).expect("load config");

        assert_eq!(config.endpoint, "/pictures/scrolling");
        assert_eq!(config.page_param, "page");
        assert_eq!(config.container_selector, "ul.gallery");
        assert_eq!(config.sentinel_selector, "#more");
        assert_eq!(config.failure_policy, FailurePolicy::RetrySamePage);
        assert_eq!(config.start_page, 2);
        assert_eq!(config.observer.root_margin, "200px");
        assert_eq!(config.observer.threshold, 0.5);
    }

    #[test]
    fn test_config_defaults() {
        let config = FeedConfig::from_toml_str(r#"endpoint = "/pictures/scrolling""#)
            .expect("parse config");

        assert_eq!(config, FeedConfig::new("/pictures/scrolling"));
        assert_eq!(config.page_param, "p");
        assert_eq!(config.container_selector, "ol.picture-list");
        assert_eq!(config.sentinel_selector, ".pagination");
        assert_eq!(config.failure_policy, FailurePolicy::SkipPage);
        assert_eq!(config.observer.root_margin, "0px");
        assert_eq!(config.observer.threshold, 0.0);
    }

    #[test]
    fn test_endpoint_template() {
        let config = FeedConfig::new("/pictures/scrolling");
        assert_eq!(config.endpoint_template().url_for(3), "/pictures/scrolling?p=3");
    }

    #[test]
    fn test_config_validation_empty_endpoint() {
        let result = FeedConfig::from_toml_str(r#"endpoint = "  ""#);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("endpoint cannot be empty")
        );
    }

    #[test]
    fn test_config_validation_threshold() {
        let mut config = FeedConfig::new("/feed");
        config.observer.threshold = 1.5;
        assert!(config.validate().is_err());

        config.observer.threshold = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_missing_endpoint() {
        let result = FeedConfig::from_toml_str("page_param = \"p\"");
        assert!(matches!(result, Err(FeedError::Toml(_))));
    }

    #[test]
    fn test_config_not_found() {
        let result = FeedConfig::load(Path::new("/nonexistent/pagefeed.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }
}
