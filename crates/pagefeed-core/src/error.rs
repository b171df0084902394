//! Error types for the pagefeed core library.

use std::{fmt, path::PathBuf};

use thiserror::Error;

/// Result type alias using `FeedError`.
pub type Result<T> = std::result::Result<T, FeedError>;

/// A host capability the loader depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Viewport intersection observation (`IntersectionObserver`).
    VisibilityObserver,
    /// Network fetch (`fetch`).
    NetworkFetch,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::VisibilityObserver => f.write_str("IntersectionObserver"),
            Capability::NetworkFetch => f.write_str("fetch"),
        }
    }
}

/// Core error types for pagefeed.
#[derive(Error, Debug)]
pub enum FeedError {
    /// A required host capability is missing; the loader stays inert.
    #[error("Capability unavailable: {0}")]
    CapabilityUnavailable(Capability),

    /// Configuration loading or parsing error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration file could not be found.
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl FeedError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Why a single page could not be loaded.
///
/// None of these are fatal: the loader logs them, reports them to the
/// error hook and returns to idle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// The request never completed.
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// The response body could not be read as text.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl FetchError {
    /// Create a network failure error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkFailure(message.into())
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Short machine-readable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::HttpStatus(_) => "http_status",
            FetchError::NetworkFailure(_) => "network_failure",
            FetchError::Decode(_) => "decode",
        }
    }

    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus(code) => Some(*code),
            _ => None,
        }
    }
}
