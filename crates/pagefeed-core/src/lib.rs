//! pagefeed Core Library
//!
//! Platform-independent parts of the incremental pagination loader: the
//! state machine, the fetcher and appender seams, endpoint templating,
//! configuration and error handling. Browser bindings live in
//! `pagefeed-wasm`.

pub mod appender;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod fetcher;
pub mod loader;
pub mod sentinel;
pub mod slug;

#[cfg(feature = "markup")]
pub use appender::MarkupList;
pub use appender::ContentAppender;
pub use config::{FailurePolicy, FeedConfig, ObserverConfig};
pub use endpoint::{EndpointTemplate, PageRequest};
pub use error::{Capability, FeedError, FetchError, Result};
pub use fetcher::{Fragment, PageFetcher, PageResult};
pub use loader::{
    ActiveLoader, Capabilities, ErrorHook, IgnoreReason, InertLoader, LoaderOptions, LoaderState,
    PageFailure, PaginationLoader, Phase, TriggerOutcome,
};
pub use sentinel::IntersectionTracker;
pub use slug::slugify;
