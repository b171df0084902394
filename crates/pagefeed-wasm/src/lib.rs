//! pagefeed WASM Runtime
//!
//! Browser bindings for the incremental pagination loader.
//!
//! # Features
//!
//! - **PageFeed**: appends server-rendered page fragments to a list as a
//!   sentinel element scrolls into view
//! - **Capability gate**: without `IntersectionObserver` or `fetch` the feed
//!   stays inert and never registers an observer
//! - **Slug field**: fills a slug input from a title input on blur
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { PageFeed, mountPictureFeed } from 'pagefeed-wasm';
//!
//! await init();
//!
//! // Default picture list wiring
//! mountPictureFeed();
//!
//! // Or explicit elements
//! const feed = new PageFeed(
//!   document.querySelector('ul.posts'),
//!   document.querySelector('#more'),
//!   { endpoint: '/posts/scrolling', failure_policy: 'retry_same_page' },
//! );
//! ```

pub mod capability;
pub mod dom;
pub mod error;
pub mod feed;
pub mod fetch;
pub mod observer;
pub mod slug_field;

pub use dom::DomList;
pub use error::BindingError;
pub use feed::{ErrorDetail, PICTURE_FEED_ENDPOINT, PageFeed, mount_feed, mount_picture_feed};
pub use fetch::HttpFetcher;
pub use observer::SentinelObserver;
pub use slug_field::{bind_slug_field, slugify};
use wasm_bindgen::prelude::*;

/// Initialize the WASM module.
///
/// Sets up the panic hook and routes log records to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Get the version of the pagefeed library.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
