//! The JavaScript-facing pagination feed.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use pagefeed_core::{FeedConfig, PageFailure, PaginationLoader, Phase, TriggerOutcome};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, IntersectionObserver};

use crate::{
    capability,
    dom::{self, DomList},
    error::BindingError,
    fetch::HttpFetcher,
    observer::SentinelObserver,
};

/// Endpoint serving picture list fragments.
pub const PICTURE_FEED_ENDPOINT: &str = "/pictures/scrolling";

type DomLoader = PaginationLoader<HttpFetcher, DomList>;

/// Failure details handed to the `onError` callback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDetail {
    /// Page that failed.
    pub page: u32,
    /// `http_status`, `network_failure` or `decode`.
    pub kind: &'static str,
    /// HTTP status, when the server answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Human-readable message.
    pub message: String,
}

impl From<&PageFailure> for ErrorDetail {
    fn from(failure: &PageFailure) -> Self {
        Self {
            page: failure.page,
            kind: failure.error.kind(),
            status: failure.error.status(),
            message: failure.error.to_string(),
        }
    }
}

/// Infinite-scroll loader bound to a container and a sentinel element.
///
/// ```javascript
/// const feed = new PageFeed(list, sentinel, { endpoint: "/pictures/scrolling" });
/// feed.onError((detail) => console.warn(detail));
/// // later
/// feed.stop();
/// ```
#[wasm_bindgen]
pub struct PageFeed {
    loader: Rc<DomLoader>,
    observer: Rc<RefCell<Option<SentinelObserver>>>,
}

#[wasm_bindgen]
impl PageFeed {
    /// Create a feed from a plain options object.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: Element,
        sentinel: Element,
        options: JsValue,
    ) -> Result<PageFeed, JsValue> {
        let config: FeedConfig =
            serde_wasm_bindgen::from_value(options).map_err(BindingError::from)?;
        config.validate().map_err(BindingError::from)?;

        Ok(Self::mount(container, &sentinel, &config))
    }

    /// Whether the feed was built with every capability it needs.
    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.loader.is_active()
    }

    /// Last page number requested.
    pub fn page(&self) -> u32 {
        self.loader.state().page
    }

    /// Whether a page request is in flight.
    #[wasm_bindgen(js_name = isFetching)]
    pub fn is_fetching(&self) -> bool {
        self.loader.state().in_flight
    }

    /// Whether the feed has stopped for good.
    #[wasm_bindgen(js_name = isStopped)]
    pub fn is_stopped(&self) -> bool {
        self.loader.phase() == Phase::Stopped
    }

    /// Register a callback receiving `{ page, kind, status?, message }` for
    /// each failed page.
    #[wasm_bindgen(js_name = onError)]
    pub fn on_error(&self, callback: js_sys::Function) {
        self.loader.set_error_hook(move |failure| {
            let detail = ErrorDetail::from(failure);
            let value = match serde_wasm_bindgen::to_value(&detail) {
                Ok(value) => value,
                Err(err) => {
                    log::warn!("cannot serialize error detail: {err}");
                    return;
                }
            };
            if let Err(err) = callback.call1(&JsValue::NULL, &value) {
                log::warn!("onError callback threw: {}", BindingError::js(&err));
            }
        });
    }

    /// Stop the feed if its container has left the document. Returns whether
    /// the feed is still running. The sentinel observer runs this check on
    /// every callback.
    #[wasm_bindgen(js_name = checkConnected)]
    pub fn check_connected(&self) -> bool {
        if self.loader.check_connected() {
            return true;
        }
        self.observer.borrow_mut().take();
        false
    }

    /// Stop observing. A page already in flight is discarded when it lands.
    pub fn stop(&self) {
        self.loader.stop();
        self.observer.borrow_mut().take();
    }
}

impl PageFeed {
    /// Build the loader and, when it is active, start observing.
    pub fn mount(container: Element, sentinel: &Element, config: &FeedConfig) -> Self {
        let loader = Rc::new(PaginationLoader::from_config(
            config,
            capability::detect(),
            HttpFetcher::new(config.endpoint_template()),
            DomList::new(container),
        ));
        let observer = Rc::new(RefCell::new(None));

        if loader.is_active() {
            let weak = Rc::downgrade(&loader);
            let watched = SentinelObserver::observe(sentinel, &config.observer, move |seen, obs| {
                on_visibility(&weak, seen, obs);
            });

            match watched {
                Ok(watched) => *observer.borrow_mut() = Some(watched),
                Err(err) => {
                    log::warn!("cannot observe sentinel, pagination disabled: {err}");
                    loader.stop();
                }
            }
        }

        Self { loader, observer }
    }

    /// The underlying loader.
    pub fn loader(&self) -> &PaginationLoader<HttpFetcher, DomList> {
        &self.loader
    }
}

fn on_visibility(loader: &Weak<DomLoader>, intersecting: bool, observer: &IntersectionObserver) {
    let Some(loader) = loader.upgrade() else {
        observer.disconnect();
        return;
    };

    if !loader.check_connected() {
        log::debug!("feed stopped or container removed, disconnecting");
        observer.disconnect();
        return;
    }

    if !loader.observe_intersection(intersecting) {
        return;
    }

    let observer = observer.clone();
    spawn_local(async move {
        match loader.trigger().await {
            TriggerOutcome::Ignored(reason) => log::trace!("visibility ignored: {reason}"),
            TriggerOutcome::Discarded { page } => log::debug!("page {page} discarded"),
            _ => {}
        }
        if loader.phase() == Phase::Stopped {
            observer.disconnect();
        }
    });
}

/// Mount a feed using the selectors from `options`.
///
/// Resolves to `undefined` when the page has no matching container or
/// sentinel.
#[wasm_bindgen(js_name = mountFeed)]
pub fn mount_feed(options: JsValue) -> Result<Option<PageFeed>, JsValue> {
    let config: FeedConfig = serde_wasm_bindgen::from_value(options).map_err(BindingError::from)?;
    config.validate().map_err(BindingError::from)?;
    Ok(mount_by_selectors(&config)?)
}

/// Mount the picture list feed with the default selectors
/// (`ol.picture-list`, `.pagination`).
#[wasm_bindgen(js_name = mountPictureFeed)]
pub fn mount_picture_feed() -> Option<PageFeed> {
    match mount_by_selectors(&FeedConfig::new(PICTURE_FEED_ENDPOINT)) {
        Ok(feed) => feed,
        Err(err) => {
            log::warn!("picture feed not mounted: {err}");
            None
        }
    }
}

fn mount_by_selectors(config: &FeedConfig) -> Result<Option<PageFeed>, BindingError> {
    let document = dom::document()?;

    let Some(container) = dom::query(&document, &config.container_selector)? else {
        log::debug!("no element matches {}", config.container_selector);
        return Ok(None);
    };
    let Some(sentinel) = dom::query(&document, &config.sentinel_selector)? else {
        log::debug!("no element matches {}", config.sentinel_selector);
        return Ok(None);
    };

    Ok(Some(PageFeed::mount(container, &sentinel, config)))
}
