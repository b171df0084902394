//! `IntersectionObserver` wrapper for the sentinel element.

use js_sys::Array;
use pagefeed_core::ObserverConfig;
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::BindingError;

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Watches one sentinel element against the viewport.
///
/// Disconnects when dropped. The callback receives the latest intersection
/// state of each batch of records together with the observer, so it can
/// disconnect itself.
pub struct SentinelObserver {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl SentinelObserver {
    /// Start observing `sentinel`.
    pub fn observe<C>(
        sentinel: &Element,
        options: &ObserverConfig,
        mut on_change: C,
    ) -> Result<Self, BindingError>
    where
        C: FnMut(bool, &IntersectionObserver) + 'static,
    {
        let callback = ObserverCallback::new(
            move |entries: Array, observer: IntersectionObserver| {
                let latest = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .last();
                if let Some(entry) = latest {
                    on_change(entry.is_intersecting(), &observer);
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&options.root_margin);
        init.set_threshold(&JsValue::from_f64(options.threshold));

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(|err| BindingError::js(&err))?;
        observer.observe(sentinel);

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for SentinelObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
