//! Host capability detection.

use pagefeed_core::Capabilities;
use wasm_bindgen::JsValue;

/// Detect the capabilities the loader needs on the current global object.
pub fn detect() -> Capabilities {
    let global = js_sys::global();
    Capabilities {
        visibility_observer: is_defined(&global, "IntersectionObserver"),
        network_fetch: is_defined(&global, "fetch"),
    }
}

fn is_defined(target: &JsValue, name: &str) -> bool {
    js_sys::Reflect::get(target, &JsValue::from_str(name))
        .map(|value| !value.is_undefined() && !value.is_null())
        .unwrap_or(false)
}
