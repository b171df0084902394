//! Errors raised at the JavaScript boundary.

use pagefeed_core::FeedError;
use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Error type for the browser bindings.
#[derive(Error, Debug)]
pub enum BindingError {
    /// Core configuration or capability error.
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// The options object could not be deserialized.
    #[error("Invalid options: {0}")]
    Options(String),

    /// No `window`/`document` in this global scope.
    #[error("No document available")]
    NoDocument,

    /// A JavaScript call threw.
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl BindingError {
    /// Wrap a thrown JavaScript value.
    pub fn js(value: &JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<serde_wasm_bindgen::Error> for BindingError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        Self::Options(err.to_string())
    }
}

impl From<BindingError> for JsValue {
    fn from(err: BindingError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use pagefeed_core::Capability;

    use super::*;

    #[test]
    fn test_binding_error_display() {
        let err = BindingError::Options("missing field `endpoint`".to_string());
        assert!(err.to_string().contains("Invalid options"));

        let err: BindingError = FeedError::CapabilityUnavailable(Capability::NetworkFetch).into();
        assert_eq!(err.to_string(), "Capability unavailable: fetch");

        assert_eq!(BindingError::NoDocument.to_string(), "No document available");
    }
}
