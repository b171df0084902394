//! Slug input that follows a title input.

use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{Event, HtmlInputElement};

use crate::dom;

/// Derive a URL slug from a title.
#[wasm_bindgen]
pub fn slugify(title: &str) -> String {
    pagefeed_core::slugify(title)
}

/// Fill the slug input from the title input whenever the title loses focus,
/// unless the slug already has a value.
///
/// Returns `false` when the title input does not exist.
#[wasm_bindgen(js_name = bindSlugField)]
pub fn bind_slug_field(title_id: &str, slug_id: &str) -> bool {
    let Ok(document) = dom::document() else {
        return false;
    };
    let Some(title) = document.get_element_by_id(title_id) else {
        return false;
    };
    let slug = document
        .get_element_by_id(slug_id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());

    let handler = Closure::<dyn Fn(Event)>::new(move |ev: Event| {
        let Some(slug) = slug.as_ref() else {
            return;
        };
        if !slug.value().is_empty() {
            return;
        }
        let Some(input) = ev
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        slug.set_value(&slugify(&input.value()));
    });

    if let Err(err) = title.add_event_listener_with_callback("blur", handler.as_ref().unchecked_ref())
    {
        log::warn!("cannot bind slug field: {}", crate::error::BindingError::js(&err));
        return false;
    }

    // Leak the closure to keep it alive
    handler.forget();
    true
}
