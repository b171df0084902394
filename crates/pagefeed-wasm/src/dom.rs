//! DOM container and element lookup.

use pagefeed_core::{ContentAppender, Fragment};
use web_sys::{Document, Element};

use crate::error::BindingError;

/// A live DOM element that page fragments are appended to.
#[derive(Debug, Clone)]
pub struct DomList {
    element: Element,
}

impl DomList {
    /// Wrap a container element.
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl ContentAppender for DomList {
    fn append(&self, fragment: &Fragment) -> usize {
        let Some(document) = self.element.owner_document() else {
            return 0;
        };

        // Parse inside an element of the container's own kind so that
        // context-sensitive children (`<li>`, `<tr>`) survive.
        let scratch = match document.create_element(&self.element.tag_name()) {
            Ok(scratch) => scratch,
            Err(err) => {
                log::warn!("cannot create fragment parser: {}", BindingError::js(&err));
                return 0;
            }
        };
        scratch.set_inner_html(fragment.as_str());

        let mut appended = 0;
        while let Some(child) = scratch.first_child() {
            if let Err(err) = self.element.append_child(&child) {
                log::warn!("failed to append node: {}", BindingError::js(&err));
                break;
            }
            appended += 1;
        }
        appended
    }

    fn is_connected(&self) -> bool {
        self.element.is_connected()
    }
}

/// The current document.
pub fn document() -> Result<Document, BindingError> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or(BindingError::NoDocument)
}

/// Resolve the first element matching `selector`, if any.
pub fn query(document: &Document, selector: &str) -> Result<Option<Element>, BindingError> {
    document
        .query_selector(selector)
        .map_err(|err| BindingError::js(&err))
}
