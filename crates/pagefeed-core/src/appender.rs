//! Content appending.
//!
//! [`ContentAppender`] is implemented by the browser DOM container in
//! `pagefeed-wasm` and, with the `markup` feature, by [`MarkupList`], an
//! in-memory list that parses fragments with an HTML5 parser.

use std::rc::Rc;

use crate::fetcher::Fragment;

/// Appends fragments to the end of a container.
pub trait ContentAppender {
    /// Parse `fragment` into sibling nodes and append them in order.
    ///
    /// Returns the number of nodes appended. An empty fragment appends
    /// nothing and is not an error.
    fn append(&self, fragment: &Fragment) -> usize;

    /// Whether the container is still attached to its document.
    fn is_connected(&self) -> bool {
        true
    }
}

impl<A: ContentAppender> ContentAppender for Rc<A> {
    fn append(&self, fragment: &Fragment) -> usize {
        (**self).append(fragment)
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }
}

#[cfg(feature = "markup")]
pub use markup::{MarkupList, split_nodes};

#[cfg(feature = "markup")]
mod markup {
    use std::cell::{Cell, RefCell};

    use scraper::{ElementRef, Html, Node};

    use super::ContentAppender;
    use crate::fetcher::Fragment;

    /// Split a fragment into its top-level nodes, serialized.
    ///
    /// Elements keep their outer HTML; text between elements is kept unless
    /// it is only whitespace. Comments are dropped.
    pub fn split_nodes(fragment: &Fragment) -> Vec<String> {
        if fragment.is_blank() {
            return Vec::new();
        }

        let parsed = Html::parse_fragment(fragment.as_str());
        parsed
            .root_element()
            .children()
            .filter_map(|child| match child.value() {
                Node::Element(_) => ElementRef::wrap(child).map(|el| el.html()),
                Node::Text(text) if !text.trim().is_empty() => Some(text.to_string()),
                _ => None,
            })
            .collect()
    }

    /// In-memory list container.
    #[derive(Debug)]
    pub struct MarkupList {
        children: RefCell<Vec<String>>,
        connected: Cell<bool>,
    }

    impl MarkupList {
        /// Create an empty, connected list.
        pub fn new() -> Self {
            Self {
                children: RefCell::new(Vec::new()),
                connected: Cell::new(true),
            }
        }

        /// Create a list with existing children.
        pub fn with_children<I, S>(children: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            let list = Self::new();
            list.children
                .borrow_mut()
                .extend(children.into_iter().map(Into::into));
            list
        }

        /// Snapshot of the serialized children, in document order.
        pub fn children(&self) -> Vec<String> {
            self.children.borrow().clone()
        }

        /// Number of children.
        pub fn len(&self) -> usize {
            self.children.borrow().len()
        }

        /// Whether the list has no children.
        pub fn is_empty(&self) -> bool {
            self.children.borrow().is_empty()
        }

        /// Mark the list as removed from its document.
        pub fn detach(&self) {
            self.connected.set(false);
        }
    }

    impl Default for MarkupList {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ContentAppender for MarkupList {
        fn append(&self, fragment: &Fragment) -> usize {
            let nodes = split_nodes(fragment);
            let count = nodes.len();
            self.children.borrow_mut().extend(nodes);
            count
        }

        fn is_connected(&self) -> bool {
            self.connected.get()
        }
    }
}
