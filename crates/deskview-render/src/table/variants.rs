//! Presentational wrappers for use inside cell renderers.

use crate::node::{Element, Node};

/// Class of the [`title`] span.
pub const TITLE_CLASS: &str = "title";

/// Class of the [`link`] anchor.
pub const LINK_CLASS: &str = "link";

/// Emphasized text: `<span class="title">…</span>`.
pub fn title(content: impl Into<Node>) -> Node {
    Element::new("span").class(TITLE_CLASS).child(content).into()
}

/// A navigable reference: `<a class="link" href="…"><span>…</span></a>`.
pub fn link(href: impl Into<String>, content: impl Into<Node>) -> Node {
    Element::new("a")
        .class(LINK_CLASS)
        .attr("href", href)
        .child(Element::new("span").child(content))
        .into()
}
