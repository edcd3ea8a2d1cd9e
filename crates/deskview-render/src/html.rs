//! HTML serialization of the render tree.
//!
//! Output is compact (no whitespace between elements). Text and attribute
//! values are escaped; [`Node::Raw`] is written verbatim. Element keys are
//! not emitted.

use crate::node::{Element, Node};

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Serializes a node tree to an HTML string.
///
/// ```rust
/// use deskview_render::html::to_html;
/// use deskview_render::node::{Element, Node};
///
/// let node: Node = Element::new("a").attr("href", "/offices/1").child("Tom & Jerry").into();
/// assert_eq!(to_html(&node), r#"<a href="/offices/1">Tom &amp; Jerry</a>"#);
/// ```
pub fn to_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Empty => {}
        Node::Text { text } => escape_into(out, text),
        Node::LineBreak => out.push_str("<br>"),
        Node::Raw { html } => out.push_str(html),
        Node::Fragment { children } => children.iter().for_each(|c| write_node(out, c)),
        Node::Element(el) => write_element(out, el),
    }
}

fn write_element(out: &mut String, el: &Element) {
    out.push('<');
    out.push_str(&el.tag);
    if let Some(class) = &el.class {
        write_attr(out, "class", class);
    }
    for (name, value) in &el.attrs {
        write_attr(out, name, value);
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&el.tag.as_str()) {
        return;
    }

    for child in &el.children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

fn write_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_into(out, value);
    out.push('"');
}

/// Escapes text for use in HTML content and quoted attribute values.
fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
}
