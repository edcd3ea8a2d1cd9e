//! The render tree.
//!
//! Every component in this crate produces a [`Node`]. A node tree is a plain
//! value: it owns its text and attributes, carries no behavior, and can be
//! serialized to HTML (see [`crate::html`]) or to JSON/YAML through serde for
//! hosts that do their own rendering.
//!
//! ```rust
//! use deskview_render::node::{Element, Node};
//!
//! let node: Node = Element::new("span")
//!     .class("title")
//!     .child("Main Office")
//!     .into();
//!
//! assert_eq!(node.to_string(), r#"<span class="title">Main Office</span>"#);
//! assert_eq!(node.text_content(), "Main Office");
//! ```

use std::fmt;

use serde::Serialize;

/// A node in the render tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    /// Renders nothing. Used for absent cell values and blank headers.
    #[default]
    Empty,
    /// Plain text, escaped on output.
    Text {
        /// The text content.
        text: String,
    },
    /// A hard line break.
    #[serde(rename = "br")]
    LineBreak,
    /// Pre-rendered markup inserted verbatim.
    ///
    /// Only for trusted fragments, e.g. output of a template that already
    /// escaped its content.
    Raw {
        /// The markup.
        html: String,
    },
    /// A sequence of nodes without a wrapping element.
    Fragment {
        /// The nodes, in order.
        children: Vec<Node>,
    },
    /// An element with a tag, attributes and children.
    Element(Element),
}

impl Node {
    /// Creates a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    /// Creates a raw markup node. The content is not escaped.
    pub fn raw(html: impl Into<String>) -> Self {
        Node::Raw { html: html.into() }
    }

    /// Creates a fragment from a sequence of nodes.
    pub fn fragment<I, N>(children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        Node::Fragment {
            children: children.into_iter().map(Into::into).collect(),
        }
    }

    /// Joins text lines with line breaks.
    ///
    /// Used for multi-line content such as postal addresses.
    ///
    /// ```rust
    /// use deskview_render::node::Node;
    ///
    /// let address = Node::lines(["Rua Augusta 12", "1100-053 Lisboa"]);
    /// assert_eq!(address.to_string(), "Rua Augusta 12<br>1100-053 Lisboa");
    /// ```
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut children = Vec::new();
        for (i, line) in lines.into_iter().enumerate() {
            if i > 0 {
                children.push(Node::LineBreak);
            }
            children.push(Node::text(line));
        }
        Node::Fragment { children }
    }

    /// Returns true if the node renders nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Empty => true,
            Node::Text { text } => text.is_empty(),
            Node::Raw { html } => html.is_empty(),
            Node::Fragment { children } => children.iter().all(Node::is_empty),
            Node::LineBreak | Node::Element(_) => false,
        }
    }

    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    ///
    /// Line breaks become `\n`. Raw markup is included as-is.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Empty => {}
            Node::Text { text } => out.push_str(text),
            Node::LineBreak => out.push('\n'),
            Node::Raw { html } => out.push_str(html),
            Node::Fragment { children } => children.iter().for_each(|c| c.collect_text(out)),
            Node::Element(el) => el.children.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// All elements with the given tag, in document order.
    pub fn find_all<'a>(&'a self, tag: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.walk(&mut |el| {
            if el.tag == tag {
                found.push(el);
            }
        });
        found
    }

    /// The first element with the given tag, in document order.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.find_all(tag).into_iter().next()
    }

    fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Element)) {
        match self {
            Node::Element(el) => {
                visit(el);
                el.children.iter().for_each(|c| c.walk(visit));
            }
            Node::Fragment { children } => children.iter().for_each(|c| c.walk(visit)),
            _ => {}
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::html::to_html(self))
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::text(text)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text { text }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl<N: Into<Node>> From<Option<N>> for Node {
    fn from(node: Option<N>) -> Self {
        node.map(Into::into).unwrap_or_default()
    }
}

/// An element node.
///
/// The `key` is a stable identity for hosts that diff successive renders.
/// It is part of the serialized tree but never written to HTML.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Element {
    /// Tag name, e.g. `td`.
    pub tag: String,
    /// Stable identity within the parent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// CSS class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Other attributes, in insertion order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(String, String)>,
    /// Child nodes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into(),
            key: None,
            class: None,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets the stable key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the CSS class. Empty class names are ignored.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        self.class = if class.is_empty() { None } else { Some(class) };
        self
    }

    /// Adds an attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Appends a child. Empty nodes are kept so that cell positions survive.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends several children.
    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Looks up an attribute by name.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Concatenated text of the element's descendants.
    pub fn text_content(&self) -> String {
        Node::fragment(self.children.iter().cloned()).text_content()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_content_flattens_children() {
        let node: Node = Element::new("div")
            .child("a")
            .child(Element::new("span").child("b"))
            .child(Node::LineBreak)
            .child("c")
            .into();
        assert_eq!(node.text_content(), "ab\nc");
    }

    #[test]
    fn lines_inserts_breaks_between_lines_only() {
        let node = Node::lines(["one", "two", "three"]);
        match &node {
            Node::Fragment { children } => {
                assert_eq!(children.len(), 5);
                assert_eq!(children[1], Node::LineBreak);
                assert_eq!(children[3], Node::LineBreak);
            }
            other => panic!("expected fragment, got {:?}", other),
        }
    }

    #[test]
    fn empty_detection() {
        assert!(Node::Empty.is_empty());
        assert!(Node::text("").is_empty());
        assert!(Node::fragment([Node::Empty, Node::text("")]).is_empty());
        assert!(!Node::text("x").is_empty());
        assert!(!Node::from(Element::new("br")).is_empty());
    }

    #[test]
    fn option_into_node() {
        assert_eq!(Node::from(None::<&str>), Node::Empty);
        assert_eq!(Node::from(Some("x")), Node::text("x"));
    }

    #[test]
    fn find_all_in_document_order() {
        let node: Node = Element::new("ul")
            .child(Element::new("li").child("1"))
            .child(Node::fragment([Element::new("li").child("2")]))
            .into();
        let items: Vec<String> = node
            .find_all("li")
            .iter()
            .map(|el| el.text_content())
            .collect();
        assert_eq!(items, vec!["1", "2"]);
    }

    #[test]
    fn empty_class_is_dropped() {
        let el = Element::new("div").class("");
        assert_eq!(el.class, None);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let node: Node = Element::new("td").key("0_name").child("Ada").into();
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "element");
        assert_eq!(json["tag"], "td");
        assert_eq!(json["key"], "0_name");
        assert_eq!(json["children"][0]["kind"], "text");
        assert_eq!(json["children"][0]["text"], "Ada");
        assert!(json.get("attrs").is_none());
    }
}
