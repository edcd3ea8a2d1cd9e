//! Titled card with labeled sections.
//!
//! ```rust
//! use deskview_render::card::Card;
//! use deskview_render::node::Node;
//!
//! let card = Card::new("Office Details")
//!     .section("Office Name", "Lisbon HQ")
//!     .section("Address", Node::lines(["Rua Augusta 12", "1100-053 Lisboa", "Portugal"]));
//!
//! let html = card.into_node().to_string();
//! assert!(html.starts_with(r#"<div class="card"><div class="title">Office Details</div>"#));
//! assert!(html.contains(r#"<div class="section-title">Address</div>"#));
//! ```

use serde::{Deserialize, Serialize};

use crate::node::{Element, Node};

/// CSS classes applied to the card structure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardClasses {
    pub card: String,
    pub title: String,
    pub sections: String,
    pub section_title: String,
    pub section_content: String,
}

impl Default for CardClasses {
    fn default() -> Self {
        CardClasses {
            card: "card".to_string(),
            title: "title".to_string(),
            sections: "sections".to_string(),
            section_title: "section-title".to_string(),
            section_content: "section-content".to_string(),
        }
    }
}

/// A (title, content) pair inside a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: Node,
    pub content: Node,
}

/// A titled container of sections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    title: String,
    sections: Vec<Section>,
    classes: CardClasses,
}

impl Card {
    pub fn new(title: impl Into<String>) -> Self {
        Card {
            title: title.into(),
            sections: Vec::new(),
            classes: CardClasses::default(),
        }
    }

    /// Appends a section. Sections render in insertion order.
    pub fn section(mut self, title: impl Into<Node>, content: impl Into<Node>) -> Self {
        self.sections.push(Section {
            title: title.into(),
            content: content.into(),
        });
        self
    }

    pub fn classes(mut self, classes: CardClasses) -> Self {
        self.classes = classes;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn into_node(self) -> Node {
        let classes = self.classes;
        let sections = self.sections.into_iter().flat_map(|s| {
            [
                Element::new("div")
                    .class(classes.section_title.as_str())
                    .child(s.title),
                Element::new("div")
                    .class(classes.section_content.as_str())
                    .child(s.content),
            ]
        });

        Element::new("div")
            .class(classes.card.as_str())
            .child(
                Element::new("div")
                    .class(classes.title.as_str())
                    .child(self.title),
            )
            .child(
                Element::new("div")
                    .class(classes.sections.as_str())
                    .children(sections),
            )
            .into()
    }
}

impl From<Card> for Node {
    fn from(card: Card) -> Self {
        card.into_node()
    }
}
