//! Descriptor document model
//!
//! A strictly single-owned tree: the [`Document`] owns its root
//! [`Element`], elements own their children by value. No parent
//! back-pointers exist; traversals that need a parent pass it down
//! explicitly.

use indexmap::IndexMap;

/// Parsed descriptor document
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub root: Element,
}

/// Content node inside an element
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    /// Raw character data, whitespace runs included
    Text(String),
    /// Comment text, stored verbatim between `<!--` and `-->`
    Comment(String),
}

impl Node {
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    /// True for a text node that carries only whitespace
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Self::Text(t) if t.trim().is_empty())
    }
}

/// XML element with ordered attributes and children
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Leaf element holding a single text node
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        let text = text.into();
        if !text.is_empty() {
            element.children.push(Node::Text(text));
        }
        element
    }

    /// Child elements in document order
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// First child element with the given tag name
    pub fn child_element(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|el| el.name == name)
    }

    /// Text content of the first child element with the given tag name
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child_element(name).map(Element::text_content)
    }

    /// Concatenated descendant character data, comments excluded
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Mutable child element at the given child index, if that slot
    /// holds an element
    pub fn element_at_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.children.get_mut(index).and_then(Node::as_element_mut)
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => collect_text(el, out),
            Node::Comment(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        let mut root = Element::new("web-app");
        root.children.push(Node::Text("\n    ".into()));
        let mut entry = Element::new("env-entry");
        entry
            .children
            .push(Node::Element(Element::text("env-entry-name", "mailHost")));
        entry.children.push(Node::Comment(" inline ".into()));
        root.children.push(Node::Element(entry));
        root
    }

    #[test]
    fn test_child_text() {
        let root = sample();
        let entry = root.child_element("env-entry").map(Element::text_content);
        assert_eq!(entry.as_deref(), Some("mailHost"));
        assert_eq!(root.child_text("env-entry"), Some("mailHost".into()));
        assert_eq!(root.child_text("servlet"), None);
    }

    #[test]
    fn test_text_content_skips_comments() {
        let root = sample();
        assert_eq!(root.text_content(), "\n    mailHost");
    }

    #[test]
    fn test_blank_text() {
        assert!(Node::Text("\n    ".into()).is_blank_text());
        assert!(!Node::Text(" x ".into()).is_blank_text());
        assert!(!Node::Comment(" ".into()).is_blank_text());
    }

    #[test]
    fn test_leaf_constructor() {
        let leaf = Element::text("param-name", "cacheSize");
        assert_eq!(leaf.children.len(), 1);
        assert_eq!(leaf.text_content(), "cacheSize");

        let empty = Element::text("param-value", "");
        assert!(empty.children.is_empty());
    }

    #[test]
    fn test_element_at_mut() {
        let mut root = sample();
        assert!(root.element_at_mut(0).is_none());
        let entry = root.element_at_mut(1);
        assert_eq!(entry.map(|el| el.name.clone()), Some("env-entry".into()));
    }
}
