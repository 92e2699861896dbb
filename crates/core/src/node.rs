//! HTML node tree produced by conversion.
//!
//! A [`Node`] is either a leaf (optional tag plus a text value) or an element
//! (tag plus ordered children). Trees are built bottom-up and are not mutated
//! once conversion returns them. Serialization lives in [`crate::render`].

use serde::{Deserialize, Serialize};

/// Ordered attribute list, rendered as `key="value"` pairs in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Creates an empty attribute list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, replacing the value in place if the key already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Builder-style [`Attributes::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Looks up an attribute value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A node holding a text value and no children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafNode {
    /// Wrapping tag; `None` renders the value as bare text.
    pub tag: Option<String>,
    /// Text value. May be empty (e.g. `img`) but is always present.
    pub value: String,
    /// Attributes in render order.
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

/// A node with a tag and ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementNode {
    /// Element tag name.
    pub tag: String,
    /// Child nodes in document order. May be empty.
    pub children: Vec<Node>,
    /// Attributes in render order.
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

/// HTML tree node: exactly one of leaf or element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    /// Text value with an optional tag.
    Leaf(LeafNode),
    /// Tagged element with children.
    Element(ElementNode),
}

impl Node {
    /// Bare text with no wrapping element.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Leaf(LeafNode {
            tag: None,
            value: value.into(),
            attributes: Attributes::new(),
        })
    }

    /// Tagged leaf such as `<b>value</b>`.
    pub fn leaf(tag: impl Into<String>, value: impl Into<String>, attributes: Attributes) -> Self {
        Node::Leaf(LeafNode {
            tag: Some(tag.into()),
            value: value.into(),
            attributes,
        })
    }

    /// Element without attributes.
    pub fn element(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Self::element_with(tag, children, Attributes::new())
    }

    /// Element with the given attributes.
    pub fn element_with(
        tag: impl Into<String>,
        children: Vec<Node>,
        attributes: Attributes,
    ) -> Self {
        Node::Element(ElementNode {
            tag: tag.into(),
            children,
            attributes,
        })
    }

    /// Returns the node's tag, or `None` for bare text.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Leaf(leaf) => leaf.tag.as_deref(),
            Node::Element(element) => Some(&element.tag),
        }
    }

    /// Attributes of a leaf or element.
    pub fn attributes(&self) -> &Attributes {
        match self {
            Node::Leaf(leaf) => &leaf.attributes,
            Node::Element(element) => &element.attributes,
        }
    }

    /// Children of an element; leaves have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf(_) => &[],
            Node::Element(element) => &element.children,
        }
    }

    /// Leaf value, or `None` for elements.
    pub fn value(&self) -> Option<&str> {
        match self {
            Node::Leaf(leaf) => Some(&leaf.value),
            Node::Element(_) => None,
        }
    }

    /// Whether this is a leaf node.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Visible text of this subtree: leaf values concatenated in document order.
    pub fn text_content(&self) -> String {
        let mut buffer = String::new();
        collect_text(self, &mut buffer);
        buffer
    }
}

fn collect_text(node: &Node, buffer: &mut String) {
    match node {
        Node::Leaf(leaf) => buffer.push_str(&leaf.value),
        Node::Element(element) => {
            for child in &element.children {
                collect_text(child, buffer);
            }
        }
    }
}
