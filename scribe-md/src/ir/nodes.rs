//! Core data structures for the document tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::kinds::NodeKind;

/// One node of a finished, reference-resolved document tree.
///
/// The tree is owned top-down and never mutated while rendering. Parent context is supplied
/// by the traversal driver (see [`crate::common::traversal::NodeRef`]) rather than stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    /// Raw payload, only present on `text` leaves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, AttrValue>,
}

/// Kind-specific metadata attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view of the value. Numeric strings are accepted since upstream tools often
    /// carry counters as text.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(n) => Some(*n),
            AttrValue::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(value: Vec<String>) -> Self {
        AttrValue::List(value)
    }
}

impl Node {
    /// An empty node of the given kind.
    pub fn new(kind: impl Into<NodeKind>) -> Self {
        Node {
            kind: kind.into(),
            children: Vec::new(),
            text: None,
            attributes: BTreeMap::new(),
        }
    }

    /// A `text` leaf.
    pub fn text(payload: impl Into<String>) -> Self {
        Node {
            text: Some(payload.into()),
            ..Node::new(NodeKind::Text)
        }
    }

    /// A node of `kind` wrapping a single text leaf. Handy for inline spans and titles.
    pub fn with_text(kind: impl Into<NodeKind>, payload: impl Into<String>) -> Self {
        Node::new(kind).with_child(Node::text(payload))
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attr(name).and_then(AttrValue::as_str)
    }

    pub fn is(&self, kind: &NodeKind) -> bool {
        &self.kind == kind
    }

    /// Flattened text of the whole subtree, in document order.
    pub fn astext(&self) -> String {
        if let Some(text) = &self.text {
            return text.clone();
        }
        self.children
            .iter()
            .map(Node::astext)
            .collect::<Vec<_>>()
            .join(self.kind.child_text_separator())
    }

    /// Number of nodes in the subtree, this one included.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Node::size).sum::<usize>()
    }

    /// Parse a tree from its JSON form.
    pub fn from_json(source: &str) -> Result<Node, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
