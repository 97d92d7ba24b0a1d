use std::ops::Deref;

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// HTML attributes in insertion order.
///
/// Keys are unique: inserting an existing key replaces its value in place.
/// Values are written verbatim, without escaping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Render as ` key="value" key2="value2"`, or an empty string when empty.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        for (key, value) in &self.0 {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }
}

impl Deref for Attributes {
    type Target = IndexMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Literal text, or an element with a literal value and no children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    tag: Option<String>,
    value: String,
    attributes: Attributes,
}

impl LeafNode {
    /// Build a leaf, failing with [`Error::InvalidNode`] when `value` is absent.
    pub fn new(tag: Option<&str>, value: Option<&str>) -> Result<Self> {
        let value = value.ok_or(Error::InvalidNode)?;
        Ok(Self {
            tag: tag.map(str::to_string),
            value: value.to_string(),
            attributes: Attributes::new(),
        })
    }

    /// Untagged leaf; renders as its raw value.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            tag: None,
            value: value.into(),
            attributes: Attributes::new(),
        }
    }

    /// Tagged leaf wrapping `value`.
    pub fn element(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            value: value.into(),
            attributes: Attributes::new(),
        }
    }

    /// Add or replace one attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    /// Replace all attributes.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        self.render_into(&mut out);
        Ok(out)
    }

    fn render_into(&self, out: &mut String) {
        match &self.tag {
            // Attributes are ignored on raw text
            None => out.push_str(&self.value),
            Some(tag) => {
                open_tag(tag, &self.attributes, out);
                out.push_str(&self.value);
                close_tag(tag, out);
            }
        }
    }
}

/// An element wrapping an ordered list of child nodes.
///
/// Nothing is validated at construction, so a parent can be assembled
/// incrementally. A missing tag or an empty child list is reported by
/// [`ParentNode::render`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentNode {
    tag: Option<String>,
    children: Vec<Node>,
    attributes: Attributes,
}

impl ParentNode {
    /// Build a parent without validating it.
    pub fn new(tag: Option<&str>, children: Vec<Node>) -> Self {
        Self {
            tag: tag.map(str::to_string),
            children,
            attributes: Attributes::new(),
        }
    }

    /// Append a child after the existing ones.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Add or replace one attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    /// Replace all attributes.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        self.render_into(&mut out)?;
        Ok(out)
    }

    fn render_into(&self, out: &mut String) -> Result<()> {
        let tag = self.tag.as_deref().ok_or(Error::MissingTag)?;
        if self.children.is_empty() {
            return Err(Error::MissingChildren);
        }

        open_tag(tag, &self.attributes, out);
        for child in &self.children {
            child.render_into(out)?;
        }
        close_tag(tag, out);
        Ok(())
    }
}

/// A node in the output tree: either a leaf or a parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(LeafNode),
    Parent(ParentNode),
}

impl Node {
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Leaf(leaf) => leaf.tag(),
            Node::Parent(parent) => parent.tag(),
        }
    }

    pub fn attributes(&self) -> &Attributes {
        match self {
            Node::Leaf(leaf) => leaf.attributes(),
            Node::Parent(parent) => parent.attributes(),
        }
    }

    /// The literal value of a leaf. Parents have none.
    pub fn value(&self) -> Option<&str> {
        match self {
            Node::Leaf(leaf) => Some(leaf.value()),
            Node::Parent(_) => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf(_) => &[],
            Node::Parent(parent) => parent.children(),
        }
    }

    /// Serialize this node and its descendants to HTML.
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        self.render_into(&mut out)?;
        Ok(out)
    }

    fn render_into(&self, out: &mut String) -> Result<()> {
        match self {
            Node::Leaf(leaf) => {
                leaf.render_into(out);
                Ok(())
            }
            Node::Parent(parent) => parent.render_into(out),
        }
    }
}

impl From<LeafNode> for Node {
    fn from(leaf: LeafNode) -> Self {
        Node::Leaf(leaf)
    }
}

impl From<ParentNode> for Node {
    fn from(parent: ParentNode) -> Self {
        Node::Parent(parent)
    }
}

fn open_tag(tag: &str, attributes: &Attributes, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    attributes.render_into(out);
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
