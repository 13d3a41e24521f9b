//! HTML node tree and string rendering.
//!
//! The tree has two shapes: [`LeafNode`] holds a value and no children,
//! [`ParentNode`] holds children and no value. Each parent owns its children
//! outright, so a tree is built once, rendered once and dropped.
//!
//! Text and attribute values are emitted verbatim. Leaf values may already
//! contain markup (inline code from a fenced block, for instance), so no
//! escaping is applied here.

use crate::error::ConvertError;

/// Elements rendered as a lone open tag with no value and no closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "img", "br", "hr", "input", "meta", "link", "area", "base", "col", "embed", "param", "source",
    "track", "wbr",
];

/// Element attributes in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`.
    ///
    /// An existing key keeps its position and only has its value replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as ` key="value"` pairs, or an empty string when there are none.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        for (key, value) in &self.0 {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (key, value) in iter {
            attrs.insert(key, value);
        }
        attrs
    }
}

/// A childless node.
///
/// Without a tag the value is emitted as raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeafNode {
    pub tag: Option<String>,
    pub value: Option<String>,
    pub attrs: Attributes,
}

/// A node wrapping an ordered list of children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentNode {
    pub tag: Option<String>,
    pub children: Option<Vec<HtmlNode>>,
    pub attrs: Attributes,
}

/// A node in the HTML output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Leaf(LeafNode),
    Parent(ParentNode),
}

impl HtmlNode {
    /// Create a tagged leaf such as `<b>value</b>`.
    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Leaf(LeafNode {
            tag: Some(tag.into()),
            value: Some(value.into()),
            attrs: Attributes::new(),
        })
    }

    /// Create an untagged leaf that renders as raw text.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Leaf(LeafNode {
            tag: None,
            value: Some(value.into()),
            attrs: Attributes::new(),
        })
    }

    /// Create a parent element.
    pub fn parent(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        Self::Parent(ParentNode {
            tag: Some(tag.into()),
            children: Some(children),
            attrs: Attributes::new(),
        })
    }

    /// Add an attribute, keeping insertion order.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs_mut().insert(key, value);
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Leaf(leaf) => leaf.tag.as_deref(),
            Self::Parent(parent) => parent.tag.as_deref(),
        }
    }

    pub fn attrs(&self) -> &Attributes {
        match self {
            Self::Leaf(leaf) => &leaf.attrs,
            Self::Parent(parent) => &parent.attrs,
        }
    }

    fn attrs_mut(&mut self) -> &mut Attributes {
        match self {
            Self::Leaf(leaf) => &mut leaf.attrs,
            Self::Parent(parent) => &mut parent.attrs,
        }
    }

    /// Children of a parent node; empty for leaves.
    pub fn children(&self) -> &[HtmlNode] {
        match self {
            Self::Leaf(_) => &[],
            Self::Parent(parent) => parent.children.as_deref().unwrap_or_default(),
        }
    }

    /// Render the tree depth-first into an HTML string.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::MissingLeafValue`] if a leaf has no value
    /// - [`ConvertError::MissingParentTag`] if a parent has no (or an empty) tag
    /// - [`ConvertError::MissingParentChildren`] if a parent has no children list
    pub fn render(&self) -> Result<String, ConvertError> {
        let mut out = String::new();
        self.render_into(&mut out)?;
        Ok(out)
    }

    fn render_into(&self, out: &mut String) -> Result<(), ConvertError> {
        match self {
            Self::Leaf(leaf) => leaf.render_into(out),
            Self::Parent(parent) => parent.render_into(out),
        }
    }
}

impl LeafNode {
    fn render_into(&self, out: &mut String) -> Result<(), ConvertError> {
        let value = self.value.as_deref().ok_or(ConvertError::MissingLeafValue)?;
        let Some(tag) = self.tag.as_deref().filter(|t| !t.is_empty()) else {
            out.push_str(value);
            return Ok(());
        };

        open_tag(tag, &self.attrs, out);
        if !VOID_ELEMENTS.contains(&tag) {
            out.push_str(value);
            close_tag(tag, out);
        }
        Ok(())
    }
}

impl ParentNode {
    fn render_into(&self, out: &mut String) -> Result<(), ConvertError> {
        let tag = self
            .tag
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ConvertError::MissingParentTag)?;
        let children = self
            .children
            .as_ref()
            .ok_or(ConvertError::MissingParentChildren)?;

        open_tag(tag, &self.attrs, out);
        for child in children {
            child.render_into(out)?;
        }
        close_tag(tag, out);
        Ok(())
    }
}

fn open_tag(tag: &str, attrs: &Attributes, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    attrs.write_html(out);
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
