use crate::error::{MarkdownError, Result};

/// Attributes in insertion order, rendered as ` key="value"` pairs.
pub type Attributes = Vec<(String, String)>;

/// A node of the rendered HTML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    /// Terminal node. Without a tag the value is emitted as bare text.
    ///
    /// `value: None` means the value is missing altogether, which is an error
    /// at render time; `Some("")` is a legitimately empty element.
    Leaf {
        tag: Option<String>,
        value: Option<String>,
        attributes: Attributes,
    },
    /// Container node. Its attributes are kept on the tree but not rendered.
    Parent {
        tag: String,
        children: Vec<HtmlNode>,
        attributes: Attributes,
    },
}

impl HtmlNode {
    /// Bare text, rendered verbatim.
    pub fn text(value: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: None,
            value: Some(value.into()),
            attributes: Vec::new(),
        }
    }

    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: Some(tag.into()),
            value: Some(value.into()),
            attributes: Vec::new(),
        }
    }

    pub fn parent(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        HtmlNode::Parent {
            tag: tag.into(),
            children,
            attributes: Vec::new(),
        }
    }

    /// Append an attribute, keeping insertion order.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            HtmlNode::Leaf { attributes, .. } | HtmlNode::Parent { attributes, .. } => {
                attributes.push((key.into(), value.into()));
            }
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            HtmlNode::Leaf { tag, .. } => tag.as_deref(),
            HtmlNode::Parent { tag, .. } => Some(tag),
        }
    }

    /// Value of a leaf; parents have none.
    pub fn value(&self) -> Option<&str> {
        match self {
            HtmlNode::Leaf { value, .. } => value.as_deref(),
            HtmlNode::Parent { .. } => None,
        }
    }

    /// Children of a parent; leaves have none.
    pub fn children(&self) -> &[HtmlNode] {
        match self {
            HtmlNode::Leaf { .. } => &[],
            HtmlNode::Parent { children, .. } => children,
        }
    }

    pub fn attributes(&self) -> &[(String, String)] {
        match self {
            HtmlNode::Leaf { attributes, .. } | HtmlNode::Parent { attributes, .. } => attributes,
        }
    }

    /// Serialize this node and everything below it.
    pub fn to_html(&self) -> Result<String> {
        let mut out = String::new();
        write_node(self, &mut out)?;
        Ok(out)
    }
}

fn write_node(node: &HtmlNode, out: &mut String) -> Result<()> {
    match node {
        HtmlNode::Leaf {
            tag,
            value,
            attributes,
        } => {
            let Some(value) = value else {
                return Err(MarkdownError::MissingValue { tag: tag.clone() });
            };
            let Some(tag) = tag else {
                out.push_str(value);
                return Ok(());
            };

            out.push('<');
            out.push_str(tag);
            write_attributes(attributes, out);
            out.push('>');
            // Empty leaves such as <img> carry everything in their attributes
            if !value.is_empty() {
                out.push_str(value);
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
        HtmlNode::Parent { tag, children, .. } => {
            if tag.is_empty() {
                return Err(MarkdownError::MissingTag);
            }
            if children.is_empty() {
                return Err(MarkdownError::MissingChildren { tag: tag.clone() });
            }

            out.push('<');
            out.push_str(tag);
            out.push('>');
            for child in children {
                write_node(child, out)?;
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
    Ok(())
}

/// Render attributes as ` key="value"` pairs. Values are not escaped.
fn write_attributes(attributes: &[(String, String)], out: &mut String) {
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
}
