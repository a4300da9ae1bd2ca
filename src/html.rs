use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Block, BlockKind, SpanKind, TextSpan};
use crate::error::{MarkdownError, Result};
use crate::inline::tokenize;
use crate::node::HtmlNode;
use crate::parser::segment;

const MAX_HEADING_LEVEL: usize = 6;
const FENCE_LEN: usize = 3;

static UNORDERED_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*[-*+]\s").expect("unordered marker pattern is valid")
});
static ORDERED_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*\d+\.\s").expect("ordered marker pattern is valid")
});

/// Build the whole document tree: a `div` with one child per block.
pub fn build_document(markdown: &str) -> Result<HtmlNode> {
    let children = segment(markdown)?
        .iter()
        .map(build)
        .collect::<Result<Vec<_>>>()?;
    Ok(HtmlNode::parent("div", children))
}

/// Convert a single block to its HTML node.
pub fn build(block: &Block) -> Result<HtmlNode> {
    log::debug!("building {:?} block", block.kind);
    match block.kind {
        BlockKind::Paragraph => Ok(HtmlNode::parent("p", inline_nodes(&block.text)?)),
        BlockKind::Heading => build_heading(&block.text),
        BlockKind::Code => Ok(build_code(&block.text)),
        BlockKind::Quote => build_quote(&block.text),
        BlockKind::UnorderedList => build_list("ul", &UNORDERED_MARKER, &block.text),
        BlockKind::OrderedList => build_list("ol", &ORDERED_MARKER, &block.text),
    }
}

fn build_heading(text: &str) -> Result<HtmlNode> {
    let level = text.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > MAX_HEADING_LEVEL {
        return Err(MarkdownError::InvalidHeadingLevel {
            level,
            text: text.to_string(),
        });
    }

    // '#' is one byte, so `level` is also the byte offset past the run
    let content = text[level..].trim_start();
    Ok(HtmlNode::parent(format!("h{level}"), inline_nodes(content)?))
}

/// `<pre><code>` with the fence markers cut off; the body is not tokenized.
fn build_code(text: &str) -> HtmlNode {
    let start = text
        .char_indices()
        .nth(FENCE_LEN)
        .map_or(text.len(), |(i, _)| i);
    let end = text
        .char_indices()
        .rev()
        .nth(FENCE_LEN - 1)
        .map_or(0, |(i, _)| i);
    let body = if start < end { &text[start..end] } else { "" };

    HtmlNode::parent("pre", vec![HtmlNode::leaf("code", body)])
}

fn build_quote(text: &str) -> Result<HtmlNode> {
    let mut paragraphs = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        let line = line.strip_prefix('>').unwrap_or(line);
        let line = line.strip_prefix(' ').unwrap_or(line).trim();
        if line.is_empty() {
            continue;
        }
        paragraphs.push(HtmlNode::parent("p", inline_nodes(line)?));
    }
    Ok(HtmlNode::parent("blockquote", paragraphs))
}

fn build_list(tag: &str, marker: &Regex, text: &str) -> Result<HtmlNode> {
    let items = marker
        .split(text)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| Ok(HtmlNode::parent("li", inline_nodes(item)?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(HtmlNode::parent(tag, items))
}

fn inline_nodes(text: &str) -> Result<Vec<HtmlNode>> {
    Ok(tokenize(text)?.iter().map(span_to_node).collect())
}

/// Map an inline span to its leaf node.
pub fn span_to_node(span: &TextSpan) -> HtmlNode {
    let Some(tag) = span.kind().tag() else {
        return HtmlNode::text(span.content());
    };
    let url = span.url().unwrap_or_default();

    match span.kind() {
        SpanKind::Plain | SpanKind::Bold | SpanKind::Italic | SpanKind::Code => {
            HtmlNode::leaf(tag, span.content())
        }
        SpanKind::Link => HtmlNode::leaf(tag, span.content()).with_attribute("href", url),
        SpanKind::Image => HtmlNode::leaf(tag, "")
            .with_attribute("src", url)
            .with_attribute("alt", span.content()),
    }
}
