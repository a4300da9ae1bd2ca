mod block;
mod config;
mod error;
mod html;
mod inline;
mod node;
mod parser;
mod title;

pub mod site;

pub use block::{Block, BlockKind, SpanKind, TextSpan};
pub use config::{Config, ConfigError, PathsConfig, SiteConfig};
pub use error::{MarkdownError, Result};
pub use html::{build, build_document, span_to_node};
pub use inline::tokenize;
pub use node::{Attributes, HtmlNode};
pub use title::extract_title;

/// Split markdown text into blocks.
pub fn segment(markdown: &str) -> Result<Vec<Block>> {
    parser::segment(markdown)
}

/// Convert markdown to an HTML fragment wrapped in a single `<div>`.
pub fn render_markdown(markdown: &str) -> Result<String> {
    build_document(markdown)?.to_html()
}
