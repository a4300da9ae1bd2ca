use std::sync::LazyLock;

use regex::Regex;

use crate::error::{MarkdownError, Result};

/// A single `#` followed by whitespace; `##` and deeper never match.
static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#\s+(.*)$").expect("title pattern is valid"));

/// Text of the first top-level heading in the raw document.
///
/// Works line by line on the source text and does not go through the block
/// segmenter, so a `# ` line inside a fenced code block still counts.
pub fn extract_title(markdown: &str) -> Result<String> {
    markdown
        .lines()
        .find_map(|line| TITLE.captures(line))
        .map(|caps| caps[1].trim().to_string())
        .ok_or(MarkdownError::NoTitleFound)
}
