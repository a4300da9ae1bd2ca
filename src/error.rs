use thiserror::Error;

/// Ways a Markdown document can be rejected by the conversion pipeline.
///
/// Every failure is deterministic for a given input, so callers should report
/// it and move on rather than retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkdownError {
    #[error("unbalanced `{delimiter}` delimiter in {text:?}")]
    UnbalancedDelimiter { delimiter: String, text: String },

    #[error("document ends inside a fenced code block")]
    UnterminatedCodeBlock,

    #[error("invalid heading level {level} in {text:?}")]
    InvalidHeadingLevel { level: usize, text: String },

    #[error("leaf node <{}> has no value", .tag.as_deref().unwrap_or("text"))]
    MissingValue { tag: Option<String> },

    #[error("parent node has no tag")]
    MissingTag,

    #[error("parent node <{tag}> has no children")]
    MissingChildren { tag: String },

    #[error("no top-level `# ` heading found")]
    NoTitleFound,
}

pub type Result<T> = std::result::Result<T, MarkdownError>;
