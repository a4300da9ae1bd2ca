/// Inline formatting applied to a run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl SpanKind {
    /// Tag of the leaf element a span of this kind renders as.
    /// Plain text renders without a tag.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            SpanKind::Plain => None,
            SpanKind::Bold => Some("b"),
            SpanKind::Italic => Some("i"),
            SpanKind::Code => Some("code"),
            SpanKind::Link => Some("a"),
            SpanKind::Image => Some("img"),
        }
    }
}

/// A typed run of inline text.
///
/// `url` is only ever present for links and images; the constructors are the
/// only way to build one, which keeps that pairing intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    content: String,
    kind: SpanKind,
    url: Option<String>,
}

impl TextSpan {
    pub fn plain(content: impl Into<String>) -> Self {
        Self::styled(content, SpanKind::Plain)
    }

    pub fn bold(content: impl Into<String>) -> Self {
        Self::styled(content, SpanKind::Bold)
    }

    pub fn italic(content: impl Into<String>) -> Self {
        Self::styled(content, SpanKind::Italic)
    }

    pub fn code(content: impl Into<String>) -> Self {
        Self::styled(content, SpanKind::Code)
    }

    /// A span of one of the url-less kinds.
    pub(crate) fn styled(content: impl Into<String>, kind: SpanKind) -> Self {
        debug_assert!(
            !matches!(kind, SpanKind::Link | SpanKind::Image),
            "{kind:?} spans need a url"
        );
        Self {
            content: content.into(),
            kind,
            url: None,
        }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            content: text.into(),
            kind: SpanKind::Link,
            url: Some(url.into()),
        }
    }

    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            content: alt.into(),
            kind: SpanKind::Image,
            url: Some(url.into()),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn kind(&self) -> SpanKind {
        self.kind
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_plain(&self) -> bool {
        self.kind == SpanKind::Plain
    }
}

/// Structural kind of a block of source lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

/// A contiguous run of source lines classified into one kind.
///
/// `text` is the raw lines joined with `\n` and trimmed. Code blocks keep
/// their fence lines; headings keep their `#` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub text: String,
    pub kind: BlockKind,
}

impl Block {
    pub fn new(text: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}
