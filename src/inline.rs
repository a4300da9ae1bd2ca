use std::sync::LazyLock;

use regex::Regex;

use crate::block::{SpanKind, TextSpan};
use crate::error::{MarkdownError, Result};

const BOLD: &str = "**";
const ITALIC: &str = "_";
const CODE: &str = "`";

/// `![alt](url)` or `[text](url)`. The optional leading `!` is captured so the
/// image and link passes can tell the two apart without lookbehind.
static IMAGE_OR_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(!?)\[([^\[\]]*)\]\(([^\(\)]*)\)").expect("image/link pattern is valid")
});

#[derive(Clone, Copy, PartialEq, Eq)]
enum Target {
    Image,
    Link,
}

/// Split a run of text into typed spans.
///
/// Passes run in a fixed order (bold, italic, code, image, link) and each one
/// only looks at spans that are still plain, so `**a _b_**` yields a single
/// bold span containing the literal `_b_`.
pub fn tokenize(text: &str) -> Result<Vec<TextSpan>> {
    let spans = vec![TextSpan::plain(text)];
    let spans = split_delimiter(spans, BOLD, SpanKind::Bold)?;
    let spans = split_delimiter(spans, ITALIC, SpanKind::Italic)?;
    let spans = split_delimiter(spans, CODE, SpanKind::Code)?;
    let spans = split_pattern(spans, Target::Image);
    let spans = split_pattern(spans, Target::Link);
    log::trace!("tokenized {text:?} into {} spans", spans.len());
    Ok(spans)
}

/// Split plain spans on a literal delimiter, alternating plain and `kind`.
fn split_delimiter(
    spans: Vec<TextSpan>,
    delimiter: &str,
    kind: SpanKind,
) -> Result<Vec<TextSpan>> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }

        let segments: Vec<&str> = span.content().split(delimiter).collect();
        // n delimiters give n + 1 segments; an odd delimiter count leaves us inside
        if segments.len() % 2 == 0 {
            return Err(MarkdownError::UnbalancedDelimiter {
                delimiter: delimiter.to_string(),
                text: span.content().to_string(),
            });
        }

        for (i, segment) in segments.into_iter().enumerate() {
            if segment.is_empty() {
                continue;
            }
            let segment_kind = if i % 2 == 1 { kind } else { SpanKind::Plain };
            out.push(TextSpan::styled(segment, segment_kind));
        }
    }

    Ok(out)
}

/// Pull images or links out of plain spans, keeping the text around them.
fn split_pattern(spans: Vec<TextSpan>, target: Target) -> Vec<TextSpan> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }

        let text = span.content();
        let mut rest_start = 0;

        for caps in IMAGE_OR_LINK.captures_iter(text) {
            let is_image = !caps[1].is_empty();
            if is_image != (target == Target::Image) {
                continue;
            }

            let whole = caps.get_match();
            if whole.start() > rest_start {
                out.push(TextSpan::plain(&text[rest_start..whole.start()]));
            }
            out.push(match target {
                Target::Image => TextSpan::image(&caps[2], &caps[3]),
                Target::Link => TextSpan::link(&caps[2], &caps[3]),
            });
            rest_start = whole.end();
        }

        if rest_start == 0 {
            out.push(span);
        } else if rest_start < text.len() {
            out.push(TextSpan::plain(&text[rest_start..]));
        }
    }

    out
}
