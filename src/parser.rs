use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Block, BlockKind};
use crate::error::{MarkdownError, Result};

const FENCE: &str = "```";

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#+\s").expect("heading pattern is valid"));
static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\*|-|\+)\s").expect("unordered item pattern is valid"));
static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s").expect("ordered item pattern is valid"));

/// Split a markdown document into blocks, in source order.
pub fn segment(markdown: &str) -> Result<Vec<Block>> {
    let mut state = ParseState::default();
    let mut blocks = Vec::new();

    for line in markdown.lines() {
        process_line(line, &mut state, &mut blocks);
    }

    if state.in_code_block {
        return Err(MarkdownError::UnterminatedCodeBlock);
    }
    blocks.extend(state.flush());

    log::debug!("segmented document into {} blocks", blocks.len());
    Ok(blocks)
}

#[derive(Default)]
struct ParseState {
    // Raw lines of the block being built
    pending_lines: Vec<String>,
    // Kind of the block being built, if any line has set it yet
    pending_kind: Option<BlockKind>,
    in_code_block: bool,
}

impl ParseState {
    /// Close the pending block and reset to "no block open".
    ///
    /// Returns `None` when nothing but whitespace was pending.
    fn flush(&mut self) -> Option<Block> {
        let lines = std::mem::take(&mut self.pending_lines);
        let kind = self.pending_kind.take().unwrap_or(BlockKind::Paragraph);

        let text = lines.join("\n");
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Block::new(text, kind))
    }

    /// Add a line to a block of `kind`, closing the pending block first if it
    /// is of a different kind.
    fn push_into(&mut self, kind: BlockKind, line: &str, blocks: &mut Vec<Block>) {
        if self.pending_kind.is_some_and(|pending| pending != kind) {
            blocks.extend(self.flush());
        }
        self.pending_kind = Some(kind);
        self.pending_lines.push(line.to_string());
    }
}

fn process_line(line: &str, state: &mut ParseState, blocks: &mut Vec<Block>) {
    let trimmed = line.trim();

    // Fences toggle code mode; the closing fence belongs to the code block
    if trimmed.starts_with(FENCE) {
        if state.in_code_block {
            state.pending_lines.push(line.to_string());
            blocks.extend(state.flush());
            state.in_code_block = false;
        } else {
            blocks.extend(state.flush());
            state.pending_lines.push(line.to_string());
            state.pending_kind = Some(BlockKind::Code);
            state.in_code_block = true;
        }
        return;
    }

    if state.in_code_block {
        state.pending_lines.push(line.to_string());
        return;
    }

    if trimmed.is_empty() {
        blocks.extend(state.flush());
        return;
    }

    if HEADING.is_match(trimmed) {
        blocks.extend(state.flush());
        blocks.push(Block::new(trimmed, BlockKind::Heading));
    } else if trimmed.starts_with('>') {
        state.push_into(BlockKind::Quote, line, blocks);
    } else if UNORDERED_ITEM.is_match(trimmed) {
        state.push_into(BlockKind::UnorderedList, line, blocks);
    } else if ORDERED_ITEM.is_match(trimmed) {
        state.push_into(BlockKind::OrderedList, line, blocks);
    } else {
        state.push_into(BlockKind::Paragraph, line, blocks);
    }
}
