//! Block segmentation and classification.
//!
//! A document is a flat sequence of blocks separated by blank lines. Each
//! block is classified independently from its raw text; nothing is cached.

use once_cell::sync::Lazy;
use regex::Regex;

static HEADING_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6} \S").unwrap());

/// Marker that opens and closes a fenced code block.
pub const CODE_FENCE: &str = "```";

/// The kind of a Markdown block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Any block no other rule claims.
    Paragraph,
    /// One to six `#` followed by a space and text.
    Heading,
    /// Starts with a triple-backtick fence.
    Code,
    /// Every line starts with `>`.
    Quote,
    /// Every line starts with `- `.
    UnorderedList,
    /// Lines start with `1. `, `2. `, … in sequence.
    OrderedList,
}

/// Splits a document into raw blocks on blank lines.
///
/// Each block is trimmed, and any line indented by two spaces loses exactly
/// those two spaces. Blocks that are empty after trimming are dropped.
pub fn segment_document(text: &str) -> Vec<String> {
    text.split("\n\n")
        .filter(|split| !split.is_empty() && *split != "\n")
        .map(|split| split.trim().replace("\n  ", "\n"))
        .filter(|block| !block.is_empty())
        .collect()
}

/// Determines the kind of a raw block. First matching rule wins.
///
/// Quote and list kinds require every line to conform; a single stray line
/// turns the whole block into a paragraph.
pub fn classify_block(block: &str) -> BlockKind {
    if HEADING_REGEX.is_match(block) {
        return BlockKind::Heading;
    }

    if block.starts_with(CODE_FENCE) {
        return BlockKind::Code;
    }

    if block.starts_with('>') {
        return uniform_or_paragraph(block, BlockKind::Quote, |line| line.starts_with('>'));
    }

    if block.starts_with("- ") {
        return uniform_or_paragraph(block, BlockKind::UnorderedList, |line| {
            line.starts_with("- ")
        });
    }

    if block.starts_with("1. ") {
        let sequential = block
            .split('\n')
            .enumerate()
            .all(|(idx, line)| line.starts_with(&format!("{}. ", idx + 1)));
        return if sequential {
            BlockKind::OrderedList
        } else {
            BlockKind::Paragraph
        };
    }

    BlockKind::Paragraph
}

fn uniform_or_paragraph(
    block: &str,
    kind: BlockKind,
    conforms: impl Fn(&str) -> bool,
) -> BlockKind {
    if block.split('\n').all(conforms) {
        kind
    } else {
        BlockKind::Paragraph
    }
}
