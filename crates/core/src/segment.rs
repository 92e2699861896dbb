//! Typed inline text segments and their mapping to nodes.

use crate::MarkdownError;
use crate::node::{Attributes, Node};
use crate::options::Options;
use serde::{Deserialize, Serialize};

/// Kind of an inline text segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SegmentKind {
    /// Untyped text, still open to later inline passes.
    Plain,
    /// Text between `**` delimiters.
    Bold,
    /// Text between `_` delimiters.
    Italic,
    /// Text between backticks.
    Code,
    /// Link text; the target holds the URL.
    Link,
    /// Image alt text; the target holds the source URL.
    Image,
}

impl SegmentKind {
    /// Link and image segments carry a target URL; no other kind does.
    pub fn has_target(self) -> bool {
        matches!(self, SegmentKind::Link | SegmentKind::Image)
    }
}

/// A typed unit of inline content produced by the tokenizer.
///
/// The constructors uphold the invariant that `target` is present exactly
/// when the kind is [`SegmentKind::Link`] or [`SegmentKind::Image`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSegment {
    content: String,
    kind: SegmentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target: Option<String>,
}

impl TextSegment {
    /// Creates a segment of a kind that takes no target.
    ///
    /// Passing [`SegmentKind::Link`] or [`SegmentKind::Image`] here produces a
    /// segment that [`segment_to_node`] rejects; use [`TextSegment::link`] or
    /// [`TextSegment::image`] instead.
    pub fn new(content: impl Into<String>, kind: SegmentKind) -> Self {
        Self {
            content: content.into(),
            kind,
            target: None,
        }
    }

    /// Creates a plain text segment.
    pub fn plain(content: impl Into<String>) -> Self {
        Self::new(content, SegmentKind::Plain)
    }

    /// Creates a link segment pointing at `url`.
    pub fn link(content: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: SegmentKind::Link,
            target: Some(url.into()),
        }
    }

    /// Creates an image segment with alt text and source `url`.
    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            content: alt.into(),
            kind: SegmentKind::Image,
            target: Some(url.into()),
        }
    }

    /// Text content, or the alt text for images.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Kind of this segment.
    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// URL of a link or image segment.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Whether the segment is still plain text.
    pub fn is_plain(&self) -> bool {
        self.kind == SegmentKind::Plain
    }
}

/// Maps a segment to a node using default options.
pub fn segment_to_node(segment: &TextSegment) -> Result<Node, MarkdownError> {
    segment_to_node_with_options(segment, &Options::default())
}

/// Maps one segment to one node.
///
/// Fails with [`MarkdownError::Internal`] when the segment's target does not
/// agree with its kind.
pub fn segment_to_node_with_options(
    segment: &TextSegment,
    options: &Options,
) -> Result<Node, MarkdownError> {
    if segment.kind.has_target() != segment.target.is_some() {
        return Err(MarkdownError::Internal(format!(
            "{:?} segment with inconsistent target: {:?}",
            segment.kind, segment.target
        )));
    }

    let content = segment.content.clone();
    let node = match (segment.kind, segment.target.as_deref()) {
        (SegmentKind::Plain, _) => Node::text(content),
        (SegmentKind::Bold, _) => {
            Node::element(options.emphasis.bold_tag(), vec![Node::text(content)])
        }
        (SegmentKind::Italic, _) => {
            Node::element(options.emphasis.italic_tag(), vec![Node::text(content)])
        }
        (SegmentKind::Code, _) => Node::element("code", vec![Node::text(content)]),
        (SegmentKind::Link, Some(url)) => Node::element_with(
            "a",
            vec![Node::text(content)],
            Attributes::new().with("href", url),
        ),
        (SegmentKind::Image, Some(url)) => Node::leaf(
            "img",
            "",
            Attributes::new().with("src", url).with("alt", content),
        ),
        (kind @ (SegmentKind::Link | SegmentKind::Image), None) => {
            return Err(MarkdownError::Internal(format!(
                "{kind:?} segment without target"
            )));
        }
    };
    Ok(node)
}
