//! Block-to-node conversion.
//!
//! Every [`BlockKind`] has exactly one handler. Inline text goes through
//! [`tokenize_inline`] except inside code blocks, whose content is literal.

use crate::MarkdownError;
use crate::block::{BlockKind, CODE_FENCE, classify_block, segment_document};
use crate::inline::tokenize_inline;
use crate::node::Node;
use crate::options::Options;
use crate::segment::{TextSegment, segment_to_node_with_options};

/// Converts a whole document into a container element using default options.
pub fn convert_document(text: &str) -> Result<Node, MarkdownError> {
    convert_document_with_options(text, &Options::default())
}

/// Converts a whole document into a container element.
///
/// Children appear in document order, one per block. The first failing block
/// aborts the conversion; its error carries the block's 1-based index.
pub fn convert_document_with_options(text: &str, options: &Options) -> Result<Node, MarkdownError> {
    let blocks = segment_document(text);
    log::debug!("segmented document into {} blocks", blocks.len());

    let children = blocks
        .iter()
        .enumerate()
        .map(|(idx, block)| {
            convert_block_with_options(block, options).map_err(|err| {
                log::debug!("block {} failed to convert: {err}", idx + 1);
                err.in_block(idx + 1)
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Node::element(options.container_tag.as_str(), children))
}

/// Converts one raw block into a node subtree using default options.
pub fn convert_block(block: &str) -> Result<Node, MarkdownError> {
    convert_block_with_options(block, &Options::default())
}

/// Classifies a raw block and converts it into a node subtree.
pub fn convert_block_with_options(block: &str, options: &Options) -> Result<Node, MarkdownError> {
    let kind = classify_block(block);
    log::debug!("classified block as {kind:?}");

    match kind {
        BlockKind::Paragraph => paragraph_to_node(block, options),
        BlockKind::Heading => heading_to_node(block, options),
        BlockKind::Code => code_to_node(block, options),
        BlockKind::Quote => quote_to_node(block, options),
        BlockKind::UnorderedList => list_to_node(block, "ul", 2, options),
        BlockKind::OrderedList => list_to_node(block, "ol", 3, options),
    }
}

/// Tokenizes inline text and maps every segment to a node.
pub fn text_to_children(text: &str, options: &Options) -> Result<Vec<Node>, MarkdownError> {
    tokenize_inline(text)?
        .iter()
        .map(|segment| segment_to_node_with_options(segment, options))
        .collect()
}

fn paragraph_to_node(block: &str, options: &Options) -> Result<Node, MarkdownError> {
    let text = block.split('\n').collect::<Vec<_>>().join(" ");
    Ok(Node::element("p", text_to_children(&text, options)?))
}

fn heading_to_node(block: &str, options: &Options) -> Result<Node, MarkdownError> {
    let level = block.chars().take_while(|c| *c == '#').count();
    let invalid = || MarkdownError::InvalidHeading {
        block: block.to_string(),
    };
    if level + 1 >= block.len() {
        return Err(invalid());
    }
    let text = block.get(level + 1..).ok_or_else(invalid)?;
    Ok(Node::element(
        format!("h{level}"),
        text_to_children(text, options)?,
    ))
}

fn code_to_node(block: &str, options: &Options) -> Result<Node, MarkdownError> {
    let lines: Vec<&str> = block.split('\n').collect();
    let start = lines
        .iter()
        .position(|line| line.contains(CODE_FENCE))
        .unwrap_or(0);
    let end = lines
        .iter()
        .rposition(|line| line.contains(CODE_FENCE))
        .unwrap_or(lines.len());

    let mut content = lines.get(start + 1..end).unwrap_or(&[]).join("\n");
    if !content.ends_with('\n') {
        content.push('\n');
    }

    let text = segment_to_node_with_options(&TextSegment::plain(content), options)?;
    Ok(Node::element(
        "pre",
        vec![Node::element("code", vec![text])],
    ))
}

fn quote_to_node(block: &str, options: &Options) -> Result<Node, MarkdownError> {
    let mut lines = Vec::new();
    for line in block.split('\n') {
        if !line.starts_with('>') {
            return Err(MarkdownError::MalformedQuote {
                line: line.to_string(),
            });
        }
        lines.push(line.trim_start_matches('>').trim());
    }
    let text = lines.join(" ");
    Ok(Node::element(
        "blockquote",
        text_to_children(&text, options)?,
    ))
}

/// Builds a `ul`/`ol` from lines whose first `marker_width` characters are the marker.
///
/// The ordered marker width is fixed at three characters (`"1. "`), so items
/// numbered 10 and above keep a stray leading character.
fn list_to_node(
    block: &str,
    tag: &str,
    marker_width: usize,
    options: &Options,
) -> Result<Node, MarkdownError> {
    let items = block
        .split('\n')
        .map(|line| -> Result<Node, MarkdownError> {
            let text = drop_chars(line, marker_width);
            Ok(Node::element("li", text_to_children(text, options)?))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Node::element(tag, items))
}

fn drop_chars(line: &str, count: usize) -> &str {
    match line.char_indices().nth(count) {
        Some((offset, _)) => &line[offset..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::EmphasisStyle;

    fn li(children: Vec<Node>) -> Node {
        Node::element("li", children)
    }

    #[test]
    fn heading_with_bold() {
        let node = convert_block("# Hello **world**").unwrap();
        assert_eq!(
            node,
            Node::element(
                "h1",
                vec![
                    Node::text("Hello "),
                    Node::element("b", vec![Node::text("world")]),
                ]
            )
        );
    }

    #[test]
    fn heading_level_follows_marker_count() {
        let node = convert_block("### Third").unwrap();
        assert_eq!(node.tag(), Some("h3"));
        assert_eq!(node.text_content(), "Third");
    }

    #[test]
    fn heading_without_text_is_rejected() {
        let err = heading_to_node("##", &Options::default()).unwrap_err();
        assert_eq!(
            err,
            MarkdownError::InvalidHeading {
                block: "##".to_string()
            }
        );
        assert!(heading_to_node("## ", &Options::default()).is_err());
    }

    #[test]
    fn paragraph_joins_lines_with_spaces() {
        let node = convert_block("one\ntwo _three_").unwrap();
        assert_eq!(
            node,
            Node::element(
                "p",
                vec![
                    Node::text("one two "),
                    Node::element("i", vec![Node::text("three")]),
                ]
            )
        );
    }

    #[test]
    fn code_block_content_is_literal() {
        let node = convert_block("```\nlet **x** = `y`;\nfn _z_() {}\n```").unwrap();
        assert_eq!(
            node,
            Node::element(
                "pre",
                vec![Node::element(
                    "code",
                    vec![Node::text("let **x** = `y`;\nfn _z_() {}\n")]
                )]
            )
        );
    }

    #[test]
    fn code_block_skips_info_string_line() {
        let node = convert_block("```rust\nfn main() {}\n```").unwrap();
        assert_eq!(node.text_content(), "fn main() {}\n");
    }

    #[test]
    fn code_block_keeps_existing_trailing_newline() {
        let node = convert_block("```\nx\n\n```").unwrap();
        assert_eq!(node.text_content(), "x\n");
        assert_eq!(node.to_html(), "<pre><code>x\n</code></pre>");
    }

    #[test]
    fn unclosed_code_block_is_empty() {
        let node = convert_block("```").unwrap();
        assert_eq!(node.text_content(), "\n");
    }

    #[test]
    fn quote_strips_markers_and_joins() {
        let node = convert_block("> first line\n>> **second**").unwrap();
        assert_eq!(
            node,
            Node::element(
                "blockquote",
                vec![
                    Node::text("first line "),
                    Node::element("b", vec![Node::text("second")]),
                ]
            )
        );
    }

    #[test]
    fn quote_handler_rechecks_every_line() {
        let err = quote_to_node("> ok\nnot quoted", &Options::default()).unwrap_err();
        assert_eq!(
            err,
            MarkdownError::MalformedQuote {
                line: "not quoted".to_string()
            }
        );
    }

    #[test]
    fn unordered_list_items() {
        let node = convert_block("- one\n- `two`").unwrap();
        assert_eq!(
            node,
            Node::element(
                "ul",
                vec![
                    li(vec![Node::text("one")]),
                    li(vec![Node::element("code", vec![Node::text("two")])]),
                ]
            )
        );
    }

    #[test]
    fn ordered_list_items() {
        let node = convert_block("1. first\n2. [second](https://two.dev)").unwrap();
        assert_eq!(node.tag(), Some("ol"));
        assert_eq!(node.children().len(), 2);
        assert_eq!(node.children()[0], li(vec![Node::text("first")]));
        assert_eq!(node.children()[1].children()[0].tag(), Some("a"));
    }

    #[test]
    fn tenth_ordered_item_keeps_fixed_marker_width() {
        let block = (1..=10)
            .map(|n| format!("{n}. item"))
            .collect::<Vec<_>>()
            .join("\n");
        let node = convert_block(&block).unwrap();
        assert_eq!(node.children().len(), 10);
        assert_eq!(node.children()[8].text_content(), "item");
        assert_eq!(node.children()[9].text_content(), " item");
    }

    #[test]
    fn unbalanced_paragraph_fails_block() {
        let err = convert_block("oops **bold").unwrap_err();
        assert!(matches!(err, MarkdownError::UnbalancedDelimiter { .. }));
    }

    #[test]
    fn document_children_in_order() {
        let node = convert_document("Para one.\n\nPara two.").unwrap();
        assert_eq!(
            node,
            Node::element(
                "div",
                vec![
                    Node::element("p", vec![Node::text("Para one.")]),
                    Node::element("p", vec![Node::text("Para two.")]),
                ]
            )
        );
    }

    #[test]
    fn document_error_names_block() {
        let err = convert_document("fine\n\n# ok\n\nbad _italic").unwrap_err();
        assert!(matches!(err, MarkdownError::Block { index: 3, .. }));
        assert!(matches!(
            err.root_cause(),
            MarkdownError::UnbalancedDelimiter { delimiter, .. } if delimiter == "_"
        ));
    }

    #[test]
    fn options_change_container_and_emphasis() {
        let options = Options {
            container_tag: "article".to_string(),
            emphasis: EmphasisStyle::Semantic,
        };
        let node = convert_document_with_options("**a** _b_", &options).unwrap();
        assert_eq!(node.tag(), Some("article"));
        let para = &node.children()[0];
        assert_eq!(para.children()[0].tag(), Some("strong"));
        assert_eq!(para.children()[2].tag(), Some("em"));
    }

    #[test]
    fn empty_document_is_empty_container() {
        let node = convert_document("\n\n\n").unwrap();
        assert_eq!(node, Node::element("div", vec![]));
    }
}
