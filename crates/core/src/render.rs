//! HTML serialization of node trees.

use crate::MarkdownError;
use crate::convert::convert_document;
use crate::node::{Attributes, Node};
use crate::options::RenderOptions;

/// Tags rendered without a value or closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Returns true if `tag` is a void HTML element.
pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

impl Node {
    /// Renders the tree to HTML with default options.
    pub fn to_html(&self) -> String {
        self.render(&RenderOptions::default())
    }

    /// Renders the tree to HTML.
    pub fn render(&self, options: &RenderOptions) -> String {
        let mut out = String::new();
        render_node(self, options, &mut out);
        out
    }
}

/// Converts a Markdown document straight to an HTML string.
pub fn markdown_to_html(text: &str) -> Result<String, MarkdownError> {
    Ok(convert_document(text)?.to_html())
}

fn render_node(node: &Node, options: &RenderOptions, out: &mut String) {
    match node {
        Node::Leaf(leaf) => match leaf.tag.as_deref() {
            None => push_text(&leaf.value, options, out),
            Some(tag) if is_void_tag(tag) => open_tag(tag, &leaf.attributes, options, out),
            Some(tag) => {
                open_tag(tag, &leaf.attributes, options, out);
                push_text(&leaf.value, options, out);
                close_tag(tag, out);
            }
        },
        Node::Element(element) => {
            open_tag(&element.tag, &element.attributes, options, out);
            for child in &element.children {
                render_node(child, options, out);
            }
            close_tag(&element.tag, out);
        }
    }
}

fn open_tag(tag: &str, attributes: &Attributes, options: &RenderOptions, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    for (key, value) in attributes.iter() {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        if options.escape_html {
            out.push_str(&html_escape::encode_double_quoted_attribute(value));
        } else {
            out.push_str(value);
        }
        out.push('"');
    }
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn push_text(text: &str, options: &RenderOptions, out: &mut String) {
    if options.escape_html {
        out.push_str(&html_escape::encode_text(text));
    } else {
        out.push_str(text);
    }
}
