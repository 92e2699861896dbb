#![deny(missing_docs)]

//! Sitemark core: converts Markdown documents into HTML node trees.
//!
//! The pipeline splits a document into blocks, classifies each block,
//! tokenizes inline spans and builds a [`Node`] tree that renders to HTML.

/// Parallel conversion of many documents.
pub mod batch;
/// Block segmentation and classification.
pub mod block;
/// Block-to-node conversion.
pub mod convert;
/// Conversion error type.
pub mod error;
/// Inline span tokenizer.
pub mod inline;
/// HTML node tree.
pub mod node;
/// Conversion and rendering options.
pub mod options;
/// HTML serialization.
pub mod render;
/// Typed inline segments.
pub mod segment;

pub use batch::{
    BatchInput, BatchOptions, BatchProcessingResult, BatchResult, BatchStats, convert_batch,
};
pub use block::{BlockKind, classify_block, segment_document};
pub use convert::{
    convert_block, convert_block_with_options, convert_document, convert_document_with_options,
};
pub use error::MarkdownError;
pub use inline::tokenize_inline;
pub use node::{Attributes, ElementNode, LeafNode, Node};
pub use options::{EmphasisStyle, Options, RenderOptions};
pub use render::markdown_to_html;
pub use segment::{SegmentKind, TextSegment, segment_to_node, segment_to_node_with_options};
