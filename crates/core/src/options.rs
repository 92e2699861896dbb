//! Conversion and rendering configuration.

use crate::MarkdownError;
use serde::{Deserialize, Serialize};

/// Which tags bold and italic spans map to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmphasisStyle {
    /// `<b>` and `<i>`.
    #[default]
    Presentational,
    /// `<strong>` and `<em>`.
    Semantic,
}

impl EmphasisStyle {
    /// Tag used for bold spans.
    pub fn bold_tag(self) -> &'static str {
        match self {
            EmphasisStyle::Presentational => "b",
            EmphasisStyle::Semantic => "strong",
        }
    }

    /// Tag used for italic spans.
    pub fn italic_tag(self) -> &'static str {
        match self {
            EmphasisStyle::Presentational => "i",
            EmphasisStyle::Semantic => "em",
        }
    }
}

/// Options controlling Markdown to node-tree conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Tag of the element wrapping every converted block.
    #[serde(default = "default_container_tag")]
    pub container_tag: String,
    /// Tags used for bold and italic spans.
    #[serde(default)]
    pub emphasis: EmphasisStyle,
}

fn default_container_tag() -> String {
    "div".to_string()
}

impl Default for Options {
    fn default() -> Self {
        Self {
            container_tag: default_container_tag(),
            emphasis: EmphasisStyle::default(),
        }
    }
}

impl Options {
    /// Parses options from a JSON object; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, MarkdownError> {
        serde_json::from_str(json).map_err(|err| MarkdownError::Options(err.to_string()))
    }
}

/// Options controlling how a node tree is serialized to HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Escape text and attribute values. Disable only for trusted input.
    #[serde(default = "default_escape_html")]
    pub escape_html: bool,
}

fn default_escape_html() -> bool {
    true
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            escape_html: default_escape_html(),
        }
    }
}
