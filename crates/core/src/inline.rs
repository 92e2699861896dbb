//! Inline tokenizer: splits raw text into typed [`TextSegment`]s.
//!
//! Tokenization is a fixed sequence of passes over a segment list. Each pass
//! only rewrites segments that are still plain text, so content typed by an
//! earlier pass is never re-split:
//!
//! 1. `**` → bold
//! 2. `_` → italic
//! 3. `` ` `` → code
//! 4. `![alt](scheme://url)` → image
//! 5. `[text](scheme://url)` → link
//!
//! The image pass must run before the link pass; otherwise the link pattern
//! would also match the bracketed part of every image.

use crate::MarkdownError;
use crate::segment::{SegmentKind, TextSegment};
use once_cell::sync::Lazy;
use regex::Regex;

static IMAGE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[(.*?)\]\((\w+://[^\s)]+)\)").unwrap());

static LINK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(.*?)\]\((\w+://[^\s)]+)\)").unwrap());

/// Tokenizes raw inline text into an ordered list of segments.
pub fn tokenize_inline(text: &str) -> Result<Vec<TextSegment>, MarkdownError> {
    let segments = vec![TextSegment::plain(text)];
    let segments = split_delimiter(segments, "**", SegmentKind::Bold)?;
    let segments = split_delimiter(segments, "_", SegmentKind::Italic)?;
    let segments = split_delimiter(segments, "`", SegmentKind::Code)?;
    let segments = split_images(segments);
    let segments = split_links(segments);
    log::trace!("tokenized {text:?} into {} segments", segments.len());
    Ok(segments)
}

/// Splits every plain segment on `delimiter`, typing odd chunks as `kind`.
///
/// Empty chunks are dropped, so adjacent delimiters do not leave empty
/// segments behind. An odd number of delimiters in one segment is an error.
pub fn split_delimiter(
    segments: Vec<TextSegment>,
    delimiter: &str,
    kind: SegmentKind,
) -> Result<Vec<TextSegment>, MarkdownError> {
    let mut out = Vec::with_capacity(segments.len());
    for segment in segments {
        if !segment.is_plain() {
            out.push(segment);
            continue;
        }

        let chunks: Vec<&str> = segment.content().split(delimiter).collect();
        if chunks.len() % 2 == 0 {
            return Err(MarkdownError::unbalanced(delimiter, segment.content()));
        }

        for (idx, chunk) in chunks.into_iter().enumerate() {
            if chunk.is_empty() {
                continue;
            }
            if idx % 2 == 0 {
                out.push(TextSegment::plain(chunk));
            } else {
                out.push(TextSegment::new(chunk, kind));
            }
        }
    }
    Ok(out)
}

/// Extracts `(alt, url)` pairs for every image in `text`, left to right.
pub fn extract_images(text: &str) -> Vec<(&str, &str)> {
    extract_pairs(&IMAGE_REGEX, text)
}

/// Extracts `(text, url)` pairs for every link in `text`, left to right.
///
/// Image markup also matches this pattern; callers run the image pass first.
pub fn extract_links(text: &str) -> Vec<(&str, &str)> {
    extract_pairs(&LINK_REGEX, text)
}

fn extract_pairs<'t>(regex: &Regex, text: &'t str) -> Vec<(&'t str, &'t str)> {
    regex
        .captures_iter(text)
        .filter_map(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
        .collect()
}

/// Replaces image markup inside plain segments with image segments.
pub fn split_images(segments: Vec<TextSegment>) -> Vec<TextSegment> {
    split_matches(segments, &IMAGE_REGEX, |alt, url| TextSegment::image(alt, url))
}

/// Replaces link markup inside plain segments with link segments.
pub fn split_links(segments: Vec<TextSegment>) -> Vec<TextSegment> {
    split_matches(segments, &LINK_REGEX, |text, url| TextSegment::link(text, url))
}

fn split_matches(
    segments: Vec<TextSegment>,
    regex: &Regex,
    make: fn(&str, &str) -> TextSegment,
) -> Vec<TextSegment> {
    let mut out = Vec::with_capacity(segments.len());
    for segment in segments {
        if !segment.is_plain() || !regex.is_match(segment.content()) {
            out.push(segment);
            continue;
        }

        let text = segment.content();
        let mut cursor = 0;
        for caps in regex.captures_iter(text) {
            let (Some(whole), Some(label), Some(url)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            if whole.start() > cursor {
                out.push(TextSegment::plain(&text[cursor..whole.start()]));
            }
            out.push(make(label.as_str(), url.as_str()));
            cursor = whole.end();
        }
        if cursor < text.len() {
            out.push(TextSegment::plain(&text[cursor..]));
        }
    }
    out
}
