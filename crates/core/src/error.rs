use thiserror::Error;

/// Errors that can occur during Markdown conversion.
///
/// Validation errors come from the input document and abort the whole
/// conversion. [`MarkdownError::Internal`] marks a broken invariant inside
/// the converter itself and is never caused by ordinary Markdown text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkdownError {
    /// A paired inline delimiter (`**`, `_` or `` ` ``) appeared an odd number of times.
    #[error("Unbalanced delimiter '{delimiter}' in: {text}")]
    UnbalancedDelimiter {
        /// The delimiter that could not be paired.
        delimiter: String,
        /// Text of the segment being split.
        text: String,
    },
    /// Heading marker with no heading text after it.
    #[error("Invalid heading, no text after marker: {block}")]
    InvalidHeading {
        /// The offending block.
        block: String,
    },
    /// Quote block containing a line that does not start with `>`.
    #[error("Invalid quote block, line does not start with '>': {line}")]
    MalformedQuote {
        /// The offending line.
        line: String,
    },
    /// Internal logic error (unexpected state).
    #[error("Internal error: {0}")]
    Internal(String),
    /// A block-level failure, annotated with the block's position in the document.
    #[error("Block {index}: {source}")]
    Block {
        /// 1-based index of the block within the document.
        index: usize,
        /// The underlying failure.
        #[source]
        source: Box<MarkdownError>,
    },
    /// Conversion options could not be parsed.
    #[error("Invalid options: {0}")]
    Options(String),
}

impl MarkdownError {
    /// Create an unbalanced delimiter error.
    pub fn unbalanced(delimiter: impl Into<String>, text: impl Into<String>) -> Self {
        Self::UnbalancedDelimiter {
            delimiter: delimiter.into(),
            text: text.into(),
        }
    }

    /// Attach a 1-based block index to this error.
    pub fn in_block(self, index: usize) -> Self {
        Self::Block {
            index,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping block position context.
    pub fn root_cause(&self) -> &MarkdownError {
        match self {
            MarkdownError::Block { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Returns true for internal-consistency failures (programming defects),
    /// false for validation errors caused by the input document.
    pub fn is_internal(&self) -> bool {
        matches!(self.root_cause(), MarkdownError::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_cause_unwraps_block_context() {
        let err = MarkdownError::unbalanced("**", "a ** b").in_block(3);
        assert_eq!(
            err.root_cause(),
            &MarkdownError::UnbalancedDelimiter {
                delimiter: "**".to_string(),
                text: "a ** b".to_string(),
            }
        );
        assert!(
            err.to_string()
                .starts_with("Block 3: Unbalanced delimiter '**'")
        );
    }

    #[test]
    fn internal_errors_are_distinguished() {
        assert!(MarkdownError::Internal("link without target".into()).is_internal());
        assert!(MarkdownError::Internal("x".into()).in_block(1).is_internal());
        assert!(
            !MarkdownError::InvalidHeading {
                block: "#".into()
            }
            .is_internal()
        );
    }
}
