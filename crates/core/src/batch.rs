//! Batch conversion of many documents, in parallel where allowed.

use crate::convert::convert_document_with_options;
use crate::options::{Options, RenderOptions};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// A single document to convert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInput {
    /// Document identifier (typically the source path).
    pub id: String,
    /// Markdown source content.
    pub source: String,
}

/// Result for a single document in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    /// Identifier matching the input.
    pub id: String,
    /// Rendered HTML (present on success).
    pub html: Option<String>,
    /// Error message (present on failure).
    pub error: Option<String>,
}

/// Statistics for a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    /// Total number of inputs.
    pub total: usize,
    /// Number of documents converted.
    pub succeeded: usize,
    /// Number of documents that failed.
    pub failed: usize,
    /// Wall-clock time in milliseconds.
    pub processing_time_ms: f64,
}

/// Options for batch processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOptions {
    /// Maximum number of threads to use. Defaults to the rayon global pool.
    #[serde(default)]
    pub max_threads: Option<usize>,
    /// Whether to keep converting after a document fails.
    #[serde(default = "default_continue_on_error")]
    pub continue_on_error: bool,
    /// Options for converting each document.
    #[serde(default)]
    pub convert: Options,
    /// Options for rendering each document to HTML.
    #[serde(default)]
    pub render: RenderOptions,
}

fn default_continue_on_error() -> bool {
    true
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_threads: None,
            continue_on_error: default_continue_on_error(),
            convert: Options::default(),
            render: RenderOptions::default(),
        }
    }
}

/// All results, in input order, plus statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchProcessingResult {
    /// Per-document results.
    pub results: Vec<BatchResult>,
    /// Aggregate statistics.
    pub stats: BatchStats,
}

/// Converts a batch of documents to HTML.
///
/// With `continue_on_error` every document is converted in parallel and
/// results keep input order. Without it documents are converted one at a
/// time and processing stops after the first failure.
pub fn convert_batch(inputs: Vec<BatchInput>, options: &BatchOptions) -> BatchProcessingResult {
    let start = Instant::now();

    let pool = options.max_threads.and_then(|max_threads| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(max_threads)
            .build()
            .ok()
    });

    let total = inputs.len();
    let succeeded = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    let process_input = |input: BatchInput| -> BatchResult {
        match convert_document_with_options(&input.source, &options.convert) {
            Ok(root) => {
                succeeded.fetch_add(1, Ordering::Relaxed);
                BatchResult {
                    id: input.id,
                    html: Some(root.render(&options.render)),
                    error: None,
                }
            }
            Err(err) => {
                failed.fetch_add(1, Ordering::Relaxed);
                log::warn!("failed to convert {}: {err}", input.id);
                BatchResult {
                    id: input.id,
                    html: None,
                    error: Some(err.to_string()),
                }
            }
        }
    };

    let results: Vec<BatchResult> = if options.continue_on_error {
        if let Some(pool) = pool {
            pool.install(|| inputs.into_par_iter().map(process_input).collect())
        } else {
            inputs.into_par_iter().map(process_input).collect()
        }
    } else {
        // Stop on first error - sequential processing required
        let mut results = Vec::with_capacity(inputs.len());
        for input in inputs {
            let result = process_input(input);
            let had_error = result.error.is_some();
            results.push(result);
            if had_error {
                break;
            }
        }
        results
    };

    BatchProcessingResult {
        results,
        stats: BatchStats {
            total,
            succeeded: succeeded.load(Ordering::Relaxed),
            failed: failed.load(Ordering::Relaxed),
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(id: &str, source: &str) -> BatchInput {
        BatchInput {
            id: id.to_string(),
            source: source.to_string(),
        }
    }

    fn pages() -> Vec<BatchInput> {
        vec![
            input("index.md", "# Home\n\nWelcome **in**."),
            input("broken.md", "Oops _unclosed"),
            input("about.md", "- a\n- b"),
        ]
    }

    #[test]
    fn parallel_batch_keeps_input_order() {
        let out = convert_batch(pages(), &BatchOptions::default());
        let ids: Vec<_> = out.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["index.md", "broken.md", "about.md"]);
        assert_eq!(
            out.results[0].html.as_deref(),
            Some("<div><h1>Home</h1><p>Welcome <b>in</b>.</p></div>")
        );
        assert!(out.results[1].html.is_none());
        assert!(
            out.results[1]
                .error
                .as_deref()
                .is_some_and(|e| e.contains("Unbalanced delimiter '_'"))
        );
        assert_eq!(
            out.results[2].html.as_deref(),
            Some("<div><ul><li>a</li><li>b</li></ul></div>")
        );
        assert_eq!(out.stats.total, 3);
        assert_eq!(out.stats.succeeded, 2);
        assert_eq!(out.stats.failed, 1);
    }

    #[test]
    fn bounded_thread_pool() {
        let options = BatchOptions {
            max_threads: Some(2),
            ..Default::default()
        };
        let out = convert_batch(pages(), &options);
        assert_eq!(out.results.len(), 3);
        assert_eq!(out.stats.succeeded, 2);
    }

    #[test]
    fn stop_on_first_error() {
        let options = BatchOptions {
            continue_on_error: false,
            ..Default::default()
        };
        let out = convert_batch(pages(), &options);
        assert_eq!(out.results.len(), 2);
        assert_eq!(out.results[1].id, "broken.md");
        assert_eq!(out.stats.total, 3);
        assert_eq!(out.stats.failed, 1);
    }
}
