//! Error types for the insight library.
//!
//! This module provides a single error type covering every failure mode in
//! the pipeline:
//! - Identifier parsing
//! - PDF download
//! - Text extraction
//! - Analysis requests and export serialization
//!
//! Note that a model reply that cannot be decoded into sections is *not* an
//! error: it degrades to the raw variant of
//! [`AnalysisRecord`](crate::analysis::AnalysisRecord) instead.

use thiserror::Error;

/// Errors that can occur when working with the insight library.
///
/// Each variant is terminal for the single action that produced it; the
/// caller may retry manually but the library never retries on its own.
#[derive(Error, Debug)]
pub enum InsightError {
  /// The input didn't contain any of the accepted identifier shapes.
  ///
  /// Accepted shapes are an `arxiv.org/abs/...` URL, an `arxiv.org/pdf/...`
  /// URL, or a bare identifier such as `2301.07041`. A well-formed but
  /// nonexistent identifier passes parsing and fails later at fetch time.
  #[error("Input does not contain a recognizable arXiv identifier")]
  InvalidIdentifier,

  /// A network request failed.
  ///
  /// This covers transport faults, timeouts, and non-success HTTP statuses
  /// from the PDF download (via `error_for_status`), with the underlying
  /// cause preserved.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The byte stream could not be parsed as a PDF document.
  #[error("Failed to parse PDF document: {0}")]
  Extraction(#[from] lopdf::Error),

  /// The analysis endpoint returned an error response.
  ///
  /// The string carries the HTTP status and response body verbatim, which is
  /// how authentication failures from a missing or invalid credential
  /// surface.
  #[error("Analysis request failed: {0}")]
  Api(String),

  /// Serializing or deserializing an exported report failed.
  #[error(transparent)]
  Serialization(#[from] serde_json::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),
}
