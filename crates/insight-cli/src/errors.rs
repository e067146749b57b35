//! Error types for the insight CLI.
//!
//! One transparent wrapper enum so every failure mode in a subcommand can
//! propagate with `?` and surface its original message at the boundary of
//! the action that produced it. Nothing here is retried automatically.

use thiserror::Error;

/// Errors that can occur during CLI operations.
#[derive(Error, Debug)]
pub enum InsightCliError {
  /// Errors from the interactive credential prompt
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),

  /// Errors from the underlying insight library
  #[error(transparent)]
  Insight(#[from] insight::errors::InsightError),

  /// File system and IO operation errors
  #[error(transparent)]
  IO(#[from] std::io::Error),
}
