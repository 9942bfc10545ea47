//! Error types for the lexmeta CLI.

use thiserror::Error;

use super::*;

/// Result type alias for the CLI.
pub type Result<T> = core::result::Result<T, LexmetadError>;

/// Errors that can occur while running a CLI command.
#[derive(Error, Debug)]
pub enum LexmetadError {
  /// A library operation failed.
  #[error(transparent)]
  Lexmeta(#[from] LexmetaError),

  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// A prompt could not be shown or answered.
  #[error(transparent)]
  Dialog(#[from] dialoguer::Error),

  /// A directory could not be turned into a search pattern.
  #[error(transparent)]
  Pattern(#[from] glob::PatternError),

  /// A document task panicked or was cancelled.
  #[error(transparent)]
  Join(#[from] tokio::task::JoinError),

  /// At least one document in a batch failed to process.
  #[error("{failed} of {total} documents failed to process")]
  DocumentsFailed {
    /// Number of documents that failed
    failed: usize,
    /// Number of documents in the batch
    total:  usize,
  },
}
