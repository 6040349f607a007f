use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while persisting staged content.
///
/// Everything that happens before the final flush is recoverable and is
/// reported as a [`Diagnostic`](crate::Diagnostic) instead.
#[derive(Debug, Error)]
pub enum Error {
  /// The directory for a staged file could not be created.
  #[error("failed to create directory `{path}`: {source}")]
  CreateDir {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// A staged file could not be written.
  #[error("failed to write `{path}`: {source}")]
  Write {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Result type for hugodoc-html operations.
pub type Result<T> = std::result::Result<T, Error>;
