//! Error types for texpress-core

use std::path::PathBuf;

use thiserror::Error;

use crate::types::BuildAttempt;

/// Fatal pipeline errors, one per stage that can abort the invocation.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The compiler could not be resolved; recorded before any attempt runs.
  #[error("compiler not found: {tool}")]
  ToolNotFound { tool: String },

  /// The output directory could not be created or is not writable.
  #[error("cannot prepare output directory {}: {source}", path.display())]
  OutputDirectory {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The compiler exhausted its attempt bound without producing an artifact.
  #[error("compilation produced no artifact after {} attempt(s)", attempts.len())]
  Compilation {
    attempts: Vec<BuildAttempt>,
    /// Last lines of the compiler's primary log, captured before cleanup.
    log_tail: Vec<String>,
  },

  /// Copying the artifact to its promoted destination failed.
  #[error("failed to promote {} to {}: {source}", from.display(), to.display())]
  Promotion {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// I/O error outside the categories above.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

impl BuildError {
  /// Operator-facing hint shown next to the error message.
  pub fn remediation(&self) -> &'static str {
    match self {
      BuildError::ToolNotFound { .. } => {
        "no LaTeX compiler is available; run `texpress install` to provision one"
      }
      BuildError::OutputDirectory { .. } => {
        "check that the output directory path is valid and writable"
      }
      BuildError::Compilation { .. } => {
        "inspect the log tail above; fix the source or install missing packages"
      }
      BuildError::Promotion { .. } => {
        "check free space and permissions on the output directory"
      }
      BuildError::Io(_) => "unexpected I/O failure; rerun with --verbose for details",
    }
  }
}
