//! Pipeline value types.
//!
//! A `BuildRequest` is constructed once from caller configuration and passed
//! through the pipeline unchanged; nothing reads the process working
//! directory. `BuildAttempt` and `BuildResult` are produced by the pipeline
//! and never mutated after return.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Native output extension of the supported compilers.
pub const ARTIFACT_EXT: &str = "pdf";

/// Conventional two-pass bound: one compile plus one rerun, enough for the
/// compiler to resolve cross-references or recover from a transient failure.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// Immutable description of one pipeline invocation.
#[derive(Debug, Clone)]
pub struct BuildRequest {
  /// Document root source file.
  pub source: PathBuf,
  /// Explicit compiler path or bare tool name; `None` means the default tool.
  pub tool: Option<PathBuf>,
  /// Directory promoted artifacts land in.
  pub output_dir: PathBuf,
  /// Identity label embedded in every promoted artifact name.
  pub label: String,
  /// Upper bound on compiler invocations; always at least 1.
  pub max_attempts: u32,
}

impl BuildRequest {
  /// Create a request with the default label (source stem) and attempt bound.
  pub fn new(source: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
    let source = source.into();
    let label = source
      .file_stem()
      .and_then(|s| s.to_str())
      .unwrap_or("document")
      .to_string();
    Self {
      source,
      tool: None,
      output_dir: output_dir.into(),
      label,
      max_attempts: DEFAULT_MAX_ATTEMPTS,
    }
  }

  /// Directory the compiler runs in: the source file's parent.
  pub fn source_dir(&self) -> &Path {
    match self.source.parent() {
      Some(p) if !p.as_os_str().is_empty() => p,
      _ => Path::new("."),
    }
  }

  /// Source file name without extension.
  pub fn source_stem(&self) -> &str {
    self
      .source
      .file_stem()
      .and_then(|s| s.to_str())
      .unwrap_or("document")
  }

  /// Where the compiler is expected to leave its output: the source name
  /// with the extension replaced.
  pub fn derived_artifact(&self) -> PathBuf {
    self
      .source_dir()
      .join(format!("{}.{}", self.source_stem(), ARTIFACT_EXT))
  }

  /// Clamp the attempt bound to the valid range.
  pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
    self.max_attempts = max_attempts.max(1);
    self
  }
}

/// Record of a single compiler invocation.
#[derive(Debug, Clone, Serialize)]
pub struct BuildAttempt {
  pub number: u32,
  /// Exit code of the compiler; `None` if it was killed by a signal.
  pub exit_code: Option<i32>,
  pub stdout_log: PathBuf,
  pub stderr_log: PathBuf,
}

/// Terminal outcome of one pipeline invocation.
#[derive(Debug, Clone, Serialize)]
pub struct BuildResult {
  pub success: bool,
  /// Promoted artifact path; populated iff `success`.
  pub artifact: Option<PathBuf>,
  pub size_bytes: Option<u64>,
  pub attempts: Vec<BuildAttempt>,
}
