//! Workspace cleanup.
//!
//! Best-effort removal of compiler byproducts, the working-copy artifact,
//! and per-attempt logs. Runs on both the success and failure paths and
//! never changes the pipeline verdict: failures here are warnings only.

use std::path::Path;

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::types::BuildRequest;

/// Auxiliary file extensions LaTeX toolchains leave next to the source.
pub const AUX_EXTENSIONS: &[&str] = &[
  "aux",
  "log",
  "out",
  "toc",
  "lof",
  "lot",
  "bbl",
  "blg",
  "fls",
  "nav",
  "snm",
  "vrb",
  "synctex.gz",
  "fdb_latexmk",
];

/// Remove transient build state: auxiliary files, the working-copy
/// artifact, and the per-attempt log directory.
pub fn cleanup_workspace(request: &BuildRequest, logs: TempDir) {
  let dir = request.source_dir();
  let stem = request.source_stem();

  for ext in AUX_EXTENSIONS {
    remove_if_present(&dir.join(format!("{}.{}", stem, ext)));
  }
  remove_if_present(&request.derived_artifact());

  if let Err(e) = logs.close() {
    warn!(error = %e, "failed to remove attempt logs");
  }
}

fn remove_if_present(path: &Path) {
  match std::fs::remove_file(path) {
    Ok(()) => debug!(path = %path.display(), "removed byproduct"),
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
    Err(e) => warn!(path = %path.display(), error = %e, "cleanup failed"),
  }
}
