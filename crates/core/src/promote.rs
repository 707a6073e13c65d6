//! Artifact promotion.
//!
//! Copies the working artifact into the output directory under a
//! collision-resistant name: `<label>_<YYYYMMDD>_<HHMMSS>.<ext>`. The
//! timestamp component means promotion never overwrites an artifact from
//! an earlier invocation; two invocations within the same second are
//! last-writer-wins, which is acceptable for a manually triggered build.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use crate::Result;
use crate::error::BuildError;
use crate::types::ARTIFACT_EXT;

/// A promoted artifact and its final size.
#[derive(Debug, Clone)]
pub struct Promoted {
  pub path: PathBuf,
  pub size_bytes: u64,
}

/// Destination file name for a promotion at the given instant.
pub fn artifact_name(label: &str, ext: &str, timestamp: DateTime<Local>) -> String {
  format!("{}_{}.{}", label, timestamp.format("%Y%m%d_%H%M%S"), ext)
}

/// Copy the artifact into the output directory under its timestamped name.
pub fn promote(artifact: &Path, output_dir: &Path, label: &str) -> Result<Promoted> {
  let ext = artifact
    .extension()
    .and_then(|e| e.to_str())
    .unwrap_or(ARTIFACT_EXT);
  let dest = output_dir.join(artifact_name(label, ext, Local::now()));

  fn promotion_err(from: &Path, to: &Path, source: std::io::Error) -> BuildError {
    BuildError::Promotion {
      from: from.to_path_buf(),
      to: to.to_path_buf(),
      source,
    }
  }

  std::fs::copy(artifact, &dest).map_err(|e| promotion_err(artifact, &dest, e))?;
  let size_bytes = std::fs::metadata(&dest)
    .map_err(|e| promotion_err(artifact, &dest, e))?
    .len();

  info!(artifact = %dest.display(), size = size_bytes, "artifact promoted");
  Ok(Promoted {
    path: dest,
    size_bytes,
  })
}
