//! Output location preparation.

use std::path::Path;

use tracing::debug;

use crate::Result;
use crate::error::BuildError;

/// Ensure the output directory exists and is writable.
///
/// Idempotent: an existing writable directory is a no-op success.
/// Writability is probed with a scratch file rather than inferred from
/// metadata, which lies on some filesystems.
pub fn prepare_output_dir(dir: &Path) -> Result<()> {
  std::fs::create_dir_all(dir).map_err(|source| BuildError::OutputDirectory {
    path: dir.to_path_buf(),
    source,
  })?;

  let probe = tempfile::Builder::new()
    .prefix(".texpress-probe-")
    .tempfile_in(dir)
    .map_err(|source| BuildError::OutputDirectory {
      path: dir.to_path_buf(),
      source,
    })?;
  drop(probe);

  debug!(dir = %dir.display(), "output directory ready");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn creates_nested_directories() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("a/b/c");

    prepare_output_dir(&dir).unwrap();
    assert!(dir.is_dir());
  }

  #[test]
  fn existing_directory_is_ok() {
    let temp = TempDir::new().unwrap();

    prepare_output_dir(temp.path()).unwrap();
    prepare_output_dir(temp.path()).unwrap();
  }

  #[test]
  fn file_in_the_way_fails() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();

    let err = prepare_output_dir(&blocker).unwrap_err();
    assert!(matches!(err, BuildError::OutputDirectory { .. }));
  }
}
